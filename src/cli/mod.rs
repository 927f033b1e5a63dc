//! CLI argument parsing for typegraph
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json, --config

pub mod args;
pub mod output;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{ComponentsArgs, PathArgs, ScopeArgs, TraverseArgs};
pub use output::OutputFormat;

/// Typegraph - traversal, connectivity and shortest paths over typed graphs
#[derive(Parser, Debug)]
#[command(name = "typegraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (error, warn, info, debug, trace, or directives)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (defaults to the user config.toml)
    #[arg(long, global = true, env = "TYPEGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the graph from a source node, breadth- or depth-first
    Traverse(TraverseArgs),

    /// Compute weakly or strongly connected components
    Components(ComponentsArgs),

    /// Find the shortest path between two nodes
    Path(PathArgs),
}
