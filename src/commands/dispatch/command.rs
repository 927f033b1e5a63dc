//! Command trait and context for dispatching commands

use std::path::Path;
use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use typegraph_core::config::AlgorithmConfig;
use typegraph_core::error::Result;
use typegraph_core::store::{GraphDocument, LoadedGraph};

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: AlgorithmConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: AlgorithmConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    /// `--format` when given, the configured format otherwise
    pub fn format(&self) -> OutputFormat {
        self.cli
            .format
            .unwrap_or_else(|| self.config.output.format.into())
    }

    /// Read and load a graph document
    pub fn load_graph(&self, path: &Path) -> Result<LoadedGraph> {
        self.load_document(path).map(|(_, graph)| graph)
    }

    /// Read a graph document and load it, keeping the document for write-back
    pub fn load_document(&self, path: &Path) -> Result<(GraphDocument, LoadedGraph)> {
        let document = GraphDocument::from_path(path)?;
        let graph = document.load()?;
        if self.cli.verbose {
            tracing::debug!(
                path = %path.display(),
                nodes = graph.store.node_count(),
                edges = graph.store.edge_count(),
                elapsed = ?self.start.elapsed(),
                "load_graph"
            );
        }
        Ok((document, graph))
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("typegraph {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Traversal, connectivity and shortest paths over typed graphs.");
        println!();
        println!("Run `typegraph --help` for usage information.");
        Ok(())
    }
}
