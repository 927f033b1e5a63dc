//! Command dispatch logic for typegraph

use std::time::Instant;

use crate::cli::Cli;
use typegraph_core::config::AlgorithmConfig;
use typegraph_core::error::Result;
use tracing::debug;

mod command;
mod commands;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AlgorithmConfig::load(path)?,
        None => AlgorithmConfig::load_default()?,
    };

    debug!(elapsed = ?start.elapsed(), "load_config");

    let ctx = CommandContext::new(cli, config, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
