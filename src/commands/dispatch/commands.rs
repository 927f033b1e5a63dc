//! Command implementations for all typegraph commands

use crate::cli::Commands;
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use typegraph_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Traverse(args) => commands::traverse::execute(ctx, args),
            Commands::Components(args) => commands::components::execute(ctx, args),
            Commands::Path(args) => commands::path::execute(ctx, args),
        }
    }
}
