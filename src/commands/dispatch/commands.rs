//! Command implementations for all marksheet commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::dispatch::trace_command;
use marksheet_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Init => crate::commands::init::execute(ctx.cli, ctx.root),
            Commands::Import(args) => {
                let mut store = ctx.discover_or_open_store()?;
                trace_command!(ctx.cli, ctx.start, "discover_store");
                crate::commands::import::execute(ctx.cli, &mut store, args)
            }
            Commands::List(args) => {
                let store = ctx.discover_or_open_store()?;
                trace_command!(ctx.cli, ctx.start, "discover_store");
                crate::commands::list::execute(ctx.cli, &store, args)
            }
            Commands::Show(args) => {
                let store = ctx.discover_or_open_store()?;
                trace_command!(ctx.cli, ctx.start, "discover_store");
                crate::commands::show::execute(ctx.cli, &store, args)
            }
            Commands::Export(args) => {
                let store = ctx.discover_or_open_store()?;
                trace_command!(ctx.cli, ctx.start, "discover_store");
                crate::commands::export::execute(ctx.cli, &store, args)
            }
            Commands::Weights(args) => {
                let (registry, _) = ctx.registry_and_config()?;
                crate::commands::weights::execute(ctx.cli, &registry, args)
            }
            Commands::Apportion(args) => {
                let (registry, config) = ctx.registry_and_config()?;
                crate::commands::apportion::execute(ctx.cli, &registry, &config, args)
            }
        }
    }
}
