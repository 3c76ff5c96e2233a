//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::paths::resolve_against_root;
use crate::cli::Cli;
use marksheet_core::error::{MarksheetError, Result};
use marksheet_core::store::config::StoreConfig;
use marksheet_core::store::Store;
use marksheet_core::weights::WeightRegistry;

/// Discover or open a store based on CLI configuration
pub fn discover_or_open_store(cli: &Cli, root: &PathBuf) -> Result<Store> {
    if let Some(path) = &cli.store {
        Store::open(&resolve_against_root(root, path))
    } else {
        Store::discover(root)
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    pub fn discover_or_open_store(&self) -> Result<Store> {
        discover_or_open_store(self.cli, self.root)
    }

    /// Registry and defaults for read-only weight commands.
    ///
    /// Without a discoverable store the built-in registry is used; an explicit
    /// `--store` that cannot be opened is still an error.
    pub fn registry_and_config(&self) -> Result<(WeightRegistry, StoreConfig)> {
        match self.discover_or_open_store() {
            Ok(store) => Ok((store.registry().clone(), store.config().clone())),
            Err(MarksheetError::StoreNotFound { .. }) if self.cli.store.is_none() => {
                tracing::debug!("no store found, using built-in weights");
                Ok((WeightRegistry::builtin(), StoreConfig::default()))
            }
            Err(e) => Err(e),
        }
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
        println!("marksheet {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Reconcile project review marks from committee spreadsheets.");
        println!();
        println!("Run `marksheet --help` for usage information.");
        Ok(())
    }
}
