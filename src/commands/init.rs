//! `marksheet init` command - create a new store
//!
//! Idempotent: re-running keeps the existing config and database.

use std::path::Path;

use crate::cli::paths::resolve_against_root;
use crate::cli::Cli;
use crate::output_by_format_result;
use marksheet_core::error::Result;
use marksheet_core::store::Store;

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let store = if let Some(path) = cli.store.as_ref() {
        Store::init_at(&resolve_against_root(root, path))?
    } else {
        Store::init(root)?
    };

    output_by_format_result!(cli.format,
        json => {
            let output = serde_json::json!({
                "status": "ok",
                "store": store.root().display().to_string(),
                "message": "Store initialized"
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), marksheet_core::error::MarksheetError>(())
        },
        human => {
            if !cli.quiet {
                println!("Initialized marksheet store at {}", store.root().display());
                println!();
                println!("Run `marksheet import <FILE> --phase N --review N` to load marks.");
            }
        }
    )?;

    Ok(())
}
