//! `marksheet export` command - CSV export of one phase/review

use std::fs::File;
use std::io::{self, BufWriter};

use crate::cli::{Cli, ExportArgs, OutputFormat};
use marksheet_core::error::Result;
use marksheet_core::report::{evaluation_rows, write_csv};
use marksheet_core::store::Store;

/// Execute the export command
pub fn execute(cli: &Cli, store: &Store, args: &ExportArgs) -> Result<()> {
    let (phase, review) = store.resolve_slice(args.slice.phase, args.slice.review);
    let config = store.weight_config(phase, review)?;
    let rows = evaluation_rows(store.db(), phase, review)?;

    let Some(path) = &args.output else {
        let stdout = io::stdout();
        return write_csv(&rows, config, stdout.lock());
    };

    write_csv(&rows, config, BufWriter::new(File::create(path)?))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "export written");

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "path": path.display().to_string(),
                "rows": rows.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Exported {} row(s) for phase {} review {} to {}",
                    rows.len(),
                    phase,
                    review,
                    path.display()
                );
            }
        }
    }

    Ok(())
}
