//! `marksheet import` command - load one spreadsheet into a phase/review
//!
//! The slice is replaced wholesale. Rows with malformed marks are skipped
//! and reported; the command still succeeds.

use std::time::Instant;

use crate::cli::{Cli, ImportArgs};
use crate::commands::dispatch::trace_command;
use crate::output_by_format_result;
use marksheet_core::error::{MarksheetError, Result};
use marksheet_core::import::ImportReport;
use marksheet_core::sheet::read_sheet;
use marksheet_core::store::Store;

/// Execute the import command
pub fn execute(cli: &Cli, store: &mut Store, args: &ImportArgs) -> Result<()> {
    let start = Instant::now();
    let (phase, review) = store.resolve_slice(args.slice.phase, args.slice.review);

    // Fail on an unknown slice before touching the file
    store.weight_config(phase, review)?;

    if !args.file.is_file() {
        return Err(MarksheetError::not_found(
            "spreadsheet",
            args.file.display(),
        ));
    }

    let sheet = read_sheet(&args.file)?;
    trace_command!(cli, start, "read_sheet");

    let report = store.import(&sheet, phase, review)?;
    trace_command!(cli, start, "import");

    output_by_format_result!(cli.format,
        json => {
            let output = serde_json::json!({
                "status": "ok",
                "file": args.file.display().to_string(),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), MarksheetError>(())
        },
        human => {
            output_human(cli, &report);
        }
    )?;

    Ok(())
}

fn output_human(cli: &Cli, report: &ImportReport) {
    if !cli.quiet {
        println!(
            "Imported {} evaluation(s) into phase {} review {} ({})",
            report.imported(),
            report.phase,
            report.review,
            report.shape
        );
        println!(
            "  created: {}, updated: {}, new students: {}, replaced: {}",
            report.created, report.updated, report.new_students, report.deleted
        );
        if report.skipped_blank > 0 {
            println!(
                "  skipped {} row(s) without a name or seat number",
                report.skipped_blank
            );
        }
    }

    if report.has_failures() {
        eprintln!(
            "warning: skipped {} row(s) with malformed marks",
            report.failures.len()
        );
        if !cli.quiet {
            for failure in &report.failures {
                eprintln!(
                    "  row {} ({}): {}",
                    failure.row_number, failure.seat_no, failure.reason
                );
            }
        }
    }
}
