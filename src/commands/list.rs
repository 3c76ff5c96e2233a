//! `marksheet list` command - canonical marks for one phase/review
//!
//! Rows are ordered by group number, then student name. `--by group` and
//! `--by guide` split the listing into blocks.

use std::collections::BTreeMap;

use serde_json::json;

use crate::cli::{Cli, GroupBy, ListArgs, OutputFormat};
use crate::commands::table::{mark_cell, render};
use marksheet_core::error::Result;
use marksheet_core::report::{
    criteria_header, evaluation_rows, group_by_group, group_by_guide, EvaluationRow,
};
use marksheet_core::store::Store;
use marksheet_core::weights::WeightConfig;

/// Execute the list command
pub fn execute(cli: &Cli, store: &Store, args: &ListArgs) -> Result<()> {
    let (phase, review) = store.resolve_slice(args.slice.phase, args.slice.review);
    let config = store.weight_config(phase, review)?;
    let rows = evaluation_rows(store.db(), phase, review)?;

    let grouped = args.by.map(|by| match by {
        GroupBy::Group => group_by_group(&rows),
        GroupBy::Guide => group_by_guide(&rows),
    });

    match cli.format {
        OutputFormat::Json => output_json(config, &rows, grouped.as_ref()),
        OutputFormat::Human => {
            output_human(cli, config, &rows, grouped.as_ref());
            Ok(())
        }
    }
}

fn output_json(
    config: &WeightConfig,
    rows: &[EvaluationRow],
    grouped: Option<&BTreeMap<String, Vec<&EvaluationRow>>>,
) -> Result<()> {
    let mut output = json!({
        "phase": config.phase,
        "review": config.review,
        "title": config.title,
        "criteria": config.criterion_names(),
        "count": rows.len(),
    });
    match grouped {
        Some(groups) => output["groups"] = json!(groups),
        None => output["rows"] = json!(rows),
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_human(
    cli: &Cli,
    config: &WeightConfig,
    rows: &[EvaluationRow],
    grouped: Option<&BTreeMap<String, Vec<&EvaluationRow>>>,
) {
    if rows.is_empty() {
        if !cli.quiet {
            println!(
                "No evaluations for phase {} review {}",
                config.phase, config.review
            );
        }
        return;
    }

    if !cli.quiet {
        println!("{} (out of {})", config.title, config.ceiling());
        for (i, label) in criteria_header(config).iter().enumerate() {
            println!("  c{} = {}", i + 1, label);
        }
        println!();
    }

    match grouped {
        Some(groups) => {
            for (key, members) in groups {
                println!("== {} ==", key);
                print!("{}", table(members.iter().copied()));
                println!();
            }
        }
        None => print!("{}", table(rows.iter())),
    }
}

fn table<'a>(rows: impl Iterator<Item = &'a EvaluationRow>) -> String {
    let header: Vec<String> = ["seat_no", "name", "group", "c1", "c2", "c3", "c4", "total"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let body: Vec<Vec<String>> = rows
        .map(|row| {
            let mut cells = vec![
                row.student.seat_no.clone(),
                row.student.name.clone(),
                row.student.group_no.clone().unwrap_or_default(),
            ];
            cells.extend(
                row.evaluation
                    .criteria
                    .as_array()
                    .iter()
                    .map(|m| mark_cell(Some(*m))),
            );
            cells.push(row.evaluation.total_marks.to_string());
            cells
        })
        .collect();

    render(&header, &body, 3)
}
