//! `marksheet show` command - one student's evaluations
//!
//! Prints every stored phase/review for the student, or only the requested
//! one, with the per-evaluator breakdown next to the canonical marks.

use serde_json::json;

use crate::cli::{Cli, OutputFormat, ShowArgs};
use crate::commands::table::{mark_cell, render};
use marksheet_core::error::{MarksheetError, Result};
use marksheet_core::model::{CanonicalEvaluation, Student};
use marksheet_core::report::criteria_header;
use marksheet_core::store::Store;
use marksheet_core::weights::CRITERIA_COUNT;

/// Execute the show command
pub fn execute(cli: &Cli, store: &Store, args: &ShowArgs) -> Result<()> {
    let student = store
        .db()
        .get_student(&args.seat_no)?
        .ok_or_else(|| MarksheetError::not_found("student", &args.seat_no))?;

    let mut evaluations = store.db().evaluations_for_student(student.id)?;
    if args.slice.phase.is_some() || args.slice.review.is_some() {
        let (phase, review) = store.resolve_slice(args.slice.phase, args.slice.review);
        evaluations.retain(|e| e.phase == phase && e.review == review);
    }

    match cli.format {
        OutputFormat::Json => {
            let output = json!({
                "student": student,
                "evaluations": evaluations,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => output_human(store, &student, &evaluations),
    }

    Ok(())
}

fn output_human(store: &Store, student: &Student, evaluations: &[CanonicalEvaluation]) {
    println!("{} ({})", student.name, student.seat_no);
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!("  group:   {}", field(&student.group_no));
    println!("  project: {}", field(&student.project_title));
    println!("  guide:   {}", field(&student.project_guide));

    if evaluations.is_empty() {
        println!();
        println!("No evaluations recorded");
        return;
    }

    for evaluation in evaluations {
        println!();
        let config = store.registry().get(evaluation.phase, evaluation.review);
        let labels: Vec<String> = match config {
            Some(config) => {
                println!("{}", config.title);
                criteria_header(config)
            }
            None => {
                println!("phase {} review {}", evaluation.phase, evaluation.review);
                (1..=CRITERIA_COUNT).map(|i| format!("criteria{}", i)).collect()
            }
        };

        let header: Vec<String> = ["criterion", "member1", "member2", "guide", "canonical"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut body: Vec<Vec<String>> = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                vec![
                    label,
                    mark_cell(evaluation.member1.map(|m| m.get(i))),
                    mark_cell(evaluation.member2.map(|m| m.get(i))),
                    mark_cell(evaluation.guide.map(|m| m.get(i))),
                    evaluation.criteria.get(i).to_string(),
                ]
            })
            .collect();
        body.push(vec![
            "total".to_string(),
            mark_cell(evaluation.member1.map(|m| m.total())),
            mark_cell(evaluation.member2.map(|m| m.total())),
            mark_cell(evaluation.guide.map(|m| m.total())),
            evaluation.total_marks.to_string(),
        ]);

        print!("{}", render(&header, &body, 1));
    }
}
