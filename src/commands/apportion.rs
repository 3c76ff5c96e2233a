//! `marksheet apportion` command - show how a total splits across criteria

use serde_json::json;

use crate::cli::{ApportionArgs, Cli, OutputFormat};
use crate::commands::table::render;
use marksheet_core::apportion::scale;
use marksheet_core::bail_invalid;
use marksheet_core::error::Result;
use marksheet_core::reconcile::disaggregate;
use marksheet_core::store::config::StoreConfig;
use marksheet_core::weights::WeightRegistry;

/// Execute the apportion command
pub fn execute(
    cli: &Cli,
    registry: &WeightRegistry,
    defaults: &StoreConfig,
    args: &ApportionArgs,
) -> Result<()> {
    let phase = args.slice.phase.unwrap_or(defaults.default_phase);
    let review = args.slice.review.unwrap_or(defaults.default_review);
    let config = registry.require(phase, review)?;

    if args.total > config.ceiling() {
        bail_invalid!(
            "total",
            format!("{} exceeds the ceiling of {}", args.total, config.ceiling())
        );
    }

    let quotas = scale(&config.weights(), args.total);
    let marks = disaggregate(args.total, config)?;

    match cli.format {
        OutputFormat::Json => {
            let criteria: Vec<_> = config
                .criteria
                .iter()
                .zip(&quotas)
                .enumerate()
                .map(|(i, (criterion, (_, quota)))| {
                    json!({
                        "name": criterion.name,
                        "max_marks": criterion.max_marks,
                        "quota": quota,
                        "marks": marks.get(i),
                    })
                })
                .collect();
            let output = json!({
                "phase": phase,
                "review": review,
                "total": args.total,
                "criteria": criteria,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{} -> {}", args.total, config.title);
            let header: Vec<String> = ["criterion", "max", "quota", "marks"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let mut body: Vec<Vec<String>> = config
                .criteria
                .iter()
                .zip(&quotas)
                .enumerate()
                .map(|(i, (criterion, (_, quota)))| {
                    vec![
                        criterion.name.clone(),
                        criterion.max_marks.to_string(),
                        format!("{:.2}", quota),
                        marks.get(i).to_string(),
                    ]
                })
                .collect();
            body.push(vec![
                "total".to_string(),
                config.ceiling().to_string(),
                format!("{:.2}", f64::from(args.total)),
                marks.total().to_string(),
            ]);
            print!("{}", render(&header, &body, 1));
        }
    }

    Ok(())
}
