//! `marksheet weights` command - show weight configurations

use crate::cli::{Cli, OutputFormat, WeightsArgs};
use crate::commands::table::render;
use marksheet_core::error::Result;
use marksheet_core::weights::{WeightConfig, WeightRegistry};

/// Execute the weights command
pub fn execute(cli: &Cli, registry: &WeightRegistry, args: &WeightsArgs) -> Result<()> {
    let configs: Vec<&WeightConfig> = match (args.phase, args.review) {
        (Some(phase), Some(review)) => vec![registry.require(phase, review)?],
        _ => registry.iter().collect(),
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&configs)?);
        }
        OutputFormat::Human => {
            for (i, config) in configs.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                output_human(config);
            }
        }
    }

    Ok(())
}

fn output_human(config: &WeightConfig) {
    println!(
        "phase {} review {}: {} (total {})",
        config.phase,
        config.review,
        config.title,
        config.ceiling()
    );

    let header: Vec<String> = ["#", "criterion", "section", "max"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let body: Vec<Vec<String>> = config
        .criteria
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let section = if c.guide_only {
                &config.guide_section_label
            } else {
                &config.committee_section_label
            };
            vec![
                format!("c{}", i + 1),
                c.name.clone(),
                section.clone(),
                c.max_marks.to_string(),
            ]
        })
        .collect();

    print!("{}", render(&header, &body, 3));
}
