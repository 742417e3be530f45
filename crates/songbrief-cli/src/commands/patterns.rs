//! Patterns command implementation
//!
//! Lists the core-type presets available to `analyze`.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use songbrief_spec::patterns::{self, TempoRange};
use std::process::ExitCode;

use super::json_output::CommandOutput;

/// One preset in the listing.
#[derive(Debug, Clone, Serialize)]
pub struct PatternSummary {
    pub name: &'static str,
    pub description: &'static str,
    pub tempo: TempoRange,
    pub genre_tags: &'static [&'static str],
    pub sections: usize,
}

/// Summaries of every registered preset, in registry order.
pub fn summaries() -> Vec<PatternSummary> {
    patterns::all()
        .iter()
        .map(|p| PatternSummary {
            name: p.name,
            description: p.description,
            tempo: p.tempo,
            genre_tags: p.arrangement.genre_tags,
            sections: p.default_sections.len(),
        })
        .collect()
}

/// Run the patterns command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let summaries = summaries();

    if json_output {
        CommandOutput::success(summaries, vec![]).print()?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Core types:".cyan().bold());
    for summary in &summaries {
        println!(
            "  {} {} {}",
            format!("{:<10}", summary.name).bold(),
            summary.description,
            format!(
                "({}-{} BPM, {})",
                summary.tempo.min,
                summary.tempo.max,
                summary.genre_tags.join(", ")
            )
            .dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}
