//! Parse command implementation
//!
//! Shows what the markdown parser recovers from a document and the
//! canonical analysis it converts to, without writing anything.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use songbrief_spec::markdown::{
    parse_analysis_markdown, validate_parsed, ParsedAnalysis, ParsedValidation,
};
use songbrief_spec::Analysis;
use std::process::ExitCode;

use super::json_output::{error_codes, warning_codes, CommandOutput, JsonError, JsonWarning};

/// Parse result details.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub parsed: ParsedAnalysis,
    pub validation: ParsedValidation,
    /// Converted analysis, present only when the document is valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

/// Run the parse command
///
/// # Returns
/// Exit code: 0 if the document is valid, 1 otherwise
pub fn run(markdown_path: &str, json_output: bool) -> Result<ExitCode> {
    let markdown = std::fs::read_to_string(markdown_path)
        .with_context(|| format!("Failed to read markdown file: {}", markdown_path))?;

    let result = parse(&markdown);
    let warnings = result.parsed.warnings();

    if json_output {
        let json_warnings: Vec<JsonWarning> = warnings
            .iter()
            .map(|w| JsonWarning::new(warning_codes::MARKDOWN_WARNING, w))
            .collect();
        if result.validation.valid {
            CommandOutput::success(result, json_warnings).print()?;
            return Ok(ExitCode::SUCCESS);
        }
        let errors = result
            .validation
            .errors
            .iter()
            .map(|e| JsonError::new(error_codes::INVALID_MARKDOWN, e).with_file(markdown_path))
            .collect();
        CommandOutput::failure_with(result, errors, json_warnings).print()?;
        return Ok(ExitCode::from(1));
    }

    println!("{} {}", "Parsing:".cyan().bold(), markdown_path);
    let parsed = &result.parsed;
    println!("{} {} / {}", "Song:".dimmed(), parsed.artist, parsed.title);
    println!(
        "{} {}",
        "Sections:".dimmed(),
        parsed.structure.sections.join(" → ")
    );
    if !parsed.arrangement.genre_tags.is_empty() {
        println!("{} {}", "Genre:".dimmed(), parsed.arrangement.genre_tags.join(", "));
    }
    for warning in &warnings {
        println!("  {} {}", "!".yellow(), warning);
    }

    match result.analysis {
        Some(ref analysis) => {
            println!("\n{}", "Converted analysis:".dimmed());
            print!("{}", analysis.to_yaml()?);
            println!("\n{} Document is valid", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            for error in &result.validation.errors {
                println!("  {} {}", "x".red(), error);
            }
            println!(
                "\n{} Document has {} error(s)",
                "FAILED".red().bold(),
                result.validation.errors.len()
            );
            Ok(ExitCode::from(1))
        }
    }
}

/// Parses and, when valid, converts a markdown analysis.
pub fn parse(markdown: &str) -> ParseResult {
    let parsed = parse_analysis_markdown(markdown);
    let validation = validate_parsed(&parsed);
    let analysis = validation.valid.then(|| parsed.to_analysis());

    ParseResult {
        parsed,
        validation,
        analysis,
    }
}
