//! Validate command implementation
//!
//! Re-checks a pack directory's style and lyrics files, including files
//! edited by hand after generation.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use songbrief_backend_suno::pack::{LYRICS_FILE, STYLE_FILE};
use songbrief_backend_suno::{validate_pack, PackValidation};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::{error_codes, CommandOutput, JsonError};
use super::resolve_input_path;
use crate::config::Config;

/// Validation result details.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    pub dir: String,
    /// Artifact files that could not be read
    pub missing_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<PackValidation>,
}

impl ValidateResult {
    fn is_ok(&self) -> bool {
        self.missing_files.is_empty() && self.validation.as_ref().is_some_and(|v| v.valid)
    }
}

/// Run the validate command
///
/// # Arguments
/// * `config` - Resolved data directory configuration
/// * `dir` - Pack directory, or a slug under `<data>/outputs/`
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid or incomplete
pub fn run(config: &Config, dir: &str, json_output: bool) -> Result<ExitCode> {
    let pack_dir = resolve_pack_dir(config, dir);
    let result = check_dir(&pack_dir);

    if json_output {
        run_json(result)
    } else {
        run_human(result)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(result: ValidateResult) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), result.dir);

    for file in &result.missing_files {
        println!("  {} {}: file not found", "x".red(), file);
    }

    if let Some(ref validation) = result.validation {
        let style = &validation.checks.style_length;
        let mark = if style.ok { "✓".green() } else { "x".red() };
        println!(
            "  {} style length: {}/{} chars",
            mark, style.chars, style.limit
        );

        let sections = &validation.checks.lyrics_sections;
        let mark = if sections.ok { "✓".green() } else { "x".red() };
        println!(
            "  {} lyrics sections: {}",
            mark,
            sections.found.join(", ").dimmed()
        );

        let structure = &validation.checks.structure_complete;
        if !structure.ok {
            println!(
                "  {} missing sections: {}",
                "x".red(),
                structure.missing.join(", ")
            );
        }
    }

    if result.is_ok() {
        println!("\n{} Pack is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("\n{} Pack has problems", "FAILED".red().bold());
        Ok(ExitCode::from(1))
    }
}

/// Run validate with machine-readable JSON output
fn run_json(result: ValidateResult) -> Result<ExitCode> {
    if result.is_ok() {
        CommandOutput::success(result, vec![]).print()?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut errors: Vec<JsonError> = result
        .missing_files
        .iter()
        .map(|file| {
            JsonError::new(error_codes::MISSING_ARTIFACT, format!("{} not found", file))
                .with_file(file.as_str())
        })
        .collect();
    if let Some(ref validation) = result.validation {
        errors.extend(
            validation
                .problems()
                .into_iter()
                .map(|p| JsonError::new(error_codes::PACK_INVALID, p)),
        );
    }

    CommandOutput::failure_with(result, errors, vec![]).print()?;
    Ok(ExitCode::from(1))
}

/// A directory argument that does not exist is looked up as a slug.
fn resolve_pack_dir(config: &Config, dir: &str) -> PathBuf {
    let path = resolve_input_path(config, dir);
    if path.is_dir() {
        path
    } else {
        let by_slug = config.output_dir(dir);
        if by_slug.is_dir() {
            by_slug
        } else {
            path
        }
    }
}

/// Reads the style and lyrics files and validates them.
///
/// Missing files are reported by name and no validation is run.
pub fn check_dir(dir: &Path) -> ValidateResult {
    let style = std::fs::read_to_string(dir.join(STYLE_FILE)).ok();
    let lyrics = std::fs::read_to_string(dir.join(LYRICS_FILE)).ok();

    let mut missing_files = Vec::new();
    if style.is_none() {
        missing_files.push(STYLE_FILE.to_string());
    }
    if lyrics.is_none() {
        missing_files.push(LYRICS_FILE.to_string());
    }

    let validation = match (style, lyrics) {
        (Some(style), Some(lyrics)) => Some(validate_pack(&style, &lyrics)),
        _ => None,
    };

    ValidateResult {
        dir: dir.display().to_string(),
        missing_files,
        validation,
    }
}
