//! Analyze command implementation
//!
//! Synthesizes an analysis from a core-type preset and song metadata and
//! writes it to `<data>/analysis/<slug>.yaml`.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use songbrief_spec::error::StageError;
use songbrief_spec::synth::Confidence;
use songbrief_spec::{synthesize, Language, SynthesisError, SynthesisRequest, TargetLength};
use std::process::ExitCode;

use super::json_output::{error_codes, warning_codes, CommandOutput, JsonError, JsonWarning};
use super::write_text;
use crate::config::{resolve_data_path, Config, ANALYSIS_DIR};

/// Arguments for the analyze command.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    pub title: String,
    pub artist: String,
    pub core_type: String,
    pub target_length: TargetLength,
    /// Overrides the preset's genre tags when non-empty
    pub genre: Vec<String>,
    pub notes: Option<String>,
    pub language: Option<Language>,
}

/// Analysis result details.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResult {
    pub slug: String,
    pub path: String,
    pub core_type: String,
    pub sections: usize,
    pub tempo_bpm: f64,
    pub confidence: Confidence,
}

/// Run the analyze command
///
/// # Returns
/// Exit code: 0 on success, 1 for an unknown core type or missing metadata
pub fn run(config: &Config, args: &AnalyzeArgs, json_output: bool) -> Result<ExitCode> {
    let request = SynthesisRequest {
        title: args.title.clone(),
        artist: args.artist.clone(),
        core_type: args.core_type.clone(),
        target_length: args.target_length,
        genre_tags: (!args.genre.is_empty()).then(|| args.genre.clone()),
        notes: args.notes.clone(),
        language: args.language,
    };

    let outcome = match synthesize(&request) {
        Ok(outcome) => outcome,
        Err(e) => return report_failure(&e, json_output),
    };

    let path = resolve_data_path(config, &[ANALYSIS_DIR, &format!("{}.yaml", outcome.slug)]);
    write_text(&path, &outcome.analysis.to_yaml()?)?;

    let result = AnalyzeResult {
        slug: outcome.slug.clone(),
        path: path.display().to_string(),
        core_type: args.core_type.clone(),
        sections: outcome.analysis.music_structure.sections.len(),
        tempo_bpm: outcome.analysis.music_structure.tempo_bpm,
        confidence: outcome.confidence,
    };

    if json_output {
        let warnings = outcome
            .warnings
            .iter()
            .map(|w| JsonWarning::new(warning_codes::SYNTHESIS_WARNING, w))
            .collect();
        CommandOutput::success(result, warnings).print()?;
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} / {} ({})",
        "Analyzing:".cyan().bold(),
        args.artist,
        args.title,
        args.core_type
    );
    println!(
        "{} {} sections, {} BPM, {}",
        "Structure:".dimmed(),
        result.sections,
        result.tempo_bpm,
        args.target_length
    );
    for warning in &outcome.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    println!(
        "\n{} Analysis written to {}",
        "SUCCESS".green().bold(),
        result.path
    );
    Ok(ExitCode::SUCCESS)
}

fn report_failure(error: &SynthesisError, json_output: bool) -> Result<ExitCode> {
    if json_output {
        let json_error = match error {
            SynthesisError::UnknownCoreType { available, .. } => {
                JsonError::new(error_codes::UNKNOWN_CORE_TYPE, error.to_string())
                    .with_suggestion(format!("use one of: {}", available.join(", ")))
            }
            SynthesisError::MissingField(field) => {
                JsonError::new(error_codes::SYNTHESIS, error.to_string()).with_path(*field)
            }
        };
        CommandOutput::<AnalyzeResult>::failure(vec![json_error], vec![]).print()?;
    } else {
        println!(
            "{} [{}] {}",
            "FAILED".red().bold(),
            error.code(),
            error
        );
    }
    Ok(ExitCode::from(1))
}
