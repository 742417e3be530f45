//! Generate command implementation
//!
//! Loads an analysis and writes the Suno pack (title, style, lyrics, image
//! prompt) plus a `pack.json` manifest to `<data>/outputs/<slug>/`.

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use songbrief_backend_suno::pack::MANIFEST_FILE;
use songbrief_backend_suno::{generate_pack, PackChecks, PackOptions, PackValidation, SunoPack};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use super::json_output::{
    error_codes, input_error_to_json, load_warnings_to_json, warning_codes, CommandOutput,
    JsonError, JsonWarning,
};
use super::{print_load_warnings, resolve_input_path, write_text};
use crate::config::{extract_slug, Config};
use crate::input::{load_analysis, LoadResult, SourceKind};

/// Arguments for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the analysis file (.md, .yaml, .json)
    pub analysis: String,
    /// Output directory override
    pub out_dir: Option<String>,
    /// Skip the image prompt
    pub no_image: bool,
    /// Emit the compact single-line style
    pub compact: bool,
}

/// Generation result details.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    pub slug: String,
    pub title: String,
    pub output_dir: String,
    pub source_kind: SourceKind,
    pub source_hash: String,
    /// Files written, manifest last
    pub files: Vec<String>,
    pub checks: PackChecks,
    pub validation: PackValidation,
}

/// Run the generate command
///
/// # Arguments
/// * `config` - Resolved data directory configuration
/// * `args` - Command arguments
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 when the pack was written, 1 on load or write failure
pub fn run(config: &Config, args: &GenerateArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config, args)
    } else {
        run_human(config, args)
    }
}

/// Run generate with human-readable (colored) output
fn run_human(config: &Config, args: &GenerateArgs) -> Result<ExitCode> {
    println!("{} {}", "Generating:".cyan().bold(), args.analysis);

    let analysis_path = resolve_input_path(config, &args.analysis);
    let loaded = load_analysis(&analysis_path)
        .with_context(|| format!("Failed to load analysis file: {}", args.analysis))?;

    print_load_warnings(&loaded.warnings);
    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        loaded.source_kind.as_str(),
        &loaded.source_hash[..16]
    );

    let (pack, result) = write_pack(config, args, &analysis_path, &loaded)?;

    println!("{} {}", "Output:".dimmed(), result.output_dir);
    for file in &result.files {
        println!("  {} {}", "+".green(), file);
    }

    let limit = if args.compact {
        songbrief_backend_suno::COMPACT_STYLE_CHAR_LIMIT
    } else {
        songbrief_backend_suno::STYLE_CHAR_LIMIT
    };
    let style_status = if pack.checks.within_limit {
        "ok".green()
    } else {
        "over limit".yellow()
    };
    println!(
        "{} {}/{} chars ({})",
        "Style:".dimmed(),
        pack.checks.style_chars,
        limit,
        style_status
    );

    for problem in result.validation.problems() {
        println!("  {} [pack]: {}", "!".yellow(), problem);
    }

    println!(
        "\n{} Pack \"{}\" written to {}",
        "SUCCESS".green().bold(),
        pack.title,
        result.output_dir
    );
    Ok(ExitCode::SUCCESS)
}

/// Run generate with machine-readable JSON output
fn run_json(config: &Config, args: &GenerateArgs) -> Result<ExitCode> {
    let analysis_path = resolve_input_path(config, &args.analysis);

    let loaded = match load_analysis(&analysis_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = input_error_to_json(&e, Some(&args.analysis));
            CommandOutput::<GenerateResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    let mut warnings = load_warnings_to_json(&loaded.warnings);

    let result = match write_pack(config, args, &analysis_path, &loaded) {
        Ok((_, result)) => result,
        Err(e) => {
            let error = JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e));
            CommandOutput::<GenerateResult>::failure(vec![error], warnings).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    warnings.extend(
        result
            .validation
            .problems()
            .into_iter()
            .map(|p| JsonWarning::new(warning_codes::PACK_VALIDATION, p)),
    );

    CommandOutput::success(result, warnings).print()?;
    Ok(ExitCode::SUCCESS)
}

/// Generates the pack and writes every artifact plus the manifest.
fn write_pack(
    config: &Config,
    args: &GenerateArgs,
    analysis_path: &Path,
    loaded: &LoadResult,
) -> Result<(SunoPack, GenerateResult)> {
    let slug = extract_slug(analysis_path);
    let output_dir = match args.out_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => config.output_dir(&slug),
    };

    let options = PackOptions {
        include_image_prompt: !args.no_image,
        compact_style: args.compact,
    };
    let pack = generate_pack(&loaded.analysis, &options);

    let mut files = Vec::new();
    for (name, contents) in pack.files() {
        write_text(&output_dir.join(name), contents)?;
        files.push(name.to_string());
    }

    let manifest = pack.manifest(&slug, Some(&loaded.source_hash), Utc::now());
    write_text(&output_dir.join(MANIFEST_FILE), &manifest.to_json()?)?;
    files.push(MANIFEST_FILE.to_string());

    info!(slug = %slug, dir = %output_dir.display(), "pack written");

    let result = GenerateResult {
        slug,
        title: pack.title.clone(),
        output_dir: output_dir.display().to_string(),
        source_kind: loaded.source_kind,
        source_hash: loaded.source_hash.clone(),
        files,
        checks: pack.checks,
        validation: manifest.validation,
    };
    Ok((pack, result))
}
