//! Save command implementation
//!
//! Stores a markdown analysis under `<data>/analysis/<slug>.md` after a
//! structural check. Structural problems are reported but do not block the
//! save, so a draft can be stored and completed later.

use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;
use serde::Serialize;
use songbrief_spec::markdown::{parse_analysis_markdown, validate_parsed};
use songbrief_spec::KeyMode;
use std::process::ExitCode;
use std::sync::OnceLock;

use super::json_output::{error_codes, warning_codes, CommandOutput, JsonError, JsonWarning};
use super::write_text;
use crate::config::{resolve_data_path, Config, ANALYSIS_DIR};

/// Minimum markdown length, in characters, accepted as an analysis.
pub const MIN_MARKDOWN_CHARS: usize = 100;

static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9_-]+$").expect("invalid regex pattern"))
}

/// Returns true when `slug` is usable as an analysis file name.
pub fn is_valid_slug(slug: &str) -> bool {
    slug_regex().is_match(slug)
}

/// What the parser recovered, for confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedSummary {
    pub title: String,
    pub artist: String,
    pub key: String,
    pub key_mode: KeyMode,
    pub sections_count: usize,
    pub keywords_count: usize,
}

/// Save result details.
#[derive(Debug, Clone, Serialize)]
pub struct SaveResult {
    pub path: String,
    pub summary: ParsedSummary,
    /// Whether title, artist and sections were all found
    pub valid: bool,
    pub next_actions: Vec<String>,
}

/// Run the save command
///
/// # Arguments
/// * `config` - Resolved data directory configuration
/// * `slug` - File name without extension
/// * `markdown_path` - Markdown analysis to store
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 when saved, 1 for a bad slug or content
pub fn run(config: &Config, slug: &str, markdown_path: &str, json_output: bool) -> Result<ExitCode> {
    let markdown = std::fs::read_to_string(markdown_path)
        .with_context(|| format!("Failed to read markdown file: {}", markdown_path))?;

    if let Some(error) = check_input(slug, &markdown) {
        if json_output {
            CommandOutput::<SaveResult>::failure(vec![error], vec![]).print()?;
        } else {
            println!("{} {}", "FAILED".red().bold(), error.message);
        }
        return Ok(ExitCode::from(1));
    }

    let (result, warnings) = save(config, slug, &markdown)?;

    if json_output {
        let warnings = warnings
            .into_iter()
            .map(|w| JsonWarning::new(warning_codes::MARKDOWN_WARNING, w))
            .collect();
        CommandOutput::success(result, warnings).print()?;
        return Ok(ExitCode::SUCCESS);
    }

    let summary = &result.summary;
    println!("{} {}", "Saving:".cyan().bold(), slug);
    println!("{} {} / {}", "Song:".dimmed(), summary.artist, summary.title);
    println!(
        "{} {} ({}), {} sections, {} keywords",
        "Parsed:".dimmed(),
        if summary.key.is_empty() { "-" } else { summary.key.as_str() },
        summary.key_mode.as_str(),
        summary.sections_count,
        summary.keywords_count
    );
    for warning in &warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    println!("\n{} Analysis saved to {}", "SUCCESS".green().bold(), result.path);
    println!("{}", "Next:".dimmed());
    for action in &result.next_actions {
        println!("  {}", action);
    }
    Ok(ExitCode::SUCCESS)
}

/// Rejects a slug or content that cannot be saved.
fn check_input(slug: &str, markdown: &str) -> Option<JsonError> {
    if !is_valid_slug(slug) {
        return Some(
            JsonError::new(
                error_codes::INVALID_SLUG,
                format!(
                    "slug '{}' must be lowercase alphanumeric with underscores or hyphens",
                    slug
                ),
            )
            .with_path("slug"),
        );
    }

    let chars = markdown.chars().count();
    if chars < MIN_MARKDOWN_CHARS {
        return Some(
            JsonError::new(
                error_codes::CONTENT_TOO_SHORT,
                format!(
                    "markdown is {} characters (at least {} required)",
                    chars, MIN_MARKDOWN_CHARS
                ),
            )
            .with_path("markdown"),
        );
    }

    None
}

/// Parses, writes, and summarizes the analysis; returns the warnings too.
fn save(config: &Config, slug: &str, markdown: &str) -> Result<(SaveResult, Vec<String>)> {
    let parsed = parse_analysis_markdown(markdown);
    let validation = validate_parsed(&parsed);

    let mut warnings = validation.errors.clone();
    warnings.extend(parsed.warnings());

    let relative = format!("{}/{}.md", ANALYSIS_DIR, slug);
    let path = resolve_data_path(config, &[ANALYSIS_DIR, &format!("{}.md", slug)]);
    write_text(&path, markdown)?;

    let result = SaveResult {
        path: path.display().to_string(),
        summary: ParsedSummary {
            title: parsed.title.clone(),
            artist: parsed.artist.clone(),
            key: parsed.chord_progression.key.clone(),
            key_mode: parsed.chord_progression.key_mode,
            sections_count: parsed.structure.sections.len(),
            keywords_count: parsed.concept_keywords.len(),
        },
        valid: validation.valid,
        next_actions: vec![
            format!("songbrief generate --analysis {}", relative),
            format!("songbrief note --analysis {}", relative),
        ],
    };
    Ok((result, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKDOWN: &str = "\
---
title: アイドル
artist: YOASOBI
---

## 曲の本質
- 完璧な偶像と、その裏側の孤独を同時に描く

## 曲展開
1. Intro
2. Aメロ
3. サビ

## 概念キーワード
- 偶像, 嘘, 愛
";

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("yoasobi_idol"));
        assert!(is_valid_slug("a-b-1"));
        assert!(!is_valid_slug("Yoasobi"));
        assert!(!is_valid_slug("a b"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("../x"));
    }

    #[test]
    fn test_check_input() {
        let error = check_input("Bad Slug", MARKDOWN).unwrap();
        assert_eq!(error.code, error_codes::INVALID_SLUG);

        let error = check_input("ok", "short").unwrap();
        assert_eq!(error.code, error_codes::CONTENT_TOO_SHORT);

        assert!(check_input("ok", &"あ".repeat(MIN_MARKDOWN_CHARS)).is_none());
    }

    #[test]
    fn test_save_writes_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_sources(tmp.path().to_str(), None, None);
        let (result, warnings) = save(&config, "yoasobi_idol", MARKDOWN).unwrap();
        assert!(result.valid);
        assert_eq!(result.summary.title, "アイドル");
        assert_eq!(result.summary.sections_count, 3);
        // No instrument table and no chord sections.
        assert_eq!(warnings.len(), 2);

        let saved = std::fs::read_to_string(tmp.path().join("analysis/yoasobi_idol.md")).unwrap();
        assert_eq!(saved, MARKDOWN);
    }

    #[test]
    fn test_save_keeps_incomplete_draft() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_sources(tmp.path().to_str(), None, None);
        let draft = format!("## 曲展開\n1. Intro\n{}", "メモ\n".repeat(40));

        let (result, warnings) = save(&config, "draft", &draft).unwrap();
        assert!(!result.valid);
        assert!(warnings.iter().any(|w| w.contains("title")));
        assert!(tmp.path().join("analysis/draft.md").exists());
    }

    #[test]
    fn test_run_rejects_bad_slug() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_sources(tmp.path().to_str(), None, None);
        let md = tmp.path().join("in.md");
        std::fs::write(&md, MARKDOWN.repeat(2)).unwrap();

        let code = run(&config, "Bad/Slug", md.to_str().unwrap(), true).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!tmp.path().join("analysis").exists());
    }
}
