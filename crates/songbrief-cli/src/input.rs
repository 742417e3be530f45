//! Input abstraction for loading analyses from markdown, YAML, or JSON.
//!
//! This module provides a unified interface for loading SongBrief analyses
//! from the supported source formats. It dispatches by file extension (and,
//! for unrecognized extensions, by a leading frontmatter fence) and returns
//! a consistent result type with source provenance information.

use serde::{Deserialize, Serialize};
use songbrief_spec::markdown::{parse_analysis_markdown, validate_parsed};
use songbrief_spec::{validate_analysis, Analysis, SpecError, ValidationError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recognized markdown extensions.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Recognized JSON extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Recognized YAML extensions.
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Identifies the source format of an analysis file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Semi-structured markdown analysis with frontmatter.
    Markdown,
    /// Structured YAML analysis.
    Yaml,
    /// Structured JSON analysis.
    Json,
}

impl SourceKind {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Markdown => "markdown",
            SourceKind::Yaml => "yaml",
            SourceKind::Json => "json",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A non-fatal problem noticed while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,
    /// Field path, when the warning is tied to one.
    pub path: Option<String>,
}

impl LoadWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }
}

/// Result of loading an analysis from any supported format.
#[derive(Debug)]
pub struct LoadResult {
    /// The validated analysis.
    pub analysis: Analysis,
    /// Source format.
    pub source_kind: SourceKind,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
    /// Schema warnings and, for markdown, gaps in the document.
    pub warnings: Vec<LoadWarning>,
}

/// Errors that can occur during analysis loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Markdown document lacks a required field.
    InvalidMarkdown { errors: Vec<String> },

    /// YAML or JSON syntax or shape error.
    Parse { kind: SourceKind, message: String },

    /// The analysis parsed but failed schema validation.
    InvalidAnalysis { errors: Vec<ValidationError> },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::InvalidMarkdown { errors } => {
                write!(f, "invalid markdown analysis: {}", errors.join("; "))
            }
            InputError::Parse { kind, message } => {
                write!(f, "{} parse error: {}", kind.as_str().to_uppercase(), message)
            }
            InputError::InvalidAnalysis { errors } => {
                let joined = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "invalid analysis: {}", joined)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load an analysis from a file path, dispatching by extension.
///
/// # Arguments
/// * `path` - Path to the analysis file (.md, .yaml, .yml or .json)
///
/// # Returns
/// * `Ok(LoadResult)` - Successfully loaded and validated analysis
/// * `Err(InputError)` - File read, parse, or validation error
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use songbrief_cli::input::load_analysis;
///
/// let result = load_analysis(Path::new("data/analysis/yoasobi_idol.md")).unwrap();
/// println!("Loaded {} analysis", result.source_kind.as_str());
/// ```
pub fn load_analysis(path: &Path) -> Result<LoadResult, InputError> {
    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let kind = detect_source_kind(path, &content);
    debug!(path = %path.display(), kind = kind.as_str(), "loading analysis");

    load_analysis_str(&content, kind)
}

/// Load an analysis from already-read content of a known format.
pub fn load_analysis_str(content: &str, kind: SourceKind) -> Result<LoadResult, InputError> {
    // Compute source hash
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let (analysis, mut warnings) = match kind {
        SourceKind::Markdown => load_markdown(content)?,
        SourceKind::Yaml => (
            Analysis::from_yaml_str(content).map_err(|e| spec_error(kind, e))?,
            Vec::new(),
        ),
        SourceKind::Json => (
            Analysis::from_json_str(content).map_err(|e| spec_error(kind, e))?,
            Vec::new(),
        ),
    };

    // Parsing already rejected errors; keep the schema warnings.
    warnings.extend(
        validate_analysis(&analysis)
            .warnings
            .into_iter()
            .map(|w| LoadWarning {
                message: w.message,
                path: w.path,
            }),
    );

    Ok(LoadResult {
        analysis,
        source_kind: kind,
        source_hash,
        warnings,
    })
}

/// Picks the loader for a file.
///
/// Known extensions win. Anything else is read as markdown when it opens
/// with a frontmatter fence and as YAML otherwise.
pub fn detect_source_kind(path: &Path, content: &str) -> SourceKind {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some(ext) if MARKDOWN_EXTENSIONS.contains(&ext) => SourceKind::Markdown,
        Some(ext) if JSON_EXTENSIONS.contains(&ext) => SourceKind::Json,
        Some(ext) if YAML_EXTENSIONS.contains(&ext) => SourceKind::Yaml,
        _ if content.trim_start().starts_with("---") => SourceKind::Markdown,
        _ => SourceKind::Yaml,
    }
}

fn load_markdown(content: &str) -> Result<(Analysis, Vec<LoadWarning>), InputError> {
    let parsed = parse_analysis_markdown(content);

    let validation = validate_parsed(&parsed);
    if !validation.valid {
        return Err(InputError::InvalidMarkdown {
            errors: validation.errors,
        });
    }

    let analysis = parsed.to_analysis();
    let result = validate_analysis(&analysis);
    if !result.is_ok() {
        return Err(InputError::InvalidAnalysis {
            errors: result.errors,
        });
    }

    let warnings = parsed.warnings().into_iter().map(LoadWarning::new).collect();
    Ok((analysis, warnings))
}

fn spec_error(kind: SourceKind, error: SpecError) -> InputError {
    match error {
        SpecError::Invalid { errors } => InputError::InvalidAnalysis { errors },
        other => InputError::Parse {
            kind,
            message: other.to_string(),
        },
    }
}
