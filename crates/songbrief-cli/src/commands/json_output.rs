//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`. In that mode nothing colored is printed;
//! stdout carries exactly one [`CommandOutput`] document so scripts and
//! agents can parse the result.

use anyhow::Result;
use serde::Serialize;

use crate::input::{InputError, LoadWarning};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: CLI_XXX for CLI-level errors, or passes through validation error codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// YAML or JSON parse error
    pub const PARSE: &str = "CLI_002";
    /// Analysis failed schema validation
    pub const INVALID_ANALYSIS: &str = "CLI_003";
    /// Markdown analysis lacks title, artist, or sections
    pub const INVALID_MARKDOWN: &str = "CLI_004";
    /// Core type is not in the pattern library
    pub const UNKNOWN_CORE_TYPE: &str = "CLI_005";
    /// Slug contains characters outside [a-z0-9_-]
    pub const INVALID_SLUG: &str = "CLI_006";
    /// Markdown content is too short to be an analysis
    pub const CONTENT_TOO_SHORT: &str = "CLI_007";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_008";
    /// Artifact file missing from a pack directory
    pub const MISSING_ARTIFACT: &str = "CLI_009";
    /// Generated artifacts failed validation
    pub const PACK_INVALID: &str = "CLI_010";
    /// Synthesis input rejected
    pub const SYNTHESIS: &str = "CLI_011";
}

/// Warning codes for CLI operations.
pub mod warning_codes {
    /// Non-fatal problem found while loading an analysis
    pub const LOAD_WARNING: &str = "CLI_W001";
    /// Generated pack failed a validation check
    pub const PACK_VALIDATION: &str = "CLI_W002";
    /// Markdown analysis has gaps
    pub const MARKDOWN_WARNING: &str = "CLI_W003";
    /// Synthesized analysis needs review
    pub const SYNTHESIS_WARNING: &str = "CLI_W004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Suggestion for fixing the error (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
            suggestion: None,
        }
    }

    /// Sets the field path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "CLI_W001", "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the field path for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Envelope shared by every command's `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Non-fatal warnings
    pub warnings: Vec<JsonWarning>,
    /// Command-specific result; present on success and on reportable failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output with no result.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }

    /// Creates a failed output that still carries a result (e.g. a report).
    pub fn failure_with(result: T, errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: Some(result),
        }
    }

    /// Pretty-prints the output to stdout.
    pub fn print(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Converts an input error to a JSON error.
pub fn input_error_to_json(err: &InputError, file: Option<&str>) -> JsonError {
    let error = match err {
        InputError::FileRead { .. } => JsonError::new(error_codes::FILE_READ, err.to_string()),
        InputError::InvalidMarkdown { .. } => {
            JsonError::new(error_codes::INVALID_MARKDOWN, err.to_string())
                .with_suggestion("add title and artist to the frontmatter and list sections under ## 曲展開")
        }
        InputError::Parse { .. } => JsonError::new(error_codes::PARSE, err.to_string()),
        InputError::InvalidAnalysis { errors } => {
            // Surface the first schema error's field, the rest are in the message.
            let mut error = JsonError::new(error_codes::INVALID_ANALYSIS, err.to_string());
            if let Some(path) = errors.first().and_then(|e| e.path.as_deref()) {
                error = error.with_path(path);
            }
            error
        }
    };

    match file {
        Some(f) => error.with_file(f),
        None => error,
    }
}

/// Converts load warnings to JSON warnings.
pub fn load_warnings_to_json(warnings: &[LoadWarning]) -> Vec<JsonWarning> {
    warnings
        .iter()
        .map(|w| {
            let warning = JsonWarning::new(warning_codes::LOAD_WARNING, &w.message);
            match w.path {
                Some(ref path) => warning.with_path(path),
                None => warning,
            }
        })
        .collect()
}
