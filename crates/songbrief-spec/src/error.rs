//! Error types for analysis validation and synthesis.

use thiserror::Error;

/// Error codes for analysis schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Source song title is empty
    EmptyTitle,
    /// E002: Tempo outside the accepted range
    TempoOutOfRange,
    /// E003: No sections declared
    NoSections,
    /// E004: Genre tag count outside 1..=4
    GenreTagCount,
    /// E005: Genre tag is blank
    EmptyGenreTag,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::EmptyTitle => "E001",
            ErrorCode::TempoOutOfRange => "E002",
            ErrorCode::NoSections => "E003",
            ErrorCode::GenreTagCount => "E004",
            ErrorCode::EmptyGenreTag => "E005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for analysis schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: core_type is not a registered pattern
    UnknownCoreType,
    /// W002: Source song has no artist
    MissingArtist,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::UnknownCoreType => "W001",
            WarningCode::MissingArtist => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "arrangement.genre_tags\[1\]").
    pub path: Option<String>,
}

impl ValidationError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub code: WarningCode,
    pub message: String,
    pub path: Option<String>,
}

impl ValidationWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for analysis parsing.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Schema validation failed; every violated constraint is listed.
    #[error("analysis validation failed: {}", join_errors(.errors))]
    Invalid { errors: Vec<ValidationError> },

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of analysis validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for errors raised by generation stages.
///
/// Gives the CLI a stable code and category for every failure it reports,
/// without songbrief-spec depending on the backend crates.
pub trait StageError: std::error::Error {
    /// Stable code like "SYNTH_001" or "PACK_001".
    fn code(&self) -> &'static str;

    fn message(&self) -> String {
        self.to_string()
    }

    /// Category such as "synthesis" or "pack".
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::EmptyTitle.code(), "E001");
        assert_eq!(ErrorCode::EmptyGenreTag.code(), "E005");
        assert_eq!(WarningCode::MissingArtist.code(), "W002");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::with_path(
            ErrorCode::TempoOutOfRange,
            "tempo 20 is outside 40..=300",
            "music_structure.tempo_bpm",
        );
        assert_eq!(
            err.to_string(),
            "E002: tempo 20 is outside 40..=300 (at music_structure.tempo_bpm)"
        );
    }

    #[test]
    fn test_invalid_lists_every_error() {
        let err = SpecError::Invalid {
            errors: vec![
                ValidationError::new(ErrorCode::EmptyTitle, "title is empty"),
                ValidationError::new(ErrorCode::NoSections, "no sections"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("E001: title is empty"));
        assert!(msg.contains("E003: no sections"));
    }

    #[test]
    fn test_validation_result_into_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());
        result.add_error(ValidationError::new(ErrorCode::GenreTagCount, "too many"));
        assert!(!result.is_ok());
        assert_eq!(result.into_result().unwrap_err().len(), 1);
    }
}
