//! Validation of generated style and lyrics artifacts.
//!
//! Works on the text alone, so it can check files edited by hand after
//! generation as well as fresh output.

use serde::{Deserialize, Serialize};

use crate::lyrics::{extract_sections, missing_required_sections, REQUIRED_SECTIONS};
use crate::style::{is_style_within_limit, style_char_count, STYLE_CHAR_LIMIT};

/// Outcome of validating a style prompt and lyrics sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackValidation {
    /// True when every check passed.
    pub valid: bool,
    pub checks: PackValidationChecks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackValidationChecks {
    pub style_length: StyleLengthCheck,
    pub lyrics_sections: LyricsSectionsCheck,
    pub structure_complete: StructureCompleteCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleLengthCheck {
    pub ok: bool,
    pub chars: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsSectionsCheck {
    pub ok: bool,
    /// Marker texts in document order.
    pub found: Vec<String>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureCompleteCheck {
    pub ok: bool,
    /// Required sections no marker contains.
    pub missing: Vec<String>,
}

impl PackValidation {
    /// Human-readable problems, one per failed check.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let style = &self.checks.style_length;
        if !style.ok {
            problems.push(format!(
                "style is {} characters (limit {})",
                style.chars, style.limit
            ));
        }
        let structure = &self.checks.structure_complete;
        if !structure.ok {
            problems.push(format!(
                "lyrics are missing sections: {}",
                structure.missing.join(", ")
            ));
        }
        problems
    }
}

/// Checks the style length limit.
pub fn validate_style_length(style: &str) -> StyleLengthCheck {
    StyleLengthCheck {
        ok: is_style_within_limit(style, STYLE_CHAR_LIMIT),
        chars: style_char_count(style),
        limit: STYLE_CHAR_LIMIT,
    }
}

/// Checks that every required section appears in some marker.
pub fn validate_lyrics_sections(lyrics: &str) -> LyricsSectionsCheck {
    LyricsSectionsCheck {
        ok: missing_required_sections(lyrics).is_empty(),
        found: extract_sections(lyrics),
        required: REQUIRED_SECTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Reports which required sections are missing.
pub fn validate_structure_complete(lyrics: &str) -> StructureCompleteCheck {
    let missing = missing_required_sections(lyrics);
    StructureCompleteCheck {
        ok: missing.is_empty(),
        missing,
    }
}

/// Validates a style prompt and lyrics sheet.
///
/// # Example
/// ```
/// use songbrief_backend_suno::pack_validator::validate_pack;
///
/// let report = validate_pack("Genre:\nPop", "[Verse 1]\n[Chorus]");
/// assert!(!report.valid);
/// assert!(report.checks.style_length.ok);
/// assert!(report.checks.structure_complete.missing.contains(&"Bridge".to_string()));
/// ```
pub fn validate_pack(style: &str, lyrics: &str) -> PackValidation {
    let style_length = validate_style_length(style);
    let lyrics_sections = validate_lyrics_sections(lyrics);
    let structure_complete = validate_structure_complete(lyrics);

    PackValidation {
        valid: style_length.ok && lyrics_sections.ok && structure_complete.ok,
        checks: PackValidationChecks {
            style_length,
            lyrics_sections,
            structure_complete,
        },
    }
}
