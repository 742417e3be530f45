//! Analysis schema validation.

#[cfg(test)]
mod tests;

use crate::analysis::{Analysis, MAX_GENRE_TAGS, MAX_TEMPO_BPM, MIN_TEMPO_BPM};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::patterns;

/// Validates an analysis and returns a validation result.
///
/// Every violated constraint is collected; validation never stops at the
/// first problem.
///
/// # Arguments
/// * `analysis` - The analysis to validate
///
/// # Returns
/// * `ValidationResult` with `ok=true` if validation passed, with any warnings.
/// * `ValidationResult` with `ok=false` and errors if validation failed.
pub fn validate_analysis(analysis: &Analysis) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_source_song(analysis, &mut result);
    validate_core_type(analysis, &mut result);
    validate_music_structure(analysis, &mut result);
    validate_genre_tags(analysis, &mut result);

    result
}

fn validate_source_song(analysis: &Analysis, result: &mut ValidationResult) {
    if analysis.source_song.title.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyTitle,
            "source song title must not be empty",
            "source_song.title",
        ));
    }

    let has_artist = analysis
        .source_song
        .artist
        .as_deref()
        .is_some_and(|artist| !artist.trim().is_empty());
    if !has_artist {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingArtist,
            "source song has no artist",
            "source_song.artist",
        ));
    }
}

fn validate_core_type(analysis: &Analysis, result: &mut ValidationResult) {
    if let Some(ref core_type) = analysis.core_type {
        if patterns::lookup(core_type).is_none() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnknownCoreType,
                format!(
                    "unknown core_type '{}', defaults will come from '{}'",
                    core_type,
                    patterns::DEFAULT_PATTERN
                ),
                "core_type",
            ));
        }
    }
}

fn validate_music_structure(analysis: &Analysis, result: &mut ValidationResult) {
    let tempo = analysis.music_structure.tempo_bpm;
    if !tempo.is_finite() || !(MIN_TEMPO_BPM..=MAX_TEMPO_BPM).contains(&tempo) {
        result.add_error(ValidationError::with_path(
            ErrorCode::TempoOutOfRange,
            format!(
                "tempo {} is outside {}..={} BPM",
                tempo, MIN_TEMPO_BPM, MAX_TEMPO_BPM
            ),
            "music_structure.tempo_bpm",
        ));
    }

    if analysis.music_structure.sections.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoSections,
            "at least one section is required",
            "music_structure.sections",
        ));
    }
}

fn validate_genre_tags(analysis: &Analysis, result: &mut ValidationResult) {
    let tags = &analysis.arrangement.genre_tags;
    if tags.is_empty() || tags.len() > MAX_GENRE_TAGS {
        result.add_error(ValidationError::with_path(
            ErrorCode::GenreTagCount,
            format!(
                "expected 1 to {} genre tags, found {}",
                MAX_GENRE_TAGS,
                tags.len()
            ),
            "arrangement.genre_tags",
        ));
    }

    for (i, tag) in tags.iter().enumerate() {
        if tag.trim().is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyGenreTag,
                "genre tag must not be blank",
                format!("arrangement.genre_tags[{}]", i),
            ));
        }
    }
}
