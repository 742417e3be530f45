//! Core-type synthesis: builds an analysis from a preset plus user notes.
//!
//! No reference audio or lyrics are read. Every value comes from the
//! preset's abstracted defaults and the caller's metadata, so chord
//! progressions are functional estimates rather than transcriptions.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::analysis::{
    Analysis, Arrangement, ChordProgression, ChordSection, ChorusHookRule, Density, DensityPlan,
    Language, LyricsDesign, MusicStructure, Notation, SourceSong, TargetLength, VocalStyle,
};
use crate::error::StageError;
use crate::patterns::{self, ChordPattern, CoreTypePattern};
use crate::section::Section;

/// Maximum slug length in characters.
pub const MAX_SLUG_CHARS: usize = 50;

/// Maximum number of concept keywords in a synthesized analysis.
pub const MAX_KEYWORDS: usize = 10;

/// Maximum number of keywords borrowed from the notes.
const MAX_NOTE_KEYWORDS: usize = 3;

/// Sections dropped when the notes ask for a short song.
const OPTIONAL_SECTIONS: &[Section] = &[
    Section::PostChorus,
    Section::Instrumental,
    Section::FinalChorusRepeat,
];

/// Errors from [`synthesize`].
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("unknown core_type '{name}' (available: {})", .available.join(", "))]
    UnknownCoreType {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("{0} is required")]
    MissingField(&'static str),
}

impl StageError for SynthesisError {
    fn code(&self) -> &'static str {
        match self {
            SynthesisError::UnknownCoreType { .. } => "SYNTH_001",
            SynthesisError::MissingField(_) => "SYNTH_002",
        }
    }

    fn category(&self) -> &'static str {
        "synthesis"
    }
}

/// Caller metadata for synthesis.
#[derive(Debug, Clone, Default)]
pub struct SynthesisRequest {
    pub title: String,
    pub artist: String,
    pub core_type: String,
    pub target_length: TargetLength,
    /// Overrides the preset's genre tags when set and non-empty.
    pub genre_tags: Option<Vec<String>>,
    /// Free-form notes ("slow ballad", "短い", keywords).
    pub notes: Option<String>,
    /// Lyrics language, Japanese when unset.
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// How much each part of a synthesized analysis can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Confidence {
    pub structure: ConfidenceLevel,
    pub arrangement: ConfidenceLevel,
    pub chords_functional: ConfidenceLevel,
    pub lyrics_design: ConfidenceLevel,
}

#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    pub analysis: Analysis,
    pub slug: String,
    pub confidence: Confidence,
    pub warnings: Vec<String>,
}

/// Builds a slug from artist and title.
///
/// Lowercases, collapses every run of characters other than ASCII
/// alphanumerics, kana and kanji into `_`, trims underscores and caps the
/// result at 50 characters.
///
/// # Example
/// ```
/// use songbrief_spec::synth::generate_slug;
///
/// assert_eq!(generate_slug("YOASOBI", "Idol!"), "yoasobi_idol");
/// ```
pub fn generate_slug(artist: &str, title: &str) -> String {
    let combined = format!("{}_{}", artist, title).to_lowercase();

    let mut slug = String::with_capacity(combined.len());
    let mut pending_separator = false;
    for c in combined.chars() {
        if is_slug_char(c) {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    let truncated: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    truncated.trim_end_matches('_').to_string()
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}')
}

fn notes_lower(request: &SynthesisRequest) -> String {
    request.notes.as_deref().unwrap_or("").to_lowercase()
}

fn estimate_tempo(pattern: &CoreTypePattern, notes: &str) -> f64 {
    if ["slow", "ゆっくり", "バラード"].iter().any(|w| notes.contains(w)) {
        pattern.tempo.min
    } else if ["fast", "速い", "アップテンポ"].iter().any(|w| notes.contains(w)) {
        pattern.tempo.max
    } else {
        pattern.tempo.typical
    }
}

fn adjust_sections(pattern: &CoreTypePattern, notes: &str) -> Vec<Section> {
    let short = ["short", "短い", "シンプル"].iter().any(|w| notes.contains(w));
    pattern
        .default_sections
        .iter()
        .copied()
        .filter(|s| !(short && OPTIONAL_SECTIONS.contains(s)))
        .collect()
}

/// Preset keywords plus up to three 2-6 character words from the notes,
/// de-duplicated in first-seen order.
fn keywords(pattern: &CoreTypePattern, notes: Option<&str>) -> Vec<String> {
    let note_words = notes
        .unwrap_or("")
        .split(|c: char| c == '、' || c == ',' || c.is_whitespace())
        .filter(|w| (2..=6).contains(&w.chars().count()))
        .take(MAX_NOTE_KEYWORDS);

    let mut keywords: Vec<String> = Vec::new();
    let mut push = |word: &str| {
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    };
    pattern.typical_keywords.iter().for_each(|word| push(word));
    note_words.for_each(&mut push);
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

fn chord_section(pattern: &ChordPattern) -> Option<ChordSection> {
    Some(ChordSection {
        feel: Some(pattern.feel.to_string()),
        pattern: Some(pattern.pattern.to_string()),
    })
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Synthesizes an analysis from a registered core type.
///
/// # Errors
/// * [`SynthesisError::UnknownCoreType`] when `core_type` is not registered;
///   there is no fallback to the default preset here.
/// * [`SynthesisError::MissingField`] when title or artist is blank.
pub fn synthesize(request: &SynthesisRequest) -> Result<SynthesisOutcome, SynthesisError> {
    let pattern =
        patterns::lookup(&request.core_type).ok_or_else(|| SynthesisError::UnknownCoreType {
            name: request.core_type.clone(),
            available: patterns::list(),
        })?;
    if request.title.trim().is_empty() {
        return Err(SynthesisError::MissingField("title"));
    }
    if request.artist.trim().is_empty() {
        return Err(SynthesisError::MissingField("artist"));
    }

    let notes = notes_lower(request);
    let has_notes = !notes.trim().is_empty();
    debug!(core_type = pattern.name, has_notes, "synthesizing analysis");

    let genre_tags = request
        .genre_tags
        .clone()
        .filter(|tags| !tags.is_empty())
        .unwrap_or_else(|| to_strings(pattern.arrangement.genre_tags));

    let defaults = &pattern.arrangement;
    let lyrics = &pattern.lyrics;

    let analysis = Analysis {
        source_song: SourceSong {
            title: request.title.clone(),
            artist: Some(request.artist.clone()),
        },
        core_type: Some(pattern.name.to_string()),
        music_structure: MusicStructure {
            target_length: request.target_length,
            tempo_bpm: estimate_tempo(pattern, &notes),
            key_mode: pattern.key_mode,
            energy_curve: Some(pattern.energy_curve),
            sections: adjust_sections(pattern, &notes),
        },
        chord_progression: Some(ChordProgression {
            notation: Notation::RomanNumerals,
            verse: chord_section(&pattern.chords.verse),
            prechorus: chord_section(&pattern.chords.prechorus),
            chorus: chord_section(&pattern.chords.chorus),
            bridge: chord_section(&pattern.chords.bridge),
        }),
        arrangement: Arrangement {
            genre_tags,
            mood: Some(to_strings(defaults.mood)),
            center: Some(defaults.center.to_string()),
            instruments: Some(to_strings(defaults.instruments)),
            rhythm: Some(defaults.rhythm.to_string()),
            bass: Some(defaults.bass.to_string()),
            density: Some(DensityPlan {
                verse: Some(Density::from_label(defaults.density.verse)),
                chorus: Some(Density::from_label(defaults.density.chorus)),
                r#final: Some(Density::from_label(defaults.density.r#final)),
            }),
            dynamics: Some(defaults.dynamics.to_string()),
            ear_candy: Some(defaults.ear_candy.to_string()),
            texture: Some(defaults.texture.to_string()),
        },
        lyrics_design: LyricsDesign {
            language: request.language.unwrap_or(Language::Ja),
            perspective: Some(lyrics.perspective.to_string()),
            scenery: Some(lyrics.scenery.to_string()),
            emotion_expression: Some(lyrics.emotion_expression.to_string()),
            word_density: Some(lyrics.word_density),
            theme: Some(
                pattern
                    .typical_themes
                    .iter()
                    .take(3)
                    .map(|s| s.to_string())
                    .collect(),
            ),
            chorus_hook_rule: Some(ChorusHookRule {
                repeat_short_phrase: Some(lyrics.has_hook_rule("repeat_short_phrase")),
                avoid_direct_emotion_words: Some(
                    lyrics.has_hook_rule("avoid_direct_emotion_words"),
                ),
            }),
            vocal_style: Some(VocalStyle {
                gender: Some(lyrics.vocal_gender.to_string()),
                range: Some(lyrics.vocal_range.to_string()),
                character: Some(to_strings(lyrics.vocal_character)),
                techniques: None,
            }),
        },
        concept_keywords: Some(keywords(pattern, request.notes.as_deref())),
    };

    let mut warnings = vec![
        "chord progressions are functional estimates from the preset, not transcriptions"
            .to_string(),
    ];
    if !has_notes {
        warnings.push("no notes given; lyrics design uses preset defaults only".to_string());
    }

    Ok(SynthesisOutcome {
        slug: generate_slug(&request.artist, &request.title),
        confidence: Confidence {
            structure: ConfidenceLevel::High,
            arrangement: ConfidenceLevel::Medium,
            chords_functional: ConfidenceLevel::Medium,
            lyrics_design: if has_notes {
                ConfidenceLevel::High
            } else {
                ConfidenceLevel::Medium
            },
        },
        warnings,
        analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_analysis;

    fn request(core_type: &str) -> SynthesisRequest {
        SynthesisRequest {
            title: "Idol".to_string(),
            artist: "YOASOBI".to_string(),
            core_type: core_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_core_type_fails_fast() {
        let err = synthesize(&request("nonexistent_style")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nonexistent_style"), "{}", msg);
        assert!(msg.contains("yorushika"), "{}", msg);
        assert!(msg.contains("byoushin"), "{}", msg);
        assert_eq!(err.code(), "SYNTH_001");
    }

    #[test]
    fn test_missing_artist() {
        let mut req = request("yoasobi");
        req.artist = " ".to_string();
        assert!(matches!(
            synthesize(&req),
            Err(SynthesisError::MissingField("artist"))
        ));
    }

    #[test]
    fn test_synthesized_analysis_is_valid() {
        for name in patterns::list() {
            let outcome = synthesize(&request(name)).expect("synthesize");
            let result = validate_analysis(&outcome.analysis);
            assert!(result.is_ok(), "{}: {:?}", name, result.errors);
        }
    }

    #[test]
    fn test_tempo_from_notes() {
        let mut req = request("yoasobi");
        assert_eq!(synthesize(&req).unwrap().analysis.music_structure.tempo_bpm, 150.0);
        req.notes = Some("Slow ballad".to_string());
        assert_eq!(synthesize(&req).unwrap().analysis.music_structure.tempo_bpm, 120.0);
        req.notes = Some("アップテンポで".to_string());
        assert_eq!(synthesize(&req).unwrap().analysis.music_structure.tempo_bpm, 180.0);
    }

    #[test]
    fn test_short_notes_drop_optional_sections() {
        let mut req = request("illit");
        req.notes = Some("short and simple".to_string());
        let sections = synthesize(&req).unwrap().analysis.music_structure.sections;
        assert!(!sections.contains(&Section::PostChorus));
        assert!(!sections.contains(&Section::FinalChorusRepeat));
        assert!(sections.contains(&Section::Bridge));
    }

    #[test]
    fn test_keywords_from_notes() {
        let mut req = request("illit");
        req.notes = Some("heart, neon glow x summer".to_string());
        let outcome = synthesize(&req).unwrap();
        let keywords = outcome.analysis.concept_keywords.unwrap();
        // "heart" is already a preset keyword; "x" is too short.
        assert_eq!(
            keywords,
            vec!["heart", "dream", "shine", "cute", "butterfly", "neon", "glow"]
        );
        assert_eq!(outcome.confidence.lyrics_design, ConfidenceLevel::High);
    }

    #[test]
    fn test_genre_override() {
        let mut req = request("gurenka");
        assert_eq!(
            synthesize(&req).unwrap().analysis.arrangement.genre_tags,
            vec!["Anime Rock", "J-Rock"]
        );
        req.genre_tags = Some(vec!["Metal".to_string()]);
        assert_eq!(
            synthesize(&req).unwrap().analysis.arrangement.genre_tags,
            vec!["Metal"]
        );
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("YOASOBI", "夜に駆ける"), "yoasobi_夜に駆ける");
        assert_eq!(generate_slug("  The Band ", "Song -- Title!"), "the_band_song_title");
        assert_eq!(generate_slug(&"a".repeat(60), "b").chars().count(), 50);
    }
}
