//! Property-based tests for section resolution, style limits, lyrics
//! structure and term translation.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p songbrief-tests --test proptest_properties
//!
//! # More cases
//! PROPTEST_CASES=1000 cargo test -p songbrief-tests --test proptest_properties
//! ```

use proptest::prelude::*;
use songbrief_backend_suno::lyrics::{extract_sections, REQUIRED_SECTIONS};
use songbrief_backend_suno::style::TRUNCATION_MARKER;
use songbrief_backend_suno::{
    generate_lyrics, generate_style, truncate_at_boundary, validate_pack, STYLE_CHAR_LIMIT,
};
use songbrief_spec::analysis::{Language, TargetLength};
use songbrief_spec::structure::{default_sections, mandatory_sections, MIN_EXPLICIT_SECTIONS};
use songbrief_spec::translate::translate;
use songbrief_spec::{resolve_sections, Section};
use songbrief_tests::fixtures::minimal_analysis;

// ============================================================================
// Strategies
// ============================================================================

fn section_strategy() -> impl Strategy<Value = Section> {
    prop::sample::select(Section::all().to_vec())
}

fn length_strategy() -> impl Strategy<Value = TargetLength> {
    prop_oneof![
        Just(TargetLength::ThreeMinutes),
        Just(TargetLength::FourMinutes),
        Just(TargetLength::FiveMinutes),
    ]
}

fn language_strategy() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::Ja), Just(Language::En), Just(Language::Mixed)]
}

fn short_sections_strategy() -> impl Strategy<Value = Vec<Section>> {
    prop::collection::vec(section_strategy(), 0..MIN_EXPLICIT_SECTIONS)
}

const INSTRUMENTS: &[&str] = &[
    "marimba",
    "celesta",
    "theremin",
    "harpsichord",
    "vibraphone",
    "accordion",
    "bandoneon",
    "dulcimer",
];

fn instrument_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(INSTRUMENTS.to_vec())
}

/// Terms with known translations, connectives, and plain English words.
const TRANSLATION_TOKENS: &[&str] = &[
    "ピアノ",
    "シンセ",
    "シンセベース",
    "ドラム",
    "打ち込み",
    "サビ",
    "生",
    "の",
    "、",
    "（",
    "）",
    "+",
    "猫",
    "Indie",
    "Pop",
    "lo-fi",
];

fn translation_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(TRANSLATION_TOKENS.to_vec()), prop::bool::ANY),
        1..12,
    )
    .prop_map(|tokens| {
        tokens
            .into_iter()
            .map(|(token, spaced)| {
                if spaced {
                    format!("{} ", token)
                } else {
                    token.to_string()
                }
            })
            .collect::<String>()
    })
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '→' | '、' | '。')
}

// ============================================================================
// Section resolution
// ============================================================================

proptest! {
    /// Fewer than eight sections always yields the canonical template.
    #[test]
    fn short_sections_use_template(
        sections in short_sections_strategy(),
        length in length_strategy(),
    ) {
        prop_assert_eq!(resolve_sections(&sections, length), default_sections(length).to_vec());
    }

    /// Long lists that already hold every mandatory section are not touched.
    #[test]
    fn complete_sections_are_unchanged(
        mut sections in prop::collection::vec(section_strategy(), MIN_EXPLICIT_SECTIONS..16),
        length in length_strategy(),
    ) {
        sections.extend_from_slice(mandatory_sections(length));
        prop_assert_eq!(resolve_sections(&sections, length), sections);
    }

    /// Long lists keep their order and gain every mandatory section.
    #[test]
    fn long_sections_gain_mandatory_only(
        sections in prop::collection::vec(section_strategy(), MIN_EXPLICIT_SECTIONS..16),
        length in length_strategy(),
    ) {
        let resolved = resolve_sections(&sections, length);

        for mandatory in mandatory_sections(length) {
            prop_assert!(resolved.contains(mandatory), "missing {:?}", mandatory);
        }

        // The input survives as a subsequence.
        let mut remaining = resolved.iter();
        for section in &sections {
            prop_assert!(remaining.any(|s| s == section));
        }
        prop_assert!(resolved.len() <= sections.len() + mandatory_sections(length).len());
    }
}

// ============================================================================
// Style limit
// ============================================================================

proptest! {
    /// Truncation fits the limit and cuts only at word boundaries.
    #[test]
    fn truncation_respects_boundaries(
        text in "[a-z]{1,12}( [a-z]{1,12}){0,120}",
        limit in 20usize..400,
    ) {
        let out = truncate_at_boundary(&text, limit);
        prop_assert!(out.chars().count() <= limit);

        if text.chars().count() <= limit {
            prop_assert_eq!(out, text);
        } else {
            let head = out.strip_suffix(TRUNCATION_MARKER).expect("marker appended");
            prop_assert!(!head.is_empty());
            prop_assert!(text.starts_with(head));
            let next = text[head.len()..].chars().next();
            prop_assert!(next.is_some_and(is_boundary), "cut mid-word: {:?}", out);
        }
    }

    /// Oversized arrangements are cut to the limit after a whole instrument name.
    #[test]
    fn style_never_exceeds_limit(
        instruments in prop::collection::vec(instrument_strategy(), 0..200),
        sections in prop::collection::vec(section_strategy(), 0..20),
        length in length_strategy(),
        tempo in 40.0f64..300.0,
    ) {
        let mut analysis = minimal_analysis(length, tempo.round(), sections, Language::En);
        analysis.arrangement.instruments =
            Some(instruments.iter().map(|i| i.to_string()).collect());

        let style = generate_style(&analysis);
        prop_assert!(style.chars().count() <= STYLE_CHAR_LIMIT);

        // 120 instruments take more than the limit on their own.
        if instruments.len() >= 120 {
            let head = style.strip_suffix(TRUNCATION_MARKER).expect("style truncated");
            let last_word = head.rsplit(is_boundary).next().unwrap_or("");
            prop_assert!(
                INSTRUMENTS.iter().any(|i| *i == last_word),
                "partial word {:?}",
                last_word
            );
        }
    }
}

// ============================================================================
// Lyrics structure
// ============================================================================

proptest! {
    /// Template-path lyrics always carry every required marker.
    #[test]
    fn default_path_lyrics_validate(
        sections in short_sections_strategy(),
        length in length_strategy(),
        language in language_strategy(),
    ) {
        let analysis = minimal_analysis(length, 120.0, sections, language);
        let lyrics = generate_lyrics(&analysis);

        let found = extract_sections(&lyrics);
        for required in REQUIRED_SECTIONS {
            prop_assert!(found.iter().any(|m| m.contains(*required)), "missing {}", required);
        }
        prop_assert_eq!(found.len(), default_sections(length).len());
        prop_assert!(validate_pack(&generate_style(&analysis), &lyrics).valid);
    }
}

// ============================================================================
// Translation
// ============================================================================

proptest! {
    /// Translating translated text changes nothing.
    #[test]
    fn translate_is_idempotent(text in translation_text_strategy()) {
        let once = translate(&text);
        prop_assert_eq!(translate(&once), once);
    }

    /// Text without Japanese passes through untouched.
    #[test]
    fn translate_keeps_ascii(text in "[A-Za-z0-9 ,+-]{0,40}") {
        prop_assert_eq!(translate(&text), text);
    }
}
