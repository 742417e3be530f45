//! Validation tests.

use super::*;
use crate::analysis::{
    Arrangement, KeyMode, Language, LyricsDesign, MusicStructure, SourceSong, TargetLength,
};
use crate::section::Section;

fn make_valid_analysis() -> Analysis {
    Analysis {
        source_song: SourceSong {
            title: "Night Drive".to_string(),
            artist: Some("Example Band".to_string()),
        },
        core_type: Some("yorushika".to_string()),
        music_structure: MusicStructure {
            target_length: TargetLength::ThreeMinutes,
            tempo_bpm: 120.0,
            key_mode: KeyMode::Minor,
            energy_curve: None,
            sections: vec![Section::Intro, Section::Verse1, Section::Chorus],
        },
        chord_progression: None,
        arrangement: Arrangement {
            genre_tags: vec!["J-Rock".to_string()],
            ..Default::default()
        },
        lyrics_design: LyricsDesign::new(Language::Ja),
        concept_keywords: None,
    }
}

#[test]
fn test_valid_analysis() {
    let result = validate_analysis(&make_valid_analysis());
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
}

#[test]
fn test_empty_title() {
    let mut analysis = make_valid_analysis();
    analysis.source_song.title = "   ".to_string();
    let result = validate_analysis(&analysis);
    assert!(result.errors.iter().any(|e| e.code == ErrorCode::EmptyTitle));
}

#[test]
fn test_tempo_bounds() {
    for (tempo, ok) in [
        (39.9, false),
        (40.0, true),
        (300.0, true),
        (300.5, false),
        (f64::NAN, false),
    ] {
        let mut analysis = make_valid_analysis();
        analysis.music_structure.tempo_bpm = tempo;
        let result = validate_analysis(&analysis);
        assert_eq!(result.is_ok(), ok, "tempo {}", tempo);
    }
}

#[test]
fn test_empty_sections() {
    let mut analysis = make_valid_analysis();
    analysis.music_structure.sections.clear();
    let result = validate_analysis(&analysis);
    assert!(result.errors.iter().any(|e| e.code == ErrorCode::NoSections));
}

#[test]
fn test_genre_tag_count() {
    let mut analysis = make_valid_analysis();
    analysis.arrangement.genre_tags.clear();
    assert!(validate_analysis(&analysis)
        .errors
        .iter()
        .any(|e| e.code == ErrorCode::GenreTagCount));

    analysis.arrangement.genre_tags = (0..5).map(|i| format!("Genre {}", i)).collect();
    assert!(validate_analysis(&analysis)
        .errors
        .iter()
        .any(|e| e.code == ErrorCode::GenreTagCount));
}

#[test]
fn test_blank_genre_tag_reports_index() {
    let mut analysis = make_valid_analysis();
    analysis.arrangement.genre_tags = vec!["Pop".to_string(), " ".to_string()];
    let result = validate_analysis(&analysis);
    let err = result
        .errors
        .iter()
        .find(|e| e.code == ErrorCode::EmptyGenreTag)
        .expect("blank tag error");
    assert_eq!(err.path.as_deref(), Some("arrangement.genre_tags[1]"));
}

#[test]
fn test_collects_all_errors() {
    let mut analysis = make_valid_analysis();
    analysis.source_song.title.clear();
    analysis.music_structure.tempo_bpm = 500.0;
    analysis.music_structure.sections.clear();
    let result = validate_analysis(&analysis);
    assert_eq!(result.errors.len(), 3);
}

#[test]
fn test_warnings() {
    let mut analysis = make_valid_analysis();
    analysis.source_song.artist = None;
    analysis.core_type = Some("nonexistent_style".to_string());
    let result = validate_analysis(&analysis);
    assert!(result.is_ok());
    let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
    assert!(codes.contains(&WarningCode::MissingArtist));
    assert!(codes.contains(&WarningCode::UnknownCoreType));
}
