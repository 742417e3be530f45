//! End-to-end scenarios: analysis in, validated prompt pack out.
//!
//! Each test follows one analysis through the same entry points the CLI
//! uses and checks the artifacts a Suno session would receive.

use pretty_assertions::assert_eq;
use songbrief_backend_suno::pack_validator::validate_pack;
use songbrief_backend_suno::{
    count_sections, extract_sections, generate_lyrics, generate_pack, generate_style,
    PackOptions, STYLE_CHAR_LIMIT,
};
use songbrief_cli::input::{load_analysis, InputError, SourceKind};
use songbrief_spec::analysis::{Language, TargetLength};
use songbrief_spec::markdown::{parse_analysis_markdown, validate_parsed};
use songbrief_spec::structure::default_sections;
use songbrief_spec::synth::{synthesize, SynthesisError, SynthesisRequest};
use songbrief_spec::Section;
use songbrief_tests::fixtures::{
    full_analysis, minimal_analysis, DataDirFixture, FULL_MARKDOWN, FULL_YAML,
};

// =============================================================================
// Default structure
// =============================================================================

#[test]
fn test_three_minute_default_scenario() {
    let analysis = minimal_analysis(TargetLength::ThreeMinutes, 95.0, vec![], Language::En);

    let lyrics = generate_lyrics(&analysis);
    assert_eq!(count_sections(&lyrics), 13);

    let expected: Vec<&str> = default_sections(TargetLength::ThreeMinutes)
        .iter()
        .map(Section::display_name)
        .collect();
    assert_eq!(extract_sections(&lyrics), expected);
    assert_eq!(
        expected,
        vec![
            "Intro",
            "Verse 1",
            "Pre-Chorus",
            "Chorus",
            "Post-Chorus",
            "Verse 2",
            "Pre-Chorus",
            "Chorus",
            "Instrumental",
            "Bridge",
            "Final Chorus",
            "Final Chorus Repeat",
            "Outro",
        ]
    );

    let style = generate_style(&analysis);
    let tempo_block = style
        .split("\n\n")
        .find(|block| block.starts_with("Tempo:"))
        .expect("tempo block");
    assert!(tempo_block.contains("Moderate"), "{}", tempo_block);
    assert!(tempo_block.contains("95 BPM"));

    assert!(validate_pack(&style, &lyrics).valid);
}

#[test]
fn test_english_lyrics_use_english_guidance() {
    let analysis = minimal_analysis(TargetLength::FourMinutes, 120.0, vec![], Language::En);
    let lyrics = generate_lyrics(&analysis);
    assert!(lyrics.contains("TODO: write"));
    assert!(!lyrics.contains("歌詞を"));
}

// =============================================================================
// Failure surfaces
// =============================================================================

#[test]
fn test_unknown_core_type_lists_alternatives() {
    let err = synthesize(&SynthesisRequest {
        title: "Song".into(),
        artist: "Artist".into(),
        core_type: "nonexistent_style".into(),
        ..Default::default()
    })
    .unwrap_err();

    match &err {
        SynthesisError::UnknownCoreType { name, available } => {
            assert_eq!(name, "nonexistent_style");
            assert!(available.contains(&"yorushika"));
        }
        other => panic!("expected UnknownCoreType, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("nonexistent_style"));
    assert!(message.contains("yorushika"));
}

#[test]
fn test_markdown_missing_title_and_artist() {
    let parsed = parse_analysis_markdown("## 曲展開\n1. Intro\n2. サビ\n");
    let validation = validate_parsed(&parsed);
    assert!(!validation.valid);
    assert_eq!(validation.errors.len(), 2);
    assert_ne!(validation.errors[0], validation.errors[1]);
}

#[test]
fn test_invalid_yaml_is_rejected_on_load() {
    let fixture = DataDirFixture::new();
    let yaml = FULL_YAML.replace("tempo_bpm: 130", "tempo_bpm: 12");
    let path = fixture.add_analysis("bad.yaml", &yaml);

    match load_analysis(&path) {
        Err(InputError::InvalidAnalysis { errors }) => {
            assert!(errors
                .iter()
                .any(|e| e.path.as_deref() == Some("music_structure.tempo_bpm")));
        }
        other => panic!("expected InvalidAnalysis, got {:?}", other.map(|r| r.source_kind)),
    }
}

// =============================================================================
// Pack validation boundaries
// =============================================================================

const COMPLETE_LYRICS: &str = "[Intro]\n[Verse 1]\n[Chorus]\n[Verse 2]\n[Chorus]\n\
    [Instrumental]\n[Bridge]\n[Final Chorus]\n[Outro]";

#[test]
fn test_style_limit_boundary() {
    let at_limit = "a".repeat(STYLE_CHAR_LIMIT);
    let report = validate_pack(&at_limit, COMPLETE_LYRICS);
    assert!(report.valid);
    assert_eq!(report.checks.style_length.chars, 1000);

    let over_limit = "a".repeat(STYLE_CHAR_LIMIT + 1);
    let report = validate_pack(&over_limit, COMPLETE_LYRICS);
    assert!(!report.valid);
    assert!(!report.checks.style_length.ok);
    assert!(report.checks.lyrics_sections.ok);
    assert!(report.checks.structure_complete.ok);
}

#[test]
fn test_style_limit_counts_characters() {
    // 1000 multi-byte characters are within the limit.
    let style = "夜".repeat(STYLE_CHAR_LIMIT);
    assert!(validate_pack(&style, COMPLETE_LYRICS).checks.style_length.ok);
}

#[test]
fn test_lyrics_missing_bridge() {
    let lyrics = COMPLETE_LYRICS.replace("[Bridge]\n", "");
    let report = validate_pack("Genre:\nPop", &lyrics);
    assert!(!report.valid);
    assert!(report.checks.style_length.ok);
    assert!(!report.checks.lyrics_sections.ok);
    assert!(!report.checks.structure_complete.ok);
    assert_eq!(report.checks.structure_complete.missing, vec!["Bridge"]);
}

#[test]
fn test_report_serializes_with_check_names() {
    let report = validate_pack("Genre:\nPop", "[Verse 1]\n[Chorus]");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["checks"]["style_length"]["limit"], 1000);
    assert_eq!(json["checks"]["lyrics_sections"]["found"][1], "Chorus");
    assert!(json["checks"]["structure_complete"]["missing"]
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m == "Final Chorus"));
}

// =============================================================================
// Full flows
// =============================================================================

#[test]
fn test_yaml_and_markdown_sources_generate_valid_packs() {
    let fixture = DataDirFixture::new();
    let yaml = fixture.add_analysis("yoasobi_yoru.yaml", FULL_YAML);
    let markdown = fixture.add_analysis("yoasobi_idol.md", FULL_MARKDOWN);

    let from_yaml = load_analysis(&yaml).unwrap();
    assert_eq!(from_yaml.source_kind, SourceKind::Yaml);
    assert_eq!(from_yaml.analysis, full_analysis());

    let from_markdown = load_analysis(&markdown).unwrap();
    assert_eq!(from_markdown.source_kind, SourceKind::Markdown);
    let analysis = &from_markdown.analysis;
    assert_eq!(analysis.source_song.title, "アイドル");
    assert_eq!(analysis.music_structure.tempo_bpm, 166.0);
    assert_eq!(analysis.music_structure.target_length, TargetLength::FourMinutes);
    assert_eq!(analysis.arrangement.genre_tags, vec!["J-Pop", "Electronic"]);

    for loaded in [&from_yaml, &from_markdown] {
        let pack = generate_pack(&loaded.analysis, &PackOptions::default());
        let report = pack.validate();
        assert!(report.valid, "{:?}", report.problems());
        assert!(pack.image_prompt.is_some());
    }
}

#[test]
fn test_json_source_matches_yaml() {
    let fixture = DataDirFixture::new();
    let json = full_analysis().to_json_pretty().unwrap();
    let path = fixture.add_analysis("yoasobi_yoru.json", &json);

    let loaded = load_analysis(&path).unwrap();
    assert_eq!(loaded.source_kind, SourceKind::Json);
    assert_eq!(loaded.analysis, full_analysis());
}

#[test]
fn test_synthesized_pack_for_every_length() {
    for length in [
        TargetLength::ThreeMinutes,
        TargetLength::FourMinutes,
        TargetLength::FiveMinutes,
    ] {
        let outcome = synthesize(&SynthesisRequest {
            title: "Blue Hour".into(),
            artist: "Someone".into(),
            core_type: "yorushika".into(),
            target_length: length,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(outcome.slug, "someone_blue_hour");

        let pack = generate_pack(&outcome.analysis, &PackOptions::default());
        assert!(pack.validate().valid, "{}: {:?}", length, pack.validate().problems());
        assert!(pack.style.contains(&format!("Aim for about {} minutes.", length.minutes())));
    }
}
