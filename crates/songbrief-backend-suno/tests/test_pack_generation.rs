//! Integration tests for pack generation from parsed, loaded, and synthesized analyses.
//!
//! These tests drive the generators through the same producers the CLI uses
//! and check the artifacts against the validator.

use pretty_assertions::assert_eq;
use songbrief_backend_suno::{
    extract_sections, generate_compact_style, generate_image_prompt, generate_lyrics,
    generate_note, generate_pack, generate_style, validate_pack, PackOptions, STYLE_CHAR_LIMIT,
};
use songbrief_spec::markdown::parse_analysis_markdown;
use songbrief_spec::synth::{synthesize, SynthesisRequest};
use songbrief_spec::{Analysis, TargetLength};

// =============================================================================
// Helper Functions
// =============================================================================

const FULL_YAML: &str = r#"
source_song:
  title: 夜に駆ける
  artist: YOASOBI
core_type: yoasobi
music_structure:
  target_length: 4min
  tempo_bpm: 130
  key_mode: minor
  energy_curve: build
  sections:
    - Intro
    - Verse1
    - PreChorus
    - Chorus
    - Verse2
    - PreChorus
    - Chorus
    - Instrumental
    - Bridge
    - FinalChorus
    - Outro
chord_progression:
  notation: roman_numerals
  verse:
    feel: 不安定なマイナーループ、期待と違和感を同時に作る
    pattern: i - VI - III - VII
  chorus:
    feel: 上昇する期待感と焦燥
    pattern: VI - VII - i
arrangement:
  genre_tags: [J-Pop, Electronic]
  center: ピアノ
  rhythm: 打ち込みドラム
  bass: シンセベース
  density: { verse: medium, chorus: dense, final: dense }
  dynamics: 軽快なのに切迫感がある
  ear_candy: グリッチ
lyrics_design:
  language: ja
  perspective: 一人称
  scenery: 夜の都会
  emotion_expression: 直接言わない
  word_density: high
  theme: [夜, 焦燥]
  chorus_hook_rule: { repeat_short_phrase: true, avoid_direct_emotion_words: true }
concept_keywords: [夜, 駆ける, 光と影]
"#;

fn full_analysis() -> Analysis {
    Analysis::from_yaml_str(FULL_YAML).expect("fixture should validate")
}

// =============================================================================
// Structured input
// =============================================================================

#[test]
fn test_full_analysis_pack_is_valid() {
    let pack = generate_pack(&full_analysis(), &PackOptions::default());
    let report = validate_pack(&pack.style, &pack.lyrics);
    assert!(report.valid, "{:?}", report.problems());
    assert!(pack.checks.within_limit);
    assert_eq!(pack.title, "夜");
}

#[test]
fn test_explicit_sections_are_kept() {
    let lyrics = generate_lyrics(&full_analysis());
    assert_eq!(
        extract_sections(&lyrics),
        vec![
            "Intro",
            "Verse 1",
            "Pre-Chorus",
            "Chorus",
            "Verse 2",
            "Pre-Chorus",
            "Chorus",
            "Instrumental",
            "Bridge",
            "Final Chorus",
            "Outro",
        ]
    );
    // High word density: six lines per verse, five before the chorus.
    assert!(lyrics.contains("TODO: 歌詞を6行書く"));
    assert!(lyrics.contains("TODO: 歌詞を5行書く"));
}

#[test]
fn test_style_is_english() {
    let style = generate_style(&full_analysis());
    assert!(style.starts_with("Genre:\nJ-Pop, Electronic"));
    assert!(style.contains("Lively yet urgent Japanese song."));
    assert!(style.contains("Upbeat tempo (130 BPM)."));
    assert!(style.contains("Verse: Unstable minor loop creating both anticipation and unease (i - VI - III - VII)."));
    assert!(style.contains("Aim for about 4 minutes."));
    assert!(style.contains("Piano centered."));
    assert!(style.contains("Ear candy: glitch."));
    assert!(style.contains("Rapid-fire delivery in verses."));
    assert!(style.chars().count() <= STYLE_CHAR_LIMIT);
}

#[test]
fn test_image_prompt_is_single_line() {
    let prompt = generate_image_prompt(&full_analysis());
    assert!(!prompt.contains('\n'));
    assert!(prompt.contains("starry night, moonlight"));
    assert!(prompt.contains("light and shadow"));
    assert!(prompt.contains("dynamic composition, ascending perspective"));
}

#[test]
fn test_compact_style_fits() {
    let compact = generate_compact_style(&full_analysis());
    assert!(compact.chars().count() <= 200, "{}", compact);
    assert!(compact.starts_with("J-Pop, Electronic, piano"));
}

#[test]
fn test_generators_are_deterministic() {
    let analysis = full_analysis();
    let first = generate_pack(&analysis, &PackOptions::default());
    let second = generate_pack(&analysis, &PackOptions::default());
    assert_eq!(first, second);
    assert_eq!(
        generate_note(&analysis, "yoasobi_yoru"),
        generate_note(&analysis, "yoasobi_yoru")
    );
}

// =============================================================================
// Other producers
// =============================================================================

#[test]
fn test_markdown_analysis_pack() {
    let markdown = "\
---
title: 群青
artist: YOASOBI
---

## 曲展開
- **Target Length**: ~4:00
- **Tempo**: 95 BPM

1. Intro
2. Aメロ
3. サビ

## アレンジ
- **ジャンル**: J-Pop × Indie

## 歌詞設計
- **言語**: 日本語
";
    let analysis = parse_analysis_markdown(markdown).to_analysis();
    assert_eq!(analysis.music_structure.target_length, TargetLength::FourMinutes);

    let pack = generate_pack(&analysis, &PackOptions::default());
    assert!(validate_pack(&pack.style, &pack.lyrics).valid);
    assert!(pack.style.contains("Moderate tempo (95 BPM)."));
    assert!(pack
        .image_prompt
        .as_deref()
        .unwrap_or("")
        .contains("nostalgic film grain"));
}

#[test]
fn test_synthesized_analysis_pack() {
    let outcome = synthesize(&SynthesisRequest {
        title: "Blue Hour".into(),
        artist: "Someone".into(),
        core_type: "yorushika".into(),
        target_length: TargetLength::FiveMinutes,
        ..Default::default()
    })
    .expect("known core type");

    let pack = generate_pack(&outcome.analysis, &PackOptions::default());
    let report = pack.validate();
    assert!(report.valid, "{:?}", report.problems());
    assert!(pack.lyrics.contains("[Final Chorus]"));
}
