//! End-to-end command workflows against a temporary data directory.

use songbrief_backend_suno::pack::{IMAGE_PROMPT_FILE, LYRICS_FILE, MANIFEST_FILE, STYLE_FILE};
use songbrief_cli::commands::{analyze, generate, note, save, validate};
use songbrief_cli::config::Config;
use songbrief_spec::TargetLength;
use std::path::Path;
use std::process::ExitCode;

// =============================================================================
// Helper Functions
// =============================================================================

const MARKDOWN: &str = "\
---
title: アイドル
artist: YOASOBI
core_type: yoasobi
---

## 曲の本質
- 完璧な偶像と、その裏側の孤独を同時に描く

## 曲展開
- **Target Length**: ~4:00
- **Tempo**: 166 BPM

1. Intro
2. Verse 1
3. Pre-Chorus
4. Chorus
5. Verse 2
6. Pre-Chorus
7. Chorus
8. Instrumental
9. Bridge
10. Final Chorus
11. Outro

## アレンジ
- **ジャンル**: J-Pop × Electronic

## 歌詞設計
- **言語**: 日本語
- **主題**: 偶像、嘘

## 概念キーワード
- 偶像, 嘘, 愛
";

fn temp_config() -> (tempfile::TempDir, Config) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::from_sources(tmp.path().to_str(), None, None);
    (tmp, config)
}

fn generate_args(analysis: &str) -> generate::GenerateArgs {
    generate::GenerateArgs {
        analysis: analysis.to_string(),
        out_dir: None,
        no_image: false,
        compact: false,
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

// =============================================================================
// Workflows
// =============================================================================

#[test]
fn test_analyze_generate_validate_note() {
    let (tmp, config) = temp_config();

    let args = analyze::AnalyzeArgs {
        title: "Blue Hour".into(),
        artist: "Someone".into(),
        core_type: "yorushika".into(),
        target_length: TargetLength::FiveMinutes,
        notes: Some("夏の終わり".into()),
        ..Default::default()
    };
    assert_eq!(analyze::run(&config, &args, true).unwrap(), ExitCode::SUCCESS);
    assert!(tmp.path().join("analysis/someone_blue_hour.yaml").exists());

    let code = generate::run(&config, &generate_args("analysis/someone_blue_hour.yaml"), true).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let out = tmp.path().join("outputs/someone_blue_hour");
    for file in [STYLE_FILE, LYRICS_FILE, IMAGE_PROMPT_FILE, MANIFEST_FILE] {
        assert!(out.join(file).exists(), "{} missing", file);
    }
    assert!(read(&out.join(STYLE_FILE)).chars().count() <= 1000);

    assert_eq!(validate::run(&config, "someone_blue_hour", true).unwrap(), ExitCode::SUCCESS);

    assert_eq!(
        note::run(&config, "analysis/someone_blue_hour.yaml", true).unwrap(),
        ExitCode::SUCCESS
    );
    assert!(read(&tmp.path().join("notes/someone_blue_hour.md")).contains("slug: someone_blue_hour"));
}

#[test]
fn test_save_then_generate_from_markdown() {
    let (tmp, config) = temp_config();
    let source = tmp.path().join("draft.md");
    std::fs::write(&source, MARKDOWN).unwrap();

    let code = save::run(&config, "yoasobi_idol", source.to_str().unwrap(), true).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(read(&tmp.path().join("analysis/yoasobi_idol.md")), MARKDOWN);

    let code = generate::run(&config, &generate_args("analysis/yoasobi_idol.md"), false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let out = tmp.path().join("outputs/yoasobi_idol");
    let style = read(&out.join(STYLE_FILE));
    assert!(style.starts_with("Genre:\nJ-Pop, Electronic"));
    assert!(style.contains("166 BPM"));

    let manifest: serde_json::Value = serde_json::from_str(&read(&out.join(MANIFEST_FILE))).unwrap();
    assert_eq!(manifest["slug"], "yoasobi_idol");
    assert_eq!(manifest["validation"]["valid"], true);
}

#[test]
fn test_hand_edit_breaks_validation() {
    let (tmp, config) = temp_config();
    let source = tmp.path().join("draft.md");
    std::fs::write(&source, MARKDOWN).unwrap();
    save::run(&config, "yoasobi_idol", source.to_str().unwrap(), true).unwrap();
    generate::run(&config, &generate_args("analysis/yoasobi_idol.md"), true).unwrap();

    let lyrics_path = tmp.path().join("outputs/yoasobi_idol").join(LYRICS_FILE);
    let edited = read(&lyrics_path).replace("[Bridge]", "[Interlude]");
    std::fs::write(&lyrics_path, edited).unwrap();

    assert_eq!(validate::run(&config, "yoasobi_idol", true).unwrap(), ExitCode::from(1));
}

#[test]
fn test_unknown_core_type_writes_nothing() {
    let (tmp, config) = temp_config();
    let args = analyze::AnalyzeArgs {
        title: "x".into(),
        artist: "y".into(),
        core_type: "not_a_preset".into(),
        ..Default::default()
    };

    assert_eq!(analyze::run(&config, &args, false).unwrap(), ExitCode::from(1));
    assert!(std::fs::read_dir(tmp.path()).unwrap().next().is_none());
}
