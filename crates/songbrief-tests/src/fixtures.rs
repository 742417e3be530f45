//! Test fixture utilities for analyses and data directories.

use std::fs;
use std::path::{Path, PathBuf};

use songbrief_cli::config::{Config, ANALYSIS_DIR};
use songbrief_spec::analysis::{
    Arrangement, KeyMode, Language, LyricsDesign, MusicStructure, SourceSong, TargetLength,
};
use songbrief_spec::{Analysis, Section};
use tempfile::TempDir;

/// A fully populated Japanese analysis with eleven explicit sections.
pub const FULL_YAML: &str = r#"
source_song:
  title: 夜に駆ける
  artist: YOASOBI
core_type: yoasobi
music_structure:
  target_length: 4min
  tempo_bpm: 130
  key_mode: minor
  energy_curve: build
  sections: [Intro, Verse1, PreChorus, Chorus, Verse2, PreChorus, Chorus, Instrumental, Bridge, FinalChorus, Outro]
chord_progression:
  verse: { feel: 不安定なマイナーループ, pattern: i - VI - III - VII }
  chorus: { feel: 上昇する期待感と焦燥, pattern: VI - VII - i }
arrangement:
  genre_tags: [J-Pop, Electronic]
  mood: [焦燥, 疾走感]
  center: ピアノ
  instruments: [ピアノ, シンセ, 打ち込みドラム]
  density: { verse: medium, chorus: dense, final: dense }
  dynamics: 軽快なのに切迫感がある
lyrics_design:
  language: ja
  perspective: 一人称
  scenery: 夜の都会
  word_density: high
  theme: [夜, 焦燥]
  chorus_hook_rule: { repeat_short_phrase: true }
  vocal_style: { gender: female, character: [クリア], techniques: [早口] }
concept_keywords: [夜, 駆ける, 光と影]
"#;

/// A markdown analysis with frontmatter and every parsed section.
pub const FULL_MARKDOWN: &str = "\
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

## コード進行
- **Key**: C# minor

### Verse
- **Feel**: 緊張感のあるマイナー
- **Pattern**: i - VII - VI - V

## アレンジ
- **ジャンル**: J-Pop × Electronic

| パート | 楽器 | 役割 |
|--------|------|------|
| Lead | シンセ | メインフレーズ |
| Rhythm | ドラム | 四つ打ち |

## 歌詞設計
- **言語**: 日本語
- **主題**: 偶像、嘘

## 概念キーワード
- 偶像, 嘘, 愛
";

/// Builds a minimal valid analysis.
///
/// # Arguments
/// * `length` - Target song length
/// * `tempo_bpm` - Tempo in BPM
/// * `sections` - Explicit sections (may be empty)
/// * `language` - Lyrics language
pub fn minimal_analysis(
    length: TargetLength,
    tempo_bpm: f64,
    sections: Vec<Section>,
    language: Language,
) -> Analysis {
    Analysis {
        source_song: SourceSong {
            title: "Night Drive".to_string(),
            artist: Some("Example Band".to_string()),
        },
        core_type: None,
        music_structure: MusicStructure {
            target_length: length,
            tempo_bpm,
            key_mode: KeyMode::Major,
            energy_curve: None,
            sections,
        },
        chord_progression: None,
        arrangement: Arrangement {
            genre_tags: vec!["Indie Pop".to_string()],
            ..Default::default()
        },
        lyrics_design: LyricsDesign::new(language),
        concept_keywords: None,
    }
}

/// Parses [`FULL_YAML`].
pub fn full_analysis() -> Analysis {
    Analysis::from_yaml_str(FULL_YAML).expect("FULL_YAML should validate")
}

/// A temporary data directory with the standard layout.
pub struct DataDirFixture {
    pub root: TempDir,
    pub config: Config,
}

impl DataDirFixture {
    /// Create a new empty data directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let config = Config::from_sources(root.path().to_str(), None, None);
        Self { root, config }
    }

    /// Get the data directory path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write an analysis file under `analysis/` and return its path.
    ///
    /// # Arguments
    /// * `file_name` - File name including extension
    /// * `content` - File contents
    pub fn add_analysis(&self, file_name: &str, content: &str) -> PathBuf {
        let dir = self.root.path().join(ANALYSIS_DIR);
        fs::create_dir_all(&dir).expect("Failed to create analysis dir");
        let path = dir.join(file_name);
        fs::write(&path, content).expect("Failed to write analysis file");
        path
    }

    /// Read a file relative to the data directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.path().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }
}

impl Default for DataDirFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use songbrief_spec::markdown::{parse_analysis_markdown, validate_parsed};
    use songbrief_spec::validate_analysis;

    #[test]
    fn test_fixtures_are_valid() {
        assert!(full_analysis().music_structure.sections.len() >= 8);

        let minimal = minimal_analysis(TargetLength::ThreeMinutes, 95.0, vec![], Language::En);
        assert!(validate_analysis(&minimal).is_ok());

        let parsed = parse_analysis_markdown(FULL_MARKDOWN);
        assert!(validate_parsed(&parsed).valid);
        assert_eq!(parsed.structure.sections.len(), 11);
    }

    #[test]
    fn test_data_dir_fixture() {
        let fixture = DataDirFixture::new();
        let path = fixture.add_analysis("a.yaml", FULL_YAML);
        assert!(path.starts_with(fixture.path()));
        assert_eq!(fixture.read("analysis/a.yaml"), FULL_YAML);
    }
}
