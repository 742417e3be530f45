//! Blog article draft generation.
//!
//! Renders an analysis as a markdown article for a Japanese blogging
//! platform: frontmatter, then structure, arrangement, chords, lyrics
//! design and keywords. Optional analysis fields simply drop their lines.

use songbrief_spec::analysis::{Analysis, Language, Notation};

/// Lines shown by default when previewing a note.
pub const DEFAULT_PREVIEW_LINES: usize = 20;

const FOOTER: &str = "*この記事はAI分析ツールを使用して作成されました。*";

/// Generates the markdown article draft.
///
/// # Arguments
/// * `analysis` - The analysis to describe
/// * `slug` - Identifier written into the frontmatter
pub fn generate_note(analysis: &Analysis, slug: &str) -> String {
    let song = &analysis.source_song;
    let structure = &analysis.music_structure;
    let arrangement = &analysis.arrangement;
    let lyrics = &analysis.lyrics_design;
    let mut lines: Vec<String> = Vec::new();

    let mut tags = vec!["AI音楽", "Suno", "作曲"];
    if let Some(core_type) = &analysis.core_type {
        tags.push(core_type.as_str());
    }
    lines.push("---".into());
    lines.push(format!(
        "title: \"「{}」風の曲を作る\"",
        song.title.replace('"', "\\\"")
    ));
    lines.push(format!("slug: {}", slug));
    lines.push(format!("tags: [{}]", tags.join(", ")));
    lines.push("---".into());
    lines.push(String::new());

    lines.push(format!("# 「{}」風の曲を作る", song.title));
    lines.push(String::new());
    match &song.artist {
        Some(artist) => lines.push(format!("{}の「{}」を参考に、", artist, song.title)),
        None => lines.push(format!("「{}」を参考に、", song.title)),
    }
    match &analysis.core_type {
        Some(core_type) => lines.push(format!("{}スタイルで曲を作成してみました。", core_type)),
        None => lines.push("曲を作成してみました。".into()),
    }
    lines.push(String::new());

    lines.push("## 構成".into());
    lines.push(String::new());
    lines.push(format!("- **曲の長さ**: {}", structure.target_length));
    lines.push(format!("- **テンポ**: {} BPM", structure.tempo_bpm));
    lines.push(format!("- **キー**: {}", structure.key_mode.as_str()));
    if let Some(energy) = structure.energy_curve {
        lines.push(format!("- **エネルギーカーブ**: {}", energy.as_str()));
    }
    lines.push(String::new());
    lines.push("### セクション構成".into());
    lines.push(String::new());
    lines.push("```".into());
    lines.push(
        structure
            .sections
            .iter()
            .map(|s| s.display_name())
            .collect::<Vec<_>>()
            .join(" → "),
    );
    lines.push("```".into());
    lines.push(String::new());

    lines.push("## アレンジ".into());
    lines.push(String::new());
    lines.push(format!("- **ジャンル**: {}", arrangement.genre_tags.join(", ")));
    for (label, value) in [
        ("中心楽器", &arrangement.center),
        ("リズム", &arrangement.rhythm),
        ("ベース", &arrangement.bass),
        ("ダイナミクス", &arrangement.dynamics),
        ("質感", &arrangement.texture),
    ] {
        if let Some(value) = value {
            lines.push(format!("- **{}**: {}", label, value));
        }
    }
    if let Some(instruments) = arrangement.instruments.as_ref().filter(|i| !i.is_empty()) {
        lines.push(format!("- **楽器**: {}", instruments.join(", ")));
    }
    lines.push(String::new());

    if let Some(density) = arrangement.density.filter(|d| !d.is_empty()) {
        lines.push("### 音の密度".into());
        lines.push(String::new());
        for (label, value) in [
            ("Verse", density.verse),
            ("Chorus", density.chorus),
            ("Final", density.r#final),
        ] {
            if let Some(value) = value {
                lines.push(format!("- {}: {}", label, value.as_str()));
            }
        }
        lines.push(String::new());
    }

    if let Some(chords) = &analysis.chord_progression {
        let patterns: Vec<(&str, &str)> = chords
            .labeled_sections()
            .into_iter()
            .filter_map(|(label, section)| section.pattern.as_deref().map(|p| (label, p)))
            .collect();
        if !patterns.is_empty() {
            lines.push("## コード進行".into());
            lines.push(String::new());
            lines.push(
                match chords.notation {
                    Notation::RomanNumerals => "（Roman numerals表記の推定値）",
                    Notation::ChordNames => "（コードネーム表記）",
                }
                .into(),
            );
            lines.push(String::new());
            for (label, pattern) in patterns {
                lines.push(format!("- **{}**: {}", label, pattern));
            }
            lines.push(String::new());
        }
    }

    lines.push("## 歌詞デザイン".into());
    lines.push(String::new());
    lines.push(format!("- **言語**: {}", language_label(lyrics.language)));
    for (label, value) in [
        ("視点", &lyrics.perspective),
        ("情景描写", &lyrics.scenery),
        ("感情表現", &lyrics.emotion_expression),
    ] {
        if let Some(value) = value {
            lines.push(format!("- **{}**: {}", label, value));
        }
    }
    if let Some(density) = lyrics.word_density {
        lines.push(format!("- **言語密度**: {}", density.as_str()));
    }
    lines.push(String::new());

    if !lyrics.themes().is_empty() {
        lines.push("### テーマ".into());
        lines.push(String::new());
        lines.extend(lyrics.themes().iter().map(|t| format!("- {}", t)));
        lines.push(String::new());
    }

    if !analysis.keywords().is_empty() {
        lines.push("## コンセプトキーワード".into());
        lines.push(String::new());
        lines.push(
            analysis
                .keywords()
                .iter()
                .map(|k| format!("`{}`", k))
                .collect::<Vec<_>>()
                .join(" "),
        );
        lines.push(String::new());
    }

    lines.push("---".into());
    lines.push(String::new());
    lines.push(FOOTER.into());
    lines.push(String::new());

    lines.join("\n")
}

/// First `max_lines` lines of a note.
pub fn note_preview(note: &str, max_lines: usize) -> String {
    note.lines().take(max_lines).collect::<Vec<_>>().join("\n")
}

fn language_label(language: Language) -> &'static str {
    match language {
        Language::Ja => "日本語",
        Language::En => "英語",
        Language::Mixed => "日英ミックス",
    }
}
