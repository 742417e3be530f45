//! Keyword detection for enum-valued fields.

use crate::analysis::{KeyMode, Language};

/// Minor when the key text says so (minor, マイナー, 短調), otherwise major.
pub fn key_mode(text: &str) -> KeyMode {
    let lower = text.to_lowercase();
    if lower.contains("minor") || text.contains("マイナー") || text.contains("短調") {
        KeyMode::Minor
    } else {
        KeyMode::Major
    }
}

/// Lyrics language from a free-form label; Japanese unless stated otherwise.
pub fn language(text: &str) -> Language {
    let lower = text.to_lowercase();
    if lower.contains("mixed") || text.contains("ミックス") || text.contains("混在") {
        Language::Mixed
    } else if lower.contains("english") || text.contains("英語") || lower.trim() == "en" {
        Language::En
    } else {
        Language::Ja
    }
}

/// Splits a genre field like "J-Pop × Electronic, Rock" into tags.
///
/// A latin `x` only separates when it stands alone between spaces, so
/// names such as "Experimental" survive intact.
pub fn genre_tags(text: &str) -> Vec<String> {
    text.replace(" x ", "×")
        .replace(" X ", "×")
        .split(['×', ',', '、', '，'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strips a trailing parenthetical from a key ("C minor (Cm)" -> "C minor").
pub fn key_name(text: &str) -> String {
    text.split(['(', '（'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}
