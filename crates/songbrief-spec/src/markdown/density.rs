//! Arrangement density design.

use std::collections::BTreeMap;

use serde::Serialize;

use super::lists::first_of;

const DENSITY_HEADERS: &[&str] = &["### 密度設計", "### Density"];

/// Density labels as written in the document ("low", "高密度", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDensity {
    pub verse: String,
    pub chorus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop: Option<String>,
    pub final_chorus: String,
}

impl Default for ParsedDensity {
    fn default() -> Self {
        Self {
            verse: "medium".to_string(),
            chorus: "high".to_string(),
            drop: None,
            final_chorus: "very high".to_string(),
        }
    }
}

/// Returns the density design sub-block of an arrangement section, up to
/// the next `###` header.
pub fn find_block(arrangement: &str) -> Option<&str> {
    let start = DENSITY_HEADERS
        .iter()
        .find_map(|header| arrangement.find(header))?;
    let rest = &arrangement[start..];
    let body_start = rest.find('\n').map_or(rest.len(), |i| i + 1);
    let end = rest[body_start..]
        .find("###")
        .map_or(rest.len(), |i| body_start + i);
    Some(&rest[..end])
}

fn value_after_colon(line: &str) -> Option<String> {
    let (_, value) = line.split_once([':', '：'])?;
    let value = value.trim().trim_start_matches("**").trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Scans a density block for verse/chorus/drop/final lines.
pub fn parse(block: &str) -> ParsedDensity {
    let mut density = ParsedDensity::default();

    for line in block.lines() {
        let lower = line.to_lowercase();
        let Some(value) = value_after_colon(line) else {
            continue;
        };
        let is_final = lower.contains("final") || line.contains("大サビ") || line.contains("ラスサビ");

        if lower.contains("verse") || line.contains("Aメロ") {
            density.verse = value.clone();
        }
        if (lower.contains("chorus") || line.contains("サビ")) && !is_final {
            density.chorus = value.clone();
        }
        if lower.contains("drop") || line.contains("ドロップ") {
            density.drop = Some(value.clone());
        }
        if is_final {
            density.final_chorus = value;
        }
    }

    density
}

/// Density from plain arrangement bullets when no density block exists.
pub fn from_key_values(kv: &BTreeMap<String, String>) -> ParsedDensity {
    let defaults = ParsedDensity::default();
    ParsedDensity {
        verse: first_of(kv, &["Verse"]).unwrap_or(defaults.verse),
        chorus: first_of(kv, &["Chorus"]).unwrap_or(defaults.chorus),
        drop: first_of(kv, &["Drop"]),
        final_chorus: first_of(kv, &["Final Chorus"]).unwrap_or(defaults.final_chorus),
    }
}
