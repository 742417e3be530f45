//! Chord progression sub-sections (`### ` headers).

use serde::Serialize;

use super::lists::{first_of, key_values};

/// Chord detail for one named song part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedChordSection {
    /// Header as written, lowercased (e.g. "verse", "サビ").
    pub name: String,
    pub pattern: String,
    pub feel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_intent: Option<String>,
}

/// Splits on `### ` headers and reads pattern/feel/design intent bullets.
///
/// Sub-sections keep document order.
pub fn parse(text: &str) -> Vec<ParsedChordSection> {
    let mut blocks: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in text.lines() {
        if let Some(header) = line.strip_prefix("### ") {
            blocks.push((header.trim(), Vec::new()));
        } else if let Some((_, lines)) = blocks.last_mut() {
            lines.push(line);
        }
    }

    blocks
        .into_iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, lines)| {
            let kv = key_values(&lines.join("\n"));
            ParsedChordSection {
                name: name.to_lowercase(),
                pattern: first_of(&kv, &["パターン", "Pattern"]).unwrap_or_default(),
                feel: first_of(&kv, &["雰囲気", "Feel"]).unwrap_or_default(),
                design_intent: first_of(&kv, &["設計意図", "Design Intent"]),
            }
        })
        .collect()
}
