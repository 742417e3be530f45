//! Level-2 header splitting.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

static ANNOTATION_REGEX: OnceLock<Regex> = OnceLock::new();

fn annotation_regex() -> &'static Regex {
    ANNOTATION_REGEX
        .get_or_init(|| Regex::new(r"（.*?）|\(.*?\)").expect("invalid regex pattern"))
}

/// Named `## ` sections of a document body.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    bodies: BTreeMap<String, String>,
}

impl Sections {
    /// Body of the first header found among `names`, or "".
    ///
    /// Headers are matched after annotation stripping, so `## 曲展開（構成）`
    /// is found as `曲展開`.
    pub fn get(&self, names: &[&str]) -> &str {
        names
            .iter()
            .find_map(|name| self.bodies.get(*name))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Normalizes a header by removing parenthetical annotations.
pub fn normalize_header(header: &str) -> String {
    annotation_regex().replace_all(header, "").trim().to_string()
}

/// Splits a frontmatter-free body on `## ` headers.
///
/// Text before the first header is ignored. A repeated header keeps the
/// last body.
pub fn split(body: &str) -> Sections {
    let mut bodies = BTreeMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in body.lines() {
        if let Some(header) = line.strip_prefix("## ") {
            if let Some((name, lines)) = current.take() {
                bodies.insert(name, lines.join("\n").trim().to_string());
            }
            current = Some((normalize_header(header), Vec::new()));
        } else if let Some((_, ref mut lines)) = current {
            lines.push(line);
        }
    }
    if let Some((name, lines)) = current {
        bodies.insert(name, lines.join("\n").trim().to_string());
    }

    Sections { bodies }
}
