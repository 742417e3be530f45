//! Frontmatter extraction.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A---\n(.*?)\n---(?:\n|\z)").expect("invalid regex pattern")
    })
}

/// Extracts flat `key: value` pairs from a leading `---` block.
///
/// Lines without a colon (or with the colon first) are ignored. A document
/// without frontmatter yields an empty map.
pub fn extract(markdown: &str) -> BTreeMap<String, String> {
    let Some(captures) = frontmatter_regex().captures(markdown) else {
        return BTreeMap::new();
    };
    let Some(block) = captures.get(1) else {
        return BTreeMap::new();
    };

    block
        .as_str()
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

/// Returns the document with its frontmatter block removed.
pub fn strip(markdown: &str) -> &str {
    match frontmatter_regex().find(markdown) {
        Some(m) => &markdown[m.end()..],
        None => markdown,
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}
