//! List and bold key/value extraction.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

static BULLET_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBERED_REGEX: OnceLock<Regex> = OnceLock::new();
static KEY_VALUE_REGEX: OnceLock<Regex> = OnceLock::new();

fn bullet_regex() -> &'static Regex {
    BULLET_REGEX.get_or_init(|| Regex::new(r"^[-*]\s+(.+)").expect("invalid regex pattern"))
}

fn numbered_regex() -> &'static Regex {
    NUMBERED_REGEX.get_or_init(|| Regex::new(r"^\d+\.\s+(.+)").expect("invalid regex pattern"))
}

fn key_value_regex() -> &'static Regex {
    KEY_VALUE_REGEX.get_or_init(|| {
        Regex::new(r"^[-*]\s+\*\*(.+?)\*\*\s*[:：]\s*(.+)").expect("invalid regex pattern")
    })
}

fn first_capture<'a>(regex: &Regex, line: &'a str) -> Option<&'a str> {
    regex
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Top-level `- item` / `* item` entries.
pub fn bullets(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| first_capture(bullet_regex(), line))
        .map(str::to_string)
        .collect()
}

/// `1. item` entries.
pub fn numbered(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| first_capture(numbered_regex(), line))
        .map(str::to_string)
        .collect()
}

/// `- **Key**: value` bullets as a map.
pub fn key_values(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let captures = key_value_regex().captures(line)?;
            let key = captures.get(1)?.as_str().trim();
            let value = captures.get(2)?.as_str().trim();
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Value of the first `**Key**: value` anywhere in `text`, case-insensitive.
pub fn bold_value(text: &str, key: &str) -> Option<String> {
    let pattern = format!(r"(?i)\*\*{}\*\*\s*[:：]\s*(.+)", regex::escape(key));
    let regex = Regex::new(&pattern).ok()?;
    first_capture(&regex, text).map(str::to_string)
}

/// First present key among `keys`.
pub fn first_of(map: &BTreeMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.get(*key)).cloned()
}

/// Keywords separated by commas, `、` or line breaks, with bullets removed.
pub fn keywords(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim_start()
                .trim_start_matches(['-', '*'])
                .trim_start()
        })
        .flat_map(|line| line.split([',', '、', '，']))
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_and_numbered() {
        let text = "- first\n* second\n  - nested ignored\n1. Intro\n2. Verse 1 (8 bars)\nplain";
        assert_eq!(bullets(text), vec!["first", "second"]);
        assert_eq!(numbered(text), vec!["Intro", "Verse 1 (8 bars)"]);
    }

    #[test]
    fn test_key_values() {
        let kv = key_values("- **Target Length**: ~3:30\n- **ジャンル**：J-Pop × Rock\n- plain");
        assert_eq!(kv.get("Target Length").map(String::as_str), Some("~3:30"));
        assert_eq!(kv.get("ジャンル").map(String::as_str), Some("J-Pop × Rock"));
        assert_eq!(kv.len(), 2);
    }

    #[test]
    fn test_bold_value_case_insensitive() {
        let text = "Some intro\n**key**: A minor (Am)\n";
        assert_eq!(bold_value(text, "Key").as_deref(), Some("A minor (Am)"));
        assert_eq!(bold_value(text, "Tempo"), None);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            keywords("- 夜, 光、孤独\n- 駆ける"),
            vec!["夜", "光", "孤独", "駆ける"]
        );
    }
}
