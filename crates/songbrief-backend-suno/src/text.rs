//! Small text helpers shared by the generators.

/// Uppercases the first character.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replaces square brackets so free text cannot masquerade as a section marker.
pub(crate) fn strip_brackets(text: &str) -> String {
    text.replace(['[', '［'], "(").replace([']', '］'], ")")
}

/// Underscored identifiers ("first_person") read as plain words.
pub(crate) fn humanize(text: &str) -> String {
    text.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("piano centered"), "Piano centered");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("夜"), "夜");
    }

    #[test]
    fn test_strip_brackets() {
        assert_eq!(strip_brackets("[Chorus] hook"), "(Chorus) hook");
    }
}
