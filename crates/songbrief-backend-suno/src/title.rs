//! Working title selection.

use songbrief_spec::analysis::Analysis;

/// Longest title, in characters, chosen without cutting.
pub const MAX_TITLE_CHARS: usize = 8;

/// Picks a short working title.
///
/// Prefers the first concept keyword, then the source title, then the
/// first segment of the source title, whichever first fits in
/// [`MAX_TITLE_CHARS`]; otherwise the source title is cut to that length.
pub fn generate_title(analysis: &Analysis) -> String {
    let fits = |text: &str| !text.is_empty() && text.chars().count() <= MAX_TITLE_CHARS;

    if let Some(keyword) = analysis.keywords().first().map(|k| k.trim()) {
        if fits(keyword) {
            return keyword.to_string();
        }
    }

    let title = analysis.source_song.title.trim();
    if fits(title) {
        return title.to_string();
    }

    let segment = title
        .split(|c: char| c == '、' || c == '。' || c.is_whitespace())
        .find(|s| !s.is_empty())
        .unwrap_or("");
    if fits(segment) {
        return segment.to_string();
    }

    title.chars().take(MAX_TITLE_CHARS).collect()
}
