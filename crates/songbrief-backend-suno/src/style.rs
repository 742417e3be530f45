//! Style prompt generation.
//!
//! The full prompt is a set of labeled blocks separated by blank lines.
//! Every free-text field passes through the term translator so the prompt
//! reads as English even when the analysis was written in Japanese.

use songbrief_spec::analysis::{Analysis, EnergyCurve, KeyMode, WordDensity};
use songbrief_spec::structure::resolve_sections;
use songbrief_spec::translate::{translate, translate_array, translate_chord_feel, translate_dynamics};
use songbrief_spec::Section;
use tracing::warn;

use crate::text::{capitalize, humanize};

/// Maximum characters accepted by the style field.
pub const STYLE_CHAR_LIMIT: usize = 1000;

/// Budget for the single-line compact variant.
pub const COMPACT_STYLE_CHAR_LIMIT: usize = 200;

/// Appended when the prompt had to be cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Sections shown per line of the structure chain.
const SECTIONS_PER_LINE: usize = 4;

/// Generates the full style prompt for an analysis.
///
/// # Arguments
/// * `analysis` - The analysis to render
///
/// # Returns
/// The labeled block prompt, never longer than [`STYLE_CHAR_LIMIT`] characters.
pub fn generate_style(analysis: &Analysis) -> String {
    let blocks = [
        ("Genre", genre_lines(analysis)),
        ("Style", style_lines(analysis)),
        ("Tempo", vec![tempo_line(analysis.music_structure.tempo_bpm)]),
        ("Harmony", harmony_lines(analysis)),
        ("Length / Structure", structure_lines(analysis)),
        ("Arrangement", arrangement_lines(analysis)),
        ("Vocals", vocal_lines(analysis)),
        ("Lyrics", lyrics_lines(analysis)),
    ];

    let style = blocks
        .iter()
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(label, lines)| format!("{}:\n{}", label, lines.join("\n")))
        .collect::<Vec<_>>()
        .join("\n\n");

    truncate_at_boundary(&style, STYLE_CHAR_LIMIT)
}

/// Generates the single-line compact style.
///
/// Carries one or two genres, one mood, the main instrument, a vocal
/// descriptor and one structure hint. Output longer than
/// [`COMPACT_STYLE_CHAR_LIMIT`] is logged and returned as is.
pub fn generate_compact_style(analysis: &Analysis) -> String {
    let arrangement = &analysis.arrangement;
    let mut parts: Vec<String> = arrangement
        .genre_tags
        .iter()
        .take(2)
        .map(|tag| translate(tag))
        .collect();

    if let Some(mood) = arrangement.mood.as_ref().and_then(|m| m.first()) {
        parts.push(translate(mood));
    }

    let main_instrument = arrangement
        .center
        .as_ref()
        .or_else(|| arrangement.instruments.as_ref().and_then(|i| i.first()));
    if let Some(instrument) = main_instrument {
        parts.push(translate(instrument));
    }

    parts.push(vocal_descriptor(analysis));
    parts.push(structure_hint(analysis.music_structure.energy_curve).to_string());

    let compact = parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let chars = style_char_count(&compact);
    if chars > COMPACT_STYLE_CHAR_LIMIT {
        warn!(
            chars,
            limit = COMPACT_STYLE_CHAR_LIMIT,
            "compact style exceeds character limit"
        );
    }
    compact
}

/// Number of characters (not bytes) in a style prompt.
pub fn style_char_count(style: &str) -> usize {
    style.chars().count()
}

/// Returns true if the style fits in `limit` characters.
pub fn is_style_within_limit(style: &str, limit: usize) -> bool {
    style_char_count(style) <= limit
}

/// Describes a tempo in words.
pub fn tempo_description(bpm: f64) -> &'static str {
    if bpm < 60.0 {
        "Very slow, spacious tempo"
    } else if bpm < 80.0 {
        "Slow, relaxed tempo"
    } else if bpm < 100.0 {
        "Moderate tempo"
    } else if bpm < 120.0 {
        "Medium, groovy tempo"
    } else if bpm < 140.0 {
        "Upbeat tempo"
    } else if bpm < 160.0 {
        "Fast, driving tempo"
    } else {
        "Very fast, aggressive tempo"
    }
}

/// Cuts `text` to at most `limit` characters on a word boundary.
///
/// The cut lands on the last whitespace or punctuation boundary that
/// leaves room for [`TRUNCATION_MARKER`]; dangling separators are trimmed
/// before the marker is appended. Text within the limit is returned as is.
///
/// # Example
/// ```
/// use songbrief_backend_suno::style::truncate_at_boundary;
///
/// assert_eq!(truncate_at_boundary("soft piano, warm pads", 14), "soft piano...");
/// assert_eq!(truncate_at_boundary("short", 14), "short");
/// ```
pub fn truncate_at_boundary(text: &str, limit: usize) -> String {
    if style_char_count(text) <= limit {
        return text.to_string();
    }

    let budget = limit.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut budget_end = text.len();
    let mut cut = None;
    for (index, (byte, c)) in text.char_indices().enumerate() {
        if index == budget {
            budget_end = byte;
        }
        if index > budget {
            break;
        }
        if is_boundary(c) {
            cut = Some(byte);
        }
    }

    let head = &text[..cut.unwrap_or(budget_end)];
    let head = head.trim_end_matches(|c: char| c.is_whitespace() || is_separator(c));
    format!("{}{}", head, TRUNCATION_MARKER)
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || is_separator(c)
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '.' | ';' | ':' | '→' | '、' | '。')
}

fn genre_lines(analysis: &Analysis) -> Vec<String> {
    vec![translate_array(&analysis.arrangement.genre_tags).join(", ")]
}

fn style_lines(analysis: &Analysis) -> Vec<String> {
    let arrangement = &analysis.arrangement;
    let lyrics = &analysis.lyrics_design;
    let mut lines: Vec<String> = Vec::new();

    if let Some(dynamics) = &arrangement.dynamics {
        lines.push(format!(
            "{} {} song.",
            capitalize(&translate_dynamics(dynamics)),
            lyrics.language.english_name()
        ));
    }
    if let Some(emotion) = &lyrics.emotion_expression {
        lines.push(format!(
            "{} expression.",
            capitalize(&translate(&humanize(emotion)))
        ));
    }
    match analysis.music_structure.energy_curve {
        Some(EnergyCurve::Wave) => {
            lines.push("Strong contrast between restrained verses and explosive choruses.".into())
        }
        Some(EnergyCurve::Build) => lines.push("Continuous build-up toward climactic moments.".into()),
        Some(EnergyCurve::Flat) | None => {}
    }
    if let Some(mood) = arrangement.mood.as_ref().filter(|m| !m.is_empty()) {
        lines.push(format!("Mood: {}.", translate_array(mood).join(", ")));
    }
    if let Some(texture) = &arrangement.texture {
        lines.push(format!("{}.", capitalize(&translate(texture))));
    }
    lines
}

fn tempo_line(bpm: f64) -> String {
    format!("{} ({} BPM).", tempo_description(bpm), bpm)
}

fn harmony_lines(analysis: &Analysis) -> Vec<String> {
    let key = match analysis.music_structure.key_mode {
        KeyMode::Major => "Major key.",
        KeyMode::Minor => "Minor key.",
    };
    let mut lines = vec![key.to_string()];

    if let Some(chords) = &analysis.chord_progression {
        for (label, section) in chords.labeled_sections() {
            let feel = section.feel.as_deref().map(translate_chord_feel);
            let line = match (feel, section.pattern.as_deref()) {
                (Some(feel), Some(pattern)) => format!("{}: {} ({}).", label, feel, pattern),
                (Some(feel), None) => format!("{}: {}.", label, feel),
                (None, Some(pattern)) => format!("{}: {}.", label, pattern),
                (None, None) => continue,
            };
            lines.push(line);
        }
    }
    lines
}

fn structure_lines(analysis: &Analysis) -> Vec<String> {
    let structure = &analysis.music_structure;
    let sections = resolve_sections(&structure.sections, structure.target_length);
    vec![
        format!(
            "Aim for about {} minutes.",
            structure.target_length.minutes()
        ),
        format_structure_chain(&sections),
    ]
}

/// Renders sections as an arrow chain, four per line.
///
/// Continuation lines start with `→ ` so the chain reads as one sequence.
pub fn format_structure_chain(sections: &[Section]) -> String {
    sections
        .chunks(SECTIONS_PER_LINE)
        .map(|chunk| {
            chunk
                .iter()
                .map(Section::display_name)
                .collect::<Vec<_>>()
                .join(" → ")
        })
        .collect::<Vec<_>>()
        .join("\n→ ")
}

fn arrangement_lines(analysis: &Analysis) -> Vec<String> {
    let arrangement = &analysis.arrangement;
    let mut lines = Vec::new();

    if let Some(center) = &arrangement.center {
        lines.push(format!("{} centered.", capitalize(&translate(center))));
    }
    if let Some(instruments) = arrangement.instruments.as_ref().filter(|i| !i.is_empty()) {
        lines.push(format!(
            "Instruments: {}.",
            translate_array(instruments).join(", ")
        ));
    }
    if let Some(rhythm) = &arrangement.rhythm {
        lines.push(format!("{}.", capitalize(&translate(rhythm))));
    }
    if let Some(bass) = &arrangement.bass {
        lines.push(format!("{}.", capitalize(&translate(bass))));
    }
    if let Some(density) = arrangement.density.filter(|d| !d.is_empty()) {
        let parts: Vec<String> = [
            ("verse", density.verse),
            ("chorus", density.chorus),
            ("final", density.r#final),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| format!("{} {}", label, v.as_str())))
        .collect();
        lines.push(format!("Density: {}.", parts.join(", ")));
    }
    if let Some(ear_candy) = &arrangement.ear_candy {
        lines.push(format!("Ear candy: {}.", translate(ear_candy)));
    }
    lines
}

fn vocal_lines(analysis: &Analysis) -> Vec<String> {
    let lyrics = &analysis.lyrics_design;
    let mut lines = Vec::new();

    if let Some(vocal) = lyrics.vocal_style.as_ref().filter(|v| !v.is_empty()) {
        let mut voice = Vec::new();
        if let Some(gender) = &vocal.gender {
            voice.push(format!("{} vocal", capitalize(&translate(gender))));
        }
        if let Some(range) = &vocal.range {
            voice.push(format!("{} range", translate(range)));
        }
        if !voice.is_empty() {
            lines.push(format!("{}.", voice.join(", ")));
        }
        if let Some(character) = vocal.character.as_ref().filter(|c| !c.is_empty()) {
            lines.push(format!("Character: {}.", translate_array(character).join(", ")));
        }
        if let Some(techniques) = vocal.techniques.as_ref().filter(|t| !t.is_empty()) {
            lines.push(format!(
                "Techniques: {}.",
                translate_array(techniques).join(", ")
            ));
        }
    }

    lines.push(
        match lyrics.word_density_or_default() {
            WordDensity::High => "Rapid-fire delivery in verses.",
            WordDensity::Low => "Spacious phrasing with room to breathe.",
            WordDensity::Medium => "Balanced melodic phrasing.",
        }
        .to_string(),
    );
    if lyrics.repeat_short_phrase() {
        lines.push("Chorus should be catchy and repeatable.".to_string());
    }
    lines
}

fn lyrics_lines(analysis: &Analysis) -> Vec<String> {
    let lyrics = &analysis.lyrics_design;
    let mut lines = vec![format!("{}.", lyrics.language.english_name())];

    if let Some(perspective) = &lyrics.perspective {
        lines.push(format!(
            "{}.",
            capitalize(&translate(&humanize(perspective)))
        ));
    }
    if !lyrics.themes().is_empty() {
        lines.push(format!(
            "Theme: {}.",
            translate_array(lyrics.themes()).join(", ")
        ));
    }
    if let Some(scenery) = &lyrics.scenery {
        lines.push(format!("{} scenery.", capitalize(&translate(scenery))));
    }
    if lyrics.avoid_direct_emotion_words() {
        lines.push("Avoid direct emotion words; use imagery instead.".to_string());
    }
    lines
}

fn vocal_descriptor(analysis: &Analysis) -> String {
    let lyrics = &analysis.lyrics_design;
    let vocal = lyrics.vocal_style.as_ref();

    if let Some(gender) = vocal.and_then(|v| v.gender.as_ref()) {
        return format!("{} vocals", translate(gender).to_lowercase());
    }
    if let Some(character) = vocal
        .and_then(|v| v.character.as_ref())
        .and_then(|c| c.first())
    {
        return format!("{} vocals", translate(character));
    }
    format!("{} vocals", lyrics.language.english_name())
}

fn structure_hint(energy: Option<EnergyCurve>) -> &'static str {
    match energy {
        Some(EnergyCurve::Build) => "building to an explosive final chorus",
        Some(EnergyCurve::Wave) => "dynamic verse-chorus contrast",
        Some(EnergyCurve::Flat) => "steady, even arc",
        None => "verse-chorus structure",
    }
}
