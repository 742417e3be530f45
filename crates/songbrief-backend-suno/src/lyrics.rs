//! Lyrics direction sheet generation.
//!
//! The sheet is written for a lyricist, not sung as is: every resolved
//! section gets a bracketed marker, vocal-delivery control tags, commented
//! guidance with an example line, and a `TODO:` placeholder stating how
//! many lines to write. Square brackets appear only in section markers, so
//! [`extract_sections`] recovers exactly the structure that was rendered.

use std::sync::OnceLock;

use regex::Regex;
use songbrief_spec::analysis::{Analysis, Language, LyricsDesign, WordDensity};
use songbrief_spec::structure::resolve_sections;
use songbrief_spec::translate::{translate, translate_array};
use songbrief_spec::Section;

use crate::text::{humanize, strip_brackets};

/// Markers every complete direction sheet must contain (substring match).
pub const REQUIRED_SECTIONS: &[&str] = &[
    "Verse 1",
    "Verse 2",
    "Chorus",
    "Instrumental",
    "Bridge",
    "Final Chorus",
];

/// Fewest lyric lines ever requested for a section.
const MIN_SECTION_LINES: usize = 2;

static SECTION_MARKER_REGEX: OnceLock<Regex> = OnceLock::new();

fn section_marker_regex() -> &'static Regex {
    SECTION_MARKER_REGEX
        .get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("invalid regex pattern"))
}

/// Narrative job of a verse, by its position among the verses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerseRole {
    Setup,
    Development,
    Climax,
}

impl VerseRole {
    /// Role of the `ordinal`-th verse (1-based).
    pub fn from_ordinal(ordinal: usize) -> VerseRole {
        match ordinal {
            0 | 1 => VerseRole::Setup,
            2 => VerseRole::Development,
            _ => VerseRole::Climax,
        }
    }
}

/// Which guidance vocabulary to write in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Locale {
    Japanese,
    English,
}

impl Locale {
    fn for_language(language: Language) -> Locale {
        match language {
            Language::Ja => Locale::Japanese,
            Language::En | Language::Mixed => Locale::English,
        }
    }

    fn example_prefix(&self) -> &'static str {
        match self {
            Locale::Japanese => "// 例: ",
            Locale::English => "// e.g. ",
        }
    }

    fn todo(&self, lines: usize) -> String {
        match self {
            Locale::Japanese => format!("TODO: 歌詞を{}行書く", lines),
            Locale::English => format!("TODO: write {} lines", lines),
        }
    }

    /// User text in the sheet's language; English sheets get translated text.
    fn render(&self, text: &str) -> String {
        match self {
            Locale::Japanese => strip_brackets(text),
            Locale::English => strip_brackets(&translate(text)),
        }
    }

    fn render_list(&self, items: &[String]) -> String {
        let items = match self {
            Locale::Japanese => items.to_vec(),
            Locale::English => translate_array(items),
        };
        strip_brackets(&items.join(", "))
    }
}

/// Generates the lyrics direction sheet.
///
/// # Arguments
/// * `analysis` - The analysis to render
///
/// # Returns
/// A header block followed by one block per resolved section, trimmed.
pub fn generate_lyrics(analysis: &Analysis) -> String {
    let structure = &analysis.music_structure;
    let design = &analysis.lyrics_design;
    let locale = Locale::for_language(design.language);
    let density = design.word_density_or_default();
    let sections = resolve_sections(&structure.sections, structure.target_length);

    let mut lines = header_lines(design, locale);
    lines.push(String::new());

    let mut verses = 0;
    let mut chorus_seen = false;
    for section in sections {
        lines.push(format!("[{}]", section.display_name()));

        let first_chorus = section == Section::Chorus && !chorus_seen;
        if section == Section::Chorus {
            chorus_seen = true;
        }
        lines.extend(control_tags(section, first_chorus).iter().map(|t| t.to_string()));

        let role = if section.is_verse() {
            verses += 1;
            Some(VerseRole::from_ordinal(verses))
        } else {
            None
        };
        lines.extend(section_guidance(section, role, design, locale));
        if let Some(example) = example_line(section, locale) {
            lines.push(format!("{}{}", locale.example_prefix(), example));
        }
        if let Some(count) = line_target(section, density) {
            lines.push(locale.todo(count));
        }
        lines.push(String::new());
    }

    lines.join("\n").trim().to_string()
}

/// Extracts the text inside every `[...]` marker, in order.
///
/// # Example
/// ```
/// use songbrief_backend_suno::lyrics::extract_sections;
///
/// let found = extract_sections("[Intro]\n(softly)\n[Verse 1]\nla la");
/// assert_eq!(found, vec!["Intro", "Verse 1"]);
/// ```
pub fn extract_sections(lyrics: &str) -> Vec<String> {
    section_marker_regex()
        .captures_iter(lyrics)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Required section names that no marker contains.
pub fn missing_required_sections(lyrics: &str) -> Vec<String> {
    let found = extract_sections(lyrics);
    REQUIRED_SECTIONS
        .iter()
        .filter(|required| !found.iter().any(|marker| marker.contains(*required)))
        .map(|required| required.to_string())
        .collect()
}

/// Returns true if every required section appears in some marker.
pub fn has_required_sections(lyrics: &str) -> bool {
    missing_required_sections(lyrics).is_empty()
}

/// Number of section markers.
pub fn count_sections(lyrics: &str) -> usize {
    section_marker_regex().find_iter(lyrics).count()
}

/// Lyric lines to write for a section, or `None` for sections without lyrics.
pub fn line_target(section: Section, density: WordDensity) -> Option<usize> {
    let base = density.verse_lines();
    match section {
        Section::Verse1
        | Section::Verse2
        | Section::Verse3
        | Section::Chorus
        | Section::FinalChorus
        | Section::FinalChorusRepeat => Some(base),
        Section::PreChorus | Section::Bridge => {
            Some(base.saturating_sub(1).max(MIN_SECTION_LINES))
        }
        Section::PostChorus | Section::Breakdown | Section::Outro => Some(MIN_SECTION_LINES),
        Section::Intro | Section::Instrumental | Section::Drop => None,
    }
}

/// Parenthetical delivery directions for a section.
pub fn control_tags(section: Section, first_chorus: bool) -> &'static [&'static str] {
    match section {
        Section::Intro => &["(instrumental intro)"],
        Section::Verse1 => &["(softly)"],
        Section::Verse2 | Section::Verse3 => &["(with more intensity)"],
        Section::PreChorus => &["(building up)"],
        Section::Chorus if first_chorus => &["(powerfully)", "(energy peak)"],
        Section::Chorus => &["(powerfully)"],
        Section::PostChorus => &["(echoing)"],
        Section::Instrumental => &["(instrumental break)"],
        Section::Drop => &["(heavy bass)"],
        Section::Breakdown => &["(stripped back)"],
        Section::Bridge => &["(emotional shift)"],
        Section::FinalChorus => &["(powerfully)", "(climax)"],
        Section::FinalChorusRepeat => &["(full energy)", "(ad-libs)"],
        Section::Outro => &["(fading out)"],
    }
}

fn header_lines(design: &LyricsDesign, locale: Locale) -> Vec<String> {
    let density = design.word_density_or_default();
    let mut lines = vec![format!("// Language: {}", design.language.english_name())];

    if let Some(perspective) = &design.perspective {
        lines.push(format!(
            "// Perspective: {}",
            locale.render(&humanize(perspective))
        ));
    }
    if !design.themes().is_empty() {
        lines.push(format!("// Themes: {}", locale.render_list(design.themes())));
    }
    lines.push(format!(
        "// Word density: {} ({} lines per verse)",
        density.as_str(),
        density.verse_lines()
    ));

    if let Some(vocal) = design.vocal_style.as_ref().filter(|v| !v.is_empty()) {
        let mut parts = Vec::new();
        if let Some(gender) = &vocal.gender {
            parts.push(locale.render(gender));
        }
        if let Some(range) = &vocal.range {
            parts.push(format!("{} range", locale.render(range)));
        }
        for list in [&vocal.character, &vocal.techniques].into_iter().flatten() {
            if !list.is_empty() {
                parts.push(locale.render_list(list));
            }
        }
        lines.push(format!("// Vocal style: {}", parts.join(", ")));
    }
    lines
}

fn section_guidance(
    section: Section,
    role: Option<VerseRole>,
    design: &LyricsDesign,
    locale: Locale,
) -> Vec<String> {
    let ja = locale == Locale::Japanese;
    let mut guidance: Vec<String> = Vec::new();

    match section {
        Section::Intro => guidance.push(pick(
            ja,
            "イントロ。歌詞なし、またはハミング",
            "Intro; no lyrics or humming only",
        )),
        Section::Verse1 | Section::Verse2 | Section::Verse3 => {
            let role = role.unwrap_or(VerseRole::Setup);
            guidance.push(match role {
                VerseRole::Setup => pick(
                    ja,
                    "情景と語り手を提示する",
                    "Set the scene and introduce the narrator",
                ),
                VerseRole::Development => pick(
                    ja,
                    "状況を動かし、感情の揺れを描く",
                    "Move the story forward and let the feeling shift",
                ),
                VerseRole::Climax => pick(
                    ja,
                    "物語を最高潮へ導く",
                    "Push the story toward its peak",
                ),
            });
            if !design.themes().is_empty() {
                let label = pick(ja, "テーマ", "Themes");
                guidance.push(format!("{}: {}", label, locale.render_list(design.themes())));
            }
            if role == VerseRole::Setup {
                if let Some(scenery) = &design.scenery {
                    let label = pick(ja, "情景", "Scenery");
                    guidance.push(format!("{}: {}", label, locale.render(scenery)));
                }
            }
        }
        Section::PreChorus => guidance.push(pick(
            ja,
            "サビへの緊張を高める",
            "Build tension toward the chorus",
        )),
        Section::Chorus | Section::FinalChorus | Section::FinalChorusRepeat => {
            guidance.push(pick(ja, "曲の核となるフックを置く", "Deliver the central hook"));
            if design.repeat_short_phrase() {
                guidance.push(pick(ja, "短いフレーズを繰り返す", "Repeat a short phrase"));
            }
            if design.avoid_direct_emotion_words() {
                guidance.push(pick(
                    ja,
                    "感情を直接表す言葉を避け、情景で伝える",
                    "Avoid direct emotion words; show it through imagery",
                ));
            }
            if section.is_final_chorus() {
                guidance.push(pick(
                    ja,
                    "クライマックス: フックを最大の熱量で回収する",
                    "Climax: bring the hook back at full strength",
                ));
            }
        }
        Section::PostChorus => guidance.push(pick(
            ja,
            "サビの余韻を残す短いフレーズ。ハミングも可",
            "A short phrase carrying the chorus afterglow; humming is fine",
        )),
        Section::Instrumental => guidance.push(pick(
            ja,
            "間奏。歌詞は入れない",
            "Instrumental break; no lyrics",
        )),
        Section::Drop => guidance.push(pick(
            ja,
            "ドロップ。ボーカルチョップのみ",
            "Drop; vocal chops only",
        )),
        Section::Breakdown => guidance.push(pick(
            ja,
            "音数を減らし、言葉を際立たせる",
            "Strip back and let the words stand out",
        )),
        Section::Bridge => guidance.push(pick(
            ja,
            "視点や時間を変え、新しい角度を見せる",
            "Shift perspective or time to show a new angle",
        )),
        Section::Outro => guidance.push(pick(
            ja,
            "余韻を残して締めくくる",
            "Close on a lingering image",
        )),
    }

    guidance.into_iter().map(|line| format!("// {}", line)).collect()
}

fn pick(japanese: bool, ja: &str, en: &str) -> String {
    if japanese { ja } else { en }.to_string()
}

fn example_line(section: Section, locale: Locale) -> Option<&'static str> {
    let (ja, en) = match section {
        Section::Verse1 | Section::Verse2 | Section::Verse3 => (
            "街灯の下で 影だけが伸びていく",
            "Streetlights hum while my shadow stretches on",
        ),
        Section::PreChorus => (
            "言えないままの言葉が 喉の奥で揺れる",
            "Words I never said are trembling in my throat",
        ),
        Section::Chorus | Section::FinalChorus | Section::FinalChorusRepeat => {
            ("夜を越えて 君に会いに行く", "Through the night I will run to you")
        }
        Section::PostChorus => ("ラララ 遠くへ", "La la la, far away"),
        Section::Breakdown => ("静かに 息をするだけ", "Quiet now, just breathing"),
        Section::Bridge => ("もしもあの日に戻れたなら", "If I could go back to that day"),
        Section::Outro => ("朝が来る前に", "Before the morning comes"),
        Section::Intro | Section::Instrumental | Section::Drop => return None,
    };
    Some(match locale {
        Locale::Japanese => ja,
        Locale::English => en,
    })
}
