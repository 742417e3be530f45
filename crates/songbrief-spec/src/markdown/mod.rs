//! Markdown song-analysis parser.
//!
//! Analysis documents are semi-structured markdown: a `---` frontmatter
//! block followed by `## ` sections in English or Japanese. Parsing runs as
//! independent passes (frontmatter, section split, per-section extraction)
//! and never fails; callers check [`validate_parsed`] instead.
//!
//! # Example
//! ```
//! use songbrief_spec::markdown::{parse_analysis_markdown, validate_parsed};
//!
//! let parsed = parse_analysis_markdown("## Essence\n- restless\n");
//! let validation = validate_parsed(&parsed);
//! assert!(!validation.valid);
//! assert_eq!(validation.errors.len(), 3);
//! ```

pub mod chords;
pub mod density;
pub mod detect;
pub mod frontmatter;
pub mod lists;
pub mod sections;
pub mod table;

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::analysis::{
    Analysis, Arrangement, ChordProgression, ChordSection, Density, DensityPlan, EnergyCurve,
    KeyMode, Language, LyricsDesign, MusicStructure, Notation, SourceSong, TargetLength,
    WordDensity, MAX_GENRE_TAGS, MAX_TEMPO_BPM, MIN_TEMPO_BPM,
};
use crate::section::Section;

pub use chords::ParsedChordSection;
pub use density::ParsedDensity;
pub use table::InstrumentEntry;

/// Genre tag used when the document names none.
pub const FALLBACK_GENRE: &str = "Japanese Pop";

/// Section list used when no structure entry maps to a known section.
const FALLBACK_SECTIONS: &[Section] = &[
    Section::Intro,
    Section::Verse1,
    Section::Chorus,
    Section::Verse2,
    Section::Chorus,
    Section::Bridge,
    Section::FinalChorus,
    Section::Outro,
];

const RHYTHM_PARTS: &[&str] = &["リズム", "ドラム", "Rhythm", "Drums"];
const BASS_PARTS: &[&str] = &["ベース", "Bass"];
const EFFECT_PARTS: &[&str] = &["効果", "FX", "Effects"];

static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("invalid regex pattern"))
}

/// Everything the parser recovered from a markdown analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedAnalysis {
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_type: Option<String>,
    pub essence: Vec<String>,
    pub structure: ParsedStructure,
    pub chord_progression: ParsedChords,
    pub arrangement: ParsedArrangement,
    pub lyrics_design: ParsedLyrics,
    pub design_points: Vec<String>,
    pub concept_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedStructure {
    pub target_length: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_curve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    /// Section labels as written ("Verse 1 (8 bars)", "サビ").
    pub sections: Vec<String>,
    pub design_intent: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedChords {
    pub key: String,
    pub key_mode: KeyMode,
    pub sections: Vec<ParsedChordSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedArrangement {
    pub genre_tags: Vec<String>,
    pub characteristics: Vec<String>,
    pub design: String,
    pub instruments: Vec<InstrumentEntry>,
    pub density: ParsedDensity,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedLyrics {
    pub language: Language,
    pub perspective: String,
    pub themes: Vec<String>,
    pub word_density: String,
    pub expression_style: String,
    pub emotion_handling: String,
}

/// Outcome of [`validate_parsed`]; one message per missing requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Parses a markdown analysis document.
///
/// Missing sections produce empty fields and documented defaults; this
/// function never fails.
pub fn parse_analysis_markdown(markdown: &str) -> ParsedAnalysis {
    let markdown = markdown.replace("\r\n", "\n");
    let fm = frontmatter::extract(&markdown);
    let sections = sections::split(frontmatter::strip(&markdown));

    let essence = lists::bullets(sections.get(&["曲の本質", "Essence"]));

    let structure_text = sections.get(&["Music Structure", "曲展開", "構成"]);
    let structure_kv = lists::key_values(structure_text);
    let structure_field = |keys: &[&str]| {
        lists::first_of(&structure_kv, keys)
            .or_else(|| keys.iter().find_map(|key| lists::bold_value(structure_text, key)))
    };
    let structure = ParsedStructure {
        target_length: structure_field(&["Target Length", "尺"])
            .unwrap_or_else(|| "~3:00".to_string()),
        energy_curve: structure_field(&["Energy Curve", "エネルギー曲線"]),
        tempo: structure_field(&["Tempo", "BPM", "テンポ"]),
        sections: lists::numbered(structure_text),
        design_intent: structure_field(&["設計意図", "Design Intent"]).unwrap_or_default(),
    };

    let chord_text = sections.get(&["Harmony / Chord Progression", "Harmony", "コード進行"]);
    let key_text = lists::bold_value(chord_text, "Key")
        .or_else(|| lists::bold_value(chord_text, "キー"))
        .unwrap_or_default();
    let chord_progression = ParsedChords {
        key: detect::key_name(&key_text),
        key_mode: detect::key_mode(&key_text),
        sections: chords::parse(chord_text),
    };

    let arrangement_text = sections.get(&["Arrangement", "アレンジ"]);
    let arrangement_kv = lists::key_values(arrangement_text);
    let density = match density::find_block(arrangement_text) {
        Some(block) => density::parse(block),
        None => density::from_key_values(&arrangement_kv),
    };
    let arrangement = ParsedArrangement {
        genre_tags: detect::genre_tags(
            &lists::first_of(&arrangement_kv, &["ジャンル", "Genre"]).unwrap_or_default(),
        ),
        // Plain bullets above the first sub-header; key/value bullets are fields.
        characteristics: lists::bullets(
            arrangement_text
                .split("\n###")
                .next()
                .unwrap_or(arrangement_text),
        )
        .into_iter()
        .filter(|point| !point.starts_with("**") && !point.contains('|'))
        .collect(),
        design: lists::first_of(&arrangement_kv, &["設計", "Design"]).unwrap_or_default(),
        instruments: table::instruments(arrangement_text),
        density,
    };

    let lyrics_kv = lists::key_values(sections.get(&["Lyrics Design", "歌詞設計"]));
    let lyrics_field = |keys: &[&str]| lists::first_of(&lyrics_kv, keys).unwrap_or_default();
    let lyrics_design = ParsedLyrics {
        language: detect::language(&lyrics_field(&["言語", "Language"])),
        perspective: lyrics_field(&["視点", "Perspective"]),
        themes: lists::keywords(&lyrics_field(&["主題", "Themes", "Theme"])),
        word_density: lists::first_of(&lyrics_kv, &["言語密度", "Word Density"])
            .unwrap_or_else(|| "medium".to_string()),
        expression_style: lyrics_field(&["断定表現", "Expression Style"]),
        emotion_handling: lyrics_field(&["感情", "Emotion"]),
    };

    ParsedAnalysis {
        title: fm.get("title").cloned().unwrap_or_default(),
        artist: fm.get("artist").cloned().unwrap_or_default(),
        analyzed_at: fm.get("analyzed_at").cloned(),
        core_type: fm.get("core_type").filter(|c| !c.is_empty()).cloned(),
        essence,
        structure,
        chord_progression,
        arrangement,
        lyrics_design,
        design_points: lists::bullets(sections.get(&["設計のポイント", "Design Points"])),
        concept_keywords: lists::keywords(sections.get(&["概念キーワード", "Concept Keywords"])),
    }
}

/// Checks the non-negotiable minimums: title, artist and one section.
pub fn validate_parsed(parsed: &ParsedAnalysis) -> ParsedValidation {
    let mut errors = Vec::new();

    if parsed.title.trim().is_empty() {
        errors.push("title is required in frontmatter".to_string());
    }
    if parsed.artist.trim().is_empty() {
        errors.push("artist is required in frontmatter".to_string());
    }
    if parsed.structure.sections.is_empty() {
        errors.push("at least one section is required in Music Structure".to_string());
    }

    ParsedValidation {
        valid: errors.is_empty(),
        errors,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn non_empty_vec(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

impl ParsedAnalysis {
    /// Non-fatal gaps worth reporting when an analysis is saved.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.essence.is_empty() {
            warnings.push("essence section is empty".to_string());
        }
        if self.concept_keywords.is_empty() {
            warnings.push("no concept keywords found".to_string());
        }
        if self.arrangement.instruments.is_empty() {
            warnings.push("instrument table not found".to_string());
        }
        if self.chord_progression.sections.is_empty() {
            warnings.push("no chord progression sections found".to_string());
        }
        warnings
    }

    /// Tempo from an explicit Tempo/BPM field, else estimated from length.
    fn tempo_bpm(&self, length: TargetLength) -> f64 {
        let explicit = self
            .structure
            .tempo
            .as_deref()
            .and_then(|text| number_regex().find(text))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|bpm| (MIN_TEMPO_BPM..=MAX_TEMPO_BPM).contains(bpm));

        explicit.unwrap_or(match length {
            TargetLength::FiveMinutes => 90.0,
            TargetLength::FourMinutes => 110.0,
            TargetLength::ThreeMinutes => 130.0,
        })
    }

    fn chord_progression(&self) -> Option<ChordProgression> {
        let mut progression = ChordProgression {
            notation: Notation::RomanNumerals,
            ..Default::default()
        };

        for parsed in &self.chord_progression.sections {
            let slot = match Section::from_label(&parsed.name) {
                Some(s) if s.is_verse() => &mut progression.verse,
                Some(Section::PreChorus) => &mut progression.prechorus,
                Some(s) if s.is_chorus() => &mut progression.chorus,
                Some(Section::Bridge) => &mut progression.bridge,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(ChordSection {
                    feel: non_empty(&parsed.feel),
                    pattern: non_empty(&parsed.pattern),
                });
            }
        }

        let empty = progression.verse.is_none()
            && progression.prechorus.is_none()
            && progression.chorus.is_none()
            && progression.bridge.is_none();
        (!empty).then_some(progression)
    }

    fn instrument_for(&self, parts: &[&str]) -> Option<String> {
        self.arrangement
            .instruments
            .iter()
            .find(|entry| parts.contains(&entry.part.as_str()))
            .map(|entry| entry.instrument.clone())
    }

    /// Converts the parsed document into a canonical [`Analysis`].
    ///
    /// Labels are mapped leniently; unknown section labels are dropped,
    /// and documented defaults fill gaps (tempo estimated from length,
    /// energy curve "build", genre "Japanese Pop"). The result is not
    /// schema-validated here.
    pub fn to_analysis(&self) -> Analysis {
        let mut sections: Vec<Section> = self
            .structure
            .sections
            .iter()
            .filter_map(|label| Section::from_label(label))
            .collect();
        if sections.is_empty() {
            sections = FALLBACK_SECTIONS.to_vec();
        }

        let target_length = TargetLength::from_label(&self.structure.target_length);
        let density = &self.arrangement.density;

        let mut genre_tags: Vec<String> = self
            .arrangement
            .genre_tags
            .iter()
            .take(MAX_GENRE_TAGS)
            .cloned()
            .collect();
        if genre_tags.is_empty() {
            genre_tags.push(FALLBACK_GENRE.to_string());
        }

        let instruments: Vec<String> = self
            .arrangement
            .instruments
            .iter()
            .map(|entry| entry.instrument.clone())
            .collect();
        let ear_candy = self
            .arrangement
            .instruments
            .iter()
            .filter(|entry| EFFECT_PARTS.contains(&entry.part.as_str()))
            .map(|entry| entry.instrument.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let lyrics = &self.lyrics_design;

        Analysis {
            source_song: SourceSong {
                title: self.title.trim().to_string(),
                artist: non_empty(&self.artist),
            },
            core_type: self.core_type.clone(),
            music_structure: MusicStructure {
                target_length,
                tempo_bpm: self.tempo_bpm(target_length),
                key_mode: self.chord_progression.key_mode,
                energy_curve: Some(
                    self.structure
                        .energy_curve
                        .as_deref()
                        .map_or(EnergyCurve::Build, EnergyCurve::from_label),
                ),
                sections,
            },
            chord_progression: self.chord_progression(),
            arrangement: Arrangement {
                genre_tags,
                mood: None,
                center: instruments.first().cloned(),
                instruments: non_empty_vec(&instruments),
                rhythm: self.instrument_for(RHYTHM_PARTS),
                bass: self.instrument_for(BASS_PARTS),
                density: Some(DensityPlan {
                    verse: Some(Density::from_label(&density.verse)),
                    chorus: Some(Density::from_label(&density.chorus)),
                    r#final: Some(Density::from_label(&density.final_chorus)),
                }),
                dynamics: non_empty(&self.arrangement.design),
                ear_candy: non_empty(&ear_candy),
                texture: None,
            },
            lyrics_design: LyricsDesign {
                perspective: non_empty(&lyrics.perspective),
                emotion_expression: non_empty(&lyrics.emotion_handling),
                word_density: Some(WordDensity::from_label(&lyrics.word_density)),
                theme: non_empty_vec(&lyrics.themes),
                ..LyricsDesign::new(lyrics.language)
            },
            concept_keywords: non_empty_vec(&self.concept_keywords),
        }
    }
}
