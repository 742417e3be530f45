//! The canonical song analysis (creative brief).

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::section::Section;
use crate::validation::validate_analysis;

/// Minimum accepted tempo in BPM.
pub const MIN_TEMPO_BPM: f64 = 40.0;

/// Maximum accepted tempo in BPM.
pub const MAX_TEMPO_BPM: f64 = 300.0;

/// Maximum number of genre tags.
pub const MAX_GENRE_TAGS: usize = 4;

/// The structured brief consumed by every generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Analysis {
    /// Provenance of the reference song.
    pub source_song: SourceSong,

    /// Pattern library preset used to seed defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_type: Option<String>,

    pub music_structure: MusicStructure,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord_progression: Option<ChordProgression>,

    pub arrangement: Arrangement,

    pub lyrics_design: LyricsDesign,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_keywords: Option<Vec<String>>,
}

impl Analysis {
    /// Parses an analysis from YAML and validates it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SpecError> {
        let analysis: Analysis = serde_yaml::from_str(yaml)?;
        analysis.validated()
    }

    /// Parses an analysis from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, SpecError> {
        let analysis: Analysis = serde_json::from_str(json)?;
        analysis.validated()
    }

    /// Serializes the analysis to YAML.
    pub fn to_yaml(&self) -> Result<String, SpecError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serializes the analysis to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validated(self) -> Result<Self, SpecError> {
        let result = validate_analysis(&self);
        if result.is_ok() {
            Ok(self)
        } else {
            Err(SpecError::Invalid {
                errors: result.errors,
            })
        }
    }

    /// Concept keywords, or an empty slice.
    pub fn keywords(&self) -> &[String] {
        self.concept_keywords.as_deref().unwrap_or(&[])
    }
}

/// Reference song metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSong {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Tempo, key, energy and section layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MusicStructure {
    #[serde(default)]
    pub target_length: TargetLength,
    /// Tempo in BPM (40-300).
    pub tempo_bpm: f64,
    pub key_mode: KeyMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_curve: Option<EnergyCurve>,
    /// Ordered section sequence; order is musically meaningful.
    pub sections: Vec<Section>,
}

/// Target song length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetLength {
    #[default]
    #[serde(rename = "3min")]
    ThreeMinutes,
    #[serde(rename = "4min")]
    FourMinutes,
    #[serde(rename = "5min")]
    FiveMinutes,
}

impl TargetLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLength::ThreeMinutes => "3min",
            TargetLength::FourMinutes => "4min",
            TargetLength::FiveMinutes => "5min",
        }
    }

    pub fn minutes(&self) -> u8 {
        match self {
            TargetLength::ThreeMinutes => 3,
            TargetLength::FourMinutes => 4,
            TargetLength::FiveMinutes => 5,
        }
    }

    /// Lenient mapping of a free-form length ("~3:00", "4 minutes", "5min").
    ///
    /// Only the leading minute digit counts, so "~3:50" stays 3min.
    pub fn from_label(label: &str) -> TargetLength {
        match label.chars().find(char::is_ascii_digit) {
            Some('5') => TargetLength::FiveMinutes,
            Some('4') => TargetLength::FourMinutes,
            _ => TargetLength::ThreeMinutes,
        }
    }
}

impl std::fmt::Display for TargetLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TargetLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3min" => Ok(TargetLength::ThreeMinutes),
            "4min" => Ok(TargetLength::FourMinutes),
            "5min" => Ok(TargetLength::FiveMinutes),
            _ => Err(format!(
                "unknown target length: {} (expected 3min, 4min, or 5min)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    Major,
    Minor,
}

impl KeyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMode::Major => "major",
            KeyMode::Minor => "minor",
        }
    }
}

/// Overall energy shape of the song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyCurve {
    Flat,
    Build,
    Wave,
}

impl EnergyCurve {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyCurve::Flat => "flat",
            EnergyCurve::Build => "build",
            EnergyCurve::Wave => "wave",
        }
    }

    /// Lenient mapping; anything that is neither flat nor build reads as a wave.
    pub fn from_label(label: &str) -> EnergyCurve {
        let lower = label.to_lowercase();
        if lower.contains("flat") || lower.contains("一定") {
            EnergyCurve::Flat
        } else if lower.contains("build") || lower.contains("上昇") {
            EnergyCurve::Build
        } else {
            EnergyCurve::Wave
        }
    }
}

/// Chord notation used in `ChordSection::pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    #[default]
    RomanNumerals,
    ChordNames,
}

/// Per-section chord progressions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChordProgression {
    #[serde(default)]
    pub notation: Notation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<ChordSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prechorus: Option<ChordSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chorus: Option<ChordSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<ChordSection>,
}

impl ChordProgression {
    /// Labeled sections in render order, skipping the absent ones.
    pub fn labeled_sections(&self) -> Vec<(&'static str, &ChordSection)> {
        [
            ("Verse", self.verse.as_ref()),
            ("Pre-Chorus", self.prechorus.as_ref()),
            ("Chorus", self.chorus.as_ref()),
            ("Bridge", self.bridge.as_ref()),
        ]
        .into_iter()
        .filter_map(|(label, section)| section.map(|s| (label, s)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChordSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Instrumentation and production notes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Arrangement {
    /// 1 to 4 genre tags.
    pub genre_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Vec<String>>,
    /// The lead instrument the arrangement is built around.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhythm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<DensityPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ear_candy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

/// Arrangement density for the verse, chorus and final chorus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DensityPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<Density>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chorus: Option<Density>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#final: Option<Density>,
}

impl DensityPlan {
    pub fn is_empty(&self) -> bool {
        self.verse.is_none() && self.chorus.is_none() && self.r#final.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Sparse,
    Medium,
    Dense,
}

impl Density {
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Sparse => "sparse",
            Density::Medium => "medium",
            Density::Dense => "dense",
        }
    }

    /// Lenient mapping of labels like "low", "very high", "高密度", "medium-high".
    pub fn from_label(label: &str) -> Density {
        let lower = label.to_lowercase();
        if lower.contains('低') || lower.contains("low") || lower.contains("sparse") {
            Density::Sparse
        } else if lower.contains('高')
            || lower.contains("high")
            || lower.contains("dense")
            || lower.contains("最高")
        {
            Density::Dense
        } else {
            Density::Medium
        }
    }
}

/// Lyrics language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Ja,
    En,
    Mixed,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
            Language::Mixed => "mixed",
        }
    }

    /// English name used in prompts.
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::Ja => "Japanese",
            Language::En => "English",
            Language::Mixed => "Japanese-English",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ja" => Ok(Language::Ja),
            "en" => Ok(Language::En),
            "mixed" => Ok(Language::Mixed),
            _ => Err(format!("unknown language: {} (expected ja, en, or mixed)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordDensity {
    Low,
    Medium,
    High,
}

impl WordDensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordDensity::Low => "low",
            WordDensity::Medium => "medium",
            WordDensity::High => "high",
        }
    }

    /// Target number of lines for a verse at this density.
    pub fn verse_lines(&self) -> usize {
        match self {
            WordDensity::Low => 3,
            WordDensity::Medium => 4,
            WordDensity::High => 6,
        }
    }

    pub fn from_label(label: &str) -> WordDensity {
        let lower = label.to_lowercase();
        if lower.contains('高') || lower.contains("high") {
            WordDensity::High
        } else if lower.contains('低') || lower.contains("low") {
            WordDensity::Low
        } else {
            WordDensity::Medium
        }
    }
}

/// Lyrics writing brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LyricsDesign {
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_density: Option<WordDensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chorus_hook_rule: Option<ChorusHookRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocal_style: Option<VocalStyle>,
}

impl LyricsDesign {
    /// A design with only the language set.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            perspective: None,
            scenery: None,
            emotion_expression: None,
            word_density: None,
            theme: None,
            chorus_hook_rule: None,
            vocal_style: None,
        }
    }

    /// Word density, defaulting to medium.
    pub fn word_density_or_default(&self) -> WordDensity {
        self.word_density.unwrap_or(WordDensity::Medium)
    }

    pub fn themes(&self) -> &[String] {
        self.theme.as_deref().unwrap_or(&[])
    }

    pub fn repeat_short_phrase(&self) -> bool {
        self.chorus_hook_rule
            .and_then(|rule| rule.repeat_short_phrase)
            .unwrap_or(false)
    }

    pub fn avoid_direct_emotion_words(&self) -> bool {
        self.chorus_hook_rule
            .and_then(|rule| rule.avoid_direct_emotion_words)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChorusHookRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_short_phrase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid_direct_emotion_words: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocalStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub techniques: Option<Vec<String>>,
}

impl VocalStyle {
    pub fn is_empty(&self) -> bool {
        self.gender.is_none()
            && self.range.is_none()
            && self.character.as_ref().map_or(true, Vec::is_empty)
            && self.techniques.as_ref().map_or(true, Vec::is_empty)
    }
}
