//! Core-type pattern library.
//!
//! A core type is a named bundle of stylistic defaults (tempo, chords,
//! arrangement, lyrics approach) abstracted from an artist's signature
//! sound. The registry is immutable static data.

use serde::Serialize;

use crate::analysis::{EnergyCurve, KeyMode, WordDensity};
use crate::section::Section;

/// Name of the preset returned by [`get`] for unknown names.
pub const DEFAULT_PATTERN: &str = "yorushika";

/// An immutable style preset.
#[derive(Debug, Clone, Serialize)]
pub struct CoreTypePattern {
    pub name: &'static str,
    pub description: &'static str,
    pub default_sections: &'static [Section],
    pub tempo: TempoRange,
    pub key_mode: KeyMode,
    pub energy_curve: EnergyCurve,
    pub chords: ChordPatterns,
    pub arrangement: ArrangementDefaults,
    pub lyrics: LyricsDefaults,
    pub typical_themes: &'static [&'static str],
    pub typical_keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TempoRange {
    pub min: f64,
    pub max: f64,
    pub typical: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChordPattern {
    pub feel: &'static str,
    /// Roman numeral notation.
    pub pattern: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChordPatterns {
    pub verse: ChordPattern,
    pub prechorus: ChordPattern,
    pub chorus: ChordPattern,
    pub bridge: ChordPattern,
}

/// Free-form density labels ("low", "medium-high", "very high").
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DensityLabels {
    pub verse: &'static str,
    pub chorus: &'static str,
    pub r#final: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArrangementDefaults {
    pub center: &'static str,
    pub rhythm: &'static str,
    pub bass: &'static str,
    pub density: DensityLabels,
    pub dynamics: &'static str,
    pub ear_candy: &'static str,
    pub genre_tags: &'static [&'static str],
    pub instruments: &'static [&'static str],
    pub mood: &'static [&'static str],
    pub texture: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LyricsDefaults {
    pub perspective: &'static str,
    pub scenery: &'static str,
    pub emotion_expression: &'static str,
    pub word_density: WordDensity,
    pub chorus_hook_rule: &'static [&'static str],
    pub vocal_gender: &'static str,
    pub vocal_range: &'static str,
    pub vocal_character: &'static [&'static str],
}

impl LyricsDefaults {
    pub fn has_hook_rule(&self, rule: &str) -> bool {
        self.chorus_hook_rule.contains(&rule)
    }
}

static PATTERNS: &[CoreTypePattern] = &[
    CoreTypePattern {
        name: "yorushika",
        description: "Literary J-Rock / alternative pop with restrained, nostalgic storytelling",
        default_sections: &[
            Section::Intro,
            Section::Verse1,
            Section::PreChorus,
            Section::Chorus,
            Section::PostChorus,
            Section::Verse2,
            Section::PreChorus,
            Section::Chorus,
            Section::Instrumental,
            Section::Bridge,
            Section::FinalChorus,
            Section::Outro,
        ],
        tempo: TempoRange {
            min: 80.0,
            max: 130.0,
            typical: 95.0,
        },
        key_mode: KeyMode::Major,
        energy_curve: EnergyCurve::Flat,
        chords: ChordPatterns {
            verse: ChordPattern {
                feel: "stable, gentle",
                pattern: "I - V - vi - IV",
            },
            prechorus: ChordPattern {
                feel: "slight lift",
                pattern: "IV - V - iii - vi",
            },
            chorus: ChordPattern {
                feel: "restrained lift",
                pattern: "I - V - IV - I",
            },
            bridge: ChordPattern {
                feel: "brief contrast",
                pattern: "vi - IV - I - V",
            },
        },
        arrangement: ArrangementDefaults {
            center: "acoustic guitar",
            rhythm: "light",
            bass: "minimal",
            density: DensityLabels {
                verse: "low",
                chorus: "medium",
                r#final: "medium",
            },
            dynamics: "restrained",
            ear_candy: "subtle string swells",
            genre_tags: &["J-Rock", "Alternative Pop"],
            instruments: &["acoustic guitar", "piano", "electric guitar", "strings"],
            mood: &["nostalgic", "wistful"],
            texture: "airy, organic band sound",
        },
        lyrics: LyricsDefaults {
            perspective: "first_person",
            scenery: "rich",
            emotion_expression: "indirect",
            word_density: WordDensity::Medium,
            chorus_hook_rule: &["repeat_short_phrase", "avoid_direct_emotion_words"],
            vocal_gender: "female",
            vocal_range: "mid",
            vocal_character: &["clear", "breathy"],
        },
        typical_themes: &["memory", "time", "distance", "youth", "seasons"],
        typical_keywords: &["夏", "空", "風", "光", "余韻", "窓", "夕暮れ"],
    },
    CoreTypePattern {
        name: "illit",
        description: "Cute, minimal K-Pop with airy synths and playful hooks",
        default_sections: &[
            Section::Intro,
            Section::Verse1,
            Section::PreChorus,
            Section::Chorus,
            Section::PostChorus,
            Section::Verse2,
            Section::PreChorus,
            Section::Chorus,
            Section::PostChorus,
            Section::Bridge,
            Section::FinalChorus,
            Section::FinalChorusRepeat,
            Section::Outro,
        ],
        tempo: TempoRange {
            min: 100.0,
            max: 130.0,
            typical: 115.0,
        },
        key_mode: KeyMode::Major,
        energy_curve: EnergyCurve::Wave,
        chords: ChordPatterns {
            verse: ChordPattern {
                feel: "airy, minimal",
                pattern: "I - V - vi - IV",
            },
            prechorus: ChordPattern {
                feel: "building tension",
                pattern: "IV - V - vi - I",
            },
            chorus: ChordPattern {
                feel: "catchy loop",
                pattern: "I - IV - vi - V",
            },
            bridge: ChordPattern {
                feel: "soft drop",
                pattern: "vi - IV - I - V",
            },
        },
        arrangement: ArrangementDefaults {
            center: "soft synth pads",
            rhythm: "minimal 808",
            bass: "soft sub bass",
            density: DensityLabels {
                verse: "low",
                chorus: "medium",
                r#final: "medium-high",
            },
            dynamics: "consistent groove",
            ear_candy: "sparkles, blips, whisper layers",
            genre_tags: &["K-Pop", "Pop"],
            instruments: &["synth pads", "808 drums", "sub bass", "plucks"],
            mood: &["playful", "dreamy"],
            texture: "clean, glossy and minimal",
        },
        lyrics: LyricsDefaults {
            perspective: "first_person",
            scenery: "minimal",
            emotion_expression: "direct but light",
            word_density: WordDensity::Low,
            chorus_hook_rule: &["ultra_catchy_phrase", "heavy_repetition", "onomatopoeia_welcome"],
            vocal_gender: "female",
            vocal_range: "mid-high",
            vocal_character: &["cute", "airy", "whispery"],
        },
        typical_themes: &["crush", "confidence", "playful mood"],
        typical_keywords: &["heart", "dream", "shine", "cute", "butterfly"],
    },
    CoreTypePattern {
        name: "yoasobi",
        description: "Storytelling J-Pop with fast piano riffs and dramatic builds",
        default_sections: &[
            Section::Intro,
            Section::Verse1,
            Section::PreChorus,
            Section::Chorus,
            Section::Verse2,
            Section::PreChorus,
            Section::Chorus,
            Section::Bridge,
            Section::Instrumental,
            Section::FinalChorus,
            Section::FinalChorusRepeat,
            Section::Outro,
        ],
        tempo: TempoRange {
            min: 120.0,
            max: 180.0,
            typical: 150.0,
        },
        key_mode: KeyMode::Minor,
        energy_curve: EnergyCurve::Build,
        chords: ChordPatterns {
            verse: ChordPattern {
                feel: "driving, tense",
                pattern: "i - VI - III - VII",
            },
            prechorus: ChordPattern {
                feel: "ascending",
                pattern: "iv - V - i - VII",
            },
            chorus: ChordPattern {
                feel: "explosive release",
                pattern: "i - VII - VI - V",
            },
            bridge: ChordPattern {
                feel: "dramatic shift",
                pattern: "VI - VII - i - V",
            },
        },
        arrangement: ArrangementDefaults {
            center: "piano + synth",
            rhythm: "driving electronic",
            bass: "punchy synth bass",
            density: DensityLabels {
                verse: "medium",
                chorus: "high",
                r#final: "very high",
            },
            dynamics: "dramatic builds",
            ear_candy: "piano runs, synth stabs",
            genre_tags: &["J-Pop", "Electronic Pop"],
            instruments: &["piano", "synth", "electronic drums", "synth bass"],
            mood: &["urgent", "cinematic"],
            texture: "bright, dense digital production",
        },
        lyrics: LyricsDefaults {
            perspective: "first_person",
            scenery: "narrative",
            emotion_expression: "dramatic",
            word_density: WordDensity::High,
            chorus_hook_rule: &["title_in_hook", "emotional_climax", "fast_syllables"],
            vocal_gender: "female",
            vocal_range: "high",
            vocal_character: &["clear", "agile"],
        },
        typical_themes: &["story", "fate", "night", "running", "dreams"],
        typical_keywords: &["夜", "走る", "光", "明日", "物語", "瞬間"],
    },
    CoreTypePattern {
        name: "aimyon",
        description: "Honest acoustic J-Pop with warm, conversational lyrics",
        default_sections: &[
            Section::Intro,
            Section::Verse1,
            Section::Verse2,
            Section::Chorus,
            Section::Verse1,
            Section::Verse2,
            Section::Chorus,
            Section::Bridge,
            Section::FinalChorus,
            Section::Outro,
        ],
        tempo: TempoRange {
            min: 70.0,
            max: 110.0,
            typical: 90.0,
        },
        key_mode: KeyMode::Major,
        energy_curve: EnergyCurve::Flat,
        chords: ChordPatterns {
            verse: ChordPattern {
                feel: "warm, stable",
                pattern: "I - V - vi - IV",
            },
            prechorus: ChordPattern {
                feel: "gentle lift",
                pattern: "IV - I - V - vi",
            },
            chorus: ChordPattern {
                feel: "emotional but grounded",
                pattern: "I - V - IV - I",
            },
            bridge: ChordPattern {
                feel: "brief reflection",
                pattern: "vi - IV - V - I",
            },
        },
        arrangement: ArrangementDefaults {
            center: "acoustic guitar",
            rhythm: "gentle strumming",
            bass: "warm, supportive",
            density: DensityLabels {
                verse: "low",
                chorus: "medium",
                r#final: "medium",
            },
            dynamics: "understated",
            ear_candy: "subtle piano fills",
            genre_tags: &["J-Pop", "Acoustic Pop"],
            instruments: &["acoustic guitar", "piano", "bass", "light drums"],
            mood: &["warm", "nostalgic"],
            texture: "intimate, unpolished live feel",
        },
        lyrics: LyricsDefaults {
            perspective: "first_person",
            scenery: "minimal",
            emotion_expression: "direct, honest",
            word_density: WordDensity::Medium,
            chorus_hook_rule: &["simple_phrase", "relatable_emotion", "no_excessive_drama"],
            vocal_gender: "female",
            vocal_range: "mid",
            vocal_character: &["warm", "natural"],
        },
        typical_themes: &["love", "everyday life", "nostalgia", "simple happiness"],
        typical_keywords: &["君", "愛", "日々", "心", "笑顔", "花"],
    },
    CoreTypePattern {
        name: "gurenka",
        description: "High-energy anime rock with explosive choruses",
        default_sections: &[
            Section::Intro,
            Section::Verse1,
            Section::PreChorus,
            Section::Chorus,
            Section::Verse2,
            Section::PreChorus,
            Section::Chorus,
            Section::Instrumental,
            Section::Bridge,
            Section::FinalChorus,
            Section::FinalChorusRepeat,
            Section::Outro,
        ],
        tempo: TempoRange {
            min: 140.0,
            max: 180.0,
            typical: 160.0,
        },
        key_mode: KeyMode::Minor,
        energy_curve: EnergyCurve::Build,
        chords: ChordPatterns {
            verse: ChordPattern {
                feel: "tension building",
                pattern: "i - VII - VI - VII",
            },
            prechorus: ChordPattern {
                feel: "ascending power",
                pattern: "VI - VII - i - V",
            },
            chorus: ChordPattern {
                feel: "explosive power",
                pattern: "i - VI - III - VII",
            },
            bridge: ChordPattern {
                feel: "emotional peak",
                pattern: "VI - VII - i",
            },
        },
        arrangement: ArrangementDefaults {
            center: "distorted guitar",
            rhythm: "driving rock drums",
            bass: "heavy, aggressive",
            density: DensityLabels {
                verse: "medium",
                chorus: "high",
                r#final: "very high",
            },
            dynamics: "explosive",
            ear_candy: "guitar riffs, drum fills",
            genre_tags: &["Anime Rock", "J-Rock"],
            instruments: &["distorted guitar", "rock drums", "bass", "strings"],
            mood: &["intense", "heroic"],
            texture: "wall of distorted guitars",
        },
        lyrics: LyricsDefaults {
            perspective: "first_person",
            scenery: "battle/struggle imagery",
            emotion_expression: "intense, passionate",
            word_density: WordDensity::High,
            chorus_hook_rule: &["powerful_declaration", "title_repetition", "screaming_ok"],
            vocal_gender: "female",
            vocal_range: "high",
            vocal_character: &["powerful", "raspy"],
        },
        typical_themes: &["battle", "determination", "fate", "fire", "strength"],
        typical_keywords: &["炎", "戦い", "運命", "強さ", "立ち上がる", "心"],
    },
    CoreTypePattern {
        name: "byoushin",
        description: "Melancholic vocaloid-style rock with anxious, confessional lyrics",
        default_sections: &[
            Section::Intro,
            Section::Verse1,
            Section::Verse2,
            Section::Chorus,
            Section::Verse1,
            Section::Verse2,
            Section::Chorus,
            Section::Instrumental,
            Section::Bridge,
            Section::FinalChorus,
            Section::Outro,
        ],
        tempo: TempoRange {
            min: 120.0,
            max: 160.0,
            typical: 140.0,
        },
        key_mode: KeyMode::Minor,
        energy_curve: EnergyCurve::Wave,
        chords: ChordPatterns {
            verse: ChordPattern {
                feel: "melancholic loop",
                pattern: "i - VI - III - VII",
            },
            prechorus: ChordPattern {
                feel: "building despair",
                pattern: "iv - V - i - VII",
            },
            chorus: ChordPattern {
                feel: "cathartic release",
                pattern: "i - VII - VI - VII",
            },
            bridge: ChordPattern {
                feel: "introspective",
                pattern: "VI - iv - V - i",
            },
        },
        arrangement: ArrangementDefaults {
            center: "clean/distorted guitar mix",
            rhythm: "syncopated, anxious",
            bass: "driving, dark",
            density: DensityLabels {
                verse: "medium",
                chorus: "high",
                r#final: "high",
            },
            dynamics: "emotional waves",
            ear_candy: "glitch effects, reverse sounds",
            genre_tags: &["Vocaloid Rock", "Alternative Rock"],
            instruments: &["electric guitar", "drums", "bass", "piano"],
            mood: &["melancholic", "anxious"],
            texture: "raw guitars with glitchy edges",
        },
        lyrics: LyricsDefaults {
            perspective: "first_person",
            scenery: "internal/abstract",
            emotion_expression: "raw, vulnerable",
            word_density: WordDensity::High,
            chorus_hook_rule: &["repetitive_phrase", "self_deprecating_ok", "ironic_tone"],
            vocal_gender: "androgynous",
            vocal_range: "mid-high",
            vocal_character: &["fragile", "emotional"],
        },
        typical_themes: &["anxiety", "self-doubt", "isolation", "irony", "longing"],
        typical_keywords: &["痛い", "消えたい", "嘘", "夜", "涙", "孤独"],
    },
];

/// Looks up a preset by exact name.
pub fn lookup(name: &str) -> Option<&'static CoreTypePattern> {
    PATTERNS.iter().find(|pattern| pattern.name == name)
}

/// Returns the named preset, or the default preset for unknown names.
///
/// Use [`lookup`] where an unknown name must be rejected.
pub fn get(name: &str) -> &'static CoreTypePattern {
    lookup(name).unwrap_or(&PATTERNS[0])
}

/// Registered preset names in registration order.
pub fn list() -> Vec<&'static str> {
    PATTERNS.iter().map(|pattern| pattern.name).collect()
}

/// All registered presets in registration order.
pub fn all() -> &'static [CoreTypePattern] {
    PATTERNS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_in_registration_order() {
        assert_eq!(
            list(),
            vec!["yorushika", "illit", "yoasobi", "aimyon", "gurenka", "byoushin"]
        );
    }

    #[test]
    fn test_default_pattern_is_first() {
        assert_eq!(PATTERNS[0].name, DEFAULT_PATTERN);
    }

    #[test]
    fn test_get_falls_back() {
        assert_eq!(get("illit").name, "illit");
        assert_eq!(get("nonexistent_style").name, DEFAULT_PATTERN);
        assert!(lookup("nonexistent_style").is_none());
    }

    #[test]
    fn test_presets_are_consistent() {
        for pattern in all() {
            assert!(!pattern.default_sections.is_empty(), "{}", pattern.name);
            assert!(pattern.tempo.min <= pattern.tempo.typical);
            assert!(pattern.tempo.typical <= pattern.tempo.max);
            let tags = pattern.arrangement.genre_tags.len();
            assert!((1..=4).contains(&tags), "{}", pattern.name);
        }
    }

    #[test]
    fn test_hook_rules() {
        assert!(get("yorushika").lyrics.has_hook_rule("repeat_short_phrase"));
        assert!(!get("illit").lyrics.has_hook_rule("avoid_direct_emotion_words"));
    }
}
