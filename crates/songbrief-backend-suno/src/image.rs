//! Thumbnail image prompt generation.

use songbrief_spec::analysis::{Analysis, EnergyCurve};
use songbrief_spec::translate::{translate, translate_concept_keywords, translate_dynamics};

/// Output requirements every thumbnail prompt starts with.
const CONSTRAINTS: &[&str] = &["16:9 aspect ratio", "no text", "no typography", "no letters"];

/// Art-style descriptors every thumbnail prompt ends with.
const CLOSING_DESCRIPTORS: &[&str] = &[
    "anime-inspired illustration style",
    "high quality digital art",
    "cinematic composition",
];

const DEFAULT_GENRE_STYLE: &str = "soft ambient lighting, aesthetic composition";

/// Theme keywords (either language, matched case-insensitively) and the
/// visual motifs they contribute.
const THEME_MOTIFS: &[(&[&str], &[&str])] = &[
    (&["夏", "summer"], &["summer sky", "golden sunlight"]),
    (&["夜", "night"], &["starry night", "moonlight"]),
    (
        &["記憶", "memory", "memories"],
        &["faded photograph effect", "nostalgic atmosphere"],
    ),
    (
        &["別れ", "farewell"],
        &["distant silhouette", "melancholic mood"],
    ),
    (&["恋", "love"], &["warm colors", "soft bokeh"]),
    (&["雨", "rain"], &["rain-soaked streets", "reflections on wet pavement"]),
    (&["海", "sea", "ocean"], &["endless horizon", "sea breeze"]),
    (&["桜", "sakura", "cherry blossom"], &["falling petals", "spring light"]),
    (&["空", "sky"], &["vast open sky", "drifting clouds"]),
    (&["夢", "dream"], &["surreal haze", "floating particles"]),
];

/// Generates the single-line image prompt.
///
/// # Arguments
/// * `analysis` - The analysis to render
///
/// # Returns
/// Comma-joined visual descriptors in a fixed order: constraints, genre
/// style, atmosphere, mood, concept keywords, theme motifs, scenery,
/// energy composition, closing descriptors.
pub fn generate_image_prompt(analysis: &Analysis) -> String {
    let arrangement = &analysis.arrangement;
    let lyrics = &analysis.lyrics_design;
    let mut parts: Vec<String> = CONSTRAINTS.iter().map(|s| s.to_string()).collect();

    parts.push(genre_visual_style(&arrangement.genre_tags).to_string());

    if let Some(dynamics) = &arrangement.dynamics {
        parts.push(format!(
            "{} atmosphere",
            translate_dynamics(dynamics).to_lowercase()
        ));
    }
    if let Some(mood) = &arrangement.mood {
        parts.extend(mood.iter().map(|m| translate(m)));
    }
    parts.extend(translate_concept_keywords(analysis.keywords()));
    parts.extend(theme_motifs(lyrics.themes()).into_iter().map(str::to_string));
    if let Some(scenery) = &lyrics.scenery {
        parts.push(translate(scenery));
    }
    parts.push(energy_composition(analysis.music_structure.energy_curve).to_string());
    parts.extend(CLOSING_DESCRIPTORS.iter().map(|s| s.to_string()));

    parts
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Visual style phrase keyed on genre tags.
pub fn genre_visual_style(genre_tags: &[String]) -> &'static str {
    let genres = genre_tags.join(" ").to_lowercase();

    if genres.contains("rock") || genres.contains("alternative") {
        "urban nightscape, city lights, moody lighting"
    } else if genres.contains("k-pop") {
        "bright pastel colors, modern aesthetic, soft glow"
    } else if genres.contains("indie") {
        "nostalgic film grain, warm tones, golden hour light"
    } else if genres.contains("ballad") {
        "soft focus, dreamy atmosphere, ethereal light"
    } else {
        DEFAULT_GENRE_STYLE
    }
}

/// Motifs for every theme match, in table order per theme, without repeats.
pub fn theme_motifs(themes: &[String]) -> Vec<&'static str> {
    let mut motifs: Vec<&'static str> = Vec::new();
    for theme in themes {
        let theme = theme.to_lowercase();
        for (keys, visuals) in THEME_MOTIFS {
            if keys.iter().any(|key| theme.contains(key)) {
                for visual in visuals.iter() {
                    if !motifs.contains(visual) {
                        motifs.push(*visual);
                    }
                }
            }
        }
    }
    motifs
}

fn energy_composition(energy: Option<EnergyCurve>) -> &'static str {
    match energy {
        Some(EnergyCurve::Build) => "dynamic composition, ascending perspective",
        Some(EnergyCurve::Wave) => "flowing movement, rhythmic patterns",
        Some(EnergyCurve::Flat) | None => "calm serene atmosphere, balanced composition",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use songbrief_spec::analysis::{
        Arrangement, KeyMode, Language, LyricsDesign, MusicStructure, SourceSong, TargetLength,
    };
    use songbrief_spec::Section;

    fn analysis() -> Analysis {
        Analysis {
            source_song: SourceSong {
                title: "Farewell Summer".into(),
                artist: None,
            },
            core_type: None,
            music_structure: MusicStructure {
                target_length: TargetLength::ThreeMinutes,
                tempo_bpm: 90.0,
                key_mode: KeyMode::Minor,
                energy_curve: Some(EnergyCurve::Build),
                sections: vec![Section::Verse1],
            },
            chord_progression: None,
            arrangement: Arrangement {
                genre_tags: vec!["Indie Rock".into()],
                dynamics: Some("激しい".into()),
                ..Default::default()
            },
            lyrics_design: LyricsDesign {
                theme: Some(vec!["夏の記憶".into(), "Summer night".into()]),
                scenery: Some("夕暮れの海".into()),
                ..LyricsDesign::new(Language::Ja)
            },
            concept_keywords: Some(vec!["光".into(), "Neon".into()]),
        }
    }

    #[test]
    fn test_prompt_order() {
        let prompt = generate_image_prompt(&analysis());
        assert!(prompt.starts_with("16:9 aspect ratio, no text, no typography, no letters, "));
        assert!(prompt.ends_with(
            "anime-inspired illustration style, high quality digital art, cinematic composition"
        ));
        let genre = prompt.find("urban nightscape").unwrap();
        let atmosphere = prompt.find("intense atmosphere").unwrap();
        let keyword = prompt.find("radiant light").unwrap();
        let motif = prompt.find("summer sky").unwrap();
        let scenery = prompt.find("dusk of sea").unwrap();
        let energy = prompt.find("ascending perspective").unwrap();
        assert!(genre < atmosphere && atmosphere < keyword && keyword < motif);
        assert!(motif < scenery && scenery < energy);
        assert!(!prompt.contains('\n'));
    }

    #[test]
    fn test_genre_visual_style() {
        let tags = |t: &[&str]| t.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            genre_visual_style(&tags(&["Alternative"])),
            "urban nightscape, city lights, moody lighting"
        );
        assert_eq!(
            genre_visual_style(&tags(&["K-Pop", "Dance"])),
            "bright pastel colors, modern aesthetic, soft glow"
        );
        assert_eq!(
            genre_visual_style(&tags(&["Indie Pop"])),
            "nostalgic film grain, warm tones, golden hour light"
        );
        assert_eq!(
            genre_visual_style(&tags(&["Piano Ballad"])),
            "soft focus, dreamy atmosphere, ethereal light"
        );
        assert_eq!(genre_visual_style(&tags(&["J-Pop"])), DEFAULT_GENRE_STYLE);
    }

    #[test]
    fn test_theme_motifs_accumulate_without_duplicates() {
        let themes = vec!["夏の記憶".to_string(), "Summer night".to_string()];
        assert_eq!(
            theme_motifs(&themes),
            vec![
                "summer sky",
                "golden sunlight",
                "faded photograph effect",
                "nostalgic atmosphere",
                "starry night",
                "moonlight",
            ]
        );
        assert!(theme_motifs(&["unrelated".to_string()]).is_empty());
    }

    #[test]
    fn test_energy_composition_default() {
        let mut analysis = analysis();
        analysis.music_structure.energy_curve = None;
        let prompt = generate_image_prompt(&analysis);
        assert!(prompt.contains("calm serene atmosphere, balanced composition"));
    }
}
