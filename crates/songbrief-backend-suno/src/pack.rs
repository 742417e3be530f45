//! Pack assembly: every artifact for one analysis, plus its manifest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use songbrief_spec::analysis::Analysis;
use songbrief_spec::error::StageError;
use thiserror::Error;

use crate::image::generate_image_prompt;
use crate::lyrics::generate_lyrics;
use crate::pack_validator::{validate_pack, PackValidation};
use crate::style::{
    generate_compact_style, generate_style, is_style_within_limit, style_char_count,
    COMPACT_STYLE_CHAR_LIMIT, STYLE_CHAR_LIMIT,
};
use crate::title::generate_title;

/// File names used when a pack is written to disk.
pub const TITLE_FILE: &str = "title.txt";
pub const STYLE_FILE: &str = "suno_style.txt";
pub const LYRICS_FILE: &str = "suno_lyrics.txt";
pub const IMAGE_PROMPT_FILE: &str = "image_prompt.txt";
pub const MANIFEST_FILE: &str = "pack.json";

/// Error type for pack serialization.
#[derive(Debug, Error)]
pub enum PackError {
    /// Manifest could not be encoded.
    #[error("failed to serialize pack manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl StageError for PackError {
    fn code(&self) -> &'static str {
        match self {
            PackError::Manifest(_) => "PACK_001",
        }
    }

    fn category(&self) -> &'static str {
        "pack"
    }
}

/// Options controlling which artifacts are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackOptions {
    pub include_image_prompt: bool,
    /// Emit the single-line compact style instead of the full prompt.
    pub compact_style: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            include_image_prompt: true,
            compact_style: false,
        }
    }
}

/// Style length summary carried with a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackChecks {
    pub style_chars: usize,
    /// Whether the style fits the limit of the variant that was generated.
    pub within_limit: bool,
}

/// The generated artifacts for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunoPack {
    pub title: String,
    pub style: String,
    pub lyrics: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    pub checks: PackChecks,
}

/// Generates every artifact for an analysis.
///
/// # Arguments
/// * `analysis` - The analysis to render
/// * `options` - Which variants to produce
///
/// # Example
/// ```
/// use songbrief_backend_suno::pack::{generate_pack, PackOptions};
/// use songbrief_spec::Analysis;
///
/// let analysis = Analysis::from_yaml_str(r#"
/// source_song: { title: Night Drive }
/// music_structure: { tempo_bpm: 95, key_mode: major, sections: [Intro] }
/// arrangement: { genre_tags: [Indie Pop] }
/// lyrics_design: { language: en }
/// "#).unwrap();
///
/// let pack = generate_pack(&analysis, &PackOptions::default());
/// assert!(pack.checks.within_limit);
/// assert!(pack.image_prompt.is_some());
/// ```
pub fn generate_pack(analysis: &Analysis, options: &PackOptions) -> SunoPack {
    let (style, limit) = if options.compact_style {
        (generate_compact_style(analysis), COMPACT_STYLE_CHAR_LIMIT)
    } else {
        (generate_style(analysis), STYLE_CHAR_LIMIT)
    };

    let checks = PackChecks {
        style_chars: style_char_count(&style),
        within_limit: is_style_within_limit(&style, limit),
    };

    SunoPack {
        title: generate_title(analysis),
        lyrics: generate_lyrics(analysis),
        image_prompt: options
            .include_image_prompt
            .then(|| generate_image_prompt(analysis)),
        style,
        checks,
    }
}

impl SunoPack {
    /// Artifact files in write order as (file name, contents).
    pub fn files(&self) -> Vec<(&'static str, &str)> {
        let mut files = vec![
            (TITLE_FILE, self.title.as_str()),
            (STYLE_FILE, self.style.as_str()),
            (LYRICS_FILE, self.lyrics.as_str()),
        ];
        if let Some(prompt) = &self.image_prompt {
            files.push((IMAGE_PROMPT_FILE, prompt.as_str()));
        }
        files
    }

    /// Validates the style and lyrics of this pack.
    pub fn validate(&self) -> PackValidation {
        validate_pack(&self.style, &self.lyrics)
    }

    /// Builds the manifest describing this pack.
    ///
    /// # Arguments
    /// * `slug` - Output directory name
    /// * `source_hash` - BLAKE3 hash of the analysis file, when known
    /// * `generated_at` - Generation timestamp
    pub fn manifest(
        &self,
        slug: &str,
        source_hash: Option<&str>,
        generated_at: DateTime<Utc>,
    ) -> PackManifest {
        PackManifest {
            slug: slug.to_string(),
            title: self.title.clone(),
            generator: format!("{}/{}", crate::BACKEND_ID, crate::VERSION),
            generated_at,
            source_hash: source_hash.map(str::to_string),
            files: self.files().into_iter().map(|(name, _)| name.to_string()).collect(),
            checks: self.checks,
            validation: self.validate(),
        }
    }
}

/// Provenance and check results written next to the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackManifest {
    pub slug: String,
    pub title: String,
    /// Backend name and version that produced the artifacts.
    pub generator: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    pub files: Vec<String>,
    pub checks: PackChecks,
    pub validation: PackValidation,
}

impl PackManifest {
    /// Serializes the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, PackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
