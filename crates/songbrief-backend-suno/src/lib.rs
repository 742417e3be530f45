//! SongBrief Suno Backend - Prompt Artifact Generation
//!
//! This crate renders a validated [`songbrief_spec::Analysis`] into the text
//! artifacts a Suno session needs. Every generator is a pure function of the
//! analysis: no I/O, no clocks, no randomness, so the same analysis always
//! yields byte-identical artifacts.
//!
//! # Artifacts
//!
//! - **Title**: a short working title
//! - **Style**: labeled blocks (Genre, Style, Tempo, Harmony, ...) capped at
//!   1000 characters, or a compact single line
//! - **Lyrics**: a bracket-tagged direction sheet, one block per section
//! - **Image prompt**: a single comma-joined line for the thumbnail
//! - **Note**: a markdown article draft
//!
//! # Example
//!
//! ```
//! use songbrief_backend_suno::{generate_pack, validate_pack, PackOptions};
//! use songbrief_spec::Analysis;
//!
//! let analysis = Analysis::from_yaml_str(r#"
//! source_song: { title: 夜に駆ける, artist: YOASOBI }
//! music_structure: { tempo_bpm: 130, key_mode: minor, sections: [Intro, Chorus] }
//! arrangement: { genre_tags: [J-Pop] }
//! lyrics_design: { language: ja }
//! "#).unwrap();
//!
//! let pack = generate_pack(&analysis, &PackOptions::default());
//! let report = validate_pack(&pack.style, &pack.lyrics);
//! assert!(report.valid);
//! ```
//!
//! # Module Structure
//!
//! - [`style`]: Style prompt and compact style
//! - [`lyrics`]: Lyrics direction sheet and marker extraction
//! - [`image`]: Image prompt
//! - [`title`]: Working title
//! - [`note`]: Article draft
//! - [`pack`]: Pack assembly and manifest
//! - [`pack_validator`]: Artifact validation

pub mod image;
pub mod lyrics;
pub mod note;
pub mod pack;
pub mod pack_validator;
pub mod style;
pub mod title;

mod text;

// Re-export main types
pub use image::generate_image_prompt;
pub use lyrics::{count_sections, extract_sections, generate_lyrics, has_required_sections};
pub use note::{generate_note, note_preview};
pub use pack::{generate_pack, PackChecks, PackError, PackManifest, PackOptions, SunoPack};
pub use pack_validator::{validate_pack, PackValidation};
pub use style::{
    generate_compact_style, generate_style, is_style_within_limit, style_char_count,
    truncate_at_boundary, COMPACT_STYLE_CHAR_LIMIT, STYLE_CHAR_LIMIT,
};
pub use title::generate_title;

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend identifier recorded in pack manifests.
pub const BACKEND_ID: &str = "songbrief-backend-suno";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_backend_id() {
        assert_eq!(BACKEND_ID, "songbrief-backend-suno");
    }
}
