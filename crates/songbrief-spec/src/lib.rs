//! SongBrief Canonical Analysis Library
//!
//! This crate provides the types, validation, and static tables behind
//! SongBrief song analyses. An analysis is a structured creative brief
//! (music structure, harmony, arrangement, lyrics design) that the
//! generators turn into prompts for an external music-generation service.
//!
//! # Overview
//!
//! An [`Analysis`] is produced in one of three ways:
//!
//! - **Structured input**: YAML or JSON, parsed and schema-validated by
//!   [`Analysis::from_yaml_str`] / [`Analysis::from_json_str`]
//! - **Markdown**: a semi-structured analysis document, read by
//!   [`markdown::parse_analysis_markdown`]
//! - **Synthesis**: a core-type preset plus user notes, via [`synth::synthesize`]
//!
//! # Example
//!
//! ```
//! use songbrief_spec::{Analysis, Section};
//! use songbrief_spec::structure::resolve_sections;
//!
//! let yaml = r#"
//! source_song: { title: Night Drive, artist: Example }
//! music_structure:
//!   target_length: 3min
//!   tempo_bpm: 95
//!   key_mode: major
//!   sections: [Intro, Chorus]
//! arrangement: { genre_tags: [Indie Pop] }
//! lyrics_design: { language: en }
//! "#;
//!
//! let analysis = Analysis::from_yaml_str(yaml).unwrap();
//! let sections = resolve_sections(
//!     &analysis.music_structure.sections,
//!     analysis.music_structure.target_length,
//! );
//! assert_eq!(sections.len(), 13);
//! assert_eq!(sections[10], Section::FinalChorus);
//! ```
//!
//! # Modules
//!
//! - [`analysis`]: The canonical analysis data model
//! - [`section`]: The closed section vocabulary
//! - [`error`]: Error and warning types for validation
//! - [`validation`]: Schema validation
//! - [`translate`]: Japanese to English term translation
//! - [`patterns`]: Core-type preset library
//! - [`structure`]: Section-structure resolution
//! - [`markdown`]: Markdown analysis parser
//! - [`synth`]: Core-type synthesis

pub mod analysis;
pub mod error;
pub mod markdown;
pub mod patterns;
pub mod section;
pub mod structure;
pub mod synth;
pub mod translate;
pub mod validation;

// Re-export commonly used types at the crate root
pub use analysis::{
    Analysis, Arrangement, ChordProgression, ChordSection, ChorusHookRule, Density, DensityPlan,
    EnergyCurve, KeyMode, Language, LyricsDesign, MusicStructure, Notation, SourceSong,
    TargetLength, VocalStyle, WordDensity,
};
pub use error::{
    ErrorCode, SpecError, StageError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use patterns::CoreTypePattern;
pub use section::Section;
pub use structure::resolve_sections;
pub use synth::{synthesize, SynthesisError, SynthesisOutcome, SynthesisRequest};
pub use translate::translate;
pub use validation::validate_analysis;
