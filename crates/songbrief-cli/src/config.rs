//! Data directory configuration.
//!
//! Every command reads and writes under a single data directory:
//!
//! ```text
//! <data>/
//!   analysis/<slug>.yaml | <slug>.md
//!   outputs/<slug>/title.txt, suno_style.txt, ...
//!   notes/<slug>.md
//! ```
//!
//! The directory is resolved from, in order: the `--data-dir` flag, the
//! `SONGBRIEF_DATA_PATH` environment variable, the `DATA_PATH` environment
//! variable, and finally `./data`.

use std::path::{Path, PathBuf};

/// Primary environment variable naming the data directory.
pub const DATA_PATH_ENV: &str = "SONGBRIEF_DATA_PATH";

/// Fallback environment variable, shared with other tooling.
pub const LEGACY_DATA_PATH_ENV: &str = "DATA_PATH";

/// Data directory used when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "./data";

pub const ANALYSIS_DIR: &str = "analysis";
pub const OUTPUTS_DIR: &str = "outputs";
pub const NOTES_DIR: &str = "notes";

/// Extensions stripped by [`extract_slug`].
const SLUG_EXTENSIONS: &[&str] = &["yaml", "yml", "json", "md"];

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Config {
    /// Resolves the configuration from the flag and the process environment.
    pub fn resolve(data_dir: Option<&str>) -> Self {
        let primary = std::env::var(DATA_PATH_ENV).ok();
        let legacy = std::env::var(LEGACY_DATA_PATH_ENV).ok();
        Self::from_sources(data_dir, primary.as_deref(), legacy.as_deref())
    }

    /// Resolves the configuration from explicit sources, first non-empty wins.
    pub fn from_sources(flag: Option<&str>, primary: Option<&str>, legacy: Option<&str>) -> Self {
        let data_path = [flag, primary, legacy]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_DATA_PATH);

        Self {
            data_path: PathBuf::from(data_path),
        }
    }

    /// Directory holding the analysis files.
    pub fn analysis_dir(&self) -> PathBuf {
        resolve_data_path(self, &[ANALYSIS_DIR])
    }

    /// Output directory for one slug's pack.
    pub fn output_dir(&self, slug: &str) -> PathBuf {
        resolve_data_path(self, &[OUTPUTS_DIR, slug])
    }

    /// Path of the note article for a slug.
    pub fn note_path(&self, slug: &str) -> PathBuf {
        resolve_data_path(self, &[NOTES_DIR, &format!("{}.md", slug)])
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

/// Joins path components under the data directory.
///
/// # Example
/// ```
/// use songbrief_cli::config::{resolve_data_path, Config};
///
/// let config = Config::from_sources(Some("/tmp/songs"), None, None);
/// let path = resolve_data_path(&config, &["outputs", "yoasobi_idol"]);
/// assert_eq!(path.to_str(), Some("/tmp/songs/outputs/yoasobi_idol"));
/// ```
pub fn resolve_data_path(config: &Config, parts: &[&str]) -> PathBuf {
    parts
        .iter()
        .fold(config.data_path.clone(), |path, part| path.join(part))
}

/// Derives a slug from an analysis file name.
///
/// Strips the directory and one known extension (`.yaml`, `.yml`, `.json`,
/// `.md`); any other name is returned whole.
pub fn extract_slug(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if SLUG_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name)
            .to_string(),
        _ => file_name.to_string(),
    }
}
