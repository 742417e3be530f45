//! CLI command implementations

pub mod analyze;
pub mod generate;
pub mod json_output;
pub mod note;
pub mod parse;
pub mod patterns;
pub mod save;
pub mod validate;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::input::LoadWarning;

/// Resolves a user-supplied input path.
///
/// Paths that exist as given are used directly; otherwise the path is
/// taken relative to the data directory (`analysis/x.md` finds
/// `<data>/analysis/x.md`).
pub fn resolve_input_path(config: &Config, path: &str) -> PathBuf {
    let direct = PathBuf::from(path);
    if direct.exists() || direct.is_absolute() {
        return direct;
    }
    let under_data = config.data_path.join(path);
    if under_data.exists() {
        under_data
    } else {
        direct
    }
}

/// Writes a text file, creating parent directories as needed.
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Prints load warnings in the shared human format.
pub(crate) fn print_load_warnings(warnings: &[LoadWarning]) {
    for warning in warnings {
        let location = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [load]{}: {}",
            "!".yellow(),
            location.dimmed(),
            warning.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_input_path_prefers_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_sources(tmp.path().to_str(), None, None);
        std::fs::create_dir_all(tmp.path().join("analysis")).unwrap();
        std::fs::write(tmp.path().join("analysis/a.yaml"), "x").unwrap();

        let resolved = resolve_input_path(&config, "analysis/a.yaml");
        assert_eq!(resolved, tmp.path().join("analysis/a.yaml"));

        let missing = resolve_input_path(&config, "analysis/missing.yaml");
        assert_eq!(missing, PathBuf::from("analysis/missing.yaml"));
    }

    #[test]
    fn test_write_text_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("outputs/slug/title.txt");
        write_text(&path, "夜").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "夜");
    }
}
