//! Note command implementation
//!
//! Writes an article draft for an analysis to `<data>/notes/<slug>.md` and
//! prints its opening lines.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use songbrief_backend_suno::note::DEFAULT_PREVIEW_LINES;
use songbrief_backend_suno::{generate_note, note_preview};
use std::process::ExitCode;

use super::json_output::{input_error_to_json, load_warnings_to_json, CommandOutput};
use super::{print_load_warnings, resolve_input_path, write_text};
use crate::config::{extract_slug, Config};
use crate::input::load_analysis;

/// Note result details.
#[derive(Debug, Clone, Serialize)]
pub struct NoteResult {
    pub slug: String,
    pub path: String,
    pub preview: String,
}

/// Run the note command
///
/// # Returns
/// Exit code: 0 when the draft was written, 1 if the analysis failed to load
pub fn run(config: &Config, analysis: &str, json_output: bool) -> Result<ExitCode> {
    let analysis_path = resolve_input_path(config, analysis);

    if json_output {
        let loaded = match load_analysis(&analysis_path) {
            Ok(loaded) => loaded,
            Err(e) => {
                let error = input_error_to_json(&e, Some(analysis));
                CommandOutput::<NoteResult>::failure(vec![error], vec![]).print()?;
                return Ok(ExitCode::from(1));
            }
        };
        let slug = extract_slug(&analysis_path);
        let result = write_note(config, &slug, &generate_note(&loaded.analysis, &slug))?;
        CommandOutput::success(result, load_warnings_to_json(&loaded.warnings)).print()?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Writing note:".cyan().bold(), analysis);
    let loaded = load_analysis(&analysis_path)
        .with_context(|| format!("Failed to load analysis file: {}", analysis))?;
    print_load_warnings(&loaded.warnings);

    let slug = extract_slug(&analysis_path);
    let result = write_note(config, &slug, &generate_note(&loaded.analysis, &slug))?;

    println!("{}", "-".repeat(40).dimmed());
    println!("{}", result.preview);
    println!("{}", "-".repeat(40).dimmed());
    println!("\n{} Note written to {}", "SUCCESS".green().bold(), result.path);
    Ok(ExitCode::SUCCESS)
}

fn write_note(config: &Config, slug: &str, note: &str) -> Result<NoteResult> {
    let path = config.note_path(slug);
    write_text(&path, note)?;

    Ok(NoteResult {
        slug: slug.to_string(),
        path: path.display().to_string(),
        preview: note_preview(note, DEFAULT_PREVIEW_LINES),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYSIS: &str = r#"
source_song: { title: 夜に駆ける, artist: YOASOBI }
core_type: yoasobi
music_structure: { target_length: 4min, tempo_bpm: 130, key_mode: minor, sections: [Intro, Chorus] }
arrangement: { genre_tags: [J-Pop] }
lyrics_design: { language: ja }
"#;

    #[test]
    fn test_note_written_under_slug() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_sources(tmp.path().to_str(), None, None);
        let analysis = tmp.path().join("analysis").join("yoasobi_yoru.yaml");
        std::fs::create_dir_all(analysis.parent().unwrap()).unwrap();
        std::fs::write(&analysis, ANALYSIS).unwrap();

        // Relative to the data directory.
        let code = run(&config, "analysis/yoasobi_yoru.yaml", false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let note = std::fs::read_to_string(tmp.path().join("notes/yoasobi_yoru.md")).unwrap();
        assert!(note.starts_with("---\n"));
        assert!(note.contains("slug: yoasobi_yoru"));
        assert!(note.contains("「夜に駆ける」風の曲を作る"));
    }

    #[test]
    fn test_note_preview_is_bounded() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_sources(tmp.path().to_str(), None, None);
        let note = (1..=50).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");

        let result = write_note(&config, "x", &note).unwrap();
        assert_eq!(result.preview.lines().count(), DEFAULT_PREVIEW_LINES);
    }

    #[test]
    fn test_missing_analysis_json() {
        let config = Config::from_sources(Some("/nonexistent"), None, None);
        assert_eq!(run(&config, "missing.yaml", true).unwrap(), ExitCode::from(1));
    }
}
