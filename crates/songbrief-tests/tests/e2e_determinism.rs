//! Determinism tests for every generator and for packs written by the CLI.

use std::process::ExitCode;

use songbrief_backend_suno::pack::{IMAGE_PROMPT_FILE, LYRICS_FILE, STYLE_FILE, TITLE_FILE};
use songbrief_backend_suno::{
    generate_compact_style, generate_image_prompt, generate_lyrics, generate_note,
    generate_style, generate_title,
};
use songbrief_cli::commands::generate::{self, GenerateArgs};
use songbrief_spec::markdown::parse_analysis_markdown;
use songbrief_tests::determinism::verify_determinism;
use songbrief_tests::fixtures::{full_analysis, DataDirFixture, FULL_MARKDOWN, FULL_YAML};
use songbrief_tests::test_determinism;

// =============================================================================
// Generators
// =============================================================================

test_determinism!(style_full_analysis, generate_style(&full_analysis()));

test_determinism!(compact_style_full_analysis, generate_compact_style(&full_analysis()));

test_determinism!(lyrics_full_analysis, runs = 5, generate_lyrics(&full_analysis()));

test_determinism!(image_prompt_full_analysis, generate_image_prompt(&full_analysis()));

test_determinism!(title_full_analysis, generate_title(&full_analysis()));

test_determinism!(note_full_analysis, generate_note(&full_analysis(), "yoasobi_yoru"));

test_determinism!(
    markdown_to_lyrics,
    generate_lyrics(&parse_analysis_markdown(FULL_MARKDOWN).to_analysis())
);

#[test]
fn test_style_hash_is_stable_across_runs() {
    let analysis = full_analysis();
    let first = verify_determinism(|| generate_style(&analysis), 3);
    let second = verify_determinism(|| generate_style(&analysis), 3);
    assert!(first.is_deterministic);
    assert_eq!(first.hash, second.hash);
}

// =============================================================================
// Written packs
// =============================================================================

fn generate_into(fixture: &DataDirFixture, analysis: &str, out_dir: &str) {
    let args = GenerateArgs {
        analysis: analysis.to_string(),
        out_dir: Some(fixture.path().join(out_dir).display().to_string()),
        no_image: false,
        compact: false,
    };
    let code = generate::run(&fixture.config, &args, true).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_written_artifacts_are_byte_identical() {
    let fixture = DataDirFixture::new();
    fixture.add_analysis("yoasobi_yoru.yaml", FULL_YAML);
    fixture.add_analysis("yoasobi_idol.md", FULL_MARKDOWN);

    for source in ["analysis/yoasobi_yoru.yaml", "analysis/yoasobi_idol.md"] {
        generate_into(&fixture, source, "first");
        generate_into(&fixture, source, "second");

        // The manifest carries a timestamp; the artifacts must not differ.
        for file in [TITLE_FILE, STYLE_FILE, LYRICS_FILE, IMAGE_PROMPT_FILE] {
            assert_eq!(
                fixture.read(&format!("first/{}", file)),
                fixture.read(&format!("second/{}", file)),
                "{} differs for {}",
                file,
                source
            );
        }
    }
}
