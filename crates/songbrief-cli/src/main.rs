//! SongBrief CLI - Suno prompt packs from song analyses
//!
//! This binary provides commands for turning song analyses into Suno
//! prompt artifacts, validating generated packs, and managing analysis
//! files under the data directory.

use clap::{Parser, Subcommand};
use songbrief_spec::{Language, TargetLength};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

// Use modules from the library crate
use songbrief_cli::commands;
use songbrief_cli::config::Config;

/// Environment variable holding the log filter directives.
const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// SongBrief - Song Analysis to Suno Prompt Generator
#[derive(Parser)]
#[command(name = "songbrief")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Data directory (default: $SONGBRIEF_DATA_PATH, $DATA_PATH, or ./data)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Suno pack (title, style, lyrics, image prompt) from an analysis
    Generate {
        /// Path to the analysis file (.md, .yaml, or .json)
        #[arg(short, long)]
        analysis: String,

        /// Output directory (default: <data>/outputs/<slug>)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Skip the image prompt
        #[arg(long)]
        no_image: bool,

        /// Write the compact single-line style instead of the full prompt
        #[arg(long)]
        compact: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate the style and lyrics files of a generated pack
    Validate {
        /// Pack directory, or a slug under <data>/outputs
        #[arg(short, long)]
        dir: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Synthesize an analysis from a core-type preset
    Analyze {
        /// Reference song title
        #[arg(long)]
        title: String,

        /// Reference song artist
        #[arg(long)]
        artist: String,

        /// Core-type preset (see `songbrief patterns`)
        #[arg(long)]
        core_type: String,

        /// Target length (3min, 4min, or 5min)
        #[arg(long, default_value = "3min")]
        target_length: TargetLength,

        /// Genre tag overriding the preset (repeatable)
        #[arg(long)]
        genre: Vec<String>,

        /// Free-form notes ("slow ballad", "短い", keywords)
        #[arg(long)]
        notes: Option<String>,

        /// Lyrics language (ja, en, or mixed)
        #[arg(long)]
        language: Option<Language>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Save a markdown analysis to <data>/analysis/<slug>.md
    Save {
        /// File name without extension (lowercase, digits, '_' or '-')
        #[arg(short, long)]
        slug: String,

        /// Path to the markdown analysis
        #[arg(short, long)]
        markdown: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Parse a markdown analysis and show the converted analysis
    Parse {
        /// Path to the markdown analysis
        #[arg(short, long)]
        markdown: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write an article draft for an analysis to <data>/notes/<slug>.md
    Note {
        /// Path to the analysis file (.md, .yaml, or .json)
        #[arg(short, long)]
        analysis: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the available core-type presets
    Patterns {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    // Logs go to stderr so stdout stays parseable in --json mode.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var(LOG_LEVEL_ENV)
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir.as_deref());

    let result = match cli.command {
        Commands::Generate {
            analysis,
            out_dir,
            no_image,
            compact,
            json,
        } => commands::generate::run(
            &config,
            &commands::generate::GenerateArgs {
                analysis,
                out_dir,
                no_image,
                compact,
            },
            json,
        ),
        Commands::Validate { dir, json } => commands::validate::run(&config, &dir, json),
        Commands::Analyze {
            title,
            artist,
            core_type,
            target_length,
            genre,
            notes,
            language,
            json,
        } => commands::analyze::run(
            &config,
            &commands::analyze::AnalyzeArgs {
                title,
                artist,
                core_type,
                target_length,
                genre,
                notes,
                language,
            },
            json,
        ),
        Commands::Save {
            slug,
            markdown,
            json,
        } => commands::save::run(&config, &slug, &markdown, json),
        Commands::Parse { markdown, json } => commands::parse::run(&markdown, json),
        Commands::Note { analysis, json } => commands::note::run(&config, &analysis, json),
        Commands::Patterns { json } => commands::patterns::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
