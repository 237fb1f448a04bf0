//! Arena map development tools.

use std::path::{Path, PathBuf};

use arena_core::map_generation::{generate_map, MapConfig};
use arena_tools::preview::{describe, render_ascii, spawn_sequence, MapSummary};
use arena_tools::validate::{load_catalog, validate_preset_file};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "arena-tools")]
#[command(about = "Development tools for arena map generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a RON preset file
    Validate {
        /// Path to the preset file
        #[arg(default_value = "assets/maps/presets.ron")]
        path: PathBuf,
    },

    /// Generate a map and print it
    Generate {
        /// Preset file to read (built-in default map when omitted)
        #[arg(short, long)]
        presets: Option<PathBuf>,

        /// Preset index (defaults to the file's selection)
        #[arg(short, long)]
        index: Option<usize>,

        /// Override the preset seed
        #[arg(short, long, allow_negative_numbers = true)]
        seed: Option<i64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "ascii")]
        format: OutputFormat,
    },

    /// Print the first spawn tiles of a map
    Spawns {
        /// Preset file to read (built-in default map when omitted)
        #[arg(short, long)]
        presets: Option<PathBuf>,

        /// Preset index (defaults to the file's selection)
        #[arg(short, long)]
        index: Option<usize>,

        /// Number of spawn tiles to draw
        #[arg(short, long, default_value = "10")]
        count: usize,
    },
}

fn resolve_config(presets: Option<&Path>, index: Option<usize>) -> arena_tools::Result<MapConfig> {
    let Some(path) = presets else {
        return Ok(MapConfig::default());
    };
    let mut catalog = load_catalog(path)?;
    if let Some(index) = index {
        catalog.select(index)?;
    }
    let preset = catalog.selected()?;
    tracing::info!(preset = %preset.name, "Using preset");
    Ok(preset.config.clone())
}

fn run(command: Commands) -> arena_tools::Result<()> {
    match command {
        Commands::Validate { path } => {
            tracing::info!("Validating presets in: {}", path.display());
            for report in validate_preset_file(&path)? {
                println!("{report}");
            }
            tracing::info!("Validation passed");
        }
        Commands::Generate {
            presets,
            index,
            seed,
            format,
        } => {
            let mut config = resolve_config(presets.as_deref(), index)?;
            if let Some(seed) = seed {
                config.seed = seed;
            }
            let map = generate_map(&config)?;
            match format {
                OutputFormat::Ascii => {
                    println!("{}", describe(&map));
                    print!("{}", render_ascii(&map));
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&MapSummary::new(&map))?);
                }
            }
        }
        Commands::Spawns {
            presets,
            index,
            count,
        } => {
            let config = resolve_config(presets.as_deref(), index)?;
            let map = generate_map(&config)?;
            for coord in spawn_sequence(&map, count) {
                println!("{coord}");
            }
        }
    }
    Ok(())
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
