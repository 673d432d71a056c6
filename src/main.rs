//! # Math Maze Entry Point
//!
//! Generates a single tile map and writes it as JSON, for previewing levels
//! and feeding fixtures to a front end.

use clap::Parser;
use log::{error, info};
use math_maze::{
    generate_tile_map_with, DifficultyLevel, GenerationConfig, MathMazeError, MathMazeResult,
    TileMap,
};
use std::path::{Path, PathBuf};

/// Command line arguments for the map generator.
#[derive(Parser, Debug)]
#[command(name = "math-maze")]
#[command(about = "Generates arithmetic-challenge mazes for early learners")]
#[command(version)]
struct Args {
    /// Map width in tiles
    #[arg(long, default_value_t = math_maze::config::MIN_MAP_SIZE)]
    width: usize,

    /// Map height in tiles
    #[arg(long, default_value_t = math_maze::config::MIN_MAP_SIZE)]
    height: usize,

    /// Difficulty tier (infant, toddler, beginner, easy, medium, hard, expert)
    #[arg(short, long, default_value = "infant")]
    difficulty: String,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Identifier stored in the generated map
    #[arg(long, default_value = "map-1")]
    id: String,

    /// Write the map JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with generation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the ASCII preview on stderr
    #[arg(long)]
    quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting math-maze v{}", math_maze::VERSION);

    if let Err(e) = run(&args) {
        error!("Generation failed: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> MathMazeResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| MathMazeError::InvalidState(e.to_string()))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .try_init()
            .map_err(|e| MathMazeError::InvalidState(e.to_string()))?;
    }

    Ok(())
}

/// Builds the generation config from the optional file and the seed override.
fn load_config(path: Option<&Path>, seed: Option<u64>) -> MathMazeResult<GenerationConfig> {
    let mut config = match path {
        Some(path) => {
            info!("Loading generation config from {}", path.display());
            GenerationConfig::from_file(path)?
        }
        None => GenerationConfig::new(),
    };

    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

/// Writes the map as pretty JSON to `output`, or to stdout when absent.
fn write_map(map: &TileMap, output: Option<&Path>) -> MathMazeResult<()> {
    let json = serde_json::to_string_pretty(map)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("Map written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run(args: &Args) -> MathMazeResult<()> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let difficulty = DifficultyLevel::parse_lossy(&args.difficulty);

    info!(
        "Generating {}x{} {} map (seed: {:?})",
        args.width, args.height, difficulty, config.seed
    );

    let map = generate_tile_map_with(&args.id, args.width, args.height, difficulty, &config)?;

    if !args.quiet {
        eprint!("{}", map.to_ascii());
    }

    write_map(&map, args.output.as_deref())
}
