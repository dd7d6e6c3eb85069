//! Kinetic Alphabet CLI
//!
//! Usage:
//!   kinetic generate --length 16 --seed 7        - Freeform sequence as JSON
//!   kinetic generate --mode circular --cap STRICT_ROTATED
//!   kinetic generate --config sequence.yaml      - Load a config file
//!   kinetic classify A W- Φ                      - Letter types
//!   kinetic orient anti 1.5 in --rotation ccw    - End orientation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use ka_engine::{
    CapType, ConfigLoader, GenerationConfig, GenerationMode, PropContinuity, SliceSize,
    SequenceGenerator, classify_letter, letters::is_known_letter,
};
use ka_notation::{
    GridMode, LetterType, MotionType, Orientation, RotationDirection, Turns,
    calculate_end_orientation,
};

#[derive(Parser)]
#[command(name = "kinetic", about = "Kinetic alphabet notation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sequence and print it as JSON
    Generate(GenerateArgs),
    /// Classify letters into their types
    Classify {
        /// Letters to classify
        #[arg(required = true)]
        letters: Vec<String>,
    },
    /// Compute the end orientation of one motion
    Orient {
        /// pro, anti, static, dash or float
        motion_type: String,
        /// Turn count (0, 0.5, 1, ... or "fl")
        turns: Turns,
        /// in, out, clock or counter
        start: String,
        /// Prop rotation direction
        #[arg(short, long, default_value = "no_rotation")]
        rotation: RotationDirection,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// JSON or YAML config file (flags override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Number of beats
    #[arg(short, long)]
    length: Option<usize>,

    /// Difficulty 1-3
    #[arg(long)]
    level: Option<u8>,

    #[arg(long)]
    turn_intensity: Option<f64>,

    #[arg(long, value_enum)]
    grid: Option<GridArg>,

    #[arg(long, value_enum)]
    continuity: Option<ContinuityArg>,

    /// Allowed letter types by number (freeform only)
    #[arg(long, value_delimiter = ',')]
    letter_types: Option<Vec<u8>>,

    /// CAP type, e.g. STRICT_ROTATED (circular only)
    #[arg(long)]
    cap: Option<CapType>,

    #[arg(long, value_enum)]
    slice: Option<SliceArg>,

    /// Letters never picked
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Freeform,
    Circular,
}

#[derive(Clone, Copy, ValueEnum)]
enum GridArg {
    Diamond,
    Box,
}

#[derive(Clone, Copy, ValueEnum)]
enum ContinuityArg {
    Continuous,
    Random,
}

#[derive(Clone, Copy, ValueEnum)]
enum SliceArg {
    Halved,
    Quartered,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Classify { letters } => run_classify(&letters),
        Commands::Orient {
            motion_type,
            turns,
            start,
            rotation,
        } => run_orient(&motion_type, turns, &start, rotation),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let loader = ConfigLoader::new();
    let mut config = match &args.config {
        Some(path) => loader
            .load_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GenerationConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.mode = match mode {
            ModeArg::Freeform => GenerationMode::Freeform,
            ModeArg::Circular => GenerationMode::Circular,
        };
    }
    if let Some(length) = args.length {
        config.length = length;
    }
    if let Some(level) = args.level {
        config.level = level;
    }
    if let Some(intensity) = args.turn_intensity {
        config.turn_intensity = intensity;
    }
    if let Some(grid) = args.grid {
        config.grid_mode = match grid {
            GridArg::Diamond => GridMode::Diamond,
            GridArg::Box => GridMode::Box,
        };
    }
    if let Some(continuity) = args.continuity {
        config.prop_continuity = match continuity {
            ContinuityArg::Continuous => PropContinuity::Continuous,
            ContinuityArg::Random => PropContinuity::Random,
        };
    }
    if let Some(numbers) = args.letter_types {
        config.letter_types = numbers
            .iter()
            .map(|&n| LetterType::from_number(n).with_context(|| format!("No letter type {n}")))
            .collect::<Result<_>>()?;
    }
    if let Some(cap) = args.cap {
        config.cap_type = cap;
    }
    if let Some(slice) = args.slice {
        config.slice_size = match slice {
            SliceArg::Halved => SliceSize::Halved,
            SliceArg::Quartered => SliceSize::Quartered,
        };
    }
    if let Some(excluded) = args.exclude {
        config.excluded_letters = excluded;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    log::info!("Generating with {:?}", config);
    let sequence = SequenceGenerator::with_limits(config, &loader.limits)
        .and_then(|mut generator| generator.generate())
        .context("Sequence generation failed")?;

    let json = if args.compact {
        serde_json::to_string(&sequence)?
    } else {
        serde_json::to_string_pretty(&sequence)?
    };
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
struct Classification<'a> {
    letter: &'a str,
    letter_type: LetterType,
    description: &'static str,
    known: bool,
}

fn run_classify(letters: &[String]) -> Result<()> {
    let rows: Vec<Classification<'_>> = letters
        .iter()
        .map(|letter| {
            let letter_type = classify_letter(letter);
            Classification {
                letter,
                letter_type,
                description: letter_type.description(),
                known: is_known_letter(letter),
            }
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn run_orient(motion_type: &str, turns: Turns, start: &str, rotation: RotationDirection) -> Result<()> {
    let end = calculate_end_orientation(
        MotionType::parse_lossy(motion_type),
        turns,
        Orientation::parse_lossy(start),
        rotation,
    );
    println!("{end}");
    Ok(())
}
