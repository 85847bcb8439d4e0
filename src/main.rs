//! Aycblok command line entry point
//!
//! Generates a goal, moves and garbage for a blank area and prints the
//! tiled move report.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;

use aycblok::consts::{DEFAULT_AREA_SIZE, REPORT_COLUMNS};
use aycblok::{Board, GeneratorSettings, LogSink, Preset, RandomSeed, generate_puzzle, persistence};

#[derive(Debug, Parser)]
#[command(
    name = "aycblok",
    about = "Generate block pushing puzzles backward from the solved board",
    version
)]
struct Cli {
    /// Random seed for every generation stage.
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Area size as ROWSxCOLUMNS.
    #[arg(long, default_value_t = AreaSize::square(DEFAULT_AREA_SIZE))]
    size: AreaSize,

    /// Built-in preset: small, simple or big-goal. Applied over --settings.
    #[arg(long, value_parser = parse_preset)]
    preset: Option<Preset>,

    /// Generator settings JSON file.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the generated layout to this JSON file.
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Cli {
    fn generator_settings(&self) -> GeneratorSettings {
        let mut settings = match &self.settings {
            Some(path) => GeneratorSettings::load(path),
            None => GeneratorSettings::default(),
        };
        if let Some(preset) = self.preset {
            settings.apply_preset(preset);
        }
        settings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AreaSize {
    rows: usize,
    columns: usize,
}

impl AreaSize {
    fn square(size: usize) -> Self {
        Self {
            rows: size,
            columns: size,
        }
    }
}

impl fmt::Display for AreaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

impl FromStr for AreaSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, columns) = s
            .split_once('x')
            .ok_or_else(|| format!("expected ROWSxCOLUMNS, got {s:?}"))?;
        let rows = rows.parse().map_err(|e| format!("bad row count {rows:?}: {e}"))?;
        let columns = columns
            .parse()
            .map_err(|e| format!("bad column count {columns:?}: {e}"))?;
        if rows == 0 || columns == 0 {
            return Err(format!("area must not be empty, got {s:?}"));
        }
        Ok(Self { rows, columns })
    }
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    Preset::parse(s).ok_or_else(|| format!("unknown preset {s:?}"))
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.generator_settings();

    log::info!("Generating {} puzzle with seed {}", cli.size, cli.seed);

    let area = Board::new(cli.size.rows, cli.size.columns);
    let mut rng = RandomSeed::new(cli.seed);

    let layout = match generate_puzzle(&area, &settings, &mut rng, &mut LogSink) {
        Ok(Some(layout)) => layout,
        Ok(None) => {
            eprintln!("No layout found for seed {}; try another seed or fewer moves", cli.seed);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Generation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match layout.tiled_move_report(REPORT_COLUMNS) {
        Ok(report) => println!("{report}"),
        Err(e) => log::warn!("Could not render report: {e}"),
    }

    if let Some(path) = &cli.json {
        if let Err(e) = persistence::save(&layout, path) {
            eprintln!("Could not save layout: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
