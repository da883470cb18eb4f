mod app;
mod drag;
mod error;
mod game;
mod layout;
mod puzzle;
mod shuffle;
mod terminal;
mod timer;

use clap::{Parser, ValueEnum};
use error::Result;
use game::GameConfig;
use shuffle::ShuffleMode;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slide-over")]
#[command(author, version, about = "Drag rows and columns of letter tiles back into order")]
struct Args {
    /// Tiles per side
    #[arg(long, default_value = "5")]
    size: usize,

    /// Random shifts applied by one shuffle
    #[arg(long, default_value = "50")]
    shuffles: u32,

    /// How the shuffle is applied
    #[arg(long, value_enum, default_value = "animated")]
    mode: Mode,

    /// Delay between animated shuffle shifts, in milliseconds
    #[arg(long, default_value = "15")]
    interval_ms: u64,

    /// Terminal columns per tile
    #[arg(long, default_value = "6")]
    tile_width: i32,

    /// Terminal rows per tile
    #[arg(long, default_value = "3")]
    tile_height: i32,

    /// Random seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the solved and shuffled board instead of playing
    #[arg(long)]
    print: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Apply every shift at once
    Instant,
    /// Apply one shift per interval
    Animated,
}

impl Args {
    fn config(&self) -> GameConfig {
        let mode = match self.mode {
            Mode::Instant => ShuffleMode::Instant,
            Mode::Animated => ShuffleMode::Animated {
                interval: Duration::from_millis(self.interval_ms),
            },
        };
        GameConfig {
            size: self.size,
            shuffles: self.shuffles,
            mode,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(&args) {
        error!(error = %err, "exiting");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.log_file {
        init_tracing(File::create(path)?);
    }

    let config = args.config();
    if args.print {
        print!("{}", app::describe(&config)?);
        return Ok(());
    }
    app::run(&config)
}

fn init_tracing(file: File) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
}
