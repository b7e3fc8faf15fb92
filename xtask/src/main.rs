// Desktop/tooling crate — unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod flash;
mod scan_audio;
mod test;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "ChirpBox development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flash firmware to the RP2040 via probe-rs
    Flash {
        /// Build and flash release version
        #[arg(short, long)]
        release: bool,
    },
    /// Check all build targets (hardware, simulator, no_std) plus lints
    Check,
    /// Run host tests
    Test {
        /// Run only unit tests (skip integration tests)
        #[arg(long)]
        unit: bool,
        /// Run only integration tests (skip unit tests)
        #[arg(long)]
        integration: bool,
    },
    /// Validate a clip directory: parsed rules, index coverage, problems
    ScanAudio {
        /// Directory holding the .wav clips
        #[arg(default_value = "audio")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Flash { release } => flash::run(release),
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::ScanAudio { dir } => scan_audio::run(&dir),
    }
}
