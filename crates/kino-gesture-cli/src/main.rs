//! Kino Gesture CLI - Gesture Trace Tooling
//!
//! Features:
//! - Replay recorded touch traces against a simulated player
//! - Inspect double-tap and volume zones for a screen width
//! - Print and validate gesture tunables

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;
mod trace;

/// Kino Gesture CLI - Touch gesture toolkit
#[derive(Parser)]
#[command(name = "kino-gesture")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Replay and inspect Kino touch gestures", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Fail on out-of-range tunables instead of clamping them
    #[arg(long, global = true)]
    strict_config: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON touch trace
    Replay {
        /// Path to the trace file
        trace: PathBuf,

        /// Tunables file (JSON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show double-tap and volume zones for a screen width
    Zones {
        /// Player width in px
        #[arg(short, long, default_value = "360")]
        width: f64,

        /// Positions to classify (defaults to left edge, thirds and right edge)
        #[arg(short, long)]
        x: Vec<f64>,

        /// Tunables file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective tunables
    Config {
        /// Tunables file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    kino_gesture::init();

    match cli.command {
        Commands::Replay { trace, config } => {
            let config = commands::load_config(config.as_deref(), cli.strict_config)?;
            commands::replay(&trace, config, &cli.format)?;
        }
        Commands::Zones { width, x, config } => {
            let config = commands::load_config(config.as_deref(), cli.strict_config)?;
            commands::zones(width, &x, &config, &cli.format)?;
        }
        Commands::Config { config } => {
            let config = commands::load_config(config.as_deref(), cli.strict_config)?;
            commands::config(&config, &cli.format)?;
        }
    }

    Ok(())
}
