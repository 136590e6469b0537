// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Trendscope CLI - Google Trends from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Daily trending searches for the configured region
//! trendscope daily
//!
//! # Daily trends for Germany as JSON
//! trendscope daily --geo DE --format json --pretty
//!
//! # Real-time trends over the last 4 hours
//! trendscope realtime --hours 4
//!
//! # Search suggestions
//! trendscope autocomplete "rust lang"
//!
//! # Write a default settings file
//! trendscope config init
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trendscope_providers::{default_settings_path, TrendsError, TrendsSettings};

use commands::{autocomplete, config, trending};

// ============================================================================
// CLI Definition
// ============================================================================

/// Trendscope CLI - Google Trends from the command line.
#[derive(Parser)]
#[command(name = "trendscope")]
#[command(about = "Google Trends trending searches and suggestions")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file (defaults to the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Region override, e.g. "US" or "DE".
    #[arg(long, short, global = true)]
    pub geo: Option<String>,

    /// Interface language override, e.g. "en-US".
    #[arg(long, global = true)]
    pub hl: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Trending searches of the last 24 hours.
    #[command(visible_alias = "d")]
    Daily,

    /// Trending searches of the last few hours.
    #[command(visible_alias = "r")]
    Realtime(trending::RealtimeArgs),

    /// Search suggestions for a keyword.
    #[command(visible_alias = "a")]
    Autocomplete(autocomplete::AutocompleteArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// Network error.
    Network = 2,
    /// Parse error.
    ParseError = 3,
    /// Invalid input.
    InvalidRequest = 4,
}

impl ExitCode {
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<TrendsError>() {
            Some(TrendsError::Network(_)) => Self::Network,
            Some(TrendsError::Parse(_)) => Self::ParseError,
            Some(TrendsError::InvalidRequest(_)) => Self::InvalidRequest,
            Some(TrendsError::Unknown(_)) | None => Self::Error,
        }
    }
}

impl Cli {
    /// Path of the settings file in use.
    pub fn settings_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_settings_path)
    }

    /// Loads settings and applies command-line overrides.
    pub async fn settings(&self) -> Result<TrendsSettings> {
        let mut settings = TrendsSettings::load(&self.settings_path()).await?;
        if let Some(geo) = &self.geo {
            settings.geo.clone_from(geo);
        }
        if let Some(hl) = &self.hl {
            settings.hl.clone_from(hl);
        }
        Ok(settings)
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("trendscope=debug,info")
    } else {
        EnvFilter::new("trendscope=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Daily => trending::run_daily(&cli).await,
        Commands::Realtime(args) => trending::run_realtime(args, &cli).await,
        Commands::Autocomplete(args) => autocomplete::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
