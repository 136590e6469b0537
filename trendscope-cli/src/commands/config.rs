//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;
use trendscope_providers::TrendsSettings;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show the settings file path.
    Path,

    /// Write a settings file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => {
            println!("{}", cli.settings_path().display());
            Ok(())
        }
        ConfigAction::Init { force } => init_config(*force, cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let settings = cli.settings().await?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_settings(&settings)?);
        }
        OutputFormat::Text => {
            println!("Trendscope Configuration");
            println!("{}", "─".repeat(40));
            println!("Settings file:  {}", cli.settings_path().display());
            println!("Base URL:       {}", settings.base_url);
            println!("Region (geo):   {}", settings.geo);
            println!("Language (hl):  {}", settings.hl);
            println!("Timezone (tz):  {}", settings.tz);
            println!("Real-time hrs:  {}", settings.realtime_hours);
            println!("Timeout:        {}s", settings.timeout_secs);
            println!(
                "Retries:        {} (base {}ms, jitter <{}ms)",
                settings.retry.max_retries, settings.retry.base_delay_ms, settings.retry.max_jitter_ms
            );
        }
    }
    Ok(())
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = cli.settings_path();
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    TrendsSettings::default().save(&path).await?;
    info!(path = %path.display(), "Wrote default settings");
    println!("Wrote {}", path.display());
    Ok(())
}
