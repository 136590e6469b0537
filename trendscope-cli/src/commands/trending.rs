//! Trending commands - daily and real-time trending searches.

use anyhow::Result;
use clap::Args;
use tracing::info;
use trendscope_core::DailyTrendingTopics;
use trendscope_providers::TrendsClient;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the realtime command.
#[derive(Args, Default)]
pub struct RealtimeArgs {
    /// Window in hours (defaults to the configured window).
    #[arg(long)]
    pub hours: Option<u32>,

    /// Show at most this many stories.
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Runs the daily command.
pub async fn run_daily(cli: &Cli) -> Result<()> {
    let settings = cli.settings().await?;
    let geo = settings.geo.clone();
    info!(geo = %geo, "Fetching daily trends");

    let mut client = TrendsClient::with_settings(settings)?;
    let topics = client.daily_trends(&geo).await?;

    output(&topics, &geo, None, cli)
}

/// Runs the realtime command.
pub async fn run_realtime(args: &RealtimeArgs, cli: &Cli) -> Result<()> {
    let settings = cli.settings().await?;
    let geo = settings.geo.clone();
    info!(geo = %geo, hours = ?args.hours, "Fetching real-time trends");

    let mut client = TrendsClient::with_settings(settings)?;
    let topics = client.real_time_trends(&geo, args.hours).await?;

    output(&topics, &geo, args.limit, cli)
}

fn output(topics: &DailyTrendingTopics, geo: &str, limit: Option<usize>, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_topics(topics)?);
        }
        OutputFormat::Text => {
            print!("{}", TextFormatter::new(!cli.no_color).format_topics(topics, geo, limit));
        }
    }
    Ok(())
}
