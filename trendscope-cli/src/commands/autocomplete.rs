//! Autocomplete command - search suggestions for a keyword.

use anyhow::Result;
use clap::Args;
use trendscope_providers::TrendsClient;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the autocomplete command.
#[derive(Args)]
pub struct AutocompleteArgs {
    /// Keyword to complete.
    pub keyword: String,
}

/// Runs the autocomplete command.
pub async fn run(args: &AutocompleteArgs, cli: &Cli) -> Result<()> {
    let settings = cli.settings().await?;
    let mut client = TrendsClient::with_settings(settings)?;
    let suggestions = client.autocomplete(&args.keyword).await?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_suggestions(&suggestions)?);
        }
        OutputFormat::Text => {
            print!("{}", TextFormatter::new(!cli.no_color).format_suggestions(&suggestions));
        }
    }
    Ok(())
}
