//! List input sources command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tradebot_core::models::{InputSource, SourceType, active_input_sources};
use tradebot_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show active sources
    #[arg(long)]
    pub active: bool,

    /// Only show sources of this type
    #[arg(long = "type")]
    pub source_type: Option<SourceType>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, client: &ApiClient) -> Result<()> {
    let sources = client
        .input_sources()
        .await
        .context("Failed to list input sources")?;

    let sources: Vec<&InputSource> = if args.active {
        active_input_sources(&sources, args.source_type)
    } else {
        sources
            .iter()
            .filter(|s| args.source_type.is_none_or(|t| s.source_type == t))
            .collect()
    };

    if args.json {
        return output::json_pretty(&sources);
    }

    if sources.is_empty() {
        eprintln!("{}", "No input sources found.".dimmed());
        return Ok(());
    }

    for source in sources {
        println!(
            "{:>4}  {:<8}  {:<28}  {:<17}  {:<8}  {}",
            source.id,
            output::active_marker(source.is_active),
            source.name,
            source.source_type.as_str(),
            source.method.to_string(),
            output::timestamp(&source.updated_at).dimmed()
        );
    }

    Ok(())
}
