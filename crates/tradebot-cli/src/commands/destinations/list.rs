//! List output destinations command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tradebot_core::models::{OutputDestination, Platform, active_output_destinations};
use tradebot_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show active destinations
    #[arg(long)]
    pub active: bool,

    /// Only show destinations on this platform
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, client: &ApiClient) -> Result<()> {
    let destinations = client
        .output_destinations()
        .await
        .context("Failed to list output destinations")?;

    let destinations: Vec<&OutputDestination> = if args.active {
        active_output_destinations(&destinations, args.platform)
    } else {
        destinations
            .iter()
            .filter(|d| args.platform.is_none_or(|p| d.platform == p))
            .collect()
    };

    if args.json {
        return output::json_pretty(&destinations);
    }

    if destinations.is_empty() {
        eprintln!("{}", "No output destinations found.".dimmed());
        return Ok(());
    }

    for destination in destinations {
        println!(
            "{:>4}  {:<8}  {:<9}  {:<28}  {:<24}  {}",
            destination.id,
            output::active_marker(destination.is_active),
            destination.platform.as_str(),
            destination.label,
            destination.account_id,
            output::timestamp(&destination.updated_at).dimmed()
        );
    }

    Ok(())
}
