//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::config::ClientConfig;
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, config: &ClientConfig) -> Result<()> {
    let client = config.client()?;

    eprintln!("{}", "Refreshing access token...".dimmed());

    client
        .refresh_access_token()
        .await
        .context("Failed to refresh access token")?;

    output::success("Access token refreshed");
    Ok(())
}
