//! Update output destination command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use tradebot_core::models::{Config, OutputDestinationPatch, Platform};
use tradebot_http::ApiClient;

use crate::output;
use crate::parse;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Output destination ID
    pub id: u64,

    #[arg(long)]
    pub platform: Option<Platform>,

    #[arg(long)]
    pub label: Option<String>,

    #[arg(long)]
    pub account_id: Option<String>,

    /// Replace credentials with these key=value fields (repeatable)
    #[arg(long = "credential", value_parser = parse::key_value)]
    pub credentials: Vec<(String, String)>,

    /// Replace configuration with this JSON object
    #[arg(long, value_parser = parse::config_object)]
    pub config: Option<Config>,

    /// Enable or disable the destination (true/false)
    #[arg(long)]
    pub active: Option<bool>,
}

pub async fn run(args: UpdateArgs, client: &ApiClient) -> Result<()> {
    let patch = OutputDestinationPatch {
        platform: args.platform,
        label: args.label,
        account_id: args.account_id,
        credentials: (!args.credentials.is_empty())
            .then(|| parse::secret_fields(args.credentials)),
        config: args.config,
        is_active: args.active,
    };

    if patch.is_empty() {
        bail!("Nothing to update. Pass at least one field to change.");
    }

    let updated = client
        .update_output_destination(args.id, &patch)
        .await
        .context("Failed to update output destination")?;

    output::success(&format!("Updated output destination {}", updated.id));
    Ok(())
}
