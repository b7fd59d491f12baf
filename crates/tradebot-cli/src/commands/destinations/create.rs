//! Create output destination command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tradebot_core::models::{Config, CreateOutputDestination, Platform};
use tradebot_http::ApiClient;

use crate::output;
use crate::parse;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// telegram, twitter, discord or whatsapp
    #[arg(long)]
    pub platform: Platform,

    /// Display label
    #[arg(long)]
    pub label: String,

    /// Channel, handle or phone number posted to
    #[arg(long)]
    pub account_id: String,

    /// Credential field as key=value (repeatable)
    #[arg(long = "credential", value_parser = parse::key_value)]
    pub credentials: Vec<(String, String)>,

    /// Extra configuration as a JSON object
    #[arg(long, value_parser = parse::config_object)]
    pub config: Option<Config>,

    /// Create the destination disabled
    #[arg(long)]
    pub inactive: bool,
}

pub async fn run(args: CreateArgs, client: &ApiClient) -> Result<()> {
    let destination = CreateOutputDestination {
        platform: args.platform,
        label: args.label,
        account_id: args.account_id,
        credentials: parse::secret_fields(args.credentials),
        config: args.config,
        is_active: Some(!args.inactive),
    };

    let created = client
        .create_output_destination(&destination)
        .await
        .context("Failed to create output destination")?;

    output::success(&format!("Created output destination {}", created.id));
    output::field("Platform", created.platform.as_str());
    output::field("Label", &created.label);

    Ok(())
}
