//! Update input source command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use tradebot_core::models::{Config, FetchMethod, InputSourcePatch, SourceType};
use tradebot_http::ApiClient;

use crate::output;
use crate::parse;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Input source ID
    pub id: u64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long = "type")]
    pub source_type: Option<SourceType>,

    #[arg(long)]
    pub method: Option<FetchMethod>,

    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Replace credentials with these key=value fields (repeatable)
    #[arg(long = "credential", value_parser = parse::key_value)]
    pub credentials: Vec<(String, String)>,

    /// Replace configuration with this JSON object
    #[arg(long, value_parser = parse::config_object)]
    pub config: Option<Config>,

    /// Enable or disable the source (true/false)
    #[arg(long)]
    pub active: Option<bool>,
}

pub async fn run(args: UpdateArgs, client: &ApiClient) -> Result<()> {
    let patch = InputSourcePatch {
        name: args.name,
        source_type: args.source_type,
        method: args.method,
        endpoint_url: args.endpoint_url,
        credentials: (!args.credentials.is_empty())
            .then(|| parse::secret_fields(args.credentials)),
        config: args.config,
        is_active: args.active,
    };

    if patch.is_empty() {
        bail!("Nothing to update. Pass at least one field to change.");
    }

    let updated = client
        .update_input_source(args.id, &patch)
        .await
        .context("Failed to update input source")?;

    output::success(&format!("Updated input source {}", updated.id));
    Ok(())
}
