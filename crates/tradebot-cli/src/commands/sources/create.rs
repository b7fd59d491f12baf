//! Create input source command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tradebot_core::models::{Config, CreateInputSource, FetchMethod, SourceType};
use tradebot_http::ApiClient;

use crate::output;
use crate::parse;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// economic_calendar, trading_signals or market_news
    #[arg(long = "type")]
    pub source_type: SourceType,

    /// api or scraping
    #[arg(long)]
    pub method: FetchMethod,

    /// URL the source is fetched from
    #[arg(long)]
    pub endpoint_url: String,

    /// Credential field as key=value (repeatable)
    #[arg(long = "credential", value_parser = parse::key_value)]
    pub credentials: Vec<(String, String)>,

    /// Extra configuration as a JSON object
    #[arg(long, value_parser = parse::config_object)]
    pub config: Option<Config>,

    /// Create the source disabled
    #[arg(long)]
    pub inactive: bool,
}

pub async fn run(args: CreateArgs, client: &ApiClient) -> Result<()> {
    let source = CreateInputSource {
        name: args.name,
        source_type: args.source_type,
        method: args.method,
        endpoint_url: args.endpoint_url,
        credentials: parse::secret_fields(args.credentials),
        config: args.config,
        is_active: Some(!args.inactive),
    };

    let created = client
        .create_input_source(&source)
        .await
        .context("Failed to create input source")?;

    output::success(&format!("Created input source {}", created.id));
    output::field("Name", &created.name);
    output::field("Type", created.source_type.as_str());

    Ok(())
}
