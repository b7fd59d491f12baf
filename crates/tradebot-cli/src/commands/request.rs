//! Raw request command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use tradebot_http::{Method, RequestOptions};

use crate::config::ClientConfig;
use crate::output;
use crate::parse;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PATCH, ...)
    #[arg(value_parser = parse::method)]
    pub method: Method,

    /// API path, e.g. /api/input-sources/
    pub path: String,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,

    /// Extra header as 'Name: value' (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse::header)]
    pub headers: Vec<(String, String)>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: RequestArgs, config: &ClientConfig) -> Result<()> {
    let client = config.authenticated_client()?;

    let mut options = RequestOptions::new(args.method);
    for (name, value) in &args.headers {
        options = options.header(name, value).context("Invalid header")?;
    }
    if let Some(body) = &args.body {
        let body: Value = serde_json::from_str(body).context("Invalid JSON body")?;
        options = options.json(&body)?;
    }

    let response: Value = client
        .request(&args.path, options)
        .await
        .with_context(|| format!("Request to {} failed", args.path))?;

    if response.is_null() {
        return Ok(());
    }

    if args.pretty {
        output::json_pretty(&response)
    } else {
        output::json(&response)
    }
}
