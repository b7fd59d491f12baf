//! Test input source connection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tradebot_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Input source ID
    pub id: u64,
}

pub async fn run(args: TestArgs, client: &ApiClient) -> Result<()> {
    let result = client
        .test_input_source_connection(args.id)
        .await
        .context("Failed to test input source connection")?;

    output::connection_result(&result)
}
