//! Test output destination connection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tradebot_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Output destination ID
    pub id: u64,
}

pub async fn run(args: TestArgs, client: &ApiClient) -> Result<()> {
    let result = client
        .test_output_destination_connection(args.id)
        .await
        .context("Failed to test output destination connection")?;

    output::connection_result(&result)
}
