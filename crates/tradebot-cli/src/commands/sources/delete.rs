//! Delete input source command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tradebot_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Input source ID
    pub id: u64,
}

pub async fn run(args: DeleteArgs, client: &ApiClient) -> Result<()> {
    client
        .delete_input_source(args.id)
        .await
        .context("Failed to delete input source")?;

    output::success(&format!("Deleted input source {}", args.id));
    Ok(())
}
