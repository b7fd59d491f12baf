//! Delete output destination command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tradebot_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Output destination ID
    pub id: u64,
}

pub async fn run(args: DeleteArgs, client: &ApiClient) -> Result<()> {
    client
        .delete_output_destination(args.id)
        .await
        .context("Failed to delete output destination")?;

    output::success(&format!("Deleted output destination {}", args.id));
    Ok(())
}
