//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::config::ClientConfig;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, config: &ClientConfig) -> Result<()> {
    let client = config.client()?;
    client.logout();

    output::success("Logged out");
    Ok(())
}
