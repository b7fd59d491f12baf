//! Status command implementation.

use anyhow::Result;
use clap::Args;

use tradebot_http::AuthState;

use crate::config::ClientConfig;
use crate::output;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, config: &ClientConfig) -> Result<()> {
    let client = config.client()?;

    let state = match client.auth_state() {
        AuthState::Authenticated | AuthState::AccessRefreshing => "yes",
        AuthState::Unauthenticated => "no",
    };

    output::field("API", client.base_url().as_str());
    output::field("Authenticated", state);
    output::field(
        "Refresh token",
        if client.refresh_token().is_some() {
            "stored"
        } else {
            "none"
        },
    );
    output::field("Token file", &config.token_path()?.display().to_string());

    Ok(())
}
