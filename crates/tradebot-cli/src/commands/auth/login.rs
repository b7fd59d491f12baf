//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tradebot_core::Credentials;

use crate::config::ClientConfig;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "TRADEBOT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, config: &ClientConfig) -> Result<()> {
    let client = config.client()?;
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    client
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("API", client.base_url().as_str());
    output::field("Username", credentials.username());
    output::field("Token file", &config.token_path()?.display().to_string());

    Ok(())
}
