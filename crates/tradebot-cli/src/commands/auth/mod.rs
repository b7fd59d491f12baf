//! Auth subcommand implementations.

mod login;
mod logout;
mod refresh_token;
mod status;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ClientConfig;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Obtain and store a token pair
    Login(login::LoginArgs),

    /// Forget the stored tokens
    Logout(logout::LogoutArgs),

    /// Show whether a token is stored
    Status(status::StatusArgs),

    /// Exchange the refresh token for a new access token
    RefreshToken(refresh_token::RefreshTokenArgs),
}

pub async fn handle(cmd: AuthCommand, config: &ClientConfig) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, config).await,
        AuthSubcommand::Logout(args) => logout::run(args, config),
        AuthSubcommand::Status(args) => status::run(args, config),
        AuthSubcommand::RefreshToken(args) => refresh_token::run(args, config).await,
    }
}
