//! tradebot - command-line client for the TradeBOT backend.
//!
//! A thin wrapper over `tradebot-http` for logging in and managing input
//! sources and output destinations from a terminal.

mod cli;
mod commands;
mod config;
mod output;
mod parse;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, destinations, request, sources};
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let config = ClientConfig::new(cli.api_url, cli.token_file);

    match cli.command {
        Commands::Auth(cmd) => auth::handle(cmd, &config).await,
        Commands::Sources(cmd) => sources::handle(cmd, &config).await,
        Commands::Destinations(cmd) => destinations::handle(cmd, &config).await,
        Commands::Request(args) => request::run(args, &config).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so command output on stdout stays machine-readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
