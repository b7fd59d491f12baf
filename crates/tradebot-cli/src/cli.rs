//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tradebot_core::ApiUrl;

use crate::commands::auth::AuthCommand;
use crate::commands::destinations::DestinationsCommand;
use crate::commands::request::RequestArgs;
use crate::commands::sources::SourcesCommand;

/// Command-line client for the TradeBOT backend.
#[derive(Parser, Debug)]
#[command(name = "tradebot")]
#[command(author, version = env!("TRADEBOT_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL. Must be https unless the host is localhost,
    /// 127.0.0.1 or ::1
    #[arg(long, global = true, env = "TRADEBOT_API_URL", default_value = ApiUrl::DEFAULT)]
    pub api_url: String,

    /// Token file (defaults to the user data directory)
    #[arg(long, global = true, env = "TRADEBOT_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and inspect stored tokens
    Auth(AuthCommand),

    /// Manage input sources
    Sources(SourcesCommand),

    /// Manage output destinations
    Destinations(DestinationsCommand),

    /// Send an authenticated request to an arbitrary API path
    Request(RequestArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tradebot",
            "sources",
            "list",
            "--api-url",
            "https://api.example.com",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "https://api.example.com");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn api_url_help_names_plain_http_rule() {
        let cmd = Cli::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "api_url")
            .unwrap();
        let help = arg.get_help().unwrap().to_string();
        assert!(help.contains("https"));
        assert!(help.contains("localhost"));
    }
}
