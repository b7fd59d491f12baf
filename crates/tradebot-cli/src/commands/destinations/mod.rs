//! Output destination subcommand implementations.

mod create;
mod delete;
mod list;
mod test;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ClientConfig;

#[derive(Args, Debug)]
pub struct DestinationsCommand {
    #[command(subcommand)]
    pub command: DestinationsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DestinationsSubcommand {
    /// List output destinations
    List(list::ListArgs),

    /// Create an output destination
    Create(create::CreateArgs),

    /// Update fields of an output destination
    Update(update::UpdateArgs),

    /// Delete an output destination
    Delete(delete::DeleteArgs),

    /// Test connectivity to an output destination
    Test(test::TestArgs),
}

pub async fn handle(cmd: DestinationsCommand, config: &ClientConfig) -> Result<()> {
    let client = config.authenticated_client()?;

    match cmd.command {
        DestinationsSubcommand::List(args) => list::run(args, &client).await,
        DestinationsSubcommand::Create(args) => create::run(args, &client).await,
        DestinationsSubcommand::Update(args) => update::run(args, &client).await,
        DestinationsSubcommand::Delete(args) => delete::run(args, &client).await,
        DestinationsSubcommand::Test(args) => test::run(args, &client).await,
    }
}
