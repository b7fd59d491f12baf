//! Input source subcommand implementations.

mod create;
mod delete;
mod list;
mod test;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ClientConfig;

#[derive(Args, Debug)]
pub struct SourcesCommand {
    #[command(subcommand)]
    pub command: SourcesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SourcesSubcommand {
    /// List input sources
    List(list::ListArgs),

    /// Create an input source
    Create(create::CreateArgs),

    /// Update fields of an input source
    Update(update::UpdateArgs),

    /// Delete an input source
    Delete(delete::DeleteArgs),

    /// Test connectivity to an input source
    Test(test::TestArgs),
}

pub async fn handle(cmd: SourcesCommand, config: &ClientConfig) -> Result<()> {
    let client = config.authenticated_client()?;

    match cmd.command {
        SourcesSubcommand::List(args) => list::run(args, &client).await,
        SourcesSubcommand::Create(args) => create::run(args, &client).await,
        SourcesSubcommand::Update(args) => update::run(args, &client).await,
        SourcesSubcommand::Delete(args) => delete::run(args, &client).await,
        SourcesSubcommand::Test(args) => test::run(args, &client).await,
    }
}
