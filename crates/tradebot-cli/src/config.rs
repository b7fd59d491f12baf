//! Client construction from global CLI options.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use tracing::debug;

use tradebot_core::ApiUrl;
use tradebot_file::FileTokenStore;
use tradebot_http::ApiClient;

/// Resolved global options shared by every command.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_url: String,
    token_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(api_url: String, token_file: Option<PathBuf>) -> Self {
        Self {
            api_url,
            token_file,
        }
    }

    /// Path of the token file, falling back to the user data directory.
    pub fn token_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.token_file {
            return Ok(path.clone());
        }

        let dirs =
            ProjectDirs::from("", "", "tradebot").context("Could not determine data directory")?;
        Ok(dirs.data_dir().join("tokens.json"))
    }

    /// Build a client over the token file. Holding a token is not required.
    pub fn client(&self) -> Result<ApiClient> {
        let api = ApiUrl::new(&self.api_url).context("Invalid API URL")?;
        let path = self.token_path()?;
        debug!(api = %api, token_file = %path.display(), "Using token file");
        let store = FileTokenStore::new(path);
        ApiClient::new(api, Arc::new(store)).context("Failed to load stored tokens")
    }

    /// Build a client and require a stored access token.
    pub fn authenticated_client(&self) -> Result<ApiClient> {
        let client = self.client()?;
        if !client.is_authenticated() {
            bail!("Not logged in. Run 'tradebot auth login' first.");
        }
        Ok(client)
    }
}
