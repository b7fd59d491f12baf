//! tradebot-core - Core types and traits for the TradeBOT API client.

pub mod credentials;
pub mod error;
pub mod models;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use store::{ACCESS_TOKEN_KEY, MemoryTokenStore, REFRESH_TOKEN_KEY, TokenStore};
pub use tokens::{AccessToken, AuthTokens, RefreshToken, TokenPair};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
