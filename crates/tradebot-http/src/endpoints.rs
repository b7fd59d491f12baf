//! Endpoint paths and wire types for the TradeBOT REST API.

use serde::{Deserialize, Serialize};

/// Token-issue endpoint (login).
pub const TOKEN_OBTAIN: &str = "/api/auth/token/";

/// Access-token refresh endpoint.
pub const TOKEN_REFRESH: &str = "/api/auth/token/refresh/";

/// Input source collection.
pub const INPUT_SOURCES: &str = "/api/input-sources/";

/// Output destination collection.
pub const OUTPUT_DESTINATIONS: &str = "/api/messaging/output-destinations/";

/// Path of a single record in a collection.
pub(crate) fn detail_path(collection: &str, id: u64) -> String {
    format!("{}{}/", collection, id)
}

/// Path of a record's connection test action.
pub(crate) fn test_connection_path(collection: &str, id: u64) -> String {
    format!("{}{}/test_connection/", collection, id)
}

/// Request body for the token-issue endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from the token-issue endpoint.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access: String,
    pub refresh: String,
}

/// Request body for the refresh endpoint.
#[derive(Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response from the refresh endpoint. `refresh` is only present when
/// the server rotates refresh tokens.
#[derive(Deserialize)]
pub(crate) struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Error body shape used by the backend.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
