//! Error types for the TradeBOT client.
//!
//! This module provides a unified error type with explicit variants for
//! authentication, HTTP status, transport, decoding, storage and input
//! validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for TradeBOT client operations.
///
/// Every failure path in the client surfaces as one of these variants;
/// nothing is swallowed. The only automatic recovery anywhere in the
/// client is the single refresh-and-retry on a `401`.
#[derive(Debug, Error)]
pub enum Error {
    /// Credential-related failures (login, refresh, re-authentication).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A non-2xx response that was not resolved by refresh-and-retry.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Network transport errors (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Durable token storage failed.
    #[error("token storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (invalid URL, header, key/value pair).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(err) => Some(err.status),
            _ => None,
        }
    }

    /// Returns true for any authentication failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }
}

/// Authentication-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token endpoint rejected the login. Carries the server's
    /// `detail` message, or "Login failed" when none was provided.
    #[error("{0}")]
    LoginFailed(String),

    /// A refresh was requested but no refresh token is held.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// The refresh endpoint rejected the refresh token.
    #[error("Token refresh failed")]
    RefreshFailed,

    /// A request got a 401 and the follow-up refresh did not succeed.
    #[error("Authentication failed")]
    AuthenticationFailed,
}

impl AuthError {
    /// Fallback message when the server gives no detail for a failed login.
    pub const LOGIN_FAILED: &'static str = "Login failed";

    /// Build a login failure from an optional server-provided detail.
    pub fn login_failed(detail: Option<String>) -> Self {
        AuthError::LoginFailed(
            detail
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| Self::LOGIN_FAILED.to_string()),
        )
    }
}

/// A non-2xx HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// The server's `detail` message, if the body carried one.
    pub detail: Option<String>,
}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }

    /// Check if this is a 401 response.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP error! status: {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Any other failure while building, sending or reading a request.
    #[error("request failed: {message}")]
    Request { message: String },
}

/// Errors from a [`TokenStore`](crate::TokenStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored data could not be parsed.
    #[error("corrupt token store {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// The store's lock could not be taken.
    #[error("token store lock unavailable: {message}")]
    Lock { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid HTTP header name or value.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_messages_match_contract() {
        assert_eq!(
            AuthError::NoRefreshToken.to_string(),
            "No refresh token available"
        );
        assert_eq!(AuthError::RefreshFailed.to_string(), "Token refresh failed");
        assert_eq!(
            AuthError::AuthenticationFailed.to_string(),
            "Authentication failed"
        );
    }

    #[test]
    fn login_failed_falls_back_to_generic_message() {
        assert_eq!(AuthError::login_failed(None).to_string(), "Login failed");
        assert_eq!(
            AuthError::login_failed(Some("  ".into())).to_string(),
            "Login failed"
        );
        assert_eq!(
            AuthError::login_failed(Some("No active account".into())).to_string(),
            "No active account"
        );
    }

    #[test]
    fn http_error_carries_status() {
        let err = Error::from(HttpError::new(503, None));
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert!(!err.is_auth());
    }

    #[test]
    fn http_error_shows_detail() {
        let err = HttpError::new(403, Some("Forbidden".into()));
        assert_eq!(err.to_string(), "HTTP error! status: 403 (Forbidden)");
        assert!(!err.is_unauthorized());
    }
}
