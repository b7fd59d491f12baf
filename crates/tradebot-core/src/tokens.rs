//! Bearer token types.

use std::fmt;

/// An access token for authenticated API requests.
///
/// Access tokens are short-lived JWTs attached as `Authorization: Bearer`
/// to every authenticated request.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when constructing authorization headers or persisting.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

impl PartialEq<&str> for AccessToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A refresh token for obtaining new access tokens.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when constructing token refresh requests or persisting.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

impl PartialEq<&str> for RefreshToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The token pair issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

/// The in-memory credential pair held by a client.
///
/// Both tokens are present when authenticated and both absent when not.
/// An access token without a refresh token only occurs transiently, or
/// when storage held just one of the two keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    pub access: Option<AccessToken>,
    pub refresh: Option<RefreshToken>,
}

impl TokenPair {
    /// A pair holding both tokens.
    pub fn authenticated(tokens: AuthTokens) -> Self {
        Self {
            access: Some(tokens.access),
            refresh: Some(tokens.refresh),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }

    pub fn clear(&mut self) {
        self.access = None;
        self.refresh = None;
    }
}
