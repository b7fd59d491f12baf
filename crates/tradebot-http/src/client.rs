//! Authenticated API client with transparent token refresh.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use tradebot_core::error::{AuthError, Error, HttpError, InvalidInputError, TransportError};
use tradebot_core::store::load_tokens;
use tradebot_core::{
    ACCESS_TOKEN_KEY, AccessToken, ApiUrl, AuthTokens, Credentials, REFRESH_TOKEN_KEY,
    RefreshToken, Result, TokenPair, TokenStore,
};

use crate::endpoints::{
    ErrorBody, RefreshRequest, RefreshResponse, TOKEN_OBTAIN, TOKEN_REFRESH, TokenRequest,
    TokenResponse,
};
use crate::options::RequestOptions;

/// Authentication state of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No access token held.
    Unauthenticated,
    /// An access token is held.
    Authenticated,
    /// A refresh call is in flight.
    AccessRefreshing,
}

/// HTTP client for the TradeBOT backend.
///
/// The client owns an access/refresh token pair, mirrored into a
/// [`TokenStore`] so a new client over the same store resumes the session.
/// Every request carries the access token as a bearer credential; a `401`
/// triggers exactly one refresh and one retry before the failure surfaces.
///
/// Clones share tokens and the refresh gate. Concurrent requests that hit
/// `401` together wait on a single refresh call and retry against its result.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tradebot_core::{ApiUrl, Credentials, MemoryTokenStore};
/// use tradebot_http::ApiClient;
///
/// # async fn example() -> Result<(), tradebot_core::Error> {
/// let api = ApiUrl::new("http://localhost:8000")?;
/// let client = ApiClient::new(api, Arc::new(MemoryTokenStore::new()))?;
///
/// client.login(&Credentials::new("bot", "secret")).await?;
/// let sources = client.input_sources().await?;
/// println!("{} input sources", sources.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base: ApiUrl,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
    tokens: RwLock<TokenPair>,
    refreshing: AtomicBool,
    refresh_gate: tokio::sync::Mutex<()>,
}

/// Marks a refresh as in flight until dropped.
struct RefreshingGuard<'a>(&'a AtomicBool);

impl<'a> RefreshingGuard<'a> {
    fn new(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for RefreshingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ApiClient {
    /// Create a client for `base`, loading any persisted tokens from `store`.
    pub fn new(base: ApiUrl, store: Arc<dyn TokenStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tradebot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;

        Self::with_http_client(base, store, http)
    }

    /// Create a client using a caller-configured `reqwest::Client`.
    pub fn with_http_client(
        base: ApiUrl,
        store: Arc<dyn TokenStore>,
        http: reqwest::Client,
    ) -> Result<Self> {
        let tokens = load_tokens(store.as_ref())?;
        debug!(
            api = %base,
            authenticated = tokens.access.is_some(),
            "Loaded tokens from store"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                base,
                http,
                store,
                tokens: RwLock::new(tokens),
                refreshing: AtomicBool::new(false),
                refresh_gate: tokio::sync::Mutex::new(()),
            }),
        })
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &ApiUrl {
        &self.inner.base
    }

    /// True iff an access token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.read_tokens().access.is_some()
    }

    pub fn auth_state(&self) -> AuthState {
        if self.inner.refreshing.load(Ordering::SeqCst) {
            AuthState::AccessRefreshing
        } else if self.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Snapshot of the current access token.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.read_tokens().access.clone()
    }

    /// Snapshot of the current refresh token.
    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.read_tokens().refresh.clone()
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Exchange credentials for a token pair and store it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginFailed`] with the server's `detail` message
    /// (or "Login failed") on a non-2xx response.
    #[instrument(skip(self, credentials), fields(api = %self.inner.base, username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthTokens> {
        info!("Requesting token pair");

        let request = TokenRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        let response = self
            .inner
            .http
            .post(self.inner.base.endpoint_url(TOKEN_OBTAIN))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = read_detail(response).await;
            warn!(status = status.as_u16(), "Login rejected");
            return Err(AuthError::login_failed(detail).into());
        }

        let body: TokenResponse = decode_body(response).await?;
        if body.access.is_empty() || body.refresh.is_empty() {
            warn!("Token response is missing a token");
            return Err(AuthError::login_failed(None).into());
        }
        let tokens = AuthTokens {
            access: AccessToken::new(body.access),
            refresh: RefreshToken::new(body.refresh),
        };

        let _gate = self.inner.refresh_gate.lock().await;
        self.inner.store.set(ACCESS_TOKEN_KEY, tokens.access.as_str())?;
        if let Err(e) = self
            .inner
            .store
            .set(REFRESH_TOKEN_KEY, tokens.refresh.as_str())
        {
            self.restore_stored_access();
            return Err(e);
        }
        *self.write_tokens() = TokenPair::authenticated(tokens.clone());

        debug!("Logged in");
        Ok(tokens)
    }

    /// Obtain a new access token using the held refresh token.
    ///
    /// A rotated refresh token in the response replaces the held one;
    /// otherwise the refresh token is kept.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NoRefreshToken`] without any network call when no
    ///   refresh token is held.
    /// - [`AuthError::RefreshFailed`] on a non-2xx response, after both
    ///   tokens have been cleared.
    #[instrument(skip(self), fields(api = %self.inner.base))]
    pub async fn refresh_access_token(&self) -> Result<AccessToken> {
        let _gate = self.inner.refresh_gate.lock().await;
        self.refresh_locked().await
    }

    /// Clear both tokens from memory and the store. Never fails.
    #[instrument(skip(self), fields(api = %self.inner.base))]
    pub fn logout(&self) {
        info!("Logging out");
        self.clear_tokens();
    }

    /// Performs the refresh call. Callers must hold the refresh gate.
    async fn refresh_locked(&self) -> Result<AccessToken> {
        let refresh = self
            .read_tokens()
            .refresh
            .clone()
            .ok_or(AuthError::NoRefreshToken)?;

        let _refreshing = RefreshingGuard::new(&self.inner.refreshing);
        info!("Refreshing access token");

        let response = self
            .inner
            .http
            .post(self.inner.base.endpoint_url(TOKEN_REFRESH))
            .json(&RefreshRequest {
                refresh: refresh.as_str(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Refresh rejected, clearing tokens");
            self.clear_tokens();
            return Err(AuthError::RefreshFailed.into());
        }

        let body: RefreshResponse = decode_body(response).await?;
        if body.access.is_empty() {
            warn!("Refresh response has no access token, clearing tokens");
            self.clear_tokens();
            return Err(AuthError::RefreshFailed.into());
        }
        let access = AccessToken::new(body.access);
        let rotated = body
            .refresh
            .filter(|r| !r.is_empty())
            .map(RefreshToken::new);

        self.inner.store.set(ACCESS_TOKEN_KEY, access.as_str())?;
        if let Some(ref refresh) = rotated {
            self.inner.store.set(REFRESH_TOKEN_KEY, refresh.as_str())?;
        }

        {
            let mut tokens = self.write_tokens();
            tokens.access = Some(access.clone());
            if let Some(refresh) = rotated {
                tokens.refresh = Some(refresh);
            }
        }

        debug!("Access token refreshed");
        Ok(access)
    }

    /// Refresh after a request carrying `sent` got a 401.
    ///
    /// If another task refreshed while this one waited on the gate, its
    /// token is reused and no second refresh call is made.
    async fn refresh_after_unauthorized(&self, sent: Option<&AccessToken>) -> Result<AccessToken> {
        let _gate = self.inner.refresh_gate.lock().await;

        if let Some(current) = self.access_token()
            && Some(&current) != sent
        {
            debug!("Access token already refreshed by a concurrent request");
            return Ok(current);
        }

        self.refresh_locked().await
    }

    /// Put the store's access key back in line with memory after a
    /// partial write.
    fn restore_stored_access(&self) {
        let previous = self.access_token();
        let result = match previous {
            Some(access) => self.inner.store.set(ACCESS_TOKEN_KEY, access.as_str()),
            None => self.inner.store.remove(ACCESS_TOKEN_KEY),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to restore access token in store");
        }
    }

    fn clear_tokens(&self) {
        self.write_tokens().clear();

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.inner.store.remove(key) {
                warn!(key, error = %e, "Failed to remove token from store");
            }
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Perform a request against `path` and decode the JSON response.
    ///
    /// On a `401` while a refresh token is held, refreshes once and re-issues
    /// the request once with the new token. An empty response body decodes
    /// as JSON `null`, so `T = ()` works for `204 No Content`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AuthenticationFailed`] when the refresh after a `401`
    ///   fails; both tokens are cleared.
    /// - [`Error::Http`] for any other non-2xx response.
    /// - [`Error::Transport`] for network failures, which are never retried.
    /// - [`Error::Decode`] when the body does not match `T`.
    #[instrument(skip(self, options), fields(method = %options.method()))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.inner.base.endpoint_url(path);
        let sent = self.access_token();

        let mut response = self.send(&url, &options, sent.as_ref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED && self.read_tokens().refresh.is_some() {
            debug!("Received 401, refreshing access token");

            let access = match self.refresh_after_unauthorized(sent.as_ref()).await {
                Ok(access) => access,
                Err(e) => {
                    warn!(error = %e, "Re-authentication failed, clearing tokens");
                    self.clear_tokens();
                    return Err(AuthError::AuthenticationFailed.into());
                }
            };

            debug!("Retrying request with refreshed token");
            response = self.send(&url, &options, Some(&access)).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let detail = read_detail(response).await;
            return Err(HttpError::new(status.as_u16(), detail).into());
        }

        decode_body(response).await
    }

    /// GET `path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::get()).await
    }

    /// POST `body` as JSON to `path`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::post().json(body)?).await
    }

    /// PATCH `body` as JSON to `path`.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::patch().json(body)?).await
    }

    /// DELETE `path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::delete()).await
    }

    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
        token: Option<&AccessToken>,
    ) -> Result<reqwest::Response> {
        let mut headers = options.headers().clone();
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = token {
            headers.insert(AUTHORIZATION, bearer_value(token)?);
        }

        let mut builder = self
            .inner
            .http
            .request(options.method().clone(), url)
            .headers(headers);
        if let Some(body) = options.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(transport_error)?;
        debug!(%url, status = response.status().as_u16(), "Response received");
        Ok(response)
    }

    fn read_tokens(&self) -> RwLockReadGuard<'_, TokenPair> {
        self.inner
            .tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tokens(&self) -> RwLockWriteGuard<'_, TokenPair> {
        self.inner
            .tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.inner.base)
            .field("state", &self.auth_state())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

fn bearer_value(token: &AccessToken) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&token.bearer()).map_err(|e| InvalidInputError::Header {
        name: AUTHORIZATION.to_string(),
        reason: e.to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Request { message }
    };
    Error::Transport(err)
}

/// Decode a response body as JSON, treating an empty body as `null`.
async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extract the backend's `detail` message from an error response, if any.
async fn read_detail(response: reqwest::Response) -> Option<String> {
    let bytes = response.bytes().await.ok()?;
    serde_json::from_slice::<ErrorBody>(&bytes).ok()?.detail
}
