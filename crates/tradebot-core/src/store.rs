//! Durable key/value storage for bearer tokens.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::Result;
use crate::tokens::{AccessToken, RefreshToken, TokenPair};

/// Storage key holding the current access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key holding the current refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Durable client-side key/value storage.
///
/// A client mirrors its token pair into a store under
/// [`ACCESS_TOKEN_KEY`] and [`REFRESH_TOKEN_KEY`] so that a new client
/// reading the same store resumes the same session. Removing an absent
/// key is not an error.
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` from the store.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read both token keys from a store. An empty value counts as absent.
pub fn load_tokens(store: &dyn TokenStore) -> Result<TokenPair> {
    Ok(TokenPair {
        access: non_empty(store.get(ACCESS_TOKEN_KEY)?).map(AccessToken::new),
        refresh: non_empty(store.get(REFRESH_TOKEN_KEY)?).map(RefreshToken::new),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// In-memory token store.
///
/// Clones share the same map, so two clients built over clones of one
/// store behave like two page loads over the same durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);

        store.set(ACCESS_TOKEN_KEY, "A1").unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A1"));

        store.set(ACCESS_TOKEN_KEY, "A2").unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A2"));

        store.remove(ACCESS_TOKEN_KEY).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let store = MemoryTokenStore::new();
        store.remove(REFRESH_TOKEN_KEY).unwrap();
        store.remove(REFRESH_TOKEN_KEY).unwrap();
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryTokenStore::new();
        let other = store.clone();
        store.set(REFRESH_TOKEN_KEY, "R1").unwrap();
        assert_eq!(other.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R1"));
    }

    #[test]
    fn load_tokens_reads_both_keys() {
        let store = MemoryTokenStore::new();
        assert!(load_tokens(&store).unwrap().is_empty());

        store.set(ACCESS_TOKEN_KEY, "A1").unwrap();
        store.set(REFRESH_TOKEN_KEY, "R1").unwrap();
        let pair = load_tokens(&store).unwrap();
        assert_eq!(pair.access, Some(AccessToken::new("A1")));
        assert_eq!(pair.refresh, Some(RefreshToken::new("R1")));
    }

    #[test]
    fn load_tokens_ignores_empty_values() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "").unwrap();
        store.set(REFRESH_TOKEN_KEY, "").unwrap();
        assert!(load_tokens(&store).unwrap().is_empty());
    }
}
