//! Filesystem token storage.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use tradebot_core::Result;
use tradebot_core::TokenStore;
use tradebot_core::error::StorageError;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Token store backed by a single JSON object file.
///
/// ```json
/// {"access_token": "...", "refresh_token": "..."}
/// ```
///
/// Writes are serialized through an exclusive lock on a sibling
/// `<name>.lock` file and land via write-to-temp plus rename, so readers
/// never observe a half-written file. A missing file reads as an empty
/// store.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at `path`. Nothing is touched on disk until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling("tmp")
    }

    /// `<file name>.<suffix>` next to the store file.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    fn map_io(&self, path: &Path, err: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.display().to_string(),
            source: err,
        }
    }

    /// Read the whole key/value map.
    fn read_entries(&self) -> Result<Map<String, Value>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.map_io(&self.path, e).into()),
        };

        if json.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::Corrupt {
                path: self.path.display().to_string(),
                reason: "expected a JSON object".to_string(),
            }
            .into()),
            Err(e) => Err(StorageError::Corrupt {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    /// Apply `update` to the stored map under the exclusive lock.
    fn modify<F>(&self, update: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>) -> bool,
    {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.map_io(parent, e))?;
        }

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| self.map_io(&lock_path, e))?;

        lock_file.lock_exclusive().map_err(|e| StorageError::Lock {
            message: format!("{}: {}", lock_path.display(), e),
        })?;

        let result = self.modify_locked(update);

        if let Err(e) = FileExt::unlock(&lock_file) {
            trace!(error = %e, "Failed to release token store lock");
        }

        result
    }

    fn modify_locked<F>(&self, update: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>) -> bool,
    {
        let mut entries = self.read_entries()?;
        if !update(&mut entries) {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&Value::Object(entries))?;
        let temp = self.temp_path();

        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        // Restrictive permissions (Unix only)
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp).map_err(|e| self.map_io(&temp, e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.map_io(&temp, e))?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|e| self.map_io(&self.path, e))?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries.get(key).and_then(Value::as_str).map(str::to_string))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!("Writing token");
        self.modify(|entries| {
            entries.insert(key.to_string(), Value::String(value.to_string()));
            true
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        debug!("Removing token");
        self.modify(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tradebot_core::error::Error;
    use tradebot_core::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

    fn store_in(dir: &TempDir) -> FileTokenStore {
        FileTokenStore::new(dir.path().join("nested").join("tokens.json"))
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn set_creates_parent_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set(ACCESS_TOKEN_KEY, "A1").unwrap();
        store.set(REFRESH_TOKEN_KEY, "R1").unwrap();

        let reopened = FileTokenStore::new(store.path());
        assert_eq!(reopened.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A1"));
        assert_eq!(reopened.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R1"));

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({"access_token": "A1", "refresh_token": "R1"})
        );
    }

    #[test]
    fn remove_drops_only_that_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(ACCESS_TOKEN_KEY, "A1").unwrap();
        store.set(REFRESH_TOKEN_KEY, "R1").unwrap();

        store.remove(ACCESS_TOKEN_KEY).unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R1"));

        // Removing again, or from a missing file, is fine.
        store.remove(ACCESS_TOKEN_KEY).unwrap();
        FileTokenStore::new(dir.path().join("absent.json"))
            .remove(ACCESS_TOKEN_KEY)
            .unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "not json").unwrap();

        let err = FileTokenStore::new(&path).get(ACCESS_TOKEN_KEY).unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[test]
    fn non_object_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = FileTokenStore::new(&path)
            .set(ACCESS_TOKEN_KEY, "A1")
            .unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(ACCESS_TOKEN_KEY, "A1").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn sibling_files_extend_the_full_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.lock");
        let store = FileTokenStore::new(&path);

        store.set(ACCESS_TOKEN_KEY, "A1").unwrap();
        store.set(REFRESH_TOKEN_KEY, "R1").unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A1"));
        assert!(dir.path().join("tokens.lock.lock").exists());

        // A store of another format in the same directory gets its own lock.
        let other = FileTokenStore::new(dir.path().join("tokens.yaml"));
        let json = FileTokenStore::new(dir.path().join("tokens.json"));
        assert_ne!(other.lock_path(), json.lock_path());
    }
}
