//! Local key-value persistence.
//!
//! The console keeps its side tables (recycle-bin snapshots, session token
//! and user, the mocked user directory) in a directory of one file per fixed
//! key, read at store construction and rewritten on every mutating action.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::InfraError;

/// Fixed storage keys shared across the console stores.
pub mod keys {
    pub const DELETED_RELEASES: &str = "deleted_releases";
    pub const SESSION_TOKEN: &str = "token";
    pub const SESSION_USER: &str = "user";
    pub const USER_DIRECTORY: &str = "users";
}

/// Directory-backed key-value store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    base: PathBuf,
}

impl LocalStore {
    /// Open (creating if necessary) a store rooted at `base`.
    pub fn open(base: impl Into<PathBuf>) -> Result<Self, InfraError> {
        let base = base.into();
        std::fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, InfraError> {
        match std::fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(InfraError::Io(err)),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), InfraError> {
        std::fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    /// Remove a key; removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), InfraError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::Io(err)),
        }
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, InfraError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .map_err(|err| InfraError::storage(format!("key `{key}` holds invalid JSON: {err}")))?;
        Ok(Some(value))
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), InfraError> {
        let raw = serde_json::to_string(value)
            .map_err(|err| InfraError::storage(format!("key `{key}` failed to serialize: {err}")))?;
        self.set(key, &raw)
    }
}
