//! # Session Store
//!
//! Durable key-value persistence for the session, surviving restarts.
//!
//! Exactly two logical keys exist: the bearer credential (`token`) and the
//! serialized user profile (`user`). The key names match the ones the web
//! client uses in browser local storage, so the on-disk shape stays
//! interoperable. Values are stored in plaintext with no TTL and no
//! encryption; that is a carried-over limitation of the platform, not a
//! design goal.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

/// Key holding the bearer credential.
const TOKEN_KEY: &str = "token";

/// Key holding the serialized user profile JSON.
const USER_KEY: &str = "user";

/// Errors that can occur when writing to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed session store, one file per key under a base directory.
///
/// Clone is cheap; clones share the same directory and therefore the same
/// durable state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the stored credential, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    /// Persists the credential.
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.write(TOKEN_KEY, token)
    }

    /// Removes the credential.
    pub fn remove_token(&self) {
        self.remove(TOKEN_KEY);
    }

    /// Returns the stored profile JSON, if any.
    #[must_use]
    pub fn user_json(&self) -> Option<String> {
        self.read(USER_KEY)
    }

    /// Persists the serialized profile.
    pub fn set_user_json(&self, json: &str) -> Result<(), StoreError> {
        self.write(USER_KEY, json)
    }

    /// Removes the stored profile.
    pub fn remove_user(&self) {
        self.remove(USER_KEY);
    }

    /// Removes both entries. Infallible: failures are logged and swallowed
    /// so logout can never fail.
    pub fn clear(&self) {
        self.remove(TOKEN_KEY);
        self.remove(USER_KEY);
    }

    /// True if neither key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token().is_none() && self.user_json().is_none()
    }

    fn read(&self, key: &str) -> Option<String> {
        let contents = fs::read_to_string(self.dir.join(key)).ok()?;
        if contents.is_empty() {
            None
        } else {
            Some(contents)
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        let path = self.dir.join(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(?path, error = %e, "Failed to remove session entry");
            }
        }
    }
}
