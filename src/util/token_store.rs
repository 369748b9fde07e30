//! File-backed bearer-token storage.
//!
//! The desktop analog of a browser localStorage slot: one opaque string
//! under a well-known path, surviving process restarts. A dumb holder:
//! no validation happens here, and absence means anonymous.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Durable holder for the current bearer credential.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. `None` if the file is missing, unreadable,
    /// or empty.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() { None } else { Some(token.to_owned()) }
    }

    /// Persist the token, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the directory or file cannot
    /// be written.
    pub fn set(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    /// Remove the stored token. Idempotent: a missing file is fine, and
    /// other removal failures are logged rather than returned.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "token clear failed"),
        }
    }
}

#[cfg(test)]
#[path = "token_store_test.rs"]
mod tests;
