//! Persistence backends for the credential store.
//!
//! The store itself never touches the filesystem directly; it goes through
//! [`CredentialStorage`], so tests run against [`MemoryStorage`] and the
//! binary against [`JsonFileStorage`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::store::User;

/// The persisted shape: all registered users plus the active session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthBlob {
    pub users: Vec<User>,
    /// Id of the logged-in user, if any.
    pub session: Option<Uuid>,
}

/// Storage backend seam for [`crate::AuthStore`].
pub trait CredentialStorage {
    /// Loads the persisted blob. `Ok(None)` means nothing was persisted yet,
    /// which is the normal first-run state.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on I/O failure or a malformed blob.
    fn load(&self) -> Result<Option<AuthBlob>, AuthError>;

    /// Persists the blob, replacing any previous state.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on I/O or serialization failure.
    fn save(&self, blob: &AuthBlob) -> Result<(), AuthError>;
}

/// Blob persisted as pretty-printed JSON at a fixed path.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_err(&self, source: std::io::Error) -> AuthError {
        AuthError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CredentialStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<AuthBlob>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        let blob = serde_json::from_str(&content)?;
        Ok(Some(blob))
    }

    fn save(&self, blob: &AuthBlob) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| *p != Path::new("")) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let content = serde_json::to_string_pretty(blob)?;
        std::fs::write(&self.path, content).map_err(|e| self.io_err(e))
    }
}

/// In-memory backend for tests. Counts saves so save-on-mutation behavior
/// is observable.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    blob: Option<AuthBlob>,
    save_count: u64,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already-persisted blob.
    #[must_use]
    pub fn with_blob(blob: AuthBlob) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                blob: Some(blob),
                save_count: 0,
            }),
        }
    }

    /// Number of times `save` was called.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.state.lock().map(|s| s.save_count).unwrap_or(0)
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Result<Option<AuthBlob>, AuthError> {
        Ok(self.state.lock().map(|s| s.blob.clone()).unwrap_or(None))
    }

    fn save(&self, blob: &AuthBlob) -> Result<(), AuthError> {
        if let Ok(mut state) = self.state.lock() {
            state.blob = Some(blob.clone());
            state.save_count += 1;
        }
        Ok(())
    }
}
