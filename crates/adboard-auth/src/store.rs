//! The credential store: register, login, logout over a pluggable backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::storage::{AuthBlob, CredentialStorage};

/// A registered user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Stored in the clear: this store is a local demo mechanism, not a
    /// security boundary.
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Registration input; id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Credential store over an injected [`CredentialStorage`] backend.
///
/// State is loaded once at construction and written back explicitly after
/// every mutation, so the persisted blob always reflects the last completed
/// operation.
pub struct AuthStore<S: CredentialStorage> {
    storage: S,
    blob: AuthBlob,
}

impl<S: CredentialStorage> AuthStore<S> {
    /// Opens the store, initializing from the persisted blob when present.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the persisted blob cannot be read or parsed.
    pub fn open(storage: S) -> Result<Self, AuthError> {
        let blob = storage.load()?.unwrap_or_default();
        Ok(Self { storage, blob })
    }

    /// Registers a new user. Returns `Ok(false)` without mutating anything
    /// when the email is already taken (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if persisting the updated blob fails.
    pub fn register(&mut self, new_user: NewUser) -> Result<bool, AuthError> {
        let exists = self
            .blob
            .users
            .iter()
            .any(|user| user.email.eq_ignore_ascii_case(&new_user.email));
        if exists {
            tracing::debug!(email = %new_user.email, "registration rejected, email exists");
            return Ok(false);
        }

        self.blob.users.push(User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            created_at: Utc::now(),
        });
        self.storage.save(&self.blob)?;
        Ok(true)
    }

    /// Logs in. Returns `Ok(true)` and persists the session only when a
    /// record matches both email and password; otherwise returns `Ok(false)`
    /// and mutates nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if persisting the updated blob fails.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool, AuthError> {
        let matched = self
            .blob
            .users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .map(|user| user.id);

        match matched {
            Some(id) => {
                self.blob.session = Some(id);
                self.storage.save(&self.blob)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clears the active session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if persisting the updated blob fails.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if self.blob.session.take().is_some() {
            self.storage.save(&self.blob)?;
        }
        Ok(())
    }

    /// `true` while a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// The logged-in user, if any. A dangling session id (user record
    /// removed from the blob out of band) reads as logged out.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        let session = self.blob.session?;
        self.blob.users.iter().find(|user| user.id == session)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
