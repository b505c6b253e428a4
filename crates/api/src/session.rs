//! Persisted session (user + bearer token).
//!
//! The session survives restarts as a single JSON document on disk. It is
//! read once at startup to restore the signed-in user and re-attach the
//! bearer token; it is written on login and deleted on logout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::User;

/// Errors that can occur while persisting the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session file is not valid JSON.
    #[error("corrupt session file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The signed-in user and their bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// File-backed session persistence.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store writing to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the session document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if any.
    ///
    /// A missing file means no session; a corrupt file is an error so the
    /// caller can decide whether to discard it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_str(&contents)?;
        Ok(Some(session))
    }

    /// Persist the session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Delete the persisted session, if present.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feira_livre_core::{UserId, UserRole};

    fn temp_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!(
            "feira-livre-session-{}-{name}.json",
            std::process::id()
        ));
        SessionStore::new(path)
    }

    fn sample_session() -> Session {
        Session {
            user: User {
                id: UserId::new(1),
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                role: UserRole::Client,
                photo: None,
                addresses: Vec::new(),
            },
            token: "token-abc".to_string(),
        }
    }

    #[test]
    fn test_load_missing_is_none() {
        let store = temp_store("missing");
        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_save_load_clear_roundtrip() {
        let store = temp_store("roundtrip");
        store.save(&sample_session()).expect("save");

        let loaded = store.load().expect("load").expect("session present");
        assert_eq!(loaded.token, "token-abc");
        assert_eq!(loaded.user.email, "ana@example.com");

        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
        // Clearing twice is fine
        store.clear().expect("clear again");
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let store = temp_store("corrupt");
        std::fs::write(store.path(), "not json").expect("write");
        assert!(matches!(store.load(), Err(SessionError::Corrupt(_))));
        store.clear().expect("clear");
    }
}
