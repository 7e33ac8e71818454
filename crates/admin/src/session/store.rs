//! Durable session file.
//!
//! The operator's token and identity are persisted together in one JSON file
//! and only ever written or removed as a unit - there is no way to clear the
//! token while keeping the identity, or vice versa.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use alkhair_core::Operator;

/// On-disk session record: the two fixed keys, stored and cleared together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub operator: Operator,
}

/// File-backed store for the admin session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if any.
    ///
    /// A missing file means no session. An unreadable or unparseable file is
    /// treated the same way (logged, then ignored): a corrupt session is not
    /// a credential.
    #[must_use]
    pub fn load(&self) -> Option<StoredSession> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to read session file");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "discarding corrupt session file");
                None
            }
        }
    }

    /// Persist a session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; the caller decides whether a
    /// session that could not be persisted is fatal (it is not - the
    /// in-memory session still works for this process).
    pub fn save(&self, session: &StoredSession) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(session)?;
        std::fs::write(&self.path, json)
    }

    /// Remove the persisted session. Missing file is not an error.
    pub fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), %err, "failed to remove session file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    fn session() -> StoredSession {
        StoredSession {
            token: "tok-123".to_owned(),
            operator: Operator {
                name: "Samir".to_owned(),
                email: None,
            },
        }
    }

    #[test]
    fn test_save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().is_none());

        store.save(&session()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.operator.name, "Samir");

        store.clear();
        assert!(store.load().is_none());
        // Clearing twice is fine.
        store.clear();
    }

    #[test]
    fn test_corrupt_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), b"not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested/deeper/session.json"));
        store.save(&session()).unwrap();
        assert!(store.load().is_some());
    }
}
