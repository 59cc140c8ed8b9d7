//! Session storage for the remote service.
//!
//! The login command stores the auth token and the serialized user in one
//! JSON file under the data directory. The file is read on startup to
//! restore a session without re-authenticating and cleared on logout.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// The authenticated user as reported by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Login name.
    pub username: String,
    /// Display name, when the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Role name, when the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One stored login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for the remote service.
    pub token: String,
    /// The authenticated user.
    pub user: UserProfile,
    /// When the session was stored.
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Create a session stamped with the current time.
    #[must_use]
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
            logged_in_at: Utc::now(),
        }
    }
}

/// File-backed store for the login session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the path of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, if any.
    ///
    /// A missing file means no session. An unreadable or corrupt file is
    /// logged and treated as no session, so a damaged file never locks the
    /// user out of `login`.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("Could not read session file {}: {err}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                debug!("Restored session for {}", session.user.username);
                Some(session)
            }
            Err(err) => {
                warn!(
                    "Ignoring corrupt session file {}: {err}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Persist a session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        debug!("Stored session at {}", self.path.display());
        Ok(())
    }

    /// Remove the stored session. Removing a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!(
            "briglog_session_{tag}_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        SessionStore::new(path)
    }

    fn test_session() -> Session {
        Session::new(
            "token-123",
            UserProfile {
                username: "operator".to_string(),
                display_name: Some("Operator".to_string()),
                role: None,
            },
        )
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let store = temp_store("missing");
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = temp_store("roundtrip");
        let session = test_session();

        store.save(&session).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, session);

        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_corrupt_file_is_none() {
        let store = temp_store("corrupt");
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_none());

        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_clear_removes_file() {
        let store = temp_store("clear");
        store.save(&test_session()).unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_missing_file_is_ok() {
        let store = temp_store("clear_missing");
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("briglog_session_dir_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let store = SessionStore::new(dir.join("nested").join("session.json"));

        store.save(&test_session()).unwrap();
        assert!(store.path().exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_user_profile_optional_fields() {
        let json = r#"{"username": "ana"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "ana");
        assert!(user.display_name.is_none());
        assert!(user.role.is_none());
    }
}
