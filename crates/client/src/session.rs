//! The client's login session and its on-disk persistence.
//!
//! A [`Session`] is a plain value handed to every authenticated call.
//! [`SessionStore`] is the only place it touches disk: load once at
//! startup, save after each mutation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::models::{SessionUser, User};

/// File name of the persisted session inside the state directory.
pub const STORAGE_FILE: &str = "baby-list-user-storage.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref().filter(|u| u.is_logged_in)
    }

    /// Bearer token of the logged-in user, if any.
    pub fn token(&self) -> Option<&str> {
        self.user()
            .map(|u| u.token.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn login(&mut self, mut user: SessionUser) {
        user.is_logged_in = true;
        self.user = Some(user);
    }

    /// Merge fresh profile fields into the stored user. Ignored when no one
    /// is logged in or `fresh` is somebody else.
    pub fn update_user(&mut self, fresh: &User) {
        if let Some(current) = self.user.as_mut().filter(|u| u.id == fresh.id) {
            current.name.clone_from(&fresh.name);
            current.email.clone_from(&fresh.email);
            current.role.clone_from(&fresh.role);
        }
    }

    pub fn logout(&mut self) {
        self.user = None;
    }
}

/// On-disk layout: `{"state":{"user":...}}`.
#[derive(Serialize, Deserialize)]
struct Persisted {
    state: Session,
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store the session as [`STORAGE_FILE`] inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session. A missing file is an empty session.
    pub fn load(&self) -> Result<Session, ClientError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No stored session");
                return Ok(Session::default());
            }
            Err(e) => return Err(e.into()),
        };
        let persisted: Persisted = serde_json::from_str(&raw)?;
        Ok(persisted.state)
    }

    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let persisted = Persisted {
            state: session.clone(),
        };
        std::fs::write(&self.path, serde_json::to_vec_pretty(&persisted)?)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    pub fn login(&self, session: &mut Session, user: SessionUser) -> Result<(), ClientError> {
        session.login(user);
        self.save(session)
    }

    pub fn update_user(&self, session: &mut Session, fresh: &User) -> Result<(), ClientError> {
        session.update_user(fresh);
        self.save(session)
    }

    pub fn logout(&self, session: &mut Session) -> Result<(), ClientError> {
        session.logout();
        self.save(session)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn session_user(id: i64) -> SessionUser {
        SessionUser {
            id,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: "guest".into(),
            token: "a".repeat(64),
            is_logged_in: false,
        }
    }

    #[test]
    fn missing_file_loads_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        let session = store.load().unwrap();

        assert_eq!(session, Session::default());
        assert!(session.token().is_none());
    }

    #[test]
    fn login_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested"));
        let mut session = Session::default();

        store.login(&mut session, session_user(7)).unwrap();
        let reloaded = store.load().unwrap();

        assert_eq!(reloaded, session);
        assert_eq!(reloaded.user().map(|u| u.id), Some(7));
        assert_eq!(reloaded.token(), Some("a".repeat(64).as_str()));
    }

    #[test]
    fn file_uses_state_user_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let mut session = Session::default();
        store.login(&mut session, session_user(3)).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["state"]["user"]["id"], 3);
        assert_eq!(json["state"]["user"]["isLoggedIn"], true);
        assert!(store.path().ends_with(STORAGE_FILE));
    }

    #[test]
    fn logout_clears_persisted_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let mut session = Session::default();
        store.login(&mut session, session_user(1)).unwrap();

        store.logout(&mut session).unwrap();

        assert!(store.load().unwrap().user.is_none());
    }

    #[test]
    fn update_user_merges_only_matching_id() {
        let mut session = Session::default();
        session.login(session_user(5));

        let mut fresh = User {
            id: 5,
            name: "Ana Maria".into(),
            email: "am@example.com".into(),
            role: "guest".into(),
            created_at: Utc::now(),
        };
        session.update_user(&fresh);
        let user = session.user().unwrap();
        assert_eq!(user.name, "Ana Maria");
        assert_eq!(user.email, "am@example.com");
        assert_eq!(user.token, "a".repeat(64), "token survives a profile edit");

        fresh.id = 6;
        fresh.name = "Someone Else".into();
        session.update_user(&fresh);
        assert_eq!(session.user().unwrap().name, "Ana Maria");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err, ClientError::Json(_)));
    }

    #[test]
    fn stored_user_without_login_flag_has_no_token() {
        let session = Session {
            user: Some(session_user(2)),
        };

        assert!(session.user().is_none());
        assert!(session.token().is_none());
    }
}
