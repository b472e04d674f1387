//! Explicit session context for the signed-in user.
//!
//! The user snapshot is saved on login, replaced on profile refresh and
//! cleared on logout or when the backend answers 401.

use kesfolio_core::errors::{Error, Result};
use kesfolio_core::UserProfile;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Storage backend for the session snapshot.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<UserProfile>>;
    fn save(&self, profile: &UserProfile) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Session kept only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    profile: RwLock<Option<UserProfile>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Session("session lock poisoned".to_string())
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<UserProfile>> {
        Ok(self.profile.read().map_err(poisoned)?.clone())
    }

    fn save(&self, profile: &UserProfile) -> Result<()> {
        *self.profile.write().map_err(poisoned)? = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.profile.write().map_err(poisoned)? = None;
        Ok(())
    }
}

/// Session persisted as a JSON file. A missing file means no session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<UserProfile>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, profile: &UserProfile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(profile)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Handle to the current session, shared by everything that needs the user.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// In-memory session, mainly for tests and short-lived tools.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// File-backed session when a path is given, in-memory otherwise.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(Arc::new(FileSessionStore::new(path))),
            None => Self::in_memory(),
        }
    }

    pub fn current(&self) -> Result<Option<UserProfile>> {
        self.store.load()
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.store.load(), Ok(Some(_)))
    }

    pub fn on_login(&self, profile: &UserProfile) -> Result<()> {
        debug!("Session opened for user {}", profile.id);
        self.store.save(profile)
    }

    pub fn on_profile_refresh(&self, profile: &UserProfile) -> Result<()> {
        self.store.save(profile)
    }

    pub fn on_logout(&self) -> Result<()> {
        debug!("Session cleared");
        self.store.clear()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-1".to_string(),
            username: "amina".to_string(),
            phone: "+254711111111".to_string(),
            balance: dec!(1200.50),
            referral_code: Some("AMINA1".to_string()),
            is_active: true,
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_memory_lifecycle() {
        let session = SessionContext::in_memory();
        assert!(!session.is_signed_in());

        session.on_login(&profile()).unwrap();
        assert_eq!(session.current().unwrap(), Some(profile()));

        let mut refreshed = profile();
        refreshed.balance = dec!(50);
        session.on_profile_refresh(&refreshed).unwrap();
        assert_eq!(session.current().unwrap().unwrap().balance, dec!(50));

        session.on_logout().unwrap();
        assert_eq!(session.current().unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_contexts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let first = SessionContext::from_path(Some(&path));
        assert_eq!(first.current().unwrap(), None);
        first.on_login(&profile()).unwrap();

        let second = SessionContext::from_path(Some(&path));
        assert_eq!(second.current().unwrap(), Some(profile()));

        second.on_logout().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine
        second.on_logout().unwrap();
        assert_eq!(first.current().unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().is_err());
    }
}
