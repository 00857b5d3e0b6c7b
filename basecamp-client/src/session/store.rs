//! Session persistence
//!
//! Two independent slots: the bearer token and the customer profile.
//! Loads are tolerant; a missing or unreadable slot reads as empty so a
//! corrupted file can never wedge startup.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use shared::models::CustomerProfile;

use super::SessionError;

const TOKEN_FILE: &str = "token";
const PROFILE_FILE: &str = "profile.json";

/// Storage backend for the customer session
pub trait SessionStore: Send + Sync {
    fn load_token(&self) -> Option<String>;
    fn save_token(&self, token: &str) -> Result<(), SessionError>;
    fn clear_token(&self) -> Result<(), SessionError>;

    fn load_profile(&self) -> Option<CustomerProfile>;
    fn save_profile(&self, profile: &CustomerProfile) -> Result<(), SessionError>;
    fn clear_profile(&self) -> Result<(), SessionError>;
}

/// File-backed session store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }
}

impl SessionStore for FileSessionStore {
    fn load_token(&self) -> Option<String> {
        let path = self.token_path();
        if !path.exists() {
            return None;
        }
        let token = fs::read_to_string(&path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        self.ensure_dir()?;
        fs::write(self.token_path(), token)?;
        tracing::debug!("Token saved");
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        let path = self.token_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn load_profile(&self) -> Option<CustomerProfile> {
        let path = self.profile_path();
        if !path.exists() {
            return None;
        }
        let json = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&json).ok()
    }

    fn save_profile(&self, profile: &CustomerProfile) -> Result<(), SessionError> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.profile_path(), json)?;
        tracing::debug!(customer = %profile.id, "Profile saved");
        Ok(())
    }

    fn clear_profile(&self) -> Result<(), SessionError> {
        let path = self.profile_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// In-memory session store, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
    profile: Mutex<Option<CustomerProfile>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load_token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }

    fn load_profile(&self) -> Option<CustomerProfile> {
        self.profile
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn save_profile(&self, profile: &CustomerProfile) -> Result<(), SessionError> {
        *self.profile.lock().unwrap_or_else(|e| e.into_inner()) = Some(profile.clone());
        Ok(())
    }

    fn clear_profile(&self) -> Result<(), SessionError> {
        *self.profile.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MembershipTier;
    use tempfile::TempDir;

    fn sample_profile() -> CustomerProfile {
        CustomerProfile {
            id: "C-1".into(),
            name: Some("Asha Rao".into()),
            email: None,
            phone: Some("9999999999".into()),
            is_verified: true,
            tier: MembershipTier::Basic,
        }
    }

    #[test]
    fn file_store_round_trips_both_slots() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());

        assert_eq!(store.load_token(), None);
        assert!(store.load_profile().is_none());

        store.save_token("jwt-abc").unwrap();
        store.save_profile(&sample_profile()).unwrap();

        // A fresh store over the same directory sees the same session
        let reopened = FileSessionStore::new(dir.path());
        assert_eq!(reopened.load_token().as_deref(), Some("jwt-abc"));
        assert_eq!(reopened.load_profile().unwrap(), sample_profile());
    }

    #[test]
    fn file_store_clear_removes_files() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save_token("jwt-abc").unwrap();
        store.save_profile(&sample_profile()).unwrap();
        store.clear_token().unwrap();
        store.clear_profile().unwrap();

        assert_eq!(store.load_token(), None);
        assert!(store.load_profile().is_none());
        // Clearing an already-empty store is not an error
        store.clear_token().unwrap();
        store.clear_profile().unwrap();
    }

    #[test]
    fn file_store_tolerates_corrupt_profile() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());

        std::fs::write(dir.path().join(PROFILE_FILE), "not json").unwrap();
        assert!(store.load_profile().is_none());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemorySessionStore::new();
        store.save_token("jwt-abc").unwrap();
        store.save_profile(&sample_profile()).unwrap();
        assert_eq!(store.load_token().as_deref(), Some("jwt-abc"));
        assert_eq!(store.load_profile().unwrap(), sample_profile());
        store.clear_token().unwrap();
        assert_eq!(store.load_token(), None);
    }
}
