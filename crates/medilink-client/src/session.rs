use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use medilink_common::models::auth::Session;

use crate::error::SessionError;

/// Slot holding the bearer credential.
pub const TOKEN_SLOT: &str = "token";
/// Slot holding the serialized session profile.
pub const PROFILE_SLOT: &str = "profile";

/// Narrow storage boundary under the session store. The two slots always
/// change as a pair: a profile must never exist without its token and vice
/// versa.
pub trait SessionStorage: Send + Sync {
    /// Persist both slots as one unit.
    fn write(&self, token: &str, profile: &str) -> Result<(), SessionError>;
    /// Read one slot. Missing or unreadable slots degrade to `None`; a
    /// corrupt store must never crash the caller.
    fn read(&self, slot: &str) -> Option<String>;
    /// Remove both slots. Idempotent.
    fn clear(&self);
}

/// Filesystem-backed storage: one file per slot under a session directory.
/// Writes go through a temp file and rename; the token lands last so an
/// interrupted write cannot leave a token without its profile.
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(slot)
    }

    fn write_slot(&self, slot: &str, value: &str) -> Result<(), SessionError> {
        let path = self.slot_path(slot);
        let tmp = self.dir.join(format!("{}.tmp", slot));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl SessionStorage for FileSessionStorage {
    fn write(&self, token: &str, profile: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        self.write_slot(PROFILE_SLOT, profile)?;
        self.write_slot(TOKEN_SLOT, token)?;
        Ok(())
    }

    fn read(&self, slot: &str) -> Option<String> {
        fs::read_to_string(self.slot_path(slot)).ok()
    }

    fn clear(&self) {
        // Token first: once it is gone the session no longer authenticates,
        // even if removing the profile fails.
        let _ = fs::remove_file(self.slot_path(TOKEN_SLOT));
        let _ = fs::remove_file(self.slot_path(PROFILE_SLOT));
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl SessionStorage for MemorySessionStorage {
    fn write(&self, token: &str, profile: &str) -> Result<(), SessionError> {
        let mut slots = self.slots.lock().unwrap();
        slots.insert(PROFILE_SLOT.to_string(), profile.to_string());
        slots.insert(TOKEN_SLOT.to_string(), token.to_string());
        Ok(())
    }

    fn read(&self, slot: &str) -> Option<String> {
        self.slots.lock().unwrap().get(slot).cloned()
    }

    fn clear(&self) {
        let mut slots = self.slots.lock().unwrap();
        slots.remove(TOKEN_SLOT);
        slots.remove(PROFILE_SLOT);
    }
}

/// Single source of truth for "who is logged in". Replaced wholesale on
/// establish/clear, never partially mutated; no network I/O.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn file_backed(dir: impl AsRef<Path>) -> Self {
        Self::new(Arc::new(FileSessionStorage::new(dir.as_ref())))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStorage::default()))
    }

    /// Persist the token and profile as one unit. Fails only if the
    /// underlying storage is unavailable.
    pub fn establish(&self, session: &Session) -> Result<(), SessionError> {
        let profile = serde_json::to_string(session)?;
        self.storage.write(&session.token, &profile)
    }

    /// The persisted profile, or `None`. Malformed stored data degrades to
    /// `None` rather than erroring.
    pub fn current(&self) -> Option<Session> {
        let raw = self.storage.read(PROFILE_SLOT)?;
        serde_json::from_str(&raw).ok()
    }

    /// The persisted credential, or `None`.
    pub fn token(&self) -> Option<String> {
        self.storage.read(TOKEN_SLOT)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Remove both slots. Idempotent.
    pub fn clear(&self) {
        self.storage.clear();
    }
}
