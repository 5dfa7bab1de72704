//! Credential persistence.
//!
//! DESIGN
//! ======
//! The store is a tiny string key/value surface shaped like browser local
//! storage. Only one key is used in practice, [`TOKEN_KEY`]. Store calls are
//! infallible to callers: a write that cannot reach disk is logged and
//! dropped, so clearing a session can never fail.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key holding the bearer credential.
pub const TOKEN_KEY: &str = "token";

/// Durable string storage for session values.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[must_use]
pub fn token(store: &dyn SessionStore) -> Option<String> {
    store.get(TOKEN_KEY)
}

pub fn set_token(store: &dyn SessionStore, value: &str) {
    store.set(TOKEN_KEY, value);
}

pub fn clear_token(store: &dyn SessionStore) {
    store.remove(TOKEN_KEY);
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Store backed by a JSON object on disk.
///
/// Every call re-reads the file so separate processes sharing the path see
/// each other's writes. A missing or unreadable file reads as empty.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "session file corrupt; treating as empty");
            BTreeMap::new()
        })
    }

    fn save(&self, values: &BTreeMap<String, String>) {
        let result = serde_json::to_string_pretty(values)
            .map_err(std::io::Error::other)
            .and_then(|json| {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&self.path, json)
            });
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "session file write failed");
        }
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut values = self.load();
        apply(&mut values);
        self.save(&values);
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.update(|values| {
            values.insert(key.to_owned(), value.to_owned());
        });
    }

    fn remove(&self, key: &str) {
        self.update(|values| {
            values.remove(key);
        });
    }
}
