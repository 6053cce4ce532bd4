//! The shared form/session state store.
//!
//! One process-wide map from field id to the value the user last entered,
//! shared by every concurrently rendered tree and written through to disk on
//! every mutation. The distinguished `"phone"` key stitches multi-screen
//! flows together: it is written once after a successful OTP request and read
//! back by later screens as a default.

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Field id under which the phone number is shared across flows.
pub const PHONE_KEY: &str = "phone";

/// On-disk layout: a single JSON record under a fixed file name.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedForm {
    values: AHashMap<String, String>,
}

/// A cheaply cloneable handle to the shared store.
///
/// All mutation goes through [`set_value`](FormStore::set_value) (and the
/// phone/reset helpers built on it); assignment is atomic per key and the
/// last write wins. Reads return snapshots.
#[derive(Debug, Clone)]
pub struct FormStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    values: RwLock<AHashMap<String, String>>,
    path: Option<PathBuf>,
}

impl FormStore {
    /// A store that never touches disk. Hosts use this for tests and
    /// ephemeral sessions.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                values: RwLock::new(AHashMap::new()),
                path: None,
            }),
        }
    }

    /// Opens the store backed by the given file, restoring whatever was
    /// persisted there. A missing or corrupt file starts the store empty;
    /// that is never fatal.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<PersistedForm>(&content) {
                Ok(persisted) => {
                    debug!(?path, entries = persisted.values.len(), "Restored form state");
                    persisted.values
                }
                Err(err) => {
                    error!(?path, %err, "Stored form state is corrupt; starting empty");
                    AHashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => AHashMap::new(),
            Err(err) => {
                error!(?path, %err, "Could not read stored form state; starting empty");
                AHashMap::new()
            }
        };
        Self {
            inner: Arc::new(StoreInner {
                values: RwLock::new(values),
                path: Some(path),
            }),
        }
    }

    /// The conventional storage location under the user's data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("tatami").join("form-storage.json"))
    }

    pub fn value(&self, id: &str) -> Option<String> {
        self.inner.values.read().get(id).cloned()
    }

    /// Writes a field value, persisting the new state. Re-setting a field to
    /// the value it already holds is a no-op, on disk as well as in memory.
    pub fn set_value(&self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        {
            let mut values = self.inner.values.write();
            if values.get(&id).is_some_and(|existing| *existing == value) {
                return;
            }
            values.insert(id, value);
        }
        self.persist();
    }

    pub fn phone(&self) -> Option<String> {
        self.value(PHONE_KEY)
    }

    pub fn set_phone(&self, phone: impl Into<String>) {
        self.set_value(PHONE_KEY, phone);
    }

    /// Clears every field. The only way the store is ever emptied.
    pub fn reset(&self) {
        self.inner.values.write().clear();
        self.persist();
    }

    /// A point-in-time copy of all field values.
    pub fn snapshot(&self) -> AHashMap<String, String> {
        self.inner.values.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values.read().is_empty()
    }

    /// Best-effort write-through. Persistence failures are logged, never
    /// surfaced: losing a draft value must not break the running screen.
    fn persist(&self) {
        let Some(path) = self.inner.path.as_deref() else {
            return;
        };
        let persisted = PersistedForm {
            values: self.inner.values.read().clone(),
        };
        if let Err(err) = write_record(path, &persisted) {
            warn!(?path, %err, "Could not persist form state");
        }
    }
}

fn write_record(path: &Path, record: &PersistedForm) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let store = FormStore::in_memory();
        store.set_value("name", "a");
        store.set_value("name", "b");
        assert_eq!(store.value("name").as_deref(), Some("b"));
    }

    #[test]
    fn phone_helpers_use_the_shared_key() {
        let store = FormStore::in_memory();
        store.set_phone("9123456789");
        assert_eq!(store.value(PHONE_KEY).as_deref(), Some("9123456789"));
        assert_eq!(store.phone().as_deref(), Some("9123456789"));
    }

    #[test]
    fn reset_clears_everything() {
        let store = FormStore::in_memory();
        store.set_value("a", "1");
        store.set_phone("2");
        store.reset();
        assert!(store.is_empty());
    }

    #[test]
    fn clones_share_state() {
        let store = FormStore::in_memory();
        let other = store.clone();
        store.set_value("otp", "123456");
        assert_eq!(other.value("otp").as_deref(), Some("123456"));
    }
}
