//! Durable string-keyed storage behind the slot store.
//!
//! The store only ever sees this trait; the browser's origin-scoped
//! `localStorage` backs it on wasm, a JSON file backs it on native shells,
//! and the in-memory map backs tests.

use dioxus_logger::tracing::warn;
use std::collections::HashMap;

/// A synchronous, string-keyed, string-valued persistent map.
pub trait StorageBackend {
    fn load(&self, key: &str) -> Result<Option<String>, BackendError>;
    fn store(&mut self, key: &str, raw: &str) -> Result<(), BackendError>;
    fn remove(&mut self, key: &str) -> Result<(), BackendError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("storage quota exceeded while writing `{key}`")]
    QuotaExceeded { key: String },
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// A `HashMap`-backed store with an optional byte quota.
///
/// The quota makes the browser's storage limit reproducible in tests:
/// writes that would push the total payload past it fail the same way a
/// full `localStorage` does.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &str, raw: &str) -> Result<(), BackendError> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + raw.len();
            if needed > quota {
                return Err(BackendError::QuotaExceeded { key: key.to_string() });
            }
        }
        self.entries.insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`, scoped to the page's origin.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageBackend {
    pub fn new() -> Result<Self, BackendError> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| BackendError::Unavailable("localStorage is not accessible".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorageBackend {
    fn load(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.storage
            .get_item(key)
            .map_err(|_| BackendError::Unavailable("localStorage read was denied".into()))
    }

    fn store(&mut self, key: &str, raw: &str) -> Result<(), BackendError> {
        // The only set_item failure the platform reports is the quota.
        self.storage
            .set_item(key, raw)
            .map_err(|_| BackendError::QuotaExceeded { key: key.to_string() })
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        self.storage
            .remove_item(key)
            .map_err(|_| BackendError::Unavailable("localStorage remove was denied".into()))
    }
}

/// A single JSON file holding every slot, for the desktop and server shells.
///
/// The whole map is rewritten on every store; slot values are small and
/// writes are user-paced, so simplicity wins over incremental IO.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileBackend {
    path: std::path::PathBuf,
    entries: HashMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileBackend {
    /// Opens (or lazily creates) the backing file. Unreadable or corrupt
    /// contents start the map empty rather than failing the app.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("store file {} is corrupt, starting empty: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    fn flush(&self) -> Result<(), BackendError> {
        let raw = serde_json::to_string(&self.entries)
            .map_err(|err| BackendError::Unavailable(err.to_string()))?;
        std::fs::write(&self.path, raw)
            .map_err(|err| BackendError::Unavailable(err.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &str, raw: &str) -> Result<(), BackendError> {
        let previous = self.entries.insert(key.to_string(), raw.to_string());
        if let Err(err) = self.flush() {
            // Keep memory and disk consistent: roll the map back.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// The platform's natural backend: `localStorage` in the browser, a JSON
/// file next to the process elsewhere.
pub fn default_backend() -> Box<dyn StorageBackend> {
    #[cfg(target_arch = "wasm32")]
    {
        match LocalStorageBackend::new() {
            Ok(backend) => Box::new(backend),
            Err(err) => {
                warn!("falling back to in-memory storage: {err}");
                Box::new(MemoryBackend::new())
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = std::env::var("BINGE_STORE_FILE")
            .unwrap_or_else(|_| "bingelist-store.json".to_string());
        Box::new(FileBackend::open(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_round_trips() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.load("k").unwrap(), None);
        backend.store("k", "v").unwrap();
        assert_eq!(backend.load("k").unwrap().as_deref(), Some("v"));
        backend.remove("k").unwrap();
        assert_eq!(backend.load("k").unwrap(), None);
    }

    #[test]
    fn quota_counts_replacements_not_both_versions() {
        let mut backend = MemoryBackend::with_quota(10);
        backend.store("k", "12345678").unwrap(); // 1 + 8 bytes
        // Replacing the value must not double-count the old one.
        backend.store("k", "87654321").unwrap();
        let err = backend.store("k", "123456789012").unwrap_err();
        assert_eq!(err, BackendError::QuotaExceeded { key: "k".into() });
        // The failed write left the previous value in place.
        assert_eq!(backend.load("k").unwrap().as_deref(), Some("87654321"));
    }

    #[test]
    fn file_backend_survives_reopen() {
        let path = std::env::temp_dir().join(format!(
            "bingelist-backend-test-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let mut backend = FileBackend::open(&path);
            backend.store("watchlist", "[1,2,3]").unwrap();
        }
        let reopened = FileBackend::open(&path);
        assert_eq!(reopened.load("watchlist").unwrap().as_deref(), Some("[1,2,3]"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn file_backend_starts_empty_on_corrupt_contents() {
        let path = std::env::temp_dir().join(format!(
            "bingelist-backend-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{broken").unwrap();

        let backend = FileBackend::open(&path);
        assert_eq!(backend.load("anything").unwrap(), None);

        let _ = std::fs::remove_file(&path);
    }
}
