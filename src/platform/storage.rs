//! Key-value storage backends
//!
//! The game persists two things: the best score and the settings blob. Both go
//! through [`Storage`], a string key-value store shaped like the browser's
//! LocalStorage. Writes are best-effort; callers log failures and carry on.

use std::collections::HashMap;
use std::fmt;

/// Storage failure
#[derive(Debug)]
pub enum StorageError {
    /// No backing store exists (private browsing, no window)
    Unavailable,
    /// The backend refused the operation
    Rejected {
        /// Backend-supplied description
        reason: String,
    },
    /// Filesystem failure (native file store)
    Io(std::io::Error),
    /// The store's own document could not be encoded
    Encode(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Rejected { reason } => write!(f, "storage rejected request: {}", reason),
            StorageError::Io(err) => write!(f, "storage I/O error: {}", err),
            StorageError::Encode(err) => write!(f, "storage encoding error: {}", err),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Encode(err) => Some(err),
            StorageError::Unavailable | StorageError::Rejected { .. } => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Encode(err)
    }
}

/// String key-value store
pub trait Storage {
    /// Read a value; `Ok(None)` when the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// In-process store (tests, and hosts with nothing durable)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }

    /// Number of successful `set_item` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open the window's LocalStorage, if the browser allows it
    pub fn open() -> Option<Self> {
        let inner = web_sys::window()?.local_storage().ok()??;
        Some(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|err| StorageError::Rejected {
                reason: format!("{:?}", err),
            })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|err| StorageError::Rejected {
                reason: format!("{:?}", err),
            })
    }
}

/// JSON file holding every key (native builds)
///
/// Writes go to a sibling temp file first and are renamed over the original,
/// so a crash mid-write leaves the previous contents intact.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStorage {
    path: std::path::PathBuf,
    items: HashMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    /// Open (or lazily create) the store at `path`
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(items) => items,
                Err(err) => {
                    log::warn!("Ignoring corrupt store {}: {}", path.display(), err);
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                log::warn!("Could not read store {}: {}", path.display(), err);
                HashMap::new()
            }
        };
        Self { path, items }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.items)?;
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn test_boxed_storage_delegates() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::with_item("k", "1"));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("1"));
        storage.set_item("k", "2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("2"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut storage = FileStorage::open(&path);
        assert_eq!(storage.get_item("best").unwrap(), None);
        storage.set_item("best", "12").unwrap();

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get_item("best").unwrap().as_deref(), Some("12"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_storage_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut storage = FileStorage::open(&path);
        assert_eq!(storage.get_item("best").unwrap(), None);
        storage.set_item("best", "3").unwrap();
        assert_eq!(
            FileStorage::open(&path).get_item("best").unwrap().as_deref(),
            Some("3")
        );
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::Rejected {
            reason: "QuotaExceededError".to_string(),
        };
        assert_eq!(err.to_string(), "storage rejected request: QuotaExceededError");
    }
}
