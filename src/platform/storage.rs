//! Key/value storage backends
//!
//! The profile is one JSON blob under one key, so the interface is the
//! LocalStorage subset we need and nothing more.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Storage access failure
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage available (private mode, sandboxed iframe, native build)
    #[error("storage is not available")]
    Unavailable,
    /// The backend refused the operation (quota exceeded, access denied)
    #[error("storage rejected {op} for key {key:?}: {reason}")]
    Rejected {
        op: &'static str,
        key: String,
        reason: String,
    },
}

/// Minimal key/value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (native builds and tests)
///
/// Clones share the same map, so a test can keep a handle while the
/// profile store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, like a full LocalStorage
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Raw value under `key`
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Seed a raw value, bypassing `read_only`
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Rejected {
                op: "write",
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.insert_raw(key, value);
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if inner.is_none() {
            log::warn!("LocalStorage unavailable - progress will not be saved");
        }
        Self { inner }
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.inner.as_ref().ok_or(StorageError::Unavailable)?;
        storage.get_item(key).map_err(|e| StorageError::Rejected {
            op: "read",
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.inner.as_ref().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StorageError::Rejected {
            op: "write",
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_shares_between_clones() {
        let a = MemoryStorage::new();
        let mut b = a.clone();
        b.set_item("k", "v").unwrap();
        assert_eq!(a.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut s = MemoryStorage::read_only();
        let err = s.set_item("k", "v").unwrap_err();
        assert!(matches!(err, StorageError::Rejected { op: "write", .. }));
        assert_eq!(s.get_item("k").unwrap(), None);
    }
}
