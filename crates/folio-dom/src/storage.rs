//! Web storage emulation
//!
//! A string key-value store with a disable switch so callers can be
//! exercised against storage being unavailable (private browsing,
//! quota, policy).

use std::collections::HashMap;

/// Storage failure
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is disabled")]
    Disabled,
}

/// Per-origin key-value storage
#[derive(Debug, Default)]
pub struct Storage {
    entries: HashMap<String, String>,
    disabled: bool,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.disabled {
            tracing::debug!("storage read of {key:?} while disabled");
            return Err(StorageError::Disabled);
        }
        Ok(self.entries.get(key).cloned())
    }

    /// Write a value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.disabled {
            tracing::debug!("storage write of {key:?} while disabled");
            return Err(StorageError::Disabled);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Remove a value
    pub fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        self.entries.remove(key);
        Ok(())
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Make all operations fail, or restore them
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
