//! Key-value persistence for preference profiles.
//!
//! The `PreferenceStore` trait is the only storage capability the engine
//! needs: read a string under a key and write one back. Hosts supply the
//! backing medium, whether browser storage, a directory of JSON files or an
//! in-memory map in tests.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(feature = "store-fs")]
mod directory;

#[cfg(feature = "store-fs")]
pub use directory::DirectoryStore;

/// Errors raised by a [`PreferenceStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed for key {key}")]
    Io {
        /// Key being read or written.
        key: String,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The key cannot be represented by the backing medium.
    #[error("invalid storage key {key:?}")]
    InvalidKey {
        /// Offending key.
        key: String,
    },
    /// The store refused the operation.
    #[error("storage unavailable for key {key}: {reason}")]
    Unavailable {
        /// Key being read or written.
        key: String,
        /// Human-readable explanation.
        reason: String,
    },
}

/// Synchronous string storage addressed by key.
///
/// # Examples
///
/// ```rust
/// use cinephile_core::{MemoryStore, PreferenceStore};
///
/// # fn main() -> Result<(), cinephile_core::StoreError> {
/// let mut store = MemoryStore::default();
/// assert_eq!(store.get("movie_preferences")?, None);
/// store.set("movie_preferences", "{}")?;
/// assert_eq!(store.get("movie_preferences")?.as_deref(), Some("{}"));
/// # Ok(())
/// # }
/// ```
pub trait PreferenceStore {
    /// Return the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory `PreferenceStore` backed by a `HashMap`.
///
/// Values live only as long as the store does.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create a store pre-populated with a single entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entries: HashMap::from([(key.into(), value.into())]),
        }
    }

    /// Borrow the raw value under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingStore;
    use rstest::rstest;

    #[rstest]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::default();
        store.set("k", "first").expect("set");
        store.set("k", "second").expect("overwrite");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("second"));
        assert_eq!(store.raw("k"), Some("second"));
    }

    #[rstest]
    fn missing_keys_read_as_none() {
        let store = MemoryStore::with_entry("present", "1");
        assert!(store.get("absent").expect("get").is_none());
    }

    #[rstest]
    fn boxed_stores_delegate() {
        let mut store: Box<dyn PreferenceStore> = Box::new(FailingStore);
        assert!(matches!(
            store.set("k", "v"),
            Err(StoreError::Unavailable { .. })
        ));
        assert!(store.get("k").is_err());
    }
}
