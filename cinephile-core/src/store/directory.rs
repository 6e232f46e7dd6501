//! Filesystem-backed `PreferenceStore` writing one JSON file per key.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cinephile_fs::{ensure_parent_dir, read_optional_to_string, write_string};

use super::{PreferenceStore, StoreError};

/// Stores each key as `<root>/<key>.json`.
///
/// The root directory is created on the first write. Reads of a key that was
/// never written return `None`.
///
/// # Examples
/// ```no_run
/// use cinephile_core::{DirectoryStore, PreferenceStore};
///
/// # fn main() -> Result<(), cinephile_core::StoreError> {
/// let mut store = DirectoryStore::new(".cinephile");
/// store.set("movie_preferences", "{}")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStore {
    root: Utf8PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored files.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<Utf8PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey {
                key: key.to_owned(),
            });
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl PreferenceStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        read_optional_to_string(&path).map_err(|source| io_error(key, source))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        ensure_parent_dir(&path).map_err(|source| io_error(key, source))?;
        write_string(&path, value).map_err(|source| io_error(key, source))
    }
}

fn io_error(key: &str, source: io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_owned(),
        source,
    }
}
