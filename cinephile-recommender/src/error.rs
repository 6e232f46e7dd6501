//! Error types raised while loading or saving the preference profile.
#![forbid(unsafe_code)]

use cinephile_core::StoreError;
use thiserror::Error;

/// Errors raised while persisting the preference profile.
///
/// The engine never surfaces these to callers. They are logged and the
/// operation carries on with the in-memory profile.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// The store could not be read.
    #[error("failed to read preferences under key {key}")]
    Read {
        /// Storage key being read.
        key: &'static str,
        /// Source error from the store.
        #[source]
        source: StoreError,
    },
    /// The stored blob was not a valid preference profile.
    #[error("failed to decode preferences under key {key}")]
    Decode {
        /// Storage key being read.
        key: &'static str,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Serialising the profile failed.
    #[error("failed to encode preferences")]
    Encode {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The store could not be written.
    #[error("failed to write preferences under key {key}")]
    Write {
        /// Storage key being written.
        key: &'static str,
        /// Source error from the store.
        #[source]
        source: StoreError,
    },
}
