//! Facade crate for the Cinephile recommendation engine.
//!
//! This crate re-exports the core domain types and the engine, and exposes
//! the filesystem-backed preference store behind a feature flag.

#![forbid(unsafe_code)]

pub use cinephile_core::{
    Affinities, Catalog, CatalogError, MemoryStore, Movie, NEUTRAL_RATING, PreferenceStore,
    RawMovie, StoreError, UserPreferences, ViewRecord, generate_movie_id,
};

#[cfg(feature = "store-fs")]
pub use cinephile_core::DirectoryStore;

pub use cinephile_recommender::{
    Mood, PreferencesError, Recommendation, RecommendationEngine, RecommendationOptions,
    STORAGE_KEY, Stats, Strategy,
};
