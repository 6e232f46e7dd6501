//! Core domain types for the Cinephile recommendation engine.
//!
//! The crate models the movie catalogue handed to the engine, the persisted
//! [`UserPreferences`] profile and the [`PreferenceStore`] capability used
//! to load and save it. It carries no randomness and no strategy logic; see
//! `cinephile-recommender` for those.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod decade;
pub mod movie;
pub mod profile;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use catalog::{
    Catalog, CatalogError, filter_by_genre, filter_by_rating, generate_movie_id, search_movies,
    sort_by_rating, sort_by_title, sort_by_year, unique_directors, unique_genres,
};
pub use decade::{UNKNOWN_DECADE, decade_of};
pub use movie::{Movie, NEUTRAL_RATING, RawMovie};
pub use profile::{Affinities, UserPreferences, ViewRecord};
#[cfg(feature = "store-fs")]
pub use store::DirectoryStore;
pub use store::{MemoryStore, PreferenceStore, StoreError};
