//! Movie recommendation strategies over a fixed catalogue.
//!
//! [`RecommendationEngine`] picks one movie at a time from a caller-supplied
//! slice using one of eight [`Strategy`] values, explains the pick, and
//! learns from like/dislike feedback. The learned
//! [`UserPreferences`](cinephile_core::UserPreferences) profile is persisted
//! through any [`PreferenceStore`](cinephile_core::PreferenceStore).
//!
//! Randomness is injected. Use [`RecommendationEngine::seeded`] for
//! reproducible picks or [`RecommendationEngine::new`] with any `rand::Rng`.
//!
//! # Examples
//!
//! ```
//! use cinephile_core::{MemoryStore, Movie};
//! use cinephile_recommender::{RecommendationEngine, RecommendationOptions};
//!
//! let movies = vec![
//!     Movie::new("heat-1995", "Heat").with_genre("Crime").with_rating(4.5),
//!     Movie::new("up-2009", "Up").with_genre("Animation").with_rating(4.0),
//! ];
//! let mut engine = RecommendationEngine::seeded(MemoryStore::default(), 42);
//! let pick = engine.recommend_with_reason(&movies, &RecommendationOptions::new());
//! assert!(pick.movie.is_some());
//! assert_eq!(pick.reason, "Picked based on your viewing preferences");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod error;
mod scoring;
mod select;
mod strategies;
mod strategy;
mod types;

pub use engine::{RecommendationEngine, STORAGE_KEY};
pub use error::PreferencesError;
pub use scoring::{NEUTRAL_PREFERENCE, genre_similarity, movie_similarity, preference_score};
pub use strategy::{Mood, ParseMoodError, ParseStrategyError, Strategy};
pub use types::{Recommendation, RecommendationOptions, Stats};
