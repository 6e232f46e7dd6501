//! Request and response types for the recommendation engine.
#![forbid(unsafe_code)]

use cinephile_core::Movie;
use serde::{Deserialize, Serialize};

use crate::Strategy;

/// Options steering a single recommendation.
///
/// Every field is optional on the wire; absent filters do not constrain the
/// candidate set. Empty strings count as absent.
///
/// # Examples
/// ```
/// use cinephile_recommender::{RecommendationOptions, Strategy};
///
/// let options = RecommendationOptions::new()
///     .with_strategy(Strategy::MoodBased)
///     .with_mood("Happy");
/// assert_eq!(options.strategy(), Strategy::MoodBased);
/// assert_eq!(options.mood(), Some("Happy"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationOptions {
    /// Requested strategy, `smart_random` when absent.
    pub strategy: Option<Strategy>,
    /// Mood name for the mood-based strategy.
    pub mood: Option<String>,
    /// Genre text to match.
    pub genre_filter: Option<String>,
    /// Inclusive lower rating bound for the preference-weighted draw.
    pub min_rating: Option<f32>,
    /// Inclusive upper rating bound for the preference-weighted draw.
    pub max_rating: Option<f32>,
    /// Decade label such as `"1990s"`.
    pub decade: Option<String>,
    /// Skip recently suggested films in the preference-weighted draw.
    pub avoid_recent: bool,
    /// Accepted for compatibility; no strategy reads it.
    pub diversify: bool,
}

impl RecommendationOptions {
    /// Options with every filter unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy while returning `self` for chaining.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the mood while returning `self` for chaining.
    #[must_use]
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Set the genre filter while returning `self` for chaining.
    #[must_use]
    pub fn with_genre_filter(mut self, genre: impl Into<String>) -> Self {
        self.genre_filter = Some(genre.into());
        self
    }

    /// Set the minimum rating while returning `self` for chaining.
    #[must_use]
    pub const fn with_min_rating(mut self, rating: f32) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Set the maximum rating while returning `self` for chaining.
    #[must_use]
    pub const fn with_max_rating(mut self, rating: f32) -> Self {
        self.max_rating = Some(rating);
        self
    }

    /// Set the decade while returning `self` for chaining.
    #[must_use]
    pub fn with_decade(mut self, decade: impl Into<String>) -> Self {
        self.decade = Some(decade.into());
        self
    }

    /// Toggle recent-suggestion avoidance while returning `self`.
    #[must_use]
    pub const fn with_avoid_recent(mut self, avoid_recent: bool) -> Self {
        self.avoid_recent = avoid_recent;
        self
    }

    /// Strategy to run, defaulting to [`Strategy::SmartRandom`].
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self.strategy {
            Some(strategy) => strategy,
            None => Strategy::SmartRandom,
        }
    }

    /// Mood name, if set and non-empty.
    #[must_use]
    pub fn mood(&self) -> Option<&str> {
        non_empty(self.mood.as_deref())
    }

    /// Genre filter, if set and non-empty.
    #[must_use]
    pub fn genre_filter(&self) -> Option<&str> {
        non_empty(self.genre_filter.as_deref())
    }

    /// Decade label, if set and non-empty.
    #[must_use]
    pub fn decade(&self) -> Option<&str> {
        non_empty(self.decade.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// A recommendation together with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    /// Picked movie, `None` only for an empty catalogue.
    pub movie: Option<&'a Movie>,
    /// Why the movie was picked.
    pub reason: String,
    /// Strategy that was requested.
    pub strategy: Strategy,
}

/// Summary of the preference profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of view records held.
    pub total_viewed: usize,
    /// Up to five genres, strongest first.
    pub favorite_genres: Vec<String>,
    /// Up to five directors, strongest first.
    pub favorite_directors: Vec<String>,
    /// Up to three decades, strongest first.
    pub preferred_decades: Vec<String>,
}
