//! Preference profiles: the engine's only persisted state.
//!
//! A [`UserPreferences`] value accumulates like/dislike signals as affinity
//! weights and keeps three bounded windows: recent ratings, recent
//! suggestions and view history. The JSON shape uses camelCase keys and
//! every field defaults, so older blobs missing newer fields still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Movie;

/// Maximum number of view records kept.
pub const MAX_VIEW_HISTORY: usize = 50;
/// Capacity of the recently-suggested ring buffer.
pub const SUGGESTION_WINDOW: usize = 10;
/// Maximum number of liked ratings kept.
pub const RATING_WINDOW: usize = 20;

/// Affinity delta applied to genres and decades on a like.
pub const GENRE_LIKE_DELTA: f64 = 0.1;
/// Affinity delta applied to directors on a like.
pub const DIRECTOR_LIKE_DELTA: f64 = 0.15;
/// Affinity delta applied to every key on a dislike.
pub const DISLIKE_DELTA: f64 = -0.05;
/// Upper bound for affinity weights. There is no lower bound.
pub const MAX_AFFINITY: f64 = 1.0;

/// Named affinity weights, ordered by key.
///
/// Weights are `f64` so a stored profile reloads with the exact values it
/// was saved with.
///
/// Weights move by additive nudges and are clamped from above at
/// [`MAX_AFFINITY`] only, so repeated dislikes can push a weight arbitrarily
/// far below zero.
///
/// # Examples
/// ```
/// use cinephile_core::Affinities;
///
/// let mut genres = Affinities::new();
/// genres.nudge("Drama", 0.6);
/// genres.nudge("Drama", 0.6);
/// assert_eq!(genres.weight("Drama"), Some(1.0));
/// genres.nudge("Horror", -0.05);
/// assert_eq!(genres.weight("Horror"), Some(-0.05));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Affinities {
    weights: BTreeMap<String, f64>,
}

impl Affinities {
    /// Construct an empty set of weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the weight for `key`, if present.
    pub fn weight(&self, key: &str) -> Option<f64> {
        self.weights.get(key).copied()
    }

    /// Return the weight for `key` when it is present and non-zero.
    ///
    /// Scoring ignores zero weights the same way it ignores missing ones.
    pub fn signal(&self, key: &str) -> Option<f64> {
        self.weight(key).filter(|weight| *weight != 0.0)
    }

    /// Add `delta` to the weight for `key`, starting from zero.
    ///
    /// The result is capped at [`MAX_AFFINITY`].
    pub fn nudge(&mut self, key: &str, delta: f64) {
        let entry = self.weights.entry(key.to_owned()).or_insert(0.0);
        *entry = MAX_AFFINITY.min(*entry + delta);
    }

    /// Keys with the highest weights, at most `limit`, highest first.
    ///
    /// Equal weights keep key order.
    pub fn top(&self, limit: usize) -> Vec<String> {
        let mut ranked: Vec<_> = self.weights.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(a.1));
        ranked
            .into_iter()
            .take(limit)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Key with the highest weight. Ties resolve to the first key.
    pub fn strongest(&self) -> Option<&str> {
        self.weights
            .iter()
            .fold(None, |best: Option<(&String, f64)>, (key, weight)| {
                match best {
                    Some((_, top)) if top >= *weight => best,
                    _ => Some((key, *weight)),
                }
            })
            .map(|(key, _)| key.as_str())
    }

    /// Number of weighted keys.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Report whether no weights are recorded.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate keys and weights in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(key, weight)| (key.as_str(), *weight))
    }
}

/// A single like/dislike signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    /// Identifier of the rated movie.
    pub movie_id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Whether the signal was positive. Older blobs may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

impl ViewRecord {
    /// Report whether the record is an explicit like.
    pub fn is_liked(&self) -> bool {
        self.liked == Some(true)
    }
}

/// Persisted preference profile.
///
/// # Examples
/// ```
/// use cinephile_core::{Movie, UserPreferences};
///
/// let mut prefs = UserPreferences::default();
/// let movie = Movie::new("heat-1995", "Heat")
///     .with_year("1995")
///     .with_genre("Crime, Thriller")
///     .with_director("Michael Mann")
///     .with_rating(4.5);
/// prefs.record_feedback(&movie, true, 0);
/// assert_eq!(prefs.decade_preferences.weight("1990s"), Some(0.1));
/// assert_eq!(prefs.preferred_ratings, [4.5]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    /// Genre affinities.
    pub favorite_genres: Affinities,
    /// Director affinities.
    pub favorite_directors: Affinities,
    /// Ratings of liked movies, oldest first, at most [`RATING_WINDOW`].
    pub preferred_ratings: Vec<f64>,
    /// Reserved; no strategy reads it.
    pub recently_watched: Vec<String>,
    /// Recently suggested ids, newest first, at most [`SUGGESTION_WINDOW`].
    pub recently_suggested: Vec<String>,
    /// Reserved; no strategy reads it.
    pub mood_preferences: BTreeMap<String, f64>,
    /// Decade affinities keyed by labels such as `"1990s"`.
    pub decade_preferences: Affinities,
    /// Like/dislike signals, oldest first, at most [`MAX_VIEW_HISTORY`].
    pub view_history: Vec<ViewRecord>,
}

impl UserPreferences {
    /// Construct an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a like or dislike for `movie` observed at `timestamp` (ms).
    pub fn record_feedback(&mut self, movie: &Movie, liked: bool, timestamp: u64) {
        let (genre_delta, director_delta) = if liked {
            (GENRE_LIKE_DELTA, DIRECTOR_LIKE_DELTA)
        } else {
            (DISLIKE_DELTA, DISLIKE_DELTA)
        };

        for genre in movie.genres() {
            self.favorite_genres.nudge(genre, genre_delta);
        }
        if let Some(director) = movie.director() {
            self.favorite_directors.nudge(director, director_delta);
        }
        if liked && movie.has_rating() {
            self.preferred_ratings.push(f64::from(movie.rating));
            if self.preferred_ratings.len() > RATING_WINDOW {
                self.preferred_ratings.remove(0);
            }
        }
        self.decade_preferences.nudge(&movie.decade(), genre_delta);

        self.view_history.push(ViewRecord {
            movie_id: movie.id.clone(),
            timestamp,
            liked: Some(liked),
        });
        if self.view_history.len() > MAX_VIEW_HISTORY {
            let excess = self.view_history.len() - MAX_VIEW_HISTORY;
            self.view_history.drain(..excess);
        }
    }

    /// Push `movie_id` to the front of the suggestion window.
    ///
    /// When the window overflows exactly one id is dropped from the back.
    pub fn mark_suggested(&mut self, movie_id: &str) {
        self.recently_suggested.insert(0, movie_id.to_owned());
        if self.recently_suggested.len() > SUGGESTION_WINDOW {
            self.recently_suggested.pop();
        }
    }

    /// Report whether `movie_id` is inside the suggestion window.
    pub fn is_recently_suggested(&self, movie_id: &str) -> bool {
        self.recently_suggested.iter().any(|id| id == movie_id)
    }

    /// Mean of the preferred ratings window, if any.
    #[expect(
        clippy::cast_precision_loss,
        reason = "the rating window holds at most twenty entries"
    )]
    pub fn average_preferred_rating(&self) -> Option<f64> {
        if self.preferred_ratings.is_empty() {
            return None;
        }
        let total: f64 = self.preferred_ratings.iter().sum();
        Some(total / self.preferred_ratings.len() as f64)
    }

    /// Ids of the most recent liked records, at most `limit`, oldest first.
    pub fn recent_likes(&self, limit: usize) -> Vec<&str> {
        let liked: Vec<&str> = self
            .view_history
            .iter()
            .filter(|record| record.is_liked())
            .map(|record| record.movie_id.as_str())
            .collect();
        let skip = liked.len().saturating_sub(limit);
        liked.into_iter().skip(skip).collect()
    }
}
