//! Preference and content-similarity scoring.
//!
//! Both scores are weighted means over whichever signals a movie carries.
//! Signals that are missing are left out of the mean rather than counted as
//! zero, so sparse catalogue records still compare sensibly.

#![forbid(unsafe_code)]

use cinephile_core::{Movie, UserPreferences};

/// Score returned when a movie carries no signal the profile can rate.
pub const NEUTRAL_PREFERENCE: f32 = 0.5;

const DIRECTOR_WEIGHT: f32 = 1.5;
const DIRECTOR_MATCH: f32 = 0.8;
const DECADE_MATCH: f32 = 0.3;
const RATING_SPAN: f32 = 5.0;
const UNKNOWN_DIRECTOR: &str = "Unknown";

/// Directed genre-to-genre similarity weights.
const GENRE_SIMILARITY: &[(&str, &[(&str, f32)])] = &[
    (
        "Action",
        &[
            ("Adventure", 0.8),
            ("Thriller", 0.7),
            ("Sci-Fi", 0.6),
            ("Crime", 0.5),
        ],
    ),
    (
        "Adventure",
        &[("Action", 0.8), ("Fantasy", 0.7), ("Sci-Fi", 0.6)],
    ),
    (
        "Comedy",
        &[("Romance", 0.6), ("Family", 0.5), ("Animation", 0.4)],
    ),
    (
        "Drama",
        &[
            ("Romance", 0.6),
            ("Biography", 0.7),
            ("History", 0.6),
            ("Crime", 0.5),
        ],
    ),
    (
        "Thriller",
        &[
            ("Action", 0.7),
            ("Horror", 0.6),
            ("Mystery", 0.8),
            ("Crime", 0.7),
        ],
    ),
    ("Horror", &[("Thriller", 0.6), ("Mystery", 0.5)]),
    ("Romance", &[("Drama", 0.6), ("Comedy", 0.6)]),
    (
        "Sci-Fi",
        &[
            ("Action", 0.6),
            ("Adventure", 0.6),
            ("Thriller", 0.5),
            ("Fantasy", 0.7),
        ],
    ),
    (
        "Fantasy",
        &[("Adventure", 0.7), ("Sci-Fi", 0.7), ("Animation", 0.5)],
    ),
    (
        "Crime",
        &[
            ("Thriller", 0.7),
            ("Drama", 0.5),
            ("Action", 0.5),
            ("Mystery", 0.6),
        ],
    ),
    (
        "Mystery",
        &[("Thriller", 0.8), ("Crime", 0.6), ("Horror", 0.5)],
    ),
    ("Biography", &[("Drama", 0.7), ("History", 0.6)]),
    (
        "History",
        &[("Biography", 0.6), ("Drama", 0.6), ("War", 0.5)],
    ),
    ("War", &[("History", 0.5), ("Drama", 0.5), ("Action", 0.4)]),
    (
        "Animation",
        &[("Family", 0.7), ("Comedy", 0.4), ("Fantasy", 0.5)],
    ),
    ("Family", &[("Animation", 0.7), ("Comedy", 0.5)]),
    (
        "Musical",
        &[("Drama", 0.4), ("Romance", 0.4), ("Comedy", 0.3)],
    ),
    ("Documentary", &[("Biography", 0.5), ("History", 0.5)]),
];

/// Look up the directed similarity from genre `from` to genre `to`.
///
/// Names are matched exactly. Pairs absent from the table return `None`,
/// including a genre paired with itself.
///
/// # Examples
/// ```
/// use cinephile_recommender::genre_similarity;
///
/// assert_eq!(genre_similarity("Thriller", "Mystery"), Some(0.8));
/// assert_eq!(genre_similarity("Mystery", "Action"), None);
/// ```
#[must_use]
pub fn genre_similarity(from: &str, to: &str) -> Option<f32> {
    GENRE_SIMILARITY
        .iter()
        .find(|(genre, _)| *genre == from)
        .and_then(|(_, related)| related.iter().find(|(genre, _)| *genre == to))
        .map(|(_, weight)| *weight)
}

/// Running weighted mean over optional signals.
#[derive(Debug, Default, Clone, Copy)]
struct WeightedMean {
    total: f32,
    weight: f32,
}

impl WeightedMean {
    #[expect(
        clippy::float_arithmetic,
        reason = "accumulating a weighted mean needs float sums"
    )]
    const fn add(&mut self, value: f32, weight: f32) {
        self.total += value * weight;
        self.weight += weight;
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the mean divides the weighted total by the total weight"
    )]
    const fn mean_or(self, empty: f32) -> f32 {
        if self.weight > 0.0 {
            self.total / self.weight
        } else {
            empty
        }
    }
}

/// Narrow a stored profile weight to the `f32` scale scores use.
#[expect(
    clippy::cast_possible_truncation,
    reason = "profile weights and ratings sit far inside the f32 range"
)]
pub(crate) const fn profile_weight(value: f64) -> f32 {
    value as f32
}

#[expect(
    clippy::float_arithmetic,
    reason = "closeness is a linear function of the rating gap"
)]
const fn rating_closeness(a: f32, b: f32) -> f32 {
    (RATING_SPAN - (a - b).abs()) / RATING_SPAN
}

/// Score how well `movie` matches the accumulated profile.
///
/// Genre and decade affinities count with weight 1, the director affinity
/// with weight 1.5, and closeness to the mean liked rating with weight 1.
/// Zero affinities are ignored. A movie with no counted signal scores
/// [`NEUTRAL_PREFERENCE`].
#[must_use]
pub fn preference_score(preferences: &UserPreferences, movie: &Movie) -> f32 {
    let mut mean = WeightedMean::default();

    for genre in movie.genres() {
        if let Some(affinity) = preferences.favorite_genres.signal(genre) {
            mean.add(profile_weight(affinity), 1.0);
        }
    }
    if let Some(affinity) = movie
        .director()
        .and_then(|director| preferences.favorite_directors.signal(director))
    {
        mean.add(profile_weight(affinity), DIRECTOR_WEIGHT);
    }
    if movie.has_rating()
        && let Some(average) = preferences.average_preferred_rating()
    {
        mean.add(rating_closeness(movie.rating, profile_weight(average)), 1.0);
    }
    if let Some(affinity) = preferences.decade_preferences.signal(&movie.decade()) {
        mean.add(profile_weight(affinity), 1.0);
    }

    mean.mean_or(NEUTRAL_PREFERENCE)
}

/// Content similarity between two movies in `0.0..=1.0`.
///
/// Every genre pair that is equal or listed in the similarity table adds a
/// term. Matching directors, both ratings present and matching decades add
/// one term each. Movies sharing nothing score zero.
#[must_use]
pub fn movie_similarity(a: &Movie, b: &Movie) -> f32 {
    let mut mean = WeightedMean::default();

    for left in a.genres() {
        for right in b.genres() {
            if left == right {
                mean.add(1.0, 1.0);
            } else if let Some(weight) = genre_similarity(left, right) {
                mean.add(weight, 1.0);
            }
        }
    }
    if let (Some(left), Some(right)) = (a.director(), b.director())
        && left == right
        && left != UNKNOWN_DIRECTOR
    {
        mean.add(DIRECTOR_MATCH, 1.0);
    }
    if a.has_rating() && b.has_rating() {
        mean.add(rating_closeness(a.rating, b.rating), 1.0);
    }
    if a.decade() == b.decade() {
        mean.add(DECADE_MATCH, 1.0);
    }

    mean.mean_or(0.0)
}
