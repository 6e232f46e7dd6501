//! Movie records as supplied by a catalogue.
//!
//! The engine treats movies as read-only. Fields that a catalogue omits fall
//! back to empty values so scoring can degrade instead of failing.

use serde::{Deserialize, Serialize};

use crate::catalog::generate_movie_id;
use crate::decade::decade_of;

/// Rating substituted when a strategy multiplies by a missing rating.
pub const NEUTRAL_RATING: f32 = 3.0;

/// A single watched film.
///
/// `genre` holds comma-joined free text such as `"Crime, Drama"`. Use
/// [`Movie::genres`] to iterate the trimmed tokens.
///
/// # Examples
/// ```
/// use cinephile_core::Movie;
///
/// let movie = Movie::new("joker-2019", "Joker")
///     .with_year("2019")
///     .with_genre("Crime, Drama")
///     .with_rating(4.0);
/// let genres: Vec<_> = movie.genres().collect();
/// assert_eq!(genres, ["Crime", "Drama"]);
/// assert_eq!(movie.decade(), "2010s");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Stable identifier, usually derived from title and year.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Release year as free text.
    #[serde(default)]
    pub year: String,
    /// Personal rating from 0 to 5 in half steps. Zero means unrated.
    #[serde(default)]
    pub rating: f32,
    /// Comma-joined genre names.
    #[serde(default)]
    pub genre: String,
    /// Director name, empty when unknown.
    #[serde(default)]
    pub director: String,
    /// Lead actor name.
    #[serde(default)]
    pub lead_actor: String,
    /// Poster image URL.
    #[serde(default)]
    pub poster: Option<String>,
    /// Backdrop image URL.
    #[serde(default)]
    pub backdrop: Option<String>,
    /// Short synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
}

impl Movie {
    /// Construct a movie with only an id and title set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the release year while returning `self` for chaining.
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Set the rating while returning `self` for chaining.
    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    /// Set the comma-joined genre text while returning `self` for chaining.
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Set the director while returning `self` for chaining.
    #[must_use]
    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    /// Set the lead actor while returning `self` for chaining.
    #[must_use]
    pub fn with_lead_actor(mut self, lead_actor: impl Into<String>) -> Self {
        self.lead_actor = lead_actor.into();
        self
    }

    /// Iterate the whitespace-trimmed genre tokens, skipping empty ones.
    ///
    /// The genre text is split on every call; nothing is cached.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
    }

    /// Return the director exactly as catalogued, or `None` when empty.
    ///
    /// Surrounding whitespace is kept, so `" Agnès Varda"` and
    /// `"Agnès Varda"` are different directors.
    pub fn director(&self) -> Option<&str> {
        (!self.director.is_empty()).then_some(self.director.as_str())
    }

    /// Report whether the movie carries a usable rating.
    ///
    /// Zero and non-finite ratings count as missing.
    pub fn has_rating(&self) -> bool {
        self.rating.is_finite() && self.rating != 0.0
    }

    /// Return the rating, or `fallback` when it is missing.
    pub fn rating_or(&self, fallback: f32) -> f32 {
        if self.has_rating() {
            self.rating
        } else {
            fallback
        }
    }

    /// Decade bucket such as `"1990s"`, or `"Unknown"`.
    pub fn decade(&self) -> String {
        decade_of(&self.year)
    }

    /// Render the rating as stars, using a sparkle for half steps.
    ///
    /// # Examples
    /// ```
    /// use cinephile_core::Movie;
    ///
    /// let movie = Movie::new("m", "M").with_rating(3.5);
    /// assert_eq!(movie.rating_stars(), "⭐⭐⭐✨");
    /// ```
    pub fn rating_stars(&self) -> &'static str {
        const STARS: [(f32, &str); 8] = [
            (5.0, "⭐⭐⭐⭐⭐"),
            (4.5, "⭐⭐⭐⭐✨"),
            (4.0, "⭐⭐⭐⭐"),
            (3.5, "⭐⭐⭐✨"),
            (3.0, "⭐⭐⭐"),
            (2.5, "⭐⭐✨"),
            (2.0, "⭐⭐"),
            (1.5, "⭐✨"),
        ];
        STARS
            .iter()
            .find(|(rating, _)| (self.rating - rating).abs() < f32::EPSILON)
            .map_or("⭐", |(_, stars)| *stars)
    }
}

/// A film as recorded in a watch-history dump, before it has an id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMovie {
    /// Display title.
    pub title: String,
    /// Release year as free text.
    pub year: String,
    /// Personal rating from 0 to 5.
    #[serde(default)]
    pub rating: f32,
    /// Comma-joined genre names.
    #[serde(default)]
    pub genre: String,
    /// Lead actor name.
    #[serde(default)]
    pub lead_actor: String,
    /// Director name.
    #[serde(default)]
    pub director: String,
}

impl From<RawMovie> for Movie {
    fn from(raw: RawMovie) -> Self {
        Self {
            id: generate_movie_id(&raw.title, &raw.year),
            title: raw.title,
            year: raw.year,
            rating: raw.rating,
            genre: raw.genre,
            director: raw.director,
            lead_actor: raw.lead_actor,
            poster: None,
            backdrop: None,
            plot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Action", &["Action"])]
    #[case(" Crime ,Drama ", &["Crime", "Drama"])]
    #[case("Horror,, Comedy", &["Horror", "Comedy"])]
    #[case("", &[])]
    fn genres_are_trimmed_tokens(#[case] genre: &str, #[case] expected: &[&str]) {
        let movie = Movie::new("m", "M").with_genre(genre);
        let genres: Vec<_> = movie.genres().collect();
        assert_eq!(genres, expected);
    }

    #[rstest]
    #[case(0.0, 3.0)]
    #[case(f32::NAN, 3.0)]
    #[case(4.5, 4.5)]
    fn missing_ratings_use_fallback(#[case] rating: f32, #[case] expected: f32) {
        let movie = Movie::new("m", "M").with_rating(rating);
        assert!((movie.rating_or(NEUTRAL_RATING) - expected).abs() < f32::EPSILON);
    }

    #[rstest]
    fn empty_director_is_absent() {
        assert!(Movie::new("m", "M").director().is_none());
        assert_eq!(
            Movie::new("m", "M").with_director("Agnès Varda").director(),
            Some("Agnès Varda")
        );
    }

    #[rstest]
    #[case(" Agnès Varda")]
    #[case("Agnès Varda ")]
    #[case("  ")]
    fn director_keeps_surrounding_whitespace(#[case] director: &str) {
        let movie = Movie::new("m", "M").with_director(director);
        assert_eq!(movie.director(), Some(director));
    }

    #[rstest]
    #[case(5.0, "⭐⭐⭐⭐⭐")]
    #[case(2.5, "⭐⭐✨")]
    #[case(1.0, "⭐")]
    #[case(0.0, "⭐")]
    fn stars_follow_half_steps(#[case] rating: f32, #[case] expected: &str) {
        assert_eq!(Movie::new("m", "M").with_rating(rating).rating_stars(), expected);
    }

    #[rstest]
    fn raw_movies_gain_generated_ids() {
        let raw = RawMovie {
            title: "Inside Out 2".into(),
            year: "2024".into(),
            rating: 3.0,
            genre: "Animation, Adventure".into(),
            lead_actor: "Amy Poehler".into(),
            director: "Kelsey Mann".into(),
        };
        let movie = Movie::from(raw);
        assert_eq!(movie.id, "inside-out-2-2024");
        assert!(movie.poster.is_none());
        assert_eq!(movie.director, "Kelsey Mann");
    }

    #[rstest]
    fn deserialises_partial_records() {
        let movie: Movie =
            serde_json::from_str(r#"{"id":"x","leadActor":"Someone"}"#).expect("valid movie");
        assert_eq!(movie.lead_actor, "Someone");
        assert!(movie.genre.is_empty());
        assert!(!movie.has_rating());
    }
}
