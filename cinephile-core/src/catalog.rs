//! Catalogue helpers: id generation, loading, search, filters and sorts.
//!
//! A [`Catalog`] is the fixed, in-memory candidate list handed to the
//! recommendation engine. It can be read from a JSON array holding either
//! complete [`Movie`] records or [`RawMovie`] watch-history rows.

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use crate::decade::parse_year;
use crate::{Movie, RawMovie};

/// Derive a stable movie id from its title and year.
///
/// The title is lower-cased and every run of characters outside `a-z0-9`
/// collapses into a single `-`.
///
/// # Examples
/// ```
/// use cinephile_core::generate_movie_id;
///
/// assert_eq!(
///     generate_movie_id("Eternal Sunshine of the Spotless Mind", "2004"),
///     "eternal-sunshine-of-the-spotless-mind-2004"
/// );
/// assert_eq!(generate_movie_id("Avengers: Endgame", "2019"), "avengers-endgame-2019");
/// ```
pub fn generate_movie_id(title: &str, year: &str) -> String {
    let mut slug = String::with_capacity(title.len() + year.len() + 1);
    let mut in_separator = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }
    slug.push('-');
    slug.push_str(year);
    slug
}

/// Errors raised while loading a catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalogue payload was not a JSON array of movie records.
    #[error("failed to parse movie catalogue")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogRecord {
    Full(Movie),
    Raw(RawMovie),
}

impl From<CatalogRecord> for Movie {
    fn from(record: CatalogRecord) -> Self {
        match record {
            CatalogRecord::Full(movie) => movie,
            CatalogRecord::Raw(raw) => raw.into(),
        }
    }
}

/// An owned, ordered list of candidate movies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Wrap an existing list of movies.
    pub const fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// Parse a JSON array of movie or raw watch-history records.
    ///
    /// Records with an `id` are taken as-is; records without one are
    /// treated as [`RawMovie`] rows and receive a generated id.
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] when the payload is not a JSON array
    /// of recognisable records.
    ///
    /// # Examples
    /// ```
    /// use cinephile_core::Catalog;
    ///
    /// # fn main() -> Result<(), cinephile_core::CatalogError> {
    /// let catalog = Catalog::from_json(
    ///     r#"[{"title":"Joker","year":"2019","rating":4,"genre":"Crime, Drama"}]"#,
    /// )?;
    /// assert_eq!(catalog.movies()[0].id, "joker-2019");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json(payload: &str) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(payload)?;
        log::debug!("parsed {} catalogue records", records.len());
        Ok(Self::new(records.into_iter().map(Movie::from).collect()))
    }

    /// Borrow the movies in catalogue order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Find a movie by id.
    pub fn find(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    /// Number of movies in the catalogue.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Report whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Consume the wrapper and return the movies.
    pub fn into_inner(self) -> Vec<Movie> {
        self.movies
    }
}

impl FromIterator<Movie> for Catalog {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Movies rated at least `min_rating`.
pub fn filter_by_rating(movies: &[Movie], min_rating: f32) -> Vec<&Movie> {
    movies
        .iter()
        .filter(|movie| movie.rating >= min_rating)
        .collect()
}

/// Movies whose genre text contains `genre`, ignoring case.
pub fn filter_by_genre<'a>(movies: &'a [Movie], genre: &str) -> Vec<&'a Movie> {
    let needle = genre.to_lowercase();
    movies
        .iter()
        .filter(|movie| movie.genre.to_lowercase().contains(&needle))
        .collect()
}

/// Movies whose title, lead actor or director contains `query`, ignoring case.
pub fn search_movies<'a>(movies: &'a [Movie], query: &str) -> Vec<&'a Movie> {
    let needle = query.to_lowercase();
    movies
        .iter()
        .filter(|movie| {
            [&movie.title, &movie.lead_actor, &movie.director]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sorted, de-duplicated genre tokens across the catalogue.
pub fn unique_genres(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .flat_map(Movie::genres)
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted, de-duplicated directors across the catalogue.
pub fn unique_directors(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .map(|movie| movie.director.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Movies ordered by rating, highest first. Equal ratings keep catalogue order.
pub fn sort_by_rating(movies: &[Movie]) -> Vec<&Movie> {
    let mut sorted: Vec<_> = movies.iter().collect();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted
}

/// Movies ordered by release year, newest first. Unparseable years sort last.
pub fn sort_by_year(movies: &[Movie]) -> Vec<&Movie> {
    let mut sorted: Vec<_> = movies.iter().collect();
    sorted.sort_by_key(|movie| std::cmp::Reverse(parse_year(&movie.year)));
    sorted
}

/// Movies ordered alphabetically by title.
pub fn sort_by_title(movies: &[Movie]) -> Vec<&Movie> {
    let mut sorted: Vec<_> = movies.iter().collect();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));
    sorted
}
