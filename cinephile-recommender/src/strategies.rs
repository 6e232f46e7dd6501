//! Candidate filtering and selection for each [`Strategy`].
//!
//! Every strategy returns a movie borrowed from the catalogue it was given,
//! or `None` when its candidate set is empty. The engine applies the global
//! fallback; strategies only fall back to one another.

#![forbid(unsafe_code)]

use std::collections::HashMap;

use cinephile_core::{Movie, NEUTRAL_RATING, UserPreferences};
use rand::Rng;

use crate::scoring::{movie_similarity, preference_score, profile_weight};
use crate::select::{Jitter, jittered, pick_top, pick_top_percent, pick_uniform};
use crate::{Mood, RecommendationOptions, Strategy};

const SMART_TOP_PERCENT: usize = 20;
const MOOD_TOP_PERCENT: usize = 15;
const GENRE_TOP_PERCENT: usize = 20;
const GEMS_TOP_PERCENT: usize = 30;
const SIMILAR_TOP_PERCENT: usize = 15;
const TIME_TOP_COUNT: usize = 5;

const HIGH_RATING: f32 = 4.0;
const GEM_MIN_RATING: f32 = 3.0;
const GEM_MAX_RATING: f32 = 4.5;
const DEFAULT_DIRECTOR_AFFINITY: f32 = 0.5;
const MIN_DIRECTOR_FILMS: usize = 2;
const LIKED_WINDOW: usize = 10;
const DEFAULT_DECADE: &str = "2010s";
const UNKNOWN_DIRECTOR: &str = "Unknown";

/// Borrowed view of the engine state a strategy needs.
pub(crate) struct Picker<'p, R: ?Sized> {
    pub(crate) preferences: &'p UserPreferences,
    pub(crate) rng: &'p mut R,
}

impl<R: Rng + ?Sized> Picker<'_, R> {
    /// Run `strategy` against `movies`.
    pub(crate) fn pick<'m>(
        &mut self,
        strategy: Strategy,
        movies: &'m [Movie],
        options: &RecommendationOptions,
    ) -> Option<&'m Movie> {
        match strategy {
            Strategy::SmartRandom => self.smart_random(movies, options),
            Strategy::MoodBased => self.mood_based(movies, options),
            Strategy::GenreFocused => self.genre_focused(movies, options),
            Strategy::DirectorFocused => self.director_focused(movies),
            Strategy::HighRated => self.high_rated(movies),
            Strategy::HiddenGems => self.hidden_gems(movies),
            Strategy::TimePeriod => self.time_period(movies, options),
            Strategy::SimilarToLiked => self.similar_to_liked(movies),
        }
    }

    fn unseen<'m>(&self, movies: &'m [Movie]) -> impl Iterator<Item = &'m Movie> {
        let preferences = self.preferences;
        movies
            .iter()
            .filter(move |movie| !preferences.is_recently_suggested(&movie.id))
    }

    fn smart_random<'m>(
        &mut self,
        movies: &'m [Movie],
        options: &RecommendationOptions,
    ) -> Option<&'m Movie> {
        let preferences = self.preferences;
        let candidates: Vec<&Movie> = movies
            .iter()
            .filter(|movie| passes_filters(movie, preferences, options))
            .collect();
        let scored = jittered(&candidates, Jitter::SMART, self.rng, |movie| {
            preference_score(preferences, movie)
        });
        pick_top_percent(scored, SMART_TOP_PERCENT, self.rng)
    }

    fn unfiltered<'m>(&mut self, movies: &'m [Movie]) -> Option<&'m Movie> {
        self.smart_random(movies, &RecommendationOptions::default())
    }

    fn mood_based<'m>(
        &mut self,
        movies: &'m [Movie],
        options: &RecommendationOptions,
    ) -> Option<&'m Movie> {
        let Some(name) = options.mood() else {
            return self.smart_random(movies, options);
        };
        let Ok(mood) = name.parse::<Mood>() else {
            log::debug!("unknown mood {name:?}; drawing without filters");
            return self.unfiltered(movies);
        };

        let wanted = mood.genres();
        let candidates: Vec<&Movie> = movies
            .iter()
            .filter(|movie| mood_matches(movie, wanted) > 0)
            .collect();
        let scored = jittered(&candidates, Jitter::MOOD, self.rng, |movie| {
            match_weight(mood_matches(movie, wanted), movie.rating_or(NEUTRAL_RATING))
        });
        pick_top_percent(scored, MOOD_TOP_PERCENT, self.rng)
    }

    fn genre_focused<'m>(
        &mut self,
        movies: &'m [Movie],
        options: &RecommendationOptions,
    ) -> Option<&'m Movie> {
        let Some(genre) = options.genre_filter() else {
            return self.smart_random(movies, options);
        };
        let needle = genre.to_lowercase();
        let candidates: Vec<&Movie> = self
            .unseen(movies)
            .filter(|movie| movie.genre.to_lowercase().contains(&needle))
            .collect();
        let scored = jittered(&candidates, Jitter::GENRE, self.rng, |movie| {
            movie.rating_or(NEUTRAL_RATING)
        });
        pick_top_percent(scored, GENRE_TOP_PERCENT, self.rng)
    }

    fn director_focused<'m>(&mut self, movies: &'m [Movie]) -> Option<&'m Movie> {
        let Some(director) = self.favoured_director(movies) else {
            log::debug!("no director has {MIN_DIRECTOR_FILMS} films; drawing without filters");
            return self.unfiltered(movies);
        };
        let films: Vec<&Movie> = self
            .unseen(movies)
            .filter(|movie| movie.director() == Some(director))
            .collect();
        pick_uniform(&films, self.rng)
    }

    /// Weighted draw over directors with several films.
    ///
    /// Directors are visited in order of first appearance and an earlier
    /// director keeps the lead on equal scores.
    fn favoured_director<'m>(&mut self, movies: &'m [Movie]) -> Option<&'m str> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for director in movies
            .iter()
            .filter_map(Movie::director)
            .filter(|director| *director != UNKNOWN_DIRECTOR)
        {
            let count = counts.entry(director).or_insert_with(|| {
                order.push(director);
                0
            });
            *count += 1;
        }

        let mut best: Option<(&str, f32)> = None;
        for director in order {
            let count = counts.get(director).copied().unwrap_or_default();
            if count < MIN_DIRECTOR_FILMS {
                continue;
            }
            let affinity = self
                .preferences
                .favorite_directors
                .signal(director)
                .map_or(DEFAULT_DIRECTOR_AFFINITY, profile_weight);
            let score = director_score(count, affinity, Jitter::UNIT.sample(self.rng));
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((director, score));
            }
        }
        best.map(|(director, _)| director)
    }

    fn high_rated<'m>(&mut self, movies: &'m [Movie]) -> Option<&'m Movie> {
        let candidates: Vec<&Movie> = self
            .unseen(movies)
            .filter(|movie| movie.rating >= HIGH_RATING)
            .collect();
        if candidates.is_empty() {
            let options = RecommendationOptions::new().with_min_rating(HIGH_RATING);
            return self.smart_random(movies, &options);
        }
        pick_uniform(&candidates, self.rng)
    }

    fn hidden_gems<'m>(&mut self, movies: &'m [Movie]) -> Option<&'m Movie> {
        let preferences = self.preferences;
        let candidates: Vec<&Movie> = self
            .unseen(movies)
            .filter(|movie| (GEM_MIN_RATING..GEM_MAX_RATING).contains(&movie.rating))
            .collect();
        let scored = jittered(&candidates, Jitter::UNIT, self.rng, |movie| {
            preference_score(preferences, movie)
        });
        pick_top_percent(scored, GEMS_TOP_PERCENT, self.rng)
    }

    fn time_period<'m>(
        &mut self,
        movies: &'m [Movie],
        options: &RecommendationOptions,
    ) -> Option<&'m Movie> {
        let preferences = self.preferences;
        let target = options
            .decade()
            .or_else(|| preferences.decade_preferences.strongest())
            .unwrap_or(DEFAULT_DECADE);
        let candidates: Vec<&Movie> = self
            .unseen(movies)
            .filter(|movie| movie.decade() == target)
            .collect();
        let mut scored = jittered(&candidates, Jitter::TIME, self.rng, |movie| {
            movie.rating_or(NEUTRAL_RATING)
        });
        pick_top(&mut scored, TIME_TOP_COUNT, self.rng)
    }

    fn similar_to_liked<'m>(&mut self, movies: &'m [Movie]) -> Option<&'m Movie> {
        let liked: Vec<&Movie> = self
            .preferences
            .recent_likes(LIKED_WINDOW)
            .into_iter()
            .filter_map(|id| movies.iter().find(|movie| movie.id == id))
            .collect();
        if liked.is_empty() {
            log::debug!("no liked movie is in the catalogue; drawing without filters");
            return self.unfiltered(movies);
        }

        let candidates: Vec<&Movie> = self
            .unseen(movies)
            .filter(|movie| !liked.iter().any(|seen| seen.id == movie.id))
            .collect();
        let scored = jittered(&candidates, Jitter::SIMILAR, self.rng, |movie| {
            similarity_weight(movie, &liked)
        });
        pick_top_percent(scored, SIMILAR_TOP_PERCENT, self.rng)
    }
}

fn passes_filters(
    movie: &Movie,
    preferences: &UserPreferences,
    options: &RecommendationOptions,
) -> bool {
    !(options.avoid_recent && preferences.is_recently_suggested(&movie.id))
        && options.min_rating.is_none_or(|min| movie.rating >= min)
        && options.max_rating.is_none_or(|max| movie.rating <= max)
        && options
            .genre_filter()
            .is_none_or(|genre| movie.genre.contains(genre))
        && options
            .decade()
            .is_none_or(|decade| movie.decade() == decade)
}

/// Count (movie genre, mood genre) pairs where either contains the other.
fn mood_matches(movie: &Movie, wanted: &[&str]) -> usize {
    wanted
        .iter()
        .map(|mood_genre| {
            movie
                .genres()
                .filter(|genre| genre.contains(mood_genre) || mood_genre.contains(genre))
                .count()
        })
        .sum()
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "match counts are bounded by a handful of genres"
)]
const fn match_weight(matches: usize, rating: f32) -> f32 {
    matches as f32 * rating
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "film counts per director stay far below f32 precision limits"
)]
const fn director_score(films: usize, affinity: f32, draw: f32) -> f32 {
    films as f32 * affinity * draw
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging similarity over at most ten liked movies"
)]
fn similarity_weight(movie: &Movie, liked: &[&Movie]) -> f32 {
    let total: f32 = liked
        .iter()
        .map(|seen| movie_similarity(movie, seen))
        .sum();
    total / liked.len() as f32 * movie.rating_or(NEUTRAL_RATING)
}
