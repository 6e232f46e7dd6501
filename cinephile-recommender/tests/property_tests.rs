//! Property-based tests for the recommendation engine.
//!
//! # Invariants tested
//!
//! - **Membership:** every pick is an element of the supplied catalogue.
//! - **Bounded windows:** the suggestion ring never exceeds ten entries.
//! - **Reproducibility:** equal seeds give equal pick sequences.
#![expect(
    clippy::float_arithmetic,
    reason = "ratings are generated as half steps"
)]

use cinephile_core::test_support::movie;
use cinephile_core::{MemoryStore, Movie};
use cinephile_recommender::{
    RecommendationEngine, RecommendationOptions, Strategy as RecommendationStrategy,
};
use proptest::prelude::*;

const GENRES: [&str; 6] = ["Action", "Comedy", "Drama, Romance", "Horror", "Sci-Fi", ""];
const DIRECTORS: [&str; 4] = ["Unknown", "A", "B", ""];

fn movie_strategy() -> impl Strategy<Value = (usize, u8, usize, u16)> {
    (0..GENRES.len(), 0_u8..=10, 0..DIRECTORS.len(), 1950_u16..2030)
}

fn catalogue_strategy() -> impl Strategy<Value = Vec<Movie>> {
    prop::collection::vec(movie_strategy(), 1..30).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (genre, half_stars, director, year))| {
                movie(
                    &format!("m{index}"),
                    GENRES.get(genre).copied().unwrap_or_default(),
                    f32::from(half_stars) / 2.0,
                    DIRECTORS.get(director).copied().unwrap_or_default(),
                    &year.to_string(),
                )
            })
            .collect()
    })
}

fn options_strategy() -> impl Strategy<Value = RecommendationOptions> {
    (
        prop::sample::select(RecommendationStrategy::ALL.to_vec()),
        prop::option::of(prop::sample::select(vec!["happy", "Scared", "bored"])),
        prop::option::of(prop::sample::select(vec!["drama", "Action", "Western"])),
        prop::option::of(prop::sample::select(vec!["1990s", "2010s", "1800s"])),
        any::<bool>(),
    )
        .prop_map(|(strategy, mood, genre, decade, avoid_recent)| {
            let mut options = RecommendationOptions::new()
                .with_strategy(strategy)
                .with_avoid_recent(avoid_recent);
            options.mood = mood.map(str::to_owned);
            options.genre_filter = genre.map(str::to_owned);
            options.decade = decade.map(str::to_owned);
            options
        })
}

fn pick_ids(seed: u64, movies: &[Movie], options: &RecommendationOptions) -> Vec<Option<String>> {
    let mut engine = RecommendationEngine::seeded(MemoryStore::default(), seed);
    (0..5)
        .map(|_| {
            engine
                .recommend(movies, options)
                .map(|picked| picked.id.clone())
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: a non-empty catalogue always yields one of its own movies.
    #[test]
    fn picks_come_from_the_catalogue(
        seed in any::<u64>(),
        movies in catalogue_strategy(),
        options in options_strategy(),
        liked in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut engine = RecommendationEngine::seeded(MemoryStore::default(), seed);
        for index in &liked {
            engine.update_preferences(index.get(&movies), true);
        }
        for _ in 0..12 {
            let picked = engine.recommend(&movies, &options);
            prop_assert!(picked.is_some());
            prop_assert!(picked.is_some_and(|m| movies.iter().any(|c| std::ptr::eq(c, m))));
        }
        prop_assert!(engine.preferences().recently_suggested.len() <= 10);
    }

    /// Property: equal seeds reproduce the same sequence of picks.
    #[test]
    fn seeded_engines_are_reproducible(
        seed in any::<u64>(),
        movies in catalogue_strategy(),
        options in options_strategy(),
    ) {
        prop_assert_eq!(
            pick_ids(seed, &movies, &options),
            pick_ids(seed, &movies, &options)
        );
    }
}
