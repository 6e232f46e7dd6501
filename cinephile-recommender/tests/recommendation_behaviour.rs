#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for the recommendation engine.

use std::cell::RefCell;

use cinephile_core::test_support::{FailingStore, movie};
use cinephile_core::{MemoryStore, Movie, PreferenceStore};
use cinephile_recommender::{RecommendationEngine, RecommendationOptions, Stats, Strategy};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Engine = RecommendationEngine<Box<dyn PreferenceStore>>;

/// Shared state for a recommendation scenario.
pub struct EngineContext {
    engine: RefCell<Engine>,
    movies: RefCell<Vec<Movie>>,
    picks: RefCell<Vec<Option<String>>>,
    reason: RefCell<Option<String>>,
}

#[fixture]
/// Build a fresh `EngineContext` for each scenario run.
pub fn context() -> EngineContext {
    EngineContext {
        engine: RefCell::new(engine_with(Box::new(MemoryStore::default()))),
        movies: RefCell::new(Vec::new()),
        picks: RefCell::new(Vec::new()),
        reason: RefCell::new(None),
    }
}

fn engine_with(store: Box<dyn PreferenceStore>) -> Engine {
    RecommendationEngine::seeded(store, 2024)
}

fn twelve_movies() -> Vec<Movie> {
    let genres = ["Action", "Comedy", "Drama", "Horror"];
    genres
        .iter()
        .cycle()
        .take(12)
        .zip(1_u16..)
        .map(|(genre, index)| {
            let rating = f32::from(index % 5 + 1);
            let year = format!("{}", 1960 + index * 5);
            movie(&format!("m{index}"), genre, rating, &format!("D{}", index % 3), &year)
        })
        .collect()
}

fn ask(context: &EngineContext, options: &RecommendationOptions) {
    let movies = context.movies.borrow();
    let recommendation = context
        .engine
        .borrow_mut()
        .recommend_with_reason(&movies, options);
    context
        .picks
        .borrow_mut()
        .push(recommendation.movie.map(|picked| picked.id.clone()));
    *context.reason.borrow_mut() = Some(recommendation.reason);
}

fn stats(context: &EngineContext) -> Stats {
    context.engine.borrow().stats()
}

#[given("a fresh engine")]
fn fresh_engine(context: &EngineContext) {
    *context.engine.borrow_mut() = engine_with(Box::new(MemoryStore::default()));
}

#[given("an engine whose store always fails")]
fn failing_engine(context: &EngineContext) {
    *context.engine.borrow_mut() = engine_with(Box::new(FailingStore));
}

#[given("a catalogue with one acclaimed movie")]
fn acclaimed_catalogue(context: &EngineContext) {
    *context.movies.borrow_mut() = vec![
        movie("a", "Action", 4.5, "X", "2015"),
        movie("b", "Comedy", 3.0, "Y", "2015"),
    ];
}

#[given("an empty catalogue")]
fn empty_catalogue(context: &EngineContext) {
    context.movies.borrow_mut().clear();
}

#[given("a catalogue of twelve movies")]
fn twelve_movie_catalogue(context: &EngineContext) {
    *context.movies.borrow_mut() = twelve_movies();
}

#[when("I ask for a high rated recommendation")]
fn ask_high_rated(context: &EngineContext) {
    ask(
        context,
        &RecommendationOptions::new().with_strategy(Strategy::HighRated),
    );
}

#[when("I ask for a happy mood recommendation")]
fn ask_happy(context: &EngineContext) {
    let options = RecommendationOptions::new()
        .with_strategy(Strategy::MoodBased)
        .with_mood("happy");
    ask(context, &options);
}

#[when("I ask for two recommendations avoiding recent picks")]
fn ask_twice(context: &EngineContext) {
    let options = RecommendationOptions::new().with_avoid_recent(true);
    ask(context, &options);
    ask(context, &options);
}

#[when("I ask for a similar to liked recommendation")]
fn ask_similar(context: &EngineContext) {
    ask(
        context,
        &RecommendationOptions::new().with_strategy(Strategy::SimilarToLiked),
    );
}

#[when("I like every movie in the catalogue")]
fn like_everything(context: &EngineContext) {
    let movies = context.movies.borrow();
    let mut engine = context.engine.borrow_mut();
    for liked in movies.iter() {
        engine.update_preferences(liked, true);
    }
}

#[when("I reset my preferences")]
fn reset(context: &EngineContext) {
    context.engine.borrow_mut().reset_preferences();
}

#[then("the acclaimed movie is recommended")]
fn acclaimed_is_recommended(context: &EngineContext) {
    assert_eq!(*context.picks.borrow(), [Some("a".to_owned())]);
}

#[then("it is the only recently suggested movie")]
fn only_suggestion(context: &EngineContext) {
    let engine = context.engine.borrow();
    assert_eq!(engine.preferences().recently_suggested, ["a"]);
}

#[then("no movie is recommended")]
fn nothing_recommended(context: &EngineContext) {
    assert_eq!(*context.picks.borrow(), [None]);
}

#[then("the reason is a random selection")]
fn random_reason(context: &EngineContext) {
    assert_eq!(context.reason.borrow().as_deref(), Some("A random selection"));
}

#[then("the two recommendations differ")]
fn picks_differ(context: &EngineContext) {
    let picks = context.picks.borrow();
    let first = picks.first().cloned().flatten().expect("first pick");
    let second = picks.get(1).cloned().flatten().expect("second pick");
    assert_ne!(first, second);
}

#[then("the statistics are empty")]
fn stats_are_empty(context: &EngineContext) {
    assert_eq!(stats(context), Stats::default());
}

#[then("a catalogue movie is recommended")]
fn catalogue_movie_recommended(context: &EngineContext) {
    let picks = context.picks.borrow();
    let picked = picks.last().cloned().flatten().expect("a pick");
    assert!(context.movies.borrow().iter().any(|m| m.id == picked));
}

#[scenario(path = "tests/features/recommendation.feature", index = 0)]
fn high_rated_is_deterministic(context: EngineContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 1)]
fn empty_catalogue_yields_none(context: EngineContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 2)]
fn recent_suggestions_are_avoided(context: EngineContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 3)]
fn reset_forgets_everything(context: EngineContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 4)]
fn failing_store_is_tolerated(context: EngineContext) {
    let _ = context;
}
