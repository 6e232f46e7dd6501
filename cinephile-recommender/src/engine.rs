//! The stateful recommendation engine.
#![forbid(unsafe_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use cinephile_core::{Movie, PreferenceStore, UserPreferences};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::select::pick_uniform;
use crate::strategies::Picker;
use crate::{PreferencesError, Recommendation, RecommendationOptions, Stats, Strategy};

/// Key under which the profile is persisted.
pub const STORAGE_KEY: &str = "movie_preferences";

const STATS_GENRES: usize = 5;
const STATS_DIRECTORS: usize = 5;
const STATS_DECADES: usize = 3;

/// Picks movies from a catalogue and learns from feedback.
///
/// The engine reads the profile from its store once, on construction, and
/// writes it back after every mutating call. Storage failures are logged at
/// `warn` level and otherwise ignored; no operation fails because of them.
///
/// # Examples
/// ```
/// use cinephile_core::{MemoryStore, Movie};
/// use cinephile_recommender::{RecommendationEngine, RecommendationOptions, Strategy};
///
/// let movies = vec![
///     Movie::new("a", "A").with_rating(4.5),
///     Movie::new("b", "B").with_rating(2.0),
/// ];
/// let mut engine = RecommendationEngine::seeded(MemoryStore::default(), 7);
/// let options = RecommendationOptions::new().with_strategy(Strategy::HighRated);
/// let picked = engine.recommend(&movies, &options).map(|movie| movie.id.clone());
/// assert_eq!(picked.as_deref(), Some("a"));
/// assert_eq!(engine.preferences().recently_suggested, ["a"]);
/// ```
#[derive(Debug)]
pub struct RecommendationEngine<S, R = ChaCha8Rng> {
    store: S,
    rng: R,
    preferences: UserPreferences,
}

impl<S: PreferenceStore> RecommendationEngine<S> {
    /// Build an engine whose random source is seeded from `seed`.
    ///
    /// Two engines with the same seed, stored profile and call sequence
    /// return the same movies.
    pub fn seeded(store: S, seed: u64) -> Self {
        Self::new(store, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Build an engine whose random source is seeded from OS entropy.
    pub fn from_entropy(store: S) -> Self {
        Self::new(store, ChaCha8Rng::from_entropy())
    }
}

impl<S: PreferenceStore, R: Rng> RecommendationEngine<S, R> {
    /// Build an engine, loading the profile stored under [`STORAGE_KEY`].
    ///
    /// A missing, unreadable or malformed profile yields an empty one.
    pub fn new(store: S, rng: R) -> Self {
        let preferences = load_preferences(&store);
        Self {
            store,
            rng,
            preferences,
        }
    }

    /// Pick one movie from `movies`.
    ///
    /// The requested strategy runs first. When it finds nothing the engine
    /// draws uniformly from movies that were not recently suggested, then
    /// from the whole catalogue. The pick is recorded as suggested.
    ///
    /// Returns `None` only when `movies` is empty.
    pub fn recommend<'m>(
        &mut self,
        movies: &'m [Movie],
        options: &RecommendationOptions,
    ) -> Option<&'m Movie> {
        if movies.is_empty() {
            return None;
        }

        let strategy = options.strategy();
        log::debug!(
            "recommending with {strategy} from {} movies",
            movies.len()
        );
        let mut picker = Picker {
            preferences: &self.preferences,
            rng: &mut self.rng,
        };
        let picked = picker
            .pick(strategy, movies, options)
            .or_else(|| self.fallback(movies));

        if let Some(movie) = picked {
            self.mark_as_suggested(&movie.id);
        }
        picked
    }

    fn fallback<'m>(&mut self, movies: &'m [Movie]) -> Option<&'m Movie> {
        log::debug!("strategy found no candidate; drawing uniformly");
        let preferences = &self.preferences;
        let fresh: Vec<&Movie> = movies
            .iter()
            .filter(|movie| !preferences.is_recently_suggested(&movie.id))
            .collect();
        pick_uniform(&fresh, &mut self.rng).or_else(|| {
            let all: Vec<&Movie> = movies.iter().collect();
            pick_uniform(&all, &mut self.rng)
        })
    }

    /// Pick one movie and explain the choice.
    ///
    /// The reason describes the requested strategy even when the pick came
    /// from the fallback.
    ///
    /// # Examples
    /// ```
    /// use cinephile_core::{MemoryStore, Movie};
    /// use cinephile_recommender::{RecommendationEngine, RecommendationOptions, Strategy};
    ///
    /// let movies = vec![Movie::new("a", "A").with_genre("Comedy").with_rating(4.0)];
    /// let mut engine = RecommendationEngine::seeded(MemoryStore::default(), 1);
    /// let options = RecommendationOptions::new()
    ///     .with_strategy(Strategy::MoodBased)
    ///     .with_mood("happy");
    /// let recommendation = engine.recommend_with_reason(&movies, &options);
    /// assert_eq!(recommendation.reason, "Perfect for a happy mood");
    /// ```
    pub fn recommend_with_reason<'m>(
        &mut self,
        movies: &'m [Movie],
        options: &RecommendationOptions,
    ) -> Recommendation<'m> {
        let strategy = options.strategy();
        let movie = self.recommend(movies, options);
        let reason = movie.map_or_else(
            || "A random selection".to_owned(),
            |picked| reason_for(strategy, picked, options),
        );
        Recommendation {
            movie,
            reason,
            strategy,
        }
    }

    /// Learn from a like or dislike of `movie`, then persist.
    pub fn update_preferences(&mut self, movie: &Movie, liked: bool) {
        self.preferences
            .record_feedback(movie, liked, now_millis());
        self.save();
    }

    /// Record `movie_id` as just suggested, then persist.
    pub fn mark_as_suggested(&mut self, movie_id: &str) {
        self.preferences.mark_suggested(movie_id);
        self.save();
    }

    /// Replace the profile with an empty one, then persist.
    pub fn reset_preferences(&mut self) {
        self.preferences = UserPreferences::default();
        self.save();
    }

    /// Summarise the profile.
    ///
    /// Affinities are listed strongest first; equal weights keep key order.
    #[must_use]
    pub fn stats(&self) -> Stats {
        let preferences = &self.preferences;
        Stats {
            total_viewed: preferences.view_history.len(),
            favorite_genres: preferences.favorite_genres.top(STATS_GENRES),
            favorite_directors: preferences.favorite_directors.top(STATS_DIRECTORS),
            preferred_decades: preferences.decade_preferences.top(STATS_DECADES),
        }
    }

    /// Borrow the current profile.
    #[must_use]
    pub const fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Borrow the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the engine and return the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn save(&mut self) {
        if let Err(err) = save_preferences(&mut self.store, &self.preferences) {
            log::warn!("{err}; keeping preferences in memory only: {}", source_of(&err));
        }
    }
}

fn reason_for(strategy: Strategy, movie: &Movie, options: &RecommendationOptions) -> String {
    match strategy {
        Strategy::SmartRandom => "Picked based on your viewing preferences".to_owned(),
        Strategy::MoodBased => format!("Perfect for a {} mood", options.mood().unwrap_or("good")),
        Strategy::GenreFocused => {
            format!("Great {} film", options.genre_filter().unwrap_or("genre"))
        }
        Strategy::DirectorFocused => format!("From director {}", movie.director),
        Strategy::HighRated => "A critically acclaimed masterpiece".to_owned(),
        Strategy::HiddenGems => "An underrated gem you might enjoy".to_owned(),
        Strategy::TimePeriod => options.decade().map_or_else(
            || format!("A classic from the {}", movie.decade()),
            |decade| format!("A classic from the {decade}"),
        ),
        Strategy::SimilarToLiked => "Similar to films you've enjoyed before".to_owned(),
    }
}

fn load_preferences<S: PreferenceStore>(store: &S) -> UserPreferences {
    read_preferences(store)
        .unwrap_or_else(|err| {
            log::warn!("{err}; starting with an empty profile: {}", source_of(&err));
            None
        })
        .unwrap_or_default()
}

fn read_preferences<S: PreferenceStore>(
    store: &S,
) -> Result<Option<UserPreferences>, PreferencesError> {
    let Some(blob) = store
        .get(STORAGE_KEY)
        .map_err(|source| PreferencesError::Read {
            key: STORAGE_KEY,
            source,
        })?
    else {
        return Ok(None);
    };
    serde_json::from_str(&blob)
        .map(Some)
        .map_err(|source| PreferencesError::Decode {
            key: STORAGE_KEY,
            source,
        })
}

fn save_preferences<S: PreferenceStore>(
    store: &mut S,
    preferences: &UserPreferences,
) -> Result<(), PreferencesError> {
    let blob =
        serde_json::to_string(preferences).map_err(|source| PreferencesError::Encode { source })?;
    store
        .set(STORAGE_KEY, &blob)
        .map_err(|source| PreferencesError::Write {
            key: STORAGE_KEY,
            source,
        })
}

fn source_of(err: &PreferencesError) -> String {
    std::error::Error::source(err).map_or_else(String::new, ToString::to_string)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}
