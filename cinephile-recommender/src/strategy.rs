//! Strategy and mood vocabularies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Algorithm used to pick a recommendation.
///
/// # Examples
/// ```
/// use cinephile_recommender::Strategy;
///
/// let strategy: Strategy = "hidden_gems".parse().expect("known strategy");
/// assert_eq!(strategy, Strategy::HiddenGems);
/// assert_eq!(Strategy::default().as_str(), "smart_random");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Preference-weighted draw with optional filters.
    #[default]
    SmartRandom,
    /// Genres associated with a mood.
    MoodBased,
    /// A single genre, highest rated first.
    GenreFocused,
    /// Films by a director with several catalogue entries.
    DirectorFocused,
    /// Uniform draw over films rated four and above.
    HighRated,
    /// Well-liked films just below the top tier.
    HiddenGems,
    /// Films from one decade.
    TimePeriod,
    /// Content similarity to recently liked films.
    SimilarToLiked,
}

impl Strategy {
    /// Every strategy in declaration order.
    pub const ALL: [Self; 8] = [
        Self::SmartRandom,
        Self::MoodBased,
        Self::GenreFocused,
        Self::DirectorFocused,
        Self::HighRated,
        Self::HiddenGems,
        Self::TimePeriod,
        Self::SimilarToLiked,
    ];

    /// Wire name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SmartRandom => "smart_random",
            Self::MoodBased => "mood_based",
            Self::GenreFocused => "genre_focused",
            Self::DirectorFocused => "director_focused",
            Self::HighRated => "high_rated",
            Self::HiddenGems => "hidden_gems",
            Self::TimePeriod => "time_period",
            Self::SimilarToLiked => "similar_to_liked",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown recommendation strategy {name:?}")]
pub struct ParseStrategyError {
    name: String,
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ParseStrategyError { name: s.to_owned() })
    }
}

/// Moods understood by the mood-based strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Light and upbeat.
    Happy,
    /// Melancholy.
    Sad,
    /// High energy.
    Exciting,
    /// Reflective.
    Thoughtful,
    /// Looking for a fright.
    Scared,
    /// Love stories.
    Romantic,
    /// Journeys and spectacle.
    Adventurous,
    /// Period pieces and classics.
    Nostalgic,
    /// Low effort viewing.
    Relaxed,
    /// Tension and violence.
    Intense,
}

impl Mood {
    /// Every mood in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Happy,
        Self::Sad,
        Self::Exciting,
        Self::Thoughtful,
        Self::Scared,
        Self::Romantic,
        Self::Adventurous,
        Self::Nostalgic,
        Self::Relaxed,
        Self::Intense,
    ];

    /// Lower-case name of the mood.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Exciting => "exciting",
            Self::Thoughtful => "thoughtful",
            Self::Scared => "scared",
            Self::Romantic => "romantic",
            Self::Adventurous => "adventurous",
            Self::Nostalgic => "nostalgic",
            Self::Relaxed => "relaxed",
            Self::Intense => "intense",
        }
    }

    /// Genres that suit the mood.
    #[must_use]
    pub const fn genres(self) -> &'static [&'static str] {
        match self {
            Self::Happy => &["Comedy", "Romance", "Animation", "Family", "Musical"],
            Self::Sad => &["Drama", "Romance", "Biography"],
            Self::Exciting => &["Action", "Adventure", "Thriller", "Sci-Fi"],
            Self::Thoughtful => &["Drama", "Mystery", "Biography", "History", "Documentary"],
            Self::Scared => &["Horror", "Thriller", "Mystery"],
            Self::Romantic => &["Romance", "Drama", "Comedy"],
            Self::Adventurous => &["Adventure", "Action", "Fantasy", "Sci-Fi"],
            Self::Nostalgic => &["Drama", "Biography", "History", "Classic"],
            Self::Relaxed => &["Comedy", "Animation", "Family", "Romance"],
            Self::Intense => &["Thriller", "Crime", "War", "Horror", "Action"],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown mood name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood {name:?}")]
pub struct ParseMoodError {
    name: String,
}

impl FromStr for Mood {
    type Err = ParseMoodError;

    /// Parse a mood name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str() == lowered)
            .ok_or_else(|| ParseMoodError { name: s.to_owned() })
    }
}
