//! Test-only helpers shared by unit and behaviour tests.

use crate::{Movie, PreferenceStore, StoreError};

/// `PreferenceStore` whose reads and writes always fail.
#[derive(Default, Debug, Copy, Clone)]
pub struct FailingStore;

impl PreferenceStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable {
            key: key.to_owned(),
            reason: "reads are disabled".to_owned(),
        })
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable {
            key: key.to_owned(),
            reason: "writes are disabled".to_owned(),
        })
    }
}

/// Build a movie with the fields scoring cares about.
pub fn movie(id: &str, genre: &str, rating: f32, director: &str, year: &str) -> Movie {
    Movie::new(id, id)
        .with_genre(genre)
        .with_rating(rating)
        .with_director(director)
        .with_year(year)
}
