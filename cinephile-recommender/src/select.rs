//! Ranking and picking helpers shared by the weighted strategies.

#![forbid(unsafe_code)]

use cinephile_core::Movie;
use rand::Rng;
use rand::seq::SliceRandom;

/// Half-open multiplier range applied to a base score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Jitter {
    low: f32,
    high: f32,
}

impl Jitter {
    pub(crate) const SMART: Self = Self::new(0.85, 1.15);
    pub(crate) const MOOD: Self = Self::new(0.8, 1.2);
    pub(crate) const GENRE: Self = Self::new(0.75, 1.25);
    pub(crate) const TIME: Self = Self::new(0.7, 1.3);
    pub(crate) const SIMILAR: Self = Self::new(0.85, 1.15);
    pub(crate) const UNIT: Self = Self::new(0.0, 1.0);

    const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Draw one multiplier in `[low, high)`.
    pub(crate) fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        rng.gen_range(self.low..self.high)
    }
}

/// A candidate paired with its jittered score.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scored<'a> {
    pub(crate) movie: &'a Movie,
    pub(crate) score: f32,
}

/// Score every candidate as `base(movie) * jitter`.
#[expect(
    clippy::float_arithmetic,
    reason = "jitter multiplies the deterministic base score"
)]
pub(crate) fn jittered<'a, R, F>(
    candidates: &[&'a Movie],
    jitter: Jitter,
    rng: &mut R,
    mut base: F,
) -> Vec<Scored<'a>>
where
    R: Rng + ?Sized,
    F: FnMut(&Movie) -> f32,
{
    candidates
        .iter()
        .map(|&movie| Scored {
            movie,
            score: base(movie) * jitter.sample(rng),
        })
        .collect()
}

/// Sort by descending score, keeping input order for equal scores.
pub(crate) fn rank(scored: &mut [Scored<'_>]) {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Number of entries in the top `percent` of `len`, never less than one.
#[expect(
    clippy::integer_division,
    reason = "the cut-off floors like the percentile it models"
)]
pub(crate) const fn top_count(len: usize, percent: usize) -> usize {
    let count = len.saturating_mul(percent) / 100;
    if count == 0 { 1 } else { count }
}

/// Rank `scored` and pick uniformly among its top `percent`.
pub(crate) fn pick_top_percent<'a, R: Rng + ?Sized>(
    mut scored: Vec<Scored<'a>>,
    percent: usize,
    rng: &mut R,
) -> Option<&'a Movie> {
    let count = top_count(scored.len(), percent);
    pick_top(&mut scored, count, rng)
}

/// Rank `scored` and pick uniformly among its first `count` entries.
pub(crate) fn pick_top<'a, R: Rng + ?Sized>(
    scored: &mut [Scored<'a>],
    count: usize,
    rng: &mut R,
) -> Option<&'a Movie> {
    rank(scored);
    scored
        .get(..count.min(scored.len()))
        .and_then(|top| top.choose(rng))
        .map(|entry| entry.movie)
}

/// Uniform pick over `movies`.
pub(crate) fn pick_uniform<'a, R: Rng + ?Sized>(
    movies: &[&'a Movie],
    rng: &mut R,
) -> Option<&'a Movie> {
    movies.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    #[rstest]
    #[case(0, 20, 1)]
    #[case(4, 20, 1)]
    #[case(5, 20, 1)]
    #[case(10, 20, 2)]
    #[case(19, 15, 2)]
    #[case(100, 30, 30)]
    fn top_count_floors_with_minimum_of_one(
        #[case] len: usize,
        #[case] percent: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(top_count(len, percent), expected);
    }

    #[rstest]
    fn ranking_is_stable_for_ties() {
        let movies: Vec<Movie> = ["a", "b", "c"].iter().map(|id| Movie::new(*id, *id)).collect();
        let mut scored: Vec<Scored<'_>> = movies
            .iter()
            .zip([1.0, 2.0, 1.0])
            .map(|(movie, score)| Scored { movie, score })
            .collect();
        rank(&mut scored);
        let order: Vec<&str> = scored.iter().map(|entry| entry.movie.id.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[rstest]
    fn single_entry_top_is_deterministic() {
        let low = Movie::new("low", "Low");
        let high = Movie::new("high", "High");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let scored = vec![
            Scored {
                movie: &low,
                score: 0.1,
            },
            Scored {
                movie: &high,
                score: 0.9,
            },
        ];
        let picked = pick_top_percent(scored, 20, &mut rng).expect("one pick");
        assert_eq!(picked.id, "high");
    }

    #[rstest]
    fn jitter_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1_000 {
            let value = Jitter::TIME.sample(&mut rng);
            assert!((0.7_f32..1.3_f32).contains(&value), "{value} escaped the range");
        }
    }

    #[rstest]
    fn empty_inputs_pick_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(pick_uniform(&[], &mut rng).is_none());
        assert!(pick_top_percent(Vec::new(), 20, &mut rng).is_none());
    }
}
