use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::types::{AppError, AppResult, CandidateFile, FilePool, SizeCategory, TouchCounters};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Category probabilities for the weighted pick; must sum to 1.0
#[derive(Debug, Clone, Copy)]
pub struct CategoryWeights {
    pub large: f64,
    pub medium: f64,
    pub small: f64,
}

impl CategoryWeights {
    pub fn new(large: f64, medium: f64, small: f64) -> AppResult<Self> {
        if large < 0.0 || medium < 0.0 || small < 0.0 {
            return Err(AppError::Config(
                "category weights must be non-negative".to_string(),
            ));
        }
        let total = large + medium + small;
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AppError::Config(format!(
                "category weights sum to {total}, expected 1.0"
            )));
        }
        Ok(Self {
            large,
            medium,
            small,
        })
    }

    /// Map a uniform roll in [0, 1) onto a category band
    pub fn pick(&self, roll: f64) -> SizeCategory {
        if roll < self.large {
            SizeCategory::Large
        } else if roll < self.large + self.medium {
            SizeCategory::Medium
        } else {
            SizeCategory::Small
        }
    }
}

/// Pick one candidate biased toward a size category, honoring caps.
/// Falls back to any uncapped file when the preferred category is spent;
/// `None` means the pool is exhausted (normal termination, not an error).
pub fn select<'a>(
    pool: &'a FilePool,
    counters: &TouchCounters,
    weights: &CategoryWeights,
    rng: &mut dyn RngCore,
) -> Option<&'a CandidateFile> {
    let category = weights.pick(rng.random_range(0.0..1.0));

    let preferred: Vec<&CandidateFile> = pool
        .files()
        .iter()
        .filter(|file| file.category() == category && counters.under_cap(file))
        .collect();

    let eligible = if preferred.is_empty() {
        pool.files()
            .iter()
            .filter(|file| counters.under_cap(file))
            .collect()
    } else {
        preferred
    };

    eligible.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::path::PathBuf;

    fn pool() -> FilePool {
        FilePool::new(vec![
            CandidateFile {
                path: PathBuf::from("large.rs"),
                max_touches: 5,
            },
            CandidateFile {
                path: PathBuf::from("medium.rs"),
                max_touches: 3,
            },
            CandidateFile {
                path: PathBuf::from("small.rs"),
                max_touches: 1,
            },
        ])
    }

    #[test]
    fn weights_must_sum_to_one() {
        assert!(CategoryWeights::new(0.4, 0.3, 0.3).is_ok());
        assert!(CategoryWeights::new(0.5, 0.5, 0.5).is_err());
        assert!(CategoryWeights::new(-0.1, 0.6, 0.5).is_err());
    }

    #[test]
    fn roll_maps_onto_bands() {
        let weights = CategoryWeights::new(0.4, 0.3, 0.3).expect("weights");
        assert_eq!(weights.pick(0.0), SizeCategory::Large);
        assert_eq!(weights.pick(0.39), SizeCategory::Large);
        assert_eq!(weights.pick(0.4), SizeCategory::Medium);
        assert_eq!(weights.pick(0.69), SizeCategory::Medium);
        assert_eq!(weights.pick(0.7), SizeCategory::Small);
        assert_eq!(weights.pick(0.99), SizeCategory::Small);
    }

    #[test]
    fn capped_files_are_never_selected() {
        let pool = pool();
        let weights = CategoryWeights::new(0.4, 0.3, 0.3).expect("weights");
        let mut counters = TouchCounters::new(&pool);
        counters.record(std::path::Path::new("small.rs"));

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let picked = select(&pool, &counters, &weights, &mut rng).expect("pool not exhausted");
            assert_ne!(picked.path, PathBuf::from("small.rs"));
        }
    }

    #[test]
    fn widens_to_other_categories_before_exhaustion() {
        let pool = FilePool::new(vec![CandidateFile {
            path: PathBuf::from("only-small.txt"),
            max_touches: 2,
        }]);
        let weights = CategoryWeights::new(1.0, 0.0, 0.0).expect("weights");
        let counters = TouchCounters::new(&pool);

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let picked = select(&pool, &counters, &weights, &mut rng).expect("fallback pick");
        assert_eq!(picked.path, PathBuf::from("only-small.txt"));
    }
}
