use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gitfab::core::selector::{CategoryWeights, select};
use gitfab::types::{CandidateFile, FilePool, SizeCategory, TouchCounters};

fn candidate(path: &str, max_touches: u32) -> CandidateFile {
    CandidateFile {
        path: PathBuf::from(path),
        max_touches,
    }
}

#[test]
fn empirical_frequencies_track_configured_weights() {
    // One file per category, caps high enough to never interfere
    let pool = FilePool::new(vec![
        candidate("large.rs", u32::MAX),
        candidate("medium.rs", 4),
        candidate("small.rs", 2),
    ]);
    let weights = CategoryWeights::new(0.5, 0.3, 0.2).expect("weights");
    let counters = TouchCounters::new(&pool);

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut counts: HashMap<SizeCategory, u32> = HashMap::new();
    let draws = 100_000;
    for _ in 0..draws {
        let picked = select(&pool, &counters, &weights, &mut rng).expect("pool never exhausts");
        *counts.entry(picked.category()).or_insert(0) += 1;
    }

    let freq = |category: SizeCategory| -> f64 {
        counts.get(&category).copied().unwrap_or(0) as f64 / draws as f64
    };
    assert!((freq(SizeCategory::Large) - 0.5).abs() < 0.02);
    assert!((freq(SizeCategory::Medium) - 0.3).abs() < 0.02);
    assert!((freq(SizeCategory::Small) - 0.2).abs() < 0.02);
}

#[test]
fn counters_never_exceed_caps_across_a_run() {
    let pool = FilePool::new(vec![
        candidate("a.rs", 5),
        candidate("b.rs", 3),
        candidate("c.rs", 1),
    ]);
    let weights = CategoryWeights::new(0.4, 0.3, 0.3).expect("weights");
    let mut counters = TouchCounters::new(&pool);

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut selections = 0;
    for _ in 0..100 {
        let Some(picked) = select(&pool, &counters, &weights, &mut rng) else {
            break;
        };
        counters.record(&picked.path.clone());
        selections += 1;

        // The invariant must hold after every iteration
        for file in pool.files() {
            assert!(
                counters.count(&file.path) <= file.max_touches,
                "{} exceeded its cap",
                file.display()
            );
        }
    }

    // All nine touches land before exhaustion
    assert_eq!(selections, 9);
}

#[test]
fn exhaustion_is_reported_not_thrown() {
    let pool = FilePool::new(vec![
        candidate("x.rs", 1),
        candidate("y.rs", 1),
        candidate("z.rs", 1),
    ]);
    let weights = CategoryWeights::new(0.4, 0.3, 0.3).expect("weights");
    let mut counters = TouchCounters::new(&pool);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..3 {
        let picked = select(&pool, &counters, &weights, &mut rng).expect("still eligible");
        counters.record(&picked.path.clone());
    }

    assert!(select(&pool, &counters, &weights, &mut rng).is_none());
}

#[test]
fn selection_prefers_the_drawn_category_when_available() {
    let pool = FilePool::new(vec![
        candidate("large.rs", 10),
        candidate("small.rs", 2),
    ]);
    // All weight on large: small should never be picked while large is open
    let weights = CategoryWeights::new(1.0, 0.0, 0.0).expect("weights");
    let counters = TouchCounters::new(&pool);

    let mut rng = ChaCha8Rng::seed_from_u64(21);
    for _ in 0..200 {
        let picked = select(&pool, &counters, &weights, &mut rng).expect("eligible");
        assert_eq!(picked.path, Path::new("large.rs"));
    }
}
