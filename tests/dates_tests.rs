use chrono::{NaiveDate, Timelike};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gitfab::core::dates::{DatePlan, HourWindow, SubPeriod};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn every_sample_lands_inside_the_overall_range() {
    let plan = DatePlan::with_default_periods(date(2025, 11, 15), date(2025, 12, 31)).expect("plan");
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    for _ in 0..20_000 {
        let ts = plan.sample(&mut rng);
        assert!(
            ts.date() >= plan.start() && ts.date() <= plan.end(),
            "timestamp {ts} outside the configured range"
        );
    }
}

#[test]
fn sub_period_weights_shape_the_distribution() {
    let plan = DatePlan::with_default_periods(date(2025, 11, 15), date(2025, 12, 31)).expect("plan");
    let mut rng = ChaCha8Rng::seed_from_u64(23);

    let draws = 100_000;
    let mut in_final = 0u32;
    let mut in_early = 0u32;
    for _ in 0..draws {
        let day = plan.sample(&mut rng).date();
        if day >= date(2025, 12, 18) {
            in_final += 1;
        }
        if day <= date(2025, 11, 30) {
            in_early += 1;
        }
    }

    let final_freq = in_final as f64 / draws as f64;
    let early_freq = in_early as f64 / draws as f64;
    assert!((final_freq - 0.45).abs() < 0.02, "final-period frequency {final_freq}");
    assert!((early_freq - 0.20).abs() < 0.02, "early-period frequency {early_freq}");
}

#[test]
fn explicit_periods_respect_their_hour_windows() {
    let plan = DatePlan::new(
        date(2026, 3, 1),
        date(2026, 3, 31),
        vec![
            SubPeriod {
                weight: 0.7,
                start: date(2026, 3, 20),
                end: date(2026, 3, 31),
                hours: HourWindow::new(8, 11).expect("window"),
            },
            SubPeriod {
                weight: 0.3,
                start: date(2026, 3, 1),
                end: date(2026, 3, 19),
                hours: HourWindow::new(14, 16).expect("window"),
            },
        ],
    )
    .expect("plan");

    let mut rng = ChaCha8Rng::seed_from_u64(31);
    for _ in 0..5_000 {
        let ts = plan.sample(&mut rng);
        let hour = ts.hour();
        if ts.date() >= date(2026, 3, 20) {
            assert!((8..=11).contains(&hour), "late-period hour {hour}");
        } else {
            assert!((14..=16).contains(&hour), "lead-period hour {hour}");
        }
    }
}

#[test]
fn single_day_range_still_samples() {
    let plan = DatePlan::with_default_periods(date(2026, 1, 5), date(2026, 1, 5)).expect("plan");
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let ts = plan.sample(&mut rng);
    assert_eq!(ts.date(), date(2026, 1, 5));
}
