use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::{Rng, RngCore};

use crate::types::{AppError, AppResult};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Inclusive [first, last] hour of day for generated timestamps
#[derive(Debug, Clone, Copy)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub fn new(start: u32, end: u32) -> AppResult<Self> {
        if start > end || end > 23 {
            return Err(AppError::Config(format!(
                "invalid hour window {start}..{end}: hours must satisfy start <= end <= 23"
            )));
        }
        Ok(Self { start, end })
    }
}

/// A weighted slice of the overall range with its own hour window
#[derive(Debug, Clone)]
pub struct SubPeriod {
    pub weight: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub hours: HourWindow,
}

/// Weighted backdating plan. Timestamps are drawn independently;
/// successive samples carry no ordering guarantee.
#[derive(Debug, Clone)]
pub struct DatePlan {
    start: NaiveDate,
    end: NaiveDate,
    periods: Vec<SubPeriod>,
}

impl DatePlan {
    pub fn new(start: NaiveDate, end: NaiveDate, periods: Vec<SubPeriod>) -> AppResult<Self> {
        if start > end {
            return Err(AppError::Config(format!(
                "[dates].start {start} is after [dates].end {end}"
            )));
        }
        if periods.is_empty() {
            return Err(AppError::Config(
                "a date plan needs at least one sub-period".to_string(),
            ));
        }
        let total: f64 = periods.iter().map(|p| p.weight).sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AppError::Config(format!(
                "sub-period weights sum to {total}, expected 1.0"
            )));
        }
        for period in &periods {
            if period.weight <= 0.0 {
                return Err(AppError::Config(
                    "sub-period weights must be positive".to_string(),
                ));
            }
            if period.start > period.end {
                return Err(AppError::Config(format!(
                    "sub-period {} .. {} is inverted",
                    period.start, period.end
                )));
            }
            if period.start < start || period.end > end {
                return Err(AppError::Config(format!(
                    "sub-period {} .. {} falls outside the overall range {start} .. {end}",
                    period.start, period.end
                )));
            }
        }
        Ok(Self {
            start,
            end,
            periods,
        })
    }

    /// Default split of the range: 45% in the final two weeks (hours 9-20),
    /// 35% mid-range (hours 9-18), 20% early-range (hours 10-17).
    /// Short ranges collapse to fewer periods.
    pub fn with_default_periods(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::Config(format!(
                "[dates].start {start} is after [dates].end {end}"
            )));
        }

        let last_start = (end - Duration::days(13)).max(start);
        if last_start <= start {
            return Self::new(
                start,
                end,
                vec![SubPeriod {
                    weight: 1.0,
                    start,
                    end,
                    hours: HourWindow::new(9, 20)?,
                }],
            );
        }

        let mid_end = last_start - Duration::days(1);
        let lead_days = (mid_end - start).num_days() + 1;
        if lead_days < 2 {
            return Self::new(
                start,
                end,
                vec![
                    SubPeriod {
                        weight: 0.45,
                        start: last_start,
                        end,
                        hours: HourWindow::new(9, 20)?,
                    },
                    SubPeriod {
                        weight: 0.55,
                        start,
                        end: mid_end,
                        hours: HourWindow::new(9, 18)?,
                    },
                ],
            );
        }

        let early_end = start + Duration::days(lead_days / 2 - 1);
        let mid_start = early_end + Duration::days(1);
        Self::new(
            start,
            end,
            vec![
                SubPeriod {
                    weight: 0.45,
                    start: last_start,
                    end,
                    hours: HourWindow::new(9, 20)?,
                },
                SubPeriod {
                    weight: 0.35,
                    start: mid_start,
                    end: mid_end,
                    hours: HourWindow::new(9, 18)?,
                },
                SubPeriod {
                    weight: 0.20,
                    start,
                    end: early_end,
                    hours: HourWindow::new(10, 17)?,
                },
            ],
        )
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn periods(&self) -> &[SubPeriod] {
        &self.periods
    }

    /// Draw one timestamp: weighted period, uniform day, hour inside the
    /// period's window, uniform minute/second
    pub fn sample(&self, rng: &mut dyn RngCore) -> NaiveDateTime {
        let period = self.pick_period(rng);
        let days = (period.end - period.start).num_days().max(0);
        let offset = if days == 0 {
            0
        } else {
            rng.random_range(0..=days)
        };
        let date = period.start + Duration::days(offset);
        let hour = rng.random_range(period.hours.start..=period.hours.end);
        let minute = rng.random_range(0..60u32);
        let second = rng.random_range(0..60u32);
        match date.and_hms_opt(hour, minute, second) {
            Some(timestamp) => timestamp,
            // Unreachable with a validated hour window
            None => date.and_time(NaiveTime::MIN),
        }
    }

    fn pick_period(&self, rng: &mut dyn RngCore) -> &SubPeriod {
        let roll: f64 = rng.random_range(0.0..1.0);
        let mut cumulative = 0.0;
        for period in &self.periods {
            cumulative += period.weight;
            if roll < cumulative {
                return period;
            }
        }
        // Float drift: land on the final period
        &self.periods[self.periods.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn default_split_matches_reference_range() {
        let plan =
            DatePlan::with_default_periods(date(2025, 11, 15), date(2025, 12, 31)).expect("plan");
        let periods = plan.periods();
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0].start, date(2025, 12, 18));
        assert_eq!(periods[0].end, date(2025, 12, 31));
        assert_eq!(periods[1].start, date(2025, 12, 1));
        assert_eq!(periods[1].end, date(2025, 12, 17));
        assert_eq!(periods[2].start, date(2025, 11, 15));
        assert_eq!(periods[2].end, date(2025, 11, 30));
    }

    #[test]
    fn short_range_collapses_to_single_period() {
        let plan =
            DatePlan::with_default_periods(date(2025, 12, 1), date(2025, 12, 5)).expect("plan");
        assert_eq!(plan.periods().len(), 1);
        assert_eq!(plan.periods()[0].weight, 1.0);
    }

    #[test]
    fn rejects_bad_weight_sums_and_ranges() {
        let bad_weights = DatePlan::new(
            date(2025, 1, 1),
            date(2025, 1, 31),
            vec![SubPeriod {
                weight: 0.5,
                start: date(2025, 1, 1),
                end: date(2025, 1, 31),
                hours: HourWindow::new(9, 18).expect("window"),
            }],
        );
        assert!(bad_weights.is_err());

        assert!(DatePlan::with_default_periods(date(2025, 2, 1), date(2025, 1, 1)).is_err());
        assert!(HourWindow::new(10, 25).is_err());
    }

    #[test]
    fn samples_stay_inside_period_hour_windows() {
        let plan =
            DatePlan::with_default_periods(date(2025, 11, 15), date(2025, 12, 31)).expect("plan");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..2000 {
            let ts = plan.sample(&mut rng);
            assert!(ts.date() >= plan.start() && ts.date() <= plan.end());
            let hour = chrono::Timelike::hour(&ts);
            assert!((9..=20).contains(&hour), "hour {hour} outside any window");
        }
    }
}
