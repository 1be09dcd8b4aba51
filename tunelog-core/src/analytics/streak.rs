//! Longest run of consecutive listening days.

use chrono::NaiveDate;
use serde::Serialize;

use super::daily::daily_totals;
use crate::table::EventTable;

/// A run of calendar-consecutive qualifying days.
///
/// `length == 0` with both dates `None` means no day met the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Streak {
    pub length: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Streak {
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Longest run of consecutive days whose total is at least `min_minutes_per_day`.
///
/// A gap of one or more days (missing or below threshold) ends the run. When
/// two runs have the same length the earlier one is kept.
pub fn longest_streak(table: &EventTable, min_minutes_per_day: f64) -> Streak {
    // daily_totals is already sorted by date
    let dates: Vec<NaiveDate> = daily_totals(table)
        .into_iter()
        .filter(|day| day.minutes >= min_minutes_per_day)
        .map(|day| day.date)
        .collect();

    let mut best = Streak::default();
    let mut run_start = 0usize;

    for i in 1..=dates.len() {
        let continues = i < dates.len() && (dates[i] - dates[i - 1]).num_days() == 1;
        if continues {
            continue;
        }
        // Run covers dates[run_start..i]
        let length = (i - run_start) as u32;
        if length > best.length {
            best = Streak {
                length,
                start_date: Some(dates[run_start]),
                end_date: Some(dates[i - 1]),
            };
        }
        run_start = i;
    }

    best
}
