//! Analytics module for tunelog
//!
//! Pure functions turning an [`EventTable`](crate::table::EventTable) into
//! derived summaries:
//! - Grouped minute sums (artists, tracks, hours, weekdays, months, time buckets)
//! - Daily rollup and everything built on it (streaks, variability,
//!   weekday vs weekend)
//! - Obsession index (listening concentration in the top artists)
//! - Emerging and fading artists across the two halves of a history
//! - Wrapped (one report bundling all of the above)
//!
//! No function mutates its input or keeps state between calls. Empty tables
//! always produce empty, zero or `None` results rather than errors.

pub mod aggregate;
pub mod compare;
pub mod daily;
pub mod obsession;
pub mod overview;
pub mod split;
pub mod streak;
pub mod variability;
pub mod weekpart;
pub mod wrapped;

use std::collections::HashMap;
use std::hash::Hash;

pub use aggregate::{
    minutes_by_hour, minutes_by_time_bucket, minutes_by_weekday, minutes_by_year_month,
    top_artists_by_minutes, top_tracks, ArtistMinutes, BucketMinutes, HourMinutes, MonthMinutes,
    TrackMinutes, WeekdayMinutes,
};
pub use compare::{compare_histories, HistoryComparison, HistorySide, MonthComparison};
pub use daily::{daily_totals, DailyTotal};
pub use obsession::{
    obsession_breakdown, obsession_multi, obsession_percentage, ObsessionLevel, ObsessionSegment,
    ObsessionTier,
};
pub use overview::{overview, Overview};
pub use split::{busiest_day, emerging_and_fading, ArtistShift, BusiestDay, EmergingAndFading};
pub use streak::{longest_streak, Streak};
pub use variability::{daily_variability, daily_variability_with, DailyVariability, DayThresholds};
pub use weekpart::{weekday_vs_weekend_summary, WeekPartReport, WeekPartSummary};
pub use wrapped::{generate_wrapped, WrappedConfig, WrappedReport};

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum values per key, keeping groups in order of first appearance.
pub(crate) fn group_sum<K, I>(items: I) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, f64)> = Vec::new();
    for (key, value) in items {
        match index.get(&key) {
            Some(&i) => groups[i].1 += value,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, value));
            }
        }
    }
    groups
}

/// Stable sort, largest value first. Equal values keep their current order.
pub(crate) fn rank_descending<T>(rows: &mut [T], value: impl Fn(&T) -> f64) {
    rows.sort_by(|a, b| value(b).total_cmp(&value(a)));
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDateTime;

    use crate::table::EventTable;
    use crate::types::PlayEvent;

    pub fn play(ts: &str, artist: &str, track: &str, minutes: f64) -> PlayEvent {
        let timestamp = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap();
        PlayEvent::new(timestamp, artist, track, minutes)
    }

    pub fn table(events: Vec<PlayEvent>) -> EventTable {
        EventTable::new(events).unwrap()
    }
}
