//! Grouped minute sums over an event table.
//!
//! Rankings are deterministic: when two groups have the same total, the one
//! whose first play appears earlier in the table ranks higher.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::Serialize;

use super::{group_sum, rank_descending};
use crate::table::EventTable;
use crate::types::{PlayEvent, TimeBucket, WEEK_ORDER};

/// Minutes listened to one artist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistMinutes {
    pub artist: String,
    pub minutes: f64,
}

/// Minutes listened to one track, keyed by (track, artist).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackMinutes {
    pub track: String,
    pub artist: String,
    pub minutes: f64,
}

/// Minutes listened during one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourMinutes {
    pub hour: u32,
    pub minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekdayMinutes {
    pub weekday: Weekday,
    pub minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthMinutes {
    pub year: i32,
    pub month: u32,
    pub minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketMinutes {
    pub bucket: TimeBucket,
    pub minutes: f64,
}

/// Top `n` artists by total minutes, largest first.
pub fn top_artists_by_minutes(table: &EventTable, n: usize) -> Vec<ArtistMinutes> {
    rank_artists(table.iter(), n)
}

/// Rank artists over any subset of plays.
pub(crate) fn rank_artists<'a>(
    events: impl IntoIterator<Item = &'a PlayEvent>,
    n: usize,
) -> Vec<ArtistMinutes> {
    let mut rows: Vec<ArtistMinutes> = group_sum(
        events
            .into_iter()
            .map(|e| (e.artist.as_str(), e.minutes_played)),
    )
    .into_iter()
    .map(|(artist, minutes)| ArtistMinutes {
        artist: artist.to_string(),
        minutes,
    })
    .collect();
    rank_descending(&mut rows, |r| r.minutes);
    rows.truncate(n);
    rows
}

/// Top `n` (track, artist) pairs by total minutes, largest first.
pub fn top_tracks(table: &EventTable, n: usize) -> Vec<TrackMinutes> {
    let mut rows: Vec<TrackMinutes> = group_sum(
        table
            .iter()
            .map(|e| ((e.track.as_str(), e.artist.as_str()), e.minutes_played)),
    )
    .into_iter()
    .map(|((track, artist), minutes)| TrackMinutes {
        track: track.to_string(),
        artist: artist.to_string(),
        minutes,
    })
    .collect();
    rank_descending(&mut rows, |r| r.minutes);
    rows.truncate(n);
    rows
}

/// Minutes per hour of day for hours that have plays.
///
/// Ordered by ascending minute total, not by hour. Equal totals fall back to
/// hour order.
pub fn minutes_by_hour(table: &EventTable) -> Vec<HourMinutes> {
    let mut totals: BTreeMap<u32, f64> = BTreeMap::new();
    for event in table {
        *totals.entry(event.hour()).or_insert(0.0) += event.minutes_played;
    }
    let mut rows: Vec<HourMinutes> = totals
        .into_iter()
        .map(|(hour, minutes)| HourMinutes { hour, minutes })
        .collect();
    rows.sort_by(|a, b| a.minutes.total_cmp(&b.minutes));
    rows
}

/// Minutes per weekday, Monday first. Weekdays without plays are left out.
pub fn minutes_by_weekday(table: &EventTable) -> Vec<WeekdayMinutes> {
    let mut totals = [None::<f64>; 7];
    for event in table {
        let slot = &mut totals[event.weekday().num_days_from_monday() as usize];
        *slot = Some(slot.unwrap_or(0.0) + event.minutes_played);
    }
    WEEK_ORDER
        .iter()
        .zip(totals)
        .filter_map(|(&weekday, minutes)| minutes.map(|minutes| WeekdayMinutes { weekday, minutes }))
        .collect()
}

/// Minutes per calendar month, oldest first.
pub fn minutes_by_year_month(table: &EventTable) -> Vec<MonthMinutes> {
    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for event in table {
        *totals.entry((event.year(), event.month())).or_insert(0.0) += event.minutes_played;
    }
    totals
        .into_iter()
        .map(|((year, month), minutes)| MonthMinutes {
            year,
            month,
            minutes,
        })
        .collect()
}

/// Minutes per time bucket. Always returns all four buckets in day order,
/// zero-filled where there were no plays.
pub fn minutes_by_time_bucket(table: &EventTable) -> Vec<BucketMinutes> {
    let mut totals = [0.0f64; 4];
    for event in table {
        totals[event.time_bucket() as usize] += event.minutes_played;
    }
    TimeBucket::ALL
        .iter()
        .zip(totals)
        .map(|(&bucket, minutes)| BucketMinutes { bucket, minutes })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{play, table};

    #[test]
    fn test_top_artists_sums_and_orders() {
        let t = table(vec![
            play("2024-01-01 10:00:00", "A", "a1", 3.0),
            play("2024-01-01 11:00:00", "B", "b1", 5.0),
            play("2024-01-02 10:00:00", "A", "a2", 4.0),
            play("2024-01-02 12:00:00", "C", "c1", 1.0),
        ]);
        let top = top_artists_by_minutes(&t, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].artist, "A");
        assert_eq!(top[0].minutes, 7.0);
        assert_eq!(top[1].artist, "B");
    }

    #[test]
    fn test_top_artists_tie_break_is_first_seen() {
        let t = table(vec![
            play("2024-01-03 10:00:00", "Zoe", "z", 2.0),
            play("2024-01-01 10:00:00", "Abel", "a", 2.0),
            play("2024-01-02 10:00:00", "Mia", "m", 2.0),
        ]);
        let names: Vec<_> = top_artists_by_minutes(&t, 10)
            .into_iter()
            .map(|r| r.artist)
            .collect();
        assert_eq!(names, vec!["Zoe", "Abel", "Mia"]);
    }

    #[test]
    fn test_top_tracks_keyed_by_track_and_artist() {
        let t = table(vec![
            play("2024-01-01 10:00:00", "A", "Intro", 1.0),
            play("2024-01-01 11:00:00", "B", "Intro", 2.0),
            play("2024-01-01 12:00:00", "A", "Intro", 2.5),
        ]);
        let top = top_tracks(&t, 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].artist, "A");
        assert_eq!(top[0].minutes, 3.5);
        assert_eq!(top[1].artist, "B");
    }

    #[test]
    fn test_minutes_by_hour_sorted_by_total() {
        let t = table(vec![
            play("2024-01-01 08:00:00", "A", "x", 10.0),
            play("2024-01-01 20:00:00", "A", "x", 1.0),
            play("2024-01-02 08:30:00", "A", "x", 2.0),
            play("2024-01-02 13:00:00", "A", "x", 5.0),
        ]);
        let hours: Vec<_> = minutes_by_hour(&t).iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![20, 13, 8]);
    }

    #[test]
    fn test_minutes_by_hour_ties_fall_back_to_hour() {
        let t = table(vec![
            play("2024-01-01 20:00:00", "A", "x", 5.0),
            play("2024-01-01 03:00:00", "B", "y", 5.0),
            play("2024-01-01 11:00:00", "C", "z", 5.0),
            play("2024-01-01 10:00:00", "D", "w", 5.0),
        ]);
        let hours: Vec<_> = minutes_by_hour(&t).iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![3, 10, 11, 20]);
    }

    #[test]
    fn test_minutes_by_weekday_drops_absent_days() {
        // 2024-01-01 is a Monday, 2024-01-06 a Saturday
        let t = table(vec![
            play("2024-01-06 10:00:00", "A", "x", 4.0),
            play("2024-01-01 10:00:00", "A", "x", 1.0),
            play("2024-01-08 10:00:00", "A", "x", 2.0),
        ]);
        let rows = minutes_by_weekday(&t);
        assert_eq!(
            rows,
            vec![
                WeekdayMinutes {
                    weekday: Weekday::Mon,
                    minutes: 3.0
                },
                WeekdayMinutes {
                    weekday: Weekday::Sat,
                    minutes: 4.0
                },
            ]
        );
    }

    #[test]
    fn test_minutes_by_year_month_chronological() {
        let t = table(vec![
            play("2024-02-10 10:00:00", "A", "x", 1.0),
            play("2023-12-31 10:00:00", "A", "x", 2.0),
            play("2024-02-11 10:00:00", "A", "x", 3.0),
        ]);
        let rows = minutes_by_year_month(&t);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].year, rows[0].month, rows[0].minutes), (2023, 12, 2.0));
        assert_eq!((rows[1].year, rows[1].month, rows[1].minutes), (2024, 2, 4.0));
    }

    #[test]
    fn test_time_buckets_always_four() {
        let t = table(vec![play("2024-01-01 19:00:00", "A", "x", 6.0)]);
        let rows = minutes_by_time_bucket(&t);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].bucket, TimeBucket::Noche);
        assert_eq!(rows[3].minutes, 6.0);
        assert!(rows[..3].iter().all(|r| r.minutes == 0.0));

        let empty = minutes_by_time_bucket(&EventTable::default());
        assert_eq!(
            empty.iter().map(|r| r.bucket).collect::<Vec<_>>(),
            TimeBucket::ALL.to_vec()
        );
    }

    #[test]
    fn test_empty_table_yields_empty_series() {
        let t = EventTable::default();
        assert!(top_artists_by_minutes(&t, 5).is_empty());
        assert!(top_tracks(&t, 5).is_empty());
        assert!(minutes_by_hour(&t).is_empty());
        assert!(minutes_by_weekday(&t).is_empty());
        assert!(minutes_by_year_month(&t).is_empty());
    }
}
