//! Core domain types for tunelog
//!
//! These types represent the canonical data model that every analytics
//! query consumes read-only.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Play** | One playback of a track, with when it started and how long it ran |
//! | **EventTable** | All plays for one listener, see [`crate::table::EventTable`] |
//! | **Time bucket** | One of four fixed six-hour slices of the day |
//! | **Week part** | Weekday (Mon-Thu) or weekend (Fri-Sun) |
//!
//! Hour, weekday, year and month are never stored on a [`PlayEvent`]; they are
//! derived from its timestamp on demand so they cannot drift out of sync.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

// ============================================
// Plays
// ============================================

/// A single playback from a listening history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayEvent {
    /// When playback happened (listener's wall clock)
    pub timestamp: NaiveDateTime,
    /// Artist name, never empty
    pub artist: String,
    /// Track title
    pub track: String,
    /// How long the track played, in minutes (non-negative)
    pub minutes_played: f64,
}

impl PlayEvent {
    pub fn new(
        timestamp: NaiveDateTime,
        artist: impl Into<String>,
        track: impl Into<String>,
        minutes_played: f64,
    ) -> Self {
        Self {
            timestamp,
            artist: artist.into(),
            track: track.into(),
            minutes_played,
        }
    }

    /// Calendar date of the play.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour of day (0-23).
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Month of year (1-12).
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    pub fn time_bucket(&self) -> TimeBucket {
        TimeBucket::from_hour(self.hour())
    }
}

/// Raw play as handed over by a loader, before validation.
///
/// Every field is optional so a missing one can be reported by name instead
/// of failing deserialization of the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayRecord {
    pub timestamp: Option<String>,
    pub artist: Option<String>,
    pub track: Option<String>,
    pub minutes_played: Option<f64>,
}

// ============================================
// Time Buckets
// ============================================

/// Fixed partition of the day into four six-hour slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    /// 00:00-05:59
    Madrugada,
    /// 06:00-11:59
    Manana,
    /// 12:00-17:59
    Tarde,
    /// 18:00-23:59
    Noche,
}

impl TimeBucket {
    /// All buckets in chronological order.
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Madrugada,
        TimeBucket::Manana,
        TimeBucket::Tarde,
        TimeBucket::Noche,
    ];

    /// Map an hour of day to its bucket. Hours past 23 wrap.
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            0..=5 => TimeBucket::Madrugada,
            6..=11 => TimeBucket::Manana,
            12..=17 => TimeBucket::Tarde,
            _ => TimeBucket::Noche,
        }
    }

    /// First and last hour covered by this bucket.
    pub fn hours(&self) -> (u32, u32) {
        match self {
            TimeBucket::Madrugada => (0, 5),
            TimeBucket::Manana => (6, 11),
            TimeBucket::Tarde => (12, 17),
            TimeBucket::Noche => (18, 23),
        }
    }
}

// ============================================
// Week Parts
// ============================================

/// Which side of the week a day falls on.
///
/// Friday counts as weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekPart {
    Weekday,
    Weekend,
}

impl WeekPart {
    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Fri | Weekday::Sat | Weekday::Sun => WeekPart::Weekend,
            _ => WeekPart::Weekday,
        }
    }
}

/// Weekdays in Monday-first display order.
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_derived_fields_follow_timestamp() {
        let event = PlayEvent::new(at("2024-03-09 22:15:00"), "Bad Bunny", "Titi", 3.5);
        assert_eq!(event.hour(), 22);
        assert_eq!(event.weekday(), Weekday::Sat);
        assert_eq!(event.year(), 2024);
        assert_eq!(event.month(), 3);
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(event.time_bucket(), TimeBucket::Noche);
    }

    #[test]
    fn test_every_hour_has_exactly_one_bucket() {
        for hour in 0..24 {
            let bucket = TimeBucket::from_hour(hour);
            let (first, last) = bucket.hours();
            assert!((first..=last).contains(&hour), "hour {hour} in {bucket:?}");
            let owners = TimeBucket::ALL
                .iter()
                .filter(|b| (b.hours().0..=b.hours().1).contains(&hour))
                .count();
            assert_eq!(owners, 1);
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(TimeBucket::from_hour(0), TimeBucket::Madrugada);
        assert_eq!(TimeBucket::from_hour(5), TimeBucket::Madrugada);
        assert_eq!(TimeBucket::from_hour(6), TimeBucket::Manana);
        assert_eq!(TimeBucket::from_hour(11), TimeBucket::Manana);
        assert_eq!(TimeBucket::from_hour(12), TimeBucket::Tarde);
        assert_eq!(TimeBucket::from_hour(17), TimeBucket::Tarde);
        assert_eq!(TimeBucket::from_hour(18), TimeBucket::Noche);
        assert_eq!(TimeBucket::from_hour(23), TimeBucket::Noche);
    }

    #[test]
    fn test_week_parts() {
        assert_eq!(WeekPart::from_weekday(Weekday::Mon), WeekPart::Weekday);
        assert_eq!(WeekPart::from_weekday(Weekday::Thu), WeekPart::Weekday);
        assert_eq!(WeekPart::from_weekday(Weekday::Fri), WeekPart::Weekend);
        assert_eq!(WeekPart::from_weekday(Weekday::Sun), WeekPart::Weekend);
    }
}
