//! Wrapped - Listening History in Review
//!
//! Bundles every analytics query into one "Spotify Wrapped"-style report.
//! Each section is computed independently from the same table.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::aggregate::{
    minutes_by_hour, minutes_by_time_bucket, minutes_by_weekday, minutes_by_year_month,
    top_artists_by_minutes, top_tracks, ArtistMinutes, BucketMinutes, HourMinutes, MonthMinutes,
    TrackMinutes, WeekdayMinutes,
};
use super::obsession::{obsession_breakdown, obsession_multi, ObsessionLevel, ObsessionSegment};
use super::overview::{overview, Overview};
use super::split::{busiest_day, emerging_and_fading, BusiestDay, EmergingAndFading};
use super::streak::{longest_streak, Streak};
use super::variability::{daily_variability_with, DailyVariability, DayThresholds};
use super::weekpart::{weekday_vs_weekend_summary, WeekPartReport};
use crate::config::AnalyticsConfig;
use crate::table::EventTable;

/// Configuration for wrapped generation.
#[derive(Debug, Clone)]
pub struct WrappedConfig {
    /// Number of top artists to include
    pub top_artists: usize,
    /// Number of top tracks to include
    pub top_tracks: usize,
    /// Obsession index cutoffs
    pub obsession_ranks: Vec<usize>,
    /// Minimum minutes per day for the streak
    pub streak_min_minutes: f64,
    /// Minimum minutes per day for weekday/weekend comparison
    pub weekday_min_minutes: f64,
    /// Emerging/fading list length
    pub split_top_n: usize,
    /// High/low day classification
    pub day_thresholds: DayThresholds,
}

impl Default for WrappedConfig {
    fn default() -> Self {
        Self::from(&AnalyticsConfig::default())
    }
}

impl From<&AnalyticsConfig> for WrappedConfig {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            top_artists: config.top_artists,
            top_tracks: config.top_tracks,
            obsession_ranks: config.obsession_ranks.clone(),
            streak_min_minutes: config.streak_min_minutes,
            weekday_min_minutes: config.weekday_min_minutes,
            split_top_n: config.split_top_n,
            day_thresholds: DayThresholds {
                high_factor: config.high_day_factor,
                low_factor: config.low_day_factor,
            },
        }
    }
}

/// Complete wrapped statistics for one history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedReport {
    /// First play, if any
    pub first_play: Option<NaiveDateTime>,
    /// Last play, if any
    pub last_play: Option<NaiveDateTime>,
    pub overview: Overview,
    pub top_artists: Vec<ArtistMinutes>,
    pub top_tracks: Vec<TrackMinutes>,
    pub obsession: Vec<ObsessionLevel>,
    pub obsession_breakdown: Vec<ObsessionSegment>,
    pub months: Vec<MonthMinutes>,
    pub weekdays: Vec<WeekdayMinutes>,
    /// Ascending by minutes
    pub hours: Vec<HourMinutes>,
    pub time_buckets: Vec<BucketMinutes>,
    pub week_parts: WeekPartReport,
    /// Weekday mean over weekend mean, if defined
    pub weekday_weekend_ratio: Option<f64>,
    pub variability: Option<DailyVariability>,
    pub streak: Streak,
    /// Threshold the streak was computed with
    pub streak_min_minutes: f64,
    pub artist_shifts: EmergingAndFading,
    pub busiest_day: Option<BusiestDay>,
}

impl WrappedReport {
    /// True when the history had no plays at all.
    pub fn is_empty(&self) -> bool {
        self.overview.plays == 0
    }
}

/// Generate wrapped statistics for a history.
pub fn generate_wrapped(table: &EventTable, config: &WrappedConfig) -> WrappedReport {
    if table.is_empty() {
        tracing::warn!("Generating wrapped for an empty listening history");
    }
    let range = table.time_range();

    let week_parts = weekday_vs_weekend_summary(table, config.weekday_min_minutes);
    let weekday_weekend_ratio = week_parts.ratio();

    let report = WrappedReport {
        first_play: range.map(|(first, _)| first),
        last_play: range.map(|(_, last)| last),
        overview: overview(table),
        top_artists: top_artists_by_minutes(table, config.top_artists),
        top_tracks: top_tracks(table, config.top_tracks),
        obsession: obsession_multi(table, &config.obsession_ranks),
        obsession_breakdown: obsession_breakdown(table),
        months: minutes_by_year_month(table),
        weekdays: minutes_by_weekday(table),
        hours: minutes_by_hour(table),
        time_buckets: minutes_by_time_bucket(table),
        week_parts,
        weekday_weekend_ratio,
        variability: daily_variability_with(table, config.day_thresholds),
        streak: longest_streak(table, config.streak_min_minutes),
        streak_min_minutes: config.streak_min_minutes,
        artist_shifts: emerging_and_fading(table, config.split_top_n),
        busiest_day: busiest_day(table),
    };

    tracing::debug!(
        plays = report.overview.plays,
        active_days = report.overview.active_days,
        streak = report.streak.length,
        "Generated wrapped report"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{play, table};
    use crate::types::TimeBucket;

    #[test]
    fn test_default_config_matches_analytics_defaults() {
        let config = WrappedConfig::default();
        assert_eq!(config.top_artists, 20);
        assert_eq!(config.top_tracks, 10);
        assert_eq!(config.obsession_ranks, vec![1, 5, 10]);
        assert_eq!(config.streak_min_minutes, 30.0);
        assert_eq!(config.split_top_n, 5);
        assert_eq!(config.day_thresholds, DayThresholds::default());
    }

    #[test]
    fn test_generate_wrapped() {
        let t = table(vec![
            play("2024-01-01 08:00:00", "A", "a1", 40.0),
            play("2024-01-02 21:00:00", "B", "b1", 35.0),
            play("2024-01-03 14:00:00", "A", "a2", 50.0),
            play("2024-01-06 02:00:00", "C", "c1", 10.0),
        ]);
        let config = WrappedConfig {
            top_artists: 2,
            ..Default::default()
        };
        let report = generate_wrapped(&t, &config);

        assert!(!report.is_empty());
        assert_eq!(report.overview.plays, 4);
        assert_eq!(report.top_artists.len(), 2);
        assert_eq!(report.top_artists[0].artist, "A");
        assert_eq!(report.obsession.len(), 3);
        assert_eq!(report.time_buckets.len(), 4);
        assert_eq!(report.time_buckets[0].bucket, TimeBucket::Madrugada);
        assert_eq!(report.streak.length, 3);
        assert_eq!(report.streak_min_minutes, 30.0);
        assert_eq!(report.variability.unwrap().active_days, 4);
        assert_eq!(report.busiest_day.as_ref().unwrap().top_artist, "A");
        assert!(report.first_play.unwrap() < report.last_play.unwrap());
    }

    #[test]
    fn test_generate_wrapped_empty() {
        let report = generate_wrapped(&EventTable::default(), &WrappedConfig::default());
        assert!(report.is_empty());
        assert!(report.top_artists.is_empty());
        assert_eq!(report.time_buckets.len(), 4);
        assert!(report.obsession.iter().all(|l| l.percentage == 0.0));
        assert!(report.variability.is_none());
        assert!(report.streak.is_empty());
        assert!(report.weekday_weekend_ratio.is_none());
        assert!(report.busiest_day.is_none());
        assert!(report.first_play.is_none());
    }

    #[test]
    fn test_generate_wrapped_is_idempotent() {
        let t = table(vec![
            play("2024-01-01 08:00:00", "A", "a1", 12.5),
            play("2024-02-02 21:00:00", "B", "b1", 7.25),
        ]);
        let config = WrappedConfig::default();
        assert_eq!(generate_wrapped(&t, &config), generate_wrapped(&t, &config));
    }
}
