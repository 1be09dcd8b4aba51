//! Weekday versus weekend listening.

use chrono::Datelike;
use serde::Serialize;

use super::daily::daily_totals;
use super::round2;
use crate::table::EventTable;
use crate::types::WeekPart;

/// Listening summary for one side of the week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekPartSummary {
    pub part: WeekPart,
    pub total_minutes: f64,
    /// Two decimals
    pub mean_minutes_per_day: f64,
    pub active_days: usize,
}

/// Per-group summaries, weekday group first. A group with no qualifying days
/// is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekPartReport {
    pub groups: Vec<WeekPartSummary>,
}

impl WeekPartReport {
    pub fn get(&self, part: WeekPart) -> Option<&WeekPartSummary> {
        self.groups.iter().find(|g| g.part == part)
    }

    /// Weekday mean over weekend mean.
    ///
    /// `None` when either group is missing or the weekend mean is zero.
    pub fn ratio(&self) -> Option<f64> {
        let weekday = self.get(WeekPart::Weekday)?;
        let weekend = self.get(WeekPart::Weekend)?;
        if weekend.mean_minutes_per_day > 0.0 {
            Some(weekday.mean_minutes_per_day / weekend.mean_minutes_per_day)
        } else {
            None
        }
    }
}

/// Compare listening on weekdays (Mon-Thu) against weekends (Fri-Sun).
///
/// Days whose total is below `min_minutes_per_day` are ignored; pass `0.0`
/// to keep every active day.
pub fn weekday_vs_weekend_summary(table: &EventTable, min_minutes_per_day: f64) -> WeekPartReport {
    let mut acc = [(0.0f64, 0usize); 2];
    for day in daily_totals(table) {
        if day.minutes < min_minutes_per_day {
            continue;
        }
        let slot = match WeekPart::from_weekday(day.date.weekday()) {
            WeekPart::Weekday => 0,
            WeekPart::Weekend => 1,
        };
        acc[slot].0 += day.minutes;
        acc[slot].1 += 1;
    }

    let groups = [WeekPart::Weekday, WeekPart::Weekend]
        .into_iter()
        .zip(acc)
        .filter(|(_, (_, days))| *days > 0)
        .map(|(part, (total, days))| WeekPartSummary {
            part,
            total_minutes: total,
            mean_minutes_per_day: round2(total / days as f64),
            active_days: days,
        })
        .collect();

    WeekPartReport { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{play, table};

    // 2024-01-01 Mon, 01-02 Tue, 01-05 Fri, 01-06 Sat

    #[test]
    fn test_groups_and_ratio() {
        let t = table(vec![
            play("2024-01-01 10:00:00", "A", "x", 60.0),
            play("2024-01-02 10:00:00", "A", "x", 40.0),
            play("2024-01-05 10:00:00", "A", "x", 20.0),
            play("2024-01-06 10:00:00", "A", "x", 30.0),
        ]);
        let report = weekday_vs_weekend_summary(&t, 0.0);
        let weekday = report.get(WeekPart::Weekday).unwrap();
        assert_eq!(weekday.total_minutes, 100.0);
        assert_eq!(weekday.mean_minutes_per_day, 50.0);
        assert_eq!(weekday.active_days, 2);

        let weekend = report.get(WeekPart::Weekend).unwrap();
        assert_eq!(weekend.total_minutes, 50.0);
        assert_eq!(weekend.mean_minutes_per_day, 25.0);
        assert_eq!(report.ratio(), Some(2.0));
        assert_eq!(report.groups[0].part, WeekPart::Weekday);
    }

    #[test]
    fn test_min_minutes_drops_days() {
        let t = table(vec![
            play("2024-01-01 10:00:00", "A", "x", 60.0),
            play("2024-01-02 10:00:00", "A", "x", 5.0),
            play("2024-01-06 10:00:00", "A", "x", 30.0),
        ]);
        let report = weekday_vs_weekend_summary(&t, 10.0);
        let weekday = report.get(WeekPart::Weekday).unwrap();
        assert_eq!(weekday.active_days, 1);
        assert_eq!(weekday.total_minutes, 60.0);
    }

    #[test]
    fn test_ratio_absent_without_weekend() {
        let t = table(vec![play("2024-01-01 10:00:00", "A", "x", 60.0)]);
        let report = weekday_vs_weekend_summary(&t, 0.0);
        assert_eq!(report.groups.len(), 1);
        assert!(report.get(WeekPart::Weekend).is_none());
        assert!(report.ratio().is_none());
    }

    #[test]
    fn test_ratio_absent_for_silent_weekend() {
        let t = table(vec![
            play("2024-01-01 10:00:00", "A", "x", 60.0),
            play("2024-01-06 10:00:00", "A", "x", 0.0),
        ]);
        let report = weekday_vs_weekend_summary(&t, 0.0);
        assert_eq!(report.get(WeekPart::Weekend).unwrap().active_days, 1);
        assert!(report.ratio().is_none());
    }

    #[test]
    fn test_empty_table() {
        let report = weekday_vs_weekend_summary(&EventTable::default(), 0.0);
        assert!(report.groups.is_empty());
        assert!(report.ratio().is_none());
    }
}
