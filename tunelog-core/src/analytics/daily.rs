//! Daily rollup: one row per calendar day with plays.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::table::EventTable;

/// Total minutes for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub minutes: f64,
}

/// Sum minutes per calendar date, oldest first.
///
/// Sparse: days without plays are absent, not zero. Recomputed on every
/// call.
pub fn daily_totals(table: &EventTable) -> Vec<DailyTotal> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for event in table {
        *totals.entry(event.date()).or_insert(0.0) += event.minutes_played;
    }
    totals
        .into_iter()
        .map(|(date, minutes)| DailyTotal { date, minutes })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{play, table};

    #[test]
    fn test_daily_totals_groups_by_date() {
        let t = table(vec![
            play("2024-01-03 23:59:00", "A", "x", 1.0),
            play("2024-01-01 00:01:00", "A", "x", 2.0),
            play("2024-01-01 18:00:00", "B", "y", 3.0),
        ]);
        let days = daily_totals(&t);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(days[0].minutes, 5.0);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_daily_totals_empty() {
        assert!(daily_totals(&EventTable::default()).is_empty());
    }
}
