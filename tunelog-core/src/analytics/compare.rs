//! Side-by-side comparison of two listening histories.

use std::collections::BTreeMap;

use serde::Serialize;

use super::aggregate::minutes_by_year_month;
use super::obsession::{obsession_multi, ObsessionLevel};
use crate::table::EventTable;

/// Summary of one history in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySide {
    pub label: String,
    pub total_minutes: f64,
    pub obsession: Vec<ObsessionLevel>,
}

/// Minutes for one month on each side; `None` where that side has no plays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthComparison {
    pub year: i32,
    pub month: u32,
    pub left_minutes: Option<f64>,
    pub right_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryComparison {
    pub left: HistorySide,
    pub right: HistorySide,
    pub combined_minutes: f64,
    /// Every month either side listened in, oldest first
    pub months: Vec<MonthComparison>,
}

/// Compare two labelled histories. Either may be empty.
pub fn compare_histories(
    left: (&str, &EventTable),
    right: (&str, &EventTable),
    ranks: &[usize],
) -> HistoryComparison {
    let side = |(label, table): (&str, &EventTable)| HistorySide {
        label: label.to_string(),
        total_minutes: table.total_minutes(),
        obsession: obsession_multi(table, ranks),
    };

    let mut months: BTreeMap<(i32, u32), (Option<f64>, Option<f64>)> = BTreeMap::new();
    for row in minutes_by_year_month(left.1) {
        months.entry((row.year, row.month)).or_default().0 = Some(row.minutes);
    }
    for row in minutes_by_year_month(right.1) {
        months.entry((row.year, row.month)).or_default().1 = Some(row.minutes);
    }

    let left = side(left);
    let right = side(right);
    HistoryComparison {
        combined_minutes: left.total_minutes + right.total_minutes,
        left,
        right,
        months: months
            .into_iter()
            .map(|((year, month), (left_minutes, right_minutes))| MonthComparison {
                year,
                month,
                left_minutes,
                right_minutes,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{play, table};

    #[test]
    fn test_compare_histories() {
        let elias = table(vec![
            play("2024-01-05 10:00:00", "A", "x", 10.0),
            play("2024-02-05 10:00:00", "B", "y", 5.0),
        ]);
        let elie = table(vec![
            play("2024-02-10 10:00:00", "C", "z", 7.0),
            play("2024-03-01 10:00:00", "C", "z", 3.0),
        ]);
        let cmp = compare_histories(("Elias", &elias), ("Elie", &elie), &[1, 5]);

        assert_eq!(cmp.left.label, "Elias");
        assert_eq!(cmp.left.total_minutes, 15.0);
        assert_eq!(cmp.right.obsession[0].percentage, 100.0);
        assert_eq!(cmp.combined_minutes, 25.0);

        assert_eq!(cmp.months.len(), 3);
        assert_eq!(cmp.months[0].left_minutes, Some(10.0));
        assert_eq!(cmp.months[0].right_minutes, None);
        assert_eq!(cmp.months[1].left_minutes, Some(5.0));
        assert_eq!(cmp.months[1].right_minutes, Some(7.0));
        assert_eq!((cmp.months[2].year, cmp.months[2].month), (2024, 3));
    }

    #[test]
    fn test_compare_with_empty_side() {
        let one = table(vec![play("2024-01-05 10:00:00", "A", "x", 10.0)]);
        let cmp = compare_histories(("a", &one), ("b", &EventTable::default()), &[1]);
        assert_eq!(cmp.right.total_minutes, 0.0);
        assert_eq!(cmp.right.obsession[0].percentage, 0.0);
        assert!(cmp.months.iter().all(|m| m.right_minutes.is_none()));
    }

    #[test]
    fn test_compare_two_empty_histories() {
        let empty = EventTable::default();
        let cmp = compare_histories(("a", &empty), ("b", &empty), &[1, 5]);
        assert!(cmp.left.total_minutes.is_sign_positive());
        assert!(cmp.combined_minutes.is_sign_positive());
        assert!(cmp.months.is_empty());
    }
}
