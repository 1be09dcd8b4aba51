//! Half-period comparison and single-day spotlight.
//!
//! The history is cut at the midpoint between its first and last play.
//! Plays at or before the midpoint belong to the first half, later plays to
//! the second half.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::aggregate::rank_artists;
use super::daily::daily_totals;
use super::rank_descending;
use crate::table::EventTable;

/// Minutes an artist gained or lost between the two halves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShift {
    pub artist: String,
    pub first_half_minutes: f64,
    pub second_half_minutes: f64,
    /// `second_half_minutes - first_half_minutes`
    pub delta: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmergingAndFading {
    /// Largest gains first
    pub emerging: Vec<ArtistShift>,
    /// Largest losses first
    pub fading: Vec<ArtistShift>,
}

/// The day with the most listening and who dominated it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusiestDay {
    pub date: NaiveDate,
    pub minutes: f64,
    pub top_artist: String,
    pub top_artist_minutes: f64,
}

/// Midpoint between the first and last play.
pub fn split_midpoint(table: &EventTable) -> Option<NaiveDateTime> {
    let (min, max) = table.time_range()?;
    Some(min + (max - min) / 2)
}

/// Rank artists by how their minutes moved from the first half of the
/// history to the second.
///
/// An artist heard in only one half counts as zero in the other. Both lists
/// hold up to `top_n` artists and may overlap when `top_n` is more than half
/// the number of distinct artists. Equal deltas keep first-seen artist order.
pub fn emerging_and_fading(table: &EventTable, top_n: usize) -> EmergingAndFading {
    let Some(midpoint) = split_midpoint(table) else {
        return EmergingAndFading::default();
    };

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut shifts: Vec<ArtistShift> = Vec::new();
    for event in table {
        let i = *index.entry(event.artist.as_str()).or_insert_with(|| {
            shifts.push(ArtistShift {
                artist: event.artist.clone(),
                first_half_minutes: 0.0,
                second_half_minutes: 0.0,
                delta: 0.0,
            });
            shifts.len() - 1
        });
        if event.timestamp <= midpoint {
            shifts[i].first_half_minutes += event.minutes_played;
        } else {
            shifts[i].second_half_minutes += event.minutes_played;
        }
    }
    for shift in &mut shifts {
        shift.delta = shift.second_half_minutes - shift.first_half_minutes;
    }

    let mut emerging = shifts.clone();
    rank_descending(&mut emerging, |s| s.delta);
    emerging.truncate(top_n);

    let mut fading = shifts;
    fading.sort_by(|a, b| a.delta.total_cmp(&b.delta));
    fading.truncate(top_n);

    tracing::debug!(
        %midpoint,
        emerging = emerging.len(),
        fading = fading.len(),
        "Split history at midpoint"
    );

    EmergingAndFading { emerging, fading }
}

/// The calendar day with the highest total, with its top artist.
///
/// Ties go to the earliest date. `None` for an empty table.
pub fn busiest_day(table: &EventTable) -> Option<BusiestDay> {
    let mut best: Option<(NaiveDate, f64)> = None;
    for day in daily_totals(table) {
        if best.map_or(true, |(_, minutes)| day.minutes > minutes) {
            best = Some((day.date, day.minutes));
        }
    }
    let (date, minutes) = best?;

    let top = rank_artists(table.iter().filter(|e| e.date() == date), 1)
        .into_iter()
        .next()?;

    Some(BusiestDay {
        date,
        minutes,
        top_artist: top.artist,
        top_artist_minutes: top.minutes,
    })
}
