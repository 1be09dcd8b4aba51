//! Headline numbers for a listening history.

use std::collections::HashSet;

use serde::Serialize;

use crate::table::EventTable;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Overview {
    pub plays: usize,
    pub total_minutes: f64,
    /// Distinct calendar days with at least one play
    pub active_days: usize,
    pub distinct_artists: usize,
    /// Distinct (track, artist) pairs
    pub distinct_tracks: usize,
}

pub fn overview(table: &EventTable) -> Overview {
    let days: HashSet<_> = table.iter().map(|e| e.date()).collect();
    let artists: HashSet<&str> = table.iter().map(|e| e.artist.as_str()).collect();
    let tracks: HashSet<(&str, &str)> = table
        .iter()
        .map(|e| (e.track.as_str(), e.artist.as_str()))
        .collect();

    Overview {
        plays: table.len(),
        total_minutes: table.total_minutes(),
        active_days: days.len(),
        distinct_artists: artists.len(),
        distinct_tracks: tracks.len(),
    }
}
