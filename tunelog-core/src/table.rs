//! The event table and its loader.
//!
//! An [`EventTable`] is built once per listening history and then only read.
//! Construction is the single place where input is validated: a table that
//! exists is guaranteed to hold well-formed plays, so the analytics never
//! re-check them.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime};

use crate::error::{Error, Result};
use crate::types::{PlayEvent, PlayRecord};

/// Timestamp layouts accepted in addition to RFC 3339.
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Immutable collection of plays for one listener.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
    events: Vec<PlayEvent>,
}

impl EventTable {
    /// Build a table from typed events, rejecting any malformed row.
    pub fn new(events: Vec<PlayEvent>) -> Result<Self> {
        for (row, event) in events.iter().enumerate() {
            validate_artist(row, &event.artist)?;
            validate_minutes(row, event.minutes_played)?;
        }
        Ok(Self { events })
    }

    /// Build a table from raw loader records.
    pub fn from_records(records: Vec<PlayRecord>) -> Result<Self> {
        let mut events = Vec::with_capacity(records.len());
        for (row, record) in records.into_iter().enumerate() {
            let raw_ts = record.timestamp.ok_or(Error::MissingField {
                row,
                field: "timestamp",
            })?;
            let timestamp = parse_timestamp(&raw_ts).ok_or_else(|| Error::InvalidField {
                row,
                field: "timestamp",
                message: format!("cannot parse {:?}", raw_ts),
            })?;
            let artist = record.artist.ok_or(Error::MissingField {
                row,
                field: "artist",
            })?;
            validate_artist(row, &artist)?;
            let minutes_played = record.minutes_played.ok_or(Error::MissingField {
                row,
                field: "minutes_played",
            })?;
            validate_minutes(row, minutes_played)?;

            events.push(PlayEvent {
                timestamp,
                artist,
                track: record.track.unwrap_or_default(),
                minutes_played,
            });
        }
        Ok(Self { events })
    }

    /// Parse a listening history from JSON.
    ///
    /// Accepts either a JSON array of records or JSON Lines (one record per
    /// line, blank lines ignored).
    pub fn from_json_str(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();
        let records: Vec<PlayRecord> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)?
        } else {
            trimmed
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| serde_json::from_str::<PlayRecord>(line))
                .collect::<std::result::Result<_, _>>()?
        };
        Self::from_records(records)
    }

    /// Load a listening history file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            plays = table.len(),
            "Loaded listening history"
        );
        Ok(table)
    }

    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of minutes over every play. `0.0` for an empty table.
    pub fn total_minutes(&self) -> f64 {
        self.events.iter().fold(0.0, |acc, e| acc + e.minutes_played)
    }

    /// Earliest and latest timestamp, or `None` for an empty table.
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.events.iter().map(|e| e.timestamp).min()?;
        let max = self.events.iter().map(|e| e.timestamp).max()?;
        Some((min, max))
    }
}

impl<'a> IntoIterator for &'a EventTable {
    type Item = &'a PlayEvent;
    type IntoIter = std::slice::Iter<'a, PlayEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn validate_artist(row: usize, artist: &str) -> Result<()> {
    if artist.trim().is_empty() {
        return Err(Error::InvalidField {
            row,
            field: "artist",
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_minutes(row: usize, minutes: f64) -> Result<()> {
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(Error::InvalidField {
            row,
            field: "minutes_played",
            message: format!("expected a non-negative number, got {}", minutes),
        });
    }
    Ok(())
}
