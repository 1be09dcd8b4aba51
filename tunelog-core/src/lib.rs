//! # tunelog-core
//!
//! Core library for tunelog - analytics over personal music listening
//! histories.
//!
//! This library provides:
//! - Domain types for plays, time buckets and week parts
//! - The validated, immutable [`EventTable`] and its JSON loader
//! - Pure analytics: rankings, time-bucketed sums, obsession index, streaks,
//!   daily variability and emerging/fading artists
//! - Configuration management
//! - Logging infrastructure
//!
//! Rendering is left to callers: every query returns a typed, serializable
//! record and never formats anything for display.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tunelog_core::analytics::{generate_wrapped, longest_streak, WrappedConfig};
//! use tunelog_core::EventTable;
//!
//! let table = EventTable::load(Path::new("history.json")).expect("failed to load history");
//!
//! let streak = longest_streak(&table, 30.0);
//! println!("longest streak: {} days", streak.length);
//!
//! let report = generate_wrapped(&table, &WrappedConfig::default());
//! println!("{} artists", report.overview.distinct_artists);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use table::EventTable;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod logging;
pub mod table;
pub mod types;
