//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/tunelog/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/tunelog/` (~/.config/tunelog/)
//! - State/Logs: `$XDG_STATE_HOME/tunelog/` (~/.local/state/tunelog/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics thresholds and rank cutoffs
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thresholds and cutoffs handed to the analytics functions.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// How many artists to rank
    #[serde(default = "default_top_artists")]
    pub top_artists: usize,

    /// How many tracks to rank
    #[serde(default = "default_top_tracks")]
    pub top_tracks: usize,

    /// Rank cutoffs for the obsession index
    #[serde(default = "default_obsession_ranks")]
    pub obsession_ranks: Vec<usize>,

    /// Minutes a day needs to count towards a streak
    #[serde(default = "default_streak_min_minutes")]
    pub streak_min_minutes: f64,

    /// Days below this are ignored by the weekday/weekend comparison
    #[serde(default)]
    pub weekday_min_minutes: f64,

    /// How many emerging and fading artists to report
    #[serde(default = "default_split_top_n")]
    pub split_top_n: usize,

    /// A day is "high" above this multiple of the mean
    #[serde(default = "default_high_day_factor")]
    pub high_day_factor: f64,

    /// A day is "low" below this multiple of the mean
    #[serde(default = "default_low_day_factor")]
    pub low_day_factor: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_artists: default_top_artists(),
            top_tracks: default_top_tracks(),
            obsession_ranks: default_obsession_ranks(),
            streak_min_minutes: default_streak_min_minutes(),
            weekday_min_minutes: 0.0,
            split_top_n: default_split_top_n(),
            high_day_factor: default_high_day_factor(),
            low_day_factor: default_low_day_factor(),
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.obsession_ranks.is_empty() {
            return Err(Error::Config(
                "analytics.obsession_ranks must not be empty".to_string(),
            ));
        }
        if self.obsession_ranks.contains(&0) {
            return Err(Error::Config(
                "analytics.obsession_ranks must be positive".to_string(),
            ));
        }
        if self.streak_min_minutes < 0.0 || self.weekday_min_minutes < 0.0 {
            return Err(Error::Config(
                "analytics minute thresholds must not be negative".to_string(),
            ));
        }
        if self.low_day_factor < 0.0 || self.low_day_factor > self.high_day_factor {
            return Err(Error::Config(
                "analytics.low_day_factor must be between 0 and high_day_factor".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_top_artists() -> usize {
    20
}

fn default_top_tracks() -> usize {
    10
}

fn default_obsession_ranks() -> Vec<usize> {
    vec![1, 5, 10]
}

fn default_streak_min_minutes() -> f64 {
    30.0
}

fn default_split_top_n() -> usize {
    5
}

fn default_high_day_factor() -> f64 {
    1.5
}

fn default_low_day_factor() -> f64 {
    0.5
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.analytics.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/tunelog/config.toml` (~/.config/tunelog/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("tunelog").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/tunelog/` (~/.local/state/tunelog/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("tunelog")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/tunelog/tunelog.log` (~/.local/state/tunelog/tunelog.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("tunelog.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.top_artists, 20);
        assert_eq!(config.analytics.obsession_ranks, vec![1, 5, 10]);
        assert_eq!(config.analytics.streak_min_minutes, 30.0);
        assert_eq!(config.logging.level, "info");
        assert!(config.analytics.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analytics]
top_artists = 5
obsession_ranks = [1, 3]
streak_min_minutes = 45.0

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.analytics.top_artists, 5);
        assert_eq!(config.analytics.obsession_ranks, vec![1, 3]);
        assert_eq!(config.analytics.streak_min_minutes, 45.0);
        // Untouched keys keep their defaults
        assert_eq!(config.analytics.split_top_n, 5);
        assert_eq!(config.analytics.high_day_factor, 1.5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_analytics_config_validation() {
        let config = AnalyticsConfig {
            obsession_ranks: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            obsession_ranks: vec![0, 5],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            streak_min_minutes: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyticsConfig {
            low_day_factor: 2.0,
            high_day_factor: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analytics]\nsplit_top_n = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.analytics.split_top_n, 3);

        std::fs::write(&path, "[analytics]\nobsession_ranks = []\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
