//! Defines all configuration structures for Openclock.
//!
//! These structs are deserialized with `serde` through the `config` crate,
//! from an optional TOML file layered under `OPENCLOCK_*` environment
//! variables. The weekly schedule is the heart of it; the rest tunes how
//! often the status is refreshed and how the board starts out.
//!
//! ```toml
//! venue = "The Night Owl"
//! refresh = "minute"
//!
//! [[schedule]]
//! day = 0          # Sunday
//! open = 17
//! close = 2
//!
//! [[schedule]]
//! day = 1          # Monday: omit open/close to stay closed
//! ```

use crate::error::ScheduleError;
use crate::schedule::{default_entries, ScheduleEntry, WeeklySchedule};
use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// The top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenClockConfig {
    /// Display name of the venue, used in log lines and the shell banner.
    #[serde(default = "default_venue")]
    pub venue: String,

    /// How often the engine re-evaluates the status.
    #[serde(default)]
    pub refresh: RefreshInterval,

    /// One entry per weekday, 0 = Sunday through 6 = Saturday.
    #[serde(default = "default_entries")]
    pub schedule: Vec<ScheduleEntry>,

    /// How the board starts out.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// How often the status is re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RefreshInterval {
    /// Once a minute. Catches an hour boundary within a minute of it passing.
    #[default]
    Minute,
    /// Once an hour.
    Hourly,
    /// A user-defined period in seconds.
    Custom { seconds: u64 },
}

impl RefreshInterval {
    pub fn period(&self) -> Duration {
        match self {
            RefreshInterval::Minute => Duration::from_secs(60),
            RefreshInterval::Hourly => Duration::from_secs(60 * 60),
            // A zero period would make the timer panic.
            RefreshInterval::Custom { seconds } => Duration::from_secs((*seconds).max(1)),
        }
    }
}

/// Initial state of the board's accessibility controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Start in high-contrast mode.
    #[serde(default)]
    pub high_contrast: bool,

    /// Whether the board has a scrolling marquee at all.
    #[serde(default = "default_marquee")]
    pub marquee: bool,
}

impl OpenClockConfig {
    /// Loads configuration from an optional TOML file, then applies
    /// `OPENCLOCK_*` environment overrides (e.g. `OPENCLOCK_VENUE`).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        builder
            .add_source(
                Environment::with_prefix("OPENCLOCK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("could not read configuration")?
            .try_deserialize()
            .context("configuration has the wrong shape")
    }

    /// Parses configuration from TOML text, without environment overrides.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .context("could not parse configuration")?
            .try_deserialize()
            .context("configuration has the wrong shape")
    }

    /// Checks the schedule entries and builds the immutable weekly table.
    pub fn build_schedule(&self) -> Result<WeeklySchedule, ScheduleError> {
        WeeklySchedule::from_entries(&self.schedule)
    }
}

// --- Default value functions for serde ---

fn default_venue() -> String {
    "The Venue".to_string()
}

fn default_marquee() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            high_contrast: false,
            marquee: default_marquee(),
        }
    }
}

impl Default for OpenClockConfig {
    fn default() -> Self {
        Self {
            venue: default_venue(),
            refresh: RefreshInterval::default(),
            schedule: default_entries(),
            display: DisplayConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Hour, Weekday};

    const WEEKDAYS_ONLY: &str = r#"
        venue = "Lunch Counter"
        refresh = { custom = { seconds = 30 } }

        [display]
        high_contrast = true

        [[schedule]]
        day = 0

        [[schedule]]
        day = 1
        open = 11
        close = 15

        [[schedule]]
        day = 2
        open = 11
        close = 15

        [[schedule]]
        day = 3
        open = 11
        close = 15

        [[schedule]]
        day = 4
        open = 11
        close = 15

        [[schedule]]
        day = 5
        open = 11
        close = 15

        [[schedule]]
        day = 6
    "#;

    #[test]
    fn parses_a_full_file() {
        let config = OpenClockConfig::from_toml_str(WEEKDAYS_ONLY).unwrap();
        assert_eq!(config.venue, "Lunch Counter");
        assert_eq!(config.refresh, RefreshInterval::Custom { seconds: 30 });
        assert_eq!(config.refresh.period(), Duration::from_secs(30));
        assert!(config.display.high_contrast);
        assert!(config.display.marquee);

        let schedule = config.build_schedule().unwrap();
        assert_eq!(schedule.schedule_for(Weekday::Sunday).opening(), None);
        assert_eq!(schedule.schedule_for(Weekday::Wednesday).opening(), Hour::new(11));
    }

    #[test]
    fn empty_file_falls_back_to_the_stock_week() {
        let config = OpenClockConfig::from_toml_str("").unwrap();
        assert_eq!(config.refresh, RefreshInterval::Minute);
        assert_eq!(config.build_schedule().unwrap(), WeeklySchedule::default());
    }

    #[test]
    fn bad_schedule_fails_at_build_time() {
        let config = OpenClockConfig::from_toml_str(
            r#"
            [[schedule]]
            day = 0
            open = 17
            "#,
        )
        .unwrap();
        assert_eq!(
            config.build_schedule(),
            Err(ScheduleError::OpenWithoutClose { day: "SUNDAY" })
        );
    }

    #[test]
    fn refresh_names() {
        let config = OpenClockConfig::from_toml_str(r#"refresh = "hourly""#).unwrap();
        assert_eq!(config.refresh.period(), Duration::from_secs(3600));
        assert_eq!(RefreshInterval::Custom { seconds: 0 }.period(), Duration::from_secs(1));
    }
}
