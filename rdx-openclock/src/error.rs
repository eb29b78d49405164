//! Error types for schedule configuration.
//!
//! Every error here is a configuration error found while building the weekly
//! table at startup. Resolving a status against a valid table cannot fail.

use thiserror::Error;

/// Why a weekly schedule was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// An entry named a day index outside 0–6.
    #[error("day index {0} is outside 0-6 (0 = Sunday)")]
    UnknownDay(u8),

    /// The same day appears more than once.
    #[error("{day} is listed more than once")]
    DuplicateDay {
        /// Name of the repeated day.
        day: &'static str,
    },

    /// A day has no entry at all.
    #[error("{day} has no entry; every day from SUNDAY to SATURDAY must be listed")]
    MissingDay {
        /// Name of the missing day.
        day: &'static str,
    },

    /// A day opens but never closes.
    #[error("{day} has an opening hour but no closing hour")]
    OpenWithoutClose {
        /// Name of the offending day.
        day: &'static str,
    },

    /// An hour outside 0–23.
    #[error("{day} has {field} hour {hour}, which is outside 0-23")]
    HourOutOfRange {
        /// Name of the offending day.
        day: &'static str,
        /// Which field, `open` or `close`.
        field: &'static str,
        /// The rejected value.
        hour: u8,
    },
}

/// Shorthand `Result` for schedule construction.
pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;
