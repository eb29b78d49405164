//! Where the resolver gets "now" from.
//!
//! The schedule only has whole-hour resolution, so the current instant is
//! reduced to a weekday and an hour as soon as it is read. No timezone
//! conversion happens: the host's local clock is taken as-is.

use crate::common::{Hour, Weekday};
use chrono::{Datelike, Local, Timelike};

/// A point in the week at whole-hour resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrentInstant {
    pub weekday: Weekday,
    pub hour: Hour,
}

impl CurrentInstant {
    pub fn new(weekday: Weekday, hour: Hour) -> Self {
        Self { weekday, hour }
    }

    /// Truncates any chrono date-time to its weekday and hour.
    pub fn from_datetime<T: Datelike + Timelike>(datetime: &T) -> Self {
        Self {
            weekday: datetime.weekday().into(),
            // chrono guarantees hour() < 24.
            hour: Hour::wrapping(datetime.hour() as u8),
        }
    }

    /// Every instant of the week, Sunday 12 AM first.
    pub fn all() -> impl Iterator<Item = CurrentInstant> {
        Weekday::ALL
            .into_iter()
            .flat_map(|weekday| (0..24).map(move |h| CurrentInstant::new(weekday, Hour::wrapping(h))))
    }
}

/// A source of the current instant.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> CurrentInstant;
}

/// Reads the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> CurrentInstant {
        CurrentInstant::from_datetime(&Local::now())
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub CurrentInstant);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> CurrentInstant {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn truncates_minutes_and_seconds() {
        // 2026-10-20 is a Tuesday.
        let datetime = NaiveDate::from_ymd_opt(2026, 10, 20)
            .unwrap()
            .and_hms_opt(1, 59, 59)
            .unwrap();
        let instant = CurrentInstant::from_datetime(&datetime);
        assert_eq!(instant.weekday, Weekday::Tuesday);
        assert_eq!(instant.hour.value(), 1);
    }

    #[test]
    fn all_covers_the_whole_week() {
        let instants: Vec<_> = CurrentInstant::all().collect();
        assert_eq!(instants.len(), 7 * 24);
        assert_eq!(instants[0], CurrentInstant::new(Weekday::Sunday, Hour::MIDNIGHT));
        assert_eq!(
            instants[instants.len() - 1],
            CurrentInstant::new(Weekday::Saturday, Hour::wrapping(23))
        );
    }

    #[test]
    fn fixed_source_is_fixed() {
        let at = CurrentInstant::new(Weekday::Friday, Hour::NOON);
        let source = FixedTimeSource(at);
        assert_eq!(source.now(), at);
        assert_eq!(source.now(), at);
    }
}
