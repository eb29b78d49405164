//! Contains common, primitive types shared by every Openclock module.
//!
//! Weekdays and hours are the only two units the schedule understands. Using
//! distinct validated types instead of bare integers keeps out-of-range values
//! out of the resolver entirely.

use std::fmt;
use std::str::FromStr;

/// A day of the week, indexed 0–6 starting from Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Every weekday, in index order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Looks up a weekday by its index (0 = Sunday … 6 = Saturday).
    ///
    /// Returns `None` if the index is out of range.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The day before this one, wrapping Sunday back to Saturday.
    pub fn previous(self) -> Self {
        Self::ALL[((self.index() + 6) % 7) as usize]
    }

    /// The day after this one, wrapping Saturday round to Sunday.
    pub fn next(self) -> Self {
        Self::ALL[((self.index() + 1) % 7) as usize]
    }

    /// The fixed uppercase display name used on the status board.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "SUNDAY",
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        // chrono counts from Sunday = 0 here as well.
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

/// Returned when a string names no known weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWeekdayError(pub String);

impl fmt::Display for ParseWeekdayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a weekday", self.0)
    }
}

impl std::error::Error for ParseWeekdayError {}

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    /// Accepts a numeric index, a full English name or its three-letter
    /// abbreviation, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u8>() {
            return Self::from_index(index).ok_or_else(|| ParseWeekdayError(s.to_string()));
        }
        let upper = trimmed.to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.name() == upper || (upper.len() == 3 && day.name().starts_with(&upper)))
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}

/// A whole hour of the day in the range 0–23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hour(u8);

impl Hour {
    pub const MIDNIGHT: Hour = Hour(0);
    pub const NOON: Hour = Hour(12);

    /// Creates an `Hour`, or `None` if `value` is not in 0–23.
    pub fn new(value: u8) -> Option<Self> {
        (value < 24).then_some(Self(value))
    }

    /// Creates an `Hour`, wrapping `value` modulo 24.
    pub const fn wrapping(value: u8) -> Self {
        Self(value % 24)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Hour {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("hour {} is outside 0-23", value))
    }
}
