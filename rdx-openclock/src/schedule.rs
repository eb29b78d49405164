//! The weekly schedule model.
//!
//! A `WeeklySchedule` is built once from raw `ScheduleEntry` values, checked,
//! and never mutated afterwards. Lookups against it are total.

use crate::common::{Hour, Weekday};
use crate::error::{Result, ScheduleError};
use serde::Deserialize;
use tracing::{debug, warn};

/// Whether a shift ends on the day it started or runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftKind {
    /// `close > open`: the shift is contained in one calendar day.
    SameDay,
    /// `close <= open`: the shift closes on the following calendar day.
    Overnight,
}

/// The opening hours for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyHours {
    open: Option<Hour>,
    close: Option<Hour>,
}

impl DailyHours {
    pub fn open_between(open: Hour, close: Hour) -> Self {
        Self {
            open: Some(open),
            close: Some(close),
        }
    }

    pub fn closed() -> Self {
        Self {
            open: None,
            close: None,
        }
    }

    pub fn opening(&self) -> Option<Hour> {
        self.open
    }

    pub fn closing(&self) -> Option<Hour> {
        self.close
    }

    /// Both ends of the shift, if the venue opens on this day at all.
    pub fn shift_hours(&self) -> Option<(Hour, Hour)> {
        self.open.zip(self.close)
    }

    /// Classifies the day's shift. `None` means closed all day.
    ///
    /// `open == close` counts as overnight.
    pub fn shift(&self) -> Option<ShiftKind> {
        self.shift_hours().map(|(open, close)| {
            if close <= open {
                ShiftKind::Overnight
            } else {
                ShiftKind::SameDay
            }
        })
    }
}

/// A raw, unchecked schedule row as it appears in configuration.
///
/// `open` and `close` may be omitted to mean "closed all day".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleEntry {
    pub day: u8,
    #[serde(default)]
    pub open: Option<u8>,
    #[serde(default)]
    pub close: Option<u8>,
}

impl ScheduleEntry {
    pub fn new(day: u8, open: Option<u8>, close: Option<u8>) -> Self {
        Self { day, open, close }
    }
}

/// An immutable seven-day opening-hours table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [DailyHours; 7],
}

impl WeeklySchedule {
    /// Builds and checks a schedule from raw entries.
    ///
    /// Fails if a day index is out of range, a day is listed twice or not at
    /// all, an hour is outside 0–23, or a day opens without closing.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a ScheduleEntry>,
    {
        let mut slots: [Option<DailyHours>; 7] = [None; 7];

        for entry in entries {
            let day = Weekday::from_index(entry.day).ok_or(ScheduleError::UnknownDay(entry.day))?;
            let slot = &mut slots[day.index() as usize];
            if slot.is_some() {
                return Err(ScheduleError::DuplicateDay { day: day.name() });
            }

            let open = entry.open.map(|h| checked_hour(day, "open", h)).transpose()?;
            let close = entry.close.map(|h| checked_hour(day, "close", h)).transpose()?;

            *slot = Some(match (open, close) {
                (Some(open), Some(close)) => DailyHours::open_between(open, close),
                (Some(_), None) => {
                    return Err(ScheduleError::OpenWithoutClose { day: day.name() })
                }
                (None, Some(close)) => {
                    warn!(
                        "{} has a closing hour ({}) but no opening hour; treating it as closed.",
                        day,
                        close.value()
                    );
                    DailyHours::closed()
                }
                (None, None) => DailyHours::closed(),
            });
        }

        let mut days = [DailyHours::closed(); 7];
        for day in Weekday::ALL {
            days[day.index() as usize] =
                slots[day.index() as usize].ok_or(ScheduleError::MissingDay { day: day.name() })?;
        }

        let schedule = Self { days };
        debug!("Weekly schedule accepted: {:?}", schedule);
        Ok(schedule)
    }

    /// The hours for `day`. Defined for every weekday.
    pub fn schedule_for(&self, day: Weekday) -> &DailyHours {
        &self.days[day.index() as usize]
    }

    /// Iterates over the week from Sunday to Saturday.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DailyHours)> {
        Weekday::ALL.into_iter().zip(self.days.iter())
    }

    /// `true` if at least one day of the week has a shift.
    pub fn has_open_day(&self) -> bool {
        self.days.iter().any(|hours| hours.opening().is_some())
    }
}

/// The stock bar week: 5pm to 2am every night except Monday.
impl Default for WeeklySchedule {
    fn default() -> Self {
        let evening = DailyHours::open_between(Hour::wrapping(17), Hour::wrapping(2));
        let mut days = [evening; 7];
        days[Weekday::Monday.index() as usize] = DailyHours::closed();
        Self { days }
    }
}

fn checked_hour(day: Weekday, field: &'static str, hour: u8) -> Result<Hour> {
    Hour::new(hour).ok_or(ScheduleError::HourOutOfRange {
        day: day.name(),
        field,
        hour,
    })
}

/// The default week as raw entries, in the same shape a config file uses.
pub(crate) fn default_entries() -> Vec<ScheduleEntry> {
    WeeklySchedule::default()
        .iter()
        .map(|(day, hours)| {
            ScheduleEntry::new(
                day.index(),
                hours.opening().map(Hour::value),
                hours.closing().map(Hour::value),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_week(open: Option<u8>, close: Option<u8>) -> Vec<ScheduleEntry> {
        (0..7).map(|day| ScheduleEntry::new(day, open, close)).collect()
    }

    #[test]
    fn accepts_a_complete_week() {
        let schedule = WeeklySchedule::from_entries(&full_week(Some(12), Some(22))).unwrap();
        let friday = schedule.schedule_for(Weekday::Friday);
        assert_eq!(friday.opening(), Hour::new(12));
        assert_eq!(friday.closing(), Hour::new(22));
        assert_eq!(friday.shift(), Some(ShiftKind::SameDay));
    }

    #[test]
    fn entry_order_does_not_matter() {
        let mut entries = full_week(None, None);
        entries.reverse();
        entries[0].open = Some(9);
        entries[0].close = Some(17);
        let schedule = WeeklySchedule::from_entries(&entries).unwrap();
        // The first reversed entry is Saturday.
        assert_eq!(schedule.schedule_for(Weekday::Saturday).opening(), Hour::new(9));
        assert_eq!(schedule.schedule_for(Weekday::Sunday).opening(), None);
    }

    #[test]
    fn rejects_a_missing_day() {
        let mut entries = full_week(None, None);
        entries.remove(3);
        assert_eq!(
            WeeklySchedule::from_entries(&entries),
            Err(ScheduleError::MissingDay { day: "WEDNESDAY" })
        );
    }

    #[test]
    fn rejects_a_duplicate_day() {
        let mut entries = full_week(None, None);
        entries.push(ScheduleEntry::new(1, Some(10), Some(12)));
        assert_eq!(
            WeeklySchedule::from_entries(&entries),
            Err(ScheduleError::DuplicateDay { day: "MONDAY" })
        );
    }

    #[test]
    fn rejects_open_without_close() {
        let mut entries = full_week(None, None);
        entries[5].open = Some(18);
        assert_eq!(
            WeeklySchedule::from_entries(&entries),
            Err(ScheduleError::OpenWithoutClose { day: "FRIDAY" })
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut entries = full_week(None, None);
        entries.push(ScheduleEntry::new(7, None, None));
        assert_eq!(
            WeeklySchedule::from_entries(&entries),
            Err(ScheduleError::UnknownDay(7))
        );

        let mut entries = full_week(None, None);
        entries[2].open = Some(17);
        entries[2].close = Some(24);
        assert_eq!(
            WeeklySchedule::from_entries(&entries),
            Err(ScheduleError::HourOutOfRange {
                day: "TUESDAY",
                field: "close",
                hour: 24
            })
        );
    }

    #[test]
    fn close_without_open_is_closed_all_day() {
        let mut entries = full_week(None, None);
        entries[4].close = Some(2);
        let schedule = WeeklySchedule::from_entries(&entries).unwrap();
        assert_eq!(*schedule.schedule_for(Weekday::Thursday), DailyHours::closed());
        assert!(!schedule.has_open_day());
    }

    #[test]
    fn overnight_and_degenerate_shifts() {
        let late = DailyHours::open_between(Hour::new(17).unwrap(), Hour::new(2).unwrap());
        assert_eq!(late.shift(), Some(ShiftKind::Overnight));
        let same = DailyHours::open_between(Hour::new(9).unwrap(), Hour::new(9).unwrap());
        assert_eq!(same.shift(), Some(ShiftKind::Overnight));
        assert_eq!(DailyHours::closed().shift(), None);
    }

    #[test]
    fn default_week_is_closed_on_monday_only() {
        let schedule = WeeklySchedule::default();
        for (day, hours) in schedule.iter() {
            if day == Weekday::Monday {
                assert_eq!(hours.opening(), None);
            } else {
                assert_eq!(hours.shift_hours(), Some((Hour::new(17).unwrap(), Hour::new(2).unwrap())));
            }
        }
        assert_eq!(WeeklySchedule::from_entries(&default_entries()), Ok(schedule));
    }
}
