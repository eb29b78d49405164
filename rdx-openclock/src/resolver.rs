//! Decides whether the venue is open at a given instant.
//!
//! Resolution runs in three steps, in this order:
//!
//! 1. **Carryover.** If yesterday's shift was overnight and has not ended yet,
//!    the venue is open until yesterday's closing hour, whatever today says.
//! 2. **Today.** An overnight shift is open from its opening hour onwards; a
//!    same-day shift is open on `[open, close)`.
//! 3. **Next opening.** Otherwise scan forward from today, at most seven
//!    days, for the first opening still ahead of us.

use crate::common::{Hour, Weekday};
use crate::display::VisualState;
use crate::schedule::{ShiftKind, WeeklySchedule};
use crate::time::CurrentInstant;
use tracing::trace;

/// The outcome of a status resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusResult {
    /// Open now; closes at this hour, today or tomorrow.
    OpenUntil(Hour),
    /// Closed now; opens later today.
    ClosedOpeningAt(Hour),
    /// Closed now; next opens on a later day.
    ClosedOpeningOn(Weekday, Hour),
    /// Closed with no opening anywhere in the week.
    ClosedIndefinitely,
}

impl StatusResult {
    pub fn is_open(&self) -> bool {
        matches!(self, StatusResult::OpenUntil(_))
    }

    pub fn visual_state(&self) -> VisualState {
        if self.is_open() {
            VisualState::Open
        } else {
            VisualState::Closed
        }
    }
}

/// Resolves the venue status for `now`. Total over every valid instant.
pub fn resolve(schedule: &WeeklySchedule, now: CurrentInstant) -> StatusResult {
    let yesterday = schedule.schedule_for(now.weekday.previous());
    if let (Some(ShiftKind::Overnight), Some(close)) = (yesterday.shift(), yesterday.closing()) {
        if now.hour < close {
            trace!("{:?}: still inside yesterday's overnight shift.", now);
            return StatusResult::OpenUntil(close);
        }
    }

    let today = schedule.schedule_for(now.weekday);
    if let Some((open, close)) = today.shift_hours() {
        let open_now = match today.shift() {
            Some(ShiftKind::Overnight) => now.hour >= open,
            _ => open <= now.hour && now.hour < close,
        };
        if open_now {
            trace!("{:?}: inside today's shift.", now);
            return StatusResult::OpenUntil(close);
        }
    }

    next_opening(schedule, now)
}

fn next_opening(schedule: &WeeklySchedule, now: CurrentInstant) -> StatusResult {
    if let Some(open) = schedule.schedule_for(now.weekday).opening() {
        if now.hour < open {
            return StatusResult::ClosedOpeningAt(open);
        }
    }

    let mut day = now.weekday;
    for _ in 1..7 {
        day = day.next();
        if let Some(open) = schedule.schedule_for(day).opening() {
            return StatusResult::ClosedOpeningOn(day, open);
        }
    }

    trace!("{:?}: no opening found in a full week.", now);
    StatusResult::ClosedIndefinitely
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleEntry;

    fn at(weekday: Weekday, hour: u8) -> CurrentInstant {
        CurrentInstant::new(weekday, Hour::new(hour).unwrap())
    }

    fn h(hour: u8) -> Hour {
        Hour::new(hour).unwrap()
    }

    /// A week that is closed except for the given `(day, open, close)` rows.
    fn week_with(open_days: &[(u8, u8, u8)]) -> WeeklySchedule {
        let entries: Vec<ScheduleEntry> = (0..7)
            .map(|day| match open_days.iter().find(|(d, _, _)| *d == day) {
                Some(&(_, open, close)) => ScheduleEntry::new(day, Some(open), Some(close)),
                None => ScheduleEntry::new(day, None, None),
            })
            .collect();
        WeeklySchedule::from_entries(&entries).unwrap()
    }

    #[test]
    fn carryover_beats_todays_own_schedule() {
        // Sunday 17-2, Monday 0-10: Monday 1 AM is still Sunday night.
        let schedule = week_with(&[(0, 17, 2), (1, 0, 10)]);
        assert_eq!(resolve(&schedule, at(Weekday::Monday, 1)), StatusResult::OpenUntil(h(2)));
        // Once carryover ends, Monday's own shift takes over.
        assert_eq!(resolve(&schedule, at(Weekday::Monday, 2)), StatusResult::OpenUntil(h(10)));
    }

    #[test]
    fn carryover_wraps_saturday_into_sunday() {
        let schedule = week_with(&[(6, 20, 3)]);
        assert_eq!(resolve(&schedule, at(Weekday::Sunday, 0)), StatusResult::OpenUntil(h(3)));
        assert_eq!(
            resolve(&schedule, at(Weekday::Sunday, 3)),
            StatusResult::ClosedOpeningOn(Weekday::Saturday, h(20))
        );
    }

    #[test]
    fn same_day_boundaries() {
        let schedule = week_with(&[(3, 12, 22)]);
        assert_eq!(resolve(&schedule, at(Weekday::Wednesday, 12)), StatusResult::OpenUntil(h(22)));
        assert_eq!(resolve(&schedule, at(Weekday::Wednesday, 21)), StatusResult::OpenUntil(h(22)));
        assert!(!resolve(&schedule, at(Weekday::Wednesday, 22)).is_open());
        assert_eq!(
            resolve(&schedule, at(Weekday::Wednesday, 11)),
            StatusResult::ClosedOpeningAt(h(12))
        );
    }

    #[test]
    fn overnight_boundaries_on_the_same_day() {
        let schedule = week_with(&[(2, 17, 2)]);
        assert_eq!(resolve(&schedule, at(Weekday::Tuesday, 17)), StatusResult::OpenUntil(h(2)));
        assert_eq!(resolve(&schedule, at(Weekday::Tuesday, 23)), StatusResult::OpenUntil(h(2)));
        // Tuesday 2 AM is not covered by Tuesday's own shift, and Monday is closed.
        assert_eq!(
            resolve(&schedule, at(Weekday::Tuesday, 2)),
            StatusResult::ClosedOpeningAt(h(17))
        );
    }

    #[test]
    fn scans_forward_to_the_next_open_day() {
        let schedule = week_with(&[(4, 20, 23)]);
        assert_eq!(
            resolve(&schedule, at(Weekday::Monday, 10)),
            StatusResult::ClosedOpeningOn(Weekday::Thursday, h(20))
        );
    }

    #[test]
    fn after_todays_close_the_scan_does_not_revisit_today() {
        // Only Thursday opens. After Thursday's close the scan covers Friday
        // through Wednesday and never comes back round to Thursday.
        let schedule = week_with(&[(4, 20, 23)]);
        assert_eq!(resolve(&schedule, at(Weekday::Thursday, 23)), StatusResult::ClosedIndefinitely);
    }

    #[test]
    fn today_still_to_open() {
        let schedule = week_with(&[(5, 17, 2), (6, 12, 14)]);
        assert_eq!(
            resolve(&schedule, at(Weekday::Friday, 10)),
            StatusResult::ClosedOpeningAt(h(17))
        );
    }

    #[test]
    fn all_closed_week_is_closed_indefinitely() {
        let schedule = week_with(&[]);
        for instant in CurrentInstant::all() {
            assert_eq!(resolve(&schedule, instant), StatusResult::ClosedIndefinitely);
        }
    }

    #[test]
    fn open_equal_to_close_is_treated_as_overnight() {
        // 9 -> 9 counts as overnight: open from 9 AM onwards, then carried over
        // until 9 AM the next day.
        let schedule = week_with(&[(1, 9, 9)]);
        assert_eq!(
            resolve(&schedule, at(Weekday::Monday, 8)),
            StatusResult::ClosedOpeningAt(h(9))
        );
        assert_eq!(resolve(&schedule, at(Weekday::Monday, 9)), StatusResult::OpenUntil(h(9)));
        assert_eq!(resolve(&schedule, at(Weekday::Tuesday, 8)), StatusResult::OpenUntil(h(9)));
        assert_eq!(
            resolve(&schedule, at(Weekday::Tuesday, 9)),
            StatusResult::ClosedOpeningOn(Weekday::Monday, h(9))
        );
    }

    #[test]
    fn stock_bar_week() {
        let schedule = WeeklySchedule::default();
        // Monday is closed, but 1 AM Monday belongs to Sunday night.
        assert_eq!(resolve(&schedule, at(Weekday::Monday, 1)), StatusResult::OpenUntil(h(2)));
        assert_eq!(
            resolve(&schedule, at(Weekday::Monday, 2)),
            StatusResult::ClosedOpeningOn(Weekday::Tuesday, h(17))
        );
        // Monday is closed, so nothing carries over into Tuesday.
        assert_eq!(
            resolve(&schedule, at(Weekday::Tuesday, 1)),
            StatusResult::ClosedOpeningAt(h(17))
        );
        assert_eq!(resolve(&schedule, at(Weekday::Saturday, 18)), StatusResult::OpenUntil(h(2)));
    }

    #[test]
    fn visual_state_follows_openness() {
        assert_eq!(StatusResult::OpenUntil(h(2)).visual_state(), VisualState::Open);
        assert_eq!(StatusResult::ClosedIndefinitely.visual_state(), VisualState::Closed);
    }
}
