//! # Openclock
//!
//! Tells you whether a venue is open right now and, if it is closed, when it
//! next opens.
//!
//! ## Core Concepts
//!
//! - **WeeklySchedule**: an immutable seven-day table of opening hours, checked
//!   once at start-up. A shift whose closing hour is not after its opening
//!   hour runs overnight into the next day.
//! - **Resolver**: a pure function from a schedule and the current weekday and
//!   hour to a `StatusResult`. Yesterday's overnight shift always wins over
//!   today's own hours.
//! - **Display**: status results are rendered to text only at the edge, through
//!   the `StatusDisplay` trait.
//! - **StatusEngine**: re-evaluates on a timer and broadcasts the results.
//!
//! ## Example Usage
//!
//! ```rust
//! use openclock::prelude::*;
//!
//! let schedule = WeeklySchedule::default();
//! let now = CurrentInstant::new(Weekday::Monday, Hour::new(1).unwrap());
//!
//! // Monday is closed, but 1 AM Monday is still Sunday night.
//! let status = resolve(&schedule, now);
//! assert_eq!(status_text(&status), "OPEN UNTIL \n 2 AM :D");
//! ```

pub const ENGINE_NAME: &str = "Openclock";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod access;
pub mod common;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod events;
pub mod resolver;
pub mod schedule;
pub mod time;

/// A prelude module for easy importing of the most common Openclock types.
pub mod prelude {
    pub use crate::access::{AccessToggle, DisplayMode, FlagMarquee, Marquee};
    pub use crate::common::{Hour, Weekday};
    pub use crate::config::{DisplayConfig, OpenClockConfig, RefreshInterval};
    pub use crate::display::{format_hour, render, status_text, StatusDisplay, VisualState};
    pub use crate::engine::{next_status_event, ShutdownHandle, StatusEngine};
    pub use crate::error::ScheduleError;
    pub use crate::events::{StatusEvent, StatusReport, SystemEvent};
    pub use crate::resolver::{resolve, StatusResult};
    pub use crate::schedule::{DailyHours, ScheduleEntry, ShiftKind, WeeklySchedule};
    pub use crate::time::{CurrentInstant, FixedTimeSource, SystemTimeSource, TimeSource};
}
