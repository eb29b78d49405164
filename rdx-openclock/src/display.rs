//! Turns a `StatusResult` into what the status board shows.
//!
//! Rendering is split from resolution: the resolver only produces tagged
//! results, and everything string-shaped lives here.

use crate::common::Hour;
use crate::resolver::StatusResult;
use colored::Colorize;
use std::fmt;

/// The binary visual state of the status board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Open,
    Closed,
}

/// A surface that can show the venue status.
pub trait StatusDisplay {
    fn set_text(&mut self, text: &str);
    fn set_visual_state(&mut self, state: VisualState);
}

/// Formats an hour as a 12-hour label, e.g. `17` -> `"5 PM"`.
pub fn format_hour(hour: Hour) -> String {
    match hour.value() {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h > 12 => format!("{} PM", h - 12),
        h => format!("{} AM", h),
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format_hour(*self))
    }
}

/// The two-line board text for a result.
pub fn status_text(status: &StatusResult) -> String {
    match status {
        StatusResult::OpenUntil(close) => format!("OPEN UNTIL \n {} :D", close),
        StatusResult::ClosedOpeningAt(open) => format!("CLOSED :( \n OPENING AT {}", open),
        StatusResult::ClosedOpeningOn(day, open) => {
            format!("CLOSED :( \n OPENING AT {} AT {}", day, open)
        }
        StatusResult::ClosedIndefinitely => "CLOSED :( \n UNTIL FURTHER NOTICE".to_string(),
    }
}

/// Pushes a result onto a display: text first, then the visual state.
pub fn render<D: StatusDisplay + ?Sized>(status: &StatusResult, display: &mut D) {
    display.set_text(&status_text(status));
    display.set_visual_state(status.visual_state());
}

/// Prints the board to the terminal, green when open and red when closed.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    text: String,
}

impl StatusDisplay for ConsoleDisplay {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_visual_state(&mut self, state: VisualState) {
        let board = match state {
            VisualState::Open => self.text.green().bold(),
            VisualState::Closed => self.text.red().bold(),
        };
        println!("{}", board);
    }
}

/// Keeps every update in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingDisplay {
    pub text: Option<String>,
    pub state: Option<VisualState>,
    pub updates: usize,
}

impl StatusDisplay for RecordingDisplay {
    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    fn set_visual_state(&mut self, state: VisualState) {
        self.state = Some(state);
        self.updates += 1;
    }
}
