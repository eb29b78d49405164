//! The accessibility toggle.
//!
//! This is independent of the status resolver. It flips the board between
//! normal and high-contrast modes, relabels the toggle button and pauses the
//! scrolling marquee while high contrast is on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

pub const HIGH_CONTRAST_LABEL: &str = "🌕 HIGH CONTRAST";
pub const FULL_COLOR_LABEL: &str = "🌑 FULL COLOR";

/// The two display modes of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Normal,
    HighContrast,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Normal => DisplayMode::HighContrast,
            DisplayMode::HighContrast => DisplayMode::Normal,
        }
    }

    /// The button label offered while in this mode, naming the mode it
    /// switches to.
    pub fn button_label(self) -> &'static str {
        match self {
            DisplayMode::Normal => HIGH_CONTRAST_LABEL,
            DisplayMode::HighContrast => FULL_COLOR_LABEL,
        }
    }
}

/// An animated element that can be started and stopped.
pub trait Marquee {
    fn start(&mut self);
    fn stop(&mut self);
}

/// A marquee whose running state is a shared flag, read by whatever task
/// does the actual animating.
#[derive(Debug, Clone, Default)]
pub struct FlagMarquee {
    running: Arc<AtomicBool>,
}

impl FlagMarquee {
    pub fn new(running: bool) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(running)),
        }
    }

    /// A handle to the flag for the animating task.
    pub fn flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

impl Marquee for FlagMarquee {
    fn start(&mut self) {
        self.running.store(true, Ordering::Relaxed);
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

/// The toggle button and the state it controls.
#[derive(Debug)]
pub struct AccessToggle<M: Marquee> {
    mode: DisplayMode,
    label: &'static str,
    marquee: Option<M>,
}

impl<M: Marquee> AccessToggle<M> {
    pub fn new(mode: DisplayMode, marquee: Option<M>) -> Self {
        Self {
            mode,
            label: mode.button_label(),
            marquee,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn marquee(&self) -> Option<&M> {
        self.marquee.as_ref()
    }

    /// Handles one activation of the toggle and returns the new mode.
    pub fn activate(&mut self) -> DisplayMode {
        self.mode = self.mode.toggled();
        self.sync();
        debug!("Display mode is now {:?}.", self.mode);
        self.mode
    }

    /// Brings the label and the marquee in line with the current mode.
    pub fn sync(&mut self) {
        self.label = self.mode.button_label();
        if let Some(marquee) = self.marquee.as_mut() {
            match self.mode {
                DisplayMode::HighContrast => marquee.stop(),
                DisplayMode::Normal => marquee.start(),
            }
        }
    }
}
