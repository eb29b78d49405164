//! Defines all public event types broadcast by the status engine.
//!
//! Listeners subscribe to these strongly-typed streams instead of polling the
//! engine.

use crate::resolver::StatusResult;
use crate::time::CurrentInstant;
use tokio::time::Instant;

/// One resolution: the instant it was made for and its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub instant: CurrentInstant,
    pub status: StatusResult,
}

/// Events produced by each evaluation.
#[derive(Debug, Clone)]
pub enum StatusEvent {
    /// Fired for every evaluation, changed or not.
    Evaluated(StatusReport),
    /// Fired when the result differs from the previous evaluation. The first
    /// evaluation always counts as a change.
    Changed {
        previous: Option<StatusResult>,
        current: StatusReport,
    },
}

/// Events related to the lifecycle of the engine itself.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Fired once when the engine's `run` loop begins.
    EngineStarted { timestamp: Instant },
    /// Fired once when the engine's `run` loop is about to exit.
    EngineShutdown,
}
