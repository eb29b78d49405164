//! The engine that keeps the venue status current.
//!
//! The engine owns the immutable weekly schedule and a time source. It
//! resolves the status once at start-up and then on every refresh tick,
//! broadcasting the results. Each evaluation is independent and only depends
//! on the instant read at call time.

use crate::config::RefreshInterval;
use crate::events::{StatusEvent, StatusReport, SystemEvent};
use crate::resolver::{resolve, StatusResult};
use crate::schedule::WeeklySchedule;
use crate::time::{CurrentInstant, TimeSource};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// The status engine.
///
/// Cheap to clone; clones share the schedule, the time source and the event
/// channels.
#[derive(Clone)]
pub struct StatusEngine {
    schedule: Arc<WeeklySchedule>,
    refresh: RefreshInterval,
    clock: Arc<dyn TimeSource>,
    status_event_sender: broadcast::Sender<StatusEvent>,
    system_event_sender: broadcast::Sender<SystemEvent>,
    shutdown_sender: broadcast::Sender<()>,
}

impl StatusEngine {
    /// Creates a new `StatusEngine`.
    pub fn new(
        schedule: WeeklySchedule,
        refresh: RefreshInterval,
        clock: impl TimeSource + 'static,
    ) -> Self {
        const CHANNEL_CAPACITY: usize = 64;
        let (status_event_sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (system_event_sender, _) = broadcast::channel(16);
        let (shutdown_sender, _) = broadcast::channel(1);
        Self {
            schedule: Arc::new(schedule),
            refresh,
            clock: Arc::new(clock),
            status_event_sender,
            system_event_sender,
            shutdown_sender,
        }
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    /// Resolves the status for the current instant of the engine's clock.
    pub fn evaluate(&self) -> StatusReport {
        let instant = self.clock.now();
        StatusReport {
            instant,
            status: self.evaluate_at(instant),
        }
    }

    /// Resolves the status for an arbitrary instant.
    pub fn evaluate_at(&self, instant: CurrentInstant) -> StatusResult {
        resolve(&self.schedule, instant)
    }

    /// Runs the refresh loop until Ctrl+C or `ShutdownHandle::shutdown`.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!(
            "Status engine starting up, refreshing every {:?}.",
            self.refresh.period()
        );
        let mut shutdown_rx = self.shutdown_sender.subscribe();
        let mut ticker = interval(self.refresh.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last: Option<StatusResult> = None;

        self.system_event_sender
            .send(SystemEvent::EngineStarted {
                timestamp: tokio::time::Instant::now(),
            })
            .ok();

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Shutdown requested.");
                    break;
                }
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    info!("Shutdown signal received.");
                    break;
                }
                // The first tick completes immediately.
                _ = ticker.tick() => {
                    last = Some(self.publish(last));
                }
            }
        }

        self.system_event_sender
            .send(SystemEvent::EngineShutdown)
            .ok();
        info!("Status engine has shut down.");
        Ok(())
    }

    #[doc(hidden)]
    fn publish(&self, previous: Option<StatusResult>) -> StatusResult {
        let report = self.evaluate();
        debug!("{:?} resolved to {:?}.", report.instant, report.status);
        self.status_event_sender
            .send(StatusEvent::Evaluated(report))
            .ok();
        if previous != Some(report.status) {
            info!("Status changed: {:?} -> {:?}.", previous, report.status);
            self.status_event_sender
                .send(StatusEvent::Changed {
                    previous,
                    current: report,
                })
                .ok();
        }
        report.status
    }

    /// Subscribes to the `StatusEvent` stream.
    pub fn subscribe_status_events(&self) -> broadcast::Receiver<StatusEvent> {
        self.status_event_sender.subscribe()
    }

    /// Subscribes to the `SystemEvent` stream.
    pub fn subscribe_system_events(&self) -> broadcast::Receiver<SystemEvent> {
        self.system_event_sender.subscribe()
    }

    /// A handle that stops a running engine from elsewhere.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(self.shutdown_sender.clone())
    }
}

/// Waits for the next status event, skipping past any a slow receiver missed.
///
/// Returns `None` once every sender is gone.
pub async fn next_status_event(
    status_rx: &mut broadcast::Receiver<StatusEvent>,
) -> Option<StatusEvent> {
    loop {
        match status_rx.recv().await {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Status listener fell behind and skipped {} events.", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

/// Stops the engine's `run` loop.
#[derive(Clone)]
pub struct ShutdownHandle(broadcast::Sender<()>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.send(()).ok();
    }
}
