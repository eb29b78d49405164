use anyhow::{Context, Result};
use openclock::display::ConsoleDisplay;
use openclock::prelude::*;
use openclock::{ENGINE_NAME, VERSION};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // 2. Load configuration. The first argument, if any, is a TOML file.
    let path = std::env::args().nth(1).map(PathBuf::from);
    let config = OpenClockConfig::load(path.as_deref())?;

    // 3. Validate the schedule before anything is resolved against it.
    let schedule = config
        .build_schedule()
        .context("the weekly schedule is invalid")?;
    info!("{} v{} serving '{}'.", ENGINE_NAME, VERSION, config.venue);

    // 4. Create the engine and render every change to the terminal.
    let engine = StatusEngine::new(schedule, config.refresh, SystemTimeSource);
    spawn_board(&engine);

    // 5. Run until Ctrl+C.
    engine.run().await?;

    Ok(())
}

/// Renders each status change onto a console board.
fn spawn_board(engine: &StatusEngine) {
    let mut status_rx = engine.subscribe_status_events();
    tokio::spawn(async move {
        let mut board = ConsoleDisplay::default();
        while let Some(event) = next_status_event(&mut status_rx).await {
            if let StatusEvent::Changed { current, .. } = event {
                render(&current.status, &mut board);
            }
        }
    });
}
