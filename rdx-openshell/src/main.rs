use anyhow::{Context, Result};
use colored::Colorize;
use openclock::display::ConsoleDisplay;
use openclock::prelude::*;
use openclock::{ENGINE_NAME, VERSION as LIB_VERSION};
use rustyline::highlight::Highlighter;
use rustyline::Editor;
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SHELL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A custom helper struct for rustyline that enables syntax highlighting.
#[derive(Completer, Helper, Hinter, Validator)]
struct MyHighlighter;

impl Highlighter for MyHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if let Some((command, rest)) = line.split_once(' ') {
            let colored_command = command.yellow().bold();
            let colored_rest = rest.yellow();
            Cow::Owned(format!("{} {}", colored_command, colored_rest))
        } else {
            Cow::Owned(line.yellow().bold().to_string())
        }
    }
    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn print_banner() {
    if env::var("QUIET_MODE").is_ok() {
        return;
    }
    const LOGO_TEXT: &str = include_str!("../logo.log");
    println!("{}", LOGO_TEXT.cyan());

    let version_string = format!(
        "          Shell   v{:<8} Library   v{:<8}",
        SHELL_VERSION, LIB_VERSION
    );
    println!("{}", "-----------------------------------------------------------------".dimmed());
    println!("{}", version_string);
    println!("{}", "-----------------------------------------------------------------".dimmed());
}

/// Spawns the listener that prints status events while watching is on.
fn spawn_status_listener(engine: &StatusEngine, is_watching: Arc<AtomicBool>) {
    let mut status_rx = engine.subscribe_status_events();
    tokio::spawn(async move {
        while let Some(event) = next_status_event(&mut status_rx).await {
            if !is_watching.load(Ordering::Relaxed) {
                continue;
            }
            match event {
                StatusEvent::Changed { previous, current } => {
                    println!(
                        "\n<-- [STATUS CHANGED] {:?} -> {:?}\n{}",
                        previous,
                        current.status,
                        status_text(&current.status)
                    );
                }
                StatusEvent::Evaluated(report) => {
                    println!("<-- [EVALUATED] {} {}: {:?}", report.instant.weekday, report.instant.hour, report.status);
                }
            }
        }
    });
}

/// Spawns the marquee: scrolls the venue name while its flag is raised.
fn spawn_marquee(venue: String, running: Arc<AtomicBool>) {
    tokio::spawn(async move {
        let text: Vec<char> = format!(" ~~ {} ~~ ", venue).chars().collect();
        let mut offset = 0;
        loop {
            tokio::time::sleep(Duration::from_secs(3)).await;
            if running.load(Ordering::Relaxed) {
                let frame: String = text.iter().cycle().skip(offset).take(text.len()).collect();
                println!("<-- [MARQUEE] {}", frame.magenta());
                offset = (offset + 1) % text.len();
            }
        }
    });
}

fn print_schedule(schedule: &WeeklySchedule) {
    println!("Weekly Schedule:");
    for (day, hours) in schedule.iter() {
        match (hours.shift_hours(), hours.shift()) {
            (Some((open, close)), Some(kind)) => {
                let note = match kind {
                    ShiftKind::Overnight => " (overnight)",
                    ShiftKind::SameDay => "",
                };
                println!("  {:<10} {:>5} - {:<5}{}", day, open, close, note);
            }
            _ => println!("  {:<10} {}", day, "closed".dimmed()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    print_banner();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let path = env::args().nth(1).map(PathBuf::from);
    let config = OpenClockConfig::load(path.as_deref())?;
    let schedule = config
        .build_schedule()
        .context("the weekly schedule is invalid")?;

    let engine = StatusEngine::new(schedule, config.refresh, SystemTimeSource);
    let engine_handle = engine.clone();
    let shutdown = engine.shutdown_handle();

    // Create the shared flag for the status listener.
    let is_watching = Arc::new(AtomicBool::new(false));
    spawn_status_listener(&engine_handle, is_watching.clone());

    // The marquee is optional; when present it scrolls until high contrast is on.
    let marquee = config.display.marquee.then(|| FlagMarquee::new(false));
    if let Some(marquee) = &marquee {
        spawn_marquee(config.venue.clone(), marquee.flag());
    }
    let start_mode = if config.display.high_contrast {
        DisplayMode::HighContrast
    } else {
        DisplayMode::Normal
    };
    let mut toggle = AccessToggle::new(start_mode, marquee);
    toggle.sync();

    info!("Spawning {} in the background...", ENGINE_NAME);
    tokio::spawn(async move {
        if let Err(e) = engine.run().await {
            eprintln!("\nEngine stopped with an error: {}", e);
        }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut rl = Editor::new()?;
    let helper = MyHighlighter {};
    rl.set_helper(Some(helper));

    println!(
        "{} is watching '{}'. Type 'help' for commands or 'exit' to quit.",
        ENGINE_NAME.cyan(),
        config.venue
    );

    loop {
        let prompt = format!("{}", ">> ".cyan().bold());
        let readline = rl.readline(&prompt);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let args = line.split_whitespace().collect::<Vec<_>>();

                if let Some(command) = args.first() {
                    match *command {
                        "status" => {
                            let report = engine_handle.evaluate();
                            println!("--> {} {}", report.instant.weekday, report.instant.hour);
                            render(&report.status, &mut ConsoleDisplay::default());
                        }
                        "at" => match (args.get(1), args.get(2)) {
                            (Some(day_str), Some(hour_str)) => {
                                let day = match day_str.parse::<Weekday>() {
                                    Ok(day) => day,
                                    Err(err) => {
                                        println!("Error: {}.", err);
                                        continue;
                                    }
                                };
                                match hour_str.parse::<u8>().ok().and_then(Hour::new) {
                                    Some(hour) => {
                                        let status = engine_handle.evaluate_at(CurrentInstant::new(day, hour));
                                        render(&status, &mut ConsoleDisplay::default());
                                    }
                                    None => println!("Error: '{}' is not an hour between 0 and 23.", hour_str),
                                }
                            }
                            _ => println!("Usage: at <DAY> <HOUR>"),
                        },
                        "schedule" => print_schedule(engine_handle.schedule()),
                        "contrast" => {
                            let mode = toggle.activate();
                            println!("--> Display mode: {:?}. Button now reads '{}'.", mode, toggle.label());
                        }
                        "watch" => match args.get(1) {
                            Some(&"start") => {
                                is_watching.store(true, Ordering::Relaxed);
                                println!("--> Started watching status events.");
                            }
                            Some(&"stop") => {
                                is_watching.store(false, Ordering::Relaxed);
                                println!("--> Stopped watching status events.");
                            }
                            _ => println!("Usage: watch start|stop"),
                        },
                        "help" => {
                            println!("Available commands:");
                            println!("  status                - Shows whether the venue is open right now.");
                            println!("  at <DAY> <HOUR>       - Shows the status at a given weekday and hour.");
                            println!("  schedule              - Prints the weekly schedule.");
                            println!("  contrast              - Toggles high-contrast mode ({}).", toggle.label());
                            println!("  watch start|stop      - Prints status events as they happen.");
                            println!("  exit                  - Quits the shell.");
                        }
                        "exit" => break,
                        _ => println!("Unknown command: '{}'. Type 'help'.", line),
                    }
                }
            }
            Err(_) => {
                println!("Exiting openshell...");
                break;
            }
        }
    }

    shutdown.shutdown();
    Ok(())
}
