//! talos-console - Operator console for the Talos camera arm.

use anyhow::Result;
use clap::{Arg, Command};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    // Parse command-line arguments
    let matches = Command::new("talos-console")
        .version(talos_console::VERSION)
        .about("Operator console for the Talos camera arm")
        .long_about(
            "Pans the Talos camera arm from the keyboard: hold an arrow key to pan \
             continuously, press h to return home, and press m to hand control to \
             the vision tracker.",
        )
        .arg(
            Arg::new("grace-ms")
                .long("grace-ms")
                .help("Grace window before a key release is treated as genuine, in milliseconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("cadence-ms")
                .long("cadence-ms")
                .help("Interval between re-asserted pan commands while a key is held, in milliseconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("home-speed")
                .long("home-speed")
                .help("Speed for the one-shot home command")
                .value_parser(clap::value_parser!(u32)),
        )
        .get_matches();

    let mut config = talos_console::ControlConfig::default();
    if let Some(grace_ms) = matches.get_one::<u64>("grace-ms") {
        config = config.with_grace_window(Duration::from_millis(*grace_ms));
    }
    if let Some(cadence_ms) = matches.get_one::<u64>("cadence-ms") {
        config = config.with_motion_cadence(Duration::from_millis(*cadence_ms));
    }
    if let Some(home_speed) = matches.get_one::<u32>("home-speed") {
        config = config.with_home_speed(*home_speed);
    }

    // The arm's real transport is wired in here; without one, commands are
    // logged. A vision tracker can be attached the same way via with_tracker.
    use talos_console::ui::TerminalConsole;
    use talos_console::{Application, LogSink};

    let renderer = Box::new(TerminalConsole::new());
    let sink = Arc::new(LogSink::new());
    let mut app = Application::new(renderer, sink, config)?;

    app.run().await?;

    Ok(())
}
