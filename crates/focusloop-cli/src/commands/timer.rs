use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use clap::Subcommand;
use focusloop_core::{
    Config, Notification, NotificationSink, SettingsProvider, TelemetryEvent, TelemetrySink,
    TimerEngine, TimerSnapshot,
};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the focus cycle in the foreground, ticking once per second
    Run {
        /// Stop after this many completed phases
        #[arg(long)]
        phases: Option<u32>,
        /// Emit telemetry events as JSON lines on stderr
        #[arg(long)]
        json: bool,
    },
    /// Print the phase cycle the current settings produce
    Preview,
}

/// Prints notification requests to the terminal, one line each.
struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        println!("\n{}: {}", notification.title, notification.body);
    }
}

/// Counts completed phases, optionally mirroring every event to stderr as
/// a JSON line.
#[derive(Clone)]
struct CliTelemetry {
    completed: Rc<Cell<u32>>,
    json: bool,
}

impl TelemetrySink for CliTelemetry {
    fn record(&self, event: TelemetryEvent) {
        if event.name == "timer_completed" {
            self.completed.set(self.completed.get() + 1);
        }
        if self.json {
            if let Ok(line) = serde_json::to_string(&event) {
                eprintln!("{line}");
            }
        }
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { phases, json } => run_foreground(phases, json),
        TimerAction::Preview => preview(),
    }
}

fn run_foreground(phases: Option<u32>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let telemetry = CliTelemetry {
        completed: Rc::new(Cell::new(0)),
        json,
    };
    let mut engine = TimerEngine::new(
        Box::new(config),
        Box::new(TerminalNotifier),
        Box::new(telemetry.clone()),
    );

    engine.start();
    loop {
        render(&engine.snapshot());
        std::thread::sleep(Duration::from_secs(1));
        engine.tick();
        if let Some(limit) = phases {
            if telemetry.completed.get() >= limit {
                engine.pause();
                render(&engine.snapshot());
                println!();
                return Ok(());
            }
        }
    }
}

fn render(snapshot: &TimerSnapshot) {
    print!(
        "\r{:<12} {}  {:>5.1}%   ",
        snapshot.phase.label(),
        snapshot.display,
        snapshot.progress * 100.0
    );
    let _ = std::io::stdout().flush();
}

fn preview() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let cadence = SettingsProvider::sessions_before_long_break(&config);
    for i in 1..=cadence {
        println!("{:>2}. Focus        {:>3} min", i * 2 - 1, config.timer.focus_minutes);
        if i == cadence {
            println!("{:>2}. Long Break   {:>3} min", i * 2, config.timer.long_break_minutes);
        } else {
            println!("{:>2}. Short Break  {:>3} min", i * 2, config.timer.short_break_minutes);
        }
    }
    Ok(())
}
