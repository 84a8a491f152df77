//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once
//! per second while the engine is running.
//!
//! ## Drift correction
//!
//! On each tick the remaining time is recomputed from the absolute
//! deadline (`scheduled_end_ms - now`) rather than decremented, so any
//! delay between ticks - the process sleeping, the host timer being
//! deferred - is self-correcting: the displayed value always reflects
//! true wall-clock time remaining.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(settings, notifier, telemetry);
//! engine.start();
//! // Once per second:
//! engine.tick();
//! ```

use serde::{Deserialize, Serialize};

use super::session::{Phase, Session};
use crate::clock::{Clock, SystemClock};
use crate::settings::SettingsProvider;
use crate::sinks::{Notification, NotificationSink, TelemetryEvent, TelemetrySink};

/// Full state published to the display layer after every mutating call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub is_running: bool,
    pub remaining_ms: u64,
    pub total_ms: u64,
    pub completed_focus_count: u32,
    /// `MM:SS` while in a phase (running or paused); empty in `Idle`.
    pub display: String,
    /// 0.0 .. 1.0 within the current phase.
    pub progress: f64,
}

/// Core timer engine.
///
/// Owns exactly one [`Session`] and one clock handle. Single-threaded by
/// construction: all public operations and `tick()` are expected to run on
/// the execution context that drives the periodic clock, so no internal
/// locking exists.
pub struct TimerEngine {
    session: Session,
    display: String,
    settings: Box<dyn SettingsProvider>,
    notifier: Box<dyn NotificationSink>,
    telemetry: Box<dyn TelemetrySink>,
    clock: Box<dyn Clock>,
}

impl TimerEngine {
    /// Create an engine in `(Idle, stopped)` using the real wall clock.
    pub fn new(
        settings: Box<dyn SettingsProvider>,
        notifier: Box<dyn NotificationSink>,
        telemetry: Box<dyn TelemetrySink>,
    ) -> Self {
        Self::with_clock(settings, notifier, telemetry, Box::new(SystemClock))
    }

    /// Create an engine with an explicit clock source.
    pub fn with_clock(
        settings: Box<dyn SettingsProvider>,
        notifier: Box<dyn NotificationSink>,
        telemetry: Box<dyn TelemetrySink>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            session: Session::new(),
            display: String::new(),
            settings,
            notifier,
            telemetry,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Display string: `formatted_time()` while mid-phase, empty in `Idle`.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Build a full state snapshot for the display layer.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.session.phase(),
            is_running: self.session.is_running(),
            remaining_ms: self.session.remaining_ms(),
            total_ms: self.session.total_ms(),
            completed_focus_count: self.session.completed_focus_count(),
            display: self.display.clone(),
            progress: self.session.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op if already running.
    ///
    /// From `Idle` this first advances into `Focus`: the idle-to-focus
    /// transition happens on the first start, not at construction.
    pub fn start(&mut self) {
        if self.session.is_running {
            return;
        }
        if self.session.phase == Phase::Idle {
            self.session.advance_phase(self.settings.as_ref());
        }
        let now = self.clock.now_ms();
        self.session.scheduled_end_ms = Some(now + self.session.remaining_ms);
        self.session.is_running = true;
        self.telemetry.record(
            TelemetryEvent::new("timer_started")
                .with("phase", self.session.phase.key())
                .with("total_duration_secs", self.session.total_ms / 1000),
        );
        self.refresh_display();
    }

    /// Stop counting down, keeping the phase and remaining time. No-op if
    /// not running. The telemetry event carries the pre-pause remaining
    /// time.
    pub fn pause(&mut self) {
        if !self.session.is_running {
            return;
        }
        self.telemetry.record(
            TelemetryEvent::new("timer_paused")
                .with("phase", self.session.phase.key())
                .with("remaining_ms", self.session.remaining_ms),
        );
        self.session.scheduled_end_ms = None;
        self.session.is_running = false;
        self.refresh_display();
    }

    /// Abandon the current phase and continue straight into the next one.
    ///
    /// Skip always force-continues: the next phase starts running even if
    /// the timer was paused before the skip.
    pub fn skip(&mut self) {
        self.telemetry.record(
            TelemetryEvent::new("timer_skipped")
                .with("phase", self.session.phase.key())
                .with("remaining_ms", self.session.remaining_ms),
        );
        self.session.scheduled_end_ms = None;
        self.session.is_running = false;
        self.session.advance_phase(self.settings.as_ref());
        self.start();
    }

    /// Return to `(Idle, stopped)` from any state. Emits no telemetry.
    pub fn reset(&mut self) {
        self.session.reset();
        self.refresh_display();
    }

    /// Call once per second while running. No-op otherwise.
    pub fn tick(&mut self) {
        if !self.session.is_running {
            return;
        }
        if let Some(end) = self.session.scheduled_end_ms {
            // Absolute-deadline recomputation, not a decrement. Clamped to
            // the phase total in case the clock moved backward.
            let now = self.clock.now_ms();
            self.session.remaining_ms = end.saturating_sub(now).min(self.session.total_ms);
        } else {
            // No deadline to correct against; fall back to a plain decrement.
            self.session.remaining_ms = self.session.remaining_ms.saturating_sub(1000);
        }
        if self.session.remaining_ms == 0 {
            self.complete_phase();
            return; // complete_phase ends in start(), which refreshes.
        }
        self.refresh_display();
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// The current phase reached zero: notify, advance, and auto-chain
    /// into the next phase. The engine never idles between phases unless
    /// the user explicitly paused first.
    fn complete_phase(&mut self) {
        self.telemetry.record(
            TelemetryEvent::new("timer_completed")
                .with("phase", self.session.phase.key())
                .with("total_duration_secs", self.session.total_ms / 1000),
        );
        self.session.is_running = false;
        self.session.scheduled_end_ms = None;
        self.session.advance_phase(self.settings.as_ref());
        if self.session.phase != Phase::Idle && self.settings.notifications_enabled() {
            let minutes = self.session.total_ms / 60_000;
            self.notifier
                .notify(&phase_notification(self.session.phase, minutes));
        }
        self.start();
    }

    fn refresh_display(&mut self) {
        self.display = if self.session.phase == Phase::Idle {
            String::new()
        } else {
            self.session.formatted_time()
        };
    }
}

/// Notification announcing the phase that just began.
fn phase_notification(phase: Phase, minutes: u64) -> Notification {
    match phase {
        Phase::Focus => Notification {
            title: "Break over".into(),
            body: format!("Time to focus for {minutes} minutes."),
        },
        Phase::ShortBreak => Notification {
            title: "Focus complete".into(),
            body: format!("Take a short break: {minutes} minutes."),
        },
        Phase::LongBreak => Notification {
            title: "Focus complete".into(),
            body: format!("You earned a long break: {minutes} minutes."),
        },
        // Unreachable through the transition table; kept total.
        Phase::Idle => Notification {
            title: "Timer idle".into(),
            body: String::new(),
        },
    }
}
