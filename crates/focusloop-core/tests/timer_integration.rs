//! End-to-end scenarios for the timer engine: a full focus cycle with the
//! standard 25/5/15/4 settings, driven by a manually advanced clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use focusloop_core::{
    Clock, Notification, NotificationSink, Phase, TelemetryEvent, TelemetrySink, TimerEngine,
    TimerSettings,
};

#[derive(Clone, Default)]
struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    fn advance_secs(&self, secs: u64) {
        self.0.set(self.0.get() + secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

#[derive(Clone, Default)]
struct CapturedTelemetry(Rc<RefCell<Vec<TelemetryEvent>>>);

impl TelemetrySink for CapturedTelemetry {
    fn record(&self, event: TelemetryEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[derive(Clone, Default)]
struct CapturedNotifications(Rc<RefCell<Vec<Notification>>>);

impl NotificationSink for CapturedNotifications {
    fn notify(&self, notification: &Notification) {
        self.0.borrow_mut().push(notification.clone());
    }
}

fn standard_engine() -> (TimerEngine, ManualClock, CapturedTelemetry, CapturedNotifications) {
    let clock = ManualClock::default();
    let telemetry = CapturedTelemetry::default();
    let notifications = CapturedNotifications::default();
    let engine = TimerEngine::with_clock(
        Box::new(TimerSettings::default()),
        Box::new(notifications.clone()),
        Box::new(telemetry.clone()),
        Box::new(clock.clone()),
    );
    (engine, clock, telemetry, notifications)
}

/// Advance the clock and tick once per simulated second until the current
/// phase completes.
fn run_phase_to_completion(engine: &mut TimerEngine, clock: &ManualClock) {
    let phase = engine.session().phase();
    while engine.session().phase() == phase {
        clock.advance_secs(1);
        engine.tick();
    }
}

#[test]
fn full_cycle_reaches_long_break_after_four_focus_phases() {
    let (mut engine, clock, _telemetry, notifications) = standard_engine();

    engine.start();
    assert_eq!(engine.session().phase(), Phase::Focus);
    assert_eq!(engine.session().total_ms(), 1500 * 1000);

    // Focus #1 completes into an auto-started short break.
    run_phase_to_completion(&mut engine, &clock);
    assert_eq!(engine.session().phase(), Phase::ShortBreak);
    assert_eq!(engine.session().completed_focus_count(), 1);
    assert!(engine.session().is_running());
    assert_eq!(engine.session().total_ms(), 300 * 1000);

    // Break, then focus #2 and #3 with their breaks.
    run_phase_to_completion(&mut engine, &clock); // -> Focus
    for expected_count in 2..4 {
        run_phase_to_completion(&mut engine, &clock); // -> ShortBreak
        assert_eq!(engine.session().phase(), Phase::ShortBreak);
        assert_eq!(engine.session().completed_focus_count(), expected_count);
        run_phase_to_completion(&mut engine, &clock); // -> Focus
    }

    // Focus #4 completes straight into the long break, count reset.
    run_phase_to_completion(&mut engine, &clock);
    assert_eq!(engine.session().phase(), Phase::LongBreak);
    assert_eq!(engine.session().completed_focus_count(), 0);
    assert!(engine.session().is_running());
    assert_eq!(engine.session().total_ms(), 900 * 1000);

    // Each completion notified the user about the phase that began.
    let notes = notifications.0.borrow();
    assert_eq!(notes.len(), 7);
    assert!(notes[0].body.contains("short break"));
    assert!(notes[1].body.contains("focus for 25 minutes"));
    assert!(notes[6].body.contains("long break: 15 minutes"));
}

#[test]
fn suspension_mid_phase_is_absorbed_by_the_deadline() {
    let (mut engine, clock, _telemetry, _notifications) = standard_engine();
    engine.start();

    // Ten normal ticks, then the host sleeps for ten minutes before the
    // next tick fires.
    for _ in 0..10 {
        clock.advance_secs(1);
        engine.tick();
    }
    clock.advance_secs(600);
    engine.tick();

    assert_eq!(engine.session().phase(), Phase::Focus);
    assert_eq!(engine.session().remaining_ms(), (1500 - 610) * 1000);
    assert_eq!(engine.display(), "14:50");
}

#[test]
fn suspension_past_the_deadline_completes_the_phase_once() {
    let (mut engine, clock, telemetry, _notifications) = standard_engine();
    engine.start();

    // Sleep well past the end of the focus phase.
    clock.advance_secs(1500 + 120);
    engine.tick();

    assert_eq!(engine.session().phase(), Phase::ShortBreak);
    assert!(engine.session().is_running());
    // The new break runs from its own full duration, not a corrected one.
    assert_eq!(engine.session().remaining_ms(), 300 * 1000);

    let events = telemetry.0.borrow();
    let completions = events.iter().filter(|e| e.name == "timer_completed").count();
    assert_eq!(completions, 1);
}

#[test]
fn telemetry_records_the_whole_session_story() {
    let (mut engine, clock, telemetry, _notifications) = standard_engine();
    engine.start();
    for _ in 0..10 {
        clock.advance_secs(1);
        engine.tick();
    }
    engine.pause();
    engine.start();
    engine.skip();
    engine.reset();

    let names: Vec<String> = telemetry.0.borrow().iter().map(|e| e.name.clone()).collect();
    assert_eq!(
        names,
        vec![
            "timer_started",
            "timer_paused",
            "timer_started",
            "timer_skipped",
            "timer_started", // skip force-continues into the next phase
        ]
    );
}
