//! Session state: the current phase and its timing fields.
//!
//! `Session` is a pure value type owned by the engine. Its two operations,
//! `advance_phase` and `reset`, are deterministic and touch nothing beyond
//! the session's own fields.

use serde::{Deserialize, Serialize};

use crate::settings::SettingsProvider;

/// One stage of the focus/break cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Display label for the phase.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Stable lowercase identifier used in telemetry properties.
    pub fn key(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Focus => "focus",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }

    /// Duration used when no settings provider overrides it.
    pub const fn default_duration_ms(&self) -> u64 {
        match self {
            Phase::Idle => 0,
            Phase::Focus => 25 * 60_000,
            Phase::ShortBreak => 5 * 60_000,
            Phase::LongBreak => 15 * 60_000,
        }
    }
}

/// Phase and timing state for one running focus cycle.
///
/// Mutated exclusively by the engine; the display layer reads it after
/// every engine call. Invariants:
///
/// - `remaining_ms <= total_ms` once a phase has begun
/// - `total_ms == 0` iff `phase == Idle`
/// - `scheduled_end_ms.is_some()` iff `is_running`
/// - `completed_focus_count` resets exactly when a long break begins or
///   `Idle` is (re-)entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) phase: Phase,
    pub(crate) is_running: bool,
    /// Remaining time in milliseconds for the current phase.
    pub(crate) remaining_ms: u64,
    /// Duration assigned to the current phase when it began.
    pub(crate) total_ms: u64,
    /// Consecutive completed focus phases since the last long break.
    pub(crate) completed_focus_count: u32,
    /// Wall-clock instant (epoch ms) at which the phase reaches zero.
    pub(crate) scheduled_end_ms: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            is_running: false,
            remaining_ms: 0,
            total_ms: 0,
            completed_focus_count: 0,
            scheduled_end_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn completed_focus_count(&self) -> u32 {
        self.completed_focus_count
    }

    pub fn scheduled_end_ms(&self) -> Option<u64> {
        self.scheduled_end_ms
    }

    /// `MM:SS` rendering of the remaining time, floored to whole seconds.
    pub fn formatted_time(&self) -> String {
        let secs = self.remaining_ms / 1000;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// 0.0 .. 1.0 progress within the current phase; 0.0 while `Idle`.
    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            return 0.0;
        }
        let elapsed = self.total_ms.saturating_sub(self.remaining_ms) as f64;
        (elapsed / self.total_ms as f64).clamp(0.0, 1.0)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Move to the next phase and assign its duration from `settings`.
    ///
    /// Transition table:
    ///
    /// | current    | next                                              |
    /// |------------|---------------------------------------------------|
    /// | Idle       | Focus, count reset                                |
    /// | Focus      | ShortBreak; LongBreak once the cadence is reached |
    /// | ShortBreak | Focus                                             |
    /// | LongBreak  | Focus                                             |
    pub fn advance_phase(&mut self, settings: &dyn SettingsProvider) {
        let next = match self.phase {
            Phase::Idle => {
                self.completed_focus_count = 0;
                Phase::Focus
            }
            Phase::Focus => {
                self.completed_focus_count += 1;
                if self.completed_focus_count >= settings.sessions_before_long_break() {
                    self.completed_focus_count = 0;
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        };
        self.phase = next;
        self.total_ms = settings.duration_ms_for(next);
        self.remaining_ms = self.total_ms;
    }

    /// Return every field to its initial `Idle` value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
