//! Settings provider seam.
//!
//! The engine reads settings only at phase-transition time, so a changed
//! value takes effect starting with the next phase, never mid-phase.

use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Configurable durations and break cadence consumed by the engine.
///
/// All durations must be positive; the engine does not validate and will
/// treat a non-positive duration as an immediately-completing phase.
/// Validation is owned by the settings layer (see `Config::set`).
pub trait SettingsProvider {
    fn focus_duration_ms(&self) -> u64;
    fn short_break_duration_ms(&self) -> u64;
    fn long_break_duration_ms(&self) -> u64;

    /// Consecutive focus completions before a long break is taken.
    fn sessions_before_long_break(&self) -> u32;

    fn notifications_enabled(&self) -> bool;

    /// Duration assigned when the given phase begins. `Idle` maps to 0.
    fn duration_ms_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Idle => 0,
            Phase::Focus => self.focus_duration_ms(),
            Phase::ShortBreak => self.short_break_duration_ms(),
            Phase::LongBreak => self.long_break_duration_ms(),
        }
    }
}

/// Plain settings value, for embedding and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_ms: u64,
    pub short_break_ms: u64,
    pub long_break_ms: u64,
    pub sessions_before_long_break: u32,
    pub notifications_enabled: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_ms: Phase::Focus.default_duration_ms(),
            short_break_ms: Phase::ShortBreak.default_duration_ms(),
            long_break_ms: Phase::LongBreak.default_duration_ms(),
            sessions_before_long_break: 4,
            notifications_enabled: true,
        }
    }
}

impl SettingsProvider for TimerSettings {
    fn focus_duration_ms(&self) -> u64 {
        self.focus_ms
    }

    fn short_break_duration_ms(&self) -> u64 {
        self.short_break_ms
    }

    fn long_break_duration_ms(&self) -> u64 {
        self.long_break_ms
    }

    fn sessions_before_long_break(&self) -> u32 {
        self.sessions_before_long_break
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_for_maps_each_phase() {
        let s = TimerSettings::default();
        assert_eq!(s.duration_ms_for(Phase::Idle), 0);
        assert_eq!(s.duration_ms_for(Phase::Focus), 25 * 60_000);
        assert_eq!(s.duration_ms_for(Phase::ShortBreak), 5 * 60_000);
        assert_eq!(s.duration_ms_for(Phase::LongBreak), 15 * 60_000);
    }
}
