//! TOML-based application configuration.
//!
//! Stored at `~/.config/focusloop/config.toml`. The `[timer]` section feeds
//! the engine through [`SettingsProvider`]; because the engine reads
//! settings only at phase-transition time, an edited value takes effect
//! starting with the next phase.
//!
//! Validation of durations lives here, not in the engine: `set` rejects
//! zero durations and a zero long-break cadence, so a well-formed config
//! file never produces an immediately-completing phase.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::config_dir;
use crate::error::ConfigError;
use crate::settings::SettingsProvider;

/// Timer durations and break cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
}

/// Notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusloop/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_sessions_before_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_before_long_break: default_sessions_before_long_break(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default config on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| ConfigError::ParseFailed(e.to_string())),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a value by dot-separated key, rendered as a string.
    pub fn get(&self, key: &str) -> Option<String> {
        Some(match key {
            "timer.focus_minutes" => self.timer.focus_minutes.to_string(),
            "timer.short_break_minutes" => self.timer.short_break_minutes.to_string(),
            "timer.long_break_minutes" => self.timer.long_break_minutes.to_string(),
            "timer.sessions_before_long_break" => {
                self.timer.sessions_before_long_break.to_string()
            }
            "notifications.enabled" => self.notifications.enabled.to_string(),
            _ => return None,
        })
    }

    /// Set a value by dot-separated key. Does not persist; call [`save`]
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or a duration/cadence value is not positive.
    ///
    /// [`save`]: Config::save
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "timer.focus_minutes" => self.timer.focus_minutes = parse_positive(key, value)?,
            "timer.short_break_minutes" => {
                self.timer.short_break_minutes = parse_positive(key, value)?;
            }
            "timer.long_break_minutes" => {
                self.timer.long_break_minutes = parse_positive(key, value)?;
            }
            "timer.sessions_before_long_break" => {
                self.timer.sessions_before_long_break = parse_positive(key, value)?;
            }
            "notifications.enabled" => {
                self.notifications.enabled =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as bool"),
                    })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, ConfigError> {
    let n: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as number"),
    })?;
    if n == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be positive".to_string(),
        });
    }
    Ok(n)
}

impl SettingsProvider for Config {
    fn focus_duration_ms(&self) -> u64 {
        u64::from(self.timer.focus_minutes) * 60_000
    }

    fn short_break_duration_ms(&self) -> u64 {
        u64::from(self.timer.short_break_minutes) * 60_000
    }

    fn long_break_duration_ms(&self) -> u64 {
        u64::from(self.timer.long_break_minutes) * 60_000
    }

    fn sessions_before_long_break(&self) -> u32 {
        self.timer.sessions_before_long_break
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.timer.focus_minutes, 25);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[timer]\nfocus_minutes = 50\n").unwrap();
        assert_eq!(parsed.timer.focus_minutes, 50);
        assert_eq!(parsed.timer.short_break_minutes, 5);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.focus_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert!(cfg.get("timer.missing_key").is_none());
    }

    #[test]
    fn set_updates_known_keys() {
        let mut cfg = Config::default();
        cfg.set("timer.focus_minutes", "50").unwrap();
        cfg.set("notifications.enabled", "false").unwrap();
        assert_eq!(cfg.timer.focus_minutes, 50);
        assert!(!cfg.notifications.enabled);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_zero_duration() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.focus_minutes", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("timer.sessions_before_long_break", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        // The failed set must not clobber the existing value.
        assert_eq!(cfg.timer.focus_minutes, 25);
    }

    #[test]
    fn set_rejects_unparseable_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("timer.focus_minutes", "soon").is_err());
        assert!(cfg.set("notifications.enabled", "maybe").is_err());
    }

    #[test]
    fn settings_provider_converts_minutes_to_ms() {
        let cfg = Config::default();
        assert_eq!(cfg.focus_duration_ms(), 25 * 60_000);
        assert_eq!(cfg.short_break_duration_ms(), 5 * 60_000);
        assert_eq!(cfg.long_break_duration_ms(), 15 * 60_000);
        assert_eq!(
            SettingsProvider::sessions_before_long_break(&cfg),
            4
        );
    }
}
