//! # Focusloop Core Library
//!
//! This library provides the core business logic for the Focusloop
//! focus-interval timer. It implements a CLI-first philosophy where the
//! full timer is usable from a standalone binary, with any desktop shell
//! being a thin display layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` while running. Remaining time
//!   is recomputed from an absolute deadline on every tick, so delayed or
//!   missed ticks (process suspension, deferred timers) are self-correcting.
//! - **Session**: The value type holding the current phase, timing fields,
//!   and completed-focus count.
//! - **Collaborators**: Trait seams for the settings provider, notification
//!   sink, and telemetry sink, injected at engine construction.
//! - **Storage**: TOML-based configuration, which doubles as the default
//!   settings provider.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Session`]: Phase and timing state observed by the display layer
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod settings;
pub mod sinks;
pub mod storage;
pub mod timer;

pub use clock::{Clock, SystemClock};
pub use error::{ConfigError, CoreError};
pub use settings::{SettingsProvider, TimerSettings};
pub use sinks::{
    Notification, NotificationSink, NoopNotifier, NoopTelemetry, TelemetryEvent, TelemetrySink,
};
pub use storage::Config;
pub use timer::{Phase, Session, TimerEngine, TimerSnapshot};
