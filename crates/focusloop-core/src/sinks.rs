//! Collaborator sinks for notifications and telemetry.
//!
//! Both are fire-and-forget from the engine's point of view: the engine
//! never blocks on or reacts to a sink's outcome. Delivery mechanisms
//! (system notification center, analytics backend) live outside the core;
//! the core only defines the contracts and no-op defaults.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-facing notification request. Delivered immediately, once, with
/// no delivery-confirmation callback to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Delivers notifications to the user.
pub trait NotificationSink {
    fn notify(&self, notification: &Notification);
}

/// A named analytics event with a flat property map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub name: String,
    pub properties: BTreeMap<String, serde_json::Value>,
    pub at: DateTime<Utc>,
}

impl TelemetryEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// Receives telemetry events.
pub trait TelemetrySink {
    fn record(&self, event: TelemetryEvent);
}

/// Discards every notification request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl NotificationSink for NoopNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Discards every telemetry event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record(&self, _event: TelemetryEvent) {}
}
