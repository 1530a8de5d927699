//! Source of the human-readable times stamped on messages and rooms.

/// Produces formatted wall-clock labels.
pub trait Clock: Send + Sync {
    /// Current time as shown to users (`HH:MM`).
    fn now(&self) -> String;
}

/// Local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        parlor_shared::time::current_hour_minute()
    }
}

/// Clock frozen at a fixed label, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}
