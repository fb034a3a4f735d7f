//! Clock abstraction.
//!
//! Event timestamps come from an injected clock so that tests can pin them.

use chrono::{DateTime, Utc};

/// Source of the current time for event metadata.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
