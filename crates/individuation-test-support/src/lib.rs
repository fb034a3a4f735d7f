//! Shared test doubles and utilities for the Individuation narrative engine.

mod clock;
mod logging;
mod observer;
mod sink;

pub use clock::{FixedClock, fixed_now};
pub use logging::init_test_tracing;
pub use observer::{RecordedTransition, RecordingObserver, TransitionLog};
pub use sink::{RecordingSink, SinkCall};
