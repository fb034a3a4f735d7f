//! Transition observers.
//!
//! A store with a single writer notifies read-only observers after each
//! committed transition. Observers see the snapshot before and after the
//! transition together with the events that produced it, so they can diff the
//! two without ever holding a mutable reference to the state.

use std::sync::{Arc, Mutex, PoisonError};

/// Read-only subscriber to committed state transitions.
pub trait Observer<S, E>: Send {
    /// Called once per committed transition, after the new snapshot is
    /// published. `events` is empty when the store replaced its state
    /// wholesale (for example on restart).
    fn on_transition(&mut self, previous: &S, current: &S, events: &[E]);
}

/// A shared observer: the store holds one handle, the caller keeps another
/// to drive the observer outside of transitions.
impl<S, E, O> Observer<S, E> for Arc<Mutex<O>>
where
    O: Observer<S, E>,
{
    fn on_transition(&mut self, previous: &S, current: &S, events: &[E]) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_transition(previous, current, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        transitions: usize,
        events: usize,
    }

    impl Observer<u32, &'static str> for Counter {
        fn on_transition(&mut self, _previous: &u32, _current: &u32, events: &[&'static str]) {
            self.transitions += 1;
            self.events += events.len();
        }
    }

    #[test]
    fn test_shared_observer_forwards_to_the_inner_observer() {
        // Arrange
        let shared = Arc::new(Mutex::new(Counter::default()));
        let mut handle = Arc::clone(&shared);

        // Act
        handle.on_transition(&0, &1, &["a", "b"]);
        handle.on_transition(&1, &1, &[]);

        // Assert
        let counter = shared.lock().unwrap();
        assert_eq!(counter.transitions, 2);
        assert_eq!(counter.events, 2);
    }
}
