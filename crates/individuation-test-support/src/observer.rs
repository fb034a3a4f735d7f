//! Test observers — record committed transitions for later assertions.

use std::sync::{Arc, Mutex};

use individuation_core::observer::Observer;

/// A single transition as seen by an observer.
#[derive(Debug, Clone)]
pub struct RecordedTransition<S, E> {
    /// Snapshot before the transition.
    pub previous: S,
    /// Snapshot after the transition.
    pub current: S,
    /// Events committed by the transition.
    pub events: Vec<E>,
}

/// Shared handle onto the transitions captured by a [`RecordingObserver`].
///
/// The observer itself is moved into the store; the test keeps the log.
#[derive(Debug)]
pub struct TransitionLog<S, E> {
    inner: Arc<Mutex<Vec<RecordedTransition<S, E>>>>,
}

impl<S, E> Clone for TransitionLog<S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone, E: Clone> TransitionLog<S, E> {
    /// Returns a snapshot of all recorded transitions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn transitions(&self) -> Vec<RecordedTransition<S, E>> {
        self.inner.lock().unwrap().clone()
    }

    /// Returns the number of recorded transitions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An observer that clones every transition it sees into a [`TransitionLog`].
#[derive(Debug)]
pub struct RecordingObserver<S, E> {
    log: TransitionLog<S, E>,
}

impl<S, E> RecordingObserver<S, E> {
    /// Creates an observer together with the log it writes to.
    #[must_use]
    pub fn with_log() -> (Self, TransitionLog<S, E>) {
        let log = TransitionLog {
            inner: Arc::new(Mutex::new(Vec::new())),
        };
        (Self { log: log.clone() }, log)
    }
}

impl<S, E> Observer<S, E> for RecordingObserver<S, E>
where
    S: Clone + Send,
    E: Clone + Send,
{
    fn on_transition(&mut self, previous: &S, current: &S, events: &[E]) {
        self.log.inner.lock().unwrap().push(RecordedTransition {
            previous: previous.clone(),
            current: current.clone(),
            events: events.to_vec(),
        });
    }
}
