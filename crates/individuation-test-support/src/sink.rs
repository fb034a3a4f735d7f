//! Test sinks — mock `AudioSink` implementations for tests.

use std::sync::{Arc, Mutex};

use individuation_core::sink::AudioSink;

/// A call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    /// `play_loop` with the track URL.
    Loop(String),
    Pause,
    Resume,
    Stop,
    /// `play_once` with the cue URL.
    Once(String),
}

/// An audio sink that records every call. Clones share one log, so a test
/// can keep a handle while the director owns the sink.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl RecordingSink {
    /// Returns a snapshot of all recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forgets every recorded call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn push(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AudioSink for RecordingSink {
    fn play_loop(&mut self, url: &str, _volume: f32) {
        self.push(SinkCall::Loop(url.to_owned()));
    }

    fn pause(&mut self) {
        self.push(SinkCall::Pause);
    }

    fn resume(&mut self) {
        self.push(SinkCall::Resume);
    }

    fn stop(&mut self) {
        self.push(SinkCall::Stop);
    }

    fn play_once(&mut self, url: &str, _volume: f32) {
        self.push(SinkCall::Once(url.to_owned()));
    }
}
