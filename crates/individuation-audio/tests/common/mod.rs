//! Shared helpers for audio integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use individuation_audio::application::director::AudioDirector;
use individuation_audio::config::AudioConfig;
use individuation_narrative::application::command_handlers::JourneyStore;
use individuation_narrative::domain::commands::JourneyCommand;
use individuation_narrative::domain::phase::Phase;
pub use individuation_test_support::{RecordingSink, SinkCall};
use individuation_test_support::{FixedClock, init_test_tracing};

pub type SharedDirector = Arc<Mutex<AudioDirector<RecordingSink>>>;

/// A store with a director subscribed, plus handles onto both ends.
pub fn store_with_director() -> (JourneyStore, SharedDirector, RecordingSink) {
    init_test_tracing();
    let sink = RecordingSink::default();
    let director = Arc::new(Mutex::new(AudioDirector::new(
        AudioConfig::default(),
        sink.clone(),
    )));
    let mut store = JourneyStore::new(Box::new(FixedClock::default()));
    store.subscribe(Arc::clone(&director));
    (store, director, sink)
}

/// Advances one phase at a time until the store rests on `target`.
pub fn walk_to(store: &mut JourneyStore, target: Phase) {
    let mut phase = store.state().phase();
    while phase != target {
        phase = phase.next_in_order().unwrap();
        store.dispatch(JourneyCommand::advance(phase)).unwrap();
    }
}
