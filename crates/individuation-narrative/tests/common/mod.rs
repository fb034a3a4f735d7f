//! Shared helpers for narrative integration tests.
#![allow(dead_code)]

use individuation_narrative::application::command_handlers::JourneyStore;
use individuation_narrative::domain::commands::JourneyCommand;
use individuation_narrative::domain::phase::Phase;
use individuation_narrative::domain::script::Milestone;
use individuation_test_support::{FixedClock, init_test_tracing};

/// A fresh store on the title phase with a pinned clock.
pub fn new_store() -> JourneyStore {
    init_test_tracing();
    JourneyStore::new(Box::new(FixedClock::default()))
}

/// Advances one phase at a time until the store rests on `target`.
///
/// # Panics
///
/// Panics if `target` lies behind the current phase.
pub fn walk_to(store: &mut JourneyStore, target: Phase) {
    let mut phase = store.state().phase();
    assert!(
        phase.position() <= target.position(),
        "{target} lies behind {phase}"
    );
    while phase != target {
        phase = phase.next_in_order().unwrap();
        store.dispatch(JourneyCommand::advance(phase)).unwrap();
    }
}

/// The phase on which a milestone's beat is completed.
pub fn milestone_phase(milestone: Milestone) -> Phase {
    match milestone {
        Milestone::PrologueQuest => Phase::PrologueQuest,
        Milestone::ImagerySea => Phase::Chapter3Choice,
        Milestone::ShadowEncounter => Phase::Chapter1Choice,
        Milestone::InnerVoice => Phase::Chapter2Choice,
        Milestone::AltarRite => Phase::AlchemyAltar,
        Milestone::Individuation => Phase::Chapter4Individuation,
    }
}

/// Walks to the milestone's phase and completes its beat.
pub fn reach(store: &mut JourneyStore, milestone: Milestone) {
    walk_to(store, milestone_phase(milestone));
    store.dispatch(milestone.beat()).unwrap();
}
