//! Command handling for the Narrative Progression context.
//!
//! [`JourneyStore`] is the only writer of session state. Each dispatched
//! command is decided against the current snapshot, its events are applied
//! as one atomic transition, a fresh snapshot is published, and only then are
//! observers told. Readers hold `Arc<SessionState>` snapshots that never
//! change underneath them.

use std::sync::Arc;

use individuation_core::aggregate::AggregateRoot;
use individuation_core::clock::Clock;
use individuation_core::command::Command;
use individuation_core::error::DomainError;
use individuation_core::observer::Observer;
use tracing::{debug, debug_span, info};
use uuid::Uuid;

use crate::domain::aggregates::Journey;
use crate::domain::commands::JourneyCommand;
use crate::domain::events::{JourneyEvent, JourneyEventKind};
use crate::domain::session::SessionState;

/// An observer of journey transitions.
pub type JourneyObserver = Box<dyn Observer<SessionState, JourneyEvent>>;

/// Single-writer store that owns the journey and publishes snapshots.
pub struct JourneyStore {
    pub(crate) journey: Journey,
    snapshot: Arc<SessionState>,
    pub(crate) clock: Box<dyn Clock>,
    observers: Vec<JourneyObserver>,
}

impl std::fmt::Debug for JourneyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JourneyStore")
            .field("journey", &self.journey)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl JourneyStore {
    /// Starts a new session on the initial phase.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_id(Uuid::new_v4(), clock)
    }

    /// Starts a new session with a caller-chosen session id.
    #[must_use]
    pub fn with_id(session_id: Uuid, clock: Box<dyn Clock>) -> Self {
        let journey = Journey::new(session_id);
        let snapshot = Arc::new(journey.state().clone());
        Self {
            journey,
            snapshot,
            clock,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for every subsequent transition.
    pub fn subscribe(&mut self, observer: impl Observer<SessionState, JourneyEvent> + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<SessionState> {
        Arc::clone(&self.snapshot)
    }

    /// The current session identifier.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.journey.id
    }

    /// Number of events applied in this session.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.journey.version()
    }

    /// Decides and applies one command.
    ///
    /// Returns the events that were applied; an empty list means the command
    /// changed nothing. That covers replays (a reward granted twice) as well
    /// as commands a policy refuses (a locked chapter, a fourth collected
    /// name). Either way the published snapshot is left untouched and
    /// observers are not notified.
    ///
    /// # Errors
    ///
    /// Returns any `DomainError` other than a policy rejection.
    pub fn dispatch(
        &mut self,
        command: impl Into<JourneyCommand>,
    ) -> Result<Vec<JourneyEvent>, DomainError> {
        let command = command.into();
        let span = debug_span!(
            "dispatch",
            command_type = command.command_type(),
            session_id = %self.journey.id
        );
        let _guard = span.enter();

        let correlation_id = Uuid::new_v4();
        match self.decide(&command, correlation_id) {
            Ok(()) => Ok(self.commit()),
            Err(DomainError::Rejected(reason)) => {
                self.journey.clear_uncommitted_events();
                debug!(%reason, "command rejected");
                Ok(Vec::new())
            }
            Err(error) => {
                self.journey.clear_uncommitted_events();
                Err(error)
            }
        }
    }

    fn decide(
        &mut self,
        command: &JourneyCommand,
        correlation_id: Uuid,
    ) -> Result<(), DomainError> {
        let clock = self.clock.as_ref();
        let journey = &mut self.journey;
        match command {
            JourneyCommand::Advance(c) => journey.advance(c.to, correlation_id, clock),
            JourneyCommand::RecordAnswer(c) => journey.record_answer(c, correlation_id, clock),
            JourneyCommand::GrantReward(c) => {
                journey.grant_reward(&c.reward, correlation_id, clock);
            }
            JourneyCommand::RemoveItem(c) => journey.remove_item(&c.item, correlation_id, clock)?,
            JourneyCommand::CompleteTask(c) => {
                journey.complete_task(&c.task_id, correlation_id, clock);
            }
            JourneyCommand::AppendCollectedName(c) => {
                journey.append_collected_name(&c.name, correlation_id, clock)?;
            }
            JourneyCommand::NameEmotion(c) => journey.name_emotion(&c.name, correlation_id, clock)?,
            JourneyCommand::RepeatPrologue(_) => {
                journey.repeat_prologue(correlation_id, clock)?;
            }
            JourneyCommand::GrantExplicitUnlock(c) => {
                journey.grant_unlock(c.chapter, correlation_id, clock);
            }
            JourneyCommand::NavigateToChapter(c) => {
                journey.navigate_to_chapter(c.chapter, correlation_id, clock)?;
            }
            JourneyCommand::CompleteBeat(c) => journey.complete_beat(c, correlation_id, clock),
        }
        Ok(())
    }

    /// Applies every pending event, publishes the new snapshot and notifies
    /// observers. Does nothing when no event is pending.
    pub(crate) fn commit(&mut self) -> Vec<JourneyEvent> {
        let events = self.journey.uncommitted_events().to_vec();
        if events.is_empty() {
            return events;
        }
        for event in &events {
            self.journey.apply(event);
        }
        self.journey.clear_uncommitted_events();

        for event in &events {
            if let JourneyEventKind::ChapterReset(reset) = &event.kind {
                info!(
                    chapter = %reset.chapter,
                    from = %reset.from,
                    epoch = reset.epoch,
                    "chapter soft-reset"
                );
            }
        }

        let current = Arc::new(self.journey.state().clone());
        let previous = std::mem::replace(&mut self.snapshot, current);
        self.notify(&previous, &events);
        events
    }

    /// Discards the session and starts over on the initial phase with a new
    /// session id. Observers see the swap with no events.
    pub fn restart(&mut self) {
        let previous_id = self.journey.id;
        self.journey = Journey::new(Uuid::new_v4());
        let current = Arc::new(self.journey.state().clone());
        let previous = std::mem::replace(&mut self.snapshot, current);
        info!(
            previous_session_id = %previous_id,
            session_id = %self.journey.id,
            "journey restarted"
        );
        self.notify(&previous, &[]);
    }

    fn notify(&mut self, previous: &SessionState, events: &[JourneyEvent]) {
        let current = Arc::clone(&self.snapshot);
        for observer in &mut self.observers {
            observer.on_transition(previous, &current, events);
        }
    }
}

#[cfg(test)]
mod tests {
    use individuation_core::event::DomainEvent;
    use individuation_test_support::{FixedClock, RecordingObserver, fixed_now, init_test_tracing};

    use super::*;
    use crate::domain::chapter::Chapter;
    use crate::domain::commands::{CompleteBeat, Reward};
    use crate::domain::phase::Phase;
    use crate::domain::script::Milestone;

    fn store() -> JourneyStore {
        init_test_tracing();
        JourneyStore::new(Box::new(FixedClock::default()))
    }

    #[test]
    fn test_dispatch_advance_publishes_new_snapshot() {
        // Arrange
        let mut store = store();
        let before = store.state();

        // Act
        let events = store.dispatch(JourneyCommand::advance(Phase::Prologue)).unwrap();

        // Assert
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "narrative.phase_advanced");
        assert_eq!(events[0].metadata().occurred_at, fixed_now());
        assert_eq!(before.phase(), Phase::Title);
        assert_eq!(store.state().phase(), Phase::Prologue);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_replayed_reward_produces_no_events_and_no_notification() {
        // Arrange
        let mut store = store();
        let (observer, log) = RecordingObserver::with_log();
        store.subscribe(observer);
        let reward = Reward::new(["X"], Vec::<String>::new());
        store.dispatch(JourneyCommand::grant_reward(reward.clone())).unwrap();
        let snapshot = store.state();

        // Act
        let events = store.dispatch(JourneyCommand::grant_reward(reward)).unwrap();

        // Assert
        assert!(events.is_empty());
        assert_eq!(log.len(), 1);
        assert_eq!(store.version(), 1);
        assert!(Arc::ptr_eq(&snapshot, &store.state()));
    }

    #[test]
    fn test_refused_command_is_a_silent_no_op() {
        // Arrange
        let mut store = store();
        let (observer, log) = RecordingObserver::with_log();
        store.subscribe(observer);
        let snapshot = store.state();

        // Act
        let events = store
            .dispatch(JourneyCommand::navigate_to_chapter(Chapter::Chapter2))
            .unwrap();

        // Assert
        assert!(events.is_empty());
        assert!(Arc::ptr_eq(&snapshot, &store.state()));
        assert_eq!(store.version(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_bundled_beat_is_observed_as_one_transition() {
        // Arrange
        let mut store = store();
        store
            .dispatch(JourneyCommand::advance(Phase::Chapter2Quest))
            .unwrap();
        let (observer, log) = RecordingObserver::with_log();
        store.subscribe(observer);

        // Act
        store.dispatch(Milestone::InnerVoice.beat()).unwrap();

        // Assert
        let transitions = log.transitions();
        assert_eq!(transitions.len(), 1);
        let transition = &transitions[0];
        assert_eq!(transition.previous.phase(), Phase::Chapter2Quest);
        assert!(transition.previous.inventory().is_empty());
        assert_eq!(transition.current.phase(), Phase::AlchemyAltar);
        assert!(transition.current.holds("Soul Music"));
        assert!(transition.current.holds("Heraldic Seal"));
        assert!(transition.current.explicit_unlocks().contains(&Chapter::Altar));
        assert_eq!(transition.events.len(), 3);
    }

    #[test]
    fn test_snapshots_held_by_readers_never_change() {
        // Arrange
        let mut store = store();
        let held = store.state();

        // Act
        store
            .dispatch(CompleteBeat {
                reward: Reward::new(["mask"], ["quote"]),
                unlock: None,
                next: Phase::Chapter3Intro,
            })
            .unwrap();

        // Assert
        assert_eq!(held.phase(), Phase::Title);
        assert!(held.inventory().is_empty());
        assert!(store.state().holds("mask"));
    }

    #[test]
    fn test_restart_starts_new_session_and_notifies_with_no_events() {
        // Arrange
        let mut store = store();
        let (observer, log) = RecordingObserver::with_log();
        store.subscribe(observer);
        store.dispatch(Milestone::PrologueQuest.beat()).unwrap();
        let old_id = store.session_id();

        // Act
        store.restart();

        // Assert
        assert_ne!(store.session_id(), old_id);
        assert_eq!(store.version(), 0);
        assert_eq!(*store.state(), SessionState::new());
        let transitions = log.transitions();
        assert_eq!(transitions.len(), 2);
        assert!(transitions[1].events.is_empty());
        assert_eq!(transitions[1].previous.phase(), Phase::PrologueChoice);
    }

    #[test]
    fn test_events_carry_the_session_id_and_increasing_sequence_numbers() {
        // Arrange
        let session_id = Uuid::new_v4();
        let mut store = JourneyStore::with_id(session_id, Box::new(FixedClock::default()));

        // Act
        let first = store.dispatch(JourneyCommand::advance(Phase::Prologue)).unwrap();
        let second = store.dispatch(Milestone::PrologueQuest.beat()).unwrap();

        // Assert
        let sequence: Vec<i64> = first
            .iter()
            .chain(&second)
            .map(|e| e.metadata().sequence_number)
            .collect();
        assert_eq!(sequence, vec![1, 2, 3, 4]);
        assert!(
            first
                .iter()
                .chain(&second)
                .all(|e| e.metadata().aggregate_id == session_id)
        );
    }
}
