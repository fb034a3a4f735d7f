//! Aggregate roots for the Narrative Progression context.

use individuation_core::aggregate::AggregateRoot;
use individuation_core::clock::Clock;
use individuation_core::error::DomainError;
use individuation_core::event::EventMetadata;
use uuid::Uuid;

use super::chapter::Chapter;
use super::commands::{CompleteBeat, RecordAnswer, Reward};
use super::errors::Rejection;
use super::events::{
    AnswerRecorded, ChapterReset, ChapterUnlockGranted, CollectedNameAppended, EmotionNamed,
    ItemRemoved, JourneyEvent, JourneyEventKind, PhaseAdvanced, PrologueRepeated, RewardGranted,
    TaskCompleted,
};
use super::phase::Phase;
use super::predicates::is_unlocked;
use super::session::{COLLECTED_NAME_LIMIT, SessionState, TaskId};

/// The aggregate root for one participant's journey.
///
/// Command methods decide against the last applied state and push events;
/// they never touch the state themselves. Only [`AggregateRoot::apply`]
/// mutates it, one event at a time.
#[derive(Debug)]
pub struct Journey {
    /// Aggregate identifier; doubles as the session id.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    state: SessionState,
    /// Events decided but not yet applied.
    uncommitted_events: Vec<JourneyEvent>,
}

impl Journey {
    /// Creates a journey on the initial phase.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            state: SessionState::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// The last applied session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: JourneyEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = JourneyEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Moves the participant to `to`, producing a `PhaseAdvanced` event unless
    /// they already stand there.
    pub fn advance(&mut self, to: Phase, correlation_id: Uuid, clock: &dyn Clock) {
        let from = self.state.phase();
        if from == to {
            return;
        }
        self.record(
            JourneyEventKind::PhaseAdvanced(PhaseAdvanced { from, to }),
            correlation_id,
            clock,
        );
    }

    /// Records an answer (last write wins) and unlocks its card, if any.
    pub fn record_answer(
        &mut self,
        command: &RecordAnswer,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let same_answer =
            self.state.answers().get(&command.question_id) == Some(&command.option_id);
        let new_card = command
            .card_id
            .as_ref()
            .filter(|card| !self.state.knowledge_cards().contains(*card))
            .cloned();
        if same_answer && new_card.is_none() {
            return;
        }
        self.record(
            JourneyEventKind::AnswerRecorded(AnswerRecorded {
                question_id: command.question_id.clone(),
                option_id: command.option_id.clone(),
                card_id: new_card,
            }),
            correlation_id,
            clock,
        );
    }

    /// Grants whatever part of `reward` the participant does not have yet.
    pub fn grant_reward(&mut self, reward: &Reward, correlation_id: Uuid, clock: &dyn Clock) {
        let mut items: Vec<String> = Vec::new();
        for item in &reward.items {
            if !self.state.holds(item) && !items.contains(item) {
                items.push(item.clone());
            }
        }
        let mut lore: Vec<String> = Vec::new();
        for line in &reward.lore {
            if !self.state.knowledge().contains(line) && !lore.contains(line) {
                lore.push(line.clone());
            }
        }
        if items.is_empty() && lore.is_empty() {
            return;
        }
        self.record(
            JourneyEventKind::RewardGranted(RewardGranted { items, lore }),
            correlation_id,
            clock,
        );
    }

    /// Removes a held item, producing an `ItemRemoved` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the item is not held.
    pub fn remove_item(
        &mut self,
        item: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if !self.state.holds(item) {
            return Err(Rejection::ItemNotHeld(item.to_owned()).into());
        }
        self.record(
            JourneyEventKind::ItemRemoved(ItemRemoved {
                item: item.to_owned(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Marks a task as done the first time it is reported.
    pub fn complete_task(&mut self, task_id: &TaskId, correlation_id: Uuid, clock: &dyn Clock) {
        if self.state.task_completions().contains(task_id) {
            return;
        }
        self.record(
            JourneyEventKind::TaskCompleted(TaskCompleted {
                task_id: task_id.clone(),
            }),
            correlation_id,
            clock,
        );
    }

    /// Appends a trimmed freeform name to the collected list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the name is blank or the list is
    /// already full.
    pub fn append_collected_name(
        &mut self,
        name: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::BlankName.into());
        }
        let index = self.state.collected_names().len();
        if index >= COLLECTED_NAME_LIMIT {
            return Err(Rejection::CollectedNamesFull.into());
        }
        self.record(
            JourneyEventKind::CollectedNameAppended(CollectedNameAppended {
                name: name.to_owned(),
                index,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Records the participant's emotional response to their shadow.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the name is blank.
    pub fn name_emotion(
        &mut self,
        name: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::BlankName.into());
        }
        if self.state.emotion_name() == Some(name) {
            return Ok(());
        }
        self.record(
            JourneyEventKind::EmotionNamed(EmotionNamed {
                name: name.to_owned(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Repeats the prologue recitation, fading its text a little further.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the participant is not in the
    /// prologue.
    pub fn repeat_prologue(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let phase = self.state.phase();
        if phase.chapter() != Chapter::Prologue {
            return Err(Rejection::OutsidePrologue(phase).into());
        }
        let loops = self.state.prologue_loops().saturating_add(1);
        self.record(
            JourneyEventKind::PrologueRepeated(PrologueRepeated { loops }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Grants a chapter reachability regardless of position.
    pub fn grant_unlock(&mut self, chapter: Chapter, correlation_id: Uuid, clock: &dyn Clock) {
        if self.state.explicit_unlocks().contains(&chapter) {
            return;
        }
        self.record(
            JourneyEventKind::ChapterUnlockGranted(ChapterUnlockGranted { chapter }),
            correlation_id,
            clock,
        );
    }

    /// Jumps to an unlocked chapter's entry phase and soft-resets it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the chapter is not navigable or is
    /// still locked.
    pub fn navigate_to_chapter(
        &mut self,
        chapter: Chapter,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if !chapter.descriptor().is_navigable() {
            return Err(Rejection::NotNavigable(chapter).into());
        }
        if !is_unlocked(chapter, &self.state) {
            return Err(Rejection::ChapterLocked(chapter).into());
        }
        let epoch = self.state.reset_token(chapter).saturating_add(1);
        self.record(
            JourneyEventKind::ChapterReset(ChapterReset {
                chapter,
                from: self.state.phase(),
                epoch,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Completes a beat: reward, optional grant and advance, decided together
    /// so that they are applied together.
    pub fn complete_beat(&mut self, beat: &CompleteBeat, correlation_id: Uuid, clock: &dyn Clock) {
        self.grant_reward(&beat.reward, correlation_id, clock);
        if let Some(chapter) = beat.unlock {
            self.grant_unlock(chapter, correlation_id, clock);
        }
        self.advance(beat.next, correlation_id, clock);
    }
}

impl AggregateRoot for Journey {
    type Event = JourneyEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            JourneyEventKind::PhaseAdvanced(payload) => {
                self.state.set_phase(payload.to);
            }
            JourneyEventKind::AnswerRecorded(payload) => {
                self.state
                    .record_answer(payload.question_id.clone(), payload.option_id.clone());
                if let Some(card_id) = &payload.card_id {
                    self.state.insert_card(card_id.clone());
                }
            }
            JourneyEventKind::RewardGranted(payload) => {
                self.state.insert_items(&payload.items);
                self.state.insert_knowledge(&payload.lore);
            }
            JourneyEventKind::ItemRemoved(payload) => {
                self.state.remove_item(&payload.item);
            }
            JourneyEventKind::TaskCompleted(payload) => {
                self.state.insert_task(payload.task_id.clone());
            }
            JourneyEventKind::CollectedNameAppended(payload) => {
                self.state.push_collected_name(payload.name.clone());
            }
            JourneyEventKind::EmotionNamed(payload) => {
                self.state.set_emotion_name(payload.name.clone());
            }
            JourneyEventKind::PrologueRepeated(payload) => {
                self.state.set_prologue_loops(payload.loops);
                self.state.set_phase(Phase::Prologue);
            }
            JourneyEventKind::ChapterUnlockGranted(payload) => {
                self.state.insert_unlock(payload.chapter);
            }
            JourneyEventKind::ChapterReset(payload) => {
                self.state.soft_reset(payload.chapter, payload.epoch);
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
