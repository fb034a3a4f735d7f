//! Domain events for the Narrative Progression context.
//!
//! Events record effective changes only. A command whose effect is already
//! present in the session produces no event at all.

use individuation_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::chapter::Chapter;
use super::phase::Phase;
use super::session::{CardId, OptionId, QuestionId, TaskId};

/// Emitted when the participant moves to another phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAdvanced {
    /// Phase left behind.
    pub from: Phase,
    /// Phase moved to.
    pub to: Phase,
}

/// Emitted when an answer is recorded or changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecorded {
    /// Question answered.
    pub question_id: QuestionId,
    /// Option chosen.
    pub option_id: OptionId,
    /// Set only when the card was not unlocked before.
    pub card_id: Option<CardId>,
}

/// Emitted when a reward adds something new.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardGranted {
    /// Items the participant did not hold before.
    pub items: Vec<String>,
    /// Lore lines the participant did not know before.
    pub lore: Vec<String>,
}

/// Emitted when a held item leaves the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    /// Item taken out of the inventory.
    pub item: String,
}

/// Emitted when a mini-task is completed for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompleted {
    /// Task completed.
    pub task_id: TaskId,
}

/// Emitted when a freeform name is collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedNameAppended {
    /// Trimmed name.
    pub name: String,
    /// Position of the name in the collected list.
    pub index: usize,
}

/// Emitted when the participant names their emotional response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionNamed {
    /// Trimmed name of the emotion.
    pub name: String,
}

/// Emitted when the prologue recitation is repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrologueRepeated {
    /// Loop count after the repeat.
    pub loops: u32,
}

/// Emitted when a chapter is granted reachability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterUnlockGranted {
    /// Chapter granted.
    pub chapter: Chapter,
}

/// Emitted when a chapter is soft-reset by navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterReset {
    /// Chapter reset.
    pub chapter: Chapter,
    /// Phase the participant stood on before the jump.
    pub from: Phase,
    /// The chapter's new reset epoch.
    pub epoch: u32,
}

/// Event type identifier for [`PhaseAdvanced`].
pub const PHASE_ADVANCED_EVENT_TYPE: &str = "narrative.phase_advanced";

/// Event type identifier for [`AnswerRecorded`].
pub const ANSWER_RECORDED_EVENT_TYPE: &str = "narrative.answer_recorded";

/// Event type identifier for [`RewardGranted`].
pub const REWARD_GRANTED_EVENT_TYPE: &str = "narrative.reward_granted";

/// Event type identifier for [`ItemRemoved`].
pub const ITEM_REMOVED_EVENT_TYPE: &str = "narrative.item_removed";

/// Event type identifier for [`TaskCompleted`].
pub const TASK_COMPLETED_EVENT_TYPE: &str = "narrative.task_completed";

/// Event type identifier for [`CollectedNameAppended`].
pub const COLLECTED_NAME_APPENDED_EVENT_TYPE: &str = "narrative.collected_name_appended";

/// Event type identifier for [`EmotionNamed`].
pub const EMOTION_NAMED_EVENT_TYPE: &str = "narrative.emotion_named";

/// Event type identifier for [`PrologueRepeated`].
pub const PROLOGUE_REPEATED_EVENT_TYPE: &str = "narrative.prologue_repeated";

/// Event type identifier for [`ChapterUnlockGranted`].
pub const CHAPTER_UNLOCK_GRANTED_EVENT_TYPE: &str = "narrative.chapter_unlock_granted";

/// Event type identifier for [`ChapterReset`].
pub const CHAPTER_RESET_EVENT_TYPE: &str = "narrative.chapter_reset";

/// Event payload variants for the Narrative Progression context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JourneyEventKind {
    PhaseAdvanced(PhaseAdvanced),
    AnswerRecorded(AnswerRecorded),
    RewardGranted(RewardGranted),
    ItemRemoved(ItemRemoved),
    TaskCompleted(TaskCompleted),
    CollectedNameAppended(CollectedNameAppended),
    EmotionNamed(EmotionNamed),
    PrologueRepeated(PrologueRepeated),
    ChapterUnlockGranted(ChapterUnlockGranted),
    ChapterReset(ChapterReset),
}

impl JourneyEventKind {
    /// The event type identifier of this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::PhaseAdvanced(_) => PHASE_ADVANCED_EVENT_TYPE,
            Self::AnswerRecorded(_) => ANSWER_RECORDED_EVENT_TYPE,
            Self::RewardGranted(_) => REWARD_GRANTED_EVENT_TYPE,
            Self::ItemRemoved(_) => ITEM_REMOVED_EVENT_TYPE,
            Self::TaskCompleted(_) => TASK_COMPLETED_EVENT_TYPE,
            Self::CollectedNameAppended(_) => COLLECTED_NAME_APPENDED_EVENT_TYPE,
            Self::EmotionNamed(_) => EMOTION_NAMED_EVENT_TYPE,
            Self::PrologueRepeated(_) => PROLOGUE_REPEATED_EVENT_TYPE,
            Self::ChapterUnlockGranted(_) => CHAPTER_UNLOCK_GRANTED_EVENT_TYPE,
            Self::ChapterReset(_) => CHAPTER_RESET_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Narrative Progression context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: JourneyEventKind,
}

impl DomainEvent for JourneyEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("JourneyEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
