//! Commands for the Narrative Progression context.
//!
//! Presentation code never mutates session state; it dispatches one of these
//! to the [`JourneyStore`](crate::application::command_handlers::JourneyStore).

use individuation_core::command::Command;

use super::chapter::Chapter;
use super::phase::Phase;
use super::session::{CardId, OptionId, QuestionId, TaskId};

/// Items and lore lines granted together at a chapter boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reward {
    /// Item names added to the inventory.
    pub items: Vec<String>,
    /// Lore lines added to the participant's knowledge.
    pub lore: Vec<String>,
}

impl Reward {
    /// Builds a reward from item names and lore lines.
    #[must_use]
    pub fn new<I, L>(items: I, lore: L) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            lore: lore.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.lore.is_empty()
    }
}

/// Command to move the participant to a phase.
///
/// An unconditional set: a delayed advance that arrives after a navigation
/// still wins, because the last event wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// The phase to move to.
    pub to: Phase,
}

/// Command to record the option chosen for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAnswer {
    /// Question answered.
    pub question_id: QuestionId,
    /// Option chosen.
    pub option_id: OptionId,
    /// Lore card unlocked by this answer, if any.
    pub card_id: Option<CardId>,
}

/// Command to grant a reward without moving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantReward {
    /// Reward to grant.
    pub reward: Reward,
}

/// Command to remove a held item, e.g. when it is placed on the altar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveItem {
    /// Item to remove.
    pub item: String,
}

/// Command to mark a mini-task as done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTask {
    /// Task to mark as done.
    pub task_id: TaskId,
}

/// Command to append a freeform name during the shadow encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendCollectedName {
    /// Name as typed; trimmed before it is stored.
    pub name: String,
}

/// Command to record the participant's emotional response to the shadow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEmotion {
    /// Name as typed; trimmed before it is stored.
    pub name: String,
}

/// Command to repeat the prologue recitation instead of moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatPrologue;

/// Command to grant a chapter reachability regardless of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantExplicitUnlock {
    /// Chapter to grant.
    pub chapter: Chapter,
}

/// Command to jump back (or forward) to an unlocked chapter, soft-resetting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateToChapter {
    /// Chapter to jump to.
    pub chapter: Chapter,
}

/// Command to finish a beat: grant a reward, optionally grant an unlock, and
/// move on, as one atomic transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteBeat {
    /// Reward granted at the end of the beat.
    pub reward: Reward,
    /// Chapter granted at the end of the beat, if any.
    pub unlock: Option<Chapter>,
    /// Phase the beat leads to.
    pub next: Phase,
}

/// Every command the journey accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyCommand {
    Advance(Advance),
    RecordAnswer(RecordAnswer),
    GrantReward(GrantReward),
    RemoveItem(RemoveItem),
    CompleteTask(CompleteTask),
    AppendCollectedName(AppendCollectedName),
    NameEmotion(NameEmotion),
    RepeatPrologue(RepeatPrologue),
    GrantExplicitUnlock(GrantExplicitUnlock),
    NavigateToChapter(NavigateToChapter),
    CompleteBeat(CompleteBeat),
}

impl JourneyCommand {
    /// Shorthand for [`Advance`].
    #[must_use]
    pub fn advance(to: Phase) -> Self {
        Self::Advance(Advance { to })
    }

    /// Shorthand for [`RecordAnswer`] without a card.
    #[must_use]
    pub fn record_answer(question_id: &str, option_id: &str) -> Self {
        Self::RecordAnswer(RecordAnswer {
            question_id: QuestionId::new(question_id),
            option_id: OptionId::new(option_id),
            card_id: None,
        })
    }

    /// Shorthand for [`RecordAnswer`] that also unlocks a lore card.
    #[must_use]
    pub fn record_answer_with_card(question_id: &str, option_id: &str, card_id: &str) -> Self {
        Self::RecordAnswer(RecordAnswer {
            question_id: QuestionId::new(question_id),
            option_id: OptionId::new(option_id),
            card_id: Some(CardId::new(card_id)),
        })
    }

    /// Shorthand for [`GrantReward`].
    #[must_use]
    pub fn grant_reward(reward: Reward) -> Self {
        Self::GrantReward(GrantReward { reward })
    }

    /// Shorthand for [`AppendCollectedName`].
    #[must_use]
    pub fn append_collected_name(name: impl Into<String>) -> Self {
        Self::AppendCollectedName(AppendCollectedName { name: name.into() })
    }

    /// Shorthand for [`NavigateToChapter`].
    #[must_use]
    pub fn navigate_to_chapter(chapter: Chapter) -> Self {
        Self::NavigateToChapter(NavigateToChapter { chapter })
    }

    /// Shorthand for [`GrantExplicitUnlock`].
    #[must_use]
    pub fn grant_explicit_unlock(chapter: Chapter) -> Self {
        Self::GrantExplicitUnlock(GrantExplicitUnlock { chapter })
    }
}

impl Command for JourneyCommand {
    fn command_type(&self) -> &'static str {
        match self {
            Self::Advance(_) => "narrative.advance",
            Self::RecordAnswer(_) => "narrative.record_answer",
            Self::GrantReward(_) => "narrative.grant_reward",
            Self::RemoveItem(_) => "narrative.remove_item",
            Self::CompleteTask(_) => "narrative.complete_task",
            Self::AppendCollectedName(_) => "narrative.append_collected_name",
            Self::NameEmotion(_) => "narrative.name_emotion",
            Self::RepeatPrologue(_) => "narrative.repeat_prologue",
            Self::GrantExplicitUnlock(_) => "narrative.grant_explicit_unlock",
            Self::NavigateToChapter(_) => "narrative.navigate_to_chapter",
            Self::CompleteBeat(_) => "narrative.complete_beat",
        }
    }
}

macro_rules! into_journey_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for JourneyCommand {
                fn from(command: $variant) -> Self {
                    Self::$variant(command)
                }
            }
        )*
    };
}

into_journey_command!(
    Advance,
    RecordAnswer,
    GrantReward,
    RemoveItem,
    CompleteTask,
    AppendCollectedName,
    NameEmotion,
    RepeatPrologue,
    GrantExplicitUnlock,
    NavigateToChapter,
    CompleteBeat,
);
