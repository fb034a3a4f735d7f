//! Session state: where the participant is and what they have accumulated.
//!
//! `SessionState` is readable by anyone and writable only from this crate.
//! Every mutation goes through [`Journey::apply`](super::aggregates::Journey),
//! so the invariants below hold for every snapshot a reader can observe:
//!
//! - `phase` is always a catalog phase (guaranteed by the `Phase` type);
//! - `collected_names` never holds more than [`COLLECTED_NAME_LIMIT`] entries;
//! - collections are sets, so duplicates are unrepresentable;
//! - reset tokens never decrease.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::chapter::Chapter;
use super::phase::Phase;

/// Maximum number of freeform names one chapter can collect.
pub const COLLECTED_NAME_LIMIT: usize = 3;

/// Lowest opacity the prologue recitation fades to.
const MIN_RECITATION_OPACITY: f32 = 0.3;

/// Opacity lost on each repeat of the prologue recitation.
const RECITATION_FADE_STEP: f32 = 0.15;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a reflective question, e.g. `chapter1-q3`.
    QuestionId
);
string_id!(
    /// Identifier of one option of a question.
    OptionId
);
string_id!(
    /// Identifier of a lore card.
    CardId
);
string_id!(
    /// Identifier of a mini-task, e.g. `chapter2-imprint`.
    TaskId
);

/// The mutable record of one participant's journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    phase: Phase,
    inventory: BTreeSet<String>,
    knowledge: BTreeSet<String>,
    knowledge_cards: BTreeSet<CardId>,
    answers: BTreeMap<QuestionId, OptionId>,
    task_completions: BTreeSet<TaskId>,
    collected_names: Vec<String>,
    emotion_name: Option<String>,
    prologue_loops: u32,
    explicit_unlocks: BTreeSet<Chapter>,
    reset_tokens: BTreeMap<Chapter, u32>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates the state every session starts from.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::INITIAL,
            inventory: BTreeSet::new(),
            knowledge: BTreeSet::new(),
            knowledge_cards: BTreeSet::new(),
            answers: BTreeMap::new(),
            task_completions: BTreeSet::new(),
            collected_names: Vec::new(),
            emotion_name: None,
            prologue_loops: 0,
            explicit_unlocks: BTreeSet::new(),
            reset_tokens: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Items the participant holds.
    #[must_use]
    pub fn inventory(&self) -> &BTreeSet<String> {
        &self.inventory
    }

    #[must_use]
    pub fn holds(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    /// Memorable lore lines granted at chapter boundaries.
    #[must_use]
    pub fn knowledge(&self) -> &BTreeSet<String> {
        &self.knowledge
    }

    #[must_use]
    pub fn knowledge_cards(&self) -> &BTreeSet<CardId> {
        &self.knowledge_cards
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, OptionId> {
        &self.answers
    }

    /// The option chosen for a question, if it has been answered.
    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&OptionId> {
        self.answers.get(&QuestionId::new(question_id))
    }

    #[must_use]
    pub fn task_completions(&self) -> &BTreeSet<TaskId> {
        &self.task_completions
    }

    #[must_use]
    pub fn is_task_complete(&self, task_id: &str) -> bool {
        self.task_completions.contains(&TaskId::new(task_id))
    }

    /// Names collected during the shadow encounter, in the order given.
    #[must_use]
    pub fn collected_names(&self) -> &[String] {
        &self.collected_names
    }

    /// The first collected name, which later chapters address the shadow by.
    #[must_use]
    pub fn primary_name(&self) -> Option<&str> {
        self.collected_names.first().map(String::as_str)
    }

    #[must_use]
    pub fn emotion_name(&self) -> Option<&str> {
        self.emotion_name.as_deref()
    }

    /// How many times the prologue recitation has been repeated.
    #[must_use]
    pub fn prologue_loops(&self) -> u32 {
        self.prologue_loops
    }

    /// Opacity of the prologue recitation text; it fades with each repeat.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn recitation_opacity(&self) -> f32 {
        (1.0 - RECITATION_FADE_STEP * self.prologue_loops as f32).max(MIN_RECITATION_OPACITY)
    }

    /// Chapters granted reachability regardless of position.
    #[must_use]
    pub fn explicit_unlocks(&self) -> &BTreeSet<Chapter> {
        &self.explicit_unlocks
    }

    /// The reset epoch of a chapter. Zero until its first soft reset.
    #[must_use]
    pub fn reset_token(&self, chapter: Chapter) -> u32 {
        self.reset_tokens.get(&chapter).copied().unwrap_or(0)
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn insert_items<'a>(&mut self, items: impl IntoIterator<Item = &'a String>) {
        self.inventory.extend(items.into_iter().cloned());
    }

    pub(crate) fn remove_item(&mut self, item: &str) {
        self.inventory.remove(item);
    }

    pub(crate) fn insert_knowledge<'a>(&mut self, lines: impl IntoIterator<Item = &'a String>) {
        self.knowledge.extend(lines.into_iter().cloned());
    }

    pub(crate) fn record_answer(&mut self, question_id: QuestionId, option_id: OptionId) {
        self.answers.insert(question_id, option_id);
    }

    pub(crate) fn insert_card(&mut self, card_id: CardId) {
        self.knowledge_cards.insert(card_id);
    }

    pub(crate) fn insert_task(&mut self, task_id: TaskId) {
        self.task_completions.insert(task_id);
    }

    /// Appends a collected name. Returns `false`, leaving state untouched,
    /// once the limit is reached.
    pub(crate) fn push_collected_name(&mut self, name: String) -> bool {
        if self.collected_names.len() >= COLLECTED_NAME_LIMIT {
            return false;
        }
        self.collected_names.push(name);
        true
    }

    pub(crate) fn set_emotion_name(&mut self, name: String) {
        self.emotion_name = Some(name);
    }

    pub(crate) fn set_prologue_loops(&mut self, loops: u32) {
        self.prologue_loops = loops;
    }

    pub(crate) fn insert_unlock(&mut self, chapter: Chapter) {
        self.explicit_unlocks.insert(chapter);
    }

    /// Restores a chapter's scoped data to its initial state and moves the
    /// participant to its entry phase.
    ///
    /// Inventory, knowledge, cards, explicit unlocks and every other
    /// chapter's answers survive.
    pub(crate) fn soft_reset(&mut self, chapter: Chapter, epoch: u32) {
        let descriptor = chapter.descriptor();
        self.phase = descriptor.entry_phase;
        self.answers
            .retain(|question, _| !descriptor.owns_answer(question.as_str()));
        self.task_completions
            .retain(|task| !descriptor.owns_task(task.as_str()));

        match chapter {
            Chapter::Prologue => self.prologue_loops = 0,
            Chapter::Chapter1 => {
                self.collected_names.clear();
                self.emotion_name = None;
            }
            Chapter::Title
            | Chapter::Chapter2
            | Chapter::Chapter3
            | Chapter::Altar
            | Chapter::Epilogue => {}
        }

        let token = self.reset_tokens.entry(chapter).or_insert(0);
        *token = (*token).max(epoch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered(pairs: &[(&str, &str)]) -> SessionState {
        let mut state = SessionState::new();
        for (question, option) in pairs {
            state.record_answer(QuestionId::new(*question), OptionId::new(*option));
        }
        state
    }

    #[test]
    fn test_new_session_starts_on_title_with_empty_collections() {
        let state = SessionState::new();

        assert_eq!(state.phase(), Phase::Title);
        assert!(state.inventory().is_empty());
        assert!(state.knowledge().is_empty());
        assert!(state.knowledge_cards().is_empty());
        assert!(state.answers().is_empty());
        assert!(state.collected_names().is_empty());
        assert!(state.explicit_unlocks().is_empty());
        for chapter in Chapter::ALL {
            assert_eq!(state.reset_token(chapter), 0);
        }
    }

    #[test]
    fn test_collected_names_stop_at_the_limit() {
        // Arrange
        let mut state = SessionState::new();

        // Act
        let accepted: Vec<bool> = ["rage", "envy", "fear", "greed"]
            .into_iter()
            .map(|name| state.push_collected_name(name.to_owned()))
            .collect();

        // Assert
        assert_eq!(accepted, vec![true, true, true, false]);
        assert_eq!(state.collected_names(), ["rage", "envy", "fear"]);
        assert_eq!(state.primary_name(), Some("rage"));
    }

    #[test]
    fn test_inserting_an_item_twice_keeps_one_copy() {
        let mut state = SessionState::new();
        let mask = "Persona Mask".to_owned();

        state.insert_items([&mask]);
        state.insert_items([&mask]);

        assert_eq!(state.inventory().len(), 1);
        assert!(state.holds("Persona Mask"));
    }

    #[test]
    fn test_soft_reset_discards_only_the_chapters_answers() {
        // Arrange
        let mut state = answered(&[
            ("chapter1-q1", "a"),
            ("chapter2-q1", "b"),
            ("listening-q1", "c"),
            ("prologue-q1", "a"),
        ]);
        state.insert_task(TaskId::new("chapter2-imprint"));
        state.insert_task(TaskId::new("chapter1-naming"));
        state.insert_task(TaskId::new("listening-compose"));

        // Act
        state.soft_reset(Chapter::Chapter2, 1);

        // Assert
        assert_eq!(state.phase(), Phase::Chapter2Intro);
        assert!(state.answer("chapter2-q1").is_none());
        assert!(state.answer("listening-q1").is_none());
        assert_eq!(state.answer("chapter1-q1"), Some(&OptionId::new("a")));
        assert_eq!(state.answer("prologue-q1"), Some(&OptionId::new("a")));
        assert!(!state.is_task_complete("chapter2-imprint"));
        assert!(state.is_task_complete("chapter1-naming"));
        assert!(state.is_task_complete("listening-compose"));
        assert_eq!(state.reset_token(Chapter::Chapter2), 1);
    }

    #[test]
    fn test_soft_reset_of_chapter1_clears_names() {
        let mut state = SessionState::new();
        state.push_collected_name("rage".to_owned());
        state.set_emotion_name("sorrow".to_owned());

        state.soft_reset(Chapter::Chapter1, 1);

        assert!(state.collected_names().is_empty());
        assert_eq!(state.emotion_name(), None);
        assert_eq!(state.primary_name(), None);
    }

    #[test]
    fn test_soft_reset_of_prologue_restores_recitation() {
        let mut state = SessionState::new();
        state.set_prologue_loops(3);

        state.soft_reset(Chapter::Prologue, 1);

        assert_eq!(state.prologue_loops(), 0);
        assert!((state.recitation_opacity() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reset_token_never_decreases() {
        let mut state = SessionState::new();

        state.soft_reset(Chapter::Chapter3, 4);
        state.soft_reset(Chapter::Chapter3, 2);

        assert_eq!(state.reset_token(Chapter::Chapter3), 4);
    }

    #[test]
    fn test_recitation_fades_to_a_floor() {
        let mut state = SessionState::new();

        state.set_prologue_loops(2);
        assert!((state.recitation_opacity() - 0.7).abs() < 1e-5);

        state.set_prologue_loops(10);
        assert!((state.recitation_opacity() - 0.3).abs() < 1e-5);
    }
}
