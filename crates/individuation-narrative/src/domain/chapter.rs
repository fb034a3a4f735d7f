//! Chapter descriptors.
//!
//! A chapter's internal identifier is stable and deliberately independent of
//! where the chapter is shown in the navigation list: `Chapter3` is told
//! first, so it is displayed as "Chapter One". Only [`ChapterDescriptor::display_rank`]
//! and the display strings carry presentation order.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::phase::Phase;

/// Internal chapter identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chapter {
    /// Front matter holding the title phase. Never offered for navigation.
    Title,
    Prologue,
    /// The shadow encounter.
    Chapter1,
    /// The inner voice.
    Chapter2,
    /// The sea of imagery.
    Chapter3,
    /// The alchemy altar and individuation.
    Altar,
    Epilogue,
}

/// How a chapter's completion phase is compared against the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    /// Complete once the participant has moved past the completion phase.
    StrictlyAfter,
    /// Complete as soon as the participant rests on the completion phase.
    AtOrAfter,
}

impl CompletionRule {
    /// Applies the rule to a current phase and a completion phase.
    #[must_use]
    pub const fn is_satisfied(self, current: Phase, completion: Phase) -> bool {
        match self {
            Self::StrictlyAfter => current.position() > completion.position(),
            Self::AtOrAfter => current.position() >= completion.position(),
        }
    }
}

/// Static description of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterDescriptor {
    /// Internal chapter identifier.
    pub id: Chapter,
    /// Title shown in the navigation list.
    pub display_title: &'static str,
    /// Subtitle shown under the title.
    pub display_subtitle: &'static str,
    /// Position in the navigation list. `None` for chapters that are never
    /// offered there.
    pub display_rank: Option<u8>,
    /// Phase a navigation to this chapter lands on.
    pub entry_phase: Phase,
    /// Phase the completion rule is measured against.
    pub completion_phase: Phase,
    /// Comparator applied to the completion phase.
    pub completion_rule: CompletionRule,
    /// Phase whose position unlocks this chapter without an explicit grant.
    /// `None` for chapters that are always unlocked.
    pub unlock_phase: Option<Phase>,
    /// Key prefixes of the answers a soft reset of this chapter discards.
    pub answer_prefixes: &'static [&'static str],
    /// Key prefixes of the task completions a soft reset of this chapter
    /// discards.
    pub task_prefixes: &'static [&'static str],
}

impl ChapterDescriptor {
    /// Whether the chapter picker offers this chapter.
    #[must_use]
    pub const fn is_navigable(&self) -> bool {
        self.display_rank.is_some()
    }

    /// Whether a question key is scoped to this chapter.
    #[must_use]
    pub fn owns_answer(&self, question: &str) -> bool {
        self.answer_prefixes
            .iter()
            .any(|prefix| question.starts_with(prefix))
    }

    /// Whether a task key is scoped to this chapter.
    #[must_use]
    pub fn owns_task(&self, task: &str) -> bool {
        self.task_prefixes
            .iter()
            .any(|prefix| task.starts_with(prefix))
    }
}

/// Chapter descriptors in narrative order.
pub static CHAPTERS: [ChapterDescriptor; 7] = [
    ChapterDescriptor {
        id: Chapter::Title,
        display_title: "Title",
        display_subtitle: "",
        display_rank: None,
        entry_phase: Phase::Title,
        completion_phase: Phase::Title,
        completion_rule: CompletionRule::StrictlyAfter,
        unlock_phase: None,
        answer_prefixes: &[],
        task_prefixes: &[],
    },
    ChapterDescriptor {
        id: Chapter::Prologue,
        display_title: "Prologue",
        display_subtitle: "The Persona",
        display_rank: Some(0),
        entry_phase: Phase::Prologue,
        completion_phase: Phase::PrologueChoice,
        completion_rule: CompletionRule::StrictlyAfter,
        unlock_phase: None,
        answer_prefixes: &["prologue-"],
        task_prefixes: &["prologue-"],
    },
    ChapterDescriptor {
        id: Chapter::Chapter3,
        display_title: "Chapter One",
        display_subtitle: "Sea of Imagery",
        display_rank: Some(1),
        entry_phase: Phase::Chapter3Intro,
        completion_phase: Phase::Chapter3Choice,
        completion_rule: CompletionRule::StrictlyAfter,
        unlock_phase: Some(Phase::PrologueChoice),
        answer_prefixes: &["chapter3-"],
        task_prefixes: &["chapter3-"],
    },
    ChapterDescriptor {
        id: Chapter::Chapter1,
        display_title: "Chapter Two",
        display_subtitle: "Meeting the Shadow",
        display_rank: Some(2),
        entry_phase: Phase::Chapter1Intro,
        completion_phase: Phase::Chapter1Choice,
        completion_rule: CompletionRule::StrictlyAfter,
        unlock_phase: Some(Phase::Chapter3Choice),
        answer_prefixes: &["chapter1-"],
        task_prefixes: &["chapter1-"],
    },
    ChapterDescriptor {
        id: Chapter::Chapter2,
        display_title: "Chapter Three",
        display_subtitle: "The Inner Voice",
        display_rank: Some(3),
        entry_phase: Phase::Chapter2Intro,
        completion_phase: Phase::Chapter2Choice,
        completion_rule: CompletionRule::StrictlyAfter,
        unlock_phase: Some(Phase::Chapter1Choice),
        answer_prefixes: &["chapter2-", "listening-", "understanding-"],
        task_prefixes: &["chapter2-"],
    },
    // The penultimate chapter: resting on the epilogue already counts.
    ChapterDescriptor {
        id: Chapter::Altar,
        display_title: "Chapter Four",
        display_subtitle: "Individuation",
        display_rank: Some(4),
        entry_phase: Phase::AlchemyAltar,
        completion_phase: Phase::Epilogue,
        completion_rule: CompletionRule::AtOrAfter,
        unlock_phase: Some(Phase::Chapter2Choice),
        answer_prefixes: &[],
        task_prefixes: &[],
    },
    ChapterDescriptor {
        id: Chapter::Epilogue,
        display_title: "Finale",
        display_subtitle: "Mandala",
        display_rank: Some(5),
        entry_phase: Phase::Epilogue,
        completion_phase: Phase::Epilogue,
        completion_rule: CompletionRule::StrictlyAfter,
        unlock_phase: Some(Phase::Chapter4Individuation),
        answer_prefixes: &[],
        task_prefixes: &[],
    },
];

impl Chapter {
    /// Every chapter, in narrative order.
    pub const ALL: [Self; 7] = [
        Self::Title,
        Self::Prologue,
        Self::Chapter3,
        Self::Chapter1,
        Self::Chapter2,
        Self::Altar,
        Self::Epilogue,
    ];

    /// Index of this chapter in narrative order.
    const fn narrative_index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Prologue => 1,
            Self::Chapter3 => 2,
            Self::Chapter1 => 3,
            Self::Chapter2 => 4,
            Self::Altar => 5,
            Self::Epilogue => 6,
        }
    }

    /// The static descriptor of this chapter.
    #[must_use]
    pub fn descriptor(self) -> &'static ChapterDescriptor {
        &CHAPTERS[self.narrative_index()]
    }

    /// The chapter told immediately before this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self.narrative_index() {
            0 => None,
            index => Some(Self::ALL[index - 1]),
        }
    }

    /// The stable string identifier of this chapter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Prologue => "prologue",
            Self::Chapter1 => "chapter1",
            Self::Chapter2 => "chapter2",
            Self::Chapter3 => "chapter3",
            Self::Altar => "altar",
            Self::Epilogue => "epilogue",
        }
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
