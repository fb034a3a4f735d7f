//! The closed set of narrative phases and the single total order over them.
//!
//! `Phase` is declared in narrative order, so a phase's position in the
//! order is its discriminant. [`PHASE_ORDER`] lists the same variants and is
//! the one table that answers "is phase A before phase B".

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chapter::Chapter;

/// An addressable narrative beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Title,

    Prologue,
    PrologueMasksShow,
    PrologueQuestions,
    PrologueQuest,
    PrologueChoice,

    Chapter3Intro,
    Chapter3ImagerySea,
    Chapter3ResonanceQ,
    Chapter3OppositeQ,
    Chapter3TranscendenceQ,
    Chapter3SymbolTriangle,
    Chapter3RootQ,
    Chapter3ChallengeQ,
    Chapter3IntegrationQ,
    Chapter3ImageryMap,
    Chapter3Choice,

    Chapter1Intro,
    #[serde(rename = "chapter1-shadow-naming-1")]
    Chapter1ShadowNaming1,
    #[serde(rename = "chapter1-shadow-naming-2")]
    Chapter1ShadowNaming2,
    #[serde(rename = "chapter1-shadow-naming-3")]
    Chapter1ShadowNaming3,
    Chapter1ShadowQuestions,
    Chapter1EmotionNaming,
    Chapter1EmotionQuestions,
    Chapter1Integration,
    Chapter1Choice,

    Chapter2Intro,
    Chapter2Listening,
    #[serde(rename = "chapter2-listening-q1")]
    Chapter2ListeningQ1,
    #[serde(rename = "chapter2-listening-q2")]
    Chapter2ListeningQ2,
    #[serde(rename = "chapter2-listening-q3")]
    Chapter2ListeningQ3,
    Chapter2EchoPoem,
    #[serde(rename = "chapter2-understanding-q1")]
    Chapter2UnderstandingQ1,
    #[serde(rename = "chapter2-understanding-q2")]
    Chapter2UnderstandingQ2,
    #[serde(rename = "chapter2-understanding-q3")]
    Chapter2UnderstandingQ3,
    Chapter2Imprint,
    #[serde(rename = "chapter2-questions-1")]
    Chapter2Questions1,
    #[serde(rename = "chapter2-task-1")]
    Chapter2Task1,
    #[serde(rename = "chapter2-questions-2")]
    Chapter2Questions2,
    Chapter2Quest,
    Chapter2Choice,

    AlchemyAltar,
    Chapter4Individuation,

    Epilogue,
}

/// Every phase, in narrative order.
pub const PHASE_ORDER: [Phase; 44] = [
    Phase::Title,
    Phase::Prologue,
    Phase::PrologueMasksShow,
    Phase::PrologueQuestions,
    Phase::PrologueQuest,
    Phase::PrologueChoice,
    Phase::Chapter3Intro,
    Phase::Chapter3ImagerySea,
    Phase::Chapter3ResonanceQ,
    Phase::Chapter3OppositeQ,
    Phase::Chapter3TranscendenceQ,
    Phase::Chapter3SymbolTriangle,
    Phase::Chapter3RootQ,
    Phase::Chapter3ChallengeQ,
    Phase::Chapter3IntegrationQ,
    Phase::Chapter3ImageryMap,
    Phase::Chapter3Choice,
    Phase::Chapter1Intro,
    Phase::Chapter1ShadowNaming1,
    Phase::Chapter1ShadowNaming2,
    Phase::Chapter1ShadowNaming3,
    Phase::Chapter1ShadowQuestions,
    Phase::Chapter1EmotionNaming,
    Phase::Chapter1EmotionQuestions,
    Phase::Chapter1Integration,
    Phase::Chapter1Choice,
    Phase::Chapter2Intro,
    Phase::Chapter2Listening,
    Phase::Chapter2ListeningQ1,
    Phase::Chapter2ListeningQ2,
    Phase::Chapter2ListeningQ3,
    Phase::Chapter2EchoPoem,
    Phase::Chapter2UnderstandingQ1,
    Phase::Chapter2UnderstandingQ2,
    Phase::Chapter2UnderstandingQ3,
    Phase::Chapter2Imprint,
    Phase::Chapter2Questions1,
    Phase::Chapter2Task1,
    Phase::Chapter2Questions2,
    Phase::Chapter2Quest,
    Phase::Chapter2Choice,
    Phase::AlchemyAltar,
    Phase::Chapter4Individuation,
    Phase::Epilogue,
];

impl Phase {
    /// The phase every session starts on.
    pub const INITIAL: Self = Self::Title;

    /// The terminal phase; no authored transition leaves it.
    pub const TERMINAL: Self = Self::Epilogue;

    /// Position of this phase in [`PHASE_ORDER`].
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// The phase immediately after this one in narrative order, if any.
    ///
    /// This is the order successor, not an authored flow edge: scenes may
    /// branch or loop, and `advance` accepts any target.
    #[must_use]
    pub fn next_in_order(self) -> Option<Self> {
        PHASE_ORDER.get(self.position() + 1).copied()
    }

    /// The chapter this phase belongs to.
    #[must_use]
    pub const fn chapter(self) -> Chapter {
        match self {
            Self::Title => Chapter::Title,
            Self::Prologue
            | Self::PrologueMasksShow
            | Self::PrologueQuestions
            | Self::PrologueQuest
            | Self::PrologueChoice => Chapter::Prologue,
            Self::Chapter3Intro
            | Self::Chapter3ImagerySea
            | Self::Chapter3ResonanceQ
            | Self::Chapter3OppositeQ
            | Self::Chapter3TranscendenceQ
            | Self::Chapter3SymbolTriangle
            | Self::Chapter3RootQ
            | Self::Chapter3ChallengeQ
            | Self::Chapter3IntegrationQ
            | Self::Chapter3ImageryMap
            | Self::Chapter3Choice => Chapter::Chapter3,
            Self::Chapter1Intro
            | Self::Chapter1ShadowNaming1
            | Self::Chapter1ShadowNaming2
            | Self::Chapter1ShadowNaming3
            | Self::Chapter1ShadowQuestions
            | Self::Chapter1EmotionNaming
            | Self::Chapter1EmotionQuestions
            | Self::Chapter1Integration
            | Self::Chapter1Choice => Chapter::Chapter1,
            Self::Chapter2Intro
            | Self::Chapter2Listening
            | Self::Chapter2ListeningQ1
            | Self::Chapter2ListeningQ2
            | Self::Chapter2ListeningQ3
            | Self::Chapter2EchoPoem
            | Self::Chapter2UnderstandingQ1
            | Self::Chapter2UnderstandingQ2
            | Self::Chapter2UnderstandingQ3
            | Self::Chapter2Imprint
            | Self::Chapter2Questions1
            | Self::Chapter2Task1
            | Self::Chapter2Questions2
            | Self::Chapter2Quest
            | Self::Chapter2Choice => Chapter::Chapter2,
            Self::AlchemyAltar | Self::Chapter4Individuation => Chapter::Altar,
            Self::Epilogue => Chapter::Epilogue,
        }
    }

    /// The stable string identifier of this phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Prologue => "prologue",
            Self::PrologueMasksShow => "prologue-masks-show",
            Self::PrologueQuestions => "prologue-questions",
            Self::PrologueQuest => "prologue-quest",
            Self::PrologueChoice => "prologue-choice",
            Self::Chapter3Intro => "chapter3-intro",
            Self::Chapter3ImagerySea => "chapter3-imagery-sea",
            Self::Chapter3ResonanceQ => "chapter3-resonance-q",
            Self::Chapter3OppositeQ => "chapter3-opposite-q",
            Self::Chapter3TranscendenceQ => "chapter3-transcendence-q",
            Self::Chapter3SymbolTriangle => "chapter3-symbol-triangle",
            Self::Chapter3RootQ => "chapter3-root-q",
            Self::Chapter3ChallengeQ => "chapter3-challenge-q",
            Self::Chapter3IntegrationQ => "chapter3-integration-q",
            Self::Chapter3ImageryMap => "chapter3-imagery-map",
            Self::Chapter3Choice => "chapter3-choice",
            Self::Chapter1Intro => "chapter1-intro",
            Self::Chapter1ShadowNaming1 => "chapter1-shadow-naming-1",
            Self::Chapter1ShadowNaming2 => "chapter1-shadow-naming-2",
            Self::Chapter1ShadowNaming3 => "chapter1-shadow-naming-3",
            Self::Chapter1ShadowQuestions => "chapter1-shadow-questions",
            Self::Chapter1EmotionNaming => "chapter1-emotion-naming",
            Self::Chapter1EmotionQuestions => "chapter1-emotion-questions",
            Self::Chapter1Integration => "chapter1-integration",
            Self::Chapter1Choice => "chapter1-choice",
            Self::Chapter2Intro => "chapter2-intro",
            Self::Chapter2Listening => "chapter2-listening",
            Self::Chapter2ListeningQ1 => "chapter2-listening-q1",
            Self::Chapter2ListeningQ2 => "chapter2-listening-q2",
            Self::Chapter2ListeningQ3 => "chapter2-listening-q3",
            Self::Chapter2EchoPoem => "chapter2-echo-poem",
            Self::Chapter2UnderstandingQ1 => "chapter2-understanding-q1",
            Self::Chapter2UnderstandingQ2 => "chapter2-understanding-q2",
            Self::Chapter2UnderstandingQ3 => "chapter2-understanding-q3",
            Self::Chapter2Imprint => "chapter2-imprint",
            Self::Chapter2Questions1 => "chapter2-questions-1",
            Self::Chapter2Task1 => "chapter2-task-1",
            Self::Chapter2Questions2 => "chapter2-questions-2",
            Self::Chapter2Quest => "chapter2-quest",
            Self::Chapter2Choice => "chapter2-choice",
            Self::AlchemyAltar => "alchemy-altar",
            Self::Chapter4Individuation => "chapter4-individuation",
            Self::Epilogue => "epilogue",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_phase_order_lists_every_phase_exactly_once() {
        let unique: HashSet<Phase> = PHASE_ORDER.iter().copied().collect();
        assert_eq!(unique.len(), PHASE_ORDER.len());
    }

    #[test]
    fn test_position_matches_index_in_phase_order() {
        for (index, phase) in PHASE_ORDER.iter().enumerate() {
            assert_eq!(phase.position(), index, "{phase} is out of place");
        }
    }

    #[test]
    fn test_initial_and_terminal_bound_the_order() {
        assert_eq!(PHASE_ORDER.first(), Some(&Phase::INITIAL));
        assert_eq!(PHASE_ORDER.last(), Some(&Phase::TERMINAL));
        assert_eq!(Phase::TERMINAL.next_in_order(), None);
    }

    #[test]
    fn test_chapters_are_contiguous_runs_of_the_order() {
        // Once the order leaves a chapter it never returns to it.
        let mut seen = Vec::new();
        for phase in PHASE_ORDER {
            let chapter = phase.chapter();
            if seen.last() != Some(&chapter) {
                assert!(!seen.contains(&chapter), "{chapter:?} is split");
                seen.push(chapter);
            }
        }
        assert_eq!(seen.len(), Chapter::ALL.len());
    }

    #[test]
    fn test_serde_uses_string_identifiers() {
        for phase in PHASE_ORDER {
            let json = serde_json::to_value(phase).unwrap();
            assert_eq!(json, serde_json::Value::String(phase.as_str().to_owned()));
            let back: Phase = serde_json::from_value(json).unwrap();
            assert_eq!(back, phase);
        }
    }

    #[test]
    fn test_chapter4_individuation_belongs_to_altar() {
        assert_eq!(Phase::Chapter4Individuation.chapter(), Chapter::Altar);
        assert_eq!(Phase::AlchemyAltar.chapter(), Chapter::Altar);
    }
}
