//! Authored chapter-completion milestones.
//!
//! Every boundary that hands out a reward also names the chapter it grants,
//! so no chapter's reachability silently depends on positional unlock alone.

use super::chapter::Chapter;
use super::commands::{CompleteBeat, Reward};
use super::phase::Phase;

/// The item earned at the end of the prologue quest.
pub const PERSONA_MASK: &str = "Persona Mask";
/// The item earned by integrating the shadow.
pub const THREE_PRIMAL_FORCES: &str = "Three Primal Forces";
/// One of the two items earned by listening to the inner voice.
pub const SOUL_MUSIC: &str = "Soul Music";
/// One of the two items earned by listening to the inner voice.
pub const HERALDIC_SEAL: &str = "Heraldic Seal";

/// A chapter-completion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    /// The persona quest is answered; the mask is handed over.
    PrologueQuest,
    /// The sea of imagery is charted.
    ImagerySea,
    /// The shadow is named and integrated.
    ShadowEncounter,
    /// The inner voice is heard.
    InnerVoice,
    /// The altar is laid with every item.
    AltarRite,
    /// The individuation sequence is finished.
    Individuation,
}

impl Milestone {
    /// Every milestone in narrative order.
    pub const ALL: [Self; 6] = [
        Self::PrologueQuest,
        Self::ImagerySea,
        Self::ShadowEncounter,
        Self::InnerVoice,
        Self::AltarRite,
        Self::Individuation,
    ];

    /// The chapter this milestone grants.
    #[must_use]
    pub const fn grant(self) -> Chapter {
        match self {
            Self::PrologueQuest => Chapter::Chapter3,
            Self::ImagerySea => Chapter::Chapter1,
            Self::ShadowEncounter => Chapter::Chapter2,
            Self::InnerVoice => Chapter::Altar,
            Self::AltarRite | Self::Individuation => Chapter::Epilogue,
        }
    }

    /// The phase the participant lands on.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Self::PrologueQuest => Phase::PrologueChoice,
            Self::ImagerySea => Phase::Chapter1Intro,
            Self::ShadowEncounter => Phase::Chapter2Intro,
            Self::InnerVoice => Phase::AlchemyAltar,
            Self::AltarRite | Self::Individuation => Phase::Epilogue,
        }
    }

    /// Items and lore handed out at this boundary.
    #[must_use]
    pub fn reward(self) -> Reward {
        let (items, lore): (&[&str], &[&str]) = match self {
            Self::PrologueQuest => (&[PERSONA_MASK], &[]),
            Self::ImagerySea => (
                &[],
                &["The union of opposites alone gives birth to the true self."],
            ),
            Self::ShadowEncounter => (
                &[THREE_PRIMAL_FORCES],
                &["Rather than being good, be whole."],
            ),
            Self::InnerVoice => (
                &[SOUL_MUSIC, HERALDIC_SEAL],
                &["Reason is your tool, but the soul is your guide."],
            ),
            Self::AltarRite | Self::Individuation => (&[], &[]),
        };
        Reward::new(items.iter().copied(), lore.iter().copied())
    }

    /// The bundled transition for this boundary.
    #[must_use]
    pub fn beat(self) -> CompleteBeat {
        CompleteBeat {
            reward: self.reward(),
            unlock: Some(self.grant()),
            next: self.next(),
        }
    }
}
