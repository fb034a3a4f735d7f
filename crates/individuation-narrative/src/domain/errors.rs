//! Policy rejections for the Narrative Progression context.

use individuation_core::error::DomainError;
use thiserror::Error;

use super::chapter::Chapter;
use super::phase::Phase;
use super::session::COLLECTED_NAME_LIMIT;

/// Why a command was refused. A refused command leaves state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Navigation targeted a chapter that is not yet reachable.
    #[error("chapter {0} is locked")]
    ChapterLocked(Chapter),

    /// Navigation targeted a chapter the picker never offers.
    #[error("chapter {0} is not navigable")]
    NotNavigable(Chapter),

    /// The collected-name list is already full.
    #[error("collected names are full ({COLLECTED_NAME_LIMIT} max)")]
    CollectedNamesFull,

    /// A freeform name was empty after trimming.
    #[error("name is blank")]
    BlankName,

    /// The item to remove is not in the inventory.
    #[error("item {0:?} is not held")]
    ItemNotHeld(String),

    /// The prologue recitation can only be repeated from within the prologue.
    #[error("cannot repeat the prologue from {0}")]
    OutsidePrologue(Phase),
}

impl From<Rejection> for DomainError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection.to_string())
    }
}
