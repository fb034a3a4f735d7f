//! Completion and unlock predicates.
//!
//! Both are pure functions of the catalog and a session snapshot. They are
//! computed independently: a chapter can be unlocked by an explicit grant
//! without the participant ever having stood on the previous chapter's
//! completion phase, so reachability must never be derived from position
//! alone.

use super::chapter::Chapter;
use super::phase::Phase;
use super::session::SessionState;

/// Whether the chapter's entry phase is reachable from the chapter picker.
///
/// While the participant is still on the title screen only the prologue is
/// offered, whatever has been granted. Past it, a navigable chapter is
/// unlocked when it has no unlock phase, when it was explicitly granted, or
/// once the participant has reached its unlock phase.
#[must_use]
pub fn is_unlocked(chapter: Chapter, session: &SessionState) -> bool {
    let descriptor = chapter.descriptor();
    if !descriptor.is_navigable() {
        return false;
    }
    if session.phase() == Phase::Title {
        return chapter == Chapter::Prologue;
    }
    let Some(unlock_phase) = descriptor.unlock_phase else {
        return true;
    };
    session.explicit_unlocks().contains(&chapter)
        || session.phase().position() >= unlock_phase.position()
}

/// Whether the chapter is finished, per its completion rule.
#[must_use]
pub fn is_completed(chapter: Chapter, session: &SessionState) -> bool {
    let descriptor = chapter.descriptor();
    descriptor
        .completion_rule
        .is_satisfied(session.phase(), descriptor.completion_phase)
}
