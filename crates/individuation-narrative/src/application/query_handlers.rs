//! Query handlers for the Narrative Progression context.
//!
//! Read-only views over a session snapshot, shaped for the chapter picker
//! and the progress display. Nothing here mutates state.

use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::JourneyStore;
use crate::domain::chapter::{CHAPTERS, Chapter};
use crate::domain::phase::Phase;
use crate::domain::predicates::{is_completed, is_unlocked};
use crate::domain::session::SessionState;

/// One row of the chapter picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterStatusView {
    /// Internal chapter identifier.
    pub chapter: Chapter,
    /// Display title.
    pub title: &'static str,
    /// Display subtitle.
    pub subtitle: &'static str,
    /// Position in the picker.
    pub display_rank: u8,
    /// Whether the picker offers this chapter.
    pub unlocked: bool,
    /// Whether the chapter is finished.
    pub completed: bool,
    /// Whether the participant currently stands in this chapter.
    pub current: bool,
    /// The chapter's reset epoch.
    pub epoch: u32,
}

/// Read-only view of the whole journey.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current phase.
    pub phase: Phase,
    /// Chapter containing the current phase.
    pub current_chapter: Option<Chapter>,
    /// Held items, in sorted order.
    pub inventory: Vec<String>,
    /// Known lore lines, in sorted order.
    pub knowledge: Vec<String>,
    /// Number of unlocked lore cards.
    pub knowledge_card_count: usize,
    /// Picker rows, ordered by display rank.
    pub chapters: Vec<ChapterStatusView>,
    /// Current version (event count).
    pub version: i64,
}

/// The chapter the participant is in, or `None` on the title screen.
#[must_use]
pub fn current_chapter(session: &SessionState) -> Option<Chapter> {
    let chapter = session.phase().chapter();
    chapter.descriptor().is_navigable().then_some(chapter)
}

/// Picker rows for every navigable chapter, ordered by display rank.
#[must_use]
pub fn chapter_statuses(session: &SessionState) -> Vec<ChapterStatusView> {
    let current = current_chapter(session);
    let mut rows: Vec<ChapterStatusView> = CHAPTERS
        .iter()
        .filter_map(|descriptor| {
            let display_rank = descriptor.display_rank?;
            Some(ChapterStatusView {
                chapter: descriptor.id,
                title: descriptor.display_title,
                subtitle: descriptor.display_subtitle,
                display_rank,
                unlocked: is_unlocked(descriptor.id, session),
                completed: is_completed(descriptor.id, session),
                current: current == Some(descriptor.id),
                epoch: session.reset_token(descriptor.id),
            })
        })
        .collect();
    rows.sort_by_key(|row| row.display_rank);
    rows
}

/// Builds the journey view from the store's latest snapshot.
#[must_use]
pub fn get_journey(store: &JourneyStore) -> JourneyView {
    let session = store.state();
    JourneyView {
        session_id: store.session_id(),
        phase: session.phase(),
        current_chapter: current_chapter(&session),
        inventory: session.inventory().iter().cloned().collect(),
        knowledge: session.knowledge().iter().cloned().collect(),
        knowledge_card_count: session.knowledge_cards().len(),
        chapters: chapter_statuses(&session),
        version: store.version(),
    }
}
