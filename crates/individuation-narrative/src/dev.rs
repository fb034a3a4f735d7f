//! Development jump tool.
//!
//! Compiled only for tests or with the `dev-tools` feature. It goes through
//! the same events and commit path as every other transition; it merely skips
//! the gating a participant would face.

use tracing::warn;
use uuid::Uuid;

use crate::application::command_handlers::JourneyStore;
use crate::domain::chapter::Chapter;
use crate::domain::events::JourneyEvent;
use crate::domain::phase::Phase;

impl JourneyStore {
    /// Grants every chapter and moves straight to `phase`.
    pub fn dev_jump(&mut self, phase: Phase) -> Vec<JourneyEvent> {
        warn!(
            session_id = %self.journey.id,
            %phase,
            "dev jump bypasses chapter gating"
        );
        let correlation_id = Uuid::new_v4();
        let clock = self.clock.as_ref();
        for chapter in Chapter::ALL {
            self.journey.grant_unlock(chapter, correlation_id, clock);
        }
        self.journey.advance(phase, correlation_id, clock);
        self.commit()
    }
}

#[cfg(test)]
mod tests {
    use individuation_test_support::{FixedClock, init_test_tracing};

    use super::*;
    use crate::application::query_handlers::chapter_statuses;
    use crate::domain::commands::JourneyCommand;

    #[test]
    fn test_dev_jump_unlocks_every_chapter() {
        // Arrange
        init_test_tracing();
        let mut store = JourneyStore::new(Box::new(FixedClock::default()));

        // Act
        store.dev_jump(Phase::Chapter2Listening);

        // Assert
        let state = store.state();
        assert_eq!(state.phase(), Phase::Chapter2Listening);
        assert!(chapter_statuses(&state).iter().all(|row| row.unlocked));
        assert_eq!(state.explicit_unlocks().len(), Chapter::ALL.len());
    }

    #[test]
    fn test_navigation_after_dev_jump_still_soft_resets() {
        // Arrange
        let mut store = JourneyStore::new(Box::new(FixedClock::default()));
        store.dev_jump(Phase::Prologue);

        // Act
        store
            .dispatch(JourneyCommand::navigate_to_chapter(Chapter::Epilogue))
            .unwrap();

        // Assert
        assert_eq!(store.state().phase(), Phase::Epilogue);
        assert_eq!(store.state().reset_token(Chapter::Epilogue), 1);
    }
}
