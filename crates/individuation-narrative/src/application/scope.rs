//! Chapter-scoped ephemeral state.
//!
//! Local presentation state (the card on display, whether an intro line has
//! finished typing) lives outside the session. [`ChapterScoped`] remembers
//! the reset epoch it was built under and rebuilds its value once the
//! chapter's epoch moves on.

use crate::domain::chapter::Chapter;
use crate::domain::session::SessionState;

/// A value that is rebuilt whenever its chapter is soft-reset.
#[derive(Debug, Clone)]
pub struct ChapterScoped<T, F = fn() -> T>
where
    F: Fn() -> T,
{
    chapter: Chapter,
    epoch: u32,
    value: T,
    init: F,
}

impl<T, F> ChapterScoped<T, F>
where
    F: Fn() -> T,
{
    /// Builds the value under the chapter's current epoch.
    pub fn new(chapter: Chapter, session: &SessionState, init: F) -> Self {
        Self {
            chapter,
            epoch: session.reset_token(chapter),
            value: init(),
            init,
        }
    }

    /// Rebuilds the value if the chapter's epoch changed. Returns `true` when
    /// it did.
    pub fn sync(&mut self, session: &SessionState) -> bool {
        let epoch = session.reset_token(self.chapter);
        if epoch == self.epoch {
            return false;
        }
        self.value = (self.init)();
        self.epoch = epoch;
        true
    }

    #[must_use]
    pub fn chapter(&self) -> Chapter {
        self.chapter
    }

    /// The epoch the current value was built under.
    #[must_use]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }
}
