//! Background tracks, sound cues and the phase-to-directive lookup.

use std::fmt;

use individuation_narrative::domain::chapter::Chapter;
use individuation_narrative::domain::phase::Phase;
use serde::{Deserialize, Serialize};

/// A looping background track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BgmTrack {
    Title,
    Prologue,
    Chapter1,
    Chapter2,
    Chapter3,
    /// The altar, while items are placed.
    Jitan,
    /// The altar's colouring scene; only ever requested by the scene itself.
    Alchemy,
    Epilogue,
}

impl BgmTrack {
    /// Asset key, without extension.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "bgm-title",
            Self::Prologue => "bgm-prologue",
            Self::Chapter1 => "bgm-chapter1",
            Self::Chapter2 => "bgm-chapter2",
            Self::Chapter3 => "bgm-chapter3",
            Self::Jitan => "bgm-jitan",
            Self::Alchemy => "bgm-alchemy",
            Self::Epilogue => "bgm-epilogue",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jitan => "wav",
            _ => "mp3",
        }
    }

    /// The track that accompanies a chapter.
    #[must_use]
    pub const fn for_chapter(chapter: Chapter) -> Self {
        match chapter {
            Chapter::Title => Self::Title,
            Chapter::Prologue => Self::Prologue,
            Chapter::Chapter3 => Self::Chapter3,
            Chapter::Chapter1 => Self::Chapter1,
            Chapter::Chapter2 => Self::Chapter2,
            Chapter::Altar => Self::Jitan,
            Chapter::Epilogue => Self::Epilogue,
        }
    }
}

impl fmt::Display for BgmTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A one-shot sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SfxCue {
    Typing,
    Choice,
    Drag,
    Item,
    Knowledge,
}

impl SfxCue {
    /// Asset key, without extension. Every cue is an `.mp3`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Typing => "sfx-typing",
            Self::Choice => "sfx-choice",
            Self::Drag => "sfx-drag",
            Self::Item => "sfx-item",
            Self::Knowledge => "sfx-knowledge",
        }
    }
}

impl fmt::Display for SfxCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What the background audio should do on a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioDirective {
    Play(BgmTrack),
    /// Silence the background so the participant can hear the foreground
    /// listening task. The track resumes once the phase is left.
    PauseForListening,
}

/// Whether a phase belongs to the inner-voice listening sequence.
#[must_use]
pub const fn is_listening_phase(phase: Phase) -> bool {
    matches!(
        phase,
        Phase::Chapter2Listening
            | Phase::Chapter2ListeningQ1
            | Phase::Chapter2ListeningQ2
            | Phase::Chapter2ListeningQ3
            | Phase::Chapter2EchoPoem
            | Phase::Chapter2UnderstandingQ1
            | Phase::Chapter2UnderstandingQ2
            | Phase::Chapter2UnderstandingQ3
    )
}

/// The background directive for a phase.
#[must_use]
pub const fn directive_for(phase: Phase) -> AudioDirective {
    if is_listening_phase(phase) {
        AudioDirective::PauseForListening
    } else {
        AudioDirective::Play(BgmTrack::for_chapter(phase.chapter()))
    }
}
