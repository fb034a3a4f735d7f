//! Individuation — audio collaborator.
//!
//! Selects a background track per chapter, pauses it for the inner-voice
//! listening tasks, and cues sound effects for rewards. Playback itself sits
//! behind the [`AudioSink`](application::director::AudioSink) boundary.

pub mod application;
pub mod config;
pub mod domain;
