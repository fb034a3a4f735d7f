//! Playback boundary.
//!
//! The engine decides what should sound; whatever actually makes sound sits
//! behind [`AudioSink`].

/// Playback boundary. Implemented by whatever actually makes sound.
pub trait AudioSink: Send {
    /// Starts a looping background track, replacing nothing: callers stop the
    /// previous track first.
    fn play_loop(&mut self, url: &str, volume: f32);

    /// Pauses the background track in place.
    fn pause(&mut self);

    /// Resumes a paused background track.
    fn resume(&mut self);

    /// Stops and releases the background track.
    fn stop(&mut self);

    /// Plays a one-shot cue from its start.
    fn play_once(&mut self, url: &str, volume: f32);
}
