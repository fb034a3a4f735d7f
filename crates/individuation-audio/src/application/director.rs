//! Background music and sound cues driven by journey transitions.
//!
//! [`AudioDirector`] subscribes to the journey store like any other reader.
//! It only looks at the phase and at reward events; it never sees, and never
//! touches, the rest of the session.

use individuation_core::observer::Observer;
pub use individuation_core::sink::AudioSink;
use individuation_narrative::domain::events::{JourneyEvent, JourneyEventKind};
use individuation_narrative::domain::phase::Phase;
use individuation_narrative::domain::session::SessionState;
use tracing::{debug, info};

use crate::config::AudioConfig;
use crate::domain::tracks::{AudioDirective, BgmTrack, SfxCue, directive_for};

/// Picks background tracks and cues sound effects.
#[derive(Debug)]
pub struct AudioDirector<S> {
    config: AudioConfig,
    sink: S,
    phase: Phase,
    current: Option<BgmTrack>,
    paused_for_listening: bool,
    interacted: bool,
}

impl<S: AudioSink> AudioDirector<S> {
    /// Creates a silent director resting on the initial phase.
    #[must_use]
    pub fn new(config: AudioConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            phase: Phase::INITIAL,
            current: None,
            paused_for_listening: false,
            interacted: false,
        }
    }

    /// The background track last started, if any.
    #[must_use]
    pub fn current_track(&self) -> Option<BgmTrack> {
        self.current
    }

    #[must_use]
    pub fn is_paused_for_listening(&self) -> bool {
        self.paused_for_listening
    }

    /// The sink playback is sent to.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Playback may only start after the participant has interacted once.
    /// The title track starts here if the title is showing.
    pub fn on_first_interaction(&mut self) {
        if self.interacted {
            return;
        }
        self.interacted = true;
        if self.phase == Phase::Title {
            self.apply_directive(directive_for(Phase::Title));
        }
    }

    /// Follows the phase. The title stays silent until the first interaction.
    pub fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        if phase == Phase::Title && !self.interacted {
            debug!("title stays silent until first interaction");
            return;
        }
        self.apply_directive(directive_for(phase));
    }

    /// Plays `track`, e.g. when a scene colours its own background.
    ///
    /// Requesting the track already playing does nothing; requesting the
    /// paused track resumes it.
    pub fn play_track(&mut self, track: BgmTrack) {
        if self.current == Some(track) {
            if self.paused_for_listening {
                self.paused_for_listening = false;
                self.sink.resume();
            }
            return;
        }
        if self.current.take().is_some() {
            self.sink.stop();
        }
        self.paused_for_listening = false;
        let url = self.config.track_url(track);
        info!(%track, %url, "background track started");
        self.sink.play_loop(&url, self.config.bgm_volume);
        self.current = Some(track);
    }

    /// Plays a one-shot sound cue.
    pub fn cue(&mut self, cue: SfxCue) {
        let url = self.config.cue_url(cue);
        debug!(%cue, "sound cue");
        self.sink.play_once(&url, self.config.sfx_volume);
    }

    /// Stops the background and forgets the first interaction, as a reload
    /// would.
    pub fn reset(&mut self) {
        if self.current.take().is_some() {
            self.sink.stop();
        }
        self.paused_for_listening = false;
        self.interacted = false;
        self.phase = Phase::INITIAL;
    }

    fn apply_directive(&mut self, directive: AudioDirective) {
        match directive {
            AudioDirective::Play(track) => self.play_track(track),
            AudioDirective::PauseForListening => {
                if self.current.is_some() && !self.paused_for_listening {
                    debug!(phase = %self.phase, "background paused for listening");
                    self.paused_for_listening = true;
                    self.sink.pause();
                }
            }
        }
    }
}

impl<S: AudioSink> Observer<SessionState, JourneyEvent> for AudioDirector<S> {
    fn on_transition(
        &mut self,
        previous: &SessionState,
        current: &SessionState,
        events: &[JourneyEvent],
    ) {
        if events.is_empty() {
            self.reset();
            return;
        }
        for event in events {
            if let JourneyEventKind::RewardGranted(reward) = &event.kind {
                if !reward.items.is_empty() {
                    self.cue(SfxCue::Item);
                }
                if !reward.lore.is_empty() {
                    self.cue(SfxCue::Knowledge);
                }
            }
        }
        if previous.phase() != current.phase() {
            self.enter_phase(current.phase());
        }
    }
}
