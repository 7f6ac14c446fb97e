//! Explicit service handle
//!
//! Owned by the simulation and lent to systems and collision callbacks that
//! need to play sounds or report events.

use crate::audio::{AudioSink, SilentAudio};
use crate::events::{EventObserver, GameEvent, NullObserver};

/// Audio and event hooks available during a frame
pub struct Services {
    audio: Box<dyn AudioSink>,
    observer: Box<dyn EventObserver>,
}

impl Services {
    /// Bundle an audio sink and an event observer
    pub fn new(audio: Box<dyn AudioSink>, observer: Box<dyn EventObserver>) -> Self {
        Self { audio, observer }
    }

    /// Play a named sound
    pub fn play(&mut self, sound: &str) {
        self.audio.play(sound);
    }

    /// Notify the observer
    pub fn notify(&mut self, event: GameEvent) -> bool {
        self.observer.on_event(event)
    }

    /// Swap in a different audio sink, returning the old one
    pub fn replace_audio(&mut self, audio: Box<dyn AudioSink>) -> Box<dyn AudioSink> {
        std::mem::replace(&mut self.audio, audio)
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(Box::new(SilentAudio), Box::new(NullObserver))
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
