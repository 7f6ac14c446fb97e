//! Audio hooks
//!
//! The simulation never plays sound itself. Systems and collision responses
//! name a sound and hand it to whatever [`AudioSink`] the host installed.

use std::cell::RefCell;
use std::rc::Rc;

/// Sound names emitted by the engine
pub mod sounds {
    /// Actor starts swinging the axe
    pub const AXE: &str = "axe";
    /// Actor shouts fire
    pub const FIRE: &str = "fire";
    /// Actor picks up a potion
    pub const PICKUP: &str = "pickup";
}

/// Receiver for named sound cues
pub trait AudioSink {
    /// Play the named sound
    fn play(&mut self, sound: &str);
}

/// Sink that drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _sound: &str) {}
}

/// Sink that remembers every cue, in order.
///
/// Clones share one log, so a host can hand a clone to the simulation and
/// keep reading the cues through its own copy.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    played: Rc<RefCell<Vec<String>>>,
}

impl RecordingAudio {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues received so far
    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }

    /// How many times `sound` was played
    pub fn count(&self, sound: &str) -> usize {
        self.played.borrow().iter().filter(|played| played.as_str() == sound).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: &str) {
        self.played.borrow_mut().push(sound.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_audio_counts_cues() {
        let mut audio = RecordingAudio::new();
        audio.play(sounds::AXE);
        audio.play(sounds::PICKUP);
        audio.play(sounds::AXE);
        assert_eq!(audio.count(sounds::AXE), 2);
        assert_eq!(audio.played().len(), 3);
    }

    #[test]
    fn test_recording_audio_clones_share_the_log() {
        let reader = RecordingAudio::new();
        let mut writer = reader.clone();
        writer.play(sounds::FIRE);
        assert_eq!(reader.played(), vec![sounds::FIRE.to_string()]);
    }
}
