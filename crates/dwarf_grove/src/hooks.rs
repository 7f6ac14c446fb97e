//! Engine hooks for the headless build
//!
//! There is no audio device, so sound cues go to the log. Achievements are
//! tracked by the engine's [`AchievementTracker`].

use tile_engine::audio::AudioSink;
use tile_engine::core::Services;
use tile_engine::events::AchievementTracker;

/// Audio sink that logs each cue
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAudio;

impl AudioSink for ConsoleAudio {
    fn play(&mut self, sound: &str) {
        log::info!("[sfx] {sound}");
    }
}

/// Services wired for the game: console audio and achievement tracking
pub fn game_services() -> Services {
    Services::new(Box::new(ConsoleAudio), Box::new(AchievementTracker::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_engine::events::GameEvent;

    #[test]
    fn test_game_services_consume_events() {
        let mut services = game_services();
        assert!(services.notify(GameEvent::PotionCollected));
    }
}
