//! Gameplay events
//!
//! Collision responses and systems report notable moments as [`GameEvent`]s.
//! Observers return `true` when they consumed the event, mirroring the
//! chain-of-responsibility convention used elsewhere in the engine.

/// Something worth telling observers about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// The actor picked up a potion
    PotionCollected,
    /// The actor shouted fire
    ShoutPerformed,
}

/// Receiver for gameplay events
pub trait EventObserver {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: GameEvent) -> bool;
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl EventObserver for NullObserver {
    fn on_event(&mut self, _event: GameEvent) -> bool {
        false
    }
}

/// Counts events and unlocks achievements at fixed thresholds
#[derive(Debug, Clone)]
pub struct AchievementTracker {
    potions_collected: u32,
    shouts_performed: u32,
    required_potions: u32,
    required_shouts: u32,
}

impl AchievementTracker {
    /// Tracker with the standard thresholds (6 potions, 5 shouts)
    pub fn new() -> Self {
        Self::with_thresholds(6, 5)
    }

    /// Tracker with custom thresholds
    pub fn with_thresholds(required_potions: u32, required_shouts: u32) -> Self {
        Self {
            potions_collected: 0,
            shouts_performed: 0,
            required_potions,
            required_shouts,
        }
    }

    /// Potions seen so far
    pub fn potions_collected(&self) -> u32 {
        self.potions_collected
    }

    /// Shouts seen so far
    pub fn shouts_performed(&self) -> u32 {
        self.shouts_performed
    }

    /// Whether the potion achievement is unlocked
    pub fn all_potions_unlocked(&self) -> bool {
        self.potions_collected >= self.required_potions
    }

    /// Whether the shout achievement is unlocked
    pub fn shouts_unlocked(&self) -> bool {
        self.shouts_performed >= self.required_shouts
    }
}

impl Default for AchievementTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EventObserver for AchievementTracker {
    fn on_event(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::PotionCollected => {
                self.potions_collected += 1;
                if self.potions_collected == self.required_potions {
                    log::info!("Achievement unlocked: all potions collected");
                }
            }
            GameEvent::ShoutPerformed => {
                self.shouts_performed += 1;
                if self.shouts_performed == self.required_shouts {
                    log::info!("Achievement unlocked: shouted {} times", self.required_shouts);
                }
            }
        }
        true
    }
}
