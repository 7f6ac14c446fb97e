//! Time-to-live component
//!
//! Counts down in frames rather than seconds; projectiles use it to expire.

/// Frame countdown that marks its entity deleted at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToLive {
    /// Frames remaining
    pub frames: u32,
}

impl TimeToLive {
    /// Create a countdown of `frames`
    pub fn new(frames: u32) -> Self {
        Self { frames }
    }

    /// Decrement by one frame, never below zero. Returns true once expired.
    pub fn tick(&mut self) -> bool {
        self.frames = self.frames.saturating_sub(1);
        self.is_expired()
    }

    /// Whether the countdown has reached zero
    pub fn is_expired(&self) -> bool {
        self.frames == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_expires_at_zero() {
        let mut ttl = TimeToLive::new(2);
        assert!(!ttl.tick());
        assert!(ttl.tick());
    }

    #[test]
    fn test_tick_never_underflows() {
        let mut ttl = TimeToLive::new(0);
        assert!(ttl.tick());
        assert_eq!(ttl.frames, 0);
    }
}
