//! Health component

use crate::engine::SimulationError;

/// Health pool clamped to `[0, maximum]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    current: i32,
    maximum: i32,
}

impl Health {
    /// Create a health pool.
    ///
    /// Fails when the starting value is negative or above the maximum.
    pub fn new(starting: i32, maximum: i32) -> Result<Self, SimulationError> {
        if starting < 0 || starting > maximum {
            return Err(SimulationError::InvalidHealth { starting, maximum });
        }
        Ok(Self {
            current: starting,
            maximum,
        })
    }

    /// Current health
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Maximum health
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// Apply a signed change, clamping to the valid range. Returns the new value.
    pub fn change(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.maximum);
        self.current
    }

    /// Whether health has run out
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_starting_values() {
        assert!(Health::new(-1, 10).is_err());
        assert!(Health::new(11, 10).is_err());
        assert!(Health::new(0, 10).is_ok());
        assert!(Health::new(10, 10).is_ok());
    }

    #[test]
    fn test_change_clamps_both_ways() {
        let mut health = Health::new(80, 100).unwrap();
        assert_eq!(health.change(50), 100);
        assert_eq!(health.change(-250), 0);
        assert!(health.is_depleted());
    }
}
