//! Input binding component

/// Marks an entity as driven by the player's commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBinding {
    /// Commands are ignored while disabled
    pub enabled: bool,
}

impl Default for InputBinding {
    fn default() -> Self {
        Self { enabled: true }
    }
}
