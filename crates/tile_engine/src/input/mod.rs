//! Input boundary
//!
//! Keyboard mapping lives with the host. Each frame it hands the simulation
//! an [`InputFrame`]: the player commands held this frame plus the global
//! toggles.

/// A single player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerCommand {
    /// Walk up (toward negative Y)
    MoveUp,
    /// Walk down
    MoveDown,
    /// Walk left
    MoveLeft,
    /// Walk right
    MoveRight,
    /// Swing the axe
    Attack,
    /// Shout fire
    Shout,
}

/// Everything the host collected for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Commands held this frame, applied in order
    pub commands: Vec<PlayerCommand>,
    /// Flip the paused state
    pub toggle_pause: bool,
    /// Flip debug bounds visibility
    pub toggle_debug_bounds: bool,
    /// The window was closed
    pub close_requested: bool,
}

impl InputFrame {
    /// Frame with no input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Frame holding the given commands
    pub fn with_commands(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whether `command` is held
    pub fn holds(&self, command: PlayerCommand) -> bool {
        self.commands.contains(&command)
    }
}
