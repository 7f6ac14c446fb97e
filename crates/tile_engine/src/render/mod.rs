//! Render boundary
//!
//! Systems never draw. The graphics and debug systems append
//! [`DrawCommand`]s to a [`DrawList`] that the host drains after each frame,
//! and [`RenderItem`] describes every live entity for hosts that draw from
//! the store directly.

use crate::ecs::entity::{EntityId, EntityKind};
use crate::physics::Rect;

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw an entity's sprite
    Sprite {
        /// Entity being drawn
        entity: EntityId,
        /// Its kind
        kind: EntityKind,
        /// Where to draw it
        bounds: Rect,
        /// Sprite sheet name
        sprite: String,
        /// Animation name
        animation: String,
        /// Uniform draw scale
        scale: f32,
    },
    /// Outline an entity's bounding box
    Outline {
        /// Entity being outlined
        entity: EntityId,
        /// Box to outline
        bounds: Rect,
    },
}

/// Draw commands gathered during one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Queued commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of outline commands queued
    pub fn outline_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Outline { .. }))
            .count()
    }

    /// Drop everything queued
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the queued commands, leaving the list empty
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

/// What the renderer may know about a live entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    /// Entity id
    pub id: EntityId,
    /// Kind tag
    pub kind: EntityKind,
    /// Current bounding box
    pub bounds: Rect,
    /// Whether an outline may be drawn for it
    pub debug_bounds_visible: bool,
}
