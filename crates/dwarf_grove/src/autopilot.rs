//! Scripted input for headless runs
//!
//! Walks the actor toward the goal, keeps the axe swinging so logs in the
//! way get chopped, and shouts when a mushroom comes within range.

use tile_engine::ecs::EntityKind;
use tile_engine::foundation::math::Vec2;
use tile_engine::input::{InputFrame, PlayerCommand};

use crate::game::{Game, GameState};

/// Produces one input frame per fixed step
#[derive(Debug, Clone)]
pub struct Autopilot {
    max_frames: u64,
    shout_range: f32,
}

impl Autopilot {
    /// Autopilot that requests shutdown after `max_frames` (zero: never)
    pub fn new(max_frames: u64, shout_range: f32) -> Self {
        Self { max_frames, shout_range }
    }

    /// Input for frame number `frame` (counting from one)
    pub fn next_frame(&self, game: &Game, frame: u64) -> InputFrame {
        if self.max_frames > 0 && frame > self.max_frames {
            return InputFrame {
                close_requested: true,
                ..InputFrame::idle()
            };
        }
        match game.state() {
            GameState::Menu => InputFrame::with_commands([PlayerCommand::Attack]),
            GameState::Playing => self.steer(game),
            GameState::Paused | GameState::GameOver | GameState::Cleared => InputFrame::idle(),
        }
    }

    fn steer(&self, game: &Game) -> InputFrame {
        let simulation = game.simulation();
        let Some(actor) = simulation.actor() else {
            return InputFrame::idle();
        };
        let centre = actor.bounds().center();
        let mut commands = vec![PlayerCommand::Attack];

        if let Some((_, goal)) = simulation.entities_of_kind(EntityKind::Goal).first() {
            let offset = goal.center() - centre;
            let step = simulation.config().walk_speed * 0.01;
            commands.extend(axis_command(offset.x, step, PlayerCommand::MoveLeft, PlayerCommand::MoveRight));
            commands.extend(axis_command(offset.y, step, PlayerCommand::MoveUp, PlayerCommand::MoveDown));
        }

        let threatened = simulation
            .entities_of_kind(EntityKind::Mushroom)
            .iter()
            .any(|(_, bounds)| distance(bounds.center(), centre) <= self.shout_range);
        if threatened {
            commands.push(PlayerCommand::Shout);
        }
        InputFrame::with_commands(commands)
    }
}

fn axis_command(offset: f32, dead_zone: f32, negative: PlayerCommand, positive: PlayerCommand) -> Option<PlayerCommand> {
    if offset > dead_zone {
        Some(positive)
    } else if offset < -dead_zone {
        Some(negative)
    } else {
        None
    }
}

fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::level::parse_level;

    fn game(text: &str) -> Game {
        Game::new(GameConfig::default(), vec![parse_level(text).unwrap()]).unwrap()
    }

    #[test]
    fn test_menu_gets_a_start_command() {
        let autopilot = Autopilot::new(0, 300.0);
        let input = autopilot.next_frame(&game("*.g\n"), 1);
        assert!(!input.commands.is_empty());
    }

    #[test]
    fn test_walks_toward_the_goal() {
        let autopilot = Autopilot::new(0, 300.0);
        let mut game = game("*.g\n");
        game.start();
        let input = autopilot.next_frame(&game, 1);
        assert!(input.holds(PlayerCommand::MoveRight));
        assert!(!input.holds(PlayerCommand::Shout));
    }

    #[test]
    fn test_shouts_at_nearby_hazards() {
        let autopilot = Autopilot::new(0, 300.0);
        let mut game = game("*m.g\n");
        game.start();
        assert!(autopilot.next_frame(&game, 1).holds(PlayerCommand::Shout));
    }

    #[test]
    fn test_requests_close_after_the_frame_budget() {
        let autopilot = Autopilot::new(10, 300.0);
        let game = game("*.g\n");
        assert!(!autopilot.next_frame(&game, 10).close_requested);
        assert!(autopilot.next_frame(&game, 11).close_requested);
    }
}
