//! Game flow
//!
//! Wraps one [`Simulation`] with the menu, pause, level progression and
//! game-over states, and runs the hazard spawner and chase AI ahead of each
//! engine step.

use std::fmt;

use thiserror::Error;
use tile_engine::config::ConfigError;
use tile_engine::input::InputFrame;
use tile_engine::scene::LevelDescription;
use tile_engine::{FrameReport, Simulation, SimulationError};

use crate::ai;
use crate::config::GameConfig;
use crate::hooks::game_services;
use crate::level::{load_level_file, LevelFileError};
use crate::spawner::HazardSpawner;

/// Game errors
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded or is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A level file could not be loaded
    #[error("Level file error: {0}")]
    Level(#[from] LevelFileError),

    /// The engine failed
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Nothing to play
    #[error("No levels to play")]
    NoLevels,
}

impl GameError {
    /// Whether the engine reported corrupted bookkeeping
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Simulation(error) if error.is_invariant_violation())
    }
}

/// Where the game is in its flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the first command
    Menu,
    /// Stepping the simulation
    Playing,
    /// Simulation frozen
    Paused,
    /// The actor ran out of health
    GameOver,
    /// Every level has been completed
    Cleared,
}

impl GameState {
    /// Whether the game has ended
    pub fn is_final(self) -> bool {
        matches!(self, Self::GameOver | Self::Cleared)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Menu => "menu",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::GameOver => "game over",
            Self::Cleared => "all levels cleared",
        };
        f.write_str(name)
    }
}

/// One play-through
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    levels: Vec<LevelDescription>,
    level_index: usize,
    simulation: Simulation,
    spawner: HazardSpawner,
    state: GameState,
}

impl Game {
    /// Load every configured level file and build the first world
    pub fn load(config: GameConfig) -> Result<Self, GameError> {
        let levels = config
            .levels
            .iter()
            .map(load_level_file)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(config, levels)
    }

    /// Start a game over already-parsed levels
    pub fn new(config: GameConfig, levels: Vec<LevelDescription>) -> Result<Self, GameError> {
        let first = levels.first().ok_or(GameError::NoLevels)?;
        let simulation = Simulation::from_level(config.simulation.clone(), first, game_services())?;
        let spawner = HazardSpawner::new(config.spawner.clone());
        log::info!("Game ready with {} levels", levels.len());
        Ok(Self {
            config,
            levels,
            level_index: 0,
            simulation,
            spawner,
            state: GameState::Menu,
        })
    }

    /// Current state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Zero-based index of the level being played
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// The running world
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Leave the menu
    pub fn start(&mut self) {
        if self.state == GameState::Menu {
            log::info!("Starting level {}", self.level_index + 1);
            self.state = GameState::Playing;
        }
    }

    /// Advance the game by one fixed step
    pub fn update(&mut self, input: &InputFrame) -> Result<GameState, GameError> {
        match self.state {
            GameState::Menu => {
                if !input.commands.is_empty() {
                    self.start();
                }
            }
            GameState::Playing | GameState::Paused => {
                let report = self.play_frame(input)?;
                self.follow(&report)?;
            }
            GameState::GameOver | GameState::Cleared => {}
        }
        Ok(self.state)
    }

    fn play_frame(&mut self, input: &InputFrame) -> Result<FrameReport, GameError> {
        let step = self.config.fixed_step;
        if !self.simulation.is_paused() {
            self.spawner.update(&mut self.simulation, step)?;
            ai::chase_actor(&mut self.simulation)?;
        }
        Ok(self.simulation.step(input, step)?)
    }

    fn follow(&mut self, report: &FrameReport) -> Result<(), GameError> {
        if report.paused {
            self.state = GameState::Paused;
            return Ok(());
        }
        self.state = GameState::Playing;

        if report.actor_defeated || self.simulation.actor_id().is_none() {
            log::info!("Game over on level {} after {} frames", self.level_index + 1, report.frame);
            self.state = GameState::GameOver;
        } else if report.level_complete {
            self.advance()?;
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<(), GameError> {
        let next = self.level_index + 1;
        let Some(level) = self.levels.get(next) else {
            log::info!("All {} levels cleared", self.levels.len());
            self.state = GameState::Cleared;
            return Ok(());
        };
        self.simulation.load_level(level)?;
        self.spawner.reset();
        self.level_index = next;
        log::info!("Advancing to level {}", next + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_engine::input::PlayerCommand;

    use crate::level::parse_level;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig {
            fixed_step: 0.5,
            ..GameConfig::default()
        };
        config.spawner.min_interval = 1000.0;
        config.spawner.max_interval = 1000.0;
        config
    }

    fn game(levels: &[&str], config: GameConfig) -> Game {
        let levels = levels.iter().map(|text| parse_level(text).unwrap()).collect();
        Game::new(config, levels).unwrap()
    }

    fn walk_right() -> InputFrame {
        InputFrame::with_commands([PlayerCommand::MoveRight])
    }

    #[test]
    fn test_menu_waits_for_a_command() {
        let mut game = game(&["*g\n"], quiet_config());
        assert_eq!(game.update(&InputFrame::idle()).unwrap(), GameState::Menu);
        assert_eq!(game.simulation().frame(), 0);
        assert_eq!(game.update(&walk_right()).unwrap(), GameState::Playing);
    }

    #[test]
    fn test_goal_advances_then_clears() {
        let mut game = game(&["*g\n", "*.g\n"], quiet_config());
        game.start();
        for _ in 0..5 {
            game.update(&walk_right()).unwrap();
            if game.level_index() == 1 {
                break;
            }
        }
        assert_eq!(game.level_index(), 1);
        assert_eq!(game.state(), GameState::Playing);

        for _ in 0..10 {
            if game.update(&walk_right()).unwrap().is_final() {
                break;
            }
        }
        assert_eq!(game.state(), GameState::Cleared);
    }

    #[test]
    fn test_pause_freezes_play() {
        let mut game = game(&["*..g\n"], quiet_config());
        game.start();
        let toggle = InputFrame {
            toggle_pause: true,
            ..InputFrame::idle()
        };
        assert_eq!(game.update(&toggle).unwrap(), GameState::Paused);
        assert_eq!(game.update(&walk_right()).unwrap(), GameState::Paused);
        assert_eq!(game.simulation().frame(), 0);
        assert_eq!(game.update(&toggle).unwrap(), GameState::Playing);
    }

    #[test]
    fn test_hazard_contact_ends_the_game() {
        let mut config = quiet_config();
        config.simulation.tuning.hazard_contact_damage = 100;
        let mut game = game(&["*m\n"], config);
        game.start();
        for _ in 0..10 {
            if game.update(&InputFrame::idle()).unwrap().is_final() {
                break;
            }
        }
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_no_levels_is_an_error() {
        assert!(matches!(Game::new(quiet_config(), Vec::new()), Err(GameError::NoLevels)));
    }
}
