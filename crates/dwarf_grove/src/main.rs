//! Dwarf Grove
//!
//! Headless driver: loads the configuration and levels, then runs the game
//! at a fixed step until the autopilot closes the window, the actor dies or
//! every level is cleared.
//!
//! Usage: `dwarf_grove [config.toml|config.ron]`

use std::path::PathBuf;
use std::process::ExitCode;

use tile_engine::foundation::{logging, time::Timer};

mod ai;
mod autopilot;
mod config;
mod game;
mod hooks;
mod level;
mod spawner;

use autopilot::Autopilot;
use config::GameConfig;
use game::{Game, GameError, GameState};

/// Distance at which the autopilot shouts at a mushroom
const SHOUT_RANGE: f32 = 300.0;

fn main() -> ExitCode {
    logging::init();
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match run(config_path) {
        Ok(state) => {
            log::info!("Finished: {state}");
            ExitCode::SUCCESS
        }
        Err(error) if error.is_invariant_violation() => {
            log::error!("Engine invariant violated, stopping: {error}");
            ExitCode::from(2)
        }
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<PathBuf>) -> Result<GameState, GameError> {
    let config = GameConfig::load_or_default(config_path)?;
    let step = config.fixed_step;
    let realtime = config.realtime;
    let autopilot = Autopilot::new(config.max_frames, SHOUT_RANGE);
    let mut game = Game::load(config)?;
    let mut timer = Timer::new();

    loop {
        timer.update();
        let input = autopilot.next_frame(&game, timer.frame_count());
        if input.close_requested {
            log::info!("Window closed after {} frames", timer.frame_count() - 1);
            break;
        }
        if game.update(&input)?.is_final() {
            break;
        }
        if realtime {
            if let Some(rest) = timer.remaining_in_frame(step) {
                std::thread::sleep(rest);
            }
        }
    }

    let simulation = game.simulation();
    log::info!(
        "Level {} at frame {} ({:.1} fps)",
        game.level_index() + 1,
        simulation.frame(),
        timer.average_fps()
    );
    Ok(game.state())
}
