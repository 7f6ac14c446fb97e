//! Hazard spawner
//!
//! Drops a mushroom on a random floor cell every few seconds, keeping clear
//! of the actor and under the live-hazard cap.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tile_engine::ecs::{EntityId, EntityKind};
use tile_engine::scene::SpawnDirective;
use tile_engine::{Simulation, SimulationError};

use crate::config::SpawnerConfig;

/// Timed, seeded mushroom spawner
#[derive(Debug)]
pub struct HazardSpawner {
    settings: SpawnerConfig,
    rng: StdRng,
    countdown: f32,
}

impl HazardSpawner {
    /// Create a spawner and draw its first interval
    pub fn new(settings: SpawnerConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        let countdown = draw_interval(&mut rng, &settings);
        Self {
            settings,
            rng,
            countdown,
        }
    }

    /// Restart the countdown, e.g. after a level change
    pub fn reset(&mut self) {
        self.countdown = draw_interval(&mut self.rng, &self.settings);
    }

    /// Advance the countdown and spawn when it runs out.
    ///
    /// Returns the new hazard's id, or `None` when nothing was spawned.
    pub fn update(&mut self, simulation: &mut Simulation, elapsed: f32) -> Result<Option<EntityId>, SimulationError> {
        self.countdown -= elapsed;
        if self.countdown > 0.0 {
            return Ok(None);
        }
        self.countdown = draw_interval(&mut self.rng, &self.settings);

        let live = simulation.entities_of_kind(EntityKind::Mushroom).len();
        if live >= self.settings.max_hazards {
            log::debug!("Hazard cap reached ({live}), skipping spawn");
            return Ok(None);
        }
        let Some(actor) = simulation.actor() else {
            return Ok(None);
        };
        let (actor_col, actor_row) = simulation.grid().cell_of(actor.bounds().center());
        let min_distance = self.settings.min_actor_distance as u64;
        let candidates: Vec<(usize, usize)> = simulation
            .grid()
            .floor_cells()
            .filter(|&(col, row)| {
                let dx = (col as i64 - actor_col).unsigned_abs();
                let dy = (row as i64 - actor_row).unsigned_abs();
                dx.max(dy) >= min_distance
            })
            .collect();
        let Some(&(col, row)) = candidates.choose(&mut self.rng) else {
            log::warn!("No floor cell far enough from the actor for a hazard");
            return Ok(None);
        };

        let id = simulation.spawn(&SpawnDirective::new(EntityKind::Mushroom, col, row))?;
        log::info!("Mushroom {id} sprouted at ({col}, {row}), next in {:.1}s", self.countdown);
        Ok(Some(id))
    }
}

fn draw_interval(rng: &mut StdRng, settings: &SpawnerConfig) -> f32 {
    if settings.max_interval > settings.min_interval {
        rng.gen_range(settings.min_interval..=settings.max_interval)
    } else {
        settings.min_interval
    }
}
