//! Chase AI
//!
//! Points every mushroom at the actor before the frame is stepped. Speed
//! stays whatever the hazard was built with; only the direction changes.

use tile_engine::ecs::EntityKind;
use tile_engine::foundation::math::normalize_or_zero;
use tile_engine::{Simulation, SimulationError};

/// Below this distance a hazard stops rather than jitter on the spot
pub const ARRIVAL_EPSILON: f32 = 0.001;

/// Steer every live mushroom toward the actor's centre.
///
/// Returns the number of hazards steered.
pub fn chase_actor(simulation: &mut Simulation) -> Result<usize, SimulationError> {
    let Some(target) = simulation.actor().map(|actor| actor.bounds().center()) else {
        return Ok(0);
    };
    let hazards = simulation.entities_of_kind(EntityKind::Mushroom);
    for (id, bounds) in &hazards {
        let direction = normalize_or_zero(target - bounds.center(), ARRIVAL_EPSILON);
        simulation.steer(*id, direction)?;
    }
    Ok(hazards.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tile_engine::core::{Services, SimulationConfig};
    use tile_engine::foundation::math::Vec2;

    use crate::level::parse_level;

    #[test]
    fn test_hazards_turn_toward_the_actor() {
        let level = parse_level("m..*\n....\n").unwrap();
        let mut simulation = Simulation::from_level(SimulationConfig::default(), &level, Services::default()).unwrap();
        assert_eq!(chase_actor(&mut simulation).unwrap(), 1);

        let (id, _) = simulation.entities_of_kind(EntityKind::Mushroom)[0];
        let velocity = *simulation.entity(id).unwrap().components().velocity().unwrap();
        assert_relative_eq!(velocity.value.norm(), 1.0, epsilon = 1e-5);
        assert!(velocity.value.x > 0.0);
    }

    #[test]
    fn test_hazard_on_the_actor_stops() {
        let level = parse_level("*.\n").unwrap();
        let mut simulation = Simulation::from_level(SimulationConfig::default(), &level, Services::default()).unwrap();
        let actor_centre = simulation.actor().unwrap().bounds().center();
        let extent = simulation.config().item_extent;
        let id = simulation
            .spawn_at(EntityKind::Mushroom, actor_centre - extent * 0.5)
            .unwrap();

        chase_actor(&mut simulation).unwrap();

        let velocity = simulation.entity(id).unwrap().components().velocity().copied().unwrap();
        assert_eq!(velocity.value, Vec2::zeros());
    }
}
