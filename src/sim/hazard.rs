//! Bomb spawning
//!
//! One bomb per cleared star set, dropped on the far side of the level from
//! the player so there is always some time to react.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{EntityId, Group};
use crate::assets::Texture;
use crate::platform::{BodyDesc, Host, Visual};
use crate::settings::HazardTuning;

/// A spawned bomb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: EntityId,
    pub spawn_pos: Vec2,
    pub spawn_vel: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardSpawner {
    tuning: HazardTuning,
    world_width: f32,
    hazards: Vec<Hazard>,
}

impl HazardSpawner {
    pub fn new(tuning: &HazardTuning, world_width: f32) -> Self {
        Self {
            tuning: tuning.clone(),
            world_width,
            hazards: Vec::new(),
        }
    }

    /// Every bomb spawned so far, oldest first
    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.hazards.iter().any(|h| h.id == id)
    }

    /// Spawn x from the half of the level the player is not in
    pub fn pick_spawn_x<R: Rng>(&self, player_x: f32, rng: &mut R) -> f32 {
        let width = self.world_width.round() as i32;
        let mid = width / 2;
        let x = if player_x < mid as f32 {
            rng.random_range(mid..=width)
        } else {
            rng.random_range(0..=mid)
        };
        x as f32
    }

    /// Spawn position and initial velocity for a bomb
    pub fn roll<R: Rng>(&self, player_x: f32, rng: &mut R) -> (Vec2, Vec2) {
        let x = self.pick_spawn_x(player_x, rng);
        let kick = self.tuning.max_kick;
        let vx = rng.random_range(-kick..=kick) as f32;
        (
            Vec2::new(x, self.tuning.spawn_y),
            Vec2::new(vx, self.tuning.drift_y),
        )
    }

    /// Create one bomb in the physics and render collaborators
    pub fn spawn<R: Rng>(
        &mut self,
        id: EntityId,
        player_x: f32,
        rng: &mut R,
        host: &mut Host<'_>,
    ) -> &Hazard {
        let (pos, vel) = self.roll(player_x, rng);

        host.physics.add_body(
            id,
            BodyDesc {
                velocity: vel,
                bounce: Vec2::splat(self.tuning.bounce),
                collide_world_bounds: true,
                ..BodyDesc::dynamic(Group::Hazards, pos, self.tuning.half_extents)
            },
        );
        host.render.spawn(id, Visual::new(Texture::Bomb, pos));
        log::info!("Bomb {} released at {pos} (player x {player_x}), velocity {vel}", id.0);

        self.hazards.push(Hazard {
            id,
            spawn_pos: pos,
            spawn_vel: vel,
        });
        &self.hazards[self.hazards.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawns_opposite_half() {
        let spawner = HazardSpawner::new(&HazardTuning::default(), 800.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let x = spawner.pick_spawn_x(200.0, &mut rng);
            assert!((400.0..=800.0).contains(&x));
            let x = spawner.pick_spawn_x(600.0, &mut rng);
            assert!((0.0..=400.0).contains(&x));
        }
    }

    #[test]
    fn test_player_at_midpoint_counts_as_right_half() {
        let spawner = HazardSpawner::new(&HazardTuning::default(), 800.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            assert!(spawner.pick_spawn_x(400.0, &mut rng) <= 400.0);
        }
    }

    #[test]
    fn test_velocity_range() {
        let spawner = HazardSpawner::new(&HazardTuning::default(), 800.0);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let (pos, vel) = spawner.roll(100.0, &mut rng);
            assert_eq!(pos.y, 16.0);
            assert!((-200.0..=200.0).contains(&vel.x));
            assert_eq!(vel.y, 20.0);
        }
    }

    #[test]
    fn test_same_seed_same_roll() {
        let spawner = HazardSpawner::new(&HazardTuning::default(), 800.0);
        let a = spawner.roll(100.0, &mut Pcg32::seed_from_u64(99));
        let b = spawner.roll(100.0, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
