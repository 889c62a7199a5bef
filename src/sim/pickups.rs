//! The star set
//!
//! A fixed row of stars created once at level start. Collected stars are
//! switched off, never destroyed; when the last one goes the whole row is
//! switched back on at the top of the screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{EntityAllocator, EntityId, Group};
use crate::assets::Texture;
use crate::platform::{BodyDesc, Host, Visual};
use crate::settings::PickupTuning;

/// A star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    /// Layout position; respawns reuse its x
    pub home: Vec2,
    /// Vertical restitution rolled at creation
    pub bounce: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupSet {
    pickups: Vec<Pickup>,
    respawn_y: f32,
    /// Completed collect-all cycles
    respawns: u32,
}

impl PickupSet {
    /// Lay out the row and register every star with the collaborators
    pub fn spawn<R: Rng>(
        ids: &mut EntityAllocator,
        tuning: &PickupTuning,
        rng: &mut R,
        host: &mut Host<'_>,
    ) -> Self {
        let mut pickups = Vec::with_capacity(tuning.count);
        for i in 0..tuning.count {
            let id = ids.next_entity_id();
            let home = Vec2::new(tuning.start_x + tuning.step_x * i as f32, tuning.y);
            let bounce = rng.random_range(tuning.bounce_min..=tuning.bounce_max);

            host.physics.add_body(
                id,
                BodyDesc {
                    bounce: Vec2::new(0.0, bounce),
                    ..BodyDesc::dynamic(Group::Pickups, home, tuning.half_extents)
                },
            );
            host.render.spawn(id, Visual::new(Texture::Star, home));

            pickups.push(Pickup {
                id,
                home,
                bounce,
                active: true,
            });
        }

        Self {
            pickups,
            respawn_y: tuning.y,
            respawns: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&Pickup> {
        self.pickups.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn active_count(&self) -> usize {
        self.pickups.iter().filter(|p| p.active).count()
    }

    /// Number of times the whole set has been brought back
    pub fn respawns(&self) -> u32 {
        self.respawns
    }

    /// Switch a collected star off. Returns false if it was already off or unknown.
    pub fn deactivate(&mut self, id: EntityId, host: &mut Host<'_>) -> bool {
        let Some(pickup) = self.pickups.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        if !pickup.active {
            return false;
        }
        pickup.active = false;

        host.physics.disable_body(id);
        host.render.set_visible(id, false);
        true
    }

    /// Bring every star back at its home x and the respawn height
    pub fn respawn_all(&mut self, host: &mut Host<'_>) {
        for pickup in &mut self.pickups {
            pickup.active = true;
            host.physics
                .enable_body(pickup.id, Vec2::new(pickup.home.x, self.respawn_y));
            host.render.set_visible(pickup.id, true);
        }
        self.respawns += 1;
        log::info!("All stars collected; respawned set #{}", self.respawns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{HeadlessPhysics, RecordingRenderer, SceneQueue};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_layout() {
        let mut physics = HeadlessPhysics::new(Vec2::new(800.0, 600.0), 300.0);
        let mut render = RecordingRenderer::new();
        let mut scenes = SceneQueue::new();
        let mut host = Host::new(&mut physics, &mut render, &mut scenes);
        let mut ids = EntityAllocator::default();
        let mut rng = Pcg32::seed_from_u64(3);

        let set = PickupSet::spawn(&mut ids, &PickupTuning::default(), &mut rng, &mut host);
        assert_eq!(set.len(), 12);
        assert_eq!(set.active_count(), 12);
        let xs: Vec<f32> = set.iter().map(|p| p.home.x).collect();
        assert_eq!(xs[0], 12.0);
        assert_eq!(xs[11], 12.0 + 70.0 * 11.0);
        assert!(set.iter().all(|p| (0.4..=0.8).contains(&p.bounce)));
        assert!(set.iter().all(|p| p.home.y == 0.0));
    }

    #[test]
    fn test_deactivate_and_respawn() {
        let mut physics = HeadlessPhysics::new(Vec2::new(800.0, 600.0), 300.0);
        let mut render = RecordingRenderer::new();
        let mut scenes = SceneQueue::new();
        let mut ids = EntityAllocator::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = PickupTuning {
            count: 2,
            ..Default::default()
        };

        let mut set = {
            let mut host = Host::new(&mut physics, &mut render, &mut scenes);
            PickupSet::spawn(&mut ids, &tuning, &mut rng, &mut host)
        };
        let first = set.iter().next().unwrap().id;
        physics.set_position(first, Vec2::new(12.0, 400.0));

        let mut host = Host::new(&mut physics, &mut render, &mut scenes);
        assert!(set.deactivate(first, &mut host));
        assert!(!set.deactivate(first, &mut host));
        assert!(!set.deactivate(EntityId(999), &mut host));
        assert_eq!(set.active_count(), 1);

        set.respawn_all(&mut host);
        assert_eq!(set.active_count(), 2);
        assert_eq!(set.respawns(), 1);
        assert!(physics.is_enabled(first));
        assert_eq!(physics.body(first).unwrap().pos, Vec2::new(12.0, 0.0));
        assert!(render.is_visible(first));
    }
}
