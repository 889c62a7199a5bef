//! Level outcome
//!
//! Touching a bomb ends the level: the world freezes, the player turns red,
//! and the game-over scene is requested after a fixed delay.

use serde::{Deserialize, Serialize};

use super::player::PlayerController;
use super::schedule::{Deferred, Scheduler, TaskId};
use super::state::Tint;
use crate::platform::Host;
use crate::scene::SceneKey;

/// Current phase of the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelPhase {
    #[default]
    Playing,
    /// Hit by a bomb, waiting for the game-over transition
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelOutcomeController {
    phase: LevelPhase,
    delay_ms: u64,
    /// The pending transition, kept so it could be cancelled
    transition: Option<TaskId>,
}

impl LevelOutcomeController {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            phase: LevelPhase::Playing,
            delay_ms,
            transition: None,
        }
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn has_failed(&self) -> bool {
        self.phase == LevelPhase::Failed
    }

    pub fn transition(&self) -> Option<TaskId> {
        self.transition
    }

    /// Freeze the level and schedule the game-over scene. Only the first
    /// contact counts.
    pub fn on_hazard_contact(
        &mut self,
        player: &mut PlayerController,
        timers: &mut Scheduler<Deferred>,
        host: &mut Host<'_>,
    ) -> bool {
        if self.has_failed() {
            return false;
        }
        self.phase = LevelPhase::Failed;

        host.physics.pause();
        player.set_tint(Tint::Hit, host);
        player.turn(host);
        self.transition = Some(timers.schedule(self.delay_ms, Deferred::StartScene(SceneKey::GameOver)));
        log::info!("Player hit a bomb; game over in {} ms", self.delay_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Physics;
    use crate::platform::headless::{HeadlessPhysics, RecordingRenderer, SceneQueue};
    use crate::settings::PlayerTuning;
    use crate::sim::state::EntityId;
    use glam::Vec2;

    #[test]
    fn test_first_contact_only() {
        let mut physics = HeadlessPhysics::new(Vec2::new(800.0, 600.0), 300.0);
        let mut render = RecordingRenderer::new();
        let mut scenes = SceneQueue::new();
        let mut host = Host::new(&mut physics, &mut render, &mut scenes);
        let mut timers = Scheduler::new();
        let mut player = PlayerController::spawn(EntityId(1), &PlayerTuning::default(), &mut host);
        let mut outcome = LevelOutcomeController::new(2000);

        assert!(outcome.on_hazard_contact(&mut player, &mut timers, &mut host));
        assert!(!outcome.on_hazard_contact(&mut player, &mut timers, &mut host));
        assert!(outcome.has_failed());
        assert_eq!(timers.len(), 1);
        assert!(outcome.transition().is_some_and(|id| timers.is_pending(id)));
        assert_eq!(player.tint(), Tint::Hit);
        assert!(physics.is_paused());

        assert!(timers.advance(1999).is_empty());
        assert_eq!(timers.advance(1), vec![Deferred::StartScene(SceneKey::GameOver)]);
    }
}
