//! Player motion control
//!
//! Turns a frame intent into velocity commands for the physics collaborator.
//! Motion state is rewritten every frame from the intent; nothing carries over.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::{FrameIntent, MoveIntent};
use super::state::{EntityId, Group, Tint};
use crate::assets::{Anim, Texture};
use crate::platform::{BodyDesc, Host, Visual};
use crate::settings::PlayerTuning;

/// Horizontal motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Idle,
    MovingLeft,
    MovingRight,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    id: EntityId,
    motion: MotionState,
    tint: Tint,
    run_speed: f32,
    jump_speed: f32,
}

impl PlayerController {
    /// Create the player's body and sprite
    pub fn spawn(id: EntityId, tuning: &PlayerTuning, host: &mut Host<'_>) -> Self {
        host.physics.add_body(
            id,
            BodyDesc {
                bounce: Vec2::splat(tuning.bounce),
                collide_world_bounds: true,
                ..BodyDesc::dynamic(Group::Player, tuning.spawn, tuning.half_extents)
            },
        );
        host.render.spawn(id, Visual::new(Texture::Dude, tuning.spawn));
        host.render.play_anim(id, Anim::Turn);

        Self {
            id,
            motion: MotionState::Idle,
            tint: Tint::Normal,
            run_speed: tuning.run_speed,
            jump_speed: tuning.jump_speed,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn motion(&self) -> MotionState {
        self.motion
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn position(&self, host: &Host<'_>) -> Option<Vec2> {
        host.physics.position(self.id)
    }

    pub fn is_grounded(&self, host: &Host<'_>) -> bool {
        host.physics.is_grounded(self.id)
    }

    pub fn move_left(&mut self, host: &mut Host<'_>) {
        host.physics.set_velocity_x(self.id, -self.run_speed);
        host.render.play_anim(self.id, Anim::Left);
        self.motion = MotionState::MovingLeft;
    }

    pub fn move_right(&mut self, host: &mut Host<'_>) {
        host.physics.set_velocity_x(self.id, self.run_speed);
        host.render.play_anim(self.id, Anim::Right);
        self.motion = MotionState::MovingRight;
    }

    pub fn idle(&mut self, host: &mut Host<'_>) {
        host.physics.set_velocity_x(self.id, 0.0);
        host.render.play_anim(self.id, Anim::Turn);
        self.motion = MotionState::Idle;
    }

    /// Drop the motion state while the world is frozen. No physics command
    /// is sent; the next applied intent sets velocity again.
    pub fn halt(&mut self) {
        self.motion = MotionState::Idle;
    }

    /// Jump if standing on something. Returns true if the jump happened.
    pub fn jump(&mut self, host: &mut Host<'_>) -> bool {
        if !host.physics.is_grounded(self.id) {
            return false;
        }
        host.physics.set_velocity_y(self.id, -self.jump_speed);
        true
    }

    /// Apply one frame of intent
    pub fn apply(&mut self, intent: FrameIntent, host: &mut Host<'_>) {
        match intent.movement {
            MoveIntent::Left => self.move_left(host),
            MoveIntent::Right => self.move_right(host),
            MoveIntent::Idle => self.idle(host),
        }
        if intent.jump {
            self.jump(host);
        }
    }

    pub fn set_tint(&mut self, tint: Tint, host: &mut Host<'_>) {
        self.tint = tint;
        host.render.set_tint(self.id, tint);
    }

    pub fn clear_tint(&mut self, host: &mut Host<'_>) {
        self.set_tint(Tint::Normal, host);
    }

    /// Face the camera (used on hit)
    pub fn turn(&mut self, host: &mut Host<'_>) {
        host.render.play_anim(self.id, Anim::Turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{HeadlessPhysics, RecordingRenderer, SceneQueue};

    struct Rig {
        physics: HeadlessPhysics,
        render: RecordingRenderer,
        scenes: SceneQueue,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                physics: HeadlessPhysics::new(Vec2::new(800.0, 600.0), 300.0),
                render: RecordingRenderer::new(),
                scenes: SceneQueue::new(),
            }
        }

        fn host(&mut self) -> Host<'_> {
            Host::new(&mut self.physics, &mut self.render, &mut self.scenes)
        }
    }

    #[test]
    fn test_move_and_idle() {
        let mut rig = Rig::new();
        let id = EntityId(1);
        let mut player = PlayerController::spawn(id, &PlayerTuning::default(), &mut rig.host());

        player.move_left(&mut rig.host());
        assert_eq!(player.motion(), MotionState::MovingLeft);
        assert_eq!(rig.physics.velocity(id).unwrap().x, -160.0);

        player.move_right(&mut rig.host());
        assert_eq!(player.motion(), MotionState::MovingRight);
        assert_eq!(rig.physics.velocity(id).unwrap().x, 160.0);
        assert_eq!(rig.render.get(id).unwrap().anim, Some(Anim::Right));

        player.idle(&mut rig.host());
        assert_eq!(player.motion(), MotionState::Idle);
        assert_eq!(rig.physics.velocity(id).unwrap().x, 0.0);
    }

    #[test]
    fn test_halt_leaves_velocity_alone() {
        let mut rig = Rig::new();
        let id = EntityId(1);
        let mut player = PlayerController::spawn(id, &PlayerTuning::default(), &mut rig.host());

        player.move_right(&mut rig.host());
        player.halt();
        assert_eq!(player.motion(), MotionState::Idle);
        assert_eq!(rig.physics.velocity(id).unwrap().x, 160.0);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut rig = Rig::new();
        let id = EntityId(1);
        let mut player = PlayerController::spawn(id, &PlayerTuning::default(), &mut rig.host());

        assert!(!player.jump(&mut rig.host()));
        assert_eq!(rig.physics.velocity(id).unwrap().y, 0.0);

        rig.physics.set_grounded(id, true);
        assert!(player.jump(&mut rig.host()));
        assert_eq!(rig.physics.velocity(id).unwrap().y, -330.0);
    }

    #[test]
    fn test_apply_intent() {
        let mut rig = Rig::new();
        let id = EntityId(1);
        let mut player = PlayerController::spawn(id, &PlayerTuning::default(), &mut rig.host());
        rig.physics.set_grounded(id, true);

        player.apply(
            FrameIntent {
                movement: MoveIntent::Left,
                jump: true,
            },
            &mut rig.host(),
        );
        assert_eq!(rig.physics.velocity(id), Some(Vec2::new(-160.0, -330.0)));
    }

    #[test]
    fn test_tint() {
        let mut rig = Rig::new();
        let id = EntityId(1);
        let mut player = PlayerController::spawn(id, &PlayerTuning::default(), &mut rig.host());
        player.set_tint(Tint::Paused, &mut rig.host());
        assert_eq!(rig.render.tint(id), Tint::Paused);
        player.clear_tint(&mut rig.host());
        assert_eq!(player.tint(), Tint::Normal);
        assert_eq!(rig.render.tint(id), Tint::Normal);
    }
}
