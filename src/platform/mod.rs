//! Platform abstraction layer
//!
//! The gameplay core never simulates physics, draws or switches scenes
//! itself. It drives these collaborators through the traits below:
//! - `Physics`: bodies, collision pairs, pause/resume, grounded queries
//! - `Renderer`: visuals, tints, textures, animations and tweens
//! - `SceneDirector`: scene transition requests
//!
//! `headless` provides in-memory implementations for tests and the demo driver.

pub mod headless;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{Anim, Texture};
use crate::scene::SceneKey;
use crate::sim::state::{EntityId, Group, Tint};

/// How a body takes part in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Immovable, unaffected by gravity
    Static,
    /// Integrated every step
    Dynamic,
}

/// Everything the physics collaborator needs to create a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub group: Group,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub half_extents: Vec2,
    pub velocity: Vec2,
    /// Restitution per axis
    pub bounce: Vec2,
    pub collide_world_bounds: bool,
}

impl BodyDesc {
    pub fn fixed(group: Group, pos: Vec2, half_extents: Vec2) -> Self {
        Self {
            group,
            kind: BodyKind::Static,
            pos,
            half_extents,
            velocity: Vec2::ZERO,
            bounce: Vec2::ZERO,
            collide_world_bounds: false,
        }
    }

    pub fn dynamic(group: Group, pos: Vec2, half_extents: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            ..Self::fixed(group, pos, half_extents)
        }
    }
}

/// Physics/simulation capabilities
pub trait Physics {
    fn add_body(&mut self, id: EntityId, desc: BodyDesc);
    /// Report overlaps between two groups without separating them
    fn add_overlap(&mut self, a: Group, b: Group);
    /// Make two groups solid against each other
    fn add_collider(&mut self, a: Group, b: Group);

    /// Freeze all motion
    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;

    /// True while the body rests on a supporting surface
    fn is_grounded(&self, id: EntityId) -> bool;
    fn position(&self, id: EntityId) -> Option<Vec2>;
    fn set_velocity_x(&mut self, id: EntityId, vx: f32);
    fn set_velocity_y(&mut self, id: EntityId, vy: f32);

    /// Take a body out of the simulation
    fn disable_body(&mut self, id: EntityId);
    /// Put a body back into the simulation at `pos` with zero velocity
    fn enable_body(&mut self, id: EntityId, pos: Vec2);
}

/// Repeating scale tween
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub to_scale: f32,
    pub duration_ms: u64,
    pub yoyo: bool,
    /// `None` repeats forever
    pub repeat: Option<u32>,
}

/// A visual entity as first created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub texture: Texture,
    pub pos: Vec2,
    pub scale: f32,
    pub depth: i32,
    pub visible: bool,
}

impl Visual {
    pub fn new(texture: Texture, pos: Vec2) -> Self {
        Self {
            texture,
            pos,
            scale: 1.0,
            depth: 0,
            visible: true,
        }
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Rendering capabilities
pub trait Renderer {
    fn spawn(&mut self, id: EntityId, visual: Visual);
    fn spawn_text(&mut self, id: EntityId, pos: Vec2, text: &str);
    fn set_text(&mut self, id: EntityId, text: &str);
    fn set_visible(&mut self, id: EntityId, visible: bool);
    fn set_texture(&mut self, id: EntityId, texture: Texture);
    fn set_tint(&mut self, id: EntityId, tint: Tint);
    fn play_anim(&mut self, id: EntityId, anim: Anim);
    fn start_pulse(&mut self, id: EntityId, pulse: Pulse);
}

/// Scene lifecycle capability
pub trait SceneDirector {
    /// Ask for a transition; it takes effect at the next frame boundary
    fn request(&mut self, scene: SceneKey);
}

/// Collaborators handed to every lifecycle hook
pub struct Host<'a> {
    pub physics: &'a mut dyn Physics,
    pub render: &'a mut dyn Renderer,
    pub scenes: &'a mut dyn SceneDirector,
}

impl<'a> Host<'a> {
    pub fn new(
        physics: &'a mut dyn Physics,
        render: &'a mut dyn Renderer,
        scenes: &'a mut dyn SceneDirector,
    ) -> Self {
        Self {
            physics,
            render,
            scenes,
        }
    }
}
