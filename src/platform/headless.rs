//! Headless collaborators
//!
//! In-memory physics, renderer and scene queue. Good enough to drive a level
//! without a window: bodies fall under gravity, land on static platforms,
//! stay inside the world, and registered pairs report contacts.

use std::collections::BTreeMap;

use glam::Vec2;

use super::{BodyDesc, BodyKind, Physics, Pulse, Renderer, SceneDirector, Visual};
use crate::assets::{Anim, Texture};
use crate::scene::SceneKey;
use crate::sim::bounds::Bounds;
use crate::sim::collision::{Contact, ContactKind};
use crate::sim::state::{EntityId, Group, Tint};

/// Rebounds slower than this settle instead of bouncing
const SETTLE_SPEED: f32 = 1.0;

/// A simulated body
#[derive(Debug, Clone)]
pub struct Body {
    pub group: Group,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_extents: Vec2,
    pub bounce: Vec2,
    pub collide_world_bounds: bool,
    pub enabled: bool,
    pub grounded: bool,
}

impl Body {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.half_extents)
    }

    fn land(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.half_extents.y;
        let rebound = -self.vel.y * self.bounce.y;
        self.vel.y = if rebound.abs() < SETTLE_SPEED { 0.0 } else { rebound };
        self.grounded = true;
    }
}

/// Minimal arcade physics
#[derive(Debug, Clone)]
pub struct HeadlessPhysics {
    bodies: BTreeMap<EntityId, Body>,
    overlaps: Vec<(Group, Group)>,
    colliders: Vec<(Group, Group)>,
    paused: bool,
    gravity: f32,
    world_size: Vec2,
}

impl HeadlessPhysics {
    pub fn new(world_size: Vec2, gravity: f32) -> Self {
        Self {
            bodies: BTreeMap::new(),
            overlaps: Vec::new(),
            colliders: Vec::new(),
            paused: false,
            gravity,
            world_size,
        }
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn velocity(&self, id: EntityId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.vel)
    }

    pub fn is_enabled(&self, id: EntityId) -> bool {
        self.bodies.get(&id).is_some_and(|b| b.enabled)
    }

    pub fn has_overlap(&self, a: Group, b: Group) -> bool {
        self.overlaps.iter().any(|&p| same_pair(p, (a, b)))
    }

    pub fn has_collider(&self, a: Group, b: Group) -> bool {
        self.colliders.iter().any(|&p| same_pair(p, (a, b)))
    }

    /// Force the grounded flag until the next step recomputes it
    pub fn set_grounded(&mut self, id: EntityId, grounded: bool) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.grounded = grounded;
        }
    }

    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = pos;
        }
    }

    /// Advance the simulation and report contacts between registered pairs.
    /// Nothing moves and no contacts are reported while paused.
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        if self.paused {
            return Vec::new();
        }

        let platforms: Vec<(Group, Bounds)> = self
            .bodies
            .values()
            .filter(|b| b.enabled && b.kind == BodyKind::Static)
            .map(|b| (b.group, b.bounds()))
            .collect();

        for body in self.bodies.values_mut() {
            if !body.enabled || body.kind == BodyKind::Static {
                continue;
            }

            let prev_bottom = body.pos.y + body.half_extents.y;
            body.vel.y += self.gravity * dt;
            body.pos += body.vel * dt;
            body.grounded = false;

            for (group, surface) in &platforms {
                let solid = self.colliders.iter().any(|&p| same_pair(p, (body.group, *group)));
                let top = surface.min().y;
                if solid && body.vel.y >= 0.0 && prev_bottom <= top + 0.5 && body.bounds().overlaps(surface) {
                    body.land(top);
                }
            }

            if body.collide_world_bounds {
                contain(body, self.world_size);
            }
        }

        self.contacts()
    }

    fn contacts(&self) -> Vec<Contact> {
        let pairs = self
            .overlaps
            .iter()
            .map(|&p| (ContactKind::Overlap, p))
            .chain(self.colliders.iter().map(|&p| (ContactKind::Collide, p)));

        let mut contacts = Vec::new();
        for (kind, (ga, gb)) in pairs {
            for (&a, body_a) in self.bodies.iter().filter(|(_, b)| movable(b, ga)) {
                for (&b, body_b) in self.bodies.iter().filter(|(_, b)| movable(b, gb)) {
                    if a != b && body_a.bounds().overlaps(&body_b.bounds()) {
                        contacts.push(Contact { kind, a, b });
                    }
                }
            }
        }
        contacts
    }
}

fn movable(body: &Body, group: Group) -> bool {
    body.enabled && body.group == group && body.kind == BodyKind::Dynamic
}

fn same_pair(p: (Group, Group), q: (Group, Group)) -> bool {
    p == q || (p.0 == q.1 && p.1 == q.0)
}

fn contain(body: &mut Body, world: Vec2) {
    let h = body.half_extents;
    if body.pos.x - h.x < 0.0 {
        body.pos.x = h.x;
        body.vel.x = -body.vel.x * body.bounce.x;
    } else if body.pos.x + h.x > world.x {
        body.pos.x = world.x - h.x;
        body.vel.x = -body.vel.x * body.bounce.x;
    }
    if body.pos.y - h.y < 0.0 {
        body.pos.y = h.y;
        body.vel.y = -body.vel.y * body.bounce.y;
    } else if body.pos.y + h.y > world.y {
        body.land(world.y);
    }
}

impl Physics for HeadlessPhysics {
    fn add_body(&mut self, id: EntityId, desc: BodyDesc) {
        self.bodies.insert(
            id,
            Body {
                group: desc.group,
                kind: desc.kind,
                pos: desc.pos,
                vel: desc.velocity,
                half_extents: desc.half_extents,
                bounce: desc.bounce,
                collide_world_bounds: desc.collide_world_bounds,
                enabled: true,
                grounded: false,
            },
        );
    }

    fn add_overlap(&mut self, a: Group, b: Group) {
        self.overlaps.push((a, b));
    }

    fn add_collider(&mut self, a: Group, b: Group) {
        self.colliders.push((a, b));
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_grounded(&self, id: EntityId) -> bool {
        self.bodies.get(&id).is_some_and(|b| b.enabled && b.grounded)
    }

    fn position(&self, id: EntityId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.pos)
    }

    fn set_velocity_x(&mut self, id: EntityId, vx: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.vel.x = vx;
        }
    }

    fn set_velocity_y(&mut self, id: EntityId, vy: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.vel.y = vy;
        }
    }

    fn disable_body(&mut self, id: EntityId) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.enabled = false;
            body.grounded = false;
        }
    }

    fn enable_body(&mut self, id: EntityId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.enabled = true;
            body.pos = pos;
            body.vel = Vec2::ZERO;
        }
    }
}

/// Last known render state of an entity
#[derive(Debug, Clone, Default)]
pub struct RenderedEntity {
    pub texture: Option<Texture>,
    pub text: Option<String>,
    pub pos: Vec2,
    pub scale: f32,
    pub depth: i32,
    pub visible: bool,
    pub tint: Tint,
    /// Color the tint resolves to
    pub color: u32,
    pub anim: Option<Anim>,
    pub pulse: Option<Pulse>,
}

/// Renderer that only remembers what it was told
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    entities: BTreeMap<EntityId, RenderedEntity>,
    /// Count of `start_pulse` calls, across all entities
    pub pulses_started: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: EntityId) -> Option<&RenderedEntity> {
        self.entities.get(&id)
    }

    pub fn tint(&self, id: EntityId) -> Tint {
        self.entities.get(&id).map(|e| e.tint).unwrap_or_default()
    }

    /// Last color drawn for `id`
    pub fn color(&self, id: EntityId) -> Option<u32> {
        self.entities.get(&id).map(|e| e.color)
    }

    pub fn is_visible(&self, id: EntityId) -> bool {
        self.entities.get(&id).is_some_and(|e| e.visible)
    }

    pub fn text(&self, id: EntityId) -> Option<&str> {
        self.entities.get(&id).and_then(|e| e.text.as_deref())
    }

    fn entry(&mut self, id: EntityId) -> &mut RenderedEntity {
        self.entities.entry(id).or_default()
    }
}

impl Renderer for RecordingRenderer {
    fn spawn(&mut self, id: EntityId, visual: Visual) {
        self.entities.insert(
            id,
            RenderedEntity {
                texture: Some(visual.texture),
                pos: visual.pos,
                scale: visual.scale,
                depth: visual.depth,
                visible: visual.visible,
                color: Tint::Normal.rgb(),
                ..Default::default()
            },
        );
    }

    fn spawn_text(&mut self, id: EntityId, pos: Vec2, text: &str) {
        self.entities.insert(
            id,
            RenderedEntity {
                text: Some(text.to_string()),
                pos,
                scale: 1.0,
                visible: true,
                color: Tint::Normal.rgb(),
                ..Default::default()
            },
        );
    }

    fn set_text(&mut self, id: EntityId, text: &str) {
        self.entry(id).text = Some(text.to_string());
    }

    fn set_visible(&mut self, id: EntityId, visible: bool) {
        self.entry(id).visible = visible;
    }

    fn set_texture(&mut self, id: EntityId, texture: Texture) {
        self.entry(id).texture = Some(texture);
    }

    fn set_tint(&mut self, id: EntityId, tint: Tint) {
        let entity = self.entry(id);
        entity.tint = tint;
        entity.color = tint.rgb();
    }

    fn play_anim(&mut self, id: EntityId, anim: Anim) {
        self.entry(id).anim = Some(anim);
    }

    fn start_pulse(&mut self, id: EntityId, pulse: Pulse) {
        self.entry(id).pulse = Some(pulse);
        self.pulses_started += 1;
    }
}

/// Scene requests waiting for the frame boundary
#[derive(Debug, Clone, Default)]
pub struct SceneQueue {
    queue: Vec<SceneKey>,
}

impl SceneQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Requests so far, oldest first
    pub fn requested(&self) -> &[SceneKey] {
        &self.queue
    }

    /// Take every queued request, leaving the queue empty
    pub fn take(&mut self) -> Vec<SceneKey> {
        std::mem::take(&mut self.queue)
    }
}

impl SceneDirector for SceneQueue {
    fn request(&mut self, scene: SceneKey) {
        self.queue.push(scene);
    }
}
