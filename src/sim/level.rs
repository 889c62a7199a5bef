//! The level
//!
//! Plain state holder with explicit lifecycle hooks. The frame driver calls
//! `on_enter` once, then `on_frame` every frame, `on_pointer` for every
//! pointer event, and the physics collaborator calls `on_contact` during its
//! resolution pass. `on_exit` drops anything still scheduled.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::{EventKind, Handler, HandlerTable, Target};
use super::hazard::HazardSpawner;
use super::input::{FrameIntent, InputArbiter, KeyboardState, PointerEvent, TouchInputState};
use super::outcome::{LevelOutcomeController, LevelPhase};
use super::pickups::PickupSet;
use super::player::PlayerController;
use super::reveal::{RevealSequencer, RevealState};
use super::schedule::{Deferred, Scheduler};
use super::score::{ScoreState, ScoreTracker};
use super::state::{EntityAllocator, EntityId, Group};
use crate::assets::Texture;
use crate::platform::{BodyDesc, Host, Visual};
use crate::settings::Settings;

/// Where the score text sits
const SCORE_TEXT_POS: Vec2 = Vec2::new(16.0, 16.0);

pub struct Level {
    pub(super) settings: Settings,
    pub(super) ids: EntityAllocator,
    pub(super) rng: Pcg32,
    pub(super) timers: Scheduler<Deferred>,
    pub(super) handlers: HandlerTable,
    pub(super) input: InputArbiter,
    pub(super) player: PlayerController,
    pub(super) score: ScoreTracker,
    pub(super) score_text: EntityId,
    pub(super) reveal: RevealSequencer,
    pub(super) pickups: PickupSet,
    pub(super) hazards: HazardSpawner,
    pub(super) outcome: LevelOutcomeController,
    pub(super) platforms: Vec<EntityId>,
    frames: u64,
}

impl Level {
    /// Build the level and register its collision pairs and handlers
    pub fn on_enter(settings: Settings, host: &mut Host<'_>) -> Self {
        let mut ids = EntityAllocator::default();
        let mut rng = Pcg32::seed_from_u64(settings.seed);

        let sky = ids.next_entity_id();
        host.render.spawn(sky, Visual::new(Texture::Sky, settings.world_size / 2.0));

        let platforms: Vec<EntityId> = settings
            .platforms
            .iter()
            .map(|platform| {
                let id = ids.next_entity_id();
                host.physics
                    .add_body(id, BodyDesc::fixed(Group::Platforms, platform.pos, platform.half_extents()));
                host.render
                    .spawn(id, Visual::new(Texture::Ground, platform.pos).scaled(platform.scale));
                id
            })
            .collect();

        let player = PlayerController::spawn(ids.next_entity_id(), &settings.player, host);
        host.physics.add_collider(Group::Player, Group::Platforms);

        let score = ScoreTracker::new(&settings.scoring);
        let score_text = ids.next_entity_id();
        host.render.spawn_text(score_text, SCORE_TEXT_POS, &score.label());

        let marker = ids.next_entity_id();
        let detail = ids.next_entity_id();
        let reveal = RevealSequencer::spawn(marker, detail, &settings.reveal, host);

        let pickups = PickupSet::spawn(&mut ids, &settings.pickups, &mut rng, host);
        host.physics.add_collider(Group::Pickups, Group::Platforms);
        host.physics.add_overlap(Group::Player, Group::Pickups);

        let hazards = HazardSpawner::new(&settings.hazard, settings.world_size.x);
        host.physics.add_collider(Group::Hazards, Group::Platforms);
        host.physics.add_collider(Group::Player, Group::Hazards);

        let mut handlers = HandlerTable::new();
        handlers.register(EventKind::PointerDown, Target::Entity(marker), Handler::ShowDetail);
        handlers.register(EventKind::PointerDown, Target::Entity(detail), Handler::HideDetail);
        handlers.register(
            EventKind::Overlap,
            Target::Pair(Group::Player, Group::Pickups),
            Handler::CollectPickup,
        );
        handlers.register(
            EventKind::Collide,
            Target::Pair(Group::Player, Group::Hazards),
            Handler::HitHazard,
        );

        log::info!(
            "Level ready: {} stars, unlock at {} points, seed {}",
            pickups.len(),
            settings.scoring.unlock_threshold,
            settings.seed
        );

        Self {
            input: InputArbiter::new(settings.world_size.x, settings.long_press_ms),
            outcome: LevelOutcomeController::new(settings.game_over_delay_ms),
            settings,
            ids,
            rng,
            timers: Scheduler::new(),
            handlers,
            player,
            score,
            score_text,
            reveal,
            pickups,
            hazards,
            platforms,
            frames: 0,
        }
    }

    /// Advance one frame: fire due timers, then arbitrate input and move the
    /// player. Returns the intent that was applied; nothing is applied while
    /// the world is paused or the level has failed, and the player reads as
    /// idle for those frames.
    pub fn on_frame(&mut self, dt_ms: u64, keys: KeyboardState, host: &mut Host<'_>) -> FrameIntent {
        self.frames += 1;

        for action in self.timers.advance(dt_ms) {
            match action {
                Deferred::LongPress => self.input.long_press_elapsed(),
                Deferred::StartScene(scene) => {
                    log::info!("Requesting scene {}", scene.as_str());
                    host.scenes.request(scene);
                }
            }
        }

        let grounded = self.player.is_grounded(host);
        let intent = self.input.arbitrate(keys, grounded);
        if self.outcome.has_failed() || host.physics.is_paused() {
            self.player.halt();
            return FrameIntent::default();
        }

        self.player.apply(intent, host);
        intent
    }

    /// Handle a pointer event. Presses on the scroll or the shown letter go
    /// to their handlers and never count as movement gestures.
    pub fn on_pointer(&mut self, event: PointerEvent, host: &mut Host<'_>) {
        if self.outcome.has_failed() {
            return;
        }

        match event {
            PointerEvent::Down { pos, time_ms } => {
                if let Some(target) = self.reveal.hit_test(pos) {
                    if let Some(handler) = self.handlers.resolve(EventKind::PointerDown, Target::Entity(target)) {
                        self.dispatch(handler, host);
                    }
                    return;
                }
                self.input.pointer_down(pos, time_ms, &mut self.timers);
            }
            PointerEvent::Up { time_ms, .. } => {
                self.input.pointer_up(time_ms, &mut self.timers);
            }
            PointerEvent::Leave => self.input.pointer_leave(&mut self.timers),
            PointerEvent::Move { .. } => {}
        }
    }

    fn dispatch(&mut self, handler: Handler, host: &mut Host<'_>) {
        match handler {
            Handler::ShowDetail => {
                self.reveal.show_detail(&mut self.player, host);
            }
            Handler::HideDetail => {
                self.reveal.hide_detail(&mut self.player, host);
            }
            Handler::CollectPickup | Handler::HitHazard => {
                log::warn!("{handler:?} is a contact handler, not a pointer handler");
            }
        }
    }

    /// Tear down: cancel every pending timer, including a pending game-over
    /// transition.
    pub fn on_exit(&mut self) {
        self.input.reset(&mut self.timers);
        self.timers.clear();
        log::info!("Level exited after {} frames", self.frames);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> ScoreState {
        self.score.state()
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal.state()
    }

    pub fn phase(&self) -> LevelPhase {
        self.outcome.phase()
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn pickups(&self) -> &PickupSet {
        &self.pickups
    }

    pub fn hazards(&self) -> &HazardSpawner {
        &self.hazards
    }

    pub fn touch(&self) -> &TouchInputState {
        self.input.touch()
    }

    pub fn marker(&self) -> EntityId {
        self.reveal.marker()
    }

    pub fn detail(&self) -> EntityId {
        self.reveal.detail()
    }

    pub fn score_text(&self) -> EntityId {
        self.score_text
    }

    pub fn platforms(&self) -> &[EntityId] {
        &self.platforms
    }

    /// Level clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// True between a bomb hit and the game-over request
    pub fn game_over_pending(&self) -> bool {
        self.outcome
            .transition()
            .is_some_and(|id| self.timers.is_pending(id))
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
