//! Scenes
//!
//! The level itself lives in `sim::Level`. This module names the scenes and
//! holds the game-over screen, which only offers a retry button.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::Texture;
use crate::platform::{Host, Visual};
use crate::sim::bounds::Bounds;
use crate::sim::input::PointerEvent;
use crate::sim::state::{EntityAllocator, EntityId, Tint};

/// Scene identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKey {
    /// The platformer level
    Game,
    /// Failure screen shown after touching a bomb
    GameOver,
}

impl SceneKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKey::Game => "Game",
            SceneKey::GameOver => "GameOver",
        }
    }
}

/// Size of the "TRY AGAIN" button including padding
const RETRY_BUTTON_SIZE: Vec2 = Vec2::new(200.0, 56.0);

/// The game-over screen
#[derive(Debug, Clone)]
pub struct GameOverScreen {
    pub title: EntityId,
    pub retry: EntityId,
    retry_bounds: Bounds,
    hovered: bool,
}

impl GameOverScreen {
    /// Build the screen for a world of the given size
    pub fn on_enter(world_size: Vec2, host: &mut Host<'_>) -> Self {
        let mut ids = EntityAllocator::default();
        let center_x = world_size.x / 2.0;

        let background = ids.next_entity_id();
        host.render.spawn(background, Visual::new(Texture::Background, world_size / 2.0));

        let title = ids.next_entity_id();
        host.render
            .spawn_text(title, Vec2::new(center_x, world_size.y * 0.39), "Game Over");

        let retry = ids.next_entity_id();
        let retry_pos = Vec2::new(center_x, world_size.y * 0.59);
        host.render.spawn_text(retry, retry_pos, "TRY AGAIN");

        log::info!("Entered {}", SceneKey::GameOver.as_str());

        Self {
            title,
            retry,
            retry_bounds: Bounds::from_sprite(retry_pos, RETRY_BUTTON_SIZE, 1.0),
            hovered: false,
        }
    }

    /// Center of the retry button
    pub fn retry_center(&self) -> Vec2 {
        self.retry_bounds.center
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Handle a pointer event; a press on the button restarts the level
    pub fn on_pointer(&mut self, event: PointerEvent, host: &mut Host<'_>) {
        match event {
            PointerEvent::Move { pos } => self.set_hovered(self.retry_bounds.contains_point(pos), host),
            PointerEvent::Leave => self.set_hovered(false, host),
            PointerEvent::Down { pos, .. } => {
                if self.retry_bounds.contains_point(pos) {
                    log::info!("Retry pressed");
                    host.scenes.request(SceneKey::Game);
                }
            }
            PointerEvent::Up { .. } => {}
        }
    }

    fn set_hovered(&mut self, hovered: bool, host: &mut Host<'_>) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        let tint = if hovered { Tint::Highlight } else { Tint::Normal };
        host.render.set_tint(self.retry, tint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{HeadlessPhysics, RecordingRenderer, SceneQueue};

    #[test]
    fn test_retry_requests_game() {
        let world = Vec2::new(800.0, 600.0);
        let mut physics = HeadlessPhysics::new(world, 300.0);
        let mut render = RecordingRenderer::new();
        let mut scenes = SceneQueue::new();

        let mut screen = {
            let mut host = Host::new(&mut physics, &mut render, &mut scenes);
            let mut screen = GameOverScreen::on_enter(world, &mut host);
            screen.on_pointer(
                PointerEvent::Down {
                    pos: Vec2::new(10.0, 10.0),
                    time_ms: 0,
                },
                &mut host,
            );
            screen
        };
        assert!(scenes.is_empty());

        let mut host = Host::new(&mut physics, &mut render, &mut scenes);
        screen.on_pointer(
            PointerEvent::Down {
                pos: Vec2::new(400.0, 354.0),
                time_ms: 0,
            },
            &mut host,
        );
        assert_eq!(scenes.requested(), &[SceneKey::Game]);
    }

    #[test]
    fn test_hover_highlights_button() {
        let world = Vec2::new(800.0, 600.0);
        let mut physics = HeadlessPhysics::new(world, 300.0);
        let mut render = RecordingRenderer::new();
        let mut scenes = SceneQueue::new();
        let mut host = Host::new(&mut physics, &mut render, &mut scenes);

        let mut screen = GameOverScreen::on_enter(world, &mut host);
        let retry = screen.retry;
        screen.on_pointer(
            PointerEvent::Move {
                pos: Vec2::new(400.0, 354.0),
            },
            &mut host,
        );
        assert!(screen.is_hovered());
        screen.on_pointer(PointerEvent::Leave, &mut host);
        assert!(!screen.is_hovered());
        assert_eq!(render.tint(retry), Tint::Normal);
        assert_eq!(render.get(retry).and_then(|e| e.text.as_deref()), Some("TRY AGAIN"));
    }
}
