//! Scroll and letter reveal
//!
//! The scroll starts locked. Reaching the score threshold unlocks it once,
//! for good; after that, clicking the scroll opens the letter (pausing the
//! world) and clicking the letter closes it again.
//!
//! ```text
//! Locked --unlock--> Unlocked --scroll click--> DetailShown
//!                       ^                            |
//!                       +-------letter click---------+
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::player::PlayerController;
use super::state::{EntityId, Tint};
use crate::assets::Texture;
use crate::platform::{Host, Pulse, Visual};
use crate::settings::RevealLayout;

/// Draw order of the scroll and letter
const MARKER_DEPTH: i32 = 10;
const DETAIL_DEPTH: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Locked,
    Unlocked,
    DetailShown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSequencer {
    state: RevealState,
    marker: EntityId,
    detail: EntityId,
    marker_bounds: Bounds,
    detail_bounds: Bounds,
    pulse: Pulse,
}

impl RevealSequencer {
    /// Create the locked scroll and the hidden letter
    pub fn spawn(marker: EntityId, detail: EntityId, layout: &RevealLayout, host: &mut Host<'_>) -> Self {
        host.render.spawn(
            marker,
            Visual::new(Texture::Scroll, layout.marker_pos)
                .scaled(layout.marker_scale)
                .depth(MARKER_DEPTH),
        );
        host.render.spawn(
            detail,
            Visual::new(Texture::Letter, layout.detail_pos)
                .scaled(layout.detail_scale)
                .depth(DETAIL_DEPTH)
                .hidden(),
        );

        Self {
            state: RevealState::Locked,
            marker,
            detail,
            marker_bounds: Bounds::from_sprite(layout.marker_pos, layout.marker_size, layout.marker_scale),
            detail_bounds: Bounds::from_sprite(layout.detail_pos, layout.detail_size, layout.detail_scale),
            pulse: Pulse {
                to_scale: layout.pulse_scale,
                duration_ms: layout.pulse_ms,
                yoyo: true,
                repeat: None,
            },
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn marker(&self) -> EntityId {
        self.marker
    }

    pub fn detail(&self) -> EntityId {
        self.detail
    }

    /// Locked -> Unlocked. Does nothing once unlocked.
    pub fn unlock(&mut self, host: &mut Host<'_>) -> bool {
        if self.state != RevealState::Locked {
            return false;
        }
        self.state = RevealState::Unlocked;

        host.render.set_texture(self.marker, Texture::ScrollOpen);
        host.render.set_tint(self.marker, Tint::Normal);
        host.render.start_pulse(self.marker, self.pulse);
        log::info!("Scroll unlocked");
        true
    }

    /// Unlocked -> DetailShown: show the letter and freeze the world
    pub fn show_detail(&mut self, player: &mut PlayerController, host: &mut Host<'_>) -> bool {
        if self.state != RevealState::Unlocked {
            return false;
        }
        self.state = RevealState::DetailShown;

        host.render.set_visible(self.detail, true);
        host.physics.pause();
        player.set_tint(Tint::Paused, host);
        log::info!("Letter opened");
        true
    }

    /// DetailShown -> Unlocked: hide the letter and resume the world
    pub fn hide_detail(&mut self, player: &mut PlayerController, host: &mut Host<'_>) -> bool {
        if self.state != RevealState::DetailShown {
            return false;
        }
        self.state = RevealState::Unlocked;

        host.render.set_visible(self.detail, false);
        host.physics.resume();
        player.clear_tint(host);
        log::info!("Letter closed");
        true
    }

    /// Topmost reveal object under `pos`. The letter only counts while shown.
    pub fn hit_test(&self, pos: Vec2) -> Option<EntityId> {
        if self.state == RevealState::DetailShown && self.detail_bounds.contains_point(pos) {
            Some(self.detail)
        } else if self.marker_bounds.contains_point(pos) {
            Some(self.marker)
        } else {
            None
        }
    }
}
