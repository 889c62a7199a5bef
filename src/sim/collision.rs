//! Collision event routing
//!
//! The physics collaborator calls `Level::on_contact` from inside its
//! resolution pass. Handlers run immediately, so a star switched off here is
//! already off for the next contact in the same pass.

use serde::{Deserialize, Serialize};

use super::Level;
use super::events::{EventKind, Handler};
use super::state::{EntityId, Group};
use crate::platform::Host;

/// How two bodies met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Overlap,
    Collide,
}

impl From<ContactKind> for EventKind {
    fn from(kind: ContactKind) -> Self {
        match kind {
            ContactKind::Overlap => EventKind::Overlap,
            ContactKind::Collide => EventKind::Collide,
        }
    }
}

/// A contact between two bodies reported by the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub a: EntityId,
    pub b: EntityId,
}

/// What collecting a star led to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PickupOutcome {
    pub score: u32,
    /// The scroll unlocked on this pickup
    pub unlocked: bool,
    /// This was the last active star and the set came back
    pub respawned: bool,
    /// Bomb released because of the respawn
    pub hazard: Option<EntityId>,
}

impl Level {
    /// Which physics group an entity belongs to
    pub fn group_of(&self, id: EntityId) -> Option<Group> {
        if id == self.player.id() {
            Some(Group::Player)
        } else if self.pickups.contains(id) {
            Some(Group::Pickups)
        } else if self.hazards.contains(id) {
            Some(Group::Hazards)
        } else if self.platforms.contains(&id) {
            Some(Group::Platforms)
        } else {
            None
        }
    }

    /// Route a contact through the registration table. Returns true if a
    /// handler ran.
    pub fn on_contact(&mut self, contact: Contact, host: &mut Host<'_>) -> bool {
        let (Some(ga), Some(gb)) = (self.group_of(contact.a), self.group_of(contact.b)) else {
            return false;
        };
        let Some((handler, swapped)) = self.handlers.resolve_pair(contact.kind.into(), ga, gb) else {
            return false;
        };
        let (first, second) = if swapped {
            (contact.b, contact.a)
        } else {
            (contact.a, contact.b)
        };

        match handler {
            Handler::CollectPickup => self.on_pickup_collected(second, host).is_some(),
            Handler::HitHazard => self.on_hazard_contact(first, second, host),
            Handler::ShowDetail | Handler::HideDetail => false,
        }
    }

    /// The player touched a star. `None` if the star was already collected.
    pub fn on_pickup_collected(&mut self, pickup: EntityId, host: &mut Host<'_>) -> Option<PickupOutcome> {
        if !self.pickups.deactivate(pickup, host) {
            return None;
        }

        let score = self.score.add_pickup();
        host.render.set_text(self.score_text, &self.score.label());

        // The Locked check inside unlock() keeps this to one unlock per level
        let unlocked = self.score.has_reached_threshold() && self.reveal.unlock(host);

        let mut outcome = PickupOutcome {
            score,
            unlocked,
            ..Default::default()
        };

        if self.pickups.active_count() == 0 {
            self.pickups.respawn_all(host);
            outcome.respawned = true;

            let player_x = self
                .player
                .position(host)
                .map_or(self.settings.player.spawn.x, |p| p.x);
            let id = self.ids.next_entity_id();
            self.hazards.spawn(id, player_x, &mut self.rng, host);
            outcome.hazard = Some(id);
        }

        Some(outcome)
    }

    /// The player touched a bomb
    pub fn on_hazard_contact(&mut self, player: EntityId, hazard: EntityId, host: &mut Host<'_>) -> bool {
        if player != self.player.id() || !self.hazards.contains(hazard) {
            return false;
        }
        if !self.outcome.on_hazard_contact(&mut self.player, &mut self.timers, host) {
            return false;
        }
        self.input.reset(&mut self.timers);
        true
    }
}
