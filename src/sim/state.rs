//! Shared entity types
//!
//! Identities and visual states used across the gameplay components.

use serde::{Deserialize, Serialize};

/// Identity shared by an entity's physics body and its visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Physics groups the level registers collision pairs between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Platforms,
    Player,
    /// Stars
    Pickups,
    /// Bombs
    Hazards,
}

/// Player tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tint {
    #[default]
    Normal,
    /// Gray while the letter is open
    Paused,
    /// Red after touching a bomb
    Hit,
    /// Yellow hover highlight on buttons
    Highlight,
}

impl Tint {
    /// RGB color multiplied into the sprite
    pub fn rgb(&self) -> u32 {
        match self {
            Tint::Normal => 0xffffff,
            Tint::Paused => 0x888888,
            Tint::Hit => 0xff0000,
            Tint::Highlight => 0xffff00,
        }
    }
}

/// Hands out entity IDs in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityAllocator {
    next_id: u32,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl EntityAllocator {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut ids = EntityAllocator::default();
        assert_eq!(ids.next_entity_id(), EntityId(1));
        assert_eq!(ids.next_entity_id(), EntityId(2));
    }

    #[test]
    fn test_tint_colors() {
        assert_eq!(Tint::default(), Tint::Normal);
        assert_eq!(Tint::Paused.rgb(), 0x888888);
        assert_eq!(Tint::Hit.rgb(), 0xff0000);
    }
}
