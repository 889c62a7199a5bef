//! Event registration table
//!
//! Maps an event kind plus its target (a single entity, or a pair of physics
//! groups) to the handler the level runs for it. Filled once in
//! `Level::on_enter` and only read afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::state::{EntityId, Group};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PointerDown,
    /// Bodies overlap without separating
    Overlap,
    /// Solid bodies touched
    Collide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Entity(EntityId),
    /// Ordered pair: handlers receive the first group's entity first
    Pair(Group, Group),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handler {
    /// Scroll clicked
    ShowDetail,
    /// Letter clicked
    HideDetail,
    /// Player overlapped a star
    CollectPickup,
    /// Player touched a bomb
    HitHazard,
}

#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    entries: HashMap<(EventKind, Target), Handler>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning the one it replaced
    pub fn register(&mut self, kind: EventKind, target: Target, handler: Handler) -> Option<Handler> {
        self.entries.insert((kind, target), handler)
    }

    pub fn resolve(&self, kind: EventKind, target: Target) -> Option<Handler> {
        self.entries.get(&(kind, target)).copied()
    }

    /// Look up a group pair in either order. The flag is true when the
    /// registration has the groups the other way round, so the caller must
    /// swap its entities.
    pub fn resolve_pair(&self, kind: EventKind, a: Group, b: Group) -> Option<(Handler, bool)> {
        self.resolve(kind, Target::Pair(a, b))
            .map(|h| (h, false))
            .or_else(|| self.resolve(kind, Target::Pair(b, a)).map(|h| (h, true)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_entity() {
        let mut table = HandlerTable::new();
        let scroll = EntityId(5);
        assert_eq!(table.register(EventKind::PointerDown, Target::Entity(scroll), Handler::ShowDetail), None);
        assert_eq!(
            table.resolve(EventKind::PointerDown, Target::Entity(scroll)),
            Some(Handler::ShowDetail)
        );
        assert_eq!(table.resolve(EventKind::PointerDown, Target::Entity(EntityId(6))), None);
        assert_eq!(table.resolve(EventKind::Overlap, Target::Entity(scroll)), None);
    }

    #[test]
    fn test_resolve_pair_either_order() {
        let mut table = HandlerTable::new();
        table.register(
            EventKind::Overlap,
            Target::Pair(Group::Player, Group::Pickups),
            Handler::CollectPickup,
        );
        assert_eq!(
            table.resolve_pair(EventKind::Overlap, Group::Player, Group::Pickups),
            Some((Handler::CollectPickup, false))
        );
        assert_eq!(
            table.resolve_pair(EventKind::Overlap, Group::Pickups, Group::Player),
            Some((Handler::CollectPickup, true))
        );
        assert_eq!(table.resolve_pair(EventKind::Collide, Group::Player, Group::Pickups), None);
    }
}
