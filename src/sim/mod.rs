//! Gameplay coordination
//!
//! All gameplay decisions live here. This module must stay deterministic:
//! - Seeded RNG only
//! - Time only advances through the frame clock
//! - Physics, rendering and scene switching go through `platform` traits

pub mod bounds;
pub mod collision;
pub mod events;
pub mod hazard;
pub mod input;
pub mod level;
pub mod outcome;
pub mod pickups;
pub mod player;
pub mod reveal;
pub mod schedule;
pub mod score;
pub mod state;

pub use bounds::Bounds;
pub use collision::{Contact, ContactKind, PickupOutcome};
pub use events::{EventKind, Handler, HandlerTable, Target};
pub use hazard::{Hazard, HazardSpawner};
pub use input::{Direction, FrameIntent, InputArbiter, KeyboardState, MoveIntent, PointerEvent, TouchInputState};
pub use level::Level;
pub use outcome::{LevelOutcomeController, LevelPhase};
pub use pickups::{Pickup, PickupSet};
pub use player::{MotionState, PlayerController};
pub use reveal::{RevealSequencer, RevealState};
pub use schedule::{Deferred, Scheduler, TaskId};
pub use score::{ScoreState, ScoreTracker};
pub use state::{EntityAllocator, EntityId, Group, Tint};
