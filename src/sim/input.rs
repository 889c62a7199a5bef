//! Input arbitration
//!
//! Merges keyboard state and pointer gestures into one movement intent and a
//! jump request per frame.
//!
//! Touch rules:
//! - A press starts a long-press timer and picks a direction from the half
//!   of the screen that was touched.
//! - Once the timer fires the press counts as a held direction key.
//! - Releasing before the timer fires is a jump tap instead.
//! - Leaving the surface cancels everything without jumping.
//!
//! The keyboard is checked first, so it wins over an opposite touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::schedule::{Deferred, Scheduler, TaskId};

/// Horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Movement intent for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveIntent {
    #[default]
    Idle,
    Left,
    Right,
}

impl From<Direction> for MoveIntent {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => MoveIntent::Left,
            Direction::Right => MoveIntent::Right,
        }
    }
}

/// Cursor keys held this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyboardState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// Pointer events as delivered by the input collaborator, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { pos: Vec2, time_ms: u64 },
    Up { pos: Vec2, time_ms: u64 },
    Move { pos: Vec2 },
    Leave,
}

/// What the arbiter decided for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameIntent {
    pub movement: MoveIntent,
    /// Jump requested while grounded
    pub jump: bool,
}

/// State of the current touch gesture
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TouchInputState {
    /// `None` when no gesture is in progress
    pub direction: Option<Direction>,
    pub long_press: bool,
    pub started_at_ms: Option<u64>,
    /// Pending long-press timer
    timer: Option<TaskId>,
}

impl TouchInputState {
    /// True while a gesture is in progress
    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }
}

/// Keyboard + touch arbitration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputArbiter {
    touch: TouchInputState,
    half_width: f32,
    long_press_ms: u64,
    /// A short tap waiting for the next frame
    tap_queued: bool,
}

impl InputArbiter {
    pub fn new(screen_width: f32, long_press_ms: u64) -> Self {
        Self {
            touch: TouchInputState::default(),
            half_width: screen_width / 2.0,
            long_press_ms,
            tap_queued: false,
        }
    }

    pub fn touch(&self) -> &TouchInputState {
        &self.touch
    }

    /// A press outside the scroll and letter
    pub fn pointer_down(&mut self, pos: Vec2, time_ms: u64, timers: &mut Scheduler<Deferred>) {
        self.cancel_timer(timers);

        let direction = if pos.x < self.half_width {
            Direction::Left
        } else {
            Direction::Right
        };
        self.touch = TouchInputState {
            direction: Some(direction),
            long_press: false,
            started_at_ms: Some(time_ms),
            timer: Some(timers.schedule(self.long_press_ms, Deferred::LongPress)),
        };
        log::debug!("Touch down at {pos} -> {direction:?}");
    }

    /// The long-press timer fired
    pub fn long_press_elapsed(&mut self) {
        self.touch.timer = None;
        if self.touch.is_active() {
            self.touch.long_press = true;
            log::debug!("Long press {:?}", self.touch.direction);
        }
    }

    /// Release at `time_ms`. Returns true if the release was a jump tap.
    ///
    /// The hold time is measured from the event timestamps, so a release
    /// that lands past the threshold before the timer has fired is still a
    /// long press.
    pub fn pointer_up(&mut self, time_ms: u64, timers: &mut Scheduler<Deferred>) -> bool {
        if !self.touch.is_active() {
            return false;
        }

        let held_ms = self
            .touch
            .started_at_ms
            .map_or(0, |start| time_ms.saturating_sub(start));
        let tap = !self.touch.long_press && held_ms < self.long_press_ms;
        self.reset(timers);
        if tap {
            self.tap_queued = true;
            log::debug!("Tap -> jump");
        }
        tap
    }

    /// The pointer left the surface: cancel without jumping
    pub fn pointer_leave(&mut self, timers: &mut Scheduler<Deferred>) {
        self.reset(timers);
    }

    /// Clear the gesture and its timer
    pub fn reset(&mut self, timers: &mut Scheduler<Deferred>) {
        self.cancel_timer(timers);
        self.touch = TouchInputState::default();
    }

    /// Decide this frame's intent. A queued tap is consumed whether or not it
    /// can jump.
    pub fn arbitrate(&mut self, keys: KeyboardState, grounded: bool) -> FrameIntent {
        let movement = if keys.left {
            MoveIntent::Left
        } else if keys.right {
            MoveIntent::Right
        } else if self.touch.long_press {
            self.touch.direction.map(MoveIntent::from).unwrap_or_default()
        } else {
            MoveIntent::Idle
        };

        let tapped = std::mem::take(&mut self.tap_queued);
        FrameIntent {
            movement,
            jump: (keys.up || tapped) && grounded,
        }
    }

    fn cancel_timer(&mut self, timers: &mut Scheduler<Deferred>) {
        if let Some(id) = self.touch.timer.take() {
            timers.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arbiter() -> (InputArbiter, Scheduler<Deferred>) {
        (InputArbiter::new(800.0, 200), Scheduler::new())
    }

    /// Advance the clock and feed any long-press back into the arbiter
    fn advance(input: &mut InputArbiter, timers: &mut Scheduler<Deferred>, ms: u64) {
        for action in timers.advance(ms) {
            if action == Deferred::LongPress {
                input.long_press_elapsed();
            }
        }
    }

    #[test]
    fn test_keyboard_maps_directly() {
        let (mut input, _) = arbiter();
        let left = KeyboardState {
            left: true,
            ..Default::default()
        };
        assert_eq!(input.arbitrate(left, true).movement, MoveIntent::Left);

        let right = KeyboardState {
            right: true,
            ..Default::default()
        };
        assert_eq!(input.arbitrate(right, true).movement, MoveIntent::Right);
        assert_eq!(input.arbitrate(KeyboardState::default(), true), FrameIntent::default());
    }

    #[test]
    fn test_keyboard_jump_needs_ground() {
        let (mut input, _) = arbiter();
        let up = KeyboardState {
            up: true,
            ..Default::default()
        };
        assert!(input.arbitrate(up, true).jump);
        assert!(!input.arbitrate(up, false).jump);
    }

    #[test]
    fn test_long_press_moves() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(100.0, 300.0), 0, &mut timers);

        advance(&mut input, &mut timers, 199);
        assert_eq!(input.arbitrate(KeyboardState::default(), true).movement, MoveIntent::Idle);

        advance(&mut input, &mut timers, 1);
        assert!(input.touch().long_press);
        assert_eq!(input.arbitrate(KeyboardState::default(), true).movement, MoveIntent::Left);

        // Releasing a long press does not jump
        assert!(!input.pointer_up(250, &mut timers));
        assert_eq!(input.arbitrate(KeyboardState::default(), true), FrameIntent::default());
    }

    #[test]
    fn test_right_half_touch() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(400.0, 10.0), 0, &mut timers);
        assert_eq!(input.touch().direction, Some(Direction::Right));
        assert_eq!(input.touch().started_at_ms, Some(0));
    }

    #[test]
    fn test_short_tap_jumps_once() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(600.0, 300.0), 0, &mut timers);
        advance(&mut input, &mut timers, 120);
        assert!(input.pointer_up(120, &mut timers));
        assert!(timers.is_empty());

        let intent = input.arbitrate(KeyboardState::default(), true);
        assert_eq!(intent.movement, MoveIntent::Idle);
        assert!(intent.jump);
        assert!(!input.arbitrate(KeyboardState::default(), true).jump);
    }

    #[test]
    fn test_tap_in_air_is_dropped() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(600.0, 300.0), 0, &mut timers);
        input.pointer_up(50, &mut timers);
        assert!(!input.arbitrate(KeyboardState::default(), false).jump);
        assert!(!input.arbitrate(KeyboardState::default(), true).jump);
    }

    #[test]
    fn test_leave_cancels_without_jump() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(100.0, 300.0), 0, &mut timers);
        input.pointer_leave(&mut timers);
        assert!(!input.touch().is_active());
        assert!(timers.is_empty());

        advance(&mut input, &mut timers, 500);
        assert!(!input.touch().long_press);
        assert_eq!(input.arbitrate(KeyboardState::default(), true), FrameIntent::default());
    }

    #[test]
    fn test_keyboard_beats_opposite_touch() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(100.0, 300.0), 0, &mut timers);
        advance(&mut input, &mut timers, 200);

        let right = KeyboardState {
            right: true,
            ..Default::default()
        };
        assert_eq!(input.arbitrate(right, true).movement, MoveIntent::Right);
    }

    #[test]
    fn test_up_without_gesture_is_ignored() {
        let (mut input, mut timers) = arbiter();
        assert!(!input.pointer_up(0, &mut timers));
        assert!(!input.arbitrate(KeyboardState::default(), true).jump);
    }

    #[test]
    fn test_release_past_threshold_before_timer_fires_is_not_a_tap() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(600.0, 300.0), 0, &mut timers);
        // Clock at 192 ms: the long-press timer has not fired yet
        advance(&mut input, &mut timers, 192);
        assert!(!input.touch().long_press);

        assert!(!input.pointer_up(208, &mut timers));
        assert!(timers.is_empty());
        let intent = input.arbitrate(KeyboardState::default(), true);
        assert!(!intent.jump);
        assert_eq!(intent.movement, MoveIntent::Idle);
    }

    #[test]
    fn test_release_just_under_threshold_is_a_tap() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(600.0, 300.0), 1000, &mut timers);
        assert!(input.pointer_up(1199, &mut timers));
        assert!(input.arbitrate(KeyboardState::default(), true).jump);
    }

    #[test]
    fn test_new_press_restarts_timer() {
        let (mut input, mut timers) = arbiter();
        input.pointer_down(Vec2::new(100.0, 300.0), 0, &mut timers);
        advance(&mut input, &mut timers, 150);
        input.pointer_down(Vec2::new(700.0, 300.0), 150, &mut timers);
        assert_eq!(timers.len(), 1);

        advance(&mut input, &mut timers, 100);
        assert!(!input.touch().long_press);
        advance(&mut input, &mut timers, 100);
        assert!(input.touch().long_press);
        assert_eq!(input.touch().direction, Some(Direction::Right));
    }
}
