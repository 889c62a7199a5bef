//! Frame-driven one-shot timers
//!
//! Tasks are scheduled against the level clock, which only moves when the
//! frame driver advances it. A task fires at most once and can be cancelled
//! until it does.

use serde::{Deserialize, Serialize};

use crate::scene::SceneKey;

/// Deferred actions the level schedules on its clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// The touch has been held past the long-press threshold
    LongPress,
    /// Switch to another scene
    StartScene(SceneKey),
}

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Task<A> {
    id: TaskId,
    due_ms: u64,
    action: A,
}

/// One-shot deferred actions keyed by due time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler<A> {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// Current clock time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `action` to fire once `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, action: A) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            action,
        });
        id
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Advance the clock and take the actions that came due, earliest first.
    /// Tasks due at the same time fire in scheduling order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<A> {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
        let now = self.now_ms;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|t| t.due_ms <= now);
        self.tasks = pending;

        due.sort_by_key(|t| (t.due_ms, t.id.0));
        due.into_iter().map(|t| t.action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut timers = Scheduler::new();
        timers.schedule(2000, "game over");

        assert!(timers.advance(1999).is_empty());
        assert_eq!(timers.advance(1), vec!["game over"]);
        assert!(timers.advance(5000).is_empty());
        assert_eq!(timers.now_ms(), 7000);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Scheduler::new();
        let id = timers.schedule(200, 1);
        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(500).is_empty());
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut timers = Scheduler::new();
        let id = timers.schedule(10, ());
        assert_eq!(timers.advance(10).len(), 1);
        assert!(!timers.is_pending(id));
        assert!(!timers.cancel(id));
    }

    #[test]
    fn test_due_order() {
        let mut timers = Scheduler::new();
        timers.schedule(30, 'c');
        timers.schedule(10, 'a');
        timers.schedule(10, 'b');
        assert_eq!(timers.advance(100), vec!['a', 'b', 'c']);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut timers = Scheduler::new();
        timers.advance(1000);
        timers.schedule(200, ());
        assert!(timers.advance(199).is_empty());
        assert_eq!(timers.advance(1).len(), 1);
    }
}
