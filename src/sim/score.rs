//! Score accounting

use serde::{Deserialize, Serialize};

use crate::settings::ScoringTuning;

/// Score state. Only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    /// Pickups collected over the whole level, across respawns
    pub collected: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTracker {
    state: ScoreState,
    points_per_pickup: u32,
    unlock_threshold: u32,
}

impl ScoreTracker {
    pub fn new(scoring: &ScoringTuning) -> Self {
        Self {
            state: ScoreState::default(),
            points_per_pickup: scoring.points_per_pickup,
            unlock_threshold: scoring.unlock_threshold,
        }
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Credit one pickup and return the new score
    pub fn add_pickup(&mut self) -> u32 {
        self.state.collected += 1;
        self.state.score = self.state.score.saturating_add(self.points_per_pickup);
        self.state.score
    }

    /// True once the score is at or past the unlock threshold
    pub fn has_reached_threshold(&self) -> bool {
        self.state.score >= self.unlock_threshold
    }

    /// HUD text
    pub fn label(&self) -> String {
        format!("Score: {}", self.state.score)
    }
}
