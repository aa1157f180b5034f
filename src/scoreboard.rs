//! Score and high score tracking
//!
//! The high score lives for the lifetime of the process only.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_RANK, SCORE_BASE, SCORE_STEP};

/// Points awarded for destroying an asteroid of the given rank
///
/// Smaller asteroids are worth more: rank 4 scores 25, rank 1 scores 100.
#[inline]
pub fn points_for_rank(rank: u8) -> u64 {
    assert!(
        (1..=MAX_RANK).contains(&rank),
        "asteroid rank {rank} out of range"
    );
    u64::from((SCORE_BASE - u32::from(rank)) * SCORE_STEP)
}

/// Current run score plus best score seen this session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub high_score: u64,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a kill and raise the high score if beaten. Returns the points awarded.
    pub fn award(&mut self, rank: u8) -> u64 {
        let points = points_for_rank(rank);
        self.score += points;
        self.high_score = self.high_score.max(self.score);
        points
    }

    /// Start a new run: the score resets, the high score stays
    pub fn reset_run(&mut self) {
        self.score = 0;
    }
}
