//! Opponent controller
//!
//! Tracks the ball with a deliberately imperfect heuristic: it only re-reads
//! the ball every `reaction_time` seconds, adds prediction noise when it does,
//! jitters its aim every tick, and moves at a capped speed. All of these knobs
//! are derived from a single difficulty value.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DIFFICULTY;

pub const MIN_DIFFICULTY: f32 = 0.1;
pub const MAX_DIFFICULTY: f32 = 1.0;

/// Scripted opponent state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opponent {
    difficulty: f32,
    /// Max paddle travel (units/s)
    speed: f32,
    /// 0.5 (sloppy) to 1.0 (exact)
    prediction_accuracy: f32,
    /// Seconds between ball reads
    reaction_time: f32,
    /// Time since the last read
    elapsed: f32,
    /// Ball y from the last read
    predicted_y: f32,
    /// Predictions are clamped to ±this
    prediction_limit: f32,
    /// Number of reads taken so far
    reactions: u64,
}

impl Default for Opponent {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY, crate::lane_limit(crate::consts::FIELD_HEIGHT))
    }
}

impl Opponent {
    pub fn new(difficulty: f32, prediction_limit: f32) -> Self {
        let mut opponent = Self {
            difficulty: 0.0,
            speed: 0.0,
            prediction_accuracy: 0.0,
            reaction_time: 0.0,
            elapsed: 0.0,
            predicted_y: 0.0,
            prediction_limit: prediction_limit.max(0.0),
            reactions: 0,
        };
        opponent.set_difficulty(difficulty);
        opponent
    }

    /// Clamp to [0.1, 1] and rederive speed, accuracy and reaction time
    pub fn set_difficulty(&mut self, difficulty: f32) {
        let difficulty = if difficulty.is_nan() {
            DEFAULT_DIFFICULTY
        } else {
            difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
        };
        self.difficulty = difficulty;
        self.speed = 2.0 + difficulty * 6.0;
        self.prediction_accuracy = 0.5 + difficulty * 0.5;
        self.reaction_time = 0.3 - difficulty * 0.2;
        log::debug!(
            "Opponent difficulty {:.2}: speed={:.2} accuracy={:.2} reaction={:.3}s",
            self.difficulty,
            self.speed,
            self.prediction_accuracy,
            self.reaction_time
        );
    }

    /// Next target y for the opponent paddle (unclamped; the caller clamps)
    pub fn compute_move<R: Rng + ?Sized>(
        &mut self,
        ball_pos: Vec3,
        paddle_pos: Vec3,
        dt: f32,
        rng: &mut R,
    ) -> f32 {
        let dt = dt.max(0.0);
        self.elapsed += dt;

        if self.elapsed >= self.reaction_time {
            self.predict(ball_pos.y, rng);
            self.elapsed = 0.0;
        }

        let jitter = (rng.random::<f32>() - 0.5) * (2.0 - self.difficulty * 2.0);
        let target = self.predicted_y + jitter;

        let current = paddle_pos.y;
        let difference = target - current;
        let max_move = self.speed * dt;

        if difference.abs() <= max_move {
            target
        } else {
            current + difference.signum() * max_move
        }
    }

    fn predict<R: Rng + ?Sized>(&mut self, ball_y: f32, rng: &mut R) {
        let noise = (1.0 - self.prediction_accuracy) * (rng.random::<f32>() - 0.5) * 4.0;
        self.predicted_y = (ball_y + noise).clamp(-self.prediction_limit, self.prediction_limit);
        self.reactions += 1;
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn prediction_accuracy(&self) -> f32 {
        self.prediction_accuracy
    }

    pub fn reaction_time(&self) -> f32 {
        self.reaction_time
    }

    pub fn predicted_y(&self) -> f32 {
        self.predicted_y
    }

    pub fn reactions(&self) -> u64 {
        self.reactions
    }
}
