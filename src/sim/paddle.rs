//! Paddle kinematics
//!
//! Paddles slide along a fixed lane (x) and ease toward a clamped target y.
//! The ease factor is applied once per tick, so its feel is tied to the fixed
//! 60 Hz simulation rate rather than scaled by `dt`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::clamp_lane;
use crate::consts::*;

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human player, right lane
    Player,
    /// Scripted opponent, left lane
    Opponent,
}

impl Side {
    /// Sign of the lane x coordinate (+1 right, -1 left)
    #[inline]
    pub fn lane_sign(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Side::Player => PLAYER_COLOR,
            Side::Opponent => OPPONENT_COLOR,
        }
    }
}

/// A paddle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Fixed lane coordinate
    pub x: f32,
    /// Current (eased) y
    pub y: f32,
    /// Clamped desired y
    pub target_y: f32,
    pub smoothing: f32,
    /// Visual tilt around z, follows recent movement
    pub tilt: f32,
    field_height: f32,
    initialized: bool,
}

impl Paddle {
    pub fn new(side: Side, offset: f32, field_height: f32) -> Self {
        Self {
            side,
            x: side.lane_sign() * offset,
            y: 0.0,
            target_y: 0.0,
            smoothing: PADDLE_SMOOTHING,
            tilt: 0.0,
            field_height,
            initialized: false,
        }
    }

    /// Clamp and store the target. The first call snaps the paddle there.
    pub fn set_target(&mut self, y: f32) {
        self.target_y = clamp_lane(y, self.field_height);
        if !self.initialized {
            self.y = self.target_y;
            self.initialized = true;
        }
    }

    /// Ease one tick toward the target
    pub fn advance(&mut self, _dt: f32) {
        let movement = (self.target_y - self.y) * self.smoothing;
        self.y += movement;
        self.tilt += (movement * 0.2 - self.tilt) * 0.1;
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }

    /// Lane limit for this paddle's field
    pub fn limit(&self) -> f32 {
        crate::lane_limit(self.field_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lanes() {
        let player = Paddle::new(Side::Player, PADDLE_OFFSET, FIELD_HEIGHT);
        let opponent = Paddle::new(Side::Opponent, PADDLE_OFFSET, FIELD_HEIGHT);
        assert_eq!(player.x, 5.5);
        assert_eq!(opponent.x, -5.5);
        assert_eq!(Side::Player.other(), Side::Opponent);
    }

    #[test]
    fn test_first_target_snaps() {
        let mut paddle = Paddle::new(Side::Player, PADDLE_OFFSET, FIELD_HEIGHT);
        paddle.set_target(2.0);
        assert_eq!(paddle.y, 2.0);

        // Later targets ease instead of snapping
        paddle.set_target(-2.0);
        assert_eq!(paddle.y, 2.0);
        paddle.advance(SIM_DT);
        assert!((paddle.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ease_converges() {
        let mut paddle = Paddle::new(Side::Opponent, PADDLE_OFFSET, FIELD_HEIGHT);
        paddle.set_target(0.0);
        paddle.set_target(3.0);
        for _ in 0..60 {
            paddle.advance(SIM_DT);
        }
        assert!((paddle.y - 3.0).abs() < 1e-3);
        assert!(paddle.y <= paddle.limit());
    }

    #[test]
    fn test_tilt_follows_movement() {
        let mut paddle = Paddle::new(Side::Player, PADDLE_OFFSET, FIELD_HEIGHT);
        paddle.set_target(0.0);
        paddle.set_target(3.0);
        paddle.advance(SIM_DT);
        assert!(paddle.tilt > 0.0);
    }

    proptest! {
        #[test]
        fn prop_target_within_lane(y in -1000.0f32..1000.0) {
            let mut paddle = Paddle::new(Side::Player, PADDLE_OFFSET, FIELD_HEIGHT);
            paddle.set_target(y);
            prop_assert!(paddle.target_y >= -3.0 && paddle.target_y <= 3.0);
        }

        #[test]
        fn prop_position_stays_in_bounds(targets in proptest::collection::vec(-50.0f32..50.0, 1..40)) {
            let mut paddle = Paddle::new(Side::Player, PADDLE_OFFSET, FIELD_HEIGHT);
            for t in targets {
                paddle.set_target(t);
                paddle.advance(SIM_DT);
                prop_assert!(paddle.y.abs() <= 3.0 + 1e-5);
            }
        }
    }
}
