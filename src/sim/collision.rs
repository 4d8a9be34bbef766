//! Collision detection and response
//!
//! Point-vs-rectangle checks on the play plane. The ball is treated as a point;
//! paddles are axis-aligned boxes centred on their lane.

use glam::{Vec2, Vec3};

use super::paddle::{Paddle, Side};
use crate::consts::*;

/// Which horizontal wall was touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

impl Wall {
    /// True if vertical velocity `vy` carries the ball into this wall
    pub fn is_approached(self, vy: f32) -> bool {
        match self {
            Wall::Top => vy > 0.0,
            Wall::Bottom => vy < 0.0,
        }
    }
}

/// Result of a paddle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    pub side: Side,
    /// Ball y minus paddle y, in paddle half-heights
    pub offset: f32,
}

/// Check whether the ball is inside the bounce band near the top or bottom edge
pub fn ball_wall_collision(ball_pos: Vec2, field_height: f32) -> Option<Wall> {
    let edge = field_height / 2.0 - BOUNDARY_MARGIN;
    if ball_pos.y >= edge {
        Some(Wall::Top)
    } else if ball_pos.y <= -edge {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Check the ball against a paddle's box, only while moving toward it
pub fn ball_paddle_collision(ball_pos: Vec2, ball_vel: Vec2, paddle: &Paddle) -> Option<PaddleHit> {
    let approaching = ball_vel.x * paddle.side.lane_sign() > 0.0;
    if !approaching {
        return None;
    }

    let in_lane = (ball_pos.x - paddle.x).abs() <= PADDLE_HALF_WIDTH;
    let offset = ball_pos.y - paddle.y;
    let in_span = offset.abs() <= PADDLE_HALF_HEIGHT;

    if in_lane && in_span {
        Some(PaddleHit {
            side: paddle.side,
            offset: offset / PADDLE_HALF_HEIGHT,
        })
    } else {
        None
    }
}

/// Outgoing velocity after a paddle hit: horizontal component flips away from
/// the paddle and speeds up, vertical picks up spin from the hit offset
pub fn paddle_bounce(ball_vel: Vec3, hit: &PaddleHit) -> Vec2 {
    let away = -hit.side.lane_sign();
    Vec2::new(
        away * ball_vel.x.abs() * PADDLE_SPEEDUP,
        ball_vel.y + hit.offset * SPIN_FACTOR,
    )
}

/// Side that wins the point if the ball has left the field
pub fn ball_out_of_field(ball_pos: Vec2, field_width: f32) -> Option<Side> {
    let edge = field_width / 2.0;
    if ball_pos.x > edge {
        // Got past the player on the right
        Some(Side::Opponent)
    } else if ball_pos.x < -edge {
        Some(Side::Player)
    } else {
        None
    }
}
