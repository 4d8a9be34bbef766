//! Ball kinematics
//!
//! Integration, speed clamping and serving. The ball lives on the z = 0 plane;
//! z is carried only so renderers get a full 3D position.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The match ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    pub initial_speed: f32,
    pub max_speed: f32,
    /// Visual spin (radians per axis), derived from speed
    pub rotation: Vec3,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(BALL_INITIAL_SPEED, BALL_MAX_SPEED)
    }
}

impl Ball {
    pub fn new(initial_speed: f32, max_speed: f32) -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            initial_speed,
            max_speed: max_speed.max(initial_speed),
            rotation: Vec3::ZERO,
        }
    }

    /// Centre the ball and stop it
    pub fn reset(&mut self) {
        self.pos = Vec3::ZERO;
        self.vel = Vec3::ZERO;
    }

    /// Serve at `initial_speed`, within ±30° of horizontal, left or right at random
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = (rng.random::<f32>() - 0.5) * 2.0 * SERVE_HALF_ANGLE;
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec3::new(
            direction * self.initial_speed * angle.cos(),
            self.initial_speed * angle.sin(),
            0.0,
        );
    }

    /// Advance position by `dt`, then clamp speed to `max_speed`
    pub fn integrate(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        if dt == 0.0 {
            return;
        }

        self.pos += self.vel * dt;

        let speed = self.vel.length();
        self.rotation.x += speed * dt * 0.5;
        self.rotation.y += speed * dt * 0.3;

        if speed > self.max_speed {
            self.vel = self.vel / speed * self.max_speed;
        }
    }

    /// Direct velocity override on the play plane
    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vel = Vec3::new(vx, vy, 0.0);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel.length_squared() > 0.0
    }

    /// Position projected onto the play plane
    #[inline]
    pub fn plane_pos(&self) -> Vec2 {
        self.pos.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_reset_centres_and_stops() {
        let mut ball = Ball::default();
        ball.pos = Vec3::new(3.0, -2.0, 0.0);
        ball.vel = Vec3::new(4.0, 1.0, 0.0);
        ball.reset();
        assert_eq!(ball.pos, Vec3::ZERO);
        assert!(!ball.is_moving());
    }

    #[test]
    fn test_launch_stays_in_serve_cone() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::default();
        let mut rightward = 0;

        for _ in 0..2000 {
            ball.reset();
            ball.launch(&mut rng);

            assert!((ball.speed() - BALL_INITIAL_SPEED).abs() < 1e-4);
            let angle = (ball.vel.y / ball.vel.x.abs()).atan();
            assert!(angle.abs() <= SERVE_HALF_ANGLE + 1e-5);
            assert!((ball.vel.x.abs() - BALL_INITIAL_SPEED * angle.cos()).abs() < 1e-4);
            assert_eq!(ball.vel.z, 0.0);
            if ball.vel.x > 0.0 {
                rightward += 1;
            }
        }

        // Roughly fair coin over many serves
        assert!((800..=1200).contains(&rightward), "rightward = {rightward}");
    }

    #[test]
    fn test_integrate_zero_and_negative_dt_are_noops() {
        let mut ball = Ball::default();
        ball.set_velocity(3.0, 1.0);
        ball.integrate(0.0);
        assert_eq!(ball.pos, Vec3::ZERO);
        ball.integrate(-1.0);
        assert_eq!(ball.pos, Vec3::ZERO);
        assert_eq!(ball.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_integrate_moves_then_clamps() {
        let mut ball = Ball::default();
        ball.set_velocity(30.0, 40.0);
        ball.integrate(0.1);
        // Position uses the pre-clamp velocity
        assert!((ball.pos.x - 3.0).abs() < 1e-5);
        assert!((ball.pos.y - 4.0).abs() < 1e-5);
        assert!((ball.speed() - BALL_MAX_SPEED).abs() < 1e-4);
        // Direction preserved
        assert!((ball.vel.y / ball.vel.x - 4.0 / 3.0).abs() < 1e-4);
        assert!(ball.rotation.x > 0.0 && ball.rotation.y > 0.0);
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_max(
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            dt in 0.0f32..1.0,
        ) {
            let mut ball = Ball::default();
            ball.set_velocity(vx, vy);
            ball.integrate(dt);
            if dt > 0.0 {
                prop_assert!(ball.speed() <= ball.max_speed + 1e-3);
            }
        }
    }
}
