//! Particle lifecycle
//!
//! A bounded FIFO pool of short-lived sparks. Bursts mark impacts, trails
//! follow the ball. Particles are purely visual and never feed back into
//! gameplay.

use std::collections::VecDeque;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hex_color;

/// Lateral velocity jitter applied to burst particles
const BURST_SPREAD: f32 = 0.5;
/// Fraction of the source velocity a trail particle inherits
const TRAIL_VELOCITY_SCALE: f32 = 0.1;
/// Chance that a `spawn_trail` call emits a particle
const TRAIL_CHANCE: f64 = 0.3;
const TRAIL_LIFETIME: f32 = 0.3;
/// Per-tick velocity multiplier
const DRAG: f32 = 0.98;
/// Downward acceleration (units/s²)
const GRAVITY: f32 = 2.0;

/// A single spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Normalized remaining life, 1 at spawn, removed at <= 0
    pub life: f32,
    /// Seconds from full life to zero
    pub max_life: f32,
    pub color: [f32; 3],
}

/// What a renderer needs per live particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub pos: Vec3,
    /// Color premultiplied by remaining life
    pub color: [f32; 3],
}

/// Bounded particle pool (oldest evicted first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(crate::consts::MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Radial burst of `count` particles at `pos`
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, pos: Vec3, color: u32, count: usize, rng: &mut R) {
        let color = hex_color(color);
        for i in 0..count {
            let angle = std::f32::consts::TAU * (i as f32 / count as f32);
            let speed = 2.0 + rng.random::<f32>() * 3.0;
            let vel = Vec3::new(
                angle.cos() * speed + (rng.random::<f32>() - 0.5) * BURST_SPREAD,
                angle.sin() * speed + (rng.random::<f32>() - 0.5) * BURST_SPREAD,
                (rng.random::<f32>() - 0.5) * BURST_SPREAD,
            );
            self.push(Particle {
                pos,
                vel,
                life: 1.0,
                max_life: 0.5 + rng.random::<f32>() * 0.5,
                color,
            });
        }
    }

    /// Maybe emit one slow particle behind a moving object
    pub fn spawn_trail<R: Rng + ?Sized>(&mut self, pos: Vec3, vel: Vec3, color: u32, rng: &mut R) {
        if !rng.random_bool(TRAIL_CHANCE) {
            return;
        }
        let wobble = Vec3::new(
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
        ) * 0.5;
        self.push(Particle {
            pos,
            vel: vel * TRAIL_VELOCITY_SCALE + wobble,
            life: 1.0,
            max_life: TRAIL_LIFETIME,
            color: hex_color(color),
        });
    }

    /// Integrate, apply drag and gravity, age, and retire expired particles
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel *= DRAG;
            particle.vel.y -= GRAVITY * dt;
            particle.life -= dt / particle.max_life;
        }
        self.particles.retain(|p| p.life > 0.0);
        self.evict_excess();
    }

    fn push(&mut self, particle: Particle) {
        if self.capacity == 0 {
            return;
        }
        self.particles.push_back(particle);
        self.evict_excess();
    }

    fn evict_excess(&mut self) {
        while self.particles.len() > self.capacity {
            self.particles.pop_front();
        }
    }

    /// Live particles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Render view with life-faded colors, at most `capacity` entries
    pub fn views(&self) -> impl Iterator<Item = ParticleView> + '_ {
        self.particles.iter().take(self.capacity).map(|p| {
            let alpha = p.life.clamp(0.0, 1.0);
            ParticleView {
                pos: p.pos,
                color: [p.color[0] * alpha, p.color[1] * alpha, p.color[2] * alpha],
            }
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
