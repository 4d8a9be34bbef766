//! Neon Pong - a 3D paddle-and-ball match against a scripted opponent
//!
//! Core modules:
//! - `sim`: Simulation core (kinematics, collisions, opponent, particles, match state)
//! - `game`: Frame driver (wall clock, fixed timestep, pause handling, FPS)
//! - `input`: Pointer/keyboard to paddle target mapping
//! - `audio`: Sound cue sink seam and tone recipes
//! - `renderer`: GPU-facing particle buffer types
//! - `settings`: Startup configuration

pub mod audio;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; paddle easing is tuned per tick at this rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 12.0;
    pub const FIELD_HEIGHT: f32 = 8.0;
    /// Distance from the top/bottom edge at which the ball bounces
    pub const BOUNDARY_MARGIN: f32 = 0.2;

    /// Paddle lanes sit at ±PADDLE_OFFSET (player right, opponent left)
    pub const PADDLE_OFFSET: f32 = 5.5;
    /// Collision half-extent along the lane axis
    pub const PADDLE_HALF_WIDTH: f32 = 0.5;
    /// Collision half-extent along y
    pub const PADDLE_HALF_HEIGHT: f32 = 1.0;
    /// Gap kept between the paddle centre and the field edge
    pub const PADDLE_EDGE_GAP: f32 = 1.0;
    /// Per-tick ease toward the target
    pub const PADDLE_SMOOTHING: f32 = 0.25;

    /// Ball defaults
    pub const BALL_INITIAL_SPEED: f32 = 5.0;
    pub const BALL_MAX_SPEED: f32 = 12.0;
    /// Serve cone half-angle (radians, 30°)
    pub const SERVE_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_6;
    /// Horizontal speed multiplier on paddle hit
    pub const PADDLE_SPEEDUP: f32 = 1.05;
    /// Vertical velocity added per unit of offset from the paddle centre
    pub const SPIN_FACTOR: f32 = 2.0;

    /// Match rules
    pub const WIN_SCORE: u32 = 5;
    /// Delay between a point and the next serve (seconds)
    pub const SERVE_DELAY: f64 = 1.0;
    pub const DEFAULT_DIFFICULTY: f32 = 0.7;

    /// Particle pool capacity
    pub const MAX_PARTICLES: usize = 500;
    /// Particles per burst
    pub const BURST_COUNT: usize = 15;

    /// Colors for game elements
    pub const PLAYER_COLOR: u32 = 0x00ff88;
    pub const OPPONENT_COLOR: u32 = 0xff4466;
    pub const BOUNDARY_COLOR: u32 = 0x66ccff;
    pub const BALL_GLOW_COLOR: u32 = 0x66ccff;
}

/// Half-range a paddle centre may occupy for a field of the given height
#[inline]
pub fn lane_limit(field_height: f32) -> f32 {
    (field_height / 2.0 - consts::PADDLE_EDGE_GAP).max(0.0)
}

/// Clamp a paddle y to `[-h/2 + 1, h/2 - 1]`
#[inline]
pub fn clamp_lane(y: f32, field_height: f32) -> f32 {
    let limit = lane_limit(field_height);
    if y.is_nan() {
        return 0.0;
    }
    y.clamp(-limit, limit)
}

/// Convert a 0xRRGGBB color to linear-ish RGB floats in [0, 1]
#[inline]
pub fn hex_color(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
