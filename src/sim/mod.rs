//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep and wall clock only
//! - Seeded RNG only
//! - Fixed update order within a tick
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod opponent;
pub mod paddle;
pub mod particles;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{PaddleHit, Wall, ball_out_of_field, ball_paddle_collision, ball_wall_collision, paddle_bounce};
pub use opponent::Opponent;
pub use paddle::{Paddle, Side};
pub use particles::{Particle, ParticleSystem, ParticleView};
pub use state::{BallSnapshot, MatchPhase, MatchState, PaddleSnapshot, PendingServe, Scores, Snapshot};
pub use tick::{TickInput, tick};
