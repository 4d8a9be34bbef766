//! Match state
//!
//! Everything one match owns: ball, paddles, opponent controller, particles,
//! scores, phase and the pending serve. Phase transitions and serve scheduling
//! live here; the per-tick physics lives in `tick`.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::opponent::Opponent;
use super::paddle::{Paddle, Side};
use super::particles::ParticleSystem;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::{Settings, hex_color};

/// Coarse match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the first start
    NotStarted,
    /// Active gameplay
    Playing,
    /// Frozen by the player
    Paused,
    /// Someone reached the win score
    GameOver,
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub opponent: u32,
}

impl Scores {
    pub fn add(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// Side ahead on points, if any
    pub fn leader(&self) -> Option<Side> {
        use std::cmp::Ordering;
        match self.player.cmp(&self.opponent) {
            Ordering::Greater => Some(Side::Player),
            Ordering::Less => Some(Side::Opponent),
            Ordering::Equal => None,
        }
    }

    /// Side that has reached `win_score`
    pub fn winner(&self, win_score: u32) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.opponent >= win_score {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// A serve waiting on the wall clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingServe {
    /// Wall-clock time (seconds) when the serve fires
    pub due_at: f64,
    /// Session that scheduled it; stale sessions are ignored
    pub session: u64,
}

/// Ball as the renderer sees it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BallSnapshot {
    pub pos: Vec3,
    pub rotation: Vec3,
    pub color: [f32; 3],
}

/// Paddle as the renderer sees it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaddleSnapshot {
    pub side: Side,
    pub pos: Vec3,
    pub tilt: f32,
    pub color: [f32; 3],
}

/// Read-only view of a match for renderers and UI
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: MatchPhase,
    pub scores: Scores,
    pub ball: BallSnapshot,
    pub player: PaddleSnapshot,
    pub opponent: PaddleSnapshot,
    pub particle_count: usize,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub ball: Ball,
    pub player: Paddle,
    pub opponent_paddle: Paddle,
    pub opponent: Opponent,
    pub particles: ParticleSystem,
    pub scores: Scores,
    pub phase: MatchPhase,
    /// Cues raised since the last drain
    pub cues: Vec<SoundCue>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub field_width: f32,
    pub field_height: f32,
    pub win_score: u32,
    pub serve_delay: f64,
    pub trails: bool,
    pub rng: Pcg32,
    /// Bumped on restart; invalidates serves scheduled earlier
    session: u64,
    pending_serve: Option<PendingServe>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(&Settings::default(), 0)
    }
}

impl MatchState {
    /// Build a match from settings with the given RNG seed
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }

    /// Build a match around an existing RNG
    pub fn with_rng(settings: &Settings, rng: Pcg32) -> Self {
        let settings = settings.clone().sanitized();
        let lane_limit = crate::lane_limit(settings.field_height);
        Self {
            ball: Ball::default(),
            player: Paddle::new(Side::Player, settings.paddle_offset, settings.field_height),
            opponent_paddle: Paddle::new(Side::Opponent, settings.paddle_offset, settings.field_height),
            opponent: Opponent::new(settings.difficulty, lane_limit),
            particles: ParticleSystem::new(settings.max_particles()),
            scores: Scores::default(),
            phase: MatchPhase::NotStarted,
            cues: Vec::new(),
            time_ticks: 0,
            field_width: settings.field_width,
            field_height: settings.field_height,
            win_score: settings.win_score,
            serve_delay: settings.serve_delay,
            trails: settings.trails,
            rng,
            session: 0,
            pending_serve: None,
        }
    }

    /// NotStarted -> Playing, serving immediately
    pub fn start(&mut self) {
        if self.phase != MatchPhase::NotStarted {
            log::debug!("start() ignored in {:?}", self.phase);
            return;
        }
        self.phase = MatchPhase::Playing;
        self.serve_now();
        log::info!("Match started");
    }

    /// Zero the scores and serve a fresh rally from any phase
    pub fn restart(&mut self) {
        self.session += 1;
        self.pending_serve = None;
        self.scores = Scores::default();
        self.phase = MatchPhase::Playing;
        self.serve_now();
        log::info!("Match restarted (session {})", self.session);
    }

    /// Pause or resume. Returns true if the phase changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        match (self.phase, paused) {
            (MatchPhase::Playing, true) => {
                self.phase = MatchPhase::Paused;
                log::info!("Paused");
                true
            }
            (MatchPhase::Paused, false) => {
                self.phase = MatchPhase::Playing;
                log::info!("Resumed");
                true
            }
            _ => false,
        }
    }

    /// Flip between Playing and Paused. Returns true if the phase changed.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.phase == MatchPhase::Paused;
        self.set_paused(!paused)
    }

    pub fn set_difficulty(&mut self, difficulty: f32) {
        self.opponent.set_difficulty(difficulty);
    }

    fn serve_now(&mut self) {
        self.ball.reset();
        self.ball.launch(&mut self.rng);
        log::debug!("Serve: vel=({:.2}, {:.2})", self.ball.vel.x, self.ball.vel.y);
    }

    /// Park the ball at centre and queue a serve `serve_delay` after `now`
    pub(crate) fn schedule_serve(&mut self, now: f64) {
        self.ball.reset();
        self.pending_serve = Some(PendingServe {
            due_at: now + self.serve_delay,
            session: self.session,
        });
    }

    /// Fire the queued serve once it is due. Stale or post-game-over serves are
    /// dropped; a serve that comes due while paused still goes out.
    pub fn poll_serve(&mut self, now: f64) {
        let Some(pending) = self.pending_serve else {
            return;
        };
        if pending.session != self.session || self.phase == MatchPhase::GameOver {
            self.pending_serve = None;
            return;
        }
        if now >= pending.due_at {
            self.pending_serve = None;
            self.serve_now();
        }
    }

    pub fn pending_serve(&self) -> Option<PendingServe> {
        self.pending_serve
    }

    pub(crate) fn cancel_serve(&mut self) {
        self.pending_serve = None;
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn winner(&self) -> Option<Side> {
        if self.phase == MatchPhase::GameOver {
            self.scores.winner(self.win_score)
        } else {
            None
        }
    }

    /// Hand over cues raised since the last call
    pub fn drain_cues(&mut self) -> std::vec::Drain<'_, SoundCue> {
        self.cues.drain(..)
    }

    pub fn snapshot(&self) -> Snapshot {
        let paddle = |p: &Paddle| PaddleSnapshot {
            side: p.side,
            pos: p.pos(),
            tilt: p.tilt,
            color: hex_color(p.side.color()),
        };
        Snapshot {
            phase: self.phase,
            scores: self.scores,
            ball: BallSnapshot {
                pos: self.ball.pos,
                rotation: self.ball.rotation,
                color: hex_color(BALL_GLOW_COLOR),
            },
            player: paddle(&self.player),
            opponent: paddle(&self.opponent_paddle),
            particle_count: self.particles.len(),
        }
    }
}
