//! Simulation tick
//!
//! One step of the match loop. Order within a tick is fixed: ball, paddles,
//! opponent, walls, paddle hits, scoring, game-over check, particles.

use super::collision::{ball_out_of_field, ball_paddle_collision, ball_wall_collision, paddle_bounce};
use super::paddle::Side;
use super::state::{MatchPhase, MatchState};
use crate::audio::SoundCue;
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Desired player paddle y (clamped on apply)
    pub player_target: Option<f32>,
}

/// Advance the match by `dt` seconds. `now` is the wall clock (seconds) used
/// for serve scheduling.
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32, now: f64) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    state.poll_serve(now);

    if state.phase != MatchPhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if let Some(y) = input.player_target {
        state.player.set_target(y);
    }

    // 1. Ball
    state.ball.integrate(dt);

    // 2. Paddles ease toward their targets
    state.player.advance(dt);
    state.opponent_paddle.advance(dt);

    // 3. Opponent picks its next target
    let target = state.opponent.compute_move(
        state.ball.pos,
        state.opponent_paddle.pos(),
        dt,
        &mut state.rng,
    );
    state.opponent_paddle.set_target(target);

    // 4. Top/bottom walls, only for a ball still heading into the wall
    let ball_pos = state.ball.plane_pos();
    let vy = state.ball.vel.y;
    if ball_wall_collision(ball_pos, state.field_height).is_some_and(|wall| wall.is_approached(vy)) {
        let vel = state.ball.vel;
        state.ball.set_velocity(vel.x, -vel.y);
        state.cues.push(SoundCue::BoundaryHit);
        state
            .particles
            .spawn_burst(state.ball.pos, BOUNDARY_COLOR, BURST_COUNT, &mut state.rng);
    }

    // 5. Paddles, each checked against the velocity left by the previous check
    for side in [Side::Player, Side::Opponent] {
        let paddle = match side {
            Side::Player => &state.player,
            Side::Opponent => &state.opponent_paddle,
        };
        let vel = state.ball.vel;
        if let Some(hit) = ball_paddle_collision(ball_pos, vel.truncate(), paddle) {
            let bounced = paddle_bounce(vel, &hit);
            state.ball.set_velocity(bounced.x, bounced.y);
            state.cues.push(SoundCue::PaddleHit);
            state
                .particles
                .spawn_burst(state.ball.pos, side.color(), BURST_COUNT, &mut state.rng);
        }
    }

    // 6. Scoring
    if let Some(scorer) = ball_out_of_field(state.ball.plane_pos(), state.field_width) {
        state.scores.add(scorer);
        state.cues.push(SoundCue::Score);
        log::info!(
            "{} scores: {}-{}",
            match scorer {
                Side::Player => "Player",
                Side::Opponent => "Opponent",
            },
            state.scores.player,
            state.scores.opponent
        );
        state.schedule_serve(now);
    }

    // 7. Game over
    if let Some(winner) = state.scores.winner(state.win_score) {
        state.phase = MatchPhase::GameOver;
        state.cancel_serve();
        log::info!(
            "Game over: {} wins {}-{}",
            match winner {
                Side::Player => "player",
                Side::Opponent => "opponent",
            },
            state.scores.player,
            state.scores.opponent
        );
    }

    // 8. Particles
    if state.trails && state.ball.is_moving() {
        state
            .particles
            .spawn_trail(state.ball.pos, state.ball.vel, BALL_GLOW_COLOR, &mut state.rng);
    }
    state.particles.tick(dt);
}
