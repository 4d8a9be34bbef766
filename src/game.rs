//! Frame driver
//!
//! Owns a match and feeds it from an animation-frame style clock: wall time in
//! milliseconds comes in, fixed `SIM_DT` ticks go out. Pausing stops the clock;
//! the first frame after a resume runs no ticks.

use crate::Settings;
use crate::audio::CueSink;
use crate::consts::*;
use crate::input::PaddleInput;
use crate::sim::{MatchPhase, MatchState, Scores, Side, Snapshot, TickInput, tick};

/// FPS sampling window (ms)
const FPS_WINDOW_MS: f64 = 1000.0;

/// A running game: match state plus the clock and input that drive it
#[derive(Debug, Clone)]
pub struct Game {
    state: MatchState,
    input: PaddleInput,
    accumulator: f32,
    /// Wall time of the previous frame (seconds); `None` restarts the clock
    last_time: Option<f64>,
    // FPS tracking
    fps: u32,
    fps_frames: u32,
    fps_window_start: Option<f64>,
    show_fps: bool,
}

impl Game {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let state = MatchState::new(settings, seed);
        let input = PaddleInput::new(state.field_height);
        Self {
            state,
            input,
            accumulator: 0.0,
            last_time: None,
            fps: 0,
            fps_frames: 0,
            fps_window_start: None,
            show_fps: settings.show_fps,
        }
    }

    /// Advance to wall time `now_ms`, forwarding any sound cues to `sink`.
    /// Returns the number of simulation ticks run.
    pub fn frame(&mut self, now_ms: f64, sink: &mut impl CueSink) -> u32 {
        if !now_ms.is_finite() {
            return 0;
        }
        self.update_fps(now_ms);

        let now = now_ms / 1000.0;
        let dt = match self.last_time {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        let dt = if dt > 0.0 { dt.min(MAX_FRAME_DT) } else { 0.0 };
        self.last_time = Some(now);

        let mut substeps = 0;
        if self.state.phase == MatchPhase::Playing {
            self.accumulator += dt;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = TickInput {
                    player_target: Some(self.input.target(SIM_DT)),
                };
                tick(&mut self.state, &input, SIM_DT, now);
                self.accumulator -= SIM_DT;
                substeps += 1;

                if self.state.phase != MatchPhase::Playing {
                    break;
                }
            }
        } else {
            // Serves still come due on the wall clock
            self.state.poll_serve(now);
        }

        if self.state.phase != MatchPhase::Playing {
            self.accumulator = 0.0;
            self.last_time = None;
        }

        for cue in self.state.drain_cues() {
            sink.play(cue);
        }
        substeps
    }

    fn update_fps(&mut self, now_ms: f64) {
        let Some(start) = self.fps_window_start else {
            self.fps_window_start = Some(now_ms);
            self.fps_frames = 0;
            return;
        };
        if now_ms < start {
            // Clock went backwards
            self.fps_window_start = Some(now_ms);
            self.fps_frames = 0;
            return;
        }

        self.fps_frames += 1;
        let elapsed = now_ms - start;
        if elapsed >= FPS_WINDOW_MS {
            self.fps = (self.fps_frames as f64 * 1000.0 / elapsed).round() as u32;
            self.fps_frames = 0;
            self.fps_window_start = Some(now_ms);
        }
    }

    pub fn start(&mut self) {
        self.state.start();
        self.reset_clock();
    }

    pub fn restart(&mut self) {
        self.state.restart();
        self.reset_clock();
    }

    /// Pause or resume; returns true if the phase changed
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.state.set_paused(paused);
        if changed {
            self.reset_clock();
        }
        changed
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.state.phase == MatchPhase::Paused;
        self.set_paused(!paused)
    }

    pub fn set_difficulty(&mut self, difficulty: f32) {
        self.state.set_difficulty(difficulty);
    }

    fn reset_clock(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn scores(&self) -> Scores {
        self.state.scores
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    /// Frames per second over the last full sampling window
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn show_fps(&self) -> bool {
        self.show_fps
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut PaddleInput {
        &mut self.input
    }
}
