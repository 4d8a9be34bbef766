//! Sound cues
//!
//! The simulation only reports *what* happened; a sink decides how it sounds.
//! Each cue also carries the procedural recipe a synth backend can play, so
//! no sample files are needed.

use serde::{Deserialize, Serialize};

/// Sound cue kinds emitted by the match loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Ball hits a paddle
    PaddleHit,
    /// Ball bounces off the top or bottom edge
    BoundaryHit,
    /// A point was scored
    Score,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    /// Band-passed white noise (centre frequency in `Voice::freq`)
    Noise,
}

/// One enveloped voice of a cue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub freq: f32,
    pub duration: f32,
    pub waveform: Waveform,
    /// Start offset from the cue (seconds)
    pub delay: f32,
    /// Envelope peak gain
    pub peak: f32,
}

impl Voice {
    const fn tone(freq: f32, duration: f32, waveform: Waveform, delay: f32) -> Self {
        Self {
            freq,
            duration,
            waveform,
            delay,
            peak: 0.1,
        }
    }
}

const PADDLE_HIT: [Voice; 2] = [
    Voice::tone(220.0, 0.1, Waveform::Sine, 0.0),
    Voice::tone(440.0, 0.08, Waveform::Triangle, 0.0),
];

const BOUNDARY_HIT: [Voice; 2] = [
    Voice::tone(660.0, 0.1, Waveform::Square, 0.0),
    Voice {
        freq: 1000.0,
        duration: 0.05,
        waveform: Waveform::Noise,
        delay: 0.0,
        peak: 0.05,
    },
];

const SCORE: [Voice; 3] = [
    Voice::tone(440.0, 0.15, Waveform::Sine, 0.0),
    Voice::tone(550.0, 0.15, Waveform::Sine, 0.1),
    Voice::tone(660.0, 0.2, Waveform::Sine, 0.2),
];

impl SoundCue {
    /// Voices to synthesize for this cue
    pub fn recipe(self) -> &'static [Voice] {
        match self {
            SoundCue::PaddleHit => &PADDLE_HIT,
            SoundCue::BoundaryHit => &BOUNDARY_HIT,
            SoundCue::Score => &SCORE,
        }
    }

    /// Total length including delayed voices
    pub fn duration(self) -> f32 {
        self.recipe()
            .iter()
            .map(|v| v.delay + v.duration)
            .fold(0.0, f32::max)
    }
}

/// Receives cues from the game each frame
pub trait CueSink {
    fn play(&mut self, cue: SoundCue);
}

/// Collects cues (useful for tests and replays)
impl CueSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// Sink that just logs, for headless runs
#[derive(Debug)]
pub struct LogSink {
    master_volume: f32,
    muted: bool,
    played: u64,
}

impl LogSink {
    pub fn new(master_volume: f32) -> Self {
        Self {
            master_volume: master_volume.clamp(0.0, 1.0),
            muted: false,
            played: 0,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues that were actually voiced
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl CueSink for LogSink {
    fn play(&mut self, cue: SoundCue) {
        if self.muted || self.master_volume <= 0.0 {
            return;
        }
        self.played += 1;
        log::trace!(
            "cue {:?}: {} voices, {:.2}s at volume {:.2}",
            cue,
            cue.recipe().len(),
            cue.duration(),
            self.master_volume
        );
    }
}
