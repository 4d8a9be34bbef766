//! Game settings
//!
//! Startup configuration, stored as JSON. Anything out of range is pulled back
//! into range on load rather than rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particle pool capacity for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => MAX_PARTICLES,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Match ===
    /// Opponent difficulty (0.1 - 1.0)
    pub difficulty: f32,
    /// Points needed to win
    pub win_score: u32,
    /// Seconds between a point and the next serve
    pub serve_delay: f64,
    /// RNG seed; `None` picks one at startup
    pub seed: Option<u64>,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Paddle lane distance from the centre line
    pub paddle_offset: f32,

    // === Visual Effects ===
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (bursts, trails)
    pub particles: bool,
    /// Ball trail particles
    pub trails: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            win_score: WIN_SCORE,
            serve_delay: SERVE_DELAY,
            seed: None,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_offset: PADDLE_OFFSET,

            quality: QualityPreset::Medium,
            particles: true,
            trails: true,

            show_fps: true,

            master_volume: 0.8,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle pool capacity
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Pull every value back into a playable range
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !self.difficulty.is_finite() {
            self.difficulty = defaults.difficulty;
        }
        self.difficulty = self.difficulty.clamp(0.1, 1.0);
        self.win_score = self.win_score.max(1);
        if !self.serve_delay.is_finite() || self.serve_delay < 0.0 {
            self.serve_delay = defaults.serve_delay;
        }

        // Field must leave room for a paddle span and two lanes
        if !self.field_height.is_finite() || self.field_height < 2.0 * PADDLE_EDGE_GAP + 2.0 * PADDLE_HALF_HEIGHT {
            self.field_height = defaults.field_height;
        }
        if !self.field_width.is_finite() || self.field_width <= 2.0 * PADDLE_HALF_WIDTH {
            self.field_width = defaults.field_width;
        }
        let max_offset = self.field_width / 2.0 - PADDLE_HALF_WIDTH;
        if !self.paddle_offset.is_finite() || self.paddle_offset <= 0.0 || self.paddle_offset > max_offset {
            self.paddle_offset = max_offset.min(defaults.paddle_offset);
        }

        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            defaults.master_volume
        };
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|| {
                log::warn!("Ignoring malformed settings in {}", path.display());
                Self::default()
            }),
            Err(e) => {
                log::warn!("Could not read {} ({}), using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse and sanitize a JSON settings document
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                Some(settings.sanitized())
            }
            Err(e) => {
                log::warn!("Settings parse error: {}", e);
                None
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let Ok(json) = serde_json::to_string_pretty(self) else {
            return false;
        };
        match std::fs::write(path, json) {
            Ok(()) => {
                log::info!("Settings saved to {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("Could not save settings to {}: {}", path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_field() {
        let s = Settings::default();
        assert_eq!(s.field_width, 12.0);
        assert_eq!(s.field_height, 8.0);
        assert_eq!(s.paddle_offset, 5.5);
        assert_eq!(s.win_score, 5);
        assert_eq!(s.max_particles(), 500);
        assert!((s.difficulty - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_presets() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(Settings::from_preset(QualityPreset::Low).max_particles(), 100);

        let mut s = Settings::default();
        s.particles = false;
        assert_eq!(s.max_particles(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "difficulty": 0.3, "quality": "High" }"#).unwrap();
        assert!((s.difficulty - 0.3).abs() < 1e-6);
        assert_eq!(s.quality, QualityPreset::High);
        assert_eq!(s.win_score, 5);
    }

    #[test]
    fn test_out_of_range_values_are_sanitized() {
        let s = Settings::from_json(
            r#"{ "difficulty": 3.0, "win_score": 0, "serve_delay": -1.0, "paddle_offset": 40.0, "master_volume": 2.0 }"#,
        )
        .unwrap();
        assert_eq!(s.difficulty, 1.0);
        assert_eq!(s.win_score, 1);
        assert_eq!(s.serve_delay, SERVE_DELAY);
        assert_eq!(s.paddle_offset, 5.5);
        assert_eq!(s.master_volume, 1.0);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(Settings::from_json("{ not json").is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let s = Settings::load("/definitely/not/here/settings.json");
        assert_eq!(s.win_score, WIN_SCORE);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("neon_pong_settings_{}.json", std::process::id()));
        let mut s = Settings::default();
        s.difficulty = 0.4;
        s.seed = Some(42);
        assert!(s.save(&path));

        let loaded = Settings::load(&path);
        assert!((loaded.difficulty - 0.4).abs() < 1e-6);
        assert_eq!(loaded.seed, Some(42));
        let _ = std::fs::remove_file(&path);
    }
}
