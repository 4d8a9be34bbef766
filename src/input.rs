//! Paddle input
//!
//! Turns pointer positions and held keys into a desired paddle y, kept within
//! the paddle lane so the keyboard target cannot run away past the walls.

/// Keyboard acceleration while a key is held (units/s²)
const KEY_ACCEL: f32 = 40.0;
/// Per-tick velocity multiplier once keys are released
const KEY_FRICTION: f32 = 0.8;
/// Keyboard velocity cap (units/s)
const KEY_MAX_SPEED: f32 = 10.0;

/// Held vertical direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyDirection {
    Up,
    Down,
    #[default]
    None,
}

impl KeyDirection {
    fn sign(self) -> f32 {
        match self {
            KeyDirection::Up => 1.0,
            KeyDirection::Down => -1.0,
            KeyDirection::None => 0.0,
        }
    }
}

/// Map a key name to a direction on key down
pub fn handle_key_down(key: &str, current: KeyDirection) -> KeyDirection {
    match key {
        "ArrowUp" | "w" | "W" => KeyDirection::Up,
        "ArrowDown" | "s" | "S" => KeyDirection::Down,
        _ => current,
    }
}

/// Release the direction if its key went up
pub fn handle_key_up(key: &str, current: KeyDirection) -> KeyDirection {
    match (key, current) {
        ("ArrowUp" | "w" | "W", KeyDirection::Up) => KeyDirection::None,
        ("ArrowDown" | "s" | "S", KeyDirection::Down) => KeyDirection::None,
        _ => current,
    }
}

/// Desired paddle y from pointer or keyboard
#[derive(Debug, Clone, Default)]
pub struct PaddleInput {
    /// Last target handed to the match
    target: f32,
    /// Keyboard-driven velocity
    velocity: f32,
    keys: KeyDirection,
    /// Pointer moved since the last read
    pointer: Option<f32>,
    field_height: f32,
}

impl PaddleInput {
    pub fn new(field_height: f32) -> Self {
        Self {
            field_height,
            ..Self::default()
        }
    }

    /// Pointer at normalized device y (-1 bottom, +1 top)
    pub fn pointer_moved(&mut self, ndc_y: f32) {
        if ndc_y.is_finite() {
            self.pointer = Some(ndc_y.clamp(-1.0, 1.0) * self.field_height / 2.0);
        }
    }

    /// Pointer at a pixel row of a viewport `height` pixels tall
    pub fn pointer_moved_px(&mut self, y_px: f32, height: f32) {
        if height > 0.0 {
            self.pointer_moved(1.0 - 2.0 * y_px / height);
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys = handle_key_down(key, self.keys);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys = handle_key_up(key, self.keys);
    }

    /// Target for this tick. Pointer movement wins over keys; keys accumulate
    /// a velocity that moves the previous target.
    pub fn target(&mut self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        let limit = crate::lane_limit(self.field_height);
        if let Some(y) = self.pointer.take() {
            self.velocity = 0.0;
            self.target = y.clamp(-limit, limit);
            return self.target;
        }

        match self.keys {
            KeyDirection::None => self.velocity *= KEY_FRICTION,
            dir => {
                self.velocity = (self.velocity + dir.sign() * KEY_ACCEL * dt)
                    .clamp(-KEY_MAX_SPEED, KEY_MAX_SPEED);
            }
        }
        self.target = (self.target + self.velocity * dt).clamp(-limit, limit);
        self.target
    }
}
