//! Gesture Dash - a dodge-and-collect arcade game with hand-gesture controls
//!
//! Core modules:
//! - `gesture`: Hand-landmark classification and gesture stabilization
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `settings`: User preferences persisted to LocalStorage
//! - `progress`: Per-level completion records

pub mod gesture;
pub mod progress;
pub mod settings;
pub mod sim;

pub use gesture::{Gesture, GestureEvent, GestureRecognizer, HandFrame, PointingVector};
pub use progress::Progress;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the display loop the
    /// per-tick speeds were tuned against)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 22.0;
    pub const PLAYER_SPEED: f32 = 3.5;
    pub const PLAYER_HYPER_SPEED: f32 = 8.0;
    /// Trail history length (cosmetic)
    pub const PLAYER_TRAIL_LENGTH: usize = 10;

    /// Goal zone (right edge of the field, vertically centered)
    pub const GOAL_WIDTH: f32 = 60.0;
    pub const GOAL_HEIGHT: f32 = 80.0;

    /// A finger counts as extended when its tip clears the PIP joint by this
    /// much in image space (y grows downward, so raised = smaller y)
    pub const FINGER_EXTENSION_EPS: f32 = 0.015;
    /// Below this |dx| and |dy|, pointing direction falls back to the
    /// horizontal tie-break
    pub const DIRECTION_DEADZONE: f32 = 0.01;
    /// Wrist-to-tip displacements shorter than this are noise, not pointing
    pub const POINTING_MIN_MAGNITUDE: f32 = 0.02;
    /// Frames a raw gesture must repeat before it is confirmed
    pub const DEFAULT_STABILITY_FRAMES: usize = 2;

    /// Power-up effect durations (ticks at 60 Hz)
    pub const SHIELD_DURATION_TICKS: u32 = 5 * 60;
    pub const SPEED_DURATION_TICKS: u32 = 3 * 60;
    pub const SLOW_DURATION_TICKS: u32 = 4 * 60;
    pub const SPEED_MULTIPLIER: f32 = 1.5;
    pub const SLOW_MULTIPLIER: f32 = 0.5;

    /// Scoring
    pub const COLLECTIBLE_POINTS: f32 = 100.0;
    /// Pickups within this window chain into a combo
    pub const COMBO_WINDOW_TICKS: u64 = 5 * 60;

    /// Number of authored + generated levels
    pub const MAX_LEVELS: u32 = 15;
}

/// Score multiplier for a combo count (1.1x at combo 2, capped at 3.0x)
#[inline]
pub fn combo_multiplier(combo: u32) -> f32 {
    if combo > 1 {
        (1.0 + (combo - 1) as f32 * 0.1).min(3.0)
    } else {
        1.0
    }
}
