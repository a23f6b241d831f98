//! Game settings and preferences
//!
//! Persisted separately from game saves in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_STABILITY_FRAMES;

/// How the player steers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Direction flags from keyboard and/or confirmed gestures
    #[default]
    Digital,
    /// Continuous movement from the raw pointing vector
    Analog,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Digital => "digital",
            ControlMode::Analog => "analog",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "digital" => Some(ControlMode::Digital),
            "analog" => Some(ControlMode::Analog),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Controls ===
    /// Try to start the camera/gesture pipeline at launch
    pub gestures_enabled: bool,
    /// Digital (key-like) or analog (pointing vector) steering
    pub control_mode: ControlMode,
    /// Frames a raw gesture must repeat before it is confirmed
    pub stability_frames: usize,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio (dispatched to the external synth layer) ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (minimize shake, flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gestures_enabled: true,
            control_mode: ControlMode::Digital,
            stability_frames: DEFAULT_STABILITY_FRAMES,

            show_fps: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "gesture_dash_settings";

    /// Stability frames with a sane floor (zero would confirm noise)
    pub fn effective_stability_frames(&self) -> usize {
        self.stability_frames.max(1)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_mode_round_trips_through_strings() {
        for mode in [ControlMode::Digital, ControlMode::Analog] {
            assert_eq!(ControlMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(ControlMode::from_str("gamepad"), None);
    }

    #[test]
    fn stability_frames_never_drop_below_one() {
        let mut settings = Settings::default();
        settings.stability_frames = 0;
        assert_eq!(settings.effective_stability_frames(), 1);
    }
}
