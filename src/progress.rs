//! Per-level progress records
//!
//! Persisted to LocalStorage, keyed by level number. The simulation only
//! reports completions; everything else here is bookkeeping for the level
//! menu.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Best result on a single level
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelRecord {
    pub completed: bool,
    /// Fastest clear in seconds
    pub best_time: f32,
    /// Deaths on the fastest clear
    pub deaths: u32,
}

/// All recorded level results
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Progress {
    levels: BTreeMap<u32, LevelRecord>,
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gesture_dash_progress";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion. Returns true when this sets a new best time.
    pub fn record(&mut self, level: u32, elapsed_secs: f32, deaths: u32) -> bool {
        match self.levels.get(&level) {
            Some(existing) if existing.best_time <= elapsed_secs => false,
            _ => {
                self.levels.insert(
                    level,
                    LevelRecord {
                        completed: true,
                        best_time: elapsed_secs,
                        deaths,
                    },
                );
                true
            }
        }
    }

    pub fn get(&self, level: u32) -> Option<&LevelRecord> {
        self.levels.get(&level)
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.levels.get(&level).is_some_and(|r| r.completed)
    }

    /// Number of levels cleared at least once
    pub fn completed_count(&self) -> usize {
        self.levels.values().filter(|r| r.completed).count()
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(progress) = serde_json::from_str::<Progress>(&json) {
                    log::info!("Loaded progress ({} levels)", progress.levels.len());
                    return progress;
                }
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::new()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved ({} levels)", self.levels.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
