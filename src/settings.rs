//! Game settings and difficulty presets
//!
//! Settings persist as a small JSON file next to the high score. Anything
//! unreadable falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::POWER_UP_INTERVAL_MS;

/// Difficulty levels, selectable at runtime with 1/2/3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Speed and spawn pacing for one difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPreset {
    /// Cruise speed before any distance ramp (px/tick)
    pub base_speed: f32,
    /// Obstacle spawn interval range (ms, inclusive)
    pub obstacle_ms: (u64, u64),
    /// Coin spawn interval range (ms, inclusive)
    pub collectible_ms: (u64, u64),
    /// Power-up spawn interval range (ms, inclusive)
    pub power_up_ms: (u64, u64),
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "normal" | "2" => Some(Difficulty::Normal),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Number-key selection (1, 2, 3)
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Normal),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                base_speed: 6.0,
                obstacle_ms: (1100, 1900),
                collectible_ms: (900, 1800),
                power_up_ms: POWER_UP_INTERVAL_MS,
            },
            Difficulty::Normal => DifficultyPreset {
                base_speed: 7.5,
                obstacle_ms: (900, 1600),
                collectible_ms: (800, 1600),
                power_up_ms: POWER_UP_INTERVAL_MS,
            },
            Difficulty::Hard => DifficultyPreset {
                base_speed: 9.0,
                obstacle_ms: (700, 1300),
                collectible_ms: (700, 1400),
                power_up_ms: POWER_UP_INTERVAL_MS,
            },
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting difficulty
    pub difficulty: Difficulty,
    /// Start with audio cues muted
    pub muted: bool,
    /// Inverted sky for readability
    pub high_contrast: bool,
    /// Show the debug panel and hit-boxes
    pub debug: bool,
    /// Fixed RNG seed (random when unset)
    pub seed: Option<u64>,
    /// Where the high score lives
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            muted: false,
            high_contrast: false,
            debug: false,
            seed: None,
            high_score_path: PathBuf::from(".runner_high_score.json"),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "runner_settings.json";

    /// Load from `path`, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write to `path`; failures are logged and dropped
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Could not save settings to {}: {}", path.display(), e);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}
