//! High score persistence
//!
//! A single non-negative integer behind the `HighScoreStore` trait:
//! - JSON file on native hosts
//! - LocalStorage on wasm32
//! - In-memory for tests and headless runs
//!
//! Reads that fail degrade to zero; writes that fail are logged and dropped.

pub mod file;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score record is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("high score store unavailable: {0}")]
    Unavailable(String),
}

/// Persisted shape of the high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

impl HighScoreRecord {
    pub fn to_json(self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self)?)
    }

    /// Accepts the JSON record or a bare integer (older flat-text saves)
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Ok(Self { high_score: value });
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}

/// Where the high score lives
pub trait HighScoreStore {
    /// Stored value; `Ok(0)` when nothing was ever saved
    fn load(&self) -> Result<u64, StoreError>;
    fn save(&mut self, value: u64) -> Result<(), StoreError>;
}

/// Read the high score, treating every failure as zero
pub fn load_or_zero(store: &dyn HighScoreStore) -> u64 {
    match store.load() {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to load high score, starting from 0: {}", e);
            0
        }
    }
}

/// Write the high score, logging and dropping any failure
pub fn save_or_warn(store: &mut dyn HighScoreStore, value: u64) {
    match store.save(value) {
        Ok(()) => log::info!("High score saved: {}", value),
        Err(e) => log::warn!("Failed to save high score {}: {}", value, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl HighScoreStore for Broken {
        fn load(&self) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn save(&mut self, _value: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_record_accepts_flat_text() {
        assert_eq!(HighScoreRecord::from_json("42\n").unwrap().high_score, 42);
        assert_eq!(
            HighScoreRecord::from_json(r#"{"high_score":7}"#).unwrap().high_score,
            7
        );
        assert!(HighScoreRecord::from_json("-3").is_err());
        assert!(HighScoreRecord::from_json("garbage").is_err());
    }

    #[test]
    fn test_failures_degrade_quietly() {
        let mut store = Broken;
        assert_eq!(load_or_zero(&store), 0);
        save_or_warn(&mut store, 10);
    }
}
