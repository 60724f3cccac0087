//! LocalStorage store (wasm32 only)

use super::{HighScoreRecord, HighScoreStore, StoreError};

#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "sky_runner_high_score";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no localStorage".into()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<u64, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(json)) => Ok(HighScoreRecord::from_json(&json)?.high_score),
            Ok(None) => Ok(0),
            Err(_) => Err(StoreError::Unavailable(format!("cannot read {}", self.key))),
        }
    }

    fn save(&mut self, value: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = HighScoreRecord { high_score: value }.to_json()?;
        storage
            .set_item(&self.key, &json)
            .map_err(|_| StoreError::Unavailable(format!("cannot write {}", self.key)))
    }
}
