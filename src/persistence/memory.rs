//! In-memory store
//!
//! Clones share one slot, so a test can hand a clone to a session and still
//! inspect (or reuse) what was written after the session is gone.

use std::cell::Cell;
use std::rc::Rc;

use super::{HighScoreStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<Cell<Option<u64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        let store = Self::new();
        store.slot.set(Some(value));
        store
    }

    /// Last written value, if any
    pub fn stored(&self) -> Option<u64> {
        self.slot.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StoreError> {
        Ok(self.slot.get().unwrap_or(0))
    }

    fn save(&mut self, value: u64) -> Result<(), StoreError> {
        self.slot.set(Some(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slot() {
        let a = MemoryStore::new();
        let mut b = a.clone();
        assert_eq!(a.load().unwrap(), 0);
        assert_eq!(a.stored(), None);
        b.save(99).unwrap();
        assert_eq!(a.load().unwrap(), 99);
    }
}
