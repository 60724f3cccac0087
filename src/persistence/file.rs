//! JSON file store for native hosts

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HighScoreRecord, HighScoreStore, StoreError};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u64, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(HighScoreRecord::from_json(&text)?.high_score),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, value: u64) -> Result<(), StoreError> {
        let json = HighScoreRecord { high_score: value }.to_json()?;
        // Write beside the target then rename, so a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::load_or_zero;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "sky_runner_store_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::create_dir_all(&dir);
        dir.join("high_score.json")
    }

    #[test]
    fn test_round_trip_through_fresh_store() {
        let path = scratch("round_trip");
        let _ = fs::remove_file(&path);

        FileStore::new(&path).save(1234).unwrap();
        assert_eq!(FileStore::new(&path).load().unwrap(), 1234);

        FileStore::new(&path).save(0).unwrap();
        assert_eq!(FileStore::new(&path).load().unwrap(), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let path = scratch("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(FileStore::new(&path).load().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_file_is_error_but_loads_zero() {
        let path = scratch("corrupt");
        fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse(_))));
        assert_eq!(load_or_zero(&store), 0);
        let _ = fs::remove_file(&path);
    }
}
