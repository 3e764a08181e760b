//! Best-score persistence
//!
//! The core only ever exchanges a single integer with the host: the best
//! score recorded on this device. The store sits behind a trait so tests and
//! headless runs can use an in-memory value while a real host keeps a JSON
//! record keyed by a stable file name.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the best score lives between sessions.
///
/// Reads never fail: a missing or unreadable record is reported as 0.
/// Writes are best-effort; a host that cannot persist simply loses the
/// record, it never aborts the game.
pub trait ScoreStore {
    fn load_best(&self) -> u32;
    fn save_best(&mut self, score: u32);
}

/// In-memory store for tests and demo runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> u32 {
        self.best.unwrap_or(0)
    }

    fn save_best(&mut self, score: u32) {
        self.best = Some(score);
    }
}

/// On-disk record shape
#[derive(Debug, Serialize, Deserialize)]
struct BestScoreRecord {
    best: u32,
}

/// JSON file store keyed by a stable file name
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Stable record file name
    pub const FILE_NAME: &'static str = "sky_ascend_best.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the conventional file name inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }
}

impl ScoreStore for JsonFileStore {
    fn load_best(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<BestScoreRecord>(&json) {
                Ok(record) => {
                    log::info!("Loaded best score: {}", record.best);
                    record.best
                }
                Err(err) => {
                    log::warn!("Corrupt best-score record, starting fresh: {err}");
                    0
                }
            },
            Err(_) => {
                log::info!("No best score recorded, starting fresh");
                0
            }
        }
    }

    fn save_best(&mut self, score: u32) {
        let record = BestScoreRecord { best: score };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    log::warn!("Failed to save best score: {err}");
                } else {
                    log::info!("Best score saved: {score}");
                }
            }
            Err(err) => log::warn!("Failed to encode best score: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sky_ascend_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_best(), 0);
        store.save_best(42);
        assert_eq!(store.load_best(), 42);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = scratch_file("roundtrip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load_best(), 0);
        store.save_best(137);
        assert_eq!(store.load_best(), 137);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_ignores_corrupt_record() {
        let path = scratch_file("corrupt");
        fs::write(&path, "not json").expect("write scratch file");
        let store = JsonFileStore::new(&path);
        assert_eq!(store.load_best(), 0);
        let _ = fs::remove_file(&path);
    }
}
