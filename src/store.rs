//! Best-score persistence.
//!
//! The engine only reports a final score; everything about storing it lives
//! here. Failures never reach the core: an unreadable or unparsable file is
//! "no prior best", a failed write is "write skipped".

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Best-score collaborator contract.
pub trait ScoreStore {
    /// Current best score; None when absent or unreadable.
    fn read_best(&self) -> Option<u32>;

    /// Persist a new best. Returns whether the write took effect.
    fn write_best(&mut self, score: u32) -> bool;
}

/// On-disk record format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BestRecord {
    best: u32,
}

/// JSON file-backed store.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Score file in the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("blockfall.score")
    }

    fn try_read(&self) -> Result<u32> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read score file {}", self.path.display()))?;
        let record: BestRecord = serde_json::from_str(&raw)
            .with_context(|| format!("parse score file {}", self.path.display()))?;
        Ok(record.best)
    }

    fn try_write(&self, score: u32) -> Result<()> {
        let raw = serde_json::to_string(&BestRecord { best: score })?;
        fs::write(&self.path, raw)
            .with_context(|| format!("write score file {}", self.path.display()))?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn read_best(&self) -> Option<u32> {
        self.try_read().ok()
    }

    fn write_best(&mut self, score: u32) -> bool {
        self.try_write(score).is_ok()
    }
}

/// In-memory store for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Option<u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self { best: Some(best) }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read_best(&self) -> Option<u32> {
        self.best
    }

    fn write_best(&mut self, score: u32) -> bool {
        self.best = Some(score);
        true
    }
}

/// Outcome of the game-over handshake with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestScoreOutcome {
    /// The finished game beat (or established) the stored best.
    NewBest { previous: Option<u32> },
    /// The prior best stands.
    NotBeaten { best: u32 },
}

/// Read-then-conditionally-write at game over.
///
/// Writes only when the final score strictly exceeds the prior best, or when
/// no prior best exists.
pub fn record_game_over(store: &mut dyn ScoreStore, score: u32) -> BestScoreOutcome {
    match store.read_best() {
        Some(best) if score <= best => BestScoreOutcome::NotBeaten { best },
        previous => {
            store.write_best(score);
            BestScoreOutcome::NewBest { previous }
        }
    }
}
