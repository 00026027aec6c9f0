//! High score persistence
//!
//! One plain-text file holding a single whitespace-trimmed decimal integer.
//! Reads that fail for any reason fall back to zero; writes are best-effort
//! and never surface to the simulation.

use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store for the single best score.
///
/// The cached value is monotonically non-decreasing for the lifetime of the
/// store, and across sessions as long as writes succeed.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
    best: u32,
}

impl HighScoreStore {
    /// Open a store backed by the given file, loading the current best.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = read_score(&path).unwrap_or(0);
        log::info!("high score store at {}: best {}", path.display(), best);
        Self {
            path: Some(path),
            best,
        }
    }

    /// A store with no backing file. Used by tests and headless callers that
    /// don't want anything on disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            best: 0,
        }
    }

    /// Current best score.
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a score. Updates and persists only when it beats the stored
    /// best; returns whether it did.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.persist();
        true
    }

    /// Best-effort write of the current best. Also called once on shutdown
    /// so a run that never beat the record still leaves the file intact.
    pub fn persist(&self) {
        let Some(path) = &self.path else { return };
        if let Err(err) = fs::write(path, self.best.to_string()) {
            log::debug!("high score write to {} failed: {}", path.display(), err);
        }
    }
}

fn read_score(path: &Path) -> Option<u32> {
    let text = fs::read_to_string(path).ok()?;
    text.trim().parse().ok()
}
