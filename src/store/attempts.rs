use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::models::AttemptResult;

use super::{ResultSink, StoreError};

/// Entry in the ranked leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player: String,
    pub category_id: String,
    pub score: usize,
    pub total: usize,
    pub time_taken_secs: u64,
    pub is_you: bool,
}

/// JSON-file-backed log of completed attempts.
///
/// Existing attempts are loaded at open; each recorded attempt rewrites
/// the file so the leaderboard survives across runs.
pub struct AttemptLog {
    path: PathBuf,
    attempts: Mutex<Vec<AttemptResult>>,
}

impl AttemptLog {
    /// Open the log at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let attempts = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            attempts: Mutex::new(attempts),
        })
    }

    /// Snapshot of every recorded attempt.
    pub fn attempts(&self) -> Vec<AttemptResult> {
        self.lock().clone()
    }

    /// Ranked attempts: score descending, then time taken ascending.
    ///
    /// Entries belonging to `you` are flagged for highlighting.
    pub fn leaderboard(&self, limit: usize, you: &str) -> Vec<LeaderboardEntry> {
        let mut attempts = self.lock().clone();

        attempts.sort_by(|a, b| {
            let score_cmp = b.score.cmp(&a.score);
            if score_cmp == std::cmp::Ordering::Equal {
                a.time_taken_secs.cmp(&b.time_taken_secs)
            } else {
                score_cmp
            }
        });

        attempts
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, attempt)| LeaderboardEntry {
                rank: i + 1,
                player: attempt.player.clone(),
                category_id: attempt.category_id.clone(),
                score: attempt.score,
                total: attempt.total_questions,
                time_taken_secs: attempt.time_taken_secs,
                is_you: attempt.player == you,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AttemptResult>> {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(path: &Path, attempts: &[AttemptResult]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(attempts)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl ResultSink for AttemptLog {
    fn record(&self, attempt: &AttemptResult) -> Result<(), StoreError> {
        let mut attempts = self.lock();
        attempts.push(attempt.clone());

        if let Err(err) = Self::persist(&self.path, &attempts) {
            attempts.pop();
            return Err(err);
        }
        Ok(())
    }
}
