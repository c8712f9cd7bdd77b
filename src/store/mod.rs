//! Store interfaces consumed by a quiz session.
//!
//! The session never touches ambient data; it is handed a
//! [`QuestionSource`] at start and a [`ResultSink`] for its terminal
//! result. The in-process implementations live in this module.

mod attempts;
mod bank;

pub use attempts::{AttemptLog, LeaderboardEntry};
pub use bank::QuestionBank;

use thiserror::Error;

use crate::models::{AttemptResult, Question};

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed store data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Supplies the question sequence for a category.
///
/// The returned list may be ordered or shuffled, and may be empty; there
/// is no pagination.
pub trait QuestionSource: Send + Sync {
    fn questions_for(&self, category_id: &str) -> Result<Vec<Question>, StoreError>;
}

/// Durably records a completed attempt for later leaderboard queries.
pub trait ResultSink: Send + Sync {
    fn record(&self, attempt: &AttemptResult) -> Result<(), StoreError>;
}
