use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal snapshot of one completed quiz attempt.
///
/// Created exactly once, at the moment the session finishes, and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub id: Uuid,
    pub player: String,
    pub category_id: String,
    pub score: usize,
    pub total_questions: usize,
    pub time_taken_secs: u64,
    pub completed_at: DateTime<Utc>,
}

impl AttemptResult {
    /// Percent of questions answered correctly, 0.0 for an empty attempt.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        (self.score as f64 / self.total_questions as f64) * 100.0
    }

    /// Time taken formatted as `m:ss`.
    pub fn formatted_time(&self) -> String {
        format_seconds(self.time_taken_secs)
    }
}

/// Format a duration in whole seconds as `m:ss`.
pub fn format_seconds(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remaining = seconds % 60;
    format!("{}:{:02}", minutes, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(score: usize, total: usize) -> AttemptResult {
        AttemptResult {
            id: Uuid::new_v4(),
            player: "john_doe".to_string(),
            category_id: "1".to_string(),
            score,
            total_questions: total,
            time_taken_secs: 95,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(attempt(8, 10).accuracy(), 80.0);
        assert_eq!(attempt(0, 0).accuracy(), 0.0);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0:00");
        assert_eq!(format_seconds(65), "1:05");
        assert_eq!(format_seconds(180), "3:00");
    }

    #[test]
    fn test_attempt_round_trips_through_json() {
        let attempt = attempt(9, 10);
        let json = serde_json::to_string(&attempt).unwrap();
        let back: AttemptResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attempt);
    }
}
