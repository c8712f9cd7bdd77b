//! Session timing configuration.
//!
//! Two pacing presets ship with the application; neither value is
//! hardcoded at a use site.

use std::time::Duration;

/// Interval between session heartbeats.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

const STANDARD_QUESTION_SECONDS: u32 = 15;
const STANDARD_FEEDBACK_MILLIS: u64 = 1500;
const RELAXED_QUESTION_SECONDS: u32 = 30;
const RELAXED_FEEDBACK_MILLIS: u64 = 2000;

/// Timing knobs for one quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    /// Countdown granted per question, in whole seconds.
    pub question_seconds: u32,
    /// How long the post-answer feedback stays on screen.
    pub feedback_delay: Duration,
}

impl QuizConfig {
    /// Fast pace: 15 s per question, 1.5 s feedback window.
    pub fn standard() -> Self {
        Self {
            question_seconds: STANDARD_QUESTION_SECONDS,
            feedback_delay: Duration::from_millis(STANDARD_FEEDBACK_MILLIS),
        }
    }

    /// Relaxed pace: 30 s per question, 2 s feedback window.
    pub fn relaxed() -> Self {
        Self {
            question_seconds: RELAXED_QUESTION_SECONDS,
            feedback_delay: Duration::from_millis(RELAXED_FEEDBACK_MILLIS),
        }
    }

    /// Override the per-question countdown.
    pub fn with_question_seconds(mut self, seconds: u32) -> Self {
        self.question_seconds = seconds;
        self
    }

    /// Override the feedback display window.
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::standard()
    }
}
