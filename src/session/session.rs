//! Quiz session state machine.
//!
//! One session drives a single attempt from the first question to the
//! terminal result: countdown per question, answer capture, forfeiture
//! on timeout, scoring, and the one-shot handoff to the result sink.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::QuizConfig;
use crate::models::{AttemptResult, OptionLabel, PlayerName, Question};
use crate::store::{QuestionSource, ResultSink, StoreError};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The chosen category has no questions; the caller shows the
    /// empty-state view instead of starting a session.
    #[error("no questions available for this category")]
    NoQuestionsAvailable,

    /// Operation called after the session terminated.
    #[error("the session has already finished")]
    SessionFinished,

    /// Terminal result requested before the session terminated.
    #[error("the session has not finished yet")]
    SessionNotFinished,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of the most recent scoring event, displayed during feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackView {
    /// The option the player picked; `None` when the question timed out.
    pub selected: Option<OptionLabel>,
    pub was_correct: bool,
}

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Counting down on the current question.
    AwaitingAnswer { remaining_secs: u32 },
    /// Showing the outcome of the just-scored question.
    Feedback(FeedbackView),
    /// Terminal; the attempt result exists and no mutation is allowed.
    Finished,
}

/// One in-progress or completed quiz attempt.
pub struct QuizSession {
    player: PlayerName,
    category_id: String,
    questions: Vec<Question>,
    index: usize,
    phase: Phase,
    score: usize,
    elapsed_secs: u64,
    config: QuizConfig,
    sink: Arc<dyn ResultSink>,
    result: Option<AttemptResult>,
    submit_error: Option<StoreError>,
}

impl QuizSession {
    /// Start an attempt for `player` against `category_id`.
    ///
    /// The question sequence is fixed here and never mutated afterwards.
    /// Fails with [`SessionError::NoQuestionsAvailable`] when the source
    /// returns an empty list.
    pub fn start(
        player: PlayerName,
        category_id: impl Into<String>,
        source: &dyn QuestionSource,
        sink: Arc<dyn ResultSink>,
        config: QuizConfig,
    ) -> Result<Self, SessionError> {
        let category_id = category_id.into();
        let questions = source.questions_for(&category_id)?;

        if questions.is_empty() {
            return Err(SessionError::NoQuestionsAvailable);
        }

        tracing::info!(
            player = %player,
            category = %category_id,
            questions = questions.len(),
            "quiz session started"
        );

        Ok(Self {
            player,
            category_id,
            questions,
            index: 0,
            phase: Phase::AwaitingAnswer {
                remaining_secs: config.question_seconds,
            },
            score: 0,
            elapsed_secs: 0,
            config,
            sink,
            result: None,
            submit_error: None,
        })
    }

    /// Record the player's pick for the current question.
    ///
    /// Only acts while awaiting an answer; a duplicate or late call is a
    /// no-op, never an error, so stray UI events cannot double-score.
    pub fn select_answer(&mut self, label: OptionLabel) {
        let Phase::AwaitingAnswer { .. } = self.phase else {
            return;
        };

        let was_correct = self.questions[self.index].is_correct(label);
        if was_correct {
            self.score += 1;
        }
        self.phase = Phase::Feedback(FeedbackView {
            selected: Some(label),
            was_correct,
        });
    }

    /// One heartbeat.
    ///
    /// Accumulates elapsed time in any non-terminal state and drives the
    /// per-question countdown; reaching zero forfeits the question
    /// (recorded as incorrect, not skipped). Ticks arriving after the
    /// countdown already expired cannot forfeit again.
    pub fn tick(&mut self) {
        match self.phase {
            Phase::Finished => {}
            Phase::Feedback(_) => {
                self.elapsed_secs += 1;
            }
            Phase::AwaitingAnswer { remaining_secs } => {
                self.elapsed_secs += 1;
                let remaining = remaining_secs.saturating_sub(1);
                if remaining == 0 {
                    self.phase = Phase::Feedback(FeedbackView {
                        selected: None,
                        was_correct: false,
                    });
                } else {
                    self.phase = Phase::AwaitingAnswer {
                        remaining_secs: remaining,
                    };
                }
            }
        }
    }

    /// Close the feedback window: move to the next question with a fresh
    /// countdown, or terminate after the last one. No-op outside feedback.
    pub fn advance(&mut self) {
        if !matches!(self.phase, Phase::Feedback(_)) {
            return;
        }

        let next = self.index + 1;
        if next < self.questions.len() {
            self.index = next;
            self.phase = Phase::AwaitingAnswer {
                remaining_secs: self.config.question_seconds,
            };
        } else {
            self.finish();
        }
    }

    /// Terminal transition: build the attempt result once and hand it to
    /// the sink exactly once, guarded by the state change itself.
    fn finish(&mut self) {
        self.index = self.questions.len();
        self.phase = Phase::Finished;

        let attempt = AttemptResult {
            id: Uuid::new_v4(),
            player: self.player.as_str().to_string(),
            category_id: self.category_id.clone(),
            score: self.score,
            total_questions: self.questions.len(),
            time_taken_secs: self.elapsed_secs,
            completed_at: Utc::now(),
        };

        tracing::info!(
            player = %attempt.player,
            score = attempt.score,
            total = attempt.total_questions,
            time_taken_secs = attempt.time_taken_secs,
            "quiz session finished"
        );

        // A sink failure is non-fatal and never retried: the result stays
        // available locally and the error is kept for the UI to surface.
        if let Err(err) = self.sink.record(&attempt) {
            tracing::warn!(player = %attempt.player, error = %err, "failed to record attempt");
            self.submit_error = Some(err);
        }

        self.result = Some(attempt);
    }

    /// The question currently on screen.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        self.questions
            .get(self.index)
            .ok_or(SessionError::SessionFinished)
    }

    /// The terminal snapshot; only available once finished.
    pub fn result(&self) -> Result<&AttemptResult, SessionError> {
        self.result.as_ref().ok_or(SessionError::SessionNotFinished)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn feedback(&self) -> Option<FeedbackView> {
        match self.phase {
            Phase::Feedback(view) => Some(view),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Seconds left on the current question, 0 outside the countdown.
    pub fn remaining_secs(&self) -> u32 {
        match self.phase {
            Phase::AwaitingAnswer { remaining_secs } => remaining_secs,
            _ => 0,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// 1-based number of the question on screen, clamped at the total.
    pub fn question_number(&self) -> usize {
        (self.index + 1).min(self.questions.len())
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    /// The non-fatal sink failure, if submission did not go through.
    pub fn submit_error(&self) -> Option<&StoreError> {
        self.submit_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::models::Difficulty;

    struct StaticSource(Vec<Question>);

    impl QuestionSource for StaticSource {
        fn questions_for(&self, _category_id: &str) -> Result<Vec<Question>, StoreError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        recorded: Mutex<Vec<AttemptResult>>,
    }

    impl ResultSink for RecordingSink {
        fn record(&self, attempt: &AttemptResult) -> Result<(), StoreError> {
            self.recorded.lock().unwrap().push(attempt.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl ResultSink for FailingSink {
        fn record(&self, _attempt: &AttemptResult) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            category_id: "1".to_string(),
            prompt: format!("Question {}?", id),
            options: [
                "right".to_string(),
                "wrong".to_string(),
                "wrong".to_string(),
                "wrong".to_string(),
            ],
            correct: OptionLabel::A,
            difficulty: Difficulty::Medium,
        }
    }

    fn session_with(
        count: usize,
        sink: Arc<dyn ResultSink>,
    ) -> Result<QuizSession, SessionError> {
        let questions = (0..count).map(|i| question(&format!("q{}", i))).collect();
        QuizSession::start(
            PlayerName::parse("jane_smith").unwrap(),
            "1",
            &StaticSource(questions),
            sink,
            QuizConfig::standard(),
        )
    }

    #[test]
    fn test_all_correct_answers_score_full() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = session_with(3, sink.clone()).unwrap();

        for _ in 0..3 {
            session.select_answer(OptionLabel::A);
            session.advance();
        }

        assert!(session.is_finished());
        let result = session.result().unwrap();
        assert_eq!(result.score, 3);
        assert_eq!(result.total_questions, 3);
        assert_eq!(sink.recorded.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_all_timeouts_score_zero() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = session_with(3, sink.clone()).unwrap();
        let countdown = QuizConfig::standard().question_seconds;

        for _ in 0..3 {
            for _ in 0..countdown {
                session.tick();
            }
            assert!(matches!(session.phase(), Phase::Feedback(view) if view.selected.is_none()));
            session.advance();
        }

        assert!(session.is_finished());
        let result = session.result().unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.total_questions, 3);
    }

    #[test]
    fn test_empty_category_fails_cleanly() {
        let result = session_with(0, Arc::new(RecordingSink::default()));
        assert!(matches!(result, Err(SessionError::NoQuestionsAvailable)));
    }

    #[test]
    fn test_selection_on_expiry_tick_wins() {
        let mut session = session_with(1, Arc::new(RecordingSink::default())).unwrap();
        let countdown = QuizConfig::standard().question_seconds;

        // Run the countdown to its final second, then deliver the
        // selection before the expiring tick.
        for _ in 0..countdown - 1 {
            session.tick();
        }
        session.select_answer(OptionLabel::A);
        session.tick();

        let view = session.feedback().unwrap();
        assert_eq!(view.selected, Some(OptionLabel::A));
        assert!(view.was_correct);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_late_selection_after_timeout_is_ignored() {
        let mut session = session_with(1, Arc::new(RecordingSink::default())).unwrap();

        for _ in 0..QuizConfig::standard().question_seconds {
            session.tick();
        }
        session.select_answer(OptionLabel::A);

        let view = session.feedback().unwrap();
        assert_eq!(view.selected, None);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_reselection_does_not_double_score() {
        let mut session = session_with(2, Arc::new(RecordingSink::default())).unwrap();

        session.select_answer(OptionLabel::A);
        session.select_answer(OptionLabel::A);
        session.select_answer(OptionLabel::B);

        assert_eq!(session.score(), 1);
        let view = session.feedback().unwrap();
        assert_eq!(view.selected, Some(OptionLabel::A));
    }

    #[test]
    fn test_tick_idempotent_after_expiry() {
        let mut session = session_with(2, Arc::new(RecordingSink::default())).unwrap();
        let countdown = QuizConfig::standard().question_seconds;

        for _ in 0..countdown + 5 {
            session.tick();
        }

        // One forfeit only; extra ticks just accumulate elapsed time.
        assert!(matches!(session.phase(), Phase::Feedback(_)));
        assert_eq!(session.question_number(), 1);
        assert_eq!(session.elapsed_secs(), u64::from(countdown) + 5);
    }

    #[test]
    fn test_score_never_exceeds_answered_questions() {
        let mut session = session_with(3, Arc::new(RecordingSink::default())).unwrap();
        let mut answered = 0;

        for label in [OptionLabel::A, OptionLabel::B, OptionLabel::A] {
            assert!(session.score() <= answered);
            session.select_answer(label);
            answered += 1;
            assert!(session.score() <= answered);
            session.advance();
        }

        assert!(session.score() <= session.total_questions());
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_mixed_run_always_terminates_with_full_total() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = session_with(4, sink.clone()).unwrap();
        let countdown = QuizConfig::standard().question_seconds;

        // Answer, timeout, answer, timeout.
        session.select_answer(OptionLabel::A);
        session.advance();
        for _ in 0..countdown {
            session.tick();
        }
        session.advance();
        session.select_answer(OptionLabel::C);
        session.advance();
        for _ in 0..countdown {
            session.tick();
        }
        session.advance();

        assert!(session.is_finished());
        let result = session.result().unwrap();
        assert_eq!(result.total_questions, 4);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_result_gated_on_terminal_state() {
        let mut session = session_with(1, Arc::new(RecordingSink::default())).unwrap();
        assert!(matches!(
            session.result(),
            Err(SessionError::SessionNotFinished)
        ));

        session.select_answer(OptionLabel::A);
        session.advance();

        assert!(session.result().is_ok());
        assert!(matches!(
            session.current_question(),
            Err(SessionError::SessionFinished)
        ));
    }

    #[test]
    fn test_sink_receives_exactly_one_attempt() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = session_with(1, sink.clone()).unwrap();

        session.select_answer(OptionLabel::A);
        session.advance();
        // Late events against a finished session must not resubmit.
        session.advance();
        session.tick();
        session.select_answer(OptionLabel::B);

        assert_eq!(sink.recorded.lock().unwrap().len(), 1);
        assert_eq!(session.result().unwrap().score, 1);
    }

    #[test]
    fn test_sink_failure_is_non_fatal() {
        let mut session = session_with(2, Arc::new(FailingSink)).unwrap();

        session.select_answer(OptionLabel::A);
        session.advance();
        session.select_answer(OptionLabel::B);
        session.advance();

        assert!(session.is_finished());
        assert!(session.submit_error().is_some());
        // The local result is still shown to the player.
        let result = session.result().unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.total_questions, 2);
    }

    #[test]
    fn test_elapsed_time_counts_feedback_window_ticks() {
        let mut session = session_with(2, Arc::new(RecordingSink::default())).unwrap();

        session.tick();
        session.tick();
        session.select_answer(OptionLabel::A);
        session.tick(); // feedback window tick
        session.advance();
        session.select_answer(OptionLabel::A);
        session.advance();

        assert_eq!(session.result().unwrap().time_taken_secs, 3);
    }

    #[test]
    fn test_countdown_resets_between_questions() {
        let mut session = session_with(2, Arc::new(RecordingSink::default())).unwrap();
        let countdown = QuizConfig::standard().question_seconds;

        session.tick();
        session.tick();
        assert_eq!(session.remaining_secs(), countdown - 2);

        session.select_answer(OptionLabel::A);
        session.advance();
        assert_eq!(session.remaining_secs(), countdown);
        assert_eq!(session.question_number(), 2);
    }
}
