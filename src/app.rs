//! Application state: which screen is showing and the live session.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{QuizConfig, TICK_INTERVAL};
use crate::models::{Category, OptionLabel, PlayerName};
use crate::session::{Phase, QuizSession, SessionError, Ticker};
use crate::store::{AttemptLog, LeaderboardEntry, QuestionBank};

const NUM_OPTIONS: usize = 4;
const LEADERBOARD_LIMIT: usize = 10;

/// The screen currently on display.
pub enum Screen {
    /// Category picker.
    Welcome,
    /// The chosen category has no questions yet.
    EmptyCategory { category: Category },
    /// A session is running.
    Quiz,
    /// Terminal summary plus leaderboard.
    Result,
}

pub struct App {
    pub screen: Screen,
    bank: Arc<QuestionBank>,
    log: Arc<AttemptLog>,
    player: PlayerName,
    config: QuizConfig,
    selected_category: usize,
    selected_option: usize,
    session: Option<QuizSession>,
    ticker: Option<Ticker>,
    feedback_until: Option<Instant>,
    leaderboard: Vec<LeaderboardEntry>,
}

impl App {
    pub fn new(
        bank: Arc<QuestionBank>,
        log: Arc<AttemptLog>,
        player: PlayerName,
        config: QuizConfig,
    ) -> Self {
        Self {
            screen: Screen::Welcome,
            bank,
            log,
            player,
            config,
            selected_category: 0,
            selected_option: 0,
            session: None,
            ticker: None,
            feedback_until: None,
            leaderboard: Vec::new(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn selected_category(&self) -> usize {
        self.selected_category
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// Display name for a category id, falling back to the id itself.
    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.bank.category(id).map(|c| c.name.as_str()).unwrap_or(id)
    }

    pub fn select_next_category(&mut self) {
        let count = self.bank.categories().len();
        if count > 0 {
            self.selected_category = (self.selected_category + 1) % count;
        }
    }

    pub fn select_previous_category(&mut self) {
        let count = self.bank.categories().len();
        if count > 0 {
            self.selected_category = (self.selected_category + count - 1) % count;
        }
    }

    pub fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    /// Start a session for the category highlighted on the welcome screen.
    pub fn start_selected_category(&mut self) {
        let Some(category) = self.bank.categories().get(self.selected_category) else {
            return;
        };
        let id = category.id.clone();
        self.start_category(&id);
    }

    /// Start a session for `category_id`, or show the empty-state screen
    /// when it has no questions.
    pub fn start_category(&mut self, category_id: &str) {
        let start = QuizSession::start(
            self.player.clone(),
            category_id,
            self.bank.as_ref(),
            self.log.clone(),
            self.config,
        );

        match start {
            Ok(session) => {
                self.session = Some(session);
                self.ticker = Some(Ticker::start(TICK_INTERVAL));
                self.feedback_until = None;
                self.selected_option = 0;
                self.screen = Screen::Quiz;
            }
            Err(SessionError::NoQuestionsAvailable) => {
                let category = self
                    .bank
                    .category(category_id)
                    .cloned()
                    .unwrap_or_else(|| Category {
                        id: category_id.to_string(),
                        name: category_id.to_string(),
                        description: String::new(),
                    });
                self.screen = Screen::EmptyCategory { category };
            }
            Err(err) => {
                tracing::error!(category = category_id, error = %err, "failed to start session");
            }
        }
    }

    /// Submit the currently highlighted option.
    pub fn submit_selected_option(&mut self) {
        let Some(label) = OptionLabel::from_index(self.selected_option) else {
            return;
        };
        self.answer(label);
    }

    /// Submit an answer for the current question. Late or duplicate
    /// submissions are absorbed by the session.
    pub fn answer(&mut self, label: OptionLabel) {
        if let Some(session) = self.session.as_mut() {
            session.select_answer(label);
        }
    }

    /// Whether the player may currently pick an option.
    pub fn awaiting_answer(&self) -> bool {
        matches!(
            self.session.as_ref().map(QuizSession::phase),
            Some(Phase::AwaitingAnswer { .. })
        )
    }

    /// Drive the live session: apply pending heartbeats, arm the feedback
    /// deadline after a scoring event, and advance once it passes.
    ///
    /// Input is applied before this runs, so an explicit selection always
    /// beats a timeout delivered in the same loop turn.
    pub fn update(&mut self, now: Instant) {
        let pending = self.ticker.as_mut().map(Ticker::drain).unwrap_or(0);

        let Some(session) = self.session.as_mut() else {
            return;
        };

        for _ in 0..pending {
            session.tick();
        }

        if matches!(session.phase(), Phase::Feedback(_)) && self.feedback_until.is_none() {
            self.feedback_until = Some(now + self.config.feedback_delay);
        }

        if let Some(deadline) = self.feedback_until {
            if now >= deadline {
                session.advance();
                self.feedback_until = None;
                self.selected_option = 0;

                if session.is_finished() {
                    self.finish();
                }
            }
        }
    }

    /// Leave the quiz screen: release the ticker and load the leaderboard.
    fn finish(&mut self) {
        self.ticker = None;
        self.leaderboard = self
            .log
            .leaderboard(LEADERBOARD_LIMIT, self.player.as_str());
        self.screen = Screen::Result;
    }

    /// Discard any session (and its ticker) and return to the picker.
    pub fn restart(&mut self) {
        self.session = None;
        self.ticker = None;
        self.feedback_until = None;
        self.leaderboard.clear();
        self.selected_option = 0;
        self.screen = Screen::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    use crate::models::{Difficulty, Question};

    fn question(id: &str, category_id: &str) -> Question {
        Question {
            id: id.to_string(),
            category_id: category_id.to_string(),
            prompt: format!("Question {}?", id),
            options: [
                "right".to_string(),
                "wrong".to_string(),
                "wrong".to_string(),
                "wrong".to_string(),
            ],
            correct: OptionLabel::A,
            difficulty: Difficulty::Easy,
        }
    }

    fn test_app() -> (App, std::path::PathBuf) {
        let categories = vec![
            Category {
                id: "1".to_string(),
                name: "General Knowledge".to_string(),
                description: "Questions about various topics".to_string(),
            },
            Category {
                id: "2".to_string(),
                name: "History".to_string(),
                description: "Historical events and figures".to_string(),
            },
        ];
        let questions = vec![question("q1", "1"), question("q2", "1")];
        let bank = Arc::new(QuestionBank::new(categories, questions));

        let path = std::env::temp_dir().join(format!("attempts-{}.json", uuid::Uuid::new_v4()));
        let log = Arc::new(AttemptLog::open(&path).unwrap());

        let app = App::new(
            bank,
            log,
            PlayerName::parse("jane_smith").unwrap(),
            QuizConfig::standard(),
        );
        (app, path)
    }

    #[tokio::test]
    async fn test_full_run_reaches_result_screen() {
        let (mut app, path) = test_app();
        let delay = QuizConfig::standard().feedback_delay;

        app.start_selected_category();
        assert!(matches!(app.screen, Screen::Quiz));

        for _ in 0..2 {
            app.answer(OptionLabel::A);
            let now = Instant::now();
            app.update(now); // arms the feedback deadline
            app.update(now + delay + Duration::from_millis(1));
        }

        assert!(matches!(app.screen, Screen::Result));
        let session = app.session().unwrap();
        assert_eq!(session.result().unwrap().score, 2);
        assert_eq!(app.leaderboard().len(), 1);
        assert!(app.leaderboard()[0].is_you);

        let _ = fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_empty_category_shows_empty_state() {
        let (mut app, path) = test_app();

        app.start_category("2");
        assert!(matches!(
            &app.screen,
            Screen::EmptyCategory { category } if category.name == "History"
        ));
        assert!(app.session().is_none());

        let _ = fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_category_selection_wraps() {
        let (mut app, path) = test_app();

        app.select_previous_category();
        assert_eq!(app.selected_category(), 1);
        app.select_next_category();
        assert_eq!(app.selected_category(), 0);

        let _ = fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_restart_releases_session() {
        let (mut app, path) = test_app();

        app.start_selected_category();
        assert!(app.session().is_some());

        app.restart();
        assert!(app.session().is_none());
        assert!(matches!(app.screen, Screen::Welcome));

        let _ = fs::remove_file(path);
    }
}
