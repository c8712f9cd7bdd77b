//! # quizmaster
//!
//! A terminal quiz application: pick a category, race a per-question
//! countdown, and land on the leaderboard.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizmaster::{load_bank, AttemptLog, PlayerName, Quiz, QuizConfig, QuestionBank, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let bank = load_bank("bank.json")?;
//!     let log = AttemptLog::open("attempts.json")?;
//!     let player = PlayerName::parse("jane_smith").expect("invalid player name");
//!
//!     let quiz = Quiz::new(
//!         QuestionBank::new(bank.categories, bank.questions),
//!         log,
//!         player,
//!         QuizConfig::standard(),
//!     );
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod config;
mod data;
mod models;
mod session;
mod store;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;

pub use app::{App, Screen};
pub use config::{QuizConfig, TICK_INTERVAL};
pub use data::{load_bank, BankFile, LoadError};
pub use models::{
    AttemptResult, Category, Difficulty, OptionLabel, PlayerName, PlayerNameError, Question,
};
pub use session::{FeedbackView, Phase, QuizSession, SessionError, Ticker};
pub use store::{
    AttemptLog, LeaderboardEntry, QuestionBank, QuestionSource, ResultSink, StoreError,
};

/// How often the UI wakes up between input events.
const UI_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading the question bank.
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    /// Error from a store implementation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// IO error during quiz execution.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz over a question bank and attempt log.
    pub fn new(bank: QuestionBank, log: AttemptLog, player: PlayerName, config: QuizConfig) -> Self {
        Self {
            app: App::new(Arc::new(bank), Arc::new(log), player, config),
        }
    }

    /// Skip the picker and start directly in `category_id`.
    pub fn start_in(&mut self, category_id: &str) {
        self.app.start_category(category_id);
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal, displays the quiz UI, and returns
    /// when the user quits. The terminal is restored on every exit path.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::acquire()?;
        run_event_loop(guard.terminal(), &mut self.app).await
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Input is handled before heartbeats are applied, so a selection
        // arriving together with the expiry tick wins.
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_input(app, key.code) {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(QuizError::Io(err)),
                    None => break,
                }
            }
            _ = tokio::time::sleep(UI_POLL_INTERVAL) => {}
        }

        app.update(Instant::now());
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen {
        Screen::Welcome => handle_welcome_input(app, key),
        Screen::EmptyCategory { .. } => handle_empty_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_category();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_category();
            false
        }
        KeyCode::Enter => {
            app.start_selected_category();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_empty_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc | KeyCode::Enter => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return true;
    }
    // Abandon the attempt: the session and its ticker are dropped.
    if matches!(key, KeyCode::Esc) {
        app.restart();
        return false;
    }

    // Everything else only matters while an answer can still be given;
    // the session absorbs stray events anyway.
    if !app.awaiting_answer() {
        return false;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_selected_option(),
        KeyCode::Char(c) => {
            if let Some(label) = label_from_char(c) {
                app.answer(label);
            }
        }
        _ => {}
    }

    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn label_from_char(c: char) -> Option<OptionLabel> {
    match c.to_ascii_lowercase() {
        'a' | '1' => Some(OptionLabel::A),
        'b' | '2' => Some(OptionLabel::B),
        'c' | '3' => Some(OptionLabel::C),
        'd' | '4' => Some(OptionLabel::D),
        _ => None,
    }
}
