use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use quizmaster::{
    load_bank, AttemptLog, PlayerName, QuestionBank, Quiz, QuizConfig, QuizError,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with categories and questions
    #[arg(short, long, default_value = "bank.json")]
    bank: PathBuf,

    /// Player name shown on the leaderboard (3-16 characters)
    #[arg(short, long)]
    player: String,

    /// Start directly in this category instead of the picker
    #[arg(short, long)]
    category: Option<String>,

    /// Timing preset
    #[arg(long, value_enum, default_value = "standard")]
    pace: Pace,

    /// Override the per-question countdown, in seconds
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    timer: Option<u32>,

    /// Override the feedback display window, in milliseconds
    #[arg(long)]
    feedback_ms: Option<u64>,

    /// Shuffle the questions within the chosen category
    #[arg(long)]
    shuffle: bool,

    /// JSON file the attempt log is kept in
    #[arg(long, default_value = "attempts.json")]
    attempts: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pace {
    /// 15 seconds per question, 1.5 second feedback
    Standard,
    /// 30 seconds per question, 2 second feedback
    Relaxed,
}

impl Args {
    fn config(&self) -> QuizConfig {
        let mut config = match self.pace {
            Pace::Standard => QuizConfig::standard(),
            Pace::Relaxed => QuizConfig::relaxed(),
        };
        if let Some(seconds) = self.timer {
            config = config.with_question_seconds(seconds);
        }
        if let Some(millis) = self.feedback_ms {
            config = config.with_feedback_delay(Duration::from_millis(millis));
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing();

    if let Err(e) = run(args).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), QuizError> {
    let player = match PlayerName::parse(&args.player) {
        Ok(player) => player,
        Err(e) => {
            eprintln!("Invalid player name: {}", e);
            std::process::exit(2);
        }
    };

    let bank_file = load_bank(&args.bank)?;
    let bank = QuestionBank::new(bank_file.categories, bank_file.questions)
        .with_shuffle(args.shuffle);
    let log = AttemptLog::open(&args.attempts)?;

    if let Some(category_id) = &args.category {
        if bank.category(category_id).is_none() {
            eprintln!("Unknown category: {}", category_id);
            std::process::exit(2);
        }
    }

    let mut quiz = Quiz::new(bank, log, player, args.config());
    if let Some(category_id) = &args.category {
        quiz.start_in(category_id);
    }

    quiz.run().await
}

/// Logs go to stderr so they never corrupt the alternate screen; raise
/// the level with RUST_LOG=quizmaster=debug when needed.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "quizmaster=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
