use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label of one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in display order.
    pub const ALL: [OptionLabel; 4] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
    ];

    /// Position of this label within the options array.
    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    /// Label at the given options-array position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Difficulty tag attached to each question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

/// Validation failures for a single question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("correct option {label} has empty text")]
    EmptyCorrectOption { label: OptionLabel },
}

/// One multiple-choice item. Read-only within a quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category_id: String,
    pub prompt: String,
    pub options: [String; 4],
    pub correct: OptionLabel,
    pub difficulty: Difficulty,
}

impl Question {
    /// Text of the correct option.
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct.index()]
    }

    /// Check whether the given label matches the correct one.
    pub fn is_correct(&self, label: OptionLabel) -> bool {
        self.correct == label
    }

    /// Enforce the question invariants: a non-empty prompt and a correct
    /// label that references a non-empty option text.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.correct_text().trim().is_empty() {
            return Err(QuestionError::EmptyCorrectOption {
                label: self.correct,
            });
        }
        Ok(())
    }
}
