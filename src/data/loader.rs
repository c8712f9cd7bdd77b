use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Category, Question};

/// Error loading or validating a question bank file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid bank: {reason}")]
    Invalid { reason: String },
}

/// Parsed shape of a question bank file.
#[derive(Debug, Deserialize)]
pub struct BankFile {
    pub categories: Vec<Category>,
    pub questions: Vec<Question>,
}

/// Load and validate a question bank from a JSON file.
///
/// Every question must pass its own invariants, reference a declared
/// category, and carry a unique id.
pub fn load_bank<P: AsRef<Path>>(path: P) -> Result<BankFile, LoadError> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let bank: BankFile = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    validate_bank(&bank)?;
    Ok(bank)
}

fn validate_bank(bank: &BankFile) -> Result<(), LoadError> {
    let mut category_ids = HashSet::new();
    for category in &bank.categories {
        if !category_ids.insert(category.id.as_str()) {
            return Err(LoadError::Invalid {
                reason: format!("duplicate category id: {}", category.id),
            });
        }
    }

    let mut question_ids = HashSet::new();
    for question in &bank.questions {
        if !question_ids.insert(question.id.as_str()) {
            return Err(LoadError::Invalid {
                reason: format!("duplicate question id: {}", question.id),
            });
        }
        if !category_ids.contains(question.category_id.as_str()) {
            return Err(LoadError::Invalid {
                reason: format!(
                    "question {} references unknown category {}",
                    question.id, question.category_id
                ),
            });
        }
        question.validate().map_err(|err| LoadError::Invalid {
            reason: format!("question {}: {}", question.id, err),
        })?;
    }

    Ok(())
}
