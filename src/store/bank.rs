use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::models::{Category, Question};

use super::{QuestionSource, StoreError};

/// In-memory question bank backing the category picker and quiz sessions.
///
/// Built from a validated bank file; read-only afterwards.
pub struct QuestionBank {
    categories: Vec<Category>,
    questions: Vec<Question>,
    shuffle: bool,
}

impl QuestionBank {
    pub fn new(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        Self {
            categories,
            questions,
            shuffle: false,
        }
    }

    /// Hand out shuffled question sequences instead of bank order.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// How many questions the bank holds for a category.
    pub fn question_count(&self, category_id: &str) -> usize {
        self.questions
            .iter()
            .filter(|q| q.category_id == category_id)
            .count()
    }
}

impl QuestionSource for QuestionBank {
    fn questions_for(&self, category_id: &str) -> Result<Vec<Question>, StoreError> {
        let mut questions: Vec<Question> = self
            .questions
            .iter()
            .filter(|q| q.category_id == category_id)
            .cloned()
            .collect();

        if self.shuffle {
            questions.shuffle(&mut thread_rng());
        }

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, OptionLabel};

    fn question(id: &str, category_id: &str) -> Question {
        Question {
            id: id.to_string(),
            category_id: category_id.to_string(),
            prompt: format!("Question {}?", id),
            options: [
                "one".to_string(),
                "two".to_string(),
                "three".to_string(),
                "four".to_string(),
            ],
            correct: OptionLabel::A,
            difficulty: Difficulty::Easy,
        }
    }

    fn bank() -> QuestionBank {
        let categories = vec![
            Category {
                id: "1".to_string(),
                name: "General Knowledge".to_string(),
                description: "Questions about various topics".to_string(),
            },
            Category {
                id: "2".to_string(),
                name: "Science".to_string(),
                description: "Physics, Chemistry, Biology questions".to_string(),
            },
        ];
        let questions = vec![
            question("q1", "1"),
            question("q2", "1"),
            question("q3", "2"),
        ];
        QuestionBank::new(categories, questions)
    }

    #[test]
    fn test_questions_filtered_by_category() {
        let bank = bank();
        let questions = bank.questions_for("1").unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.category_id == "1"));
        assert_eq!(bank.question_count("2"), 1);
    }

    #[test]
    fn test_unknown_category_yields_empty_list() {
        let bank = bank();
        assert!(bank.questions_for("nope").unwrap().is_empty());
        assert!(bank.category("nope").is_none());
    }

    #[test]
    fn test_shuffle_preserves_question_set() {
        let bank = bank().with_shuffle(true);
        let mut ids: Vec<String> = bank
            .questions_for("1")
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["q1".to_string(), "q2".to_string()]);
    }
}
