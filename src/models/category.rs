use serde::{Deserialize, Serialize};

/// A quiz category as declared in the question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}
