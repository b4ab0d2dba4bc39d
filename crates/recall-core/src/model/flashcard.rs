use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flashcard - one question/answer pair owned by a deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    /// Store-assigned primary key (None until first insert)
    pub id: Option<i64>,

    /// Key of the owning deck; must reference an existing deck row
    pub deck_id: i64,

    pub question: String,

    pub answer: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Set by the mark-reviewed mutation; absent until first review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl Flashcard {
    /// Create a new transient Flashcard for the given deck
    pub fn new(deck_id: i64, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: None,
            deck_id,
            question: question.into(),
            answer: answer.into(),
            created_at: None,
            updated_at: None,
            last_reviewed: None,
        }
    }

    /// Check whether this flashcard has been persisted
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
