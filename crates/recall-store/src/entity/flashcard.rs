use chrono::{DateTime, Utc};
use recall_core::model::Flashcard;
use rusqlite::types::Value;

use super::{
    get_integer, get_opt_integer, get_opt_timestamp, get_text, monotonic_now, timestamp_value,
    PersistentEntity, Row,
};
use crate::errors::Result;
use crate::schema::{self, TableSchema};

/// Persistence shape of a flashcard row
#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardEntity {
    pub id: Option<i64>,
    pub deck_id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl FlashcardEntity {
    pub fn from_flashcard(card: &Flashcard) -> Self {
        Self {
            id: card.id,
            deck_id: card.deck_id,
            question: card.question.clone(),
            answer: card.answer.clone(),
            created_at: card.created_at,
            updated_at: card.updated_at,
            last_reviewed: card.last_reviewed,
        }
    }

    pub fn into_flashcard(self) -> Flashcard {
        Flashcard {
            id: self.id,
            deck_id: self.deck_id,
            question: self.question,
            answer: self.answer,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_reviewed: self.last_reviewed,
        }
    }

    /// Record a review: sets `lastReviewed` and refreshes `updatedAt`
    pub fn mark_reviewed(&mut self) {
        let now = monotonic_now(self.updated_at);
        self.last_reviewed = Some(now);
        self.updated_at = Some(now);
    }
}

impl PersistentEntity for FlashcardEntity {
    const SCHEMA: &'static TableSchema = &schema::FLASHCARD;

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert(
            "id".to_string(),
            self.id.map_or(Value::Null, Value::Integer),
        );
        row.insert("deckId".to_string(), Value::Integer(self.deck_id));
        row.insert("question".to_string(), Value::Text(self.question.clone()));
        row.insert("answer".to_string(), Value::Text(self.answer.clone()));
        row.insert("createdAt".to_string(), timestamp_value(&self.created_at));
        row.insert("updatedAt".to_string(), timestamp_value(&self.updated_at));
        row.insert(
            "lastReviewed".to_string(),
            timestamp_value(&self.last_reviewed),
        );
        row
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: get_opt_integer(row, "id")?,
            deck_id: get_integer(row, "deckId")?,
            question: get_text(row, "question")?,
            answer: get_text(row, "answer")?,
            created_at: get_opt_timestamp(row, "createdAt")?,
            updated_at: get_opt_timestamp(row, "updatedAt")?,
            last_reviewed: get_opt_timestamp(row, "lastReviewed")?,
        })
    }

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn stamp(&mut self) {
        let now = monotonic_now(self.updated_at);
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }
}
