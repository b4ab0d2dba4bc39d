use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flashcard::Flashcard;

/// Deck - a named collection of flashcards
///
/// A Deck owns zero or more Flashcards by reference (one-to-many via
/// `Flashcard::deck_id`). A transient deck has no `id`; the store assigns one
/// on first insert, along with both timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Store-assigned primary key (None until first insert)
    pub id: Option<i64>,

    /// Human-readable deck name
    pub name: String,

    /// Short description of the deck's topic
    pub description: String,

    /// Timestamp of first persistence, set once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Timestamp of the last persisted mutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Computed flashcard count, attached by the deck-list read only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flashcard_count: Option<i64>,
}

impl Deck {
    /// Create a new transient Deck (no identity, no timestamps)
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            created_at: None,
            updated_at: None,
            flashcard_count: None,
        }
    }

    /// Check whether this deck has been persisted (has a store-assigned key)
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Aggregate view of one deck plus its owned flashcards
///
/// Composed in application code from one deck fetch and one ordered
/// flashcard-list fetch; this is not a stored shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckWithFlashcards {
    pub deck: Deck,
    pub flashcards: Vec<Flashcard>,
}
