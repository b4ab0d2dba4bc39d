use chrono::{DateTime, Utc};
use recall_core::model::Deck;
use rusqlite::types::Value;

use super::{
    get_opt_integer, get_opt_timestamp, get_text, monotonic_now, timestamp_value,
    PersistentEntity, Row,
};
use crate::errors::Result;
use crate::schema::{self, TableSchema};

/// Persistence shape of a deck row
#[derive(Debug, Clone, PartialEq)]
pub struct DeckEntity {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Attached by the aggregate deck-list read; never a stored column
    pub flashcard_count: Option<i64>,
}

impl DeckEntity {
    /// Build the persistence shape of a domain record
    pub fn from_deck(deck: &Deck) -> Self {
        Self {
            id: deck.id,
            name: deck.name.clone(),
            description: deck.description.clone(),
            created_at: deck.created_at,
            updated_at: deck.updated_at,
            flashcard_count: deck.flashcard_count,
        }
    }

    /// Convert back into the domain record
    pub fn into_deck(self) -> Deck {
        Deck {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
            flashcard_count: self.flashcard_count,
        }
    }
}

impl PersistentEntity for DeckEntity {
    const SCHEMA: &'static TableSchema = &schema::DECK;

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert(
            "id".to_string(),
            self.id.map_or(Value::Null, Value::Integer),
        );
        row.insert("name".to_string(), Value::Text(self.name.clone()));
        row.insert(
            "description".to_string(),
            Value::Text(self.description.clone()),
        );
        row.insert("createdAt".to_string(), timestamp_value(&self.created_at));
        row.insert("updatedAt".to_string(), timestamp_value(&self.updated_at));
        row
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: get_opt_integer(row, "id")?,
            name: get_text(row, "name")?,
            description: get_text(row, "description")?,
            created_at: get_opt_timestamp(row, "createdAt")?,
            updated_at: get_opt_timestamp(row, "updatedAt")?,
            flashcard_count: None,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_sets_created_once() {
        let mut entity = DeckEntity::from_deck(&Deck::new("Capitals", "Geo"));

        entity.stamp();
        let first_created = entity.created_at.unwrap();
        let first_updated = entity.updated_at.unwrap();
        assert!(first_updated >= first_created);

        entity.stamp();
        assert_eq!(entity.created_at.unwrap(), first_created);
        assert!(entity.updated_at.unwrap() >= first_updated);
    }

    #[test]
    fn test_row_entity_row_round_trip() {
        let mut entity = DeckEntity::from_deck(&Deck::new("Capitals", "Geo"));
        entity.stamp();
        entity.assign_key(3);

        let row = entity.to_row();
        let rebuilt = DeckEntity::from_row(&row).unwrap();
        assert_eq!(rebuilt.to_row(), row);
        assert_eq!(rebuilt, entity);
    }

    #[test]
    fn test_transient_row_has_nulls() {
        let entity = DeckEntity::from_deck(&Deck::new("Capitals", "Geo"));
        let row = entity.to_row();

        assert_eq!(row.get("id"), Some(&Value::Null));
        assert_eq!(row.get("createdAt"), Some(&Value::Null));
    }

    #[test]
    fn test_flashcard_count_not_serialized() {
        let mut entity = DeckEntity::from_deck(&Deck::new("Capitals", "Geo"));
        entity.flashcard_count = Some(12);
        assert!(!entity.to_row().contains_key("flashcardCount"));
    }
}
