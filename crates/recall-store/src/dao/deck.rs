use rusqlite::types::Value;
use tracing::debug;

use crate::entity::{get_opt_integer, DeckEntity, FlashcardEntity, PersistentEntity};
use crate::errors::{from_rusqlite, Result};
use crate::repo::{execute_query, SqlRepo};
use crate::service::Database;

/// Deck list query: every deck joined with its flashcard count, most
/// recently touched first. ISO-8601 text compares chronologically; the key
/// breaks ties between equal stamps.
const ALL_DECKS_SQL: &str = "SELECT d.id, d.name, d.description, d.createdAt, d.updatedAt, \
     COUNT(f.id) AS flashcardCount \
     FROM deck d \
     LEFT JOIN flashcard f ON d.id = f.deckId \
     GROUP BY d.id \
     ORDER BY d.updatedAt DESC, d.id DESC";

/// Child fetch in stable study order; id breaks ties between equal
/// creation timestamps so insertion order is preserved.
const DECK_FLASHCARDS_SQL: &str = "SELECT id, deckId, question, answer, createdAt, updatedAt, lastReviewed \
     FROM flashcard WHERE deckId = ?1 \
     ORDER BY createdAt ASC, id ASC";

/// Data access for the deck table
pub struct DeckDao<'db> {
    db: &'db Database,
}

impl<'db> DeckDao<'db> {
    pub(crate) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// All decks with their computed flashcard counts, ordered by
    /// `updatedAt` descending
    pub fn get_all_decks(&self) -> Result<Vec<DeckEntity>> {
        self.db.with_conn(|conn| {
            let rows = execute_query(conn, ALL_DECKS_SQL, &[])?;
            rows.iter()
                .map(|row| {
                    let mut deck = DeckEntity::from_row(row)?;
                    deck.flashcard_count = Some(get_opt_integer(row, "flashcardCount")?.unwrap_or(0));
                    Ok(deck)
                })
                .collect()
        })
    }

    pub fn get_deck_by_id(&self, deck_id: i64) -> Result<Option<DeckEntity>> {
        self.db
            .with_conn(|conn| SqlRepo::find_by_id(conn, deck_id))
    }

    /// Stamp timestamps and insert; returns the store-assigned key
    pub fn create_deck(&self, deck: &mut DeckEntity) -> Result<i64> {
        self.db.with_conn(|conn| {
            deck.stamp();
            SqlRepo::insert(conn, deck)
        })
    }

    /// Create a deck together with its initial flashcards as one unit
    ///
    /// Both the deck insert and every flashcard insert run inside a single
    /// transaction: either all rows exist afterwards or none do. Each card's
    /// `deckId` is pointed at the new deck before insertion.
    pub fn create_deck_with_flashcards(
        &self,
        deck: &mut DeckEntity,
        cards: &mut [FlashcardEntity],
    ) -> Result<i64> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction().map_err(from_rusqlite)?;

            deck.stamp();
            let deck_id = SqlRepo::insert(&tx, deck)?;

            for card in cards.iter_mut() {
                card.deck_id = deck_id;
                card.stamp();
                SqlRepo::insert(&tx, card)?;
            }

            tx.commit().map_err(from_rusqlite)?;
            debug!(deck_id, cards = cards.len(), "created deck aggregate");
            Ok(deck_id)
        })
    }

    /// Stamp timestamps and update
    pub fn update_deck(&self, deck: &mut DeckEntity) -> Result<()> {
        self.db.with_conn(|conn| {
            deck.stamp();
            SqlRepo::update(conn, deck)
        })
    }

    /// Delete by key; owned flashcards are removed by the store's cascade
    pub fn delete_deck(&self, deck_id: i64) -> Result<()> {
        self.db
            .with_conn(|conn| SqlRepo::<DeckEntity>::delete_by_id(conn, deck_id))
    }

    pub fn delete_deck_entity(&self, deck: &DeckEntity) -> Result<()> {
        self.db.with_conn(|conn| SqlRepo::delete(conn, deck))
    }

    /// Flashcards of one deck in stable study order (creation time, then key)
    pub fn get_flashcards_by_deck_id(&self, deck_id: i64) -> Result<Vec<FlashcardEntity>> {
        self.db.with_conn(|conn| {
            let rows = execute_query(conn, DECK_FLASHCARDS_SQL, &[Value::Integer(deck_id)])?;
            rows.iter().map(FlashcardEntity::from_row).collect()
        })
    }
}
