use crate::dao::deck::DeckDao;
use crate::entity::{FlashcardEntity, PersistentEntity};
use crate::errors::{from_rusqlite, Result};
use crate::repo::SqlRepo;
use crate::service::Database;

/// Data access for the flashcard table
pub struct FlashcardDao<'db> {
    db: &'db Database,
}

impl<'db> FlashcardDao<'db> {
    pub(crate) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Stamp timestamps and insert; returns the store-assigned key
    pub fn create_flashcard(&self, card: &mut FlashcardEntity) -> Result<i64> {
        self.db.with_conn(|conn| {
            card.stamp();
            SqlRepo::insert(conn, card)
        })
    }

    /// Insert a batch of flashcards inside one transaction
    ///
    /// Either every card is persisted or none is.
    pub fn create_flashcards(&self, cards: &mut [FlashcardEntity]) -> Result<()> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction().map_err(from_rusqlite)?;
            for card in cards.iter_mut() {
                card.stamp();
                SqlRepo::insert(&tx, card)?;
            }
            tx.commit().map_err(from_rusqlite)
        })
    }

    pub fn find_by_id(&self, flashcard_id: i64) -> Result<Option<FlashcardEntity>> {
        self.db
            .with_conn(|conn| SqlRepo::find_by_id(conn, flashcard_id))
    }

    /// Flashcards of one deck in stable study order
    pub fn get_all_flashcards_from_deck_id(&self, deck_id: i64) -> Result<Vec<FlashcardEntity>> {
        DeckDao::new(self.db).get_flashcards_by_deck_id(deck_id)
    }

    /// Stamp timestamps and update
    pub fn update_flashcard(&self, card: &mut FlashcardEntity) -> Result<()> {
        self.db.with_conn(|conn| {
            card.stamp();
            SqlRepo::update(conn, card)
        })
    }

    pub fn delete_flashcard(&self, card: &FlashcardEntity) -> Result<()> {
        self.db.with_conn(|conn| SqlRepo::delete(conn, card))
    }

    pub fn delete_flashcard_by_id(&self, flashcard_id: i64) -> Result<()> {
        self.db
            .with_conn(|conn| SqlRepo::<FlashcardEntity>::delete_by_id(conn, flashcard_id))
    }

    /// Record a review on the card: reads the row, stamps `lastReviewed`
    /// and `updatedAt`, writes it back (two store round-trips)
    ///
    /// Returns `Ok(None)` when the card does not exist; absence is
    /// observable without being an error.
    pub fn mark_as_reviewed(&self, flashcard_id: i64) -> Result<Option<FlashcardEntity>> {
        self.db.with_conn(|conn| {
            let card = SqlRepo::<FlashcardEntity>::find_by_id(conn, flashcard_id)?;
            match card {
                Some(mut card) => {
                    card.mark_reviewed();
                    SqlRepo::update(conn, &card)?;
                    Ok(Some(card))
                }
                None => Ok(None),
            }
        })
    }
}
