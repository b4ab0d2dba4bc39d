use std::sync::Arc;

use recall_core::errors::{RecallError, RecallErrorKind};
use recall_core::model::Flashcard;

use crate::entity::FlashcardEntity;
use crate::errors::Result;
use crate::service::Database;

/// Domain repository for flashcards
pub struct FlashcardRepository {
    db: Arc<Database>,
}

impl FlashcardRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All flashcards of one deck in study order
    pub fn get_by_deck_id(&self, deck_id: i64) -> Result<Vec<Flashcard>> {
        let entities = self.db.flashcards().get_all_flashcards_from_deck_id(deck_id)?;
        Ok(entities
            .into_iter()
            .map(FlashcardEntity::into_flashcard)
            .collect())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Flashcard>> {
        let entity = self.db.flashcards().find_by_id(id)?;
        Ok(entity.map(FlashcardEntity::into_flashcard))
    }

    /// Persist a transient flashcard; returns the record with key and stamps
    pub fn create(&self, card: Flashcard) -> Result<Flashcard> {
        if card.is_persisted() {
            return Err(RecallError::new(RecallErrorKind::InvalidArgument)
                .with_op("create_flashcard")
                .with_message("flashcard already has an identity"));
        }
        let mut entity = FlashcardEntity::from_flashcard(&card);
        self.db.flashcards().create_flashcard(&mut entity)?;
        Ok(entity.into_flashcard())
    }

    /// Persist a batch of transient flashcards as one unit
    pub fn create_many(&self, cards: Vec<Flashcard>) -> Result<Vec<Flashcard>> {
        if let Some(card) = cards.iter().find(|card| card.is_persisted()) {
            return Err(RecallError::new(RecallErrorKind::InvalidArgument)
                .with_op("create_flashcards")
                .with_entity_id(card.id.unwrap_or_default().to_string())
                .with_message("batch contains an already-persisted flashcard"));
        }
        let mut entities: Vec<FlashcardEntity> =
            cards.iter().map(FlashcardEntity::from_flashcard).collect();
        self.db.flashcards().create_flashcards(&mut entities)?;
        Ok(entities
            .into_iter()
            .map(FlashcardEntity::into_flashcard)
            .collect())
    }

    /// Update an existing flashcard; fails before any store call when the
    /// record has no identity
    pub fn update(&self, card: &Flashcard) -> Result<Flashcard> {
        if !card.is_persisted() {
            return Err(RecallError::new(RecallErrorKind::InvalidArgument)
                .with_op("update_flashcard")
                .with_message("cannot update a flashcard without an id"));
        }
        let mut entity = FlashcardEntity::from_flashcard(card);
        self.db.flashcards().update_flashcard(&mut entity)?;
        Ok(entity.into_flashcard())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.db.flashcards().delete_flashcard_by_id(id)
    }

    /// Record a review; `Ok(None)` when the card does not exist
    pub fn mark_as_reviewed(&self, id: i64) -> Result<Option<Flashcard>> {
        let entity = self.db.flashcards().mark_as_reviewed(id)?;
        Ok(entity.map(FlashcardEntity::into_flashcard))
    }
}
