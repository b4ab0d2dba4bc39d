use std::sync::Arc;

use recall_core::errors::{RecallError, RecallErrorKind};
use recall_core::model::{Deck, DeckWithFlashcards};
use recall_core::GeneratedDeck;

use crate::entity::{DeckEntity, FlashcardEntity};
use crate::errors::Result;
use crate::service::Database;

/// Domain repository for decks
pub struct DeckRepository {
    db: Arc<Database>,
}

impl DeckRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All decks with their flashcard counts, most recently touched first
    pub fn get_all(&self) -> Result<Vec<Deck>> {
        let entities = self.db.decks().get_all_decks()?;
        Ok(entities.into_iter().map(DeckEntity::into_deck).collect())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Deck>> {
        let entity = self.db.decks().get_deck_by_id(id)?;
        Ok(entity.map(DeckEntity::into_deck))
    }

    /// Persist a transient deck; returns the record with its key and stamps
    pub fn create(&self, deck: Deck) -> Result<Deck> {
        if deck.is_persisted() {
            return Err(RecallError::new(RecallErrorKind::InvalidArgument)
                .with_op("create_deck")
                .with_message("deck already has an identity"));
        }
        let mut entity = DeckEntity::from_deck(&deck);
        self.db.decks().create_deck(&mut entity)?;
        Ok(entity.into_deck())
    }

    /// Update an existing deck; fails before any store call when the record
    /// has no identity
    pub fn update(&self, deck: &Deck) -> Result<Deck> {
        if !deck.is_persisted() {
            return Err(RecallError::new(RecallErrorKind::InvalidArgument)
                .with_op("update_deck")
                .with_message("cannot update a deck without an id"));
        }
        let mut entity = DeckEntity::from_deck(deck);
        self.db.decks().update_deck(&mut entity)?;
        Ok(entity.into_deck())
    }

    /// Delete a deck; its flashcards go with it via the store's cascade
    pub fn delete(&self, id: i64) -> Result<()> {
        self.db.decks().delete_deck(id)
    }

    /// One deck plus its flashcards in study order, composed from two reads
    pub fn get_with_flashcards(&self, id: i64) -> Result<Option<DeckWithFlashcards>> {
        let deck = match self.db.decks().get_deck_by_id(id)? {
            Some(entity) => entity.into_deck(),
            None => return Ok(None),
        };
        let cards = self.db.decks().get_flashcards_by_deck_id(id)?;
        Ok(Some(DeckWithFlashcards {
            deck,
            flashcards: cards
                .into_iter()
                .map(FlashcardEntity::into_flashcard)
                .collect(),
        }))
    }

    /// Persist a structured generation result as one deck aggregate
    ///
    /// Validates the result's structure, then writes the deck and all its
    /// cards in a single transaction.
    pub fn import_generated(&self, generated: &GeneratedDeck) -> Result<DeckWithFlashcards> {
        generated.validate().map_err(RecallError::from)?;

        let mut deck = DeckEntity::from_deck(&Deck::new(
            generated.name.clone(),
            generated.description.clone(),
        ));
        let mut cards: Vec<FlashcardEntity> = generated
            .cards
            .iter()
            .map(|card| {
                // deckId is pointed at the new deck inside the aggregate write
                FlashcardEntity::from_flashcard(&recall_core::model::Flashcard::new(
                    0,
                    card.question.clone(),
                    card.answer.clone(),
                ))
            })
            .collect();

        self.db
            .decks()
            .create_deck_with_flashcards(&mut deck, &mut cards)?;

        Ok(DeckWithFlashcards {
            deck: deck.into_deck(),
            flashcards: cards
                .into_iter()
                .map(FlashcardEntity::into_flashcard)
                .collect(),
        })
    }
}
