// Integration tests for multi-statement aggregate writes
// The deck-plus-initial-flashcards create and the batch flashcard insert
// run inside one transaction: either every row lands or none does.

use recall_core::model::{Deck, Flashcard};
use recall_core::{GeneratedCard, GeneratedDeck};
use recall_store::entity::{DeckEntity, FlashcardEntity};
use recall_store::{Database, DeckRepository};
use std::sync::Arc;

#[test]
fn test_create_deck_with_flashcards_lands_as_one_unit() {
    let db = Database::open_in_memory().unwrap();

    let mut deck = DeckEntity::from_deck(&Deck::new("Aggregate", "all at once"));
    let mut cards: Vec<FlashcardEntity> = (0..3)
        .map(|i| {
            // deckId is rewritten to the new deck inside the aggregate write
            FlashcardEntity::from_flashcard(&Flashcard::new(0, format!("q{}", i), "a"))
        })
        .collect();

    let deck_id = db
        .decks()
        .create_deck_with_flashcards(&mut deck, &mut cards)
        .unwrap();

    assert_eq!(deck.id, Some(deck_id));
    let stored = db.decks().get_flashcards_by_deck_id(deck_id).unwrap();
    assert_eq!(stored.len(), 3);
    for card in &cards {
        assert_eq!(card.deck_id, deck_id);
        assert!(card.id.is_some());
    }
}

#[test]
fn test_batch_insert_rolls_back_on_constraint_violation() {
    // Given: a valid deck and a batch whose second card violates the
    // foreign key
    let db = Database::open_in_memory().unwrap();
    let mut deck = DeckEntity::from_deck(&Deck::new("Partial", "p"));
    let deck_id = db.decks().create_deck(&mut deck).unwrap();

    let mut cards = vec![
        FlashcardEntity::from_flashcard(&Flashcard::new(deck_id, "good", "a")),
        FlashcardEntity::from_flashcard(&Flashcard::new(999, "orphan", "a")),
    ];

    // When: the batch insert fails midway
    let err = db.flashcards().create_flashcards(&mut cards).unwrap_err();
    assert_eq!(
        err.kind(),
        recall_core::RecallErrorKind::ConstraintViolation
    );

    // Then: the first card is rolled back too
    assert!(db.decks().get_flashcards_by_deck_id(deck_id).unwrap().is_empty());
}

#[test]
fn test_import_generated_persists_aggregate() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let repository = DeckRepository::new(db.clone());

    let generated = GeneratedDeck {
        name: "Capitals".to_string(),
        description: "Geo".to_string(),
        cards: vec![
            GeneratedCard {
                question: "Capital of France?".to_string(),
                answer: "Paris".to_string(),
            },
            GeneratedCard {
                question: "Capital of Japan?".to_string(),
                answer: "Tokyo".to_string(),
            },
        ],
    };

    let aggregate = repository.import_generated(&generated).unwrap();

    let deck_id = aggregate.deck.id.unwrap();
    assert_eq!(aggregate.flashcards.len(), 2);
    assert!(aggregate.flashcards.iter().all(|c| c.deck_id == deck_id));

    let reread = repository.get_with_flashcards(deck_id).unwrap().unwrap();
    assert_eq!(reread.flashcards.len(), 2);
    assert_eq!(reread.deck.name, "Capitals");
}

#[test]
fn test_import_generated_rejects_malformed_result_without_writing() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let repository = DeckRepository::new(db.clone());

    let generated = GeneratedDeck {
        name: "Empty".to_string(),
        description: "no cards".to_string(),
        cards: vec![],
    };

    let err = repository.import_generated(&generated).unwrap_err();
    assert_eq!(err.kind(), recall_core::RecallErrorKind::ExternalService);
    assert!(repository.get_all().unwrap().is_empty());
}
