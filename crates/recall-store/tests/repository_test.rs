// Integration tests for the domain repositories
// The repositories are the only surface the rest of the application sees:
// they translate entities to domain records and enforce identity
// invariants before a single store call is issued.

use recall_core::model::{Deck, Flashcard};
use recall_core::RecallErrorKind;
use recall_store::{Database, DeckRepository, FlashcardRepository};
use std::sync::Arc;

fn setup() -> (Arc<Database>, DeckRepository, FlashcardRepository) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    (
        db.clone(),
        DeckRepository::new(db.clone()),
        FlashcardRepository::new(db),
    )
}

#[test]
fn test_create_returns_persisted_record() {
    let (_db, decks, _cards) = setup();

    let deck = decks.create(Deck::new("Capitals", "Geo")).unwrap();

    assert!(deck.is_persisted());
    assert!(deck.created_at.is_some());
    assert!(deck.updated_at.is_some());
    assert!(deck.updated_at.unwrap() >= deck.created_at.unwrap());
}

#[test]
fn test_update_without_id_fails_before_storage() {
    let (_db, decks, _cards) = setup();

    let err = decks.update(&Deck::new("No id", "n")).unwrap_err();

    assert_eq!(err.kind(), RecallErrorKind::InvalidArgument);
    // Nothing reached the store
    assert!(decks.get_all().unwrap().is_empty());
}

#[test]
fn test_flashcard_update_without_id_fails_before_storage() {
    let (_db, decks, cards) = setup();
    let deck = decks.create(Deck::new("D", "d")).unwrap();

    let err = cards
        .update(&Flashcard::new(deck.id.unwrap(), "q", "a"))
        .unwrap_err();

    assert_eq!(err.kind(), RecallErrorKind::InvalidArgument);
    assert!(cards.get_by_deck_id(deck.id.unwrap()).unwrap().is_empty());
}

#[test]
fn test_update_refreshes_updated_at_only() {
    let (_db, decks, _cards) = setup();
    let mut deck = decks.create(Deck::new("Before", "b")).unwrap();
    let created = deck.created_at.unwrap();
    let first_update = deck.updated_at.unwrap();

    deck.name = "After".to_string();
    let updated = decks.update(&deck).unwrap();

    assert_eq!(updated.created_at.unwrap(), created);
    assert!(updated.updated_at.unwrap() >= first_update);
    assert_eq!(
        decks.get_by_id(deck.id.unwrap()).unwrap().unwrap().name,
        "After"
    );
}

#[test]
fn test_update_with_stale_id_is_not_found() {
    let (_db, decks, _cards) = setup();
    let mut deck = decks.create(Deck::new("Gone", "g")).unwrap();
    decks.delete(deck.id.unwrap()).unwrap();

    deck.name = "Too late".to_string();
    let err = decks.update(&deck).unwrap_err();
    assert_eq!(err.kind(), RecallErrorKind::NotFound);
}

#[test]
fn test_get_with_flashcards_composes_aggregate() {
    let (_db, decks, cards) = setup();
    let deck = decks.create(Deck::new("Agg", "a")).unwrap();
    let deck_id = deck.id.unwrap();
    cards.create(Flashcard::new(deck_id, "q1", "a1")).unwrap();
    cards.create(Flashcard::new(deck_id, "q2", "a2")).unwrap();

    let aggregate = decks.get_with_flashcards(deck_id).unwrap().unwrap();
    assert_eq!(aggregate.deck.id, Some(deck_id));
    assert_eq!(aggregate.flashcards.len(), 2);
    assert_eq!(aggregate.flashcards[0].question, "q1");

    assert!(decks.get_with_flashcards(404).unwrap().is_none());
}

#[test]
fn test_create_many_returns_keys_in_order() {
    let (_db, decks, cards) = setup();
    let deck = decks.create(Deck::new("Batch", "b")).unwrap();
    let deck_id = deck.id.unwrap();

    let created = cards
        .create_many(vec![
            Flashcard::new(deck_id, "q1", "a1"),
            Flashcard::new(deck_id, "q2", "a2"),
            Flashcard::new(deck_id, "q3", "a3"),
        ])
        .unwrap();

    assert_eq!(created.len(), 3);
    assert!(created.iter().all(|card| card.is_persisted()));
    let fetched = cards.get_by_deck_id(deck_id).unwrap();
    assert_eq!(
        fetched.iter().map(|c| c.question.as_str()).collect::<Vec<_>>(),
        vec!["q1", "q2", "q3"]
    );
}

#[test]
fn test_mark_as_reviewed_surfaces_absence_as_none() {
    let (_db, _decks, cards) = setup();
    assert!(cards.mark_as_reviewed(404).unwrap().is_none());
}

#[test]
fn test_deck_list_exposes_counts() {
    let (_db, decks, cards) = setup();
    let deck = decks.create(Deck::new("Counted", "c")).unwrap();
    cards
        .create(Flashcard::new(deck.id.unwrap(), "q", "a"))
        .unwrap();

    let all = decks.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].flashcard_count, Some(1));
}
