// Integration tests for the file-backed database lifecycle
// Rows must survive a close-and-reopen, and startup schema creation must be
// idempotent on an existing file.

use recall_core::model::{Deck, Flashcard};
use recall_store::entity::{DeckEntity, FlashcardEntity};
use recall_store::Database;

#[test]
fn test_rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recall.db");

    let deck_id = {
        let db = Database::open(&path).unwrap();
        let mut deck = DeckEntity::from_deck(&Deck::new("Persistent", "p"));
        let deck_id = db.decks().create_deck(&mut deck).unwrap();
        let mut card = FlashcardEntity::from_flashcard(&Flashcard::new(deck_id, "q", "a"));
        db.flashcards().create_flashcard(&mut card).unwrap();
        deck_id
        // db drops here; best-effort close at end of scope
    };

    let db = Database::open(&path).unwrap();
    let deck = db.decks().get_deck_by_id(deck_id).unwrap().unwrap();
    assert_eq!(deck.name, "Persistent");
    assert_eq!(db.decks().get_flashcards_by_deck_id(deck_id).unwrap().len(), 1);
}

#[test]
fn test_cascade_configuration_survives_reopen() {
    // foreign_keys is a per-connection pragma; reopening must re-enable it
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recall.db");

    let deck_id = {
        let db = Database::open(&path).unwrap();
        let mut deck = DeckEntity::from_deck(&Deck::new("Doomed", "d"));
        let deck_id = db.decks().create_deck(&mut deck).unwrap();
        let mut card = FlashcardEntity::from_flashcard(&Flashcard::new(deck_id, "q", "a"));
        db.flashcards().create_flashcard(&mut card).unwrap();
        deck_id
    };

    let db = Database::open(&path).unwrap();
    db.decks().delete_deck(deck_id).unwrap();
    assert!(db.decks().get_flashcards_by_deck_id(deck_id).unwrap().is_empty());
}
