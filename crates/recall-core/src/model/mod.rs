pub mod deck;
pub mod flashcard;

pub use deck::{Deck, DeckWithFlashcards};
pub use flashcard::Flashcard;
