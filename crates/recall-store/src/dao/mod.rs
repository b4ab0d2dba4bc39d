//! Specialized data-access objects
//!
//! Domain-specific queries layered on the generic repository: aggregate
//! joins, ordered child fetches, cascade-aware deletes, and the
//! mark-reviewed mutation. DAOs stamp timestamps before delegating writes.

pub mod deck;
pub mod flashcard;

pub use deck::DeckDao;
pub use flashcard::FlashcardDao;
