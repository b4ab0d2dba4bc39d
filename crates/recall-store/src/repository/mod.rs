//! Domain repositories
//!
//! The boundary the rest of the application talks to. These translate
//! between persistence entities and the pure domain records of
//! `recall-core`, enforce identity invariants before any store call, and
//! compose aggregate reads in application code.

pub mod deck;
pub mod flashcard;

pub use deck::DeckRepository;
pub use flashcard::FlashcardRepository;
