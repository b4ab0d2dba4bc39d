//! Recall Core - domain records and shared facilities
//!
//! This crate provides the storage-agnostic half of the Recall flashcard
//! system:
//! - Deck and Flashcard domain records consumed by the presentation layer
//! - The canonical error facility with a stable code taxonomy
//! - The structured logging facility (single initialization point)
//! - The deck-generation interface boundary (`DeckGenerator`)
//!
//! Persistence lives in `recall-store`; nothing in this crate touches a
//! connection handle.

pub mod errors;
pub mod generate;
pub mod logging;
pub mod model;

// Re-export commonly used types
pub use errors::{RecallError, RecallErrorKind, Result};
pub use generate::{DeckGenerator, GenerateError, GeneratedCard, GeneratedDeck};
pub use model::{Deck, DeckWithFlashcards, Flashcard};
