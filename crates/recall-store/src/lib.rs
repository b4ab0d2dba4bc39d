//! Recall Store - SQLite persistence layer
//!
//! Provides:
//! - Static schema descriptors driving table creation and generated SQL
//! - Persistent entities with row conversion and timestamp self-management
//! - A table-agnostic SQL repository parameterized by descriptor
//! - Deck/Flashcard DAOs (aggregate joins, ordered fetches, reviewed marks)
//! - Domain repositories bridging entities to `recall-core` records
//! - The `Database` service owning the single connection

pub mod dao;
pub mod db;
pub mod entity;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod schema;
pub mod service;

// Re-export key types
pub use errors::Result;
pub use repository::{DeckRepository, FlashcardRepository};
pub use service::Database;
