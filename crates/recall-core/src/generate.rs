//! Deck-generation interface boundary
//!
//! The generation cycle itself (prompt construction, network call, response
//! parsing) lives outside this system. The core consumes one contract: given
//! a topic and a requested card count, a generator produces a structured
//! deck or an error. The persistence layer stores the structured result
//! as-is; it never parses free text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{RecallError, RecallErrorKind};

/// One generated question/answer pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCard {
    pub question: String,
    pub answer: String,
}

/// A structured generation result ready for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDeck {
    pub name: String,
    pub description: String,
    pub cards: Vec<GeneratedCard>,
}

impl GeneratedDeck {
    /// Validate the structural requirements of a generation result
    ///
    /// A usable result has a non-empty name, at least one card, and no card
    /// with an empty question or answer.
    pub fn validate(&self) -> std::result::Result<(), GenerateError> {
        if self.name.trim().is_empty() {
            return Err(GenerateError::Malformed("deck name is empty".to_string()));
        }
        if self.cards.is_empty() {
            return Err(GenerateError::Malformed(
                "generated deck has no cards".to_string(),
            ));
        }
        for (i, card) in self.cards.iter().enumerate() {
            if card.question.trim().is_empty() || card.answer.trim().is_empty() {
                return Err(GenerateError::Malformed(format!(
                    "card {} has an empty question or answer",
                    i
                )));
            }
        }
        Ok(())
    }
}

/// Failure modes of the generation boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The backing service could not be reached or is not configured
    #[error("generation backend unavailable: {0}")]
    Unavailable(String),

    /// The backing service answered but generation failed
    #[error("generation failed: {0}")]
    Failed(String),

    /// The service produced a result that fails structural validation
    #[error("malformed generation result: {0}")]
    Malformed(String),
}

impl From<GenerateError> for RecallError {
    fn from(err: GenerateError) -> Self {
        RecallError::new(RecallErrorKind::ExternalService)
            .with_op("generate_deck")
            .with_message(err.to_string())
    }
}

/// Contract for anything that can produce a flashcard deck for a topic
pub trait DeckGenerator {
    /// Produce a structured deck of roughly `card_count` cards about `topic`
    fn generate(
        &self,
        topic: &str,
        card_count: usize,
    ) -> std::result::Result<GeneratedDeck, GenerateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneratedDeck {
        GeneratedDeck {
            name: "Capitals".to_string(),
            description: "Geo".to_string(),
            cards: vec![GeneratedCard {
                question: "Capital of France?".to_string(),
                answer: "Paris".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_deck_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut deck = sample();
        deck.name = "  ".to_string();
        assert!(matches!(
            deck.validate(),
            Err(GenerateError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_card_list_rejected() {
        let mut deck = sample();
        deck.cards.clear();
        assert!(matches!(
            deck.validate(),
            Err(GenerateError::Malformed(_))
        ));
    }

    #[test]
    fn test_blank_answer_rejected() {
        let mut deck = sample();
        deck.cards[0].answer = String::new();
        assert!(matches!(
            deck.validate(),
            Err(GenerateError::Malformed(_))
        ));
    }

    #[test]
    fn test_converts_to_external_service_error() {
        let err: RecallError = GenerateError::Failed("rate limited".to_string()).into();
        assert_eq!(err.kind(), RecallErrorKind::ExternalService);
        assert!(err.to_string().contains("rate limited"));
    }
}
