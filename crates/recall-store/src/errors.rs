//! Error handling for recall-store
//!
//! Wraps recall-core's RecallError with store-specific helpers

use recall_core::errors::{RecallError, RecallErrorKind};

/// Result type alias using RecallError
pub type Result<T> = std::result::Result<T, RecallError>;

/// Create a database error from rusqlite::Error
///
/// Constraint failures (NOT NULL, foreign key, uniqueness) are classified
/// separately from other statement failures so callers can distinguish a
/// rejected write from a broken handle.
pub fn from_rusqlite(err: rusqlite::Error) -> RecallError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(ffi_err, _) => match ffi_err.code {
            rusqlite::ErrorCode::ConstraintViolation => RecallErrorKind::ConstraintViolation,
            rusqlite::ErrorCode::CannotOpen
            | rusqlite::ErrorCode::DiskFull
            | rusqlite::ErrorCode::SystemIoFailure => RecallErrorKind::Io,
            _ => RecallErrorKind::Persistence,
        },
        _ => RecallErrorKind::Persistence,
    };
    RecallError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a missing-identity error for a mutation on a transient entity
pub fn missing_key(op: &str, table: &str) -> RecallError {
    RecallError::new(RecallErrorKind::InvalidArgument)
        .with_op(op.to_string())
        .with_message(format!("{} record has no primary key", table))
}

/// Create a NotFound error for a keyed operation that matched no row
pub fn no_row(op: &str, table: &str, key: i64) -> RecallError {
    RecallError::new(RecallErrorKind::NotFound)
        .with_op(op.to_string())
        .with_entity_id(key.to_string())
        .with_message(format!("no {} row matched", table))
}

/// Create a row decode error for a column that failed coercion
pub fn decode_error(column: &str, reason: &str) -> RecallError {
    RecallError::new(RecallErrorKind::Serialization)
        .with_op("decode_row")
        .with_message(format!("column '{}': {}", column, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_failure_classified() {
        let ffi = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT);
        let err = from_rusqlite(rusqlite::Error::SqliteFailure(ffi, None));
        assert_eq!(err.kind(), RecallErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_other_failures_are_persistence() {
        let err = from_rusqlite(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), RecallErrorKind::Persistence);
    }

    #[test]
    fn test_missing_key_is_invalid_argument() {
        let err = missing_key("update", "deck");
        assert_eq!(err.kind(), RecallErrorKind::InvalidArgument);
        assert!(err.to_string().contains("deck"));
    }

    #[test]
    fn test_no_row_carries_key() {
        let err = no_row("update", "flashcard", 9);
        assert_eq!(err.kind(), RecallErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("9"));
    }
}
