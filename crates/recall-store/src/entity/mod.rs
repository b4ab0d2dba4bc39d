//! Entity base contract
//!
//! Every persisted record converts to and from a flat row representation
//! (column name → SQL value) and manages its own `createdAt`/`updatedAt`
//! stamps. Temporal columns are stored as ISO-8601 text with millisecond
//! precision and a `Z` suffix; integers and text pass through unchanged;
//! absent optionals become SQL NULL.

pub mod deck;
pub mod flashcard;

pub use deck::DeckEntity;
pub use flashcard::FlashcardEntity;

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use rusqlite::types::Value;

use crate::errors::{decode_error, Result};
use crate::schema::TableSchema;

/// Flat row representation: column name → untyped SQL value
pub type Row = BTreeMap<String, Value>;

/// Capability set of every persisted record
pub trait PersistentEntity: Sized {
    /// The descriptor driving SQL generation for this type
    const SCHEMA: &'static TableSchema;

    /// Serialize to a flat row; absent optionals become `Value::Null`
    fn to_row(&self) -> Row;

    /// Reconstruct from a flat row with type coercion
    fn from_row(row: &Row) -> Result<Self>;

    /// The store-assigned primary key, if persisted
    fn key(&self) -> Option<i64>;

    /// Record the store-assigned primary key after a successful insert
    fn assign_key(&mut self, key: i64);

    /// Set `createdAt` if absent and refresh `updatedAt`
    ///
    /// Repeated stamps never decrease `updatedAt`.
    fn stamp(&mut self);
}

/// Encode a native time value into its canonical stored text form
pub fn encode_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decode a stored timestamp; accepts any RFC 3339 offset, normalizes to UTC
pub fn decode_timestamp(column: &str, text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| decode_error(column, &format!("invalid timestamp '{}': {}", text, err)))
}

/// Current time at the precision the store keeps, never earlier than `prev`
///
/// Truncated to milliseconds so an entity in memory equals itself after a
/// store round-trip. If the wall clock steps backwards the previous stamp
/// wins, keeping `updatedAt` monotonically non-decreasing.
pub(crate) fn monotonic_now(prev: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    let now = now
        .with_nanosecond(now.nanosecond() / 1_000_000 * 1_000_000)
        .unwrap_or(now);
    match prev {
        Some(p) if p > now => p,
        _ => now,
    }
}

/// Read a required integer column
pub fn get_integer(row: &Row, column: &str) -> Result<i64> {
    match row.get(column) {
        Some(Value::Integer(v)) => Ok(*v),
        Some(other) => Err(decode_error(
            column,
            &format!("expected INTEGER, got {:?}", other),
        )),
        None => Err(decode_error(column, "required column is missing")),
    }
}

/// Read an optional integer column; NULL or missing becomes None
pub fn get_opt_integer(row: &Row, column: &str) -> Result<Option<i64>> {
    match row.get(column) {
        Some(Value::Integer(v)) => Ok(Some(*v)),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(decode_error(
            column,
            &format!("expected INTEGER, got {:?}", other),
        )),
    }
}

/// Read a required text column
pub fn get_text(row: &Row, column: &str) -> Result<String> {
    match row.get(column) {
        Some(Value::Text(v)) => Ok(v.clone()),
        Some(other) => Err(decode_error(
            column,
            &format!("expected TEXT, got {:?}", other),
        )),
        None => Err(decode_error(column, "required column is missing")),
    }
}

/// Read an optional temporal column; NULL or missing becomes None
pub fn get_opt_timestamp(row: &Row, column: &str) -> Result<Option<DateTime<Utc>>> {
    match row.get(column) {
        Some(Value::Text(v)) => decode_timestamp(column, v).map(Some),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(decode_error(
            column,
            &format!("expected TEXT timestamp, got {:?}", other),
        )),
    }
}

/// Serialize an optional temporal value for storage
pub(crate) fn timestamp_value(dt: &Option<DateTime<Utc>>) -> Value {
    match dt {
        Some(dt) => Value::Text(encode_timestamp(dt)),
        None => Value::Null,
    }
}
