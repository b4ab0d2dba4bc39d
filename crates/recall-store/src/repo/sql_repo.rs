//! Generic SQL repository
//!
//! Table-agnostic CRUD engine parameterized by a schema descriptor. SQL text
//! is generated from the descriptor, parameters are bound positionally from
//! the serialized row, and result rows are rehydrated through the entity's
//! `from_row`. DAO-level joins and aggregates go through the raw
//! `execute_query`/`execute_update` escape hatches instead.

use std::marker::PhantomData;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};

use crate::entity::{PersistentEntity, Row};
use crate::errors::{from_rusqlite, missing_key, no_row, Result};
use crate::schema::TableSchema;

/// Generic repository over one entity type
pub struct SqlRepo<E> {
    _entity: PhantomData<E>,
}

impl<E: PersistentEntity> SqlRepo<E> {
    /// Find one entity by primary key; absence is `None`, not an error
    pub fn find_by_id(conn: &Connection, key: i64) -> Result<Option<E>> {
        let schema = E::SCHEMA;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            schema.select_list(),
            schema.table,
            schema.primary_key
        );

        let row = conn
            .query_row(&sql, [key], |sql_row| read_schema_row(schema, sql_row))
            .optional()
            .map_err(from_rusqlite)?;

        match row {
            Some(row) => E::from_row(&row).map(Some),
            None => Ok(None),
        }
    }

    /// Load every row of the table, in storage order
    pub fn find_all(conn: &Connection) -> Result<Vec<E>> {
        let schema = E::SCHEMA;
        let sql = format!("SELECT {} FROM {}", schema.select_list(), schema.table);

        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows: Vec<Row> = stmt
            .query_map([], |sql_row| read_schema_row(schema, sql_row))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.iter().map(|row| E::from_row(row)).collect()
    }

    /// Insert a new row and record the store-assigned key on the entity
    ///
    /// The generated INSERT lists every column except a store-assigned
    /// primary key. Foreign-key and NOT NULL violations propagate as
    /// `ConstraintViolation`.
    pub fn insert(conn: &Connection, entity: &mut E) -> Result<i64> {
        let schema = E::SCHEMA;
        let row = entity.to_row();

        let columns: Vec<&str> = schema.insert_columns().map(|col| col.name).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            schema.table,
            columns.join(", "),
            placeholders.join(", ")
        );

        let params: Vec<Value> = columns
            .iter()
            .map(|name| row.get(*name).cloned().unwrap_or(Value::Null))
            .collect();

        conn.execute(&sql, params_from_iter(params))
            .map_err(from_rusqlite)?;

        let key = conn.last_insert_rowid();
        entity.assign_key(key);
        Ok(key)
    }

    /// Update all non-key columns of an existing row
    ///
    /// Requires a present primary key. A zero-row match surfaces as
    /// `NotFound` rather than succeeding silently.
    pub fn update(conn: &Connection, entity: &E) -> Result<()> {
        let schema = E::SCHEMA;
        let key = entity
            .key()
            .ok_or_else(|| missing_key("update", schema.table))?;
        let row = entity.to_row();

        let columns: Vec<&str> = schema.update_columns().map(|col| col.name).collect();
        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{} = ?{}", name, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            schema.table,
            assignments.join(", "),
            schema.primary_key,
            columns.len() + 1
        );

        let mut params: Vec<Value> = columns
            .iter()
            .map(|name| row.get(*name).cloned().unwrap_or(Value::Null))
            .collect();
        params.push(Value::Integer(key));

        let affected = conn
            .execute(&sql, params_from_iter(params))
            .map_err(from_rusqlite)?;
        if affected == 0 {
            return Err(no_row("update", schema.table, key));
        }
        Ok(())
    }

    /// Insert when the entity has no key yet, update otherwise
    pub fn save(conn: &Connection, entity: &mut E) -> Result<()> {
        if entity.key().is_some() {
            Self::update(conn, entity)
        } else {
            Self::insert(conn, entity).map(|_| ())
        }
    }

    /// Delete the row backing an entity; requires a present key
    pub fn delete(conn: &Connection, entity: &E) -> Result<()> {
        let schema = E::SCHEMA;
        let key = entity
            .key()
            .ok_or_else(|| missing_key("delete", schema.table))?;
        Self::delete_by_id(conn, key)
    }

    /// Delete by primary key
    ///
    /// Dependent rows are removed by the store's cascade rule; this layer
    /// issues no cascading statements.
    pub fn delete_by_id(conn: &Connection, key: i64) -> Result<()> {
        let schema = E::SCHEMA;
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1",
            schema.table, schema.primary_key
        );
        conn.execute(&sql, [key]).map_err(from_rusqlite)?;
        Ok(())
    }

    /// Count all rows of the table
    pub fn count(conn: &Connection) -> Result<i64> {
        let schema = E::SCHEMA;
        let sql = format!("SELECT COUNT(*) FROM {}", schema.table);
        conn.query_row(&sql, [], |row| row.get(0))
            .map_err(from_rusqlite)
    }
}

/// Build a flat row from a statement result, following the descriptor's
/// column order
fn read_schema_row(schema: &TableSchema, sql_row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
    let mut row = Row::new();
    for (i, col) in schema.columns.iter().enumerate() {
        row.insert(col.name.to_string(), sql_row.get::<_, Value>(i)?);
    }
    Ok(row)
}

/// Run a hand-written query and return its raw rows
///
/// Escape hatch for DAO joins and aggregates; entity reconstruction is the
/// caller's job. Column names come from the statement, so computed columns
/// (counts, aliases) are preserved.
pub fn execute_query(conn: &Connection, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let rows = stmt
        .query_map(params_from_iter(params.iter().cloned()), |sql_row| {
            let mut row = Row::new();
            for (i, name) in names.iter().enumerate() {
                row.insert(name.clone(), sql_row.get::<_, Value>(i)?);
            }
            Ok(row)
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(rows)
}

/// Run a hand-written mutation and return the affected row count
pub fn execute_update(conn: &Connection, sql: &str, params: &[Value]) -> Result<usize> {
    conn.execute(sql, params_from_iter(params.iter().cloned()))
        .map_err(from_rusqlite)
}
