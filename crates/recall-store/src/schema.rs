//! Schema descriptor registry
//!
//! Static, immutable metadata describing how each entity type maps onto its
//! table: column list with storage types and nullability, primary key,
//! foreign keys with delete rule, and secondary indexes. The generic
//! repository consults these descriptors at call time to generate SQL; table
//! creation at startup is derived from the same source.
//!
//! Descriptors are associated with entity types through
//! [`PersistentEntity::SCHEMA`](crate::entity::PersistentEntity), so an
//! entity without a descriptor cannot compile.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;

/// Storage class of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit integer
    Integer,
    /// UTF-8 text
    Text,
    /// ISO-8601 text requiring coercion to/from a native time value
    Timestamp,
}

impl ColumnType {
    /// SQL storage type for the column definition
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Timestamp => "TEXT",
        }
    }
}

/// One column of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub not_null: bool,
}

/// Delete rule of a foreign-key relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRule {
    Cascade,
    Restrict,
}

impl DeleteRule {
    pub fn sql(&self) -> &'static str {
        match self {
            DeleteRule::Cascade => "CASCADE",
            DeleteRule::Restrict => "RESTRICT",
        }
    }
}

/// A foreign-key relation from one column to another table's column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
    pub on_delete: DeleteRule,
}

/// A secondary index over a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub column: &'static str,
}

/// Immutable descriptor for one entity table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub table: &'static str,
    /// Ordered column list; the primary key must appear in it
    pub columns: &'static [Column],
    pub primary_key: &'static str,
    /// Whether the store assigns the key on insert
    pub auto_key: bool,
    pub foreign_keys: &'static [ForeignKey],
    pub indexes: &'static [IndexDef],
}

impl TableSchema {
    /// Columns written by the repository on insert (everything except a
    /// store-assigned primary key)
    pub fn insert_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(move |col| !(self.auto_key && col.name == self.primary_key))
    }

    /// Columns written on update (everything except the primary key)
    pub fn update_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(move |col| col.name != self.primary_key)
    }

    /// Comma-separated column list for SELECT statements
    pub fn select_list(&self) -> String {
        self.columns
            .iter()
            .map(|col| col.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Generate the CREATE TABLE statement for this descriptor
    pub fn create_table_sql(&self) -> String {
        let mut definitions: Vec<String> = self
            .columns
            .iter()
            .map(|col| {
                let mut definition = format!("{} {}", col.name, col.ty.sql_type());
                if col.name == self.primary_key {
                    definition.push_str(" PRIMARY KEY");
                    if self.auto_key {
                        definition.push_str(" AUTOINCREMENT");
                    }
                } else if col.not_null {
                    definition.push_str(" NOT NULL");
                }
                definition
            })
            .collect();

        for fk in self.foreign_keys {
            definitions.push(format!(
                "FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
                fk.column,
                fk.references_table,
                fk.references_column,
                fk.on_delete.sql()
            ));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.table,
            definitions.join(", ")
        )
    }

    /// Generate the CREATE INDEX statements for this descriptor
    pub fn create_index_sql(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|idx| {
                format!(
                    "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                    idx.name, self.table, idx.column
                )
            })
            .collect()
    }
}

/// Descriptor for the deck table
pub const DECK: TableSchema = TableSchema {
    table: "deck",
    columns: &[
        Column {
            name: "id",
            ty: ColumnType::Integer,
            not_null: false,
        },
        Column {
            name: "name",
            ty: ColumnType::Text,
            not_null: true,
        },
        Column {
            name: "description",
            ty: ColumnType::Text,
            not_null: true,
        },
        Column {
            name: "createdAt",
            ty: ColumnType::Timestamp,
            not_null: false,
        },
        Column {
            name: "updatedAt",
            ty: ColumnType::Timestamp,
            not_null: false,
        },
    ],
    primary_key: "id",
    auto_key: true,
    foreign_keys: &[],
    indexes: &[],
};

/// Descriptor for the flashcard table
pub const FLASHCARD: TableSchema = TableSchema {
    table: "flashcard",
    columns: &[
        Column {
            name: "id",
            ty: ColumnType::Integer,
            not_null: false,
        },
        Column {
            name: "deckId",
            ty: ColumnType::Integer,
            not_null: true,
        },
        Column {
            name: "question",
            ty: ColumnType::Text,
            not_null: true,
        },
        Column {
            name: "answer",
            ty: ColumnType::Text,
            not_null: true,
        },
        Column {
            name: "createdAt",
            ty: ColumnType::Timestamp,
            not_null: false,
        },
        Column {
            name: "updatedAt",
            ty: ColumnType::Timestamp,
            not_null: false,
        },
        Column {
            name: "lastReviewed",
            ty: ColumnType::Timestamp,
            not_null: false,
        },
    ],
    primary_key: "id",
    auto_key: true,
    foreign_keys: &[ForeignKey {
        column: "deckId",
        references_table: "deck",
        references_column: "id",
        on_delete: DeleteRule::Cascade,
    }],
    indexes: &[IndexDef {
        name: "idx_flashcard_deckId",
        column: "deckId",
    }],
};

/// All registered descriptors, in creation order (parents before children)
pub fn all() -> [&'static TableSchema; 2] {
    [&DECK, &FLASHCARD]
}

/// Create every registered table and index if missing
pub fn create_all(conn: &Connection) -> Result<()> {
    for table in all() {
        conn.execute(&table.create_table_sql(), [])
            .map_err(from_rusqlite)?;
        for index_sql in table.create_index_sql() {
            conn.execute(&index_sql, []).map_err(from_rusqlite)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_create_table_sql() {
        assert_eq!(
            DECK.create_table_sql(),
            "CREATE TABLE IF NOT EXISTS deck (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL, description TEXT NOT NULL, createdAt TEXT, updatedAt TEXT)"
        );
    }

    #[test]
    fn test_flashcard_create_table_sql_has_cascade() {
        let sql = FLASHCARD.create_table_sql();
        assert!(sql.contains("deckId INTEGER NOT NULL"));
        assert!(sql.contains("FOREIGN KEY (deckId) REFERENCES deck (id) ON DELETE CASCADE"));
    }

    #[test]
    fn test_flashcard_index_sql() {
        assert_eq!(
            FLASHCARD.create_index_sql(),
            vec!["CREATE INDEX IF NOT EXISTS idx_flashcard_deckId ON flashcard (deckId)"]
        );
    }

    #[test]
    fn test_insert_columns_skip_auto_key() {
        let names: Vec<&str> = DECK.insert_columns().map(|c| c.name).collect();
        assert_eq!(names, vec!["name", "description", "createdAt", "updatedAt"]);
    }

    #[test]
    fn test_update_columns_skip_primary_key() {
        let names: Vec<&str> = FLASHCARD.update_columns().map(|c| c.name).collect();
        assert!(!names.contains(&"id"));
        assert!(names.contains(&"lastReviewed"));
    }

    #[test]
    fn test_create_all_is_idempotent() {
        let conn = crate::db::open_in_memory().unwrap();
        create_all(&conn).unwrap();
        create_all(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('deck', 'flashcard')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }
}
