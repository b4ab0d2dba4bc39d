//! Database service
//!
//! Owns the single connection to the embedded store and the startup schema
//! creation. All storage access goes through the DAOs exposed here; no other
//! component opens a connection. The service is an explicit value passed
//! down (typically as `Arc<Database>`), so tests can construct isolated
//! in-memory instances.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use crate::dao::{DeckDao, FlashcardDao};
use crate::db;
use crate::errors::Result;
use crate::repo::execute_update;
use crate::schema;

/// Default database file name for hosts that do not choose their own
pub const DEFAULT_DATABASE_FILE: &str = "recall.db";

/// Process-wide handle to one open connection
///
/// All repository operations are sequential, blocking calls against this
/// connection; the mutex serializes parallel callers so at most one
/// statement is in flight.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a file-backed database and prepare its schema
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        Self::bootstrap(conn)
    }

    /// Open an isolated in-memory database (tests, previews)
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        schema::create_all(&conn)?;
        debug!("database schema ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Deck operations
    pub fn decks(&self) -> DeckDao<'_> {
        DeckDao::new(self)
    }

    /// Flashcard operations
    pub fn flashcards(&self) -> FlashcardDao<'_> {
        FlashcardDao::new(self)
    }

    /// Remove every row from every table (test/dev helper)
    ///
    /// Children first so the statements succeed regardless of cascade
    /// configuration.
    pub fn clear_all(&self) -> Result<()> {
        self.with_conn(|conn| {
            execute_update(conn, "DELETE FROM flashcard", &[])?;
            execute_update(conn, "DELETE FROM deck", &[])?;
            Ok(())
        })
    }

    /// Run `f` with exclusive access to the connection
    pub(crate) fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut guard = match self.conn.lock() {
            Ok(guard) => guard,
            // A panicked holder cannot leave a rusqlite handle in a torn
            // state; recover the guard rather than propagate the poison.
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}
