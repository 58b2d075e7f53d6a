use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::StorageError;

// `created_at` keeps the exact RFC 3339 timestamp; `created_at_us` is the
// sort key, since RFC 3339 text with variable fractional digits does not sort.
const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS predictions (
        id TEXT PRIMARY KEY,
        gad REAL NOT NULL,
        hba1c REAL NOT NULL,
        bmi REAL NOT NULL,
        age REAL NOT NULL,
        cpeptide REAL NOT NULL,
        glucose REAL NOT NULL,
        cluster_label TEXT NOT NULL,
        probabilities TEXT NOT NULL,
        medications TEXT,
        created_at TEXT NOT NULL,
        created_at_us INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_predictions_created
        ON predictions(created_at_us DESC);

    CREATE TABLE IF NOT EXISTS medication_changes (
        id TEXT PRIMARY KEY,
        prediction_id TEXT,
        medications TEXT NOT NULL,
        created_at TEXT NOT NULL,
        created_at_us INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_medication_changes_created
        ON medication_changes(created_at_us DESC);
";

/// A SQLite database holding predictions and medication changes.
///
/// Calls block on the connection lock; async callers should run them on a
/// blocking thread.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "opened prediction store");
        Self::init(conn)
    }

    /// A private in-memory database, discarded on drop.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

/// Page size clamp shared by the list queries.
pub(crate) fn clamp_limit(limit: usize) -> i64 {
    limit.clamp(1, 1000) as i64
}
