pub mod gigs;
pub mod merch;
pub mod schema;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::AppError;

/// Shared connection handed out to repositories
pub type DbHandle = Arc<Mutex<Connection>>;

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Lazily opened, process-wide database handle
///
/// The file is opened on the first `handle()` call. Concurrent first callers
/// wait on the same initialisation, so the open and the first schema pass
/// run exactly once. A single mobile user needs no connection pool; the
/// `Mutex` serialises statements the same way `DbState` does for commands.
pub struct Database {
    location: Location,
    cell: OnceCell<DbHandle>,
    opens: AtomicUsize,
    schema_runs: AtomicUsize,
}

impl Database {
    /// Provider for a database file (created on first use)
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_location(Location::File(path.into()))
    }

    /// Provider for a private in-memory database
    pub fn in_memory() -> Self {
        Self::with_location(Location::Memory)
    }

    fn with_location(location: Location) -> Self {
        Self {
            location,
            cell: OnceCell::new(),
            opens: AtomicUsize::new(0),
            schema_runs: AtomicUsize::new(0),
        }
    }

    /// Path of the backing file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    /// Whether the connection has been opened yet
    pub fn is_open(&self) -> bool {
        self.cell.initialized()
    }

    /// Number of times a connection was opened (at most once on success)
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Number of schema passes issued so far
    pub fn schema_runs(&self) -> usize {
        self.schema_runs.load(Ordering::SeqCst)
    }

    /// Return the shared handle, opening the database on first use.
    ///
    /// Every call after the first re-issues the idempotent schema statements
    /// against the cached connection. Schema failures are logged and
    /// swallowed; the next statement against a missing table fails instead.
    pub async fn handle(&self) -> Result<DbHandle, AppError> {
        if let Some(handle) = self.cell.get() {
            debug!("Reusing open database handle");
            self.ensure_schema_logged(handle);
            return Ok(Arc::clone(handle));
        }

        let handle = self
            .cell
            .get_or_try_init(|| async {
                let conn = self.connect()?;
                let handle: DbHandle = Arc::new(Mutex::new(conn));
                self.ensure_schema_logged(&handle);
                Ok::<_, AppError>(handle)
            })
            .await?;

        Ok(Arc::clone(handle))
    }

    fn connect(&self) -> Result<Connection, AppError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        match &self.location {
            Location::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                info!("Opening database at {:?}", path);
                let conn = Connection::open(path)?;
                conn.pragma_update(None, "journal_mode", "WAL")?;
                Ok(conn)
            }
            Location::Memory => {
                info!("Opening in-memory database");
                Ok(Connection::open_in_memory()?)
            }
        }
    }

    fn ensure_schema_logged(&self, handle: &DbHandle) {
        self.schema_runs.fetch_add(1, Ordering::SeqCst);
        let result = handle
            .lock()
            .map_err(|e| AppError::Database(e.to_string()))
            .and_then(|conn| schema::ensure_schema(&conn));
        if let Err(e) = result {
            warn!("Error initializing tables: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_handle_creates_file_and_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("bandmate.db");
        let db = Database::open(&path);
        assert!(!db.is_open());

        let handle = db.handle().await.unwrap();
        assert!(path.exists());
        assert!(db.is_open());

        let conn = handle.lock().unwrap();
        let count: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('gigs', 'merch')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_handle_is_shared() {
        let db = Database::in_memory();
        let first = db.handle().await.unwrap();
        let second = db.handle().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        // the second call re-runs the idempotent schema pass
        assert_eq!(db.schema_runs(), 2);
    }

    #[tokio::test]
    async fn test_handle_recreates_dropped_table() {
        let db = Database::in_memory();
        let handle = db.handle().await.unwrap();
        handle
            .lock()
            .unwrap()
            .execute_batch("DROP TABLE gigs;")
            .unwrap();

        let handle = db.handle().await.unwrap();
        let conn = handle.lock().unwrap();
        assert!(gigs::list_gigs(&conn).unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_access_initialises_once() {
        let db = Arc::new(Database::in_memory());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let db = Arc::clone(&db);
                tokio::spawn(async move { db.handle().await.unwrap() })
            })
            .collect();

        let mut handles = Vec::new();
        for task in tasks {
            handles.push(task.await.unwrap());
        }

        for handle in &handles[1..] {
            assert!(Arc::ptr_eq(&handles[0], handle));
        }
        assert_eq!(db.opens(), 1);
        // one pass from initialisation, plus one per caller that arrived
        // after the cell was already set
        assert!(db.schema_runs() >= 1);
        assert!(db.schema_runs() <= 8);
    }

    #[tokio::test]
    async fn test_open_failure_is_reported() {
        let dir = tempdir().unwrap();
        // a directory cannot be opened as a database file
        let db = Database::open(dir.path());
        assert!(db.handle().await.is_err());
        assert!(!db.is_open());
    }
}
