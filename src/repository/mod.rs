//! Repositories: the only way screens reach the database.
//!
//! Each call checks the platform capability, obtains the shared handle,
//! runs one statement and logs any storage error before returning it.

pub mod gigs;
pub mod merch;

pub use gigs::GigRepository;
pub use merch::MerchRepository;

use std::sync::MutexGuard;

use rusqlite::Connection;
use tracing::error;

use crate::db::{Database, DbHandle};
use crate::error::AppError;

pub(crate) fn lock(handle: &DbHandle) -> Result<MutexGuard<'_, Connection>, AppError> {
    handle
        .lock()
        .map_err(|e| AppError::Database(format!("Database lock poisoned: {}", e)))
}

/// Run one statement against the shared handle.
///
/// Failures are logged under `action` and handed back unchanged.
pub(crate) async fn with_conn<T, F>(db: &Database, action: &str, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Connection) -> Result<T, AppError> + Send,
{
    let result = match db.handle().await {
        Ok(handle) => lock(&handle).and_then(|conn| f(&conn)),
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        error!("Error {}: {}", action, e);
    }
    result
}
