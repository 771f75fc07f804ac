use rusqlite::Connection;

use crate::error::AppError;

const CREATE_GIGS: &str = "CREATE TABLE IF NOT EXISTS gigs (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    title   TEXT NOT NULL,
    date    TEXT,
    venue   TEXT,
    city    TEXT
);";

const CREATE_MERCH: &str = "CREATE TABLE IF NOT EXISTS merch (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    price   REAL DEFAULT 0,
    stock   INTEGER DEFAULT 0
);";

/// Create the `gigs` and `merch` tables if they are missing.
///
/// Safe to run on every handle request; existing rows are untouched.
pub fn ensure_schema(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch(CREATE_GIGS)?;
    conn.execute_batch(CREATE_MERCH)?;
    Ok(())
}
