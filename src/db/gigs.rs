use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A gig row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gig {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub venue: String,
    pub city: String,
}

/// Input for a new gig. Only `title` is required; the rest may be empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewGig {
    pub title: String,
    pub date: String,
    pub venue: String,
    pub city: String,
}

fn gig_from_row(row: &Row<'_>) -> rusqlite::Result<Gig> {
    Ok(Gig {
        id: row.get("id")?,
        title: row.get("title")?,
        date: row.get::<_, Option<String>>("date")?.unwrap_or_default(),
        venue: row.get::<_, Option<String>>("venue")?.unwrap_or_default(),
        city: row.get::<_, Option<String>>("city")?.unwrap_or_default(),
    })
}

/// All gigs, latest date first; same date falls back to newest id first.
///
/// Dates compare as raw text, so an empty date sorts last.
pub fn list_gigs(conn: &Connection) -> Result<Vec<Gig>, AppError> {
    let mut stmt = conn.prepare("SELECT * FROM gigs ORDER BY date DESC, id DESC")?;

    let gigs = stmt
        .query_map([], gig_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(gigs)
}

/// Insert a gig and return the id the engine assigned
pub fn insert_gig(conn: &Connection, gig: &NewGig) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO gigs (title, date, venue, city) VALUES (?1, ?2, ?3, ?4)",
        params![gig.title, gig.date, gig.venue, gig.city],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete a gig. Returns whether a row was removed.
pub fn delete_gig(conn: &Connection, id: i64) -> Result<bool, AppError> {
    let affected = conn.execute("DELETE FROM gigs WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}
