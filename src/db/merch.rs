use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A merchandise row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// Input for a new merchandise item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMerch {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

fn merch_from_row(row: &Row<'_>) -> rusqlite::Result<MerchItem> {
    Ok(MerchItem {
        id: row.get("id")?,
        name: row.get("name")?,
        price: row.get::<_, Option<f64>>("price")?.unwrap_or(0.0),
        stock: row.get::<_, Option<i64>>("stock")?.unwrap_or(0),
    })
}

/// All items by name, same name falls back to newest id first
pub fn list_merch(conn: &Connection) -> Result<Vec<MerchItem>, AppError> {
    let mut stmt = conn.prepare("SELECT * FROM merch ORDER BY name ASC, id DESC")?;

    let items = stmt
        .query_map([], merch_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(items)
}

/// Insert an item and return the id the engine assigned
pub fn insert_merch(conn: &Connection, item: &NewMerch) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO merch (name, price, stock) VALUES (?1, ?2, ?3)",
        params![item.name, item.price, item.stock],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete an item. Returns whether a row was removed.
pub fn delete_merch(conn: &Connection, id: i64) -> Result<bool, AppError> {
    let affected = conn.execute("DELETE FROM merch WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

/// Overwrite the stock of one item. No bounds check at this level.
pub fn update_stock(conn: &Connection, id: i64, stock: i64) -> Result<bool, AppError> {
    let affected = conn.execute(
        "UPDATE merch SET stock = ?1 WHERE id = ?2",
        params![stock, id],
    )?;
    Ok(affected > 0)
}
