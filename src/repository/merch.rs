use std::sync::Arc;

use tracing::{info, warn};

use super::with_conn;
use crate::db::merch::{self, MerchItem, NewMerch};
use crate::db::Database;
use crate::error::AppError;
use crate::platform::StorageCapability;
use crate::validation::require_text;

pub const NEGATIVE_STOCK_MESSAGE: &str = "Stock cannot be negative";

/// Access to the `merch` table
#[derive(Clone)]
pub struct MerchRepository {
    db: Arc<Database>,
    capability: Arc<dyn StorageCapability>,
}

impl MerchRepository {
    pub fn new(db: Arc<Database>, capability: Arc<dyn StorageCapability>) -> Self {
        Self { db, capability }
    }

    /// Whether writes can reach storage on this platform
    pub fn is_available(&self) -> bool {
        self.capability.can_write()
    }

    /// All items by name. Empty when storage cannot be read.
    pub async fn list(&self) -> Result<Vec<MerchItem>, AppError> {
        if !self.capability.can_read() {
            warn!("Database not available, returning no merch");
            return Ok(Vec::new());
        }
        with_conn(&self.db, "listing merch", merch::list_merch).await
    }

    /// Insert an item and return its id.
    ///
    /// A non-finite price is stored as 0. Negative stock is rejected.
    pub async fn add(&self, item: NewMerch) -> Result<i64, AppError> {
        if !self.capability.can_write() {
            return Err(AppError::Unavailable);
        }
        let item = NewMerch {
            name: require_text(&item.name, "Item name is required")?,
            price: if item.price.is_finite() { item.price } else { 0.0 },
            stock: check_stock(item.stock)?,
        };

        let id = with_conn(&self.db, "adding merch", |conn| merch::insert_merch(conn, &item)).await?;
        info!("Added merch {} ({})", id, item.name);
        Ok(id)
    }

    /// Delete an item; deleting a missing id is not an error
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.capability.can_write() {
            return Err(AppError::Unavailable);
        }
        let deleted =
            with_conn(&self.db, "deleting merch", |conn| merch::delete_merch(conn, id)).await?;
        if deleted {
            info!("Deleted merch {}", id);
        }
        Ok(())
    }

    /// Overwrite the stock of one item. Negative values never reach storage.
    pub async fn set_stock(&self, id: i64, stock: i64) -> Result<(), AppError> {
        if !self.capability.can_write() {
            return Err(AppError::Unavailable);
        }
        let stock = check_stock(stock)?;
        with_conn(&self.db, "updating merch stock", |conn| {
            merch::update_stock(conn, id, stock)
        })
        .await?;
        info!("Set stock of merch {} to {}", id, stock);
        Ok(())
    }

    /// Move the stock of `item` by `delta` and return the new value
    pub async fn adjust_stock(&self, item: &MerchItem, delta: i64) -> Result<i64, AppError> {
        let stock = item
            .stock
            .checked_add(delta)
            .ok_or_else(|| AppError::validation("Stock out of range"))?;
        self.set_stock(item.id, stock).await?;
        Ok(stock)
    }
}

fn check_stock(stock: i64) -> Result<i64, AppError> {
    if stock < 0 {
        return Err(AppError::validation(NEGATIVE_STOCK_MESSAGE));
    }
    Ok(stock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{EmbeddedSql, NoEmbeddedSql};

    fn repo() -> MerchRepository {
        MerchRepository::new(Arc::new(Database::in_memory()), Arc::new(EmbeddedSql))
    }

    fn new_item(name: &str, price: f64, stock: i64) -> NewMerch {
        NewMerch {
            name: name.to_string(),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let repo = repo();
        let id = repo.add(new_item(" T-Shirt ", 20.0, 50)).await.unwrap();

        let items = repo.list().await.unwrap();
        assert_eq!(
            items,
            vec![MerchItem {
                id,
                name: "T-Shirt".to_string(),
                price: 20.0,
                stock: 50,
            }]
        );
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let repo = repo();
        for name in ["Vinyl", "Badge", "Cap"] {
            repo.add(new_item(name, 1.0, 1)).await.unwrap();
        }
        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Badge", "Cap", "Vinyl"]);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let repo = repo();
        let err = repo.add(new_item("", 5.0, 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Item name is required");
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_finite_price_stored_as_zero() {
        let repo = repo();
        repo.add(new_item("Sticker", f64::NAN, 3)).await.unwrap();
        assert_eq!(repo.list().await.unwrap()[0].price, 0.0);
    }

    #[tokio::test]
    async fn test_set_stock() {
        let repo = repo();
        let id = repo.add(new_item("T-Shirt", 20.0, 50)).await.unwrap();

        repo.set_stock(id, 7).await.unwrap();
        assert_eq!(repo.list().await.unwrap()[0].stock, 7);
    }

    #[tokio::test]
    async fn test_negative_stock_never_stored() {
        let repo = repo();
        let id = repo.add(new_item("T-Shirt", 20.0, 50)).await.unwrap();

        let err = repo.set_stock(id, -1).await.unwrap_err();
        assert_eq!(err.to_string(), NEGATIVE_STOCK_MESSAGE);
        assert!(repo.add(new_item("Cap", 5.0, -2)).await.is_err());

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].stock, 50);
    }

    #[tokio::test]
    async fn test_adjust_stock_below_zero_rejected() {
        let repo = repo();
        repo.add(new_item("T-Shirt", 20.0, 50)).await.unwrap();
        let item = repo.list().await.unwrap().remove(0);

        assert!(repo.adjust_stock(&item, -60).await.is_err());
        assert_eq!(repo.list().await.unwrap()[0].stock, 50);

        assert_eq!(repo.adjust_stock(&item, -50).await.unwrap(), 0);
        assert_eq!(repo.list().await.unwrap()[0].stock, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let repo = repo();
        repo.delete(1234).await.unwrap();
    }

    #[tokio::test]
    async fn test_unavailable_platform() {
        let repo = MerchRepository::new(Arc::new(Database::in_memory()), Arc::new(NoEmbeddedSql));

        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.add(new_item("Cap", 1.0, 1)).await,
            Err(AppError::Unavailable)
        ));
        assert!(matches!(repo.set_stock(1, 1).await, Err(AppError::Unavailable)));
        assert!(matches!(repo.delete(1).await, Err(AppError::Unavailable)));
    }
}
