use std::sync::Arc;

use tracing::{info, warn};

use super::with_conn;
use crate::db::gigs::{self, Gig, NewGig};
use crate::db::Database;
use crate::error::AppError;
use crate::platform::StorageCapability;
use crate::validation::require_text;

/// Access to the `gigs` table
#[derive(Clone)]
pub struct GigRepository {
    db: Arc<Database>,
    capability: Arc<dyn StorageCapability>,
}

impl GigRepository {
    pub fn new(db: Arc<Database>, capability: Arc<dyn StorageCapability>) -> Self {
        Self { db, capability }
    }

    /// Whether writes can reach storage on this platform
    pub fn is_available(&self) -> bool {
        self.capability.can_write()
    }

    /// All gigs, latest date first. Empty when storage cannot be read.
    pub async fn list(&self) -> Result<Vec<Gig>, AppError> {
        if !self.capability.can_read() {
            warn!("Database not available, returning no gigs");
            return Ok(Vec::new());
        }
        with_conn(&self.db, "listing gigs", gigs::list_gigs).await
    }

    /// Insert a gig and return its id. The title is trimmed and must not be
    /// empty; the other fields are stored as given.
    pub async fn add(&self, gig: NewGig) -> Result<i64, AppError> {
        if !self.capability.can_write() {
            return Err(AppError::Unavailable);
        }
        let gig = NewGig {
            title: require_text(&gig.title, "Title is required")?,
            ..gig
        };

        let id = with_conn(&self.db, "adding gig", |conn| gigs::insert_gig(conn, &gig)).await?;
        info!("Added gig {} ({})", id, gig.title);
        Ok(id)
    }

    /// Delete a gig; deleting a missing id is not an error
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.capability.can_write() {
            return Err(AppError::Unavailable);
        }
        let deleted = with_conn(&self.db, "deleting gig", |conn| gigs::delete_gig(conn, id)).await?;
        if deleted {
            info!("Deleted gig {}", id);
        }
        Ok(())
    }
}
