use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};

use super::Route;
use crate::auth::{IdentityProvider, SessionState};
use crate::repository::{GigRepository, MerchRepository};

/// Counts shown on the home dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub gigs: usize,
    pub merch: usize,
}

pub struct HomeScreen {
    gigs: GigRepository,
    merch: MerchRepository,
    identity: Arc<dyn IdentityProvider>,
    session: Arc<SessionState>,
    stats: Stats,
}

impl HomeScreen {
    pub fn new(
        gigs: GigRepository,
        merch: MerchRepository,
        identity: Arc<dyn IdentityProvider>,
        session: Arc<SessionState>,
    ) -> Self {
        Self {
            gigs,
            merch,
            identity,
            session,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Reload both counts. A list that fails to load counts as empty.
    pub async fn load_stats(&mut self) -> Stats {
        let (gigs, merch) = futures::join!(self.gigs.list(), self.merch.list());

        self.stats = Stats {
            gigs: gigs.map(|g| g.len()).unwrap_or_else(|e| {
                warn!("Counting gigs failed: {}", e);
                0
            }),
            merch: merch.map(|m| m.len()).unwrap_or_else(|e| {
                warn!("Counting merch failed: {}", e);
                0
            }),
        };
        self.stats
    }

    /// End the session and return to login
    pub async fn logout(&mut self) -> Route {
        if let Some(session) = self.session.clear() {
            if let Err(e) = self.identity.sign_out(&session).await {
                error!("Sign out failed: {}", e);
            }
        }
        Route::START
    }
}
