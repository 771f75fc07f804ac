pub mod firebase;

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::AppError;

/// An authenticated session issued by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub id_token: String,
    #[serde(skip_serializing, default)]
    pub refresh_token: String,
}

/// Email/password identity provider
///
/// Failures come back as `AppError::Auth` carrying a message fit to show
/// the user as is.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AppError>;

    async fn sign_out(&self, session: &Session) -> Result<(), AppError>;
}

/// Current session, if any. Gates navigation between the auth flow and
/// the main shell.
#[derive(Default)]
pub struct SessionState {
    inner: Mutex<Option<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.slot().is_some()
    }

    pub fn current(&self) -> Option<Session> {
        self.slot().clone()
    }

    pub fn set(&self, session: Session) {
        *self.slot() = Some(session);
    }

    pub fn clear(&self) -> Option<Session> {
        self.slot().take()
    }

    // Writes replace the whole `Option`, so a poisoned value is still whole.
    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            error!("Session lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
