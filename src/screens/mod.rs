//! Screen controllers.
//!
//! Each screen keeps only transient view state: form fields, a busy flag
//! and the list from its last repository call. Nothing here is persisted;
//! the repositories are the only side effect.

pub mod contact;
pub mod gigs;
pub mod home;
pub mod login;
pub mod merch;
pub mod navigation;
pub mod signup;

pub use contact::ContactInfo;
pub use gigs::{GigForm, GigsScreen};
pub use home::{HomeScreen, Stats};
pub use login::LoginScreen;
pub use merch::{MerchForm, MerchScreen};
pub use navigation::{AuthScreen, HeaderAction, Route, Tab};
pub use signup::SignupScreen;

use serde::Serialize;

use crate::error::AppError;

/// Text shown on the gigs and merch screens when storage is unavailable
pub const STORAGE_NOTICE: &str = "SQLite database is only available on iOS and Android. \
Please use the mobile app for full functionality.";

/// `idle -> submitting -> idle`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// A dialog for the user: an alert, or a confirmation when `confirm` is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    /// Label of the destructive button; `None` for plain alerts
    pub confirm: Option<String>,
}

impl Prompt {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            confirm: None,
        }
    }

    pub fn confirm(title: &str, message: &str, confirm: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            confirm: Some(confirm.to_string()),
        }
    }
}

impl From<AppError> for Prompt {
    fn from(e: AppError) -> Self {
        Prompt::error(e.to_string())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::auth::{IdentityProvider, Session};
    use crate::db::Database;
    use crate::error::AppError;
    use crate::platform::{EmbeddedSql, NoEmbeddedSql, StorageCapability};
    use crate::repository::{GigRepository, MerchRepository};

    /// Accepts one fixed password; counts calls
    #[derive(Default)]
    pub struct FakeIdentity {
        pub calls: AtomicUsize,
        pub sign_outs: AtomicUsize,
    }

    pub const GOOD_PASSWORD: &str = "correct horse";

    impl FakeIdentity {
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn session(email: &str) -> Session {
            Session {
                user_id: format!("uid-{}", email.trim()),
                email: email.trim().to_string(),
                id_token: "token".to_string(),
                refresh_token: "refresh".to_string(),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeIdentity {
        async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if password == GOOD_PASSWORD {
                Ok(Self::session(email))
            } else {
                Err(AppError::Auth("Invalid email or password.".to_string()))
            }
        }

        async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if password.len() < 6 {
                Err(AppError::Auth(
                    "Password should be at least 6 characters.".to_string(),
                ))
            } else {
                Ok(Self::session(email))
            }
        }

        async fn sign_out(&self, _session: &Session) -> Result<(), AppError> {
            self.sign_outs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    pub fn repos(available: bool) -> (GigRepository, MerchRepository) {
        let db = Arc::new(Database::in_memory());
        let capability: Arc<dyn StorageCapability> = if available {
            Arc::new(EmbeddedSql)
        } else {
            Arc::new(NoEmbeddedSql)
        };
        (
            GigRepository::new(Arc::clone(&db), Arc::clone(&capability)),
            MerchRepository::new(db, capability),
        )
    }
}
