use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::{IdentityProvider, SessionState};
use crate::db::Database;
use crate::platform::StorageCapability;
use crate::repository::{GigRepository, MerchRepository};
use crate::screens::{GigsScreen, HomeScreen, LoginScreen, MerchScreen, SignupScreen};

/// Everything the commands share: one controller per screen, all wired to
/// the same database handle and session.
///
/// The async mutexes keep one operation per screen in flight at a time.
pub struct AppState {
    pub session: Arc<SessionState>,
    pub login: Mutex<LoginScreen>,
    pub signup: Mutex<SignupScreen>,
    pub home: Mutex<HomeScreen>,
    pub gigs: Mutex<GigsScreen>,
    pub merch: Mutex<MerchScreen>,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        capability: Arc<dyn StorageCapability>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let session = Arc::new(SessionState::new());
        let gigs = GigRepository::new(Arc::clone(&db), Arc::clone(&capability));
        let merch = MerchRepository::new(db, capability);

        Self {
            login: Mutex::new(LoginScreen::new(Arc::clone(&identity), Arc::clone(&session))),
            signup: Mutex::new(SignupScreen::new(Arc::clone(&identity), Arc::clone(&session))),
            home: Mutex::new(HomeScreen::new(
                gigs.clone(),
                merch.clone(),
                identity,
                Arc::clone(&session),
            )),
            gigs: Mutex::new(GigsScreen::new(gigs)),
            merch: Mutex::new(MerchScreen::new(merch)),
            session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::EmbeddedSql;
    use crate::screens::testing::{FakeIdentity, GOOD_PASSWORD};
    use crate::screens::{navigation, Route, Tab};

    fn state() -> AppState {
        AppState::new(
            Arc::new(Database::in_memory()),
            Arc::new(EmbeddedSql),
            Arc::new(FakeIdentity::default()),
        )
    }

    #[tokio::test]
    async fn test_screens_share_storage_and_session() {
        let state = state();

        {
            let mut login = state.login.lock().await;
            login.email = "band@example.com".to_string();
            login.password = GOOD_PASSWORD.to_string();
            login.submit().await.unwrap();
        }
        assert!(state.session.is_active());
        assert_eq!(
            navigation::gate(state.session.is_active(), Route::Main(Tab::Gigs)),
            Route::Main(Tab::Gigs)
        );

        {
            let mut gigs = state.gigs.lock().await;
            gigs.form.title = "Warehouse".to_string();
            gigs.submit().await.unwrap();
        }
        {
            let mut merch = state.merch.lock().await;
            merch.form.name = "Cap".to_string();
            merch.submit().await.unwrap();
        }

        let stats = state.home.lock().await.load_stats().await;
        assert_eq!(stats.gigs, 1);
        assert_eq!(stats.merch, 1);

        let route = state.home.lock().await.logout().await;
        assert_eq!(route, Route::START);
        assert!(!state.session.is_active());
    }
}
