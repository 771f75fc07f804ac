use std::sync::Arc;

use super::{Phase, Prompt, Route};
use crate::auth::{IdentityProvider, SessionState};

pub struct LoginScreen {
    identity: Arc<dyn IdentityProvider>,
    session: Arc<SessionState>,
    pub email: String,
    pub password: String,
    phase: Phase,
}

impl LoginScreen {
    pub fn new(identity: Arc<dyn IdentityProvider>, session: Arc<SessionState>) -> Self {
        Self {
            identity,
            session,
            email: String::new(),
            password: String::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The sign-in button is enabled
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Idle && !self.email.is_empty() && !self.password.is_empty()
    }

    /// Sign in and move to the main shell
    pub async fn submit(&mut self) -> Result<Route, Prompt> {
        if !self.can_submit() {
            return Err(Prompt::error("Please enter your email and password"));
        }

        self.phase = Phase::Submitting;
        let result = self.identity.sign_in(self.email.trim(), &self.password).await;
        self.phase = Phase::Idle;

        let session = result?;
        self.session.set(session);
        self.password.clear();
        Ok(Route::HOME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{FakeIdentity, GOOD_PASSWORD};

    fn screen() -> (LoginScreen, Arc<FakeIdentity>, Arc<SessionState>) {
        let identity = Arc::new(FakeIdentity::default());
        let session = Arc::new(SessionState::new());
        let screen = LoginScreen::new(identity.clone(), session.clone());
        (screen, identity, session)
    }

    #[tokio::test]
    async fn test_successful_login() {
        let (mut screen, _, session) = screen();
        screen.email = " band@example.com ".to_string();
        screen.password = GOOD_PASSWORD.to_string();

        assert_eq!(screen.submit().await.unwrap(), Route::HOME);
        assert!(session.is_active());
        assert_eq!(session.current().unwrap().email, "band@example.com");
        assert_eq!(screen.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_failed_login_shows_provider_message() {
        let (mut screen, _, session) = screen();
        screen.email = "band@example.com".to_string();
        screen.password = "nope".to_string();

        let prompt = screen.submit().await.unwrap_err();
        assert_eq!(prompt.message, "Invalid email or password.");
        assert!(!session.is_active());
        assert_eq!(screen.phase(), Phase::Idle);
        // form stays editable
        assert_eq!(screen.email, "band@example.com");
    }

    #[tokio::test]
    async fn test_empty_fields_do_not_reach_provider() {
        let (mut screen, identity, _) = screen();
        screen.email = "band@example.com".to_string();
        assert!(!screen.can_submit());
        assert!(screen.submit().await.is_err());
        assert_eq!(identity.calls(), 0);
    }
}
