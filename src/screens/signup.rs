use std::sync::Arc;

use super::{Phase, Prompt, Route};
use crate::auth::{IdentityProvider, SessionState};
use crate::validation::passwords_match;

pub struct SignupScreen {
    identity: Arc<dyn IdentityProvider>,
    session: Arc<SessionState>,
    pub email: String,
    pub password: String,
    pub confirm: String,
    phase: Phase,
}

impl SignupScreen {
    pub fn new(identity: Arc<dyn IdentityProvider>, session: Arc<SessionState>) -> Self {
        Self {
            identity,
            session,
            email: String::new(),
            password: String::new(),
            confirm: String::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The sign-up button is enabled
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Idle
            && !self.email.trim().is_empty()
            && !self.password.is_empty()
            && passwords_match(&self.password, &self.confirm)
    }

    /// Create the account and move to the main shell
    pub async fn submit(&mut self) -> Result<Route, Prompt> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(Prompt::error("Please enter your email and password"));
        }
        if !passwords_match(&self.password, &self.confirm) {
            return Err(Prompt::error("Passwords do not match"));
        }

        self.phase = Phase::Submitting;
        let result = self.identity.sign_up(self.email.trim(), &self.password).await;
        self.phase = Phase::Idle;

        let session = result?;
        self.session.set(session);
        self.password.clear();
        self.confirm.clear();
        Ok(Route::HOME)
    }
}
