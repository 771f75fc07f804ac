use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use super::{IdentityProvider, Session};
use crate::config::FirebaseConfig;
use crate::error::AppError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Successful sign-in / sign-up payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Firebase Authentication over the Identity Toolkit REST API
pub struct FirebaseAuthClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl FirebaseAuthClient {
    pub fn new(config: &FirebaseConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: IDENTITY_TOOLKIT_URL.to_string(),
        })
    }

    /// Point the client at another Identity Toolkit host (e.g. the emulator)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, method: &str) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("Firebase API key is not set".to_string()))?;
        Ok(format!("{}/accounts:{}?key={}", self.base_url, method, api_key))
    }

    async fn call(&self, method: &str, email: &str, password: &str) -> Result<Session, AppError> {
        let url = self.endpoint(method)?;
        let body = serde_json::json!({
            "email": email.trim(),
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Auth("The request timed out. Please try again.".to_string())
                } else {
                    AppError::Auth(format!("Network error: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("Firebase {} failed with HTTP {}", method, status);
            return Err(AppError::Auth(error_message(&text)));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Unexpected response from server: {}", e)))?;
        Ok(into_session(auth, email))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let session = self.call("signInWithPassword", email, password).await?;
        info!("Signed in {}", session.user_id);
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let session = self.call("signUp", email, password).await?;
        info!("Created account {}", session.user_id);
        Ok(session)
    }

    /// ID tokens are stateless; ending the session is local only
    async fn sign_out(&self, session: &Session) -> Result<(), AppError> {
        info!("Signed out {}", session.user_id);
        Ok(())
    }
}

fn into_session(auth: AuthResponse, requested_email: &str) -> Session {
    let email = if auth.email.is_empty() {
        requested_email.trim().to_string()
    } else {
        auth.email
    };
    Session {
        user_id: auth.local_id,
        email,
        id_token: auth.id_token,
        refresh_token: auth.refresh_token,
    }
}

/// Turn an Identity Toolkit error body into a message for the user
fn error_message(body: &str) -> String {
    let raw = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => return "Authentication failed. Please try again.".to_string(),
    };

    // codes may carry a detail: "WEAK_PASSWORD : Password should be ..."
    let (code, detail) = match raw.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };

    let message = match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password."
        }
        "EMAIL_EXISTS" => "An account with this email already exists.",
        "INVALID_EMAIL" => "The email address is badly formatted.",
        "MISSING_EMAIL" => "Please enter an email address.",
        "MISSING_PASSWORD" => "Please enter a password.",
        "WEAK_PASSWORD" => "Password should be at least 6 characters.",
        "USER_DISABLED" => "This account has been disabled.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Too many unsuccessful attempts. Please try again later."
        }
        "OPERATION_NOT_ALLOWED" => "Email/password sign-in is not enabled.",
        _ => return detail.unwrap_or(code).to_string(),
    };
    message.to_string()
}
