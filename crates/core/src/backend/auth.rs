//! Process-wide credential cache for the backend.

use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http;

use super::{AuthError, Credential, LoginRequest, LoginResponse};

const LOGIN_PATH: &str = "api/auth/login";

/// Holds at most one bearer credential.
///
/// The lock is held across the login call, so concurrent callers wait for a
/// single login instead of racing to issue their own.
pub struct AuthCache {
    client: Client,
    login_url: String,
    username: String,
    password: String,
    credential: Mutex<Option<Credential>>,
}

impl AuthCache {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http::build_client(config.auth_timeout())?,
            login_url: config.base_endpoint(LOGIN_PATH),
            username: config.username.clone(),
            password: config.password.clone(),
            credential: Mutex::new(None),
        })
    }

    /// Return the cached credential, logging in first if the cache is empty.
    pub async fn get_credential(&self) -> Result<Credential, AuthError> {
        let mut cached = self.credential.lock().await;
        if let Some(credential) = cached.as_ref() {
            return Ok(credential.clone());
        }

        let credential = self.login().await?;
        *cached = Some(credential.clone());
        Ok(credential)
    }

    /// Drop the cached credential; the next `get_credential` logs in again.
    pub async fn invalidate(&self) {
        let mut cached = self.credential.lock().await;
        if cached.take().is_some() {
            debug!("Backend credential invalidated");
        }
    }

    /// Drop the cached credential only if it is the one the backend rejected.
    ///
    /// Another caller may already have replaced it with a fresh one.
    pub async fn invalidate_rejected(&self, rejected: &Credential) {
        let mut cached = self.credential.lock().await;
        if cached.as_ref() == Some(rejected) {
            *cached = None;
            debug!("Rejected backend credential invalidated");
        }
    }

    pub async fn is_cached(&self) -> bool {
        self.credential.lock().await.is_some()
    }

    async fn login(&self) -> Result<Credential, AuthError> {
        debug!(url = %self.login_url, "Logging in to backend");

        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Backend login request failed");
                AuthError::LoginFailed(http::describe_error(&e))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            http::drain(response).await;
            warn!(status = status.as_u16(), "Backend login rejected");
            return Err(AuthError::LoginFailed(format!("HTTP {}", status.as_u16())));
        }

        let envelope: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::LoginFailed(format!("malformed login response: {}", e)))?;

        match envelope.data {
            Some(data) if !data.token.is_empty() => {
                info!("Backend login successful");
                Ok(Credential::new(data.token))
            }
            _ => {
                let reason = envelope
                    .message
                    .unwrap_or_else(|| "no token in login response".to_string());
                warn!(reason = %reason, "Backend login returned no token");
                Err(AuthError::LoginFailed(reason))
            }
        }
    }
}
