//! Types for the file-management backend.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::magnet::MagnetLink;

/// Offline download tool requested from the backend.
pub const DOWNLOAD_TOOL: &str = "storage";

/// Deletion policy applied once the backend finishes uploading the download.
pub const DELETE_POLICY: &str = "delete_on_upload_succeed";

/// Errors from the login call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Login failed: {0}")]
    LoginFailed(String),
}

/// Errors from an offline download submission.
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Submission transport error: {0}")]
    Transport(String),

    #[error("Backend rejected submission with HTTP {0}")]
    Status(u16),
}

/// Bearer token issued by the backend login endpoint.
///
/// Validity is decided by the backend: a credential stays in use until a
/// request carrying it is rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw header value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Body of `POST api/auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Envelope returned by the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// Body of `POST api/fs/add_offline_download`.
///
/// Built per submission and never stored.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DownloadJob {
    pub path: String,
    pub urls: Vec<String>,
    pub tool: String,
    pub delete_policy: String,
}

impl DownloadJob {
    pub fn new(dir: impl Into<String>, magnet: &MagnetLink) -> Self {
        Self {
            path: dir.into(),
            urls: vec![magnet.as_str().to_string()],
            tool: DOWNLOAD_TOOL.to_string(),
            delete_policy: DELETE_POLICY.to_string(),
        }
    }
}

/// Body of `POST api/fs/list` with a forced refresh.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListRequest {
    pub path: String,
    pub password: String,
    pub page: u32,
    pub per_page: u32,
    pub refresh: bool,
}

impl ListRequest {
    pub fn refresh(dir: impl Into<String>) -> Self {
        Self {
            path: dir.into(),
            password: String::new(),
            page: 1,
            per_page: 0,
            refresh: true,
        }
    }
}

/// Submits magnet links as offline download jobs.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit one job. `Ok` means the backend answered 200.
    async fn submit(&self, magnet: &MagnetLink) -> Result<(), SubmitError>;
}

/// Asks the backend to re-list the download directory. Never fails.
#[async_trait]
pub trait Refresher: Send + Sync {
    async fn trigger_refresh(&self);
}
