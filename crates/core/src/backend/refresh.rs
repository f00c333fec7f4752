//! Forced directory listing refresh.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::config::Config;
use crate::http;

use super::{AuthCache, ListRequest, Refresher};

const LIST_PATH: &str = "api/fs/list";

/// Requests a forced re-listing of the download directory.
///
/// Owns its HTTP client, separate from the submission client.
pub struct RefreshTrigger {
    client: Client,
    list_url: String,
    target_dir: String,
    auth: Arc<AuthCache>,
}

impl RefreshTrigger {
    pub fn new(config: &Config, auth: Arc<AuthCache>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http::build_client(config.refresh_timeout())?,
            list_url: config.base_endpoint(LIST_PATH),
            target_dir: config.offline_download_dir.clone(),
            auth,
        })
    }
}

#[async_trait]
impl Refresher for RefreshTrigger {
    async fn trigger_refresh(&self) {
        let credential = match self.auth.get_credential().await {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Skipping directory refresh");
                return;
            }
        };

        let response = match self
            .client
            .post(&self.list_url)
            .header(reqwest::header::AUTHORIZATION, credential.expose())
            .json(&ListRequest::refresh(&self.target_dir))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %http::describe_error(&e), "Directory refresh request failed");
                return;
            }
        };

        let status = response.status();
        http::drain(response).await;

        match status {
            StatusCode::OK => info!(dir = %self.target_dir, "Directory refresh succeeded"),
            StatusCode::UNAUTHORIZED => {
                warn!("Directory refresh rejected credential");
                self.auth.invalidate_rejected(&credential).await;
            }
            other => warn!(status = other.as_u16(), "Directory refresh failed"),
        }
    }
}
