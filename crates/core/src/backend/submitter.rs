//! Offline download submission.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http;
use crate::magnet::MagnetLink;

use super::{AuthCache, Credential, DownloadJob, SubmitError, Submitter};

const SUBMIT_PATH: &str = "api/fs/add_offline_download";

/// Posts magnet links to the backend as offline download jobs.
pub struct TaskSubmitter {
    client: Client,
    submit_url: String,
    target_dir: String,
    auth: Arc<AuthCache>,
}

impl TaskSubmitter {
    pub fn new(config: &Config, auth: Arc<AuthCache>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http::build_client(config.submit_timeout())?,
            submit_url: config.base_endpoint(SUBMIT_PATH),
            target_dir: config.offline_download_dir.clone(),
            auth,
        })
    }

    /// Send one job and return the response status. The body is always drained.
    async fn post_job(
        &self,
        credential: &Credential,
        job: &DownloadJob,
    ) -> Result<StatusCode, SubmitError> {
        let response = self
            .client
            .post(&self.submit_url)
            .header(reqwest::header::AUTHORIZATION, credential.expose())
            .json(job)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(http::describe_error(&e)))?;

        let status = response.status();
        http::drain(response).await;
        Ok(status)
    }
}

#[async_trait]
impl Submitter for TaskSubmitter {
    async fn submit(&self, magnet: &MagnetLink) -> Result<(), SubmitError> {
        let job = DownloadJob::new(&self.target_dir, magnet);
        let credential = self.auth.get_credential().await?;

        let mut status = self.post_job(&credential, &job).await?;

        if status == StatusCode::UNAUTHORIZED {
            // Credential expired on the backend side, one retry with a fresh login
            warn!("Backend rejected credential, re-authenticating");
            self.auth.invalidate_rejected(&credential).await;
            let credential = self.auth.get_credential().await?;
            status = self.post_job(&credential, &job).await?;
        }

        if status == StatusCode::OK {
            info!(
                info_hash = magnet.info_hash().as_deref().unwrap_or("-"),
                dir = %self.target_dir,
                "Offline download submitted"
            );
            Ok(())
        } else {
            debug!(status = status.as_u16(), "Offline download rejected");
            Err(SubmitError::Status(status.as_u16()))
        }
    }
}
