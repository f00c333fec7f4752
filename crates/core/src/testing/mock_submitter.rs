//! Mock submitter for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::{SubmitError, Submitter};
use crate::magnet::MagnetLink;

/// Mock implementation of the Submitter trait.
///
/// Every call is recorded, failed ones included.
#[derive(Debug, Default)]
pub struct MockSubmitter {
    submitted: Arc<RwLock<Vec<MagnetLink>>>,
    /// If set, the next submission will fail with this error.
    next_error: Arc<RwLock<Option<SubmitError>>>,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Magnet links passed to `submit`, in call order.
    pub async fn submitted(&self) -> Vec<MagnetLink> {
        self.submitted.read().await.clone()
    }

    /// Configure the next submission to fail with the given error.
    pub async fn set_next_error(&self, error: SubmitError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Submitter for MockSubmitter {
    async fn submit(&self, magnet: &MagnetLink) -> Result<(), SubmitError> {
        self.submitted.write().await.push(magnet.clone());

        match self.next_error.write().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
