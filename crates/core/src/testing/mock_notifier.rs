//! Mock chat transport for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::pipeline::{ChatRef, Notifier, NotifyError};

/// Mock implementation of the Notifier trait.
///
/// Records every message, including ones it was told to fail.
#[derive(Debug, Default)]
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<(ChatRef, String)>>>,
    failing: Arc<RwLock<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in send order.
    pub async fn sent(&self) -> Vec<(ChatRef, String)> {
        self.sent.read().await.clone()
    }

    /// Messages sent to one chat, in order.
    pub async fn texts_for(&self, chat: ChatRef) -> Vec<String> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|(c, _)| *c == chat)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Make every subsequent send fail.
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_text(&self, chat: ChatRef, text: &str) -> Result<(), NotifyError> {
        self.sent.write().await.push((chat, text.to_string()));
        if *self.failing.read().await {
            return Err(NotifyError::SendFailed("mock transport down".to_string()));
        }
        Ok(())
    }
}
