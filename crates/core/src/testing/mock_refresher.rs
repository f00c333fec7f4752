//! Mock refresher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::Refresher;

/// Mock implementation of the Refresher trait; counts calls.
#[derive(Debug, Default)]
pub struct MockRefresher {
    calls: Arc<RwLock<usize>>,
}

impl MockRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn call_count(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl Refresher for MockRefresher {
    async fn trigger_refresh(&self) {
        *self.calls.write().await += 1;
    }
}
