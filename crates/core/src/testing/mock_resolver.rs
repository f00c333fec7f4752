//! Mock resolver for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::magnet::MagnetLink;
use crate::resolver::{ResolutionError, Resolver};

/// Mock implementation of the Resolver trait.
///
/// Magnet links pass through untouched and are not recorded, like the real
/// resolver. Codes are looked up in a configured table; unknown codes fail
/// with `NoResults`.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = MockResolver::new();
/// resolver.set_result("ABC-123", Ok(MagnetLink::from_resolved("magnet:?xt=urn:btih:XYZ".into()))).await;
///
/// let magnet = resolver.resolve("ABC-123").await?;
/// assert_eq!(resolver.recorded_queries().await, vec!["ABC-123"]);
/// ```
#[derive(Debug, Default)]
pub struct MockResolver {
    /// Configured result per code.
    results: Arc<RwLock<HashMap<String, Result<MagnetLink, ResolutionError>>>>,
    /// Codes that reached the "network".
    queries: Arc<RwLock<Vec<String>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result returned for a code.
    pub async fn set_result(&self, code: &str, result: Result<MagnetLink, ResolutionError>) {
        self.results.write().await.insert(code.to_string(), result);
    }

    /// Codes that were searched, in order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl Resolver for MockResolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn resolve(&self, identifier: &str) -> Result<MagnetLink, ResolutionError> {
        if let Some(magnet) = MagnetLink::parse(identifier) {
            return Ok(magnet);
        }

        self.queries.write().await.push(identifier.to_string());
        self.results
            .read()
            .await
            .get(identifier)
            .cloned()
            .unwrap_or(Err(ResolutionError::NoResults))
    }
}
