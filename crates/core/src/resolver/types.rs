//! Types for identifier resolution.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::magnet::MagnetLink;

/// Errors that can occur while resolving an identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("No results found")]
    NoResults,

    #[error("Search transport error: {0}")]
    Transport(String),

    #[error("Search returned HTTP {0}")]
    BadStatus(u16),

    #[error("Malformed search response: {0}")]
    Malformed(String),
}

/// Search endpoint envelope. Entries are kept untyped because only the
/// first one's text form is inspected.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<serde_json::Value>>,
}

/// Maps a user identifier to a magnet link.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Resolve an identifier. Magnet links come back unchanged.
    async fn resolve(&self, identifier: &str) -> Result<MagnetLink, ResolutionError>;
}
