//! Search-service resolver.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::http;
use crate::magnet::MagnetLink;

use super::{ResolutionError, Resolver, SearchResponse};

/// Characters stripped from both ends of the first field of a search entry.
const TRIM_CHARS: &[char] = &['[', ']', '\'', '"', ' ', '\t', '\r', '\n'];

/// Resolves codes through `GET {search_url}{identifier}`.
pub struct SearchResolver {
    client: Client,
    search_url: String,
}

impl SearchResolver {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http::build_client(config.search_timeout())?,
            search_url: config.search_url.clone(),
        })
    }

    fn build_search_url(&self, identifier: &str) -> String {
        format!("{}{}", self.search_url, urlencoding::encode(identifier.trim()))
    }
}

#[async_trait]
impl Resolver for SearchResolver {
    fn name(&self) -> &str {
        "search"
    }

    async fn resolve(&self, identifier: &str) -> Result<MagnetLink, ResolutionError> {
        if let Some(magnet) = MagnetLink::parse(identifier) {
            return Ok(magnet);
        }
        if identifier.trim().is_empty() {
            return Err(ResolutionError::NoResults);
        }

        let url = self.build_search_url(identifier);
        debug!(identifier = identifier, "Searching for magnet link");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "Search request failed");
            ResolutionError::Transport(http::describe_error(&e))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            http::drain(response).await;
            return Err(ResolutionError::BadStatus(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ResolutionError::Malformed(e.to_string()))?;

        let first = body
            .data
            .as_deref()
            .and_then(|entries| entries.first())
            .ok_or(ResolutionError::NoResults)?;

        let magnet = MagnetLink::from_resolved(extract_magnet(first));
        if !magnet.is_well_formed() {
            warn!(candidate = %magnet, "First search result does not look like a magnet link");
        }
        debug!(identifier = identifier, info_hash = ?magnet.info_hash(), "Search resolved");

        Ok(magnet)
    }
}

/// Pull the magnet link out of a search entry: text form, first
/// comma-separated field, brackets and quotes trimmed.
pub fn extract_magnet(entry: &Value) -> String {
    let text = stringify_entry(entry);
    let first_field = text.split(',').next().unwrap_or_default();
    first_field.trim_matches(TRIM_CHARS).to_string()
}

fn stringify_entry(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(stringify_entry).collect();
            format!("[{}]", parts.join(", "))
        }
        other => other.to_string(),
    }
}
