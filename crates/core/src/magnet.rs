//! Magnet link type.

use std::fmt;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Scheme prefix every magnet link starts with.
pub const MAGNET_PREFIX: &str = "magnet:?";

/// A magnet URI, either supplied by the user or derived by a resolver.
///
/// Values built with [`MagnetLink::parse`] are guaranteed to start with
/// [`MAGNET_PREFIX`]. Values built with [`MagnetLink::from_resolved`] are
/// search output and carry no such guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MagnetLink(String);

impl MagnetLink {
    /// Parse user input as a magnet link. Surrounding whitespace is trimmed.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with(MAGNET_PREFIX) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    /// Wrap a resolver result without validation.
    pub fn from_resolved(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_well_formed(&self) -> bool {
        self.0.starts_with(MAGNET_PREFIX)
    }

    /// Extract the BitTorrent info hash (lowercase), if present.
    pub fn info_hash(&self) -> Option<String> {
        let re = Regex::new(r"(?:^|[?&])xt=urn:btih:([0-9A-Za-z]+)").ok()?;
        re.captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase())
    }
}

impl fmt::Display for MagnetLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MagnetLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
