//! Identifier resolution.
//!
//! A `Resolver` turns a free-form code into a magnet link. Magnet links
//! themselves are passed through without any network call.

mod search;
mod types;

pub use search::{extract_magnet, SearchResolver};
pub use types::*;
