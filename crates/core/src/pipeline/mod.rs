//! Per-message request pipeline.
//!
//! Classify the text, resolve it if it is not already a magnet link, submit
//! it, then refresh the backend listing. Every step reports one status line
//! to the chat.

pub mod messages;
mod runner;
mod types;

pub use runner::Pipeline;
pub use types::*;
