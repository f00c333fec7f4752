//! Types for the request pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::magnet::MagnetLink;

/// Opaque chat handle supplied by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRef(pub i64);

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Job accepted by the backend.
    Submitted,
    /// The identifier could not be turned into a magnet link.
    ResolutionFailed,
    /// No credential could be obtained for the submission.
    AuthFailed,
    /// The backend refused the job or could not be reached.
    SubmissionFailed,
}

impl PipelineOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineOutcome::Submitted => "submitted",
            PipelineOutcome::ResolutionFailed => "resolution_failed",
            PipelineOutcome::AuthFailed => "auth_failed",
            PipelineOutcome::SubmissionFailed => "submission_failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Submitted)
    }
}

/// How an inbound message is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Already a magnet link; no search needed.
    DirectMagnet(MagnetLink),
    /// Anything else, resolved through search.
    Code(String),
}

/// Classify a message by its trimmed text.
pub fn classify(text: &str) -> Classification {
    match MagnetLink::parse(text) {
        Some(magnet) => Classification::DirectMagnet(magnet),
        None => Classification::Code(text.trim().to_string()),
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to send message: {0}")]
    SendFailed(String),
}

/// Outbound side of the chat transport.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, chat: ChatRef, text: &str) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_magnet() {
        let classified = classify("  magnet:?xt=urn:btih:ABC  ");
        assert_eq!(
            classified,
            Classification::DirectMagnet(MagnetLink::parse("magnet:?xt=urn:btih:ABC").unwrap())
        );
    }

    #[test]
    fn test_classify_code() {
        assert_eq!(
            classify(" ABC-123\n"),
            Classification::Code("ABC-123".to_string())
        );
    }

    #[test]
    fn test_classify_empty_is_code() {
        assert_eq!(classify("   "), Classification::Code(String::new()));
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&PipelineOutcome::ResolutionFailed).unwrap(),
            "\"resolution_failed\""
        );
        assert_eq!(PipelineOutcome::AuthFailed.as_str(), "auth_failed");
        assert!(PipelineOutcome::Submitted.is_success());
        assert!(!PipelineOutcome::SubmissionFailed.is_success());
    }
}
