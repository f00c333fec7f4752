//! Pipeline implementation.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::backend::{Refresher, SubmitError, Submitter};
use crate::magnet::MagnetLink;
use crate::resolver::Resolver;

use super::messages;
use super::types::{classify, ChatRef, Classification, Notifier, PipelineOutcome};

/// Sequences resolution, submission and refresh for one inbound message.
///
/// Holds no per-message state; the only state shared between runs lives
/// behind the submitter's credential cache.
pub struct Pipeline {
    resolver: Arc<dyn Resolver>,
    submitter: Arc<dyn Submitter>,
    refresher: Arc<dyn Refresher>,
    notifier: Arc<dyn Notifier>,
}

impl Pipeline {
    pub fn new(
        resolver: Arc<dyn Resolver>,
        submitter: Arc<dyn Submitter>,
        refresher: Arc<dyn Refresher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            resolver,
            submitter,
            refresher,
            notifier,
        }
    }

    /// Handle one inbound text message end to end.
    pub async fn handle_message(&self, chat: ChatRef, text: &str) -> PipelineOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline", %run_id, chat = chat.0);

        async {
            let outcome = self.run(chat, text).await;
            if outcome.is_success() {
                info!(outcome = outcome.as_str(), "Pipeline finished");
            } else {
                warn!(outcome = outcome.as_str(), "Pipeline finished without a download");
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Send a status line. Delivery failures are logged and otherwise ignored.
    pub async fn notify(&self, chat: ChatRef, text: &str) {
        if let Err(e) = self.notifier.send_text(chat, text).await {
            warn!(error = %e, "Failed to deliver status message");
        }
    }

    async fn run(&self, chat: ChatRef, text: &str) -> PipelineOutcome {
        let magnet = match classify(text) {
            Classification::DirectMagnet(magnet) => {
                info!("Direct magnet link received");
                self.notify(chat, messages::ADDING).await;
                magnet
            }
            Classification::Code(code) => {
                self.notify(chat, messages::SEARCHING).await;
                match self.resolve(&code).await {
                    Some(magnet) => {
                        self.notify(chat, messages::FOUND).await;
                        magnet
                    }
                    None => {
                        self.notify(chat, messages::SEARCH_FAILED).await;
                        return PipelineOutcome::ResolutionFailed;
                    }
                }
            }
        };

        match self.submitter.submit(&magnet).await {
            Ok(()) => {
                self.notify(chat, messages::SUBMITTED).await;
                self.refresher.trigger_refresh().await;
                PipelineOutcome::Submitted
            }
            Err(SubmitError::Auth(e)) => {
                warn!(error = %e, "Submission aborted, no backend credential");
                self.notify(chat, messages::AUTH_FAILED).await;
                PipelineOutcome::AuthFailed
            }
            Err(e) => {
                warn!(error = %e, "Submission failed");
                self.notify(chat, messages::SUBMIT_FAILED).await;
                PipelineOutcome::SubmissionFailed
            }
        }
    }

    async fn resolve(&self, code: &str) -> Option<MagnetLink> {
        info!(resolver = self.resolver.name(), code = code, "Resolving code");
        match self.resolver.resolve(code).await {
            Ok(magnet) => Some(magnet),
            Err(e) => {
                warn!(error = %e, code = code, "Resolution failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AuthError;
    use crate::resolver::ResolutionError;
    use crate::testing::{MockNotifier, MockRefresher, MockResolver, MockSubmitter};

    struct Harness {
        resolver: Arc<MockResolver>,
        submitter: Arc<MockSubmitter>,
        refresher: Arc<MockRefresher>,
        notifier: Arc<MockNotifier>,
        pipeline: Pipeline,
    }

    fn harness() -> Harness {
        let resolver = Arc::new(MockResolver::new());
        let submitter = Arc::new(MockSubmitter::new());
        let refresher = Arc::new(MockRefresher::new());
        let notifier = Arc::new(MockNotifier::new());
        let pipeline = Pipeline::new(
            Arc::clone(&resolver) as Arc<dyn Resolver>,
            Arc::clone(&submitter) as Arc<dyn Submitter>,
            Arc::clone(&refresher) as Arc<dyn Refresher>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );
        Harness {
            resolver,
            submitter,
            refresher,
            notifier,
            pipeline,
        }
    }

    const CHAT: ChatRef = ChatRef(42);

    #[tokio::test]
    async fn test_direct_magnet_bypasses_resolver() {
        let h = harness();

        let outcome = h
            .pipeline
            .handle_message(CHAT, "magnet:?xt=urn:btih:ABC")
            .await;

        assert_eq!(outcome, PipelineOutcome::Submitted);
        assert!(h.resolver.recorded_queries().await.is_empty());
        let submitted = h.submitter.submitted().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].as_str(), "magnet:?xt=urn:btih:ABC");
        assert_eq!(h.refresher.call_count().await, 1);
        assert_eq!(
            h.notifier.texts_for(CHAT).await,
            vec![messages::ADDING, messages::SUBMITTED]
        );
    }

    #[tokio::test]
    async fn test_code_is_resolved_then_submitted() {
        let h = harness();
        h.resolver
            .set_result(
                "ABC-123",
                Ok(MagnetLink::parse("magnet:?xt=urn:btih:XYZ").unwrap()),
            )
            .await;

        let outcome = h.pipeline.handle_message(CHAT, "  ABC-123 ").await;

        assert_eq!(outcome, PipelineOutcome::Submitted);
        assert_eq!(h.resolver.recorded_queries().await, vec!["ABC-123"]);
        assert_eq!(
            h.submitter.submitted().await[0].as_str(),
            "magnet:?xt=urn:btih:XYZ"
        );
        assert_eq!(
            h.notifier.texts_for(CHAT).await,
            vec![messages::SEARCHING, messages::FOUND, messages::SUBMITTED]
        );
    }

    #[tokio::test]
    async fn test_resolution_failure_stops_before_submit() {
        let h = harness();
        h.resolver
            .set_result("ABC-123", Err(ResolutionError::NoResults))
            .await;

        let outcome = h.pipeline.handle_message(CHAT, "ABC-123").await;

        assert_eq!(outcome, PipelineOutcome::ResolutionFailed);
        assert!(h.submitter.submitted().await.is_empty());
        assert_eq!(h.refresher.call_count().await, 0);
        assert_eq!(
            h.notifier.texts_for(CHAT).await,
            vec![messages::SEARCHING, messages::SEARCH_FAILED]
        );
    }

    #[tokio::test]
    async fn test_submission_failure_skips_refresh() {
        let h = harness();
        h.submitter.set_next_error(SubmitError::Status(500)).await;

        let outcome = h
            .pipeline
            .handle_message(CHAT, "magnet:?xt=urn:btih:ABC")
            .await;

        assert_eq!(outcome, PipelineOutcome::SubmissionFailed);
        assert_eq!(h.refresher.call_count().await, 0);
        assert_eq!(
            h.notifier.texts_for(CHAT).await,
            vec![messages::ADDING, messages::SUBMIT_FAILED]
        );
    }

    #[tokio::test]
    async fn test_login_failure_maps_to_auth_failed() {
        let h = harness();
        h.submitter
            .set_next_error(SubmitError::Auth(AuthError::LoginFailed(
                "no token".to_string(),
            )))
            .await;

        let outcome = h
            .pipeline
            .handle_message(CHAT, "magnet:?xt=urn:btih:ABC")
            .await;

        assert_eq!(outcome, PipelineOutcome::AuthFailed);
        assert_eq!(h.refresher.call_count().await, 0);
        assert_eq!(
            h.notifier.texts_for(CHAT).await,
            vec![messages::ADDING, messages::AUTH_FAILED]
        );
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_abort_run() {
        let h = harness();
        h.notifier.set_failing(true).await;

        let outcome = h
            .pipeline
            .handle_message(CHAT, "magnet:?xt=urn:btih:ABC")
            .await;

        assert_eq!(outcome, PipelineOutcome::Submitted);
        assert_eq!(h.submitter.submitted().await.len(), 1);
        assert_eq!(h.refresher.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_each_message_submits_at_most_once() {
        let h = harness();

        h.pipeline
            .handle_message(CHAT, "magnet:?xt=urn:btih:ABC")
            .await;
        h.pipeline
            .handle_message(ChatRef(7), "magnet:?xt=urn:btih:ABC")
            .await;

        assert_eq!(h.submitter.submitted().await.len(), 2);
        assert_eq!(h.notifier.texts_for(ChatRef(7)).await.len(), 2);
    }
}
