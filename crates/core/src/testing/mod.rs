//! Testing utilities and mock implementations.
//!
//! Mocks for every collaborator of [`Pipeline`](crate::pipeline::Pipeline),
//! so pipeline behavior can be tested without a backend, a search service or
//! a chat transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use offlinebot_core::testing::{MockNotifier, MockRefresher, MockResolver, MockSubmitter};
//!
//! let submitter = Arc::new(MockSubmitter::new());
//! submitter.set_next_error(SubmitError::Status(500)).await;
//! // Build a Pipeline with the mocks...
//! ```

mod mock_notifier;
mod mock_refresher;
mod mock_resolver;
mod mock_submitter;

pub use mock_notifier::MockNotifier;
pub use mock_refresher::MockRefresher;
pub use mock_resolver::MockResolver;
pub use mock_submitter::MockSubmitter;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::Config;

    pub const USERNAME: &str = "admin";
    pub const PASSWORD: &str = "test-password";
    pub const DOWNLOAD_DIR: &str = "/offline";

    /// A complete configuration pointing at the given backend and search URLs.
    pub fn config(base_url: &str, search_url: &str) -> Config {
        Config {
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
            base_url: base_url.to_string(),
            search_url: search_url.to_string(),
            offline_download_dir: DOWNLOAD_DIR.to_string(),
            telegram_token: "123456:test-token".to_string(),
            auth_timeout_secs: 10,
            search_timeout_secs: 10,
            submit_timeout_secs: 15,
            refresh_timeout_secs: 10,
        }
    }
}
