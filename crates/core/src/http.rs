//! Shared HTTP client helpers.

use std::time::Duration;

use reqwest::Client;

/// Build a client with a fixed per-request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Describe a transport failure; timeouts and refused connections get their own wording.
pub(crate) fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

/// Read and discard the rest of a response body so the connection goes back to the pool.
pub(crate) async fn drain(response: reqwest::Response) {
    let _ = response.bytes().await;
}
