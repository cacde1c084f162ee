//! Page fetcher trait and transport errors.
//!
//! The fetcher is the only component that touches the network. Pipelines
//! take `&dyn PageFetcher` so tests can serve fixtures from memory.

pub mod http;

pub use http::HttpFetcher;

use thiserror::Error;

/// Transport-level failures. Any of these skips the current date or event.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error for {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("unreadable response body for {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Retrieves raw page content (HTML or JSON text) for one URL.
pub trait PageFetcher: Send + Sync {
    /// Human-readable name of this fetcher.
    fn name(&self) -> &str;

    /// Fetch the body of `url` as text. Blocks until a response or failure.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
