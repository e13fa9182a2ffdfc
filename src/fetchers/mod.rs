pub mod http;

pub use http::HttpFetcher;

use crate::error::Result;
use async_trait::async_trait;

/// Source of page markup
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform a single GET of `url` and return the body as text.
    ///
    /// Any failure, whether transport or status, is an error. Implementations
    /// do not retry.
    async fn fetch(&self, url: &str) -> Result<String>;
}
