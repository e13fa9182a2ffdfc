use std::path::PathBuf;

/// Errors raised while fetching, extracting or caching a page.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page URL could not be parsed
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport-level failure talking to the server
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Extraction was attempted before any markup was fetched
    #[error("no markup fetched yet for {0}")]
    NotFetched(String),

    /// A load or clear targeted a cache directory that does not exist
    #[error("cache directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// A cached report could not be read back into a query
    #[error("malformed report {}: {reason}", path.display())]
    MalformedReport { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
