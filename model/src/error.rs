use thiserror::Error;

/// Why a fetch cycle produced nothing. The cycle is abandoned either way; callers that poll just
/// try again next time.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("fetching the feed failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("reading a saved feed failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("feed returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("feed isn't in the expected shape: {0}")]
    Decode(#[from] serde_json::Error),
}
