use crate::domain::ArchiveEntry;

/// Retrieves one remote file and names it for the archive.
#[async_trait::async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ArchiveEntry, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("reading body of {url} failed: {reason}")]
    Body { url: String, reason: String },
}
