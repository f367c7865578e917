/// Per-document failure while loading the index. Never escapes `load_all`;
/// a failed document is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed recipe document: {0}")]
    Parse(#[from] serde_json::Error),
}
