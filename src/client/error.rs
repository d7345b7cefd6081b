use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum OverrideStoreError {
    #[error("Override file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Override file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data directory available for the override file")]
    NoDataDir,
}
