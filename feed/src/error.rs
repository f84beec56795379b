use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid date. Use YYYY-MM-DD.")]
    InvalidDate,

    #[error("failed to build upstream client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream {endpoint} answered with status {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("upstream body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected upstream payload: {0}")]
    UnexpectedShape(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
