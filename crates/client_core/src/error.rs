use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),
    #[error("server url cannot carry path segments: {0}")]
    BaseUrl(String),
    #[error("server returned status {status}: {body}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
