use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreezeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed request failed with status {0}")]
    HttpStatus(u16),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl BreezeError {
    /// Whether this error came out of the fetch path (network or feed decode).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            BreezeError::Http(_) | BreezeError::HttpStatus(_) | BreezeError::FeedParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BreezeError>;
