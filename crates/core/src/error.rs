use thiserror::Error;

pub type AdPulseResult<T> = Result<T, AdPulseError>;

#[derive(Error, Debug)]
pub enum AdPulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data source error: {0}")]
    Source(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
