use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("font '{0}' is not registered")]
    UnregisteredFont(String),

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid page geometry configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PagerError>;
