use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopcraftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Upstream timeout: {0}")]
    Timeout(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<std::io::Error> for ShopcraftError {
    fn from(e: std::io::Error) -> Self {
        ShopcraftError::Storage(e.to_string())
    }
}

impl ShopcraftError {
    /// The message without the category prefix, for response bodies.
    pub fn message(&self) -> String {
        match self {
            ShopcraftError::Config(m)
            | ShopcraftError::Validation(m)
            | ShopcraftError::Upstream(m)
            | ShopcraftError::Timeout(m)
            | ShopcraftError::Storage(m) => m.clone(),
            ShopcraftError::Anyhow(e) => e.to_string(),
        }
    }
}
