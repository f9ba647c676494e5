use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DistributeError {
    /// Whether the caller is at fault (maps to a client-error status).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DistributeError::InvalidArgument(_))
    }
}

impl From<Vec<ValidationError>> for DistributeError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        DistributeError::InvalidArgument(message)
    }
}

pub type Result<T> = std::result::Result<T, DistributeError>;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
