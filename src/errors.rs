//! Suite-level error type
//!
//! Page objects, fixtures and data loaders return [`SuiteError`]; the binary
//! converts it into `anyhow::Error` at the edge.

use action_locator::LocatorError;
use action_primitives::WaitError;
use storefront_core_types::DriverError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Test data error: {0}")]
    Data(String),

    #[error("User key \"{0}\" not found")]
    UnknownUser(String),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SuiteError {
    pub fn assertion(message: impl Into<String>) -> Self {
        SuiteError::Assertion(message.into())
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            SuiteError::Wait(err) => err.is_retryable(),
            SuiteError::Locator(err) => err.is_retryable(),
            SuiteError::Driver(err) => err.is_timeout(),
            _ => false,
        }
    }

    /// Get error severity level (0=low, 1=medium, 2=high, 3=critical)
    pub fn severity(&self) -> u8 {
        match self {
            SuiteError::Locator(err) => err.severity(),
            SuiteError::Wait(err) => err.severity(),
            SuiteError::Driver(_) | SuiteError::Io(_) => 2,
            SuiteError::Config(_) | SuiteError::Data(_) => 3,
            SuiteError::UnknownUser(_) | SuiteError::Assertion(_) => 1,
        }
    }
}

impl From<serde_json::Error> for SuiteError {
    fn from(err: serde_json::Error) -> Self {
        SuiteError::Data(err.to_string())
    }
}

pub type SuiteResult<T> = Result<T, SuiteError>;
