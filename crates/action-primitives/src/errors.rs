//! Error types for wait primitives

use std::time::Duration;

use storefront_core_types::{DriverError, LocatorSpec};
use thiserror::Error;

/// Wait failure
#[derive(Debug, Error, Clone)]
pub enum WaitError {
    /// Condition never held within the timeout
    #[error("Timed out after {}ms waiting for {description}", .timeout.as_millis())]
    Timeout {
        description: String,
        timeout: Duration,
        elapsed: Duration,
    },

    /// The element never attached to the document during the whole wait
    #[error("Element not found in DOM: {locator}")]
    ElementNotFound {
        locator: LocatorSpec,
        timeout: Duration,
    },

    /// The driver failed while a condition was being evaluated
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

impl WaitError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WaitError::Timeout { .. } | WaitError::ElementNotFound { .. }
        )
    }

    /// Get error severity level (0=low, 1=medium, 2=high, 3=critical)
    pub fn severity(&self) -> u8 {
        match self {
            WaitError::Driver(_) => 2,
            WaitError::Timeout { .. } | WaitError::ElementNotFound { .. } => 1,
        }
    }

    /// Time spent before giving up, when known
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            WaitError::Timeout { elapsed, .. } => Some(*elapsed),
            WaitError::ElementNotFound { timeout, .. } => Some(*timeout),
            WaitError::Driver(_) => None,
        }
    }
}
