//! Error types for locator system

use storefront_core_types::LocatorSpec;
use thiserror::Error;

/// One candidate that did not resolve, with the reason it was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub locator: LocatorSpec,
    pub reason: String,
}

/// Locator error enumeration
#[derive(Debug, Error, Clone)]
pub enum LocatorError {
    /// Every candidate failed within its own budget
    #[error("All locators failed: {}", join_locators(.attempts))]
    AllLocatorsFailed { attempts: Vec<FailedAttempt> },
}

impl LocatorError {
    /// Candidates tried, in declared order
    pub fn candidates(&self) -> Vec<&LocatorSpec> {
        match self {
            LocatorError::AllLocatorsFailed { attempts } => {
                attempts.iter().map(|a| &a.locator).collect()
            }
        }
    }

    /// Page state may still settle, so a later resolve can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LocatorError::AllLocatorsFailed { .. })
    }

    /// Get error severity (0=low, 1=medium, 2=high, 3=critical)
    pub fn severity(&self) -> u8 {
        match self {
            LocatorError::AllLocatorsFailed { .. } => 1,
        }
    }
}

fn join_locators(attempts: &[FailedAttempt]) -> String {
    attempts
        .iter()
        .map(|a| a.locator.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
