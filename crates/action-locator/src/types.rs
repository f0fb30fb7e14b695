//! Core types for locator system

use std::time::Duration;

use storefront_core_types::{ElementHandle, LocatorSpec};

/// Visibility budget granted to each fallback candidate
pub const DEFAULT_CANDIDATE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Element resolution result
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Handle for the winning candidate
    pub handle: ElementHandle,

    /// Position of the winning candidate (primary is 0)
    pub candidate_index: usize,

    /// Locator that resolved
    pub locator: LocatorSpec,
}

impl Resolution {
    pub fn new(handle: ElementHandle, candidate_index: usize, locator: LocatorSpec) -> Self {
        Self {
            handle,
            candidate_index,
            locator,
        }
    }

    /// Whether a fallback rather than the primary resolved
    pub fn healed(&self) -> bool {
        self.candidate_index > 0
    }

    pub fn into_handle(self) -> ElementHandle {
        self.handle
    }
}
