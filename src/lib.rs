//! Storefront e2e suite
//!
//! Page objects, fixtures and test data for the Automation Exercise
//! storefront, built on the fallback-chain resolver (`action-locator`) and
//! the polling waiter (`action-primitives`).

pub mod cli;
pub mod config;
pub mod data;
pub mod errors;
pub mod fixtures;
pub mod pages;

pub use config::{Environment, SuiteConfig};
pub use errors::{SuiteError, SuiteResult};
pub use fixtures::PageFixtures;

// Re-export the core so tests need a single dependency
pub use action_locator::{ElementResolver, FallbackResolver, LocatorError, Resolution};
pub use action_primitives::{UrlMatch, WaitCondition, WaitError, WaitOptions, Waiter};
pub use page_driver::{ElementScript, PageDriver, PageScript, ScriptedPage};
pub use storefront_core_types::{CandidateList, Diagnostic, LocatorSpec, RecordingSink};
