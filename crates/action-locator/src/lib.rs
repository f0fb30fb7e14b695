//! Locator & self-heal - fallback-chain element resolution
//!
//! Given a primary locator and ordered fallbacks, returns the first candidate
//! that currently resolves to a visible element:
//! - primary checked without waiting
//! - fallbacks tried in declared order with a bounded visibility wait
//! - a winning fallback is reported as a self-healing diagnostic
//! - exhaustion fails with every candidate listed

pub mod errors;
pub mod resolver;
pub mod types;

pub use errors::*;
pub use resolver::*;
pub use types::*;
