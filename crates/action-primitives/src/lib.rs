//! Wait primitives - bounded polling over live element state
//!
//! - Visibility, clickability, text, hidden and URL waits on a fixed poll interval
//! - Generic async predicate waits
//! - Network idle delegated to the page driver
//! - Navigation wait tiers (None / DomReady / Idle)

pub mod errors;
pub mod types;
mod waiter;
mod waiting;

pub use errors::*;
pub use types::*;
pub use waiter::*;
pub use waiting::*;
