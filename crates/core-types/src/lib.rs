//! Shared primitives for the storefront e2e workspace
//!
//! Everything here is transient and call-scoped: locators, candidate lists,
//! lazy element handles and the single-evaluation element snapshot that the
//! resolver and waiter crates read from a page driver.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticsSink, RecordingSink, TracingSink};

/// Error surfaced by a browser-automation driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The locator does not match anything attached to the document
    #[error("Element not attached: {0}")]
    NotAttached(String),

    /// A driver-side bounded wait ran out of time
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    /// Navigation failed
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// Transport or protocol failure talking to the browser
    #[error("Driver protocol error: {0}")]
    Protocol(String),

    /// Capability not offered by this driver
    #[error("Unsupported by driver: {0}")]
    Unsupported(String),
}

impl DriverError {
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    pub fn is_not_attached(&self) -> bool {
        matches!(self, DriverError::NotAttached(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DriverError::Timeout { .. })
    }
}

/// Opaque description of how to find an element.
///
/// The core never parses the string; each driver decides which query grammar
/// it understands.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LocatorSpec(String);

impl LocatorSpec {
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocatorSpec {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocatorSpec {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for LocatorSpec {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

/// Primary locator followed by ordered fallbacks.
///
/// Declaration order is priority order. Duplicates are kept as given.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateList {
    primary: LocatorSpec,
    fallbacks: Vec<LocatorSpec>,
}

impl CandidateList {
    pub fn new<I, L>(primary: impl Into<LocatorSpec>, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LocatorSpec>,
    {
        Self {
            primary: primary.into(),
            fallbacks: fallbacks.into_iter().map(Into::into).collect(),
        }
    }

    /// Candidate list without fallbacks
    pub fn single(primary: impl Into<LocatorSpec>) -> Self {
        Self {
            primary: primary.into(),
            fallbacks: Vec::new(),
        }
    }

    pub fn primary(&self) -> &LocatorSpec {
        &self.primary
    }

    pub fn fallbacks(&self) -> &[LocatorSpec] {
        &self.fallbacks
    }

    /// Primary first, then fallbacks in declared order
    pub fn iter(&self) -> impl Iterator<Item = &LocatorSpec> {
        std::iter::once(&self.primary).chain(self.fallbacks.iter())
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.fallbacks.len()
    }

    pub fn to_vec(&self) -> Vec<LocatorSpec> {
        self.iter().cloned().collect()
    }
}

impl fmt::Display for CandidateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(LocatorSpec::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PageId(pub String);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy reference to whatever currently matches a locator on a page.
///
/// Creating a handle never touches the browser; drivers re-query the locator
/// every time the handle is used.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementHandle {
    page: PageId,
    locator: LocatorSpec,
}

impl ElementHandle {
    pub fn new(page: PageId, locator: LocatorSpec) -> Self {
        Self { page, locator }
    }

    pub fn page(&self) -> &PageId {
        &self.page
    }

    pub fn locator(&self) -> &LocatorSpec {
        &self.locator
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.locator)
    }
}

/// Point-in-time reading of an attached element.
///
/// Drivers must produce every field from one evaluation so that combined
/// checks (clickability) cannot observe a torn state.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ElementSnapshot {
    /// Has a rendered box and is not hidden by style
    pub visible: bool,

    /// Participates in layout (has an offset parent)
    pub rendered: bool,

    /// Carries the `disabled` attribute
    pub disabled: bool,

    /// `textContent`, if any
    pub text: Option<String>,
}

impl ElementSnapshot {
    /// Attached (implied by the snapshot existing), rendered and enabled
    pub fn is_clickable(&self) -> bool {
        self.rendered && !self.disabled
    }

    /// Case-sensitive containment; empty or absent text never matches
    pub fn contains_text(&self, needle: &str) -> bool {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text.contains(needle),
            _ => false,
        }
    }
}

/// Element states a driver can block on
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ElementState {
    Visible,
    Hidden,
    Attached,
}

impl ElementState {
    pub fn name(&self) -> &'static str {
        match self {
            ElementState::Visible => "visible",
            ElementState::Hidden => "hidden",
            ElementState::Attached => "attached",
        }
    }
}

/// Page load milestones
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadState {
    Load,
    DomContentLoaded,
    /// No in-flight requests for a quiet period
    NetworkIdle,
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::Load => "load",
            LoadState::DomContentLoaded => "domcontentloaded",
            LoadState::NetworkIdle => "networkidle",
        }
    }
}

/// How to pick an `<option>` in a `<select>`
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectBy {
    Value(String),
    Label(String),
}
