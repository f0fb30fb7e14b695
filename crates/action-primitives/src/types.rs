//! Core types for wait primitives

use std::time::Duration;

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Bounds of a polling wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Total budget measured from loop entry
    pub timeout: Duration,

    /// Fixed delay between evaluations
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Poll interval never drops below 1ms so a zero setting cannot spin
    pub(crate) fn effective_interval(&self) -> Duration {
        self.poll_interval.max(Duration::from_millis(1))
    }
}

/// Element condition evaluated against a fresh snapshot on every poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitCondition {
    /// Attached and visible
    Visible,

    /// Attached, rendered and not disabled
    Clickable,

    /// Text content contains the needle (case-sensitive)
    TextContains(String),

    /// Detached or not visible
    Hidden,
}

impl WaitCondition {
    /// Human-readable form used in timeout messages
    pub fn describe(&self) -> String {
        match self {
            WaitCondition::Visible => "to be visible".to_string(),
            WaitCondition::Clickable => "to be clickable".to_string(),
            WaitCondition::TextContains(text) => format!("to contain text {:?}", text),
            WaitCondition::Hidden => "to be hidden".to_string(),
        }
    }
}

/// How a page URL is compared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlMatch {
    /// Whole URL equals the expected string
    Exact(String),

    /// URL contains the fragment, ignoring ASCII case
    Contains(String),
}

impl UrlMatch {
    pub fn matches(&self, url: &str) -> bool {
        match self {
            UrlMatch::Exact(expected) => url == expected,
            UrlMatch::Contains(fragment) => url
                .to_ascii_lowercase()
                .contains(&fragment.to_ascii_lowercase()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            UrlMatch::Exact(expected) => format!("url to equal {}", expected),
            UrlMatch::Contains(fragment) => format!("url to contain {}", fragment),
        }
    }
}

/// Built-in waiting tier applied after navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitTier {
    /// No built-in waiting
    None,

    /// Wait for DOM content loaded
    #[default]
    DomReady,

    /// Wait for DOM content loaded, then network idle
    Idle,
}
