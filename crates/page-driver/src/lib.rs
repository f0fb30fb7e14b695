//! Page driver port
//!
//! The browser-automation driver is an external collaborator. This crate
//! names exactly the capabilities the resolver, waiter and page objects
//! consume, and ships two implementations:
//! - [`ScriptedPage`] - deterministic in-memory double driven by the tokio clock
//! - `ChromiumPage` - chromiumoxide-backed page (feature `chromium`)

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use storefront_core_types::{
    DriverError, ElementHandle, ElementSnapshot, ElementState, LoadState, LocatorSpec, SelectBy,
};

#[cfg(feature = "chromium")]
pub mod chromium;
pub mod scripted;

#[cfg(feature = "chromium")]
pub use chromium::{ChromiumPage, ChromiumSession, ChromiumSettings};
pub use scripted::{ElementScript, Interaction, PageScript, ScriptedPage};

/// Browser page capabilities consumed by the suite.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Build a lazy handle. Never fails; problems surface when the handle is used.
    fn locate(&self, locator: &LocatorSpec) -> ElementHandle;

    /// Non-blocking visibility check. A missing element is `Ok(false)`.
    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool, DriverError>;

    /// Block until the element reaches `state` or `timeout` elapses.
    async fn wait_for(
        &self,
        handle: &ElementHandle,
        state: ElementState,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Read every element property in one evaluation. `None` when not attached.
    async fn snapshot(&self, handle: &ElementHandle) -> Result<Option<ElementSnapshot>, DriverError>;

    async fn get_attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    async fn text_content(&self, handle: &ElementHandle) -> Result<Option<String>, DriverError>;

    /// Text of every element matching the locator, in document order
    async fn all_text_contents(&self, locator: &LocatorSpec) -> Result<Vec<String>, DriverError>;

    async fn is_enabled(&self, handle: &ElementHandle) -> Result<bool, DriverError>;

    async fn click(&self, handle: &ElementHandle) -> Result<(), DriverError>;

    async fn fill(&self, handle: &ElementHandle, text: &str) -> Result<(), DriverError>;

    async fn press(&self, handle: &ElementHandle, key: &str) -> Result<(), DriverError>;

    async fn select_option(&self, handle: &ElementHandle, option: &SelectBy)
        -> Result<(), DriverError>;

    async fn set_checked(&self, handle: &ElementHandle, checked: bool) -> Result<(), DriverError>;

    async fn scroll_into_view(&self, handle: &ElementHandle) -> Result<(), DriverError>;

    /// Write a PNG capture of the viewport, or of the whole document when `full_page`.
    async fn screenshot(&self, path: &Path, full_page: bool) -> Result<(), DriverError>;

    async fn goto(&self, url: &str) -> Result<(), DriverError>;

    async fn url(&self) -> Result<String, DriverError>;

    async fn title(&self) -> Result<String, DriverError>;

    /// Block until the page reaches `state`; `NetworkIdle` means no in-flight
    /// requests for the driver's quiet period.
    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration)
        -> Result<(), DriverError>;
}
