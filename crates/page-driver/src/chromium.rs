//! Chromium-backed page driver
//!
//! Locators are interpreted as CSS selectors. Element reads go through a
//! single `Runtime.evaluate` per call so snapshots are point-in-time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use storefront_core_types::{
    DriverError, ElementHandle, ElementSnapshot, ElementState, LoadState, LocatorSpec, PageId,
    SelectBy,
};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::PageDriver;

const POLL_STEP: Duration = Duration::from_millis(100);

/// Launch settings for [`ChromiumSession`].
#[derive(Clone, Debug)]
pub struct ChromiumSettings {
    pub headless: bool,
    pub executable: Option<PathBuf>,
    pub no_sandbox: bool,
    pub request_timeout: Duration,
    /// Quiet window used for `LoadState::NetworkIdle`
    pub network_quiet: Duration,
}

impl Default for ChromiumSettings {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            no_sandbox: false,
            request_timeout: Duration::from_secs(30),
            network_quiet: Duration::from_millis(500),
        }
    }
}

/// A launched browser process plus its event-handler task.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    network_quiet: Duration,
}

impl ChromiumSession {
    pub async fn launch(settings: &ChromiumSettings) -> Result<Self, DriverError> {
        let mut builder = BrowserConfig::builder().request_timeout(settings.request_timeout);
        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &settings.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|err| DriverError::Protocol(format!("browser config error: {err}")))?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(protocol)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        info!(headless = settings.headless, "Chromium launched");

        Ok(Self {
            browser,
            handler,
            network_quiet: settings.network_quiet,
        })
    }

    pub async fn new_page(&self) -> Result<ChromiumPage, DriverError> {
        let page = self.browser.new_page("about:blank").await.map_err(protocol)?;
        Ok(ChromiumPage {
            id: PageId::new(),
            page,
            network_quiet: self.network_quiet,
        })
    }

    pub async fn close(mut self) -> Result<(), DriverError> {
        self.browser.close().await.map_err(protocol)?;
        if let Err(err) = self.browser.wait().await {
            warn!("browser process did not exit cleanly: {}", err);
        }
        self.handler.abort();
        Ok(())
    }
}

pub struct ChromiumPage {
    id: PageId,
    page: Page,
    network_quiet: Duration,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    attached: bool,
    #[serde(default)]
    visible: bool,
    #[serde(default)]
    rendered: bool,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    attached: bool,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawActionResult {
    ok: bool,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLoad {
    ready: String,
    resources: u64,
}

impl ChromiumPage {
    pub fn inner(&self) -> &Page {
        &self.page
    }

    async fn eval<T: DeserializeOwned>(&self, expression: String) -> Result<T, DriverError> {
        self.page
            .evaluate(expression)
            .await
            .map_err(protocol)?
            .into_value()
            .map_err(|err| DriverError::Protocol(format!("unexpected evaluation result: {err}")))
    }

    async fn read_snapshot(&self, locator: &LocatorSpec) -> Result<Option<ElementSnapshot>, DriverError> {
        let raw: RawSnapshot = self.eval(snapshot_script(locator)?).await?;
        if !raw.attached {
            return Ok(None);
        }
        Ok(Some(ElementSnapshot {
            visible: raw.visible,
            rendered: raw.rendered,
            disabled: raw.disabled,
            text: raw.text,
        }))
    }

    async fn run_action(&self, handle: &ElementHandle, body: &str) -> Result<(), DriverError> {
        let selector = selector_literal(handle.locator())?;
        let expression = format!(
            "(() => {{
                const el = document.querySelector({selector});
                if (!el) {{ return {{ ok: false, reason: 'missing' }}; }}
                {body}
            }})()"
        );
        let result: RawActionResult = self.eval(expression).await?;
        if result.ok {
            return Ok(());
        }
        match result.reason.as_deref() {
            Some("missing") => Err(DriverError::NotAttached(handle.locator().to_string())),
            other => Err(DriverError::Protocol(format!(
                "action on {} failed: {}",
                handle,
                other.unwrap_or("unknown")
            ))),
        }
    }
}

#[async_trait]
impl PageDriver for ChromiumPage {
    fn locate(&self, locator: &LocatorSpec) -> ElementHandle {
        ElementHandle::new(self.id.clone(), locator.clone())
    }

    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool, DriverError> {
        Ok(self
            .read_snapshot(handle.locator())
            .await?
            .map_or(false, |s| s.visible))
    }

    async fn wait_for(
        &self,
        handle: &ElementHandle,
        state: ElementState,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let snapshot = self.read_snapshot(handle.locator()).await?;
            let reached = match state {
                ElementState::Attached => snapshot.is_some(),
                ElementState::Visible => snapshot.as_ref().map_or(false, |s| s.visible),
                ElementState::Hidden => snapshot.as_ref().map_or(true, |s| !s.visible),
            };
            if reached {
                return Ok(());
            }
            let Some(step) = next_poll(deadline, Instant::now()) else {
                return Err(DriverError::timeout(
                    format!("waiting for {} to be {}", handle, state.name()),
                    timeout.as_millis() as u64,
                ));
            };
            sleep(step).await;
        }
    }

    async fn snapshot(&self, handle: &ElementHandle) -> Result<Option<ElementSnapshot>, DriverError> {
        self.read_snapshot(handle.locator()).await
    }

    async fn get_attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let selector = selector_literal(handle.locator())?;
        let name = serde_json::to_string(name)
            .map_err(|err| DriverError::Protocol(format!("invalid attribute name: {err}")))?;
        let raw: RawValue = self
            .eval(format!(
                "(() => {{
                    const el = document.querySelector({selector});
                    if (!el) {{ return {{ attached: false }}; }}
                    return {{ attached: true, value: el.getAttribute({name}) }};
                }})()"
            ))
            .await?;
        if !raw.attached {
            return Err(DriverError::NotAttached(handle.locator().to_string()));
        }
        Ok(raw.value)
    }

    async fn text_content(&self, handle: &ElementHandle) -> Result<Option<String>, DriverError> {
        match self.read_snapshot(handle.locator()).await? {
            Some(snapshot) => Ok(snapshot.text),
            None => Err(DriverError::NotAttached(handle.locator().to_string())),
        }
    }

    async fn all_text_contents(&self, locator: &LocatorSpec) -> Result<Vec<String>, DriverError> {
        let selector = selector_literal(locator)?;
        self.eval(format!(
            "Array.from(document.querySelectorAll({selector})).map(el => el.textContent || '')"
        ))
        .await
    }

    async fn is_enabled(&self, handle: &ElementHandle) -> Result<bool, DriverError> {
        match self.read_snapshot(handle.locator()).await? {
            Some(snapshot) => Ok(!snapshot.disabled),
            None => Err(DriverError::NotAttached(handle.locator().to_string())),
        }
    }

    async fn click(&self, handle: &ElementHandle) -> Result<(), DriverError> {
        debug!(locator = %handle, "chromium click");
        let element = self
            .page
            .find_element(handle.locator().as_str())
            .await
            .map_err(|_| DriverError::NotAttached(handle.locator().to_string()))?;
        element.click().await.map_err(protocol)?;
        Ok(())
    }

    async fn fill(&self, handle: &ElementHandle, text: &str) -> Result<(), DriverError> {
        let value = serde_json::to_string(text)
            .map_err(|err| DriverError::Protocol(format!("invalid fill value: {err}")))?;
        self.run_action(
            handle,
            &format!(
                "if (el.disabled) {{ return {{ ok: false, reason: 'disabled' }}; }}
                el.focus();
                el.value = {value};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return {{ ok: true }};"
            ),
        )
        .await
    }

    async fn press(&self, handle: &ElementHandle, key: &str) -> Result<(), DriverError> {
        let element = self
            .page
            .find_element(handle.locator().as_str())
            .await
            .map_err(|_| DriverError::NotAttached(handle.locator().to_string()))?;
        element.press_key(key).await.map_err(protocol)?;
        Ok(())
    }

    async fn select_option(
        &self,
        handle: &ElementHandle,
        option: &SelectBy,
    ) -> Result<(), DriverError> {
        let (field, wanted) = match option {
            SelectBy::Value(value) => ("value", value),
            SelectBy::Label(label) => ("label", label),
        };
        let wanted = serde_json::to_string(wanted)
            .map_err(|err| DriverError::Protocol(format!("invalid option: {err}")))?;
        self.run_action(
            handle,
            &format!(
                "const opt = Array.from(el.options || []).find(o => (o.{field} || '').trim() === {wanted});
                if (!opt) {{ return {{ ok: false, reason: 'option not found' }}; }}
                el.value = opt.value;
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return {{ ok: true }};"
            ),
        )
        .await
    }

    async fn set_checked(&self, handle: &ElementHandle, checked: bool) -> Result<(), DriverError> {
        self.run_action(
            handle,
            &format!(
                "if (el.checked !== {checked}) {{ el.click(); }}
                return {{ ok: el.checked === {checked}, reason: 'checked state did not change' }};"
            ),
        )
        .await
    }

    async fn scroll_into_view(&self, handle: &ElementHandle) -> Result<(), DriverError> {
        let element = self
            .page
            .find_element(handle.locator().as_str())
            .await
            .map_err(|_| DriverError::NotAttached(handle.locator().to_string()))?;
        element.scroll_into_view().await.map_err(protocol)?;
        Ok(())
    }

    async fn screenshot(&self, path: &Path, full_page: bool) -> Result<(), DriverError> {
        debug!(path = %path.display(), full_page, "chromium screenshot");
        self.page
            .save_screenshot(ScreenshotParams::builder().full_page(full_page).build(), path)
            .await
            .map_err(protocol)?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        info!(url, "navigating");
        self.page
            .goto(url)
            .await
            .map_err(|err| DriverError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        Ok(())
    }

    async fn url(&self) -> Result<String, DriverError> {
        Ok(self.page.url().await.map_err(protocol)?.unwrap_or_default())
    }

    async fn title(&self) -> Result<String, DriverError> {
        Ok(self
            .page
            .get_title()
            .await
            .map_err(protocol)?
            .unwrap_or_default())
    }

    async fn wait_for_load_state(
        &self,
        state: LoadState,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let deadline = Instant::now().checked_add(timeout);
        let mut last_count: Option<u64> = None;
        let mut quiet_since = Instant::now();
        loop {
            let load: RawLoad = self
                .eval(
                    "({ ready: document.readyState, resources: performance.getEntriesByType('resource').length })"
                        .to_string(),
                )
                .await?;
            let now = Instant::now();
            let reached = match state {
                LoadState::DomContentLoaded => load.ready != "loading",
                LoadState::Load => load.ready == "complete",
                LoadState::NetworkIdle => {
                    if last_count != Some(load.resources) {
                        last_count = Some(load.resources);
                        quiet_since = now;
                    }
                    load.ready == "complete" && now.duration_since(quiet_since) >= self.network_quiet
                }
            };
            if reached {
                return Ok(());
            }
            let Some(step) = next_poll(deadline, now) else {
                return Err(DriverError::timeout(
                    format!("waiting for {}", state.name()),
                    timeout.as_millis() as u64,
                ));
            };
            sleep(step).await;
        }
    }
}

/// Sleep before the next poll, or `None` once the deadline has passed.
/// A missing deadline (timeout too large for the clock) never expires.
fn next_poll(deadline: Option<Instant>, now: Instant) -> Option<Duration> {
    match deadline {
        Some(deadline) if now >= deadline => None,
        Some(deadline) => Some(POLL_STEP.min(deadline - now)),
        None => Some(POLL_STEP),
    }
}

fn protocol(err: CdpError) -> DriverError {
    DriverError::Protocol(err.to_string())
}

fn selector_literal(locator: &LocatorSpec) -> Result<String, DriverError> {
    serde_json::to_string(locator.as_str())
        .map_err(|err| DriverError::Protocol(format!("invalid selector encoding: {err}")))
}

fn snapshot_script(locator: &LocatorSpec) -> Result<String, DriverError> {
    let selector = selector_literal(locator)?;
    Ok(format!(
        "(() => {{
            const el = document.querySelector({selector});
            if (!el) {{ return {{ attached: false }}; }}
            const style = window.getComputedStyle(el);
            const rect = el.getBoundingClientRect();
            const visible = style.visibility !== 'hidden' && style.display !== 'none'
                && (rect.width > 0 || rect.height > 0 || el.getClientRects().length > 0);
            return {{
                attached: el.isConnected,
                visible,
                rendered: el.offsetParent !== null,
                disabled: el.hasAttribute('disabled'),
                text: el.textContent,
            }};
        }})()"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_poll_is_capped_by_deadline() {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(30);
        assert_eq!(next_poll(Some(deadline), now), Some(Duration::from_millis(30)));
        assert_eq!(next_poll(Some(now), now), None);
    }

    #[test]
    fn oversized_timeout_never_expires() {
        let now = Instant::now();
        let deadline = now.checked_add(Duration::MAX);
        assert!(deadline.is_none());
        assert_eq!(next_poll(deadline, now), Some(POLL_STEP));
    }
}
