//! Scripted in-memory page
//!
//! Elements follow timelines measured from the moment their page was loaded,
//! on the tokio clock, so tests running with a paused clock observe exact
//! transition points. Every selector the driver is asked about is recorded in
//! probe order.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use storefront_core_types::{
    DriverError, ElementHandle, ElementSnapshot, ElementState, LoadState, LocatorSpec, PageId,
    SelectBy,
};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::PageDriver;

const POLL_STEP: Duration = Duration::from_millis(50);

/// Timeline of a single element.
#[derive(Clone, Debug)]
pub struct ElementScript {
    attached_from: Duration,
    detached_from: Option<Duration>,
    visible: bool,
    visible_from: Duration,
    hidden_from: Option<Duration>,
    rendered: bool,
    enabled_from: Duration,
    texts: Vec<(Duration, String)>,
    attributes: HashMap<String, String>,
    navigates_to: Option<String>,
}

impl ElementScript {
    /// Attached, rendered, visible and enabled from page load
    pub fn visible() -> Self {
        Self {
            attached_from: Duration::ZERO,
            detached_from: None,
            visible: true,
            visible_from: Duration::ZERO,
            hidden_from: None,
            rendered: true,
            enabled_from: Duration::ZERO,
            texts: Vec::new(),
            attributes: HashMap::new(),
            navigates_to: None,
        }
    }

    /// Attached but never visible (`display: none`)
    pub fn hidden() -> Self {
        Self {
            visible: false,
            rendered: false,
            ..Self::visible()
        }
    }

    /// Not in the document until `after`, then visible
    pub fn appears_after(mut self, after: Duration) -> Self {
        self.attached_from = after;
        self.visible_from = self.visible_from.max(after);
        self
    }

    /// Visible only from `after`; attached the whole time
    pub fn visible_after(mut self, after: Duration) -> Self {
        self.visible_from = after;
        self
    }

    pub fn hides_after(mut self, after: Duration) -> Self {
        self.hidden_from = Some(after);
        self
    }

    pub fn detaches_after(mut self, after: Duration) -> Self {
        self.detached_from = Some(after);
        self
    }

    /// Carries `disabled` until `until`
    pub fn disabled_until(mut self, until: Duration) -> Self {
        self.enabled_from = until;
        self
    }

    /// Carries `disabled` for good
    pub fn disabled(mut self) -> Self {
        self.enabled_from = Duration::MAX;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.texts.push((Duration::ZERO, text.into()));
        self
    }

    pub fn text_after(mut self, after: Duration, text: impl Into<String>) -> Self {
        self.texts.push((after, text.into()));
        self.texts.sort_by_key(|(at, _)| *at);
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Clicking loads the page scripted for `url`
    pub fn navigates_to(mut self, url: impl Into<String>) -> Self {
        self.navigates_to = Some(url.into());
        self
    }

    fn attached_at(&self, t: Duration) -> bool {
        t >= self.attached_from && self.detached_from.map_or(true, |d| t < d)
    }

    fn visible_at(&self, t: Duration) -> bool {
        self.attached_at(t)
            && self.visible
            && t >= self.visible_from
            && self.hidden_from.map_or(true, |h| t < h)
    }

    fn text_at(&self, t: Duration) -> Option<String> {
        self.texts
            .iter()
            .rev()
            .find(|(at, _)| *at <= t)
            .map(|(_, text)| text.clone())
    }

    fn snapshot_at(&self, t: Duration) -> Option<ElementSnapshot> {
        if !self.attached_at(t) {
            return None;
        }
        let visible = self.visible_at(t);
        Some(ElementSnapshot {
            visible,
            rendered: self.rendered && visible,
            disabled: t < self.enabled_from,
            text: self.text_at(t),
        })
    }
}

/// Content of one scripted URL.
#[derive(Clone, Debug, Default)]
pub struct PageScript {
    title: String,
    elements: HashMap<String, ElementScript>,
    lists: HashMap<String, Vec<String>>,
    network_idle_after: Duration,
}

impl PageScript {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn element(mut self, selector: impl Into<String>, script: ElementScript) -> Self {
        self.elements.insert(selector.into(), script);
        self
    }

    /// Multi-element locator answering `all_text_contents`
    pub fn list<I, S>(mut self, selector: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(selector.into(), items.into_iter().map(Into::into).collect());
        self
    }

    /// Requests stay in flight until `after` past load
    pub fn network_idle_after(mut self, after: Duration) -> Self {
        self.network_idle_after = after;
        self
    }
}

/// Interaction recorded by [`ScriptedPage`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Interaction {
    Click(String),
    Fill(String, String),
    Press(String, String),
    Select(String, SelectBy),
    Check(String, bool),
    ScrollIntoView(String),
    Screenshot { path: String, full_page: bool },
    Goto(String),
}

struct PageState {
    url: String,
    loaded_at: Instant,
    current: PageScript,
    routes: HashMap<String, PageScript>,
    probes: Vec<String>,
    interactions: Vec<Interaction>,
}

pub struct ScriptedPage {
    id: PageId,
    state: Mutex<PageState>,
}

impl Default for ScriptedPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedPage {
    /// Blank page with no routes
    pub fn new() -> Self {
        Self {
            id: PageId::new(),
            state: Mutex::new(PageState {
                url: "about:blank".to_string(),
                loaded_at: Instant::now(),
                current: PageScript::default(),
                routes: HashMap::new(),
                probes: Vec::new(),
                interactions: Vec::new(),
            }),
        }
    }

    /// Start already loaded on `url`
    pub fn loaded(url: impl Into<String>, script: PageScript) -> Self {
        let page = Self::new();
        let url = url.into();
        page.route(url.clone(), script);
        page.load(&url);
        page
    }

    /// Register the content served for `url`
    pub fn route(&self, url: impl Into<String>, script: PageScript) {
        self.state.lock().routes.insert(url.into(), script);
    }

    /// Selectors queried so far, in order
    pub fn probes(&self) -> Vec<String> {
        self.state.lock().probes.clone()
    }

    pub fn interactions(&self) -> Vec<Interaction> {
        self.state.lock().interactions.clone()
    }

    /// Values typed into `selector`, oldest first
    pub fn filled(&self, selector: &str) -> Vec<String> {
        self.state
            .lock()
            .interactions
            .iter()
            .filter_map(|i| match i {
                Interaction::Fill(sel, value) if sel == selector => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    fn load(&self, url: &str) -> bool {
        let mut state = self.state.lock();
        match state.routes.get(url).cloned() {
            Some(script) => {
                state.current = script;
                state.url = url.to_string();
                state.loaded_at = Instant::now();
                debug!(url, "scripted page loaded");
                true
            }
            None => false,
        }
    }

    fn probe(&self, selector: &str) -> Option<ElementSnapshot> {
        let mut state = self.state.lock();
        state.probes.push(selector.to_string());
        let t = state.loaded_at.elapsed();
        state
            .current
            .elements
            .get(selector)
            .and_then(|script| script.snapshot_at(t))
    }

    fn attached(&self, handle: &ElementHandle) -> Result<(ElementScript, Duration), DriverError> {
        let mut state = self.state.lock();
        let selector = handle.locator().as_str();
        state.probes.push(selector.to_string());
        let t = state.loaded_at.elapsed();
        match state.current.elements.get(selector) {
            Some(script) if script.attached_at(t) => Ok((script.clone(), t)),
            _ => Err(DriverError::NotAttached(selector.to_string())),
        }
    }

    fn record(&self, interaction: Interaction) {
        self.state.lock().interactions.push(interaction);
    }

    fn state_reached(&self, selector: &str, state: ElementState) -> bool {
        let snapshot = self.probe(selector);
        match state {
            ElementState::Attached => snapshot.is_some(),
            ElementState::Visible => snapshot.map_or(false, |s| s.visible),
            ElementState::Hidden => snapshot.map_or(true, |s| !s.visible),
        }
    }
}

#[async_trait]
impl PageDriver for ScriptedPage {
    fn locate(&self, locator: &LocatorSpec) -> ElementHandle {
        ElementHandle::new(self.id.clone(), locator.clone())
    }

    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool, DriverError> {
        Ok(self
            .probe(handle.locator().as_str())
            .map_or(false, |s| s.visible))
    }

    async fn wait_for(
        &self,
        handle: &ElementHandle,
        state: ElementState,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        // None: the timeout is past what the clock can represent, so never expire
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if self.state_reached(handle.locator().as_str(), state) {
                return Ok(());
            }
            let step = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(DriverError::timeout(
                            format!("waiting for {} to be {}", handle, state.name()),
                            timeout.as_millis() as u64,
                        ));
                    }
                    POLL_STEP.min(deadline - now)
                }
                None => POLL_STEP,
            };
            sleep(step).await;
        }
    }

    async fn snapshot(&self, handle: &ElementHandle) -> Result<Option<ElementSnapshot>, DriverError> {
        Ok(self.probe(handle.locator().as_str()))
    }

    async fn get_attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let (script, _) = self.attached(handle)?;
        Ok(script.attributes.get(name).cloned())
    }

    async fn text_content(&self, handle: &ElementHandle) -> Result<Option<String>, DriverError> {
        let (script, t) = self.attached(handle)?;
        Ok(script.text_at(t))
    }

    async fn all_text_contents(&self, locator: &LocatorSpec) -> Result<Vec<String>, DriverError> {
        let state = self.state.lock();
        Ok(state
            .current
            .lists
            .get(locator.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn is_enabled(&self, handle: &ElementHandle) -> Result<bool, DriverError> {
        let (script, t) = self.attached(handle)?;
        Ok(t >= script.enabled_from)
    }

    async fn click(&self, handle: &ElementHandle) -> Result<(), DriverError> {
        let (script, t) = self.attached(handle)?;
        if t < script.enabled_from {
            return Err(DriverError::Protocol(format!(
                "element {} is disabled",
                handle
            )));
        }
        self.record(Interaction::Click(handle.locator().to_string()));
        if let Some(url) = script.navigates_to {
            self.goto(&url).await?;
        }
        Ok(())
    }

    async fn fill(&self, handle: &ElementHandle, text: &str) -> Result<(), DriverError> {
        self.attached(handle)?;
        self.record(Interaction::Fill(
            handle.locator().to_string(),
            text.to_string(),
        ));
        Ok(())
    }

    async fn press(&self, handle: &ElementHandle, key: &str) -> Result<(), DriverError> {
        self.attached(handle)?;
        self.record(Interaction::Press(
            handle.locator().to_string(),
            key.to_string(),
        ));
        Ok(())
    }

    async fn select_option(
        &self,
        handle: &ElementHandle,
        option: &SelectBy,
    ) -> Result<(), DriverError> {
        self.attached(handle)?;
        self.record(Interaction::Select(
            handle.locator().to_string(),
            option.clone(),
        ));
        Ok(())
    }

    async fn set_checked(&self, handle: &ElementHandle, checked: bool) -> Result<(), DriverError> {
        self.attached(handle)?;
        self.record(Interaction::Check(handle.locator().to_string(), checked));
        Ok(())
    }

    async fn scroll_into_view(&self, handle: &ElementHandle) -> Result<(), DriverError> {
        self.attached(handle)?;
        self.record(Interaction::ScrollIntoView(handle.locator().to_string()));
        Ok(())
    }

    async fn screenshot(&self, path: &Path, full_page: bool) -> Result<(), DriverError> {
        self.record(Interaction::Screenshot {
            path: path.display().to_string(),
            full_page,
        });
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.record(Interaction::Goto(url.to_string()));
        if self.load(url) {
            Ok(())
        } else {
            Err(DriverError::Navigation {
                url: url.to_string(),
                message: "no scripted page for this url".to_string(),
            })
        }
    }

    async fn url(&self) -> Result<String, DriverError> {
        Ok(self.state.lock().url.clone())
    }

    async fn title(&self) -> Result<String, DriverError> {
        Ok(self.state.lock().current.title.clone())
    }

    async fn wait_for_load_state(
        &self,
        state: LoadState,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let remaining = {
            let page = self.state.lock();
            match state {
                LoadState::NetworkIdle => page
                    .current
                    .network_idle_after
                    .saturating_sub(page.loaded_at.elapsed()),
                LoadState::Load | LoadState::DomContentLoaded => Duration::ZERO,
            }
        };
        if remaining > timeout {
            sleep(timeout).await;
            return Err(DriverError::timeout(
                format!("waiting for {}", state.name()),
                timeout.as_millis() as u64,
            ));
        }
        sleep(remaining).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> ScriptedPage {
        ScriptedPage::loaded(
            "https://shop.test/",
            PageScript::new("Shop")
                .element("#now", ElementScript::visible().text("hello"))
                .element(
                    "#later",
                    ElementScript::visible().appears_after(Duration::from_millis(300)),
                )
                .element("#ghost", ElementScript::hidden()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn visibility_follows_timeline() {
        let page = page();
        let later = page.locate(&"#later".into());
        assert!(!page.is_visible(&later).await.unwrap());
        assert!(page.snapshot(&later).await.unwrap().is_none());

        sleep(Duration::from_millis(300)).await;
        assert!(page.is_visible(&later).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_times_out_on_hidden_element() {
        let page = page();
        let ghost = page.locate(&"#ghost".into());
        let err = page
            .wait_for(&ghost, ElementState::Visible, Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        page.wait_for(&ghost, ElementState::Attached, Duration::from_millis(200))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_wait_still_resolves() {
        let page = page();
        let later = page.locate(&"#later".into());
        let start = Instant::now();
        page.wait_for(&later, ElementState::Visible, Duration::MAX)
            .await
            .unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn scroll_requires_attached_element() {
        let page = page();
        page.scroll_into_view(&page.locate(&"#now".into()))
            .await
            .unwrap();
        let err = page
            .scroll_into_view(&page.locate(&"#later".into()))
            .await
            .unwrap_err();
        assert!(err.is_not_attached());
        assert_eq!(
            page.interactions(),
            vec![Interaction::ScrollIntoView("#now".to_string())]
        );
    }

    #[tokio::test]
    async fn missing_element_reports_not_attached() {
        let page = page();
        let missing = page.locate(&"#nope".into());
        let err = page.text_content(&missing).await.unwrap_err();
        assert!(err.is_not_attached());
        assert_eq!(page.probes().last().map(String::as_str), Some("#nope"));
    }

    #[tokio::test]
    async fn click_follows_scripted_navigation() {
        let page = ScriptedPage::loaded(
            "https://shop.test/",
            PageScript::new("Home").element(
                "a[href=\"/products\"]",
                ElementScript::visible().navigates_to("https://shop.test/products"),
            ),
        );
        page.route("https://shop.test/products", PageScript::new("Products"));

        let link = page.locate(&"a[href=\"/products\"]".into());
        page.click(&link).await.unwrap();
        assert_eq!(page.url().await.unwrap(), "https://shop.test/products");
        assert_eq!(page.title().await.unwrap(), "Products");
    }

    #[tokio::test]
    async fn unknown_route_is_navigation_error() {
        let page = ScriptedPage::new();
        let err = page.goto("https://nowhere.test/").await.unwrap_err();
        assert!(matches!(err, DriverError::Navigation { .. }));
    }
}
