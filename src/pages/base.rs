//! Shared page-object plumbing
//!
//! Every page object owns a [`BasePage`]: the page driver plus one resolver,
//! one waiter and the navigation wait strategy, all configured from the same
//! [`SuiteConfig`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use action_locator::FallbackResolver;
use action_primitives::{
    DefaultWaitStrategy, UrlMatch, WaitOptions, WaitStrategy, WaitTier, Waiter,
};
use page_driver::PageDriver;
use storefront_core_types::{
    DiagnosticsSink, ElementHandle, LoadState, LocatorSpec, SelectBy, TracingSink,
};
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::errors::SuiteResult;

#[derive(Clone)]
pub struct BasePage {
    driver: Arc<dyn PageDriver>,
    resolver: Arc<FallbackResolver>,
    waiter: Arc<Waiter>,
    navigation: Arc<dyn WaitStrategy>,
    config: Arc<SuiteConfig>,
}

impl BasePage {
    pub fn new(driver: Arc<dyn PageDriver>, config: Arc<SuiteConfig>) -> Self {
        Self::with_sink(driver, config, Arc::new(TracingSink))
    }

    pub fn with_sink(
        driver: Arc<dyn PageDriver>,
        config: Arc<SuiteConfig>,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let resolver = FallbackResolver::new(driver.clone(), sink.clone());
        let waiter = Waiter::new(driver.clone(), sink, config.timeouts.wait_options());
        let navigation = DefaultWaitStrategy::new(
            config.timeouts.navigation(),
            config.timeouts.network_idle(),
        );
        Self {
            driver,
            resolver: Arc::new(resolver),
            waiter: Arc::new(waiter),
            navigation: Arc::new(navigation),
            config,
        }
    }

    pub fn driver(&self) -> &Arc<dyn PageDriver> {
        &self.driver
    }

    pub fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    pub fn resolver(&self) -> &FallbackResolver {
        &self.resolver
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Go to `path` (relative to the base URL, or absolute) and wait for the
    /// network to settle
    pub async fn navigate(&self, path: &str) -> SuiteResult<()> {
        let url = self.config.url_for(path)?;
        info!(url = %url, "navigating");
        self.driver.goto(url.as_str()).await?;
        self.navigation.wait(self.driver.as_ref(), WaitTier::Idle).await?;
        Ok(())
    }

    pub async fn title(&self) -> SuiteResult<String> {
        Ok(self.driver.title().await?)
    }

    pub async fn current_url(&self) -> SuiteResult<String> {
        Ok(self.driver.url().await?)
    }

    pub fn locate(&self, selector: &str) -> ElementHandle {
        self.driver.locate(&LocatorSpec::new(selector))
    }

    /// Wait until `selector` is visible and hand back its handle
    pub async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Option<Duration>,
    ) -> SuiteResult<ElementHandle> {
        let handle = self.locate(selector);
        self.waiter
            .wait_for_visible(&handle, self.options(timeout))
            .await?;
        Ok(handle)
    }

    pub async fn wait_for_element_hidden(
        &self,
        selector: &str,
        timeout: Option<Duration>,
    ) -> SuiteResult<()> {
        let handle = self.locate(selector);
        self.waiter
            .wait_for_hidden(&handle, self.options(timeout))
            .await?;
        Ok(())
    }

    /// Resolve through the fallback chain with the configured per-candidate budget
    pub async fn resolve(&self, primary: &str, fallbacks: &[&str]) -> SuiteResult<ElementHandle> {
        let handle = self
            .resolver
            .resolve_selectors(primary, fallbacks, self.config.timeouts.locator())
            .await?;
        Ok(handle)
    }

    pub async fn click(&self, selector: &str) -> SuiteResult<()> {
        let handle = self.wait_for_element(selector, None).await?;
        self.click_handle(&handle).await
    }

    /// Wait for clickability, then click
    pub async fn click_handle(&self, handle: &ElementHandle) -> SuiteResult<()> {
        self.waiter.wait_for_clickable(handle, None).await?;
        debug!(element = %handle, "click");
        self.driver.click(handle).await?;
        Ok(())
    }

    pub async fn fill(&self, selector: &str, text: &str) -> SuiteResult<()> {
        let handle = self.wait_for_element(selector, None).await?;
        self.driver.fill(&handle, text).await?;
        Ok(())
    }

    pub async fn press_key(&self, selector: &str, key: &str) -> SuiteResult<()> {
        let handle = self.wait_for_element(selector, None).await?;
        self.driver.press(&handle, key).await?;
        Ok(())
    }

    pub async fn select_option(&self, selector: &str, option: SelectBy) -> SuiteResult<()> {
        let handle = self.wait_for_element(selector, None).await?;
        self.driver.select_option(&handle, &option).await?;
        Ok(())
    }

    pub async fn set_checked(&self, selector: &str, checked: bool) -> SuiteResult<()> {
        let handle = self.wait_for_element(selector, None).await?;
        self.driver.set_checked(&handle, checked).await?;
        Ok(())
    }

    /// Wait for visibility, then bring the element into the viewport
    pub async fn scroll_to_element(&self, selector: &str) -> SuiteResult<()> {
        let handle = self.wait_for_element(selector, None).await?;
        self.driver.scroll_into_view(&handle).await?;
        Ok(())
    }

    /// Full-page capture. Without a path the file is `screenshot-<unix ms>.png`
    /// in the working directory.
    pub async fn take_screenshot(&self, path: Option<&Path>) -> SuiteResult<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let millis = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_millis();
                PathBuf::from(format!("screenshot-{millis}.png"))
            }
        };
        self.driver.screenshot(&path, true).await?;
        info!(path = %path.display(), "screenshot saved");
        Ok(path)
    }

    /// Text content of a visible element; empty when it has none
    pub async fn get_text(&self, selector: &str) -> SuiteResult<String> {
        let handle = self.wait_for_element(selector, None).await?;
        Ok(self.driver.text_content(&handle).await?.unwrap_or_default())
    }

    /// Attribute of a visible element; empty when absent
    pub async fn get_attribute(&self, selector: &str, name: &str) -> SuiteResult<String> {
        let handle = self.wait_for_element(selector, None).await?;
        Ok(self
            .driver
            .get_attribute(&handle, name)
            .await?
            .unwrap_or_default())
    }

    /// Immediate check, no waiting
    pub async fn is_element_visible(&self, selector: &str) -> SuiteResult<bool> {
        Ok(self.driver.is_visible(&self.locate(selector)).await?)
    }

    pub async fn is_element_enabled(&self, selector: &str) -> SuiteResult<bool> {
        let handle = self.wait_for_element(selector, None).await?;
        Ok(self.driver.is_enabled(&handle).await?)
    }

    pub async fn get_all_text_contents(&self, selector: &str) -> SuiteResult<Vec<String>> {
        Ok(self
            .driver
            .all_text_contents(&LocatorSpec::new(selector))
            .await?)
    }

    /// Wait until `selector` contains `text`
    pub async fn expect_text(&self, selector: &str, text: &str) -> SuiteResult<()> {
        let handle = self.locate(selector);
        self.waiter.wait_for_text(&handle, text, None).await?;
        Ok(())
    }

    pub async fn wait_for_url(
        &self,
        pattern: &UrlMatch,
        timeout: Option<Duration>,
    ) -> SuiteResult<()> {
        self.waiter
            .wait_for_url(pattern, self.options(timeout))
            .await?;
        Ok(())
    }

    pub async fn wait_for_load_state(&self, state: LoadState) -> SuiteResult<()> {
        let timeout = match state {
            LoadState::NetworkIdle => self.config.timeouts.network_idle(),
            LoadState::Load | LoadState::DomContentLoaded => self.config.timeouts.navigation(),
        };
        self.driver.wait_for_load_state(state, timeout).await?;
        Ok(())
    }

    pub async fn wait_for_network_idle(&self, timeout: Option<Duration>) -> SuiteResult<()> {
        let timeout = timeout.unwrap_or_else(|| self.config.timeouts.network_idle());
        self.waiter.wait_for_network_idle(timeout).await?;
        Ok(())
    }

    fn options(&self, timeout: Option<Duration>) -> Option<WaitOptions> {
        timeout.map(|t| self.waiter.defaults().with_timeout(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::errors::SuiteError;
    use page_driver::{ElementScript, Interaction, PageScript, ScriptedPage};
    use tokio::time::Instant;

    const HOME: &str = "https://automationexercise.com/";

    fn base(script: PageScript) -> (BasePage, Arc<ScriptedPage>) {
        let page = Arc::new(ScriptedPage::loaded(HOME, script));
        let config = Arc::new(SuiteConfig::for_environment(Environment::Prod).unwrap());
        (BasePage::new(page.clone(), config), page)
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_resolves_relative_path_and_waits_for_idle() {
        let (base, page) = base(PageScript::new("Home"));
        page.route(
            "https://automationexercise.com/products",
            PageScript::new("Products").network_idle_after(Duration::from_millis(800)),
        );

        let start = Instant::now();
        base.navigate("/products").await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(800));
        assert_eq!(base.title().await.unwrap(), "Products");
        assert_eq!(
            page.interactions(),
            vec![Interaction::Goto(
                "https://automationexercise.com/products".to_string()
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_and_attribute_default_to_empty() {
        let (base, _page) = base(
            PageScript::new("Home")
                .element("#blank", ElementScript::visible())
                .element("#link", ElementScript::visible().attribute("href", "/cart")),
        );

        assert_eq!(base.get_text("#blank").await.unwrap(), "");
        assert_eq!(base.get_attribute("#blank", "href").await.unwrap(), "");
        assert_eq!(base.get_attribute("#link", "href").await.unwrap(), "/cart");
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_waits_until_enabled() {
        let (base, page) = base(PageScript::new("Home").element(
            "#go",
            ElementScript::visible().disabled_until(Duration::from_millis(400)),
        ));

        base.click("#go").await.unwrap();
        assert_eq!(page.interactions(), vec![Interaction::Click("#go".to_string())]);
        assert!(base.is_element_enabled("#go").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_waits_for_visibility() {
        let (base, page) = base(PageScript::new("Home").element(
            "#footer",
            ElementScript::visible().visible_after(Duration::from_millis(600)),
        ));

        let start = Instant::now();
        base.scroll_to_element("#footer").await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(600));
        assert_eq!(
            page.interactions(),
            vec![Interaction::ScrollIntoView("#footer".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_to_missing_element_times_out() {
        let (base, page) = base(PageScript::new("Home"));

        let err = base.scroll_to_element("#nowhere").await.unwrap_err();

        assert!(matches!(err, SuiteError::Wait(_)));
        assert!(page.interactions().is_empty());
    }

    #[tokio::test]
    async fn test_screenshot_is_full_page() {
        let (base, page) = base(PageScript::new("Home"));

        let saved = base
            .take_screenshot(Some(Path::new("out/home.png")))
            .await
            .unwrap();

        assert_eq!(saved, PathBuf::from("out/home.png"));
        assert_eq!(
            page.interactions(),
            vec![Interaction::Screenshot {
                path: "out/home.png".to_string(),
                full_page: true,
            }]
        );
    }

    #[tokio::test]
    async fn test_screenshot_name_defaults_to_timestamp() {
        let (base, page) = base(PageScript::new("Home"));

        let saved = base.take_screenshot(None).await.unwrap();
        let name = saved.to_string_lossy().into_owned();

        assert!(name.starts_with("screenshot-"));
        assert!(name.ends_with(".png"));
        assert!(name["screenshot-".len()..name.len() - 4]
            .chars()
            .all(|c| c.is_ascii_digit()));
        assert!(matches!(
            page.interactions().as_slice(),
            [Interaction::Screenshot { full_page: true, .. }]
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timeout_is_honoured() {
        let (base, _page) = base(PageScript::new("Home"));

        let start = Instant::now();
        let err = base
            .wait_for_element("#never", Some(Duration::from_millis(1000)))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("#never to be visible"));
        assert!(start.elapsed() < Duration::from_millis(1200));
    }
}
