//! Element resolver with fallback chain orchestration

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use page_driver::PageDriver;
use storefront_core_types::{
    CandidateList, Diagnostic, DiagnosticsSink, ElementHandle, ElementState, TracingSink,
};
use tracing::{debug, info};

use crate::errors::{FailedAttempt, LocatorError};
use crate::types::Resolution;

/// Element resolver trait
#[async_trait]
pub trait ElementResolver: Send + Sync {
    /// Resolve the first candidate that is currently visible
    async fn resolve(
        &self,
        candidates: &CandidateList,
        per_candidate_timeout: Duration,
    ) -> Result<Resolution, LocatorError>;
}

/// Resolver that walks a candidate list strictly in declared order.
///
/// The primary gets a zero-wait visibility check; each fallback gets a
/// bounded visibility wait. A winning fallback is reported through the sink
/// and never remembered: the next call starts at the primary again.
pub struct FallbackResolver {
    driver: Arc<dyn PageDriver>,
    sink: Arc<dyn DiagnosticsSink>,
}

impl FallbackResolver {
    pub fn new(driver: Arc<dyn PageDriver>, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { driver, sink }
    }

    /// Resolver reporting through `tracing`
    pub fn with_tracing(driver: Arc<dyn PageDriver>) -> Self {
        Self::new(driver, Arc::new(TracingSink))
    }

    /// String-level entry point used by page objects
    pub async fn resolve_selectors(
        &self,
        primary: &str,
        fallbacks: &[&str],
        per_candidate_timeout: Duration,
    ) -> Result<ElementHandle, LocatorError> {
        let candidates = CandidateList::new(primary, fallbacks.iter().copied());
        self.resolve(&candidates, per_candidate_timeout)
            .await
            .map(Resolution::into_handle)
    }
}

#[async_trait]
impl ElementResolver for FallbackResolver {
    async fn resolve(
        &self,
        candidates: &CandidateList,
        per_candidate_timeout: Duration,
    ) -> Result<Resolution, LocatorError> {
        let primary = candidates.primary();
        let mut attempts = Vec::with_capacity(candidates.len());

        let handle = self.driver.locate(primary);
        match self.driver.is_visible(&handle).await {
            Ok(true) => {
                debug!(locator = %primary, "primary locator resolved");
                return Ok(Resolution::new(handle, 0, primary.clone()));
            }
            Ok(false) => attempts.push(FailedAttempt {
                locator: primary.clone(),
                reason: "not visible".to_string(),
            }),
            Err(err) => {
                debug!(locator = %primary, "primary visibility check failed: {}", err);
                attempts.push(FailedAttempt {
                    locator: primary.clone(),
                    reason: err.to_string(),
                });
            }
        }

        for (offset, fallback) in candidates.fallbacks().iter().enumerate() {
            let candidate_index = offset + 1;
            debug!(locator = %fallback, candidate_index, "trying fallback locator");

            let handle = self.driver.locate(fallback);
            match self
                .driver
                .wait_for(&handle, ElementState::Visible, per_candidate_timeout)
                .await
            {
                Ok(()) => {
                    self.sink.emit(Diagnostic::FallbackUsed {
                        primary: primary.clone(),
                        fallback: fallback.clone(),
                        candidate_index,
                    });
                    return Ok(Resolution::new(handle, candidate_index, fallback.clone()));
                }
                Err(err) => {
                    debug!(locator = %fallback, "fallback locator failed: {}", err);
                    attempts.push(FailedAttempt {
                        locator: fallback.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(candidates = %candidates, "no locator candidate resolved");
        Err(LocatorError::AllLocatorsFailed { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_driver::{ElementScript, PageScript, ScriptedPage};
    use storefront_core_types::RecordingSink;

    fn resolver(script: PageScript) -> (FallbackResolver, Arc<ScriptedPage>, Arc<RecordingSink>) {
        let page = Arc::new(ScriptedPage::loaded("https://shop.test/", script));
        let sink = Arc::new(RecordingSink::new());
        (
            FallbackResolver::new(page.clone(), sink.clone()),
            page,
            sink,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_wins_without_touching_fallbacks() {
        let (resolver, page, sink) = resolver(
            PageScript::new("Home")
                .element("#primary", ElementScript::visible())
                .element("#fallback", ElementScript::visible()),
        );

        let candidates = CandidateList::new("#primary", ["#fallback"]);
        let result = resolver
            .resolve(&candidates, Duration::from_millis(1000))
            .await
            .unwrap();

        assert_eq!(result.candidate_index, 0);
        assert!(!result.healed());
        assert_eq!(page.probes(), vec!["#primary".to_string()]);
        assert!(sink.records().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_fallback_list_fails_on_missing_primary() {
        let (resolver, _page, sink) = resolver(PageScript::new("Home"));

        let err = resolver
            .resolve(&CandidateList::single("#gone"), Duration::from_millis(1000))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "All locators failed: #gone");
        assert!(sink.records().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_selectors_returns_fallback_handle() {
        let (resolver, _page, _sink) = resolver(
            PageScript::new("Home").element("#alt", ElementScript::visible()),
        );

        let handle = resolver
            .resolve_selectors("#main", &["#alt"], Duration::from_millis(500))
            .await
            .unwrap();
        assert_eq!(handle.locator().as_str(), "#alt");
    }
}
