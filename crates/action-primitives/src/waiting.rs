//! Built-in waiting applied after navigation

use std::time::Duration;

use async_trait::async_trait;
use page_driver::PageDriver;
use storefront_core_types::LoadState;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{errors::WaitError, types::WaitTier};

/// How long to hold a page object after navigation before touching elements
#[async_trait]
pub trait WaitStrategy: Send + Sync {
    /// Block until the page reaches `tier`
    async fn wait(&self, driver: &dyn PageDriver, tier: WaitTier) -> Result<(), WaitError>;
}

/// Load-state based strategy; every tier has its own budget
#[derive(Debug, Clone)]
pub struct DefaultWaitStrategy {
    /// Timeout for DomReady tier
    pub domready_timeout: Duration,

    /// Timeout for the network-idle half of the Idle tier
    pub idle_timeout: Duration,
}

impl Default for DefaultWaitStrategy {
    fn default() -> Self {
        Self {
            domready_timeout: Duration::from_millis(30_000),
            idle_timeout: Duration::from_millis(30_000),
        }
    }
}

impl DefaultWaitStrategy {
    pub fn new(domready_timeout: Duration, idle_timeout: Duration) -> Self {
        Self {
            domready_timeout,
            idle_timeout,
        }
    }

    async fn wait_load_state(
        &self,
        driver: &dyn PageDriver,
        state: LoadState,
        timeout: Duration,
    ) -> Result<(), WaitError> {
        let start = Instant::now();
        driver
            .wait_for_load_state(state, timeout)
            .await
            .map_err(|err| {
                warn!("load state {} not reached: {}", state.name(), err);
                if err.is_timeout() {
                    WaitError::Timeout {
                        description: state.name().to_string(),
                        timeout,
                        elapsed: start.elapsed(),
                    }
                } else {
                    WaitError::Driver(err)
                }
            })
    }
}

#[async_trait]
impl WaitStrategy for DefaultWaitStrategy {
    async fn wait(&self, driver: &dyn PageDriver, tier: WaitTier) -> Result<(), WaitError> {
        match tier {
            WaitTier::None => {
                debug!(tier = ?tier, "skipping post-navigation wait");
                Ok(())
            }

            WaitTier::DomReady => {
                debug!(tier = ?tier, "waiting for DOMContentLoaded");
                self.wait_load_state(driver, LoadState::DomContentLoaded, self.domready_timeout)
                    .await
            }

            WaitTier::Idle => {
                debug!(tier = ?tier, "waiting for DOMContentLoaded, then network idle");
                self.wait_load_state(driver, LoadState::DomContentLoaded, self.domready_timeout)
                    .await?;
                self.wait_load_state(driver, LoadState::NetworkIdle, self.idle_timeout)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_driver::{PageScript, ScriptedPage};

    #[test]
    fn test_default_budgets() {
        let strategy = DefaultWaitStrategy::default();
        assert_eq!(strategy.domready_timeout, Duration::from_secs(30));
        assert_eq!(strategy.idle_timeout, Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_tier_waits_for_quiet_network() {
        let page = ScriptedPage::loaded(
            "https://shop.test/",
            PageScript::new("Shop").network_idle_after(Duration::from_millis(700)),
        );
        let strategy = DefaultWaitStrategy::default();

        let start = Instant::now();
        strategy.wait(&page, WaitTier::Idle).await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_tier_times_out() {
        let page = ScriptedPage::loaded(
            "https://shop.test/",
            PageScript::new("Shop").network_idle_after(Duration::from_secs(5)),
        );
        let strategy =
            DefaultWaitStrategy::new(Duration::from_secs(1), Duration::from_millis(500));

        let err = strategy.wait(&page, WaitTier::Idle).await.unwrap_err();
        match err {
            WaitError::Timeout { description, .. } => assert_eq!(description, "networkidle"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_none_tier_returns_immediately() {
        let page = ScriptedPage::new();
        tokio_test::assert_ok!(DefaultWaitStrategy::default().wait(&page, WaitTier::None).await);
    }
}
