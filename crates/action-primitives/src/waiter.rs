//! Bounded polling waits
//!
//! Every wait follows the same loop: evaluate, return on success, give up
//! once the elapsed time since loop entry reaches the timeout, otherwise
//! sleep one poll interval and evaluate again.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use page_driver::PageDriver;
use storefront_core_types::{
    Diagnostic, DiagnosticsSink, DriverError, ElementHandle, ElementSnapshot, LoadState,
    TracingSink,
};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::errors::WaitError;
use crate::types::{UrlMatch, WaitCondition, WaitOptions};

pub struct Waiter {
    driver: Arc<dyn PageDriver>,
    sink: Arc<dyn DiagnosticsSink>,
    defaults: WaitOptions,
}

impl Waiter {
    pub fn new(
        driver: Arc<dyn PageDriver>,
        sink: Arc<dyn DiagnosticsSink>,
        defaults: WaitOptions,
    ) -> Self {
        Self {
            driver,
            sink,
            defaults,
        }
    }

    /// Waiter with default bounds reporting through `tracing`
    pub fn with_tracing(driver: Arc<dyn PageDriver>) -> Self {
        Self::new(driver, Arc::new(TracingSink), WaitOptions::default())
    }

    pub fn defaults(&self) -> WaitOptions {
        self.defaults
    }

    /// Poll `predicate` until it yields `true` or the timeout is reached.
    ///
    /// `DriverError::NotAttached` from the predicate counts as "not yet";
    /// any other driver error ends the wait immediately.
    pub async fn wait_for_condition<F, Fut>(
        &self,
        description: &str,
        mut predicate: F,
        options: Option<WaitOptions>,
    ) -> Result<(), WaitError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<bool, DriverError>> + Send,
    {
        let options = options.unwrap_or(self.defaults);
        let interval = options.effective_interval();
        let start = Instant::now();
        let mut polls = 0u32;

        loop {
            polls += 1;
            match predicate().await {
                Ok(true) => {
                    debug!(
                        condition = description,
                        polls,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "wait condition met"
                    );
                    return Ok(());
                }
                Ok(false) => {}
                Err(err) if err.is_not_attached() => {}
                Err(err) => {
                    debug!(condition = description, "wait aborted by driver: {}", err);
                    return Err(WaitError::Driver(err));
                }
            }

            let elapsed = start.elapsed();
            if elapsed >= options.timeout {
                self.sink.emit(Diagnostic::WaitTimedOut {
                    description: description.to_string(),
                    elapsed_ms: elapsed.as_millis() as u64,
                });
                return Err(WaitError::Timeout {
                    description: description.to_string(),
                    timeout: options.timeout,
                    elapsed,
                });
            }

            sleep(interval).await;
        }
    }

    /// Attached and visible; a missing element keeps the wait going
    pub async fn wait_for_visible(
        &self,
        handle: &ElementHandle,
        options: Option<WaitOptions>,
    ) -> Result<(), WaitError> {
        self.wait(handle, &WaitCondition::Visible, options).await
    }

    /// Attached, rendered and enabled, read from one snapshot per poll
    pub async fn wait_for_clickable(
        &self,
        handle: &ElementHandle,
        options: Option<WaitOptions>,
    ) -> Result<(), WaitError> {
        self.wait(handle, &WaitCondition::Clickable, options).await
    }

    /// Text content contains `text`; empty text never matches
    pub async fn wait_for_text(
        &self,
        handle: &ElementHandle,
        text: &str,
        options: Option<WaitOptions>,
    ) -> Result<(), WaitError> {
        self.wait(
            handle,
            &WaitCondition::TextContains(text.to_string()),
            options,
        )
        .await
    }

    pub async fn wait_for_hidden(
        &self,
        handle: &ElementHandle,
        options: Option<WaitOptions>,
    ) -> Result<(), WaitError> {
        self.wait(handle, &WaitCondition::Hidden, options).await
    }

    /// Evaluate an element condition against a fresh snapshot each poll.
    ///
    /// Clickable and text waits whose element never attached during the
    /// whole window fail with `ElementNotFound` instead of `Timeout`.
    pub async fn wait(
        &self,
        handle: &ElementHandle,
        condition: &WaitCondition,
        options: Option<WaitOptions>,
    ) -> Result<(), WaitError> {
        let description = format!("{} {}", handle, condition.describe());
        let driver = &*self.driver;
        let attached = AtomicBool::new(false);
        let seen = &attached;

        let result = self
            .wait_for_condition(
                &description,
                move || async move {
                    let snapshot = driver.snapshot(handle).await?;
                    if snapshot.is_some() {
                        seen.store(true, Ordering::Relaxed);
                    }
                    Ok::<bool, DriverError>(satisfies(condition, snapshot.as_ref()))
                },
                options,
            )
            .await;

        match result {
            Err(WaitError::Timeout { timeout, .. })
                if requires_attachment(condition) && !attached.load(Ordering::Relaxed) =>
            {
                Err(WaitError::ElementNotFound {
                    locator: handle.locator().clone(),
                    timeout,
                })
            }
            other => other,
        }
    }

    /// Poll the page URL until it matches `pattern`
    pub async fn wait_for_url(
        &self,
        pattern: &UrlMatch,
        options: Option<WaitOptions>,
    ) -> Result<(), WaitError> {
        let driver = &*self.driver;
        self.wait_for_condition(
            &pattern.describe(),
            move || async move { Ok::<bool, DriverError>(pattern.matches(&driver.url().await?)) },
            options,
        )
        .await
    }

    /// Delegate to the driver's network-idle load state
    pub async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), WaitError> {
        let start = Instant::now();
        match self
            .driver
            .wait_for_load_state(LoadState::NetworkIdle, timeout)
            .await
        {
            Ok(()) => Ok(()),
            Err(err) if err.is_timeout() => {
                let elapsed = start.elapsed();
                self.sink.emit(Diagnostic::WaitTimedOut {
                    description: "network idle".to_string(),
                    elapsed_ms: elapsed.as_millis() as u64,
                });
                Err(WaitError::Timeout {
                    description: "network idle".to_string(),
                    timeout,
                    elapsed,
                })
            }
            Err(err) => Err(WaitError::Driver(err)),
        }
    }
}

fn satisfies(condition: &WaitCondition, snapshot: Option<&ElementSnapshot>) -> bool {
    match (condition, snapshot) {
        (WaitCondition::Hidden, None) => true,
        (WaitCondition::Hidden, Some(snap)) => !snap.visible,
        (_, None) => false,
        (WaitCondition::Visible, Some(snap)) => snap.visible,
        (WaitCondition::Clickable, Some(snap)) => snap.is_clickable(),
        (WaitCondition::TextContains(text), Some(snap)) => snap.contains_text(text),
    }
}

fn requires_attachment(condition: &WaitCondition) -> bool {
    matches!(
        condition,
        WaitCondition::Clickable | WaitCondition::TextContains(_)
    )
}
