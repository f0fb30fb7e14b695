use anyhow::Result;
use clap::Args;

use crate::config::SuiteConfig;

#[derive(Args, Clone, Debug)]
pub struct ProbeArgs {
    /// Page to open, relative to the base URL
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Primary locator
    #[arg(long)]
    pub primary: String,

    /// Fallback locators, tried in the order given
    #[arg(long = "fallback")]
    pub fallbacks: Vec<String>,
}

#[cfg(feature = "chromium")]
pub async fn cmd_probe(args: ProbeArgs, config: &SuiteConfig) -> Result<()> {
    use std::sync::Arc;

    use action_locator::{ElementResolver, FallbackResolver};
    use anyhow::Context;
    use page_driver::{ChromiumSession, ChromiumSettings};
    use storefront_core_types::CandidateList;
    use tracing::info;

    use crate::pages::BasePage;

    let settings = ChromiumSettings {
        headless: config.browser.headless,
        executable: config.browser.chromium_path.clone(),
        request_timeout: config.timeouts.navigation(),
        ..ChromiumSettings::default()
    };
    let session = ChromiumSession::launch(&settings)
        .await
        .context("failed to launch Chromium")?;
    let page = Arc::new(session.new_page().await?);

    let base = BasePage::new(page.clone(), Arc::new(config.clone()));
    base.navigate(&args.path).await?;
    info!(url = %base.current_url().await?, "page ready");

    let candidates = CandidateList::new(args.primary.as_str(), args.fallbacks.iter());
    let resolver = FallbackResolver::with_tracing(page);
    let outcome = resolver
        .resolve(&candidates, config.timeouts.locator())
        .await;

    session.close().await?;

    let resolution = outcome?;
    if resolution.healed() {
        println!(
            "resolved by fallback #{}: {}",
            resolution.candidate_index, resolution.locator
        );
    } else {
        println!("resolved by primary: {}", resolution.locator);
    }
    Ok(())
}

#[cfg(not(feature = "chromium"))]
pub async fn cmd_probe(args: ProbeArgs, _config: &SuiteConfig) -> Result<()> {
    anyhow::bail!(
        "probe for {:?} needs a browser; rebuild with `--features chromium`",
        args.primary
    )
}
