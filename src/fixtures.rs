//! Page-object fixtures handed to each test
//!
//! All page objects built by one [`PageFixtures`] share one driver, one
//! resolver and one waiter.

use std::sync::Arc;

use page_driver::PageDriver;
use storefront_core_types::{DiagnosticsSink, TracingSink};

use crate::config::SuiteConfig;
use crate::pages::{
    AccountInfoPage, BasePage, FooterComponent, HeaderComponent, HomePage, LoginPage,
    ProductsPage,
};

#[derive(Clone)]
pub struct PageFixtures {
    pub home_page: HomePage,
    pub login_page: LoginPage,
    pub account_info_page: AccountInfoPage,
    pub products_page: ProductsPage,
    pub header: HeaderComponent,
    pub footer: FooterComponent,
    base: BasePage,
}

impl PageFixtures {
    pub fn new(driver: Arc<dyn PageDriver>, config: SuiteConfig) -> Self {
        Self::with_sink(driver, config, Arc::new(TracingSink))
    }

    /// Fixtures whose diagnostics go to `sink`
    pub fn with_sink(
        driver: Arc<dyn PageDriver>,
        config: SuiteConfig,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let base = BasePage::with_sink(driver, Arc::new(config), sink);
        Self {
            home_page: HomePage::new(base.clone()),
            login_page: LoginPage::new(base.clone()),
            account_info_page: AccountInfoPage::new(base.clone()),
            products_page: ProductsPage::new(base.clone()),
            header: HeaderComponent::new(base.clone()),
            footer: FooterComponent::new(base.clone()),
            base,
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use page_driver::{PageScript, ScriptedPage};
    use std::time::Duration;

    #[tokio::test]
    async fn test_fixtures_share_one_driver() {
        let page = Arc::new(ScriptedPage::loaded(
            "https://automationexercise.com/",
            PageScript::new("Automation Exercise"),
        ));
        let config = SuiteConfig::for_environment(Environment::Prod).unwrap();
        let fixtures = PageFixtures::new(page.clone(), config);

        assert_eq!(
            fixtures.products_page.base().title().await.unwrap(),
            "Automation Exercise"
        );
        assert!(Arc::ptr_eq(
            fixtures.login_page.base().driver(),
            fixtures.home_page.base().driver()
        ));
        assert_eq!(
            fixtures.base().waiter().defaults().timeout,
            Duration::from_millis(10_000)
        );
    }
}
