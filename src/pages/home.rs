use crate::errors::SuiteResult;
use crate::pages::components::{FooterComponent, HeaderComponent};
use crate::pages::BasePage;

const SLIDER: &str = "#slider-carousel";
const SECTION_TITLE: &str = "h2.title.text-center";
const FEATURES_TITLE: &str = "Features Items";

#[derive(Clone)]
pub struct HomePage {
    base: BasePage,
    pub header: HeaderComponent,
    pub footer: FooterComponent,
}

impl HomePage {
    pub fn new(base: BasePage) -> Self {
        Self {
            header: HeaderComponent::new(base.clone()),
            footer: FooterComponent::new(base.clone()),
            base,
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Open the storefront root and wait for the main slider
    pub async fn visit(&self) -> SuiteResult<()> {
        self.base.navigate("/").await?;
        self.base.wait_for_element(SLIDER, None).await?;
        Ok(())
    }

    pub async fn verify_home_page_loaded(&self) -> SuiteResult<()> {
        self.base.expect_text(SECTION_TITLE, FEATURES_TITLE).await
    }

    pub async fn goto(&self, path: &str) -> SuiteResult<()> {
        self.base.navigate(path).await
    }
}
