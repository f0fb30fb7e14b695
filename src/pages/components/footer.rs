use tracing::info;

use crate::errors::SuiteResult;
use crate::pages::BasePage;

/// The site's own id carries the "susbscribe" typo
const SUBSCRIBE_EMAIL: &str = "#susbscribe_email";
const SUBSCRIBE_EMAIL_FALLBACKS: &[&str] = &[
    "#subscribe_email",
    "footer input[type=\"email\"]",
    "input[placeholder=\"Your email address\"]",
];
const SUBSCRIBE_BUTTON: &str = "#subscribe";
const SUCCESS_MESSAGE: &str = "#success-subscribe .alert-success";
const COPYRIGHT: &str = ".footer-bottom p";

#[derive(Clone)]
pub struct FooterComponent {
    base: BasePage,
}

impl FooterComponent {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    /// Fill the subscription field, falling back to alternate locators if
    /// the primary id no longer resolves, and submit
    pub async fn subscribe_with_email(&self, email: &str) -> SuiteResult<()> {
        let field = self
            .base
            .resolve(SUBSCRIBE_EMAIL, SUBSCRIBE_EMAIL_FALLBACKS)
            .await?;
        self.base.driver().fill(&field, email).await?;
        self.base.click(SUBSCRIBE_BUTTON).await?;
        info!("submitted newsletter subscription");
        Ok(())
    }

    pub async fn is_success_message_visible(&self) -> SuiteResult<bool> {
        self.base.is_element_visible(SUCCESS_MESSAGE).await
    }

    /// Copyright line; empty when the footer has none
    pub async fn copyright_text(&self) -> SuiteResult<String> {
        let handle = self.base.locate(COPYRIGHT);
        match self.base.driver().text_content(&handle).await {
            Ok(text) => Ok(text.unwrap_or_default()),
            Err(err) if err.is_not_attached() => Ok(String::new()),
            Err(err) => Err(err.into()),
        }
    }
}
