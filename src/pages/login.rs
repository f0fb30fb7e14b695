use action_primitives::UrlMatch;
use tracing::info;

use crate::data::{LoginCredentials, SignupCredentials};
use crate::errors::{SuiteError, SuiteResult};
use crate::pages::BasePage;

const LOGIN_TITLE: &str = "Automation Exercise - Signup / Login";
const SIGNUP_FORM: &str = ".signup-form";

const SIGNUP_NAME: (&str, &[&str]) = (
    "input[data-qa=\"signup-name\"]",
    &[".signup-form input[name=\"name\"]", "input[placeholder=\"Name\"]"],
);
const SIGNUP_EMAIL: (&str, &[&str]) = (
    "input[data-qa=\"signup-email\"]",
    &[".signup-form input[name=\"email\"]"],
);
const SIGNUP_BUTTON: (&str, &[&str]) = (
    "button[data-qa=\"signup-button\"]",
    &[".signup-form button[type=\"submit\"]"],
);
const LOGIN_EMAIL: (&str, &[&str]) = (
    "input[data-qa=\"login-email\"]",
    &[".login-form input[name=\"email\"]"],
);
const LOGIN_PASSWORD: (&str, &[&str]) = (
    "input[data-qa=\"login-password\"]",
    &[".login-form input[name=\"password\"]"],
);
const LOGIN_BUTTON: (&str, &[&str]) = (
    "button[data-qa=\"login-button\"]",
    &[".login-form button[type=\"submit\"]"],
);

/// "Signup / Login" page; every field goes through the fallback chain
#[derive(Clone)]
pub struct LoginPage {
    base: BasePage,
}

impl LoginPage {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub async fn open(&self) -> SuiteResult<()> {
        self.base.navigate("/login").await
    }

    pub async fn signup(&self, credentials: &SignupCredentials) -> SuiteResult<()> {
        self.fill_field(SIGNUP_NAME, &credentials.name).await?;
        self.fill_field(SIGNUP_EMAIL, &credentials.email).await?;
        self.press_button(SIGNUP_BUTTON).await?;
        info!(email = %credentials.email, "submitted signup form");
        Ok(())
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> SuiteResult<()> {
        self.fill_field(LOGIN_EMAIL, &credentials.email).await?;
        self.fill_field(LOGIN_PASSWORD, &credentials.password).await?;
        self.press_button(LOGIN_BUTTON).await?;
        info!(email = %credentials.email, "submitted login form");
        Ok(())
    }

    /// Title check, case-insensitive
    pub async fn assert_on_login_page(&self) -> SuiteResult<()> {
        let title = self.base.title().await?;
        if title.to_lowercase().contains(&LOGIN_TITLE.to_lowercase()) {
            Ok(())
        } else {
            Err(SuiteError::assertion(format!(
                "expected title containing {:?}, got {:?}",
                LOGIN_TITLE, title
            )))
        }
    }

    pub async fn assert_signup_form_visible(&self) -> SuiteResult<()> {
        self.base.wait_for_element(SIGNUP_FORM, None).await?;
        for (primary, fallbacks) in [SIGNUP_NAME, SIGNUP_EMAIL, SIGNUP_BUTTON] {
            self.base.resolve(primary, fallbacks).await?;
        }
        Ok(())
    }

    /// The account details page lives under `/signup`
    pub async fn wait_for_signup_details(&self) -> SuiteResult<()> {
        self.base
            .wait_for_url(&UrlMatch::Contains("signup".to_string()), None)
            .await
    }

    async fn fill_field(&self, field: (&str, &[&str]), value: &str) -> SuiteResult<()> {
        let handle = self.base.resolve(field.0, field.1).await?;
        self.base.driver().fill(&handle, value).await?;
        Ok(())
    }

    async fn press_button(&self, button: (&str, &[&str])) -> SuiteResult<()> {
        let handle = self.base.resolve(button.0, button.1).await?;
        self.base.click_handle(&handle).await
    }
}
