use crate::errors::SuiteResult;
use crate::pages::BasePage;

const HOME_LINK: &str = "a[href=\"/\"]";
const PRODUCTS_LINK: &str = "a[href=\"/products\"]";
const CART_LINK: &str = "a[href=\"/view_cart\"]";
const TEST_CASES_LINK: &str = "a[href=\"/test_cases\"]";
const API_TESTING_LINK: &str = "a[href=\"/api_list\"]";
const CONTACT_US_LINK: &str = "a[href=\"/contact_us\"]";
const LOGOUT_LINK: &str = "a[href=\"/logout\"]";
const DELETE_ACCOUNT_LINK: &str = "a[href=\"/delete_account\"]";
const NAV: &str = ".shop-menu .nav";
const LOGGED_IN_ITEM: &str = ".shop-menu .nav > li:last-child";
const LOGGED_IN_PREFIX: &str = "Logged in as";

/// Top navigation bar shared by every page
#[derive(Clone)]
pub struct HeaderComponent {
    base: BasePage,
}

impl HeaderComponent {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    pub async fn go_to_home(&self) -> SuiteResult<()> {
        self.base.click(HOME_LINK).await
    }

    pub async fn go_to_products(&self) -> SuiteResult<()> {
        self.base.click(PRODUCTS_LINK).await
    }

    pub async fn go_to_cart(&self) -> SuiteResult<()> {
        self.base.click(CART_LINK).await
    }

    pub async fn go_to_test_cases(&self) -> SuiteResult<()> {
        self.base.click(TEST_CASES_LINK).await
    }

    pub async fn go_to_api_testing(&self) -> SuiteResult<()> {
        self.base.click(API_TESTING_LINK).await
    }

    pub async fn go_to_contact_us(&self) -> SuiteResult<()> {
        self.base.click(CONTACT_US_LINK).await
    }

    pub async fn logout(&self) -> SuiteResult<()> {
        self.base.click(LOGOUT_LINK).await
    }

    pub async fn delete_account(&self) -> SuiteResult<()> {
        self.base.click(DELETE_ACCOUNT_LINK).await
    }

    /// Name shown after "Logged in as"; empty when nobody is logged in
    pub async fn logged_in_username(&self) -> SuiteResult<String> {
        let handle = self.base.locate(LOGGED_IN_ITEM);
        let text = match self.base.driver().text_content(&handle).await {
            Ok(text) => text.unwrap_or_default(),
            Err(err) if err.is_not_attached() => String::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(parse_username(&text))
    }

    /// Wait until the nav bar greets `expected`
    pub async fn expect_username_to_be(&self, expected: &str) -> SuiteResult<()> {
        self.base
            .expect_text(NAV, &format!("{} {}", LOGGED_IN_PREFIX, expected))
            .await
    }
}

fn parse_username(text: &str) -> String {
    text.split_once(LOGGED_IN_PREFIX)
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_username() {
        assert_eq!(parse_username(" Logged in as sam"), "sam");
        assert_eq!(parse_username("Logged in as  Sangam Kumar \n"), "Sangam Kumar");
        assert_eq!(parse_username("Signup / Login"), "");
    }
}
