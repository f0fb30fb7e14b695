use action_primitives::UrlMatch;
use storefront_core_types::SelectBy;
use tracing::info;

use crate::data::AccountInfo;
use crate::errors::SuiteResult;
use crate::pages::BasePage;

const PASSWORD: &str = "#password";
const DAYS: &str = "#days";
const MONTHS: &str = "#months";
const YEARS: &str = "#years";
const NEWSLETTER: &str = "#newsletter";
const OPTIN: &str = "#optin";
const FIRST_NAME: &str = "#first_name";
const LAST_NAME: &str = "#last_name";
const COMPANY: &str = "#company";
const ADDRESS1: &str = "#address1";
const ADDRESS2: &str = "#address2";
const COUNTRY: &str = "#country";
const STATE: &str = "#state";
const CITY: &str = "#city";
const ZIPCODE: &str = "#zipcode";
const MOBILE: &str = "#mobile_number";
const CREATE_ACCOUNT: &str = "button[data-qa=\"create-account\"]";
const ACCOUNT_CREATED: &str = "h2[data-qa=\"account-created\"]";
const CONTINUE: &str = "a[data-qa=\"continue-button\"]";

/// "Enter Account Information" page reached after signup
#[derive(Clone)]
pub struct AccountInfoPage {
    base: BasePage,
}

impl AccountInfoPage {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Fill every field and press "Create Account"
    pub async fn fill_account_form(&self, data: &AccountInfo) -> SuiteResult<()> {
        self.base.set_checked(&title_radio(&data.title), true).await?;
        self.base.fill(PASSWORD, &data.password).await?;
        self.base
            .select_option(DAYS, SelectBy::Value(data.days.clone()))
            .await?;
        self.base
            .select_option(MONTHS, SelectBy::Value(data.months.clone()))
            .await?;
        self.base
            .select_option(YEARS, SelectBy::Value(data.years.clone()))
            .await?;
        self.base.set_checked(NEWSLETTER, data.newsletter).await?;
        self.base.set_checked(OPTIN, data.optin).await?;

        self.base.fill(FIRST_NAME, &data.first_name).await?;
        self.base.fill(LAST_NAME, &data.last_name).await?;
        if !data.company.is_empty() {
            self.base.fill(COMPANY, &data.company).await?;
        }

        self.base.fill(ADDRESS1, &data.address1).await?;
        if let Some(address2) = &data.address2 {
            self.base.fill(ADDRESS2, address2).await?;
        }
        self.base
            .select_option(COUNTRY, SelectBy::Label(data.country.clone()))
            .await?;
        self.base.fill(STATE, &data.state).await?;
        self.base.fill(CITY, &data.city).await?;
        self.base.fill(ZIPCODE, &data.zipcode).await?;
        self.base.fill(MOBILE, &data.mobile_number).await?;

        self.base.click(CREATE_ACCOUNT).await?;
        info!(first_name = %data.first_name, "submitted account form");
        Ok(())
    }

    pub async fn assert_account_created(&self) -> SuiteResult<()> {
        self.base.expect_text(ACCOUNT_CREATED, "Account Created!").await?;
        let expected = self.base.config().url_for("/account_created")?;
        self.base
            .wait_for_url(&UrlMatch::Exact(expected.to_string()), None)
            .await
    }

    pub async fn continue_to_home(&self) -> SuiteResult<()> {
        self.base.click(CONTINUE).await?;
        let home = self.base.config().url_for("/")?;
        self.base
            .wait_for_url(&UrlMatch::Exact(home.to_string()), None)
            .await
    }
}

fn title_radio(title: &str) -> String {
    format!("input[name=\"title\"][value=\"{}\"]", title)
}
