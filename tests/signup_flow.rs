use std::sync::Arc;
use std::time::Duration;

use page_driver::Interaction;
use storefront_core_types::SelectBy;
use storefront_e2e::data::{SignupCredentials, TestDataGenerator, UserBuilder};
use storefront_e2e::{
    ElementScript, Environment, PageFixtures, PageScript, RecordingSink, ScriptedPage,
    SuiteConfig, SuiteError, WaitError,
};

const ROOT: &str = "https://automationexercise.com/";
const LOGIN: &str = "https://automationexercise.com/login";
const SIGNUP: &str = "https://automationexercise.com/signup";
const CREATED: &str = "https://automationexercise.com/account_created";

fn login_page() -> PageScript {
    PageScript::new("Automation Exercise - Signup / Login")
        .element(".signup-form", ElementScript::visible())
        .element("input[data-qa=\"signup-name\"]", ElementScript::visible())
        .element("input[data-qa=\"signup-email\"]", ElementScript::visible())
        .element(
            "button[data-qa=\"signup-button\"]",
            ElementScript::visible().navigates_to(SIGNUP),
        )
}

fn account_form() -> PageScript {
    let mut script = PageScript::new("Automation Exercise - Signup");
    for selector in [
        "input[name=\"title\"][value=\"Mr\"]",
        "#password",
        "#days",
        "#months",
        "#years",
        "#newsletter",
        "#optin",
        "#first_name",
        "#last_name",
        "#company",
        "#address1",
        "#country",
        "#state",
        "#city",
        "#zipcode",
        "#mobile_number",
    ] {
        script = script.element(selector, ElementScript::visible());
    }
    script.element(
        "button[data-qa=\"create-account\"]",
        ElementScript::visible()
            .disabled_until(Duration::from_millis(300))
            .navigates_to(CREATED),
    )
}

fn account_created(heading: ElementScript) -> PageScript {
    PageScript::new("Automation Exercise - Account Created")
        .element("h2[data-qa=\"account-created\"]", heading)
        .element(
            "a[data-qa=\"continue-button\"]",
            ElementScript::visible().navigates_to(ROOT),
        )
}

fn home_logged_in(name: &str) -> PageScript {
    PageScript::new("Automation Exercise")
        .element("#slider-carousel", ElementScript::visible())
        .element(
            "h2.title.text-center",
            ElementScript::visible().text("Features Items"),
        )
        .element(
            ".shop-menu .nav",
            ElementScript::visible().text(format!("Home Products Cart Logout Logged in as {name}")),
        )
        .element(
            ".shop-menu .nav > li:last-child",
            ElementScript::visible().text(format!(" Logged in as {name}")),
        )
}

fn storefront(created_heading: ElementScript) -> (PageFixtures, Arc<ScriptedPage>, Arc<RecordingSink>) {
    let page = Arc::new(ScriptedPage::new());
    page.route(LOGIN, login_page());
    page.route(SIGNUP, account_form());
    page.route(CREATED, account_created(created_heading));
    page.route(ROOT, home_logged_in("Sangam"));

    let sink = Arc::new(RecordingSink::new());
    let config = SuiteConfig::for_environment(Environment::Prod).unwrap();
    let fixtures = PageFixtures::with_sink(page.clone(), config, sink.clone());
    (fixtures, page, sink)
}

#[tokio::test(start_paused = true)]
async fn test_signup_form_is_displayed() {
    let (fixtures, _page, sink) = storefront(ElementScript::visible());

    fixtures.login_page.open().await.unwrap();
    fixtures.login_page.assert_on_login_page().await.unwrap();
    fixtures.login_page.assert_signup_form_visible().await.unwrap();

    assert!(sink.fallbacks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_signup_creates_account_and_returns_home() {
    let (fixtures, page, sink) = storefront(
        ElementScript::visible()
            .text("")
            .text_after(Duration::from_millis(400), "Account Created!"),
    );
    let email = TestDataGenerator::email();
    let account = UserBuilder::new()
        .with_name("Sangam", "Kumar")
        .with_dob("10", "5", "1990")
        .with_newsletter(true)
        .with_address("123 Main St", "New Delhi", "Delhi", "110001")
        .build();

    fixtures.login_page.open().await.unwrap();
    fixtures
        .login_page
        .signup(&SignupCredentials {
            name: "Sangam".to_string(),
            email: email.clone(),
        })
        .await
        .unwrap();
    fixtures.login_page.wait_for_signup_details().await.unwrap();

    fixtures
        .account_info_page
        .fill_account_form(&account)
        .await
        .unwrap();
    fixtures
        .account_info_page
        .assert_account_created()
        .await
        .unwrap();
    fixtures.account_info_page.continue_to_home().await.unwrap();

    fixtures.home_page.verify_home_page_loaded().await.unwrap();
    fixtures.header.expect_username_to_be("Sangam").await.unwrap();
    assert_eq!(fixtures.header.logged_in_username().await.unwrap(), "Sangam");

    assert_eq!(page.filled("input[data-qa=\"signup-email\"]"), vec![email]);
    assert_eq!(page.filled("#first_name"), vec!["Sangam".to_string()]);
    let interactions = page.interactions();
    assert!(interactions.contains(&Interaction::Select(
        "#country".to_string(),
        SelectBy::Label("India".to_string())
    )));
    assert!(interactions.contains(&Interaction::Select(
        "#days".to_string(),
        SelectBy::Value("10".to_string())
    )));
    assert!(interactions.contains(&Interaction::Check("#newsletter".to_string(), true)));
    assert!(interactions.contains(&Interaction::Check("#optin".to_string(), false)));
    assert!(interactions.contains(&Interaction::Click(
        "button[data-qa=\"create-account\"]".to_string()
    )));
    assert!(sink.records().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_missing_confirmation_fails_with_timeout() {
    let (fixtures, _page, _sink) = storefront(ElementScript::visible().text("Account"));

    fixtures.login_page.open().await.unwrap();
    fixtures
        .login_page
        .signup(&SignupCredentials {
            name: "Sangam".to_string(),
            email: "sangam@example.com".to_string(),
        })
        .await
        .unwrap();
    fixtures
        .account_info_page
        .fill_account_form(&UserBuilder::new().build())
        .await
        .unwrap();

    let err = fixtures
        .account_info_page
        .assert_account_created()
        .await
        .unwrap_err();
    assert!(matches!(err, SuiteError::Wait(WaitError::Timeout { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_wrong_page_title_is_an_assertion_failure() {
    let (fixtures, page, _sink) = storefront(ElementScript::visible());
    page.route(LOGIN, PageScript::new("Automation Exercise"));

    fixtures.login_page.open().await.unwrap();
    let err = fixtures.login_page.assert_on_login_page().await.unwrap_err();
    assert!(matches!(err, SuiteError::Assertion(_)));
}
