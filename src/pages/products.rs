use tracing::debug;

use crate::errors::{SuiteError, SuiteResult};
use crate::pages::BasePage;

const PRODUCT_GRID: &str = ".features_items";
const SEARCH_INPUT: &str = "#search_product";
const SEARCH_BUTTON: &str = "#submit_search";
const SECTION_TITLE: &str = "h2.title.text-center";
const SEARCHED_TITLE: &str = "Searched Products";
const RESULT_NAMES: &str = ".single-products .productinfo p";

#[derive(Clone)]
pub struct ProductsPage {
    base: BasePage,
}

impl ProductsPage {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Open `/products` and wait for the default listing
    pub async fn visit(&self) -> SuiteResult<()> {
        self.base.navigate("/products").await?;
        self.base.wait_for_element(PRODUCT_GRID, None).await?;
        Ok(())
    }

    /// Search from the top bar and wait for the results heading
    pub async fn search_product(&self, query: &str) -> SuiteResult<()> {
        self.base.fill(SEARCH_INPUT, query).await?;
        self.base.click(SEARCH_BUTTON).await?;
        self.base.expect_text(SECTION_TITLE, SEARCHED_TITLE).await
    }

    /// Product names currently shown in the grid
    pub async fn get_search_results(&self) -> SuiteResult<Vec<String>> {
        self.base.get_all_text_contents(RESULT_NAMES).await
    }

    /// At least one result, and every result mentions `expected` (ignoring case)
    pub async fn assert_search_results_contain(&self, expected: &str) -> SuiteResult<()> {
        let results = self.get_search_results().await?;
        debug!(count = results.len(), "search results");
        if results.is_empty() {
            return Err(SuiteError::assertion("search returned no products"));
        }

        let needle = expected.to_lowercase();
        match results
            .iter()
            .find(|name| !name.to_lowercase().contains(&needle))
        {
            Some(name) => Err(SuiteError::assertion(format!(
                "product {:?} does not match search term {:?}",
                name, expected
            ))),
            None => Ok(()),
        }
    }
}
