use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    storefront_e2e::cli::app::run().await
}
