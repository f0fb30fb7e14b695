//! Page objects for the storefront

mod account_info;
mod base;
pub mod components;
mod home;
mod login;
mod products;

pub use account_info::AccountInfoPage;
pub use base::BasePage;
pub use components::{FooterComponent, HeaderComponent};
pub use home::HomePage;
pub use login::LoginPage;
pub use products::ProductsPage;
