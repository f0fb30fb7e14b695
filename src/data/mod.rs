//! Test data: account model, builder, random generator and JSON fixtures

pub mod account;
pub mod builder;
pub mod generator;
pub mod loader;

pub use account::{AccountInfo, LoginCredentials, SignupCredentials};
pub use builder::UserBuilder;
pub use generator::{TestDataGenerator, PRODUCT_SEARCH_TERMS};
pub use loader::{TestUsers, DEFAULT_USERS_FILE};
