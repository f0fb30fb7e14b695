//! Random test data within the ranges the storefront accepts

use rand::seq::SliceRandom;
use rand::Rng;

use super::account::AccountInfo;

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Maya", "Liam", "Priya", "Noah", "Elena", "Ravi", "Sofia", "Omar", "Grace",
];
const LAST_NAMES: &[&str] = &[
    "Sharma", "Nguyen", "Patel", "Garcia", "Okafor", "Kowalski", "Silva", "Chen", "Ahmed", "Brown",
];
const COMPANIES: &[&str] = &["Acme Labs", "Northwind", "Globex", "Initech", "Umbrella Retail"];
const STREETS: &[&str] = &["Park Street", "Lake Road", "Hill View", "Market Lane", "Station Road"];
const STATES: &[&str] = &["Delhi", "Karnataka", "Maharashtra", "Kerala", "Punjab"];
const CITIES: &[&str] = &["New Delhi", "Bengaluru", "Mumbai", "Kochi", "Amritsar"];
const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "test.dev"];

/// Product names known to exist in the catalogue
pub const PRODUCT_SEARCH_TERMS: &[&str] = &[
    "Men Tshirt",
    "Blue Top",
    "Dress",
    "Jeans",
    "Saree",
    "Tops",
    "Winter Top",
    "Summer White Top",
];

pub struct TestDataGenerator;

impl TestDataGenerator {
    pub fn email() -> String {
        Self::email_with(&mut rand::thread_rng())
    }

    pub fn user() -> AccountInfo {
        Self::user_with(&mut rand::thread_rng())
    }

    pub fn product_search_term() -> &'static str {
        Self::product_search_term_with(&mut rand::thread_rng())
    }

    /// Lowercase address under a reserved domain
    pub fn email_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        let first = pick(rng, FIRST_NAMES);
        let last = pick(rng, LAST_NAMES);
        let suffix: u32 = rng.gen_range(1000..100_000);
        format!(
            "{}.{}{}@{}",
            first,
            last,
            suffix,
            pick(rng, EMAIL_DOMAINS)
        )
        .to_lowercase()
    }

    pub fn user_with<R: Rng + ?Sized>(rng: &mut R) -> AccountInfo {
        let password_tail: String = (0..5)
            .map(|_| char::from(b'a' + rng.gen_range(0..26u8)))
            .collect();

        AccountInfo {
            title: pick(rng, &["Mr", "Mrs"]).to_string(),
            password: format!("Test@{}", password_tail),
            days: rng.gen_range(1..=28u32).to_string(),
            months: rng.gen_range(1..=12u32).to_string(),
            years: rng.gen_range(1950..=2005u32).to_string(),
            newsletter: rng.gen_bool(0.5),
            optin: rng.gen_bool(0.5),
            first_name: pick(rng, FIRST_NAMES).to_string(),
            last_name: pick(rng, LAST_NAMES).to_string(),
            company: pick(rng, COMPANIES).to_string(),
            address1: format!("{} {}", rng.gen_range(1..=999u32), pick(rng, STREETS)),
            address2: None,
            country: "India".to_string(),
            state: pick(rng, STATES).to_string(),
            city: pick(rng, CITIES).to_string(),
            zipcode: format!("{:05}", rng.gen_range(10_000..100_000u32)),
            mobile_number: format!("9{:09}", rng.gen_range(0..1_000_000_000u64)),
        }
    }

    pub fn product_search_term_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
        pick(rng, PRODUCT_SEARCH_TERMS)
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &'static [&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}
