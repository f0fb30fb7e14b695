use serde::{Deserialize, Serialize};

/// Account form contents for the signup details page.
///
/// Field names follow `data/users.json` (camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// `Mr` or `Mrs`; matched against the title radio's value
    pub title: String,
    pub password: String,
    pub days: String,
    pub months: String,
    pub years: String,
    #[serde(default)]
    pub newsletter: bool,
    #[serde(default)]
    pub optin: bool,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// Country option label
    pub country: String,
    pub state: String,
    pub city: String,
    pub zipcode: String,
    pub mobile_number: String,
}

/// Name and email for the "New User Signup!" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupCredentials {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
