use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::account::AccountInfo;
use crate::errors::{SuiteError, SuiteResult};

pub const DEFAULT_USERS_FILE: &str = "data/users.json";

/// Named account fixtures read from a JSON object of `key -> AccountInfo`
#[derive(Debug, Clone, Default)]
pub struct TestUsers {
    users: BTreeMap<String, AccountInfo>,
}

impl TestUsers {
    pub fn load(path: impl AsRef<Path>) -> SuiteResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SuiteError::Data(format!(
                "File not found: {}",
                path.display()
            )));
        }
        debug!(path = %path.display(), "reading test users");
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn load_default() -> SuiteResult<Self> {
        Self::load(DEFAULT_USERS_FILE)
    }

    pub fn from_json(content: &str) -> SuiteResult<Self> {
        let users: BTreeMap<String, AccountInfo> = serde_json::from_str(content)?;
        Ok(Self { users })
    }

    pub fn get(&self, key: &str) -> SuiteResult<&AccountInfo> {
        self.users
            .get(key)
            .ok_or_else(|| SuiteError::UnknownUser(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
