//! Suite configuration
//!
//! Resolution order, later wins:
//! 1. profile defaults for the selected environment
//! 2. the YAML file (`--config`, `config/suite.yaml`, or the user config dir)
//! 3. environment variables (`ENV`, `BASE_URL`, `API_URL`, `SUITE_HEADLESS`)

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use action_primitives::WaitOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Invalid URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Staging,
    #[default]
    Prod,
}

impl Environment {
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Environment::Dev => "http://localhost:3000",
            Environment::Staging => "https://staging.automationexercise.com",
            Environment::Prod => "https://automationexercise.com",
        }
    }

    fn default_api_url(&self) -> &'static str {
        match self {
            Environment::Dev => "http://localhost:3000/api",
            Environment::Staging => "https://staging.automationexercise.com/api",
            Environment::Prod => "https://automationexercise.com/api",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Timing budgets, all in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Per-candidate budget for fallback locators
    pub locator_ms: u64,
    pub wait_ms: u64,
    pub poll_ms: u64,
    pub network_idle_ms: u64,
    pub navigation_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            locator_ms: 1_000,
            wait_ms: 10_000,
            poll_ms: 200,
            network_idle_ms: 30_000,
            navigation_ms: 30_000,
        }
    }
}

impl Timeouts {
    pub fn locator(&self) -> Duration {
        Duration::from_millis(self.locator_ms)
    }

    pub fn network_idle(&self) -> Duration {
        Duration::from_millis(self.network_idle_ms)
    }

    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::new(
            Duration::from_millis(self.wait_ms),
            Duration::from_millis(self.poll_ms),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    pub chromium_path: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
        }
    }
}

/// On-disk shape; every field optional so a file can override a subset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub environment: Option<Environment>,
    pub base_url: Option<String>,
    pub api_url: Option<String>,
    pub timeouts: Timeouts,
    pub browser: BrowserSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub environment: Environment,
    pub base_url: Url,
    pub api_url: Url,
    pub timeouts: Timeouts,
    pub browser: BrowserSettings,
}

pub struct LoadedConfig {
    pub config: SuiteConfig,
    /// File consulted, whether or not it existed
    pub path: PathBuf,
}

impl SuiteConfig {
    /// Profile defaults only, no file and no environment lookups
    pub fn for_environment(environment: Environment) -> Result<Self, ConfigError> {
        let file = ConfigFile {
            environment: Some(environment),
            ..Default::default()
        };
        Self::resolve(file, |_| None)
    }

    /// Merge a config file and variable lookups over profile defaults
    pub fn resolve<F>(file: ConfigFile, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match var("ENV").filter(|v| !v.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => file.environment.unwrap_or_default(),
        };

        let base_url = var("BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| environment.default_base_url().to_string());
        let api_url = var("API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| environment.default_api_url().to_string());

        let mut browser = file.browser;
        if let Some(value) = var("SUITE_HEADLESS") {
            browser.headless = parse_bool("SUITE_HEADLESS", &value)?;
        }

        Ok(Self {
            environment,
            base_url: parse_url(&base_url)?,
            api_url: parse_url(&api_url)?,
            timeouts: file.timeouts,
            browser,
        })
    }

    /// Resolve against the process environment
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Locate, read and resolve the suite configuration
    pub async fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let path = config_file_path(explicit);

        let file = if path.exists() {
            let content = fs::read_to_string(&path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
            let file: ConfigFile =
                serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
            info!("Loaded configuration from: {}", path.display());
            file
        } else {
            warn!("Config file not found, using defaults: {}", path.display());
            ConfigFile::default()
        };

        let config = Self::from_file(file)?;
        debug!(
            environment = %config.environment,
            base_url = %config.base_url,
            "suite configuration resolved"
        );
        Ok(LoadedConfig { config, path })
    }

    /// Absolute URLs pass through; anything else is joined onto `base_url`
    pub fn url_for(&self, path: &str) -> Result<Url, ConfigError> {
        match Url::parse(path) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.base_url
                    .join(path)
                    .map_err(|source| ConfigError::InvalidUrl {
                        value: path.to_string(),
                        source,
                    })
            }
            Err(source) => Err(ConfigError::InvalidUrl {
                value: path.to_string(),
                source,
            }),
        }
    }
}

/// `--config`, then `config/suite.yaml`, then `<config dir>/storefront-e2e/suite.yaml`
pub fn config_file_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from("config/suite.yaml");
    if local.exists() {
        return local;
    }

    match dirs::config_dir() {
        Some(mut path) => {
            path.push("storefront-e2e");
            path.push("suite.yaml");
            path
        }
        None => local,
    }
}

fn parse_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
