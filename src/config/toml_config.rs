use crate::utils::error::{Result, TranslationError};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Overrides the configured service URL when set.
pub const URL_ENV_VAR: &str = "CQL_TRANSLATOR_URL";

/// Translation service settings loadable from a TOML file:
///
/// ```toml
/// url = "http://localhost:8080/cql/translator"
/// timeout_seconds = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
}

impl ServiceConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: ServiceConfig =
            toml::from_str(&content).map_err(|e| TranslationError::Config {
                message: format!("Failed to parse {}: {}", path.as_ref().display(), e),
            })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(URL_ENV_VAR) {
            tracing::debug!("Service URL overridden from {}", URL_ENV_VAR);
            self.url = url;
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)
    }
}
