use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use validator::Validate;

use crate::error::BomResult;

pub const DEFAULT_BASE_URL: &str = "https://sandbox.api.sap.com/s4hanacloud/sap/opu/odata/sap/";
pub const DEFAULT_INPUT_PATH: &str = "./Inputs/SDC_Bill_Of_Material_Product_Description_sample.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate]
    pub sap: SapApiConfig,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SapApiConfig {
    #[validate(url(message = "base_url must be an absolute URL"))]
    pub base_url: String,
    /// Sent as the `APIKey` header (SAP API Business Hub sandbox).
    pub api_key: Option<String>,
    /// Sent as the `sap-client` header.
    pub client_number: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Request timeout. Unset means requests wait for the response indefinitely.
    #[validate(range(min = 1, message = "timeout_seconds must be at least 1"))]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("SAPBOM").separator("__"));

        config.build()?.try_deserialize()
    }

    /// Loads and validates in one step.
    pub fn load_validated() -> BomResult<Self> {
        let config = Self::load()?;
        config.validate_settings()?;
        Ok(config)
    }

    pub fn validate_settings(&self) -> BomResult<()> {
        self.validate()?;
        Ok(())
    }
}

impl SapApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for SapApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            client_number: None,
            username: None,
            password: None,
            timeout_seconds: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file_path: DEFAULT_INPUT_PATH.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
            file_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate_settings().is_ok());
        assert_eq!(config.sap.timeout(), None);
        assert_eq!(config.input.file_path, DEFAULT_INPUT_PATH);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut config = AppConfig::default();
        config.sap.base_url = "not a url".to_string();
        let err = config.validate_settings().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = AppConfig::default();
        config.sap.timeout_seconds = Some(0);
        assert!(config.validate_settings().is_err());
    }

    #[test]
    fn test_configured_timeout() {
        let mut config = AppConfig::default();
        config.sap.timeout_seconds = Some(45);
        assert!(config.validate_settings().is_ok());
        assert_eq!(config.sap.timeout(), Some(Duration::from_secs(45)));
    }
}
