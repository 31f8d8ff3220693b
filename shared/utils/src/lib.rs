pub mod config;
pub mod logging;
pub mod error;
pub mod odata;

pub use config::*;
pub use logging::*;
pub use error::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loading() {
        let config = AppConfig::default();
        assert_eq!(config.sap.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_error_handling() {
        let error = BomError::transport("connection refused");
        assert_eq!(error.error_code(), "TRANSPORT_ERROR");
        assert_eq!(error.to_string(), "API request error: connection refused");
    }
}
