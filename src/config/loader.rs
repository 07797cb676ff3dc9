//! Configuration loader for YAML files
//!
//! This module handles loading and validating configuration from YAML files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::AppError;

use super::constants::api_base_url_override;
use super::types::AppConfig;

/// Load configuration from a YAML file
///
/// This function:
/// 1. Checks if the file exists
/// 2. Parses the YAML content
/// 3. Applies environment overrides
/// 4. Validates the configuration rules
///
/// # Returns
/// * `Ok(AppConfig)` - Successfully loaded and validated configuration
/// * `Err(AppError)` - File not found, parse error, or validation failure
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use crypto_pulse::config::load_config;
///
/// let config = load_config(Path::new("config.yaml"))?;
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let config: AppConfig = serde_yaml::from_reader(reader).map_err(|e| {
        AppError::Config(format!("YAML parse error in '{}': {}", path.display(), e))
    })?;

    finish(config)
}

/// Load configuration from a YAML string (useful for testing)
pub fn load_config_from_str(yaml_content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = serde_yaml::from_str(yaml_content)
        .map_err(|e| AppError::Config(format!("YAML parse error: {}", e)))?;

    finish(config)
}

/// Defaults with environment overrides, for running without a config file
pub fn default_config() -> Result<AppConfig, AppError> {
    finish(AppConfig::default())
}

fn finish(mut config: AppConfig) -> Result<AppConfig, AppError> {
    if let Some(url) = api_base_url_override() {
        config.api.base_url = url;
    }
    config.validate()?;
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_CONFIG_YAML: &str = r#"
api:
  base_url: http://127.0.0.1:8000
  timeout_secs: 10
dashboard:
  page_size: 20
live:
  sync_limit: 5
market:
  entities:
    - name: Bitcoin
      symbol: BTC
    - name: Ethereum
      symbol: ETH
preferences:
  path: /tmp/pulse-prefs.json
"#;

    #[test]
    #[serial]
    fn test_load_config_from_str_valid() {
        std::env::remove_var("PULSE_API_URL");
        let config = load_config_from_str(VALID_CONFIG_YAML).unwrap();
        assert_eq!(config.market.entities.len(), 2);
        assert_eq!(config.market.entities[1].symbol, "ETH");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_load_config_from_str_invalid_yaml() {
        let invalid_yaml = "invalid: yaml: content: [";
        let result = load_config_from_str(invalid_yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }

    #[test]
    #[serial]
    fn test_load_config_from_str_validation_failure() {
        std::env::remove_var("PULSE_API_URL");
        let invalid_config = r#"
dashboard:
  page_size: 0
"#;
        let result = load_config_from_str(invalid_config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("page_size must be > 0"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Configuration file not found"));
    }

    #[test]
    #[serial]
    fn test_load_config_from_file_valid() {
        std::env::remove_var("PULSE_API_URL");
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID_CONFIG_YAML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.market.entities[0].name, "Bitcoin");
        assert_eq!(config.preferences.path, "/tmp/pulse-prefs.json");
    }

    #[test]
    fn test_load_config_from_file_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"invalid: [yaml: content").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }

    #[test]
    #[serial]
    fn test_env_override_applies() {
        std::env::set_var("PULSE_API_URL", "https://override.example");
        let config = load_config_from_str(VALID_CONFIG_YAML).unwrap();
        std::env::remove_var("PULSE_API_URL");
        assert_eq!(config.api.base_url, "https://override.example");
    }

    #[test]
    #[serial]
    fn test_invalid_env_override_rejected() {
        std::env::set_var("PULSE_API_URL", "not-a-url");
        let result = default_config();
        std::env::remove_var("PULSE_API_URL");
        assert!(result.is_err());
    }
}
