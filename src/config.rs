// Configuration module for pcsearch
// This module handles loading and parsing configuration from ~/.config/pcsearch/config.toml

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::lookup::DEFAULT_ENDPOINT;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
}

/// Lookup service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    /// Base URL of the postcode lookup service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Connectivity recovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectivityConfig {
    /// How long to stay offline after a network failure before retrying,
    /// in milliseconds
    #[serde(default = "default_retry_ms")]
    pub retry_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            retry_ms: default_retry_ms(),
        }
    }
}

fn default_retry_ms() -> u64 {
    5000
}

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/pcsearch/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    let config_path = get_config_path();

    #[cfg(debug_assertions)]
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        #[cfg(debug_assertions)]
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    // Try to read the file
    let contents = match fs::read_to_string(&config_path) {
        Ok(contents) => {
            #[cfg(debug_assertions)]
            log::debug!("Config file read successfully, {} bytes", contents.len());
            contents
        }
        Err(e) => {
            #[cfg(debug_assertions)]
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    // Try to parse TOML
    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            #[cfg(debug_assertions)]
            log::debug!("Config parsed successfully: endpoint {}", config.lookup.endpoint);
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            #[cfg(debug_assertions)]
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/pcsearch/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("pcsearch")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // For any malformed TOML syntax in the config file, the config system
    // should log an error with details and return a config with all default values.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_malformed_toml_fallback(
            malformed in prop::sample::select(vec![
                "[lookup\nendpoint = \"https://x\"",     // Missing closing bracket
                "[lookup]\nendpoint = https://x",        // Missing quotes
                "[lookup]\n endpoint",                   // Missing value
                "lookup]\nendpoint = \"https://x\"",     // Missing opening bracket
                "[lookup]\nendpoint = \"https://x",      // Unterminated string
                "[connectivity]\nretry_ms = \"soon\"",   // Wrong type
            ])
        ) {
            let config: Result<Config, _> = toml::from_str(malformed);

            // Should fail to parse
            prop_assert!(config.is_err(), "Malformed TOML should fail to parse");

            // In the actual load_config function, this error would be caught
            // and Config::default() would be returned
            let default_config = Config::default();
            prop_assert_eq!(
                default_config.lookup.endpoint,
                DEFAULT_ENDPOINT,
                "Default config should use the stock endpoint"
            );
        }
    }

    // For any execution of the config loading function, it should attempt to load
    // from the same standardized path (~/.config/pcsearch/config.toml).
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_config_path_consistency(_iteration in 0..10u32) {
            let path1 = get_config_path();
            let path2 = get_config_path();

            prop_assert_eq!(&path1, &path2, "Config path should be consistent");

            let path_str = path1.to_string_lossy();
            prop_assert!(
                path_str.ends_with("pcsearch/config.toml")
                    || path_str.ends_with("pcsearch\\config.toml"),
                "Config path should end with pcsearch/config.toml, got: {}",
                path_str
            );
        }
    }

    // Unit tests for configuration loading

    #[test]
    fn test_config_default_values() {
        let config = Config::default();
        assert_eq!(config.lookup.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.connectivity.retry_ms, 5000);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[lookup]
endpoint = "https://postcodes.example.net/postcodes"

[connectivity]
retry_ms = 1500
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.lookup.endpoint,
            "https://postcodes.example.net/postcodes"
        );
        assert_eq!(config.connectivity.retry_ms, 1500);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml = r#"
[lookup]
endpoint = "http://localhost:9000/postcodes"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.lookup.endpoint, "http://localhost:9000/postcodes");
        assert_eq!(config.connectivity.retry_ms, 5000);
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.lookup.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.connectivity.retry_ms, 5000);
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let toml = r#"
[clipboard]
backend = "auto"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err(), "Unknown sections should fail to parse");
    }

    #[test]
    fn test_malformed_toml_fails() {
        let toml = "[lookup\nendpoint = \"https://x\""; // Missing closing bracket
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err(), "Malformed TOML should fail to parse");
    }
}
