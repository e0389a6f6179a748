//! Build configuration for dotnet-publish
//!
//! Settings are read from the environment variables the buildpack lifecycle
//! exposes to the build step. Every value has a default, so an empty
//! environment yields a usable configuration.
//!
//! # Environment Variables
//!
//! - `BP_LOG_LEVEL`: Logging level - default: "INFO" (`DEBUG` enables debug output)
//! - `BP_DOTNET_DISABLE_BUILDPACK_OUTPUT_SLICING`: Put the whole publish output
//!   in a single layer - default: false
//! - `BP_DOTNET_PROJECT_PATH`: Project directory relative to the working directory
//!
//! # Example
//!
//! ```no_run
//! use dotnet_publish::PublishConfig;
//!
//! let config = PublishConfig::from_env().expect("Invalid configuration");
//! config.validate().expect("Invalid configuration");
//! if config.disable_output_slicing {
//!     println!("Publishing into a single layer");
//! }
//! ```

use std::env;
use std::fmt;
use thiserror::Error;

pub const ENV_LOG_LEVEL: &str = "BP_LOG_LEVEL";
pub const ENV_DISABLE_OUTPUT_SLICING: &str = "BP_DOTNET_DISABLE_BUILDPACK_OUTPUT_SLICING";
pub const ENV_PROJECT_PATH: &str = "BP_DOTNET_PROJECT_PATH";

const DEFAULT_LOG_LEVEL: &str = "info";
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Settings for one build step invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    /// Logging level (trace, debug, info, warn, error), lowercased
    pub log_level: String,

    /// Skip slicing and publish all output as one layer
    pub disable_output_slicing: bool,

    /// Project directory relative to the working directory, when set explicitly
    pub project_path: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            disable_output_slicing: false,
            project_path: None,
        }
    }
}

impl PublishConfig {
    /// Loads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = lookup(ENV_LOG_LEVEL)
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().to_lowercase())
            .unwrap_or(defaults.log_level);

        let disable_output_slicing = match lookup(ENV_DISABLE_OUTPUT_SLICING) {
            Some(v) => parse_bool(ENV_DISABLE_OUTPUT_SLICING, &v)?,
            None => defaults.disable_output_slicing,
        };

        // An empty project path means "not set", same as the lifecycle does
        let project_path = lookup(ENV_PROJECT_PATH).filter(|v| !v.is_empty());

        Ok(Self {
            log_level,
            disable_output_slicing,
            project_path,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        if let Some(path) = &self.project_path {
            if path.starts_with('/') {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be relative to the working directory, got {}",
                    ENV_PROJECT_PATH, path
                )));
            }
        }

        Ok(())
    }

    /// Environment-style view of the effective settings, for debug output
    pub fn to_env_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (ENV_LOG_LEVEL, self.log_level.to_uppercase()),
            (
                ENV_DISABLE_OUTPUT_SLICING,
                self.disable_output_slicing.to_string(),
            ),
            (
                ENV_PROJECT_PATH,
                self.project_path.clone().unwrap_or_default(),
            ),
        ]
    }
}

impl fmt::Display for PublishConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.to_env_pairs() {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(ConfigError::ParseError {
            field: field.to_string(),
            error: format!("'{}' is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = PublishConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, PublishConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = PublishConfig::from_lookup(lookup_from(&[
            (ENV_LOG_LEVEL, "DEBUG"),
            (ENV_DISABLE_OUTPUT_SLICING, "TRUE"),
            (ENV_PROJECT_PATH, "src/api"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(config.disable_output_slicing);
        assert_eq!(config.project_path.as_deref(), Some("src/api"));
    }

    #[test]
    fn test_empty_project_path_is_unset() {
        let config =
            PublishConfig::from_lookup(lookup_from(&[(ENV_PROJECT_PATH, "")])).unwrap();
        assert_eq!(config.project_path, None);
    }

    #[test]
    fn test_invalid_boolean() {
        let err = PublishConfig::from_lookup(lookup_from(&[(ENV_DISABLE_OUTPUT_SLICING, "maybe")]))
            .unwrap_err();
        match err {
            ConfigError::ParseError { field, .. } => assert_eq!(field, ENV_DISABLE_OUTPUT_SLICING),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let config = PublishConfig {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_validate_rejects_absolute_project_path() {
        let config = PublishConfig {
            project_path: Some("/workspace/src".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_lists_variables() {
        let output = PublishConfig::default().to_string();
        assert!(output.contains("BP_LOG_LEVEL: INFO"));
        assert!(output.contains("BP_DOTNET_DISABLE_BUILDPACK_OUTPUT_SLICING: false"));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var(ENV_DISABLE_OUTPUT_SLICING, "true");
        env::remove_var(ENV_PROJECT_PATH);

        let config = PublishConfig::from_env().unwrap();
        assert!(config.disable_output_slicing);
        assert_eq!(config.project_path, None);

        env::remove_var(ENV_DISABLE_OUTPUT_SLICING);
    }
}
