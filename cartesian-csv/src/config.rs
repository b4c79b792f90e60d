//! Node configuration.
//!
//! Defaults match what hosts expect from the node; every value can be
//! overridden through the environment (a `.env` file is loaded first):
//!
//! | Variable                          | Default       |
//! |-----------------------------------|---------------|
//! | `CARTESIAN_CSV_PLACEHOLDER_SIZE`  | `512`         |
//! | `CARTESIAN_CSV_PLACEHOLDER_COLOR` | `73,109,137`  |
//! | `CARTESIAN_CSV_DETECT_ENCODING`   | `true`        |

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::ConfigError;
use crate::transform::CombineOptions;

pub const PLACEHOLDER_SIZE_VAR: &str = "CARTESIAN_CSV_PLACEHOLDER_SIZE";
pub const PLACEHOLDER_COLOR_VAR: &str = "CARTESIAN_CSV_PLACEHOLDER_COLOR";
pub const DETECT_ENCODING_VAR: &str = "CARTESIAN_CSV_DETECT_ENCODING";

/// Largest accepted placeholder edge length.
pub const MAX_PLACEHOLDER_SIZE: u32 = 16384;

/// Runtime configuration of a node instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Edge length of the square placeholder image
    pub placeholder_size: u32,

    /// RGB color of the placeholder image
    pub placeholder_color: [u8; 3],

    /// Decode non-UTF-8 CSVs after charset detection
    pub detect_encoding: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            placeholder_size: 512,
            placeholder_color: [73, 109, 137],
            detect_encoding: true,
        }
    }
}

impl NodeConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try loading .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(PLACEHOLDER_SIZE_VAR) {
            config.placeholder_size = parse_size(&value)?;
        }
        if let Some(value) = lookup(PLACEHOLDER_COLOR_VAR) {
            config.placeholder_color = parse_color(&value)?;
        }
        if let Some(value) = lookup(DETECT_ENCODING_VAR) {
            config.detect_encoding = parse_bool(DETECT_ENCODING_VAR, &value)?;
        }

        Ok(config)
    }

    /// Set the placeholder image size
    pub fn with_placeholder_size(mut self, size: u32) -> Self {
        self.placeholder_size = size;
        self
    }

    /// Set the placeholder image color
    pub fn with_placeholder_color(mut self, color: [u8; 3]) -> Self {
        self.placeholder_color = color;
        self
    }

    pub fn combine_options(&self) -> CombineOptions {
        CombineOptions {
            detect_encoding: self.detect_encoding,
        }
    }
}

fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_size(value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(0) => Err(invalid(PLACEHOLDER_SIZE_VAR, value, "must be greater than 0")),
        Ok(size) if size > MAX_PLACEHOLDER_SIZE => Err(invalid(
            PLACEHOLDER_SIZE_VAR,
            value,
            format!("must be at most {}", MAX_PLACEHOLDER_SIZE),
        )),
        Ok(size) => Ok(size),
        Err(e) => Err(invalid(PLACEHOLDER_SIZE_VAR, value, e.to_string())),
    }
}

fn parse_color(value: &str) -> Result<[u8; 3], ConfigError> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(invalid(PLACEHOLDER_COLOR_VAR, value, "expected r,g,b"));
    }

    let mut color = [0u8; 3];
    for (channel, part) in color.iter_mut().zip(&parts) {
        *channel = part
            .parse()
            .map_err(|e: std::num::ParseIntError| invalid(PLACEHOLDER_COLOR_VAR, value, e.to_string()))?;
    }
    Ok(color)
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, value, "expected true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = NodeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, NodeConfig::default());
        assert_eq!(config.placeholder_color, [73, 109, 137]);
    }

    #[test]
    fn test_overrides() {
        let config = NodeConfig::from_lookup(lookup(&[
            (PLACEHOLDER_SIZE_VAR, "64"),
            (PLACEHOLDER_COLOR_VAR, "10, 20,30"),
            (DETECT_ENCODING_VAR, "off"),
        ]))
        .unwrap();

        assert_eq!(config.placeholder_size, 64);
        assert_eq!(config.placeholder_color, [10, 20, 30]);
        assert!(!config.detect_encoding);
        assert!(!config.combine_options().detect_encoding);
    }

    #[test]
    fn test_placeholder_size_bounds() {
        let max = MAX_PLACEHOLDER_SIZE.to_string();
        let config = NodeConfig::from_lookup(lookup(&[(PLACEHOLDER_SIZE_VAR, max.as_str())])).unwrap();
        assert_eq!(config.placeholder_size, MAX_PLACEHOLDER_SIZE);

        let err = NodeConfig::from_lookup(lookup(&[(PLACEHOLDER_SIZE_VAR, "16385")])).unwrap_err();
        assert!(err.to_string().contains("at most"));
        assert!(NodeConfig::from_lookup(lookup(&[(PLACEHOLDER_SIZE_VAR, "4294967295")])).is_err());
    }

    #[test]
    fn test_invalid_values() {
        assert!(NodeConfig::from_lookup(lookup(&[(PLACEHOLDER_SIZE_VAR, "0")])).is_err());
        assert!(NodeConfig::from_lookup(lookup(&[(PLACEHOLDER_COLOR_VAR, "1,2")])).is_err());
        assert!(NodeConfig::from_lookup(lookup(&[(PLACEHOLDER_COLOR_VAR, "1,2,300")])).is_err());

        let err = NodeConfig::from_lookup(lookup(&[(DETECT_ENCODING_VAR, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(DETECT_ENCODING_VAR));
    }
}
