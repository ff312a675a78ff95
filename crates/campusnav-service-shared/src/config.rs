//! Environment-driven service configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CAMPUSNAV_DATA_PATH` | `campus.json` |
//! | `SERVICE_PORT` | `8080` |
//! | `REQUEST_TIMEOUT_SECS` | `30` |
//!
//! Logging and metrics read their own variables, see [`crate::logging`] and
//! [`crate::metrics`].

use std::path::PathBuf;
use std::time::Duration;

use campusnav_lib::DATA_PATH_ENV;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const DEFAULT_DATA_PATH: &str = "campus.json";

/// A configuration variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value '{}' for {}", self.value, self.variable)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_path: PathBuf,
    pub port: u16,
    /// Upper bound on handler run time, including time spent waiting for the engine lock.
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_path = lookup(DATA_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let port = match lookup("SERVICE_PORT") {
            Some(value) => parse_var("SERVICE_PORT", &value)?,
            None => defaults.port,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", &value)?;
                if secs == 0 {
                    return Err(ConfigError {
                        variable: "REQUEST_TIMEOUT_SECS",
                        value,
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            data_path,
            port,
            request_timeout,
        })
    }
}

fn parse_var<T: std::str::FromStr>(variable: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        variable,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn values_are_read_from_variables() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (DATA_PATH_ENV, "/srv/campus.json"),
            ("SERVICE_PORT", "9000"),
            ("REQUEST_TIMEOUT_SECS", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/campus.json"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = ServiceConfig::from_lookup(lookup(&[("SERVICE_PORT", "http")])).unwrap_err();
        assert_eq!(err.variable, "SERVICE_PORT");
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err =
            ServiceConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        assert_eq!(err.variable, "REQUEST_TIMEOUT_SECS");
    }
}
