//! Client configuration.
//!
//! Options can be set three ways: builder-style `with_*` methods, the
//! string-keyed `set_option` (keys `transport`, `domain`, `version`, `idk`),
//! or `Config::from_env` for processes configured through the environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default LFSWorld host.
pub const DEFAULT_DOMAIN: &str = "www.lfsworld.net";

/// API version requests are sent as unless configured otherwise.
pub const DEFAULT_VERSION: f64 = 1.5;

/// URL scheme used to reach the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            _ => Err(ConfigError::InvalidValue {
                key: "transport".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Connection and identity settings for a `Client`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `http` or `https`.
    pub transport: Scheme,

    /// Host the API is served from, without scheme or trailing slash.
    pub domain: String,

    /// API version sent with every request and compared against each
    /// endpoint's minimum version.
    pub version: f64,

    /// Identity key appended to every request. LFSWorld answers with an
    /// error payload when it is empty or wrong.
    pub idk: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: Scheme::Http,
            domain: DEFAULT_DOMAIN.to_string(),
            version: DEFAULT_VERSION,
            idk: String::new(),
        }
    }
}

impl Config {
    /// Default configuration with the given identity key.
    #[must_use]
    pub fn new(idk: impl Into<String>) -> Self {
        Self {
            idk: idk.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_transport(mut self, transport: Scheme) -> Self {
        self.transport = transport;
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: f64) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_idk(mut self, idk: impl Into<String>) -> Self {
        self.idk = idk.into();
        self
    }

    /// Sets an option by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownOption` for keys other than `transport`,
    /// `domain`, `version` and `idk`, and `ConfigError::InvalidValue` when
    /// the value cannot be parsed for that key.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<&mut Self, ConfigError> {
        match key {
            "transport" => self.transport = value.parse()?,
            "domain" => self.domain = value.to_string(),
            "version" => {
                self.version = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
            }
            "idk" => self.idk = value.to_string(),
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(self)
    }

    /// Returns an option rendered as a string, or `None` for unknown keys.
    pub fn get_option(&self, key: &str) -> Option<String> {
        match key {
            "transport" => Some(self.transport.to_string()),
            "domain" => Some(self.domain.clone()),
            "version" => Some(self.version.to_string()),
            "idk" => Some(self.idk.clone()),
            _ => None,
        }
    }

    /// Builds a configuration from `LFSWORLD_TRANSPORT`, `LFSWORLD_DOMAIN`,
    /// `LFSWORLD_VERSION` and `LFSWORLD_IDK`. Unset variables keep defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set to a value
    /// that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ["transport", "domain", "version", "idk"] {
            let var = format!("LFSWORLD_{}", key.to_ascii_uppercase());
            if let Some(value) = lookup(&var) {
                config.set_option(key, &value)?;
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_public_host() {
        let config = Config::default();
        assert_eq!(config.transport, Scheme::Http);
        assert_eq!(config.domain, "www.lfsworld.net");
        assert_eq!(config.version, 1.5);
        assert!(config.idk.is_empty());
    }

    #[test]
    fn set_option_updates_each_key() {
        let mut config = Config::default();
        config
            .set_option("transport", "https")
            .unwrap()
            .set_option("domain", "localhost:3000")
            .unwrap()
            .set_option("version", "1.4")
            .unwrap()
            .set_option("idk", "secret")
            .unwrap();

        assert_eq!(config.transport, Scheme::Https);
        assert_eq!(config.domain, "localhost:3000");
        assert_eq!(config.version, 1.4);
        assert_eq!(config.idk, "secret");
    }

    #[test]
    fn set_option_rejects_unknown_key() {
        let mut config = Config::default();
        let err = config.set_option("timeout", "5").unwrap_err();
        assert_eq!(err, ConfigError::UnknownOption("timeout".to_string()));
    }

    #[test]
    fn set_option_rejects_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_option("transport", "ftp"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set_option("version", "latest"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn get_option_renders_values() {
        let config = Config::new("abc").with_transport(Scheme::Https);
        assert_eq!(config.get_option("transport").as_deref(), Some("https"));
        assert_eq!(config.get_option("version").as_deref(), Some("1.5"));
        assert_eq!(config.get_option("idk").as_deref(), Some("abc"));
        assert_eq!(config.get_option("nope"), None);
    }

    #[test]
    fn from_lookup_reads_prefixed_variables() {
        let config = Config::from_lookup(|name| match name {
            "LFSWORLD_IDK" => Some("env-key".to_string()),
            "LFSWORLD_TRANSPORT" => Some("HTTPS".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.idk, "env-key");
        assert_eq!(config.transport, Scheme::Https);
        assert_eq!(config.domain, DEFAULT_DOMAIN);
    }

    #[test]
    fn from_lookup_surfaces_invalid_version() {
        let err = Config::from_lookup(|name| {
            (name == "LFSWORLD_VERSION").then(|| "one".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "version"));
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"idk":"k","transport":"https"}"#).unwrap();
        assert_eq!(config.idk, "k");
        assert_eq!(config.transport, Scheme::Https);
        assert_eq!(config.version, DEFAULT_VERSION);
    }
}
