use crate::error::{AroundError, Result};
use crate::models::GeoOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default search radius when neither the caller nor the viewport supplies one
pub const DEFAULT_RADIUS_KM: f64 = 20.0;

/// Default positional jitter applied to new posts, in degrees
pub const DEFAULT_JITTER_DEGREES: f64 = 0.02;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the around client
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub api_root: ConfigValue<String>,
    pub auth_prefix: ConfigValue<String>,
    pub default_radius_km: ConfigValue<f64>,
    pub jitter_degrees: ConfigValue<f64>,
    pub geolocation_url: ConfigValue<Option<String>>,
    pub enable_high_accuracy: ConfigValue<bool>,
    pub geo_timeout_ms: ConfigValue<u64>,
    pub geo_maximum_age_ms: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let geo = GeoOptions::default();
        Self {
            api_root: ConfigValue::new("http://localhost:8080".to_string(), ConfigSource::Default),
            auth_prefix: ConfigValue::new("Bearer".to_string(), ConfigSource::Default),
            default_radius_km: ConfigValue::new(DEFAULT_RADIUS_KM, ConfigSource::Default),
            jitter_degrees: ConfigValue::new(DEFAULT_JITTER_DEGREES, ConfigSource::Default),
            geolocation_url: ConfigValue::new(None, ConfigSource::Default),
            enable_high_accuracy: ConfigValue::new(geo.enable_high_accuracy, ConfigSource::Default),
            geo_timeout_ms: ConfigValue::new(geo.timeout.as_millis() as u64, ConfigSource::Default),
            geo_maximum_age_ms: ConfigValue::new(
                geo.maximum_age.as_millis() as u64,
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| AroundError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| AroundError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(api_root) = file_config.api_root {
            self.api_root.update(api_root, ConfigSource::File);
        }

        if let Some(auth_prefix) = file_config.auth_prefix {
            self.auth_prefix.update(auth_prefix, ConfigSource::File);
        }

        if let Some(radius) = file_config.default_radius_km {
            self.default_radius_km.update(check_radius(radius)?, ConfigSource::File);
        }

        if let Some(jitter) = file_config.jitter_degrees {
            self.jitter_degrees.update(check_jitter(jitter)?, ConfigSource::File);
        }

        if let Some(url) = file_config.geolocation_url {
            self.geolocation_url.update(Some(url), ConfigSource::File);
        }

        if let Some(high_accuracy) = file_config.enable_high_accuracy {
            self.enable_high_accuracy.update(high_accuracy, ConfigSource::File);
        }

        if let Some(timeout) = file_config.geo_timeout_ms {
            self.geo_timeout_ms.update(timeout, ConfigSource::File);
        }

        if let Some(maximum_age) = file_config.geo_maximum_age_ms {
            self.geo_maximum_age_ms.update(maximum_age, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(api_root) = env::var("AROUND_API_ROOT") {
            self.api_root.update(api_root, ConfigSource::Environment);
        }

        if let Ok(prefix) = env::var("AROUND_AUTH_PREFIX") {
            self.auth_prefix.update(prefix, ConfigSource::Environment);
        }

        if let Ok(radius_str) = env::var("AROUND_DEFAULT_RADIUS_KM") {
            match parse_radius(&radius_str) {
                Ok(radius) => self.default_radius_km.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AROUND_DEFAULT_RADIUS_KM value '{}': expected a positive number",
                    radius_str
                ),
            }
        }

        if let Ok(jitter_str) = env::var("AROUND_JITTER_DEGREES") {
            match parse_jitter(&jitter_str) {
                Ok(jitter) => self.jitter_degrees.update(jitter, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AROUND_JITTER_DEGREES value '{}': expected a non-negative number",
                    jitter_str
                ),
            }
        }

        if let Ok(url) = env::var("AROUND_GEOLOCATION_URL") {
            self.geolocation_url.update(Some(url), ConfigSource::Environment);
        }

        if let Ok(flag) = env::var("AROUND_HIGH_ACCURACY") {
            match parse_bool(&flag) {
                Ok(value) => self.enable_high_accuracy.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AROUND_HIGH_ACCURACY value '{}': expected true or false",
                    flag
                ),
            }
        }

        if let Ok(timeout) = env::var("AROUND_GEO_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(ms) => self.geo_timeout_ms.update(ms, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AROUND_GEO_TIMEOUT_MS value '{}': expected milliseconds",
                    timeout
                ),
            }
        }

        if let Ok(maximum_age) = env::var("AROUND_GEO_MAXIMUM_AGE_MS") {
            match maximum_age.parse::<u64>() {
                Ok(ms) => self.geo_maximum_age_ms.update(ms, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AROUND_GEO_MAXIMUM_AGE_MS value '{}': expected milliseconds",
                    maximum_age
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(api_root) = overrides.api_root {
            self.api_root.update(api_root, ConfigSource::Cli);
        }

        if let Some(radius) = overrides.default_radius_km {
            self.default_radius_km.update(radius, ConfigSource::Cli);
        }

        if let Some(url) = overrides.geolocation_url {
            self.geolocation_url.update(Some(url), ConfigSource::Cli);
        }
    }

    /// Geolocation options assembled from the layered values
    pub fn geo_options(&self) -> GeoOptions {
        GeoOptions {
            enable_high_accuracy: self.enable_high_accuracy.value,
            timeout: Duration::from_millis(self.geo_timeout_ms.value),
            maximum_age: Duration::from_millis(self.geo_maximum_age_ms.value),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("api_root".to_string(), (self.api_root.value.clone(), self.api_root.source));
        map.insert(
            "auth_prefix".to_string(),
            (self.auth_prefix.value.clone(), self.auth_prefix.source),
        );
        map.insert(
            "default_radius_km".to_string(),
            (format!("{} km", self.default_radius_km.value), self.default_radius_km.source),
        );
        map.insert(
            "jitter_degrees".to_string(),
            (format!("{}°", self.jitter_degrees.value), self.jitter_degrees.source),
        );
        map.insert(
            "geolocation_url".to_string(),
            (
                self.geolocation_url.value.clone().unwrap_or_else(|| "(none)".to_string()),
                self.geolocation_url.source,
            ),
        );
        map.insert(
            "enable_high_accuracy".to_string(),
            (self.enable_high_accuracy.value.to_string(), self.enable_high_accuracy.source),
        );
        map.insert(
            "geo_timeout_ms".to_string(),
            (self.geo_timeout_ms.value.to_string(), self.geo_timeout_ms.source),
        );
        map.insert(
            "geo_maximum_age_ms".to_string(),
            (self.geo_maximum_age_ms.value.to_string(), self.geo_maximum_age_ms.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    api_root: Option<String>,
    auth_prefix: Option<String>,
    default_radius_km: Option<f64>,
    jitter_degrees: Option<f64>,
    geolocation_url: Option<String>,
    enable_high_accuracy: Option<bool>,
    geo_timeout_ms: Option<u64>,
    geo_maximum_age_ms: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub api_root: Option<String>,
    pub default_radius_km: Option<f64>,
    pub geolocation_url: Option<String>,
}

/// Parse a search radius in kilometers
pub fn parse_radius(s: &str) -> Result<f64> {
    let radius = s.trim().parse::<f64>().map_err(|_| AroundError::ConfigInvalid {
        key: "default_radius_km".to_string(),
        reason: format!("Invalid radius: {}. Use a positive number of kilometers", s),
    })?;
    check_radius(radius)
}

fn check_radius(radius: f64) -> Result<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(AroundError::ConfigInvalid {
            key: "default_radius_km".to_string(),
            reason: format!("Invalid radius: {}. Use a positive number of kilometers", radius),
        })
    }
}

/// Parse a jitter magnitude in degrees
pub fn parse_jitter(s: &str) -> Result<f64> {
    let jitter = s.trim().parse::<f64>().map_err(|_| AroundError::ConfigInvalid {
        key: "jitter_degrees".to_string(),
        reason: format!("Invalid jitter: {}. Use a non-negative number of degrees", s),
    })?;
    check_jitter(jitter)
}

fn check_jitter(jitter: f64) -> Result<f64> {
    if jitter.is_finite() && jitter >= 0.0 {
        Ok(jitter)
    } else {
        Err(AroundError::ConfigInvalid {
            key: "jitter_degrees".to_string(),
            reason: format!("Invalid jitter: {}. Use a non-negative number of degrees", jitter),
        })
    }
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AroundError::ConfigInvalid {
            key: "enable_high_accuracy".to_string(),
            reason: format!("Invalid flag: {}. Use true or false", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.api_root.value, "http://localhost:8080");
        assert_eq!(config.api_root.source, ConfigSource::Default);
        assert_eq!(config.auth_prefix.value, "Bearer");
        assert_eq!(config.default_radius_km.value, 20.0);
        assert_eq!(config.jitter_degrees.value, 0.02);
        assert!(config.geolocation_url.value.is_none());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_root = "https://around.example.com"
auth_prefix = "Token"
default_radius_km = 5.5
jitter_degrees = 0.01
geo_timeout_ms = 1000
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.api_root.value, "https://around.example.com");
        assert_eq!(config.api_root.source, ConfigSource::File);
        assert_eq!(config.auth_prefix.value, "Token");
        assert_eq!(config.default_radius_km.value, 5.5);
        assert_eq!(config.jitter_degrees.value, 0.01);
        assert_eq!(config.geo_options().timeout, Duration::from_secs(1));
        assert_eq!(config.geo_maximum_age_ms.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_rejects_negative_radius() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_radius_km = -3.0").unwrap();

        assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            api_root: Some("http://cli:9000".to_string()),
            default_radius_km: None,
            geolocation_url: Some("http://ip-api.test/json".to_string()),
        });

        assert_eq!(config.api_root.value, "http://cli:9000");
        assert_eq!(config.api_root.source, ConfigSource::Cli);
        assert_eq!(config.geolocation_url.value.as_deref(), Some("http://ip-api.test/json"));
        assert_eq!(config.default_radius_km.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_radius() {
        assert_eq!(parse_radius("20").unwrap(), 20.0);
        assert_eq!(parse_radius(" 0.5 ").unwrap(), 0.5);
        assert!(parse_radius("0").is_err());
        assert!(parse_radius("far").is_err());
    }

    #[test]
    fn test_parse_jitter() {
        assert_eq!(parse_jitter("0").unwrap(), 0.0);
        assert!(parse_jitter("-0.1").is_err());
        assert!(parse_jitter("NaN").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert_eq!(map.len(), 8);
        let (radius, source) = &map["default_radius_km"];
        assert_eq!(radius, "20 km");
        assert_eq!(*source, ConfigSource::Default);
        assert_eq!(map["geolocation_url"].0, "(none)");
    }
}
