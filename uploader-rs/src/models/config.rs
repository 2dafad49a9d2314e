// Client configuration: defaults, config file persistence and validation of the
// tunables consumed by the upload client.

use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use telemetry_common::{Credentials, RawConfig};

use crate::models::errors::ConfigError;

const PATH_SEPARATOR: char = '/';

/// Immutable set of configuration defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigTemplate {
    pub use_config_file: bool,
    pub save_config_file: bool,
    pub config_file_name: &'static str,
    pub base_url: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub interval: &'static str,
    pub max_retries: &'static str,
    pub retry_delay: &'static str,
    pub reset_retry_counter_duration: &'static str,
}

pub const DEFAULT_CONFIG: ConfigTemplate = ConfigTemplate {
    use_config_file: false,
    save_config_file: true,
    config_file_name: "pythonista_client_config.json",
    base_url: "http://localhost:8000",
    username: "test1",
    password: "telemetry",
    interval: "0",
    max_retries: "3",
    retry_delay: "3",
    reset_retry_counter_duration: "3600",
};

impl ConfigTemplate {
    /// Returns a fresh editable configuration holding the template values.
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            use_config_file: self.use_config_file,
            save_config_file: self.save_config_file,
            config_file_name: self.config_file_name.to_string(),
            base_url: self.base_url.to_string(),
            username: self.username.to_string(),
            password: self.password.to_string(),
            interval: self.interval.to_string(),
            max_retries: self.max_retries.to_string(),
            retry_delay: self.retry_delay.to_string(),
            reset_retry_counter_duration: self.reset_retry_counter_duration.to_string(),
        }
    }
}

/// Validated connection parameters of the upload client.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionConfig {
    /// Always ends with `/`
    pub base_url: String,
    pub credentials: Credentials,
    /// Milliseconds between cycles
    pub interval: u64,
    pub max_retries: u64,
    pub retry_delay: u64,
    /// Seconds
    pub reset_retry_counter_duration: u64,
}

impl TryFrom<&RawConfig> for ConnectionConfig {
    type Error = ConfigError;

    fn try_from(value: &RawConfig) -> Result<Self, Self::Error> {
        if value.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(Self {
            base_url: normalize_base_url(&value.base_url),
            credentials: Credentials::new(&value.username, &value.password),
            interval: parse_tunable("interval", &value.interval)?,
            max_retries: parse_tunable("max_retries", &value.max_retries)?,
            retry_delay: parse_tunable("retry_delay", &value.retry_delay)?,
            reset_retry_counter_duration: parse_tunable(
                "reset_retry_counter_duration",
                &value.reset_retry_counter_duration,
            )?,
        })
    }
}

fn parse_tunable(field: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Appends the path separator to `base_url` unless it already ends with one.
pub fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with(PATH_SEPARATOR) {
        base_url.to_string()
    } else {
        format!("{}{}", base_url, PATH_SEPARATOR)
    }
}

/// Loads the default config file named by `template`, falling back to the template values.
pub fn load_config_or_defaults(template: &ConfigTemplate) -> RawConfig {
    load_config_from(Path::new(template.config_file_name), template)
}

/// Loads the config file at `path`, falling back to the template values on any error.
pub fn load_config_from(path: &Path, template: &ConfigTemplate) -> RawConfig {
    match read_config(path) {
        Ok(config) => config,
        Err(e) => {
            debug!("Using default configuration, {} not loaded: {}", path.display(), e);
            template.to_raw()
        }
    }
}

fn read_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Writes `config` to the file it names.
///
/// Only the template's file is read back on startup, so a warning is logged
/// when the configuration is saved anywhere else.
pub fn save_config(config: &RawConfig, template: &ConfigTemplate) -> Result<(), ConfigError> {
    let file = File::create(&config.config_file_name)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, config)?;
    writer.flush()?;

    if config.config_file_name != template.config_file_name {
        warn!(
            "Only the default config file ({}) gets loaded on startup.",
            template.config_file_name
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://host:8000"), "http://host:8000/");
        assert_eq!(normalize_base_url("http://host:8000/"), "http://host:8000/");
        assert_eq!(
            normalize_base_url("http://host:8000/api"),
            "http://host:8000/api/"
        );
    }

    #[test]
    fn test_template_to_raw() {
        let raw = DEFAULT_CONFIG.to_raw();
        assert!(!raw.use_config_file);
        assert!(raw.save_config_file);
        assert_eq!(raw.config_file_name, "pythonista_client_config.json");
        assert_eq!(raw.base_url, "http://localhost:8000");
        assert_eq!(raw.max_retries, "3");
        assert_eq!(raw.reset_retry_counter_duration, "3600");
    }

    #[test]
    fn test_connection_config_from_defaults() {
        let connection = ConnectionConfig::try_from(&DEFAULT_CONFIG.to_raw()).unwrap();
        assert_eq!(connection.base_url, "http://localhost:8000/");
        assert_eq!(connection.credentials, Credentials::new("test1", "telemetry"));
        assert_eq!(connection.interval, 0);
        assert_eq!(connection.max_retries, 3);
        assert_eq!(connection.retry_delay, 3);
        assert_eq!(connection.reset_retry_counter_duration, 3600);
    }

    #[test]
    fn test_connection_config_tolerates_whitespace() {
        let mut raw = DEFAULT_CONFIG.to_raw();
        raw.max_retries = " 7 ".to_string();
        let connection = ConnectionConfig::try_from(&raw).unwrap();
        assert_eq!(connection.max_retries, 7);
    }

    #[test]
    fn test_connection_config_rejects_negative_numbers() {
        let mut raw = DEFAULT_CONFIG.to_raw();
        raw.retry_delay = "-1".to_string();
        match ConnectionConfig::try_from(&raw) {
            Err(ConfigError::InvalidNumber { field, value }) => {
                assert_eq!(field, "retry_delay");
                assert_eq!(value, "-1");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_connection_config_rejects_text() {
        let mut raw = DEFAULT_CONFIG.to_raw();
        raw.reset_retry_counter_duration = "one hour".to_string();
        assert!(matches!(
            ConnectionConfig::try_from(&raw),
            Err(ConfigError::InvalidNumber {
                field: "reset_retry_counter_duration",
                ..
            })
        ));
    }

    #[test]
    fn test_connection_config_rejects_empty_base_url() {
        let mut raw = DEFAULT_CONFIG.to_raw();
        raw.base_url = String::new();
        assert!(matches!(
            ConnectionConfig::try_from(&raw),
            Err(ConfigError::EmptyBaseUrl)
        ));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.json"), &DEFAULT_CONFIG);
        assert_eq!(config, DEFAULT_CONFIG.to_raw());
    }

    #[test]
    fn test_load_malformed_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config_from(&path, &DEFAULT_CONFIG), DEFAULT_CONFIG.to_raw());
    }

    #[test]
    fn test_save_then_load_keeps_values_as_entered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("client.json");
        let mut config = DEFAULT_CONFIG.to_raw();
        config.config_file_name = path.to_string_lossy().into_owned();
        config.use_config_file = true;
        config.base_url = "http://collector:9000/".to_string();
        config.max_retries = "07".to_string();

        save_config(&config, &DEFAULT_CONFIG).unwrap();
        let loaded = load_config_from(&path, &DEFAULT_CONFIG);

        assert_eq!(loaded, config);
        assert_eq!(loaded.max_retries, "07");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let mut config = DEFAULT_CONFIG.to_raw();
        config.config_file_name = dir
            .path()
            .join("missing")
            .join("client.json")
            .to_string_lossy()
            .into_owned();
        assert!(matches!(
            save_config(&config, &DEFAULT_CONFIG),
            Err(ConfigError::Io(_))
        ));
    }
}
