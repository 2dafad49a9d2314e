use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration exactly as persisted in the config file or edited in the form.
///
/// Numeric tunables are kept as entered; they are parsed when the connection
/// configuration is built from this value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfig {
    pub use_config_file: bool,
    pub save_config_file: bool,
    pub config_file_name: String,
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub interval: String,
    pub max_retries: String,
    pub retry_delay: String,
    pub reset_retry_counter_duration: String,
}

impl fmt::Display for RawConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "use_config_file={} save_config_file={} config_file_name={} base_url={} username={} password=*** interval={} max_retries={} retry_delay={} reset_retry_counter_duration={}",
            self.use_config_file,
            self.save_config_file,
            self.config_file_name,
            self.base_url,
            self.username,
            self.interval,
            self.max_retries,
            self.retry_delay,
            self.reset_retry_counter_duration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawConfig {
        RawConfig {
            use_config_file: false,
            save_config_file: true,
            config_file_name: "client.json".to_string(),
            base_url: "http://localhost:8000".to_string(),
            username: "test1".to_string(),
            password: "s3cret".to_string(),
            interval: "0".to_string(),
            max_retries: "3".to_string(),
            retry_delay: "3".to_string(),
            reset_retry_counter_duration: "3600".to_string(),
        }
    }

    #[test]
    fn test_display_masks_password() {
        let printed = sample().to_string();
        assert!(printed.contains("username=test1"));
        assert!(!printed.contains("s3cret"));
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "use_config_file",
            "save_config_file",
            "config_file_name",
            "base_url",
            "username",
            "password",
            "interval",
            "max_retries",
            "retry_delay",
            "reset_retry_counter_duration",
        ] {
            assert!(object.contains_key(key), "missing {}", key);
        }
        assert_eq!(json["max_retries"], "3");
        assert_eq!(json["use_config_file"], false);
    }
}
