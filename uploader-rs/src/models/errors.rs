//! Module errors

use telemetry_common::TransportError;
use thiserror::Error;

/// Errors loading, saving or validating the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("{field} must be a non-negative integer, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("base_url is empty")]
    EmptyBaseUrl,
}

/// Terminal condition of the upload client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Consecutive failures exceeded the budget inside the quiet period.
    #[error("retry counter exceeded ({retries} > {max_retries})")]
    RetryExceeded { retries: u64, max_retries: u64 },
}

/// Errors of the simulated device.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("invalid noise distribution: {0}")]
    Noise(String),
}

/// Fatal errors that end the client process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Location Services Not Enabled")]
    Unauthorized,

    #[error("No configuration")]
    NoConfiguration,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("configuration form failed: {0}")]
    Form(#[from] tokio::task::JoinError),
}

impl AppError {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
