use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Credentials, TelemetryReading};

/// Failures of a single upload attempt, before any HTTP status is known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not build http client: {0}")]
    ClientBuild(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// One authenticated, form encoded POST.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Posts `reading` to `url` and returns the HTTP status code of the response.
    async fn post_form(
        &self,
        url: &str,
        credentials: &Credentials,
        reading: &TelemetryReading,
    ) -> Result<u16, TransportError>;
}
