// Upload of telemetry readings to the collection endpoint, with bookkeeping of
// consecutive failures.

use log::{debug, error, info, warn};
use std::time::{Duration, Instant};

use telemetry_common::{Clock, Credentials, TelemetryReading, UploadTransport};

use crate::models::config::ConnectionConfig;
use crate::models::errors::UploadError;

/// The only status accepted as a successful upload.
pub const HTTP_CREATED: u16 = 201;

/// Result of a single, non fatal upload attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The endpoint answered 201 Created.
    Accepted,
    /// The endpoint answered with any other status.
    Rejected(u16),
    /// No response was received.
    Unreachable,
}

impl Delivery {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Delivery::Accepted)
    }
}

/// Submits readings with HTTP Basic authentication and decides when to give up.
///
/// Every failed attempt increments `retry_count`, unless more than
/// `reset_retry_counter_duration` seconds have passed since the last successful
/// upload, in which case the counter starts over from zero. Once `retry_count`
/// exceeds `max_retries`, [`UploadClient::submit`] returns
/// [`UploadError::RetryExceeded`] and the client must not be used any further.
///
/// A successful upload only moves `last_successful_try`; it does not clear
/// `retry_count`.
pub struct UploadClient<T, C> {
    transport: T,
    clock: C,
    base_url: String,
    credentials: Credentials,
    interval: u64,
    max_retries: u64,
    retry_delay: u64,
    reset_retry_counter_duration: u64,
    retry_count: u64,
    last_successful_try: Instant,
}

impl<T, C> UploadClient<T, C>
where
    T: UploadTransport,
    C: Clock,
{
    pub fn new(config: &ConnectionConfig, transport: T, clock: C) -> Self {
        let last_successful_try = clock.now();
        Self {
            transport,
            clock,
            base_url: config.base_url.clone(),
            credentials: config.credentials.clone(),
            interval: config.interval,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
            reset_retry_counter_duration: config.reset_retry_counter_duration,
            retry_count: 0,
            last_successful_try,
        }
    }

    /// Posts `reading` once to `base_url + path`.
    ///
    /// Transport errors and statuses other than 201 are logged and counted as
    /// failures; they are not returned. The only error is
    /// [`UploadError::RetryExceeded`].
    pub async fn submit(
        &mut self,
        path: &str,
        reading: &TelemetryReading,
    ) -> Result<Delivery, UploadError> {
        let url = self.endpoint(path);
        match self
            .transport
            .post_form(&url, &self.credentials, reading)
            .await
        {
            Err(e) => {
                warn!("Upload to {} failed: {}", url, e);
                self.transmit_failure()?;
                Ok(Delivery::Unreachable)
            }
            Ok(status) if status != HTTP_CREATED => {
                warn!("Upload to {} returned status {}", url, status);
                self.transmit_failure()?;
                Ok(Delivery::Rejected(status))
            }
            Ok(_) => {
                self.last_successful_try = self.clock.now();
                debug!("Uploaded {} fields to {}", reading.len(), url);
                Ok(Delivery::Accepted)
            }
        }
    }

    fn transmit_failure(&mut self) -> Result<(), UploadError> {
        let elapsed = self
            .clock
            .now()
            .saturating_duration_since(self.last_successful_try);

        if elapsed > Duration::from_secs(self.reset_retry_counter_duration) {
            info!(
                "{:.0}s since last successful upload, resetting retry counter",
                elapsed.as_secs_f64()
            );
            self.retry_count = 0;
            return Ok(());
        }

        self.retry_count += 1;
        if self.retry_count > self.max_retries {
            error!(
                "Retry counter exceeded: {} consecutive failures, {} allowed",
                self.retry_count, self.max_retries
            );
            return Err(UploadError::RetryExceeded {
                retries: self.retry_count,
                max_retries: self.max_retries,
            });
        }
        Ok(())
    }

    /// Full URL for `path`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pause between polling cycles: `retry_delay` divided by 1000, in seconds.
    /// None when `retry_delay` is zero.
    pub fn cycle_delay(&self) -> Option<Duration> {
        (self.retry_delay != 0).then(|| Duration::from_millis(self.retry_delay))
    }

    pub fn retry_count(&self) -> u64 {
        self.retry_count
    }

    pub fn last_successful_try(&self) -> Instant {
        self.last_successful_try
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn max_retries(&self) -> u64 {
        self.max_retries
    }

    pub fn retry_delay(&self) -> u64 {
        self.retry_delay
    }

    pub fn reset_retry_counter_duration(&self) -> u64 {
        self.reset_retry_counter_duration
    }
}
