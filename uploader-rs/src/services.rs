use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use telemetry_common::{
    Attitude, Clock, Location, LocationSource, MagneticField, ReadingCategory, SensorSource,
    SystemClock, TelemetryReading, UploadTransport, UserPrompt, XYZ,
};

use crate::client::{Delivery, UploadClient};
use crate::models::config::{
    load_config_from, load_config_or_defaults, save_config, ConfigTemplate, ConnectionConfig,
};
use crate::models::errors::{AppError, UploadError};

const UNAUTHORIZED_ALERT: &str =
    "Authorize Location Services For This Application Before Continuing";
const RETRY_EXCEEDED_ALERT: &str = "Too many failures to continue...\n\nBye!";

/// How readings are posted every cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadMode {
    /// One reading with every source, posted to the combined endpoint.
    #[default]
    Combined,
    /// One reading per source, each posted to its own endpoint.
    PerCategory,
}

impl UploadMode {
    fn categories(&self) -> &'static [ReadingCategory] {
        match self {
            UploadMode::Combined => &[ReadingCategory::Combined],
            UploadMode::PerCategory => &ReadingCategory::SEPARATE,
        }
    }
}

/// Counters of an upload session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub cycles: u64,
    pub accepted: u64,
    pub failed: u64,
    /// Readings not posted because the location fix was missing.
    pub skipped: u64,
}

impl SessionSummary {
    fn record(&mut self, delivery: Delivery) {
        if delivery.is_accepted() {
            self.accepted += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Keeps the sensor and location updates running while alive.
struct Subscriptions<'a, S, L>
where
    S: SensorSource,
    L: LocationSource,
{
    sensors: &'a S,
    location: &'a L,
}

impl<'a, S, L> Subscriptions<'a, S, L>
where
    S: SensorSource,
    L: LocationSource,
{
    fn start(sensors: &'a S, location: &'a L) -> Self {
        location.start_updates();
        sensors.start_updates();
        Self { sensors, location }
    }
}

impl<S, L> Drop for Subscriptions<'_, S, L>
where
    S: SensorSource,
    L: LocationSource,
{
    fn drop(&mut self) {
        self.location.stop_updates();
        self.sensors.stop_updates();
    }
}

/// Samples of every source taken in one cycle.
struct Snapshot {
    gravity: XYZ,
    user_acceleration: XYZ,
    attitude: Attitude,
    magnetic_field: MagneticField,
    location: Option<Location>,
}

impl Snapshot {
    fn take<S: SensorSource, L: LocationSource>(sensors: &S, location: &L) -> Self {
        Self {
            gravity: sensors.gravity(),
            user_acceleration: sensors.user_acceleration(),
            attitude: sensors.attitude(),
            magnetic_field: sensors.magnetic_field(),
            location: location.location(),
        }
    }

    /// None when the reading needs a location fix and there is none yet.
    fn reading(&self, category: ReadingCategory) -> Option<TelemetryReading> {
        match category {
            ReadingCategory::Gravity => Some((&self.gravity).into()),
            ReadingCategory::UserAcceleration => Some((&self.user_acceleration).into()),
            ReadingCategory::Attitude => Some((&self.attitude).into()),
            ReadingCategory::MagneticField => Some((&self.magnetic_field).into()),
            ReadingCategory::Location => self.location.as_ref().map(TelemetryReading::from),
            ReadingCategory::Combined => self.location.as_ref().map(|location| {
                TelemetryReading::combined(
                    &self.gravity,
                    &self.user_acceleration,
                    &self.attitude,
                    &self.magnetic_field,
                    location,
                )
            }),
        }
    }
}

async fn pause(delay: Option<Duration>) {
    match delay {
        Some(delay) => tokio::time::sleep(delay).await,
        None => tokio::task::yield_now().await,
    }
}

/// Polling loop reading the device and posting readings until stopped.
pub struct TelemetrySession<'a, T, C, S, L>
where
    T: UploadTransport,
    C: Clock,
    S: SensorSource,
    L: LocationSource,
{
    client: UploadClient<T, C>,
    sensors: &'a S,
    location: &'a L,
    mode: UploadMode,
}

impl<'a, T, C, S, L> TelemetrySession<'a, T, C, S, L>
where
    T: UploadTransport,
    C: Clock,
    S: SensorSource,
    L: LocationSource,
{
    pub fn new(client: UploadClient<T, C>, sensors: &'a S, location: &'a L, mode: UploadMode) -> Self {
        Self {
            client,
            sensors,
            location,
            mode,
        }
    }

    pub fn client(&self) -> &UploadClient<T, C> {
        &self.client
    }

    /// Runs cycles until `stop` is cancelled, `max_cycles` are done, or the
    /// client gives up. Updates are stopped again on every exit path.
    pub async fn run(
        &mut self,
        stop: CancellationToken,
        max_cycles: Option<u64>,
    ) -> Result<SessionSummary, UploadError> {
        let _subscriptions = Subscriptions::start(self.sensors, self.location);
        let mut summary = SessionSummary::default();
        info!("Upload session started ({:?} mode)", self.mode);

        loop {
            if stop.is_cancelled() {
                info!("Stop requested, ending upload session");
                break;
            }
            if max_cycles.is_some_and(|max| summary.cycles >= max) {
                info!("Completed {} cycles", summary.cycles);
                break;
            }

            self.cycle(&mut summary).await?;
            summary.cycles += 1;

            tokio::select! {
                biased;
                _ = stop.cancelled() => {}
                _ = pause(self.client.cycle_delay()) => {}
            }
        }

        info!("Upload session ended: {:?}", summary);
        Ok(summary)
    }

    async fn cycle(&mut self, summary: &mut SessionSummary) -> Result<(), UploadError> {
        let snapshot = Snapshot::take(self.sensors, self.location);
        for &category in self.mode.categories() {
            match snapshot.reading(category) {
                Some(reading) => {
                    let delivery = self.client.submit(category.path(), &reading).await?;
                    summary.record(delivery);
                }
                None => {
                    debug!("No location fix yet, {:?} reading skipped", category);
                    summary.skipped += 1;
                }
            }
        }
        Ok(())
    }
}

/// Options of a client run beyond the stored configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceOptions {
    pub mode: UploadMode,
    /// Stop after this many cycles.
    pub max_cycles: Option<u64>,
    /// Config file read instead of the template's.
    pub config_path: Option<PathBuf>,
}

/// Bootstraps the client and runs the upload session.
///
/// Checks location authorization, loads the stored configuration (or the
/// template defaults), lets the user edit it unless it is marked to be used
/// as is, validates and optionally saves it, then uploads readings until
/// `stop` is cancelled, the cycle limit is reached, or too many uploads fail
/// in a row. The form runs on the blocking pool, so a stop requested while it
/// is open still ends the session before its first cycle.
pub async fn run_service<P, S, L, T>(
    prompt: Arc<P>,
    sensors: &S,
    location: &L,
    transport: T,
    template: &ConfigTemplate,
    options: &ServiceOptions,
    stop: CancellationToken,
) -> Result<SessionSummary, AppError>
where
    P: UserPrompt + Send + Sync + 'static,
    S: SensorSource,
    L: LocationSource,
    T: UploadTransport,
{
    if !location.is_authorized() {
        prompt.alert(UNAUTHORIZED_ALERT);
        return Err(AppError::Unauthorized);
    }

    let stored = match &options.config_path {
        Some(path) => load_config_from(path, template),
        None => load_config_or_defaults(template),
    };

    let mut config = if stored.use_config_file {
        info!("Starting from config file ({})", stored.config_file_name);
        stored
    } else {
        let form = Arc::clone(&prompt);
        let edited = tokio::task::spawn_blocking(move || form.edit_config(&stored)).await?;
        match edited {
            Some(config) => config,
            None => {
                warn!("No configuration - exiting.");
                return Err(AppError::NoConfiguration);
            }
        }
    };

    let connection = match ConnectionConfig::try_from(&config) {
        Ok(connection) => connection,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            prompt.alert(&format!("Invalid configuration: {}", e));
            return Err(e.into());
        }
    };
    config.base_url = connection.base_url.clone();
    info!("Configuration: {}", config);

    if config.save_config_file {
        save_config(&config, template)?;
        info!("Config file ({}) saved.", config.config_file_name);
    }

    let client = UploadClient::new(&connection, transport, SystemClock);
    let mut session = TelemetrySession::new(client, sensors, location, options.mode);
    match session.run(stop, options.max_cycles).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            error!("{}", e);
            prompt.alert(RETRY_EXCEEDED_ALERT);
            Err(e.into())
        }
    }
}
