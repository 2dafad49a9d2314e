//! # Crate uploader-rs
//!
//! ## uploader-rs
//!
//! The `uploader-rs` crate streams phone telemetry (gravity, user acceleration, attitude,
//! magnetic field and location fix) to a collection server. Every polling cycle it reads all
//! sources and posts the readings as a form encoded body with HTTP Basic authentication.
//!
//! Features include:
//! - Configuration with defaults, an interactive form and an optional JSON config file.
//! - Upload of one combined reading per cycle, or of one reading per source.
//! - A consecutive failure budget that is forgiven after a quiet period, ending the session
//!   once exhausted.
//! - A simulated device for hosts without motion or location hardware.
//!
//! **NOTE** Only a `201 Created` answer counts as a successful upload.

pub mod adapters;
pub mod client;
pub mod models;
pub mod services;

pub use client::{Delivery, UploadClient};
pub use models::config::{ConfigTemplate, ConnectionConfig, DEFAULT_CONFIG};
pub use models::errors::{AppError, ConfigError, DeviceError, UploadError};
pub use services::{run_service, ServiceOptions, SessionSummary, TelemetrySession, UploadMode};
