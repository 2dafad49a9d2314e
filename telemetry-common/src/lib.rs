//! Shared types and capability traits for the telemetry uploader workspace.

pub mod constants;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{
    Clock, LocationSource, SensorSource, SystemClock, TransportError, UploadTransport, UserPrompt,
};

// Re-export types
#[doc(inline)]
pub use types::{
    Attitude, Credentials, Location, MagneticField, RawConfig, ReadingCategory, TelemetryReading,
    XYZ,
};
