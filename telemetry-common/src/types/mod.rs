pub mod attitude;
pub mod category;
pub mod config;
pub mod credentials;
pub mod location;
pub mod magnetic_field;
pub mod reading;
pub mod xyz;

pub use attitude::Attitude;
pub use category::ReadingCategory;
pub use config::RawConfig;
pub use credentials::Credentials;
pub use location::Location;
pub use magnetic_field::MagneticField;
pub use reading::TelemetryReading;
pub use xyz::XYZ;
