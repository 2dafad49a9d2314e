//! Fakes of the device, prompt, transport and clock ports, plus a recorded
//! session that can be replayed as a device.

pub mod csv_loader;
pub mod mocks;
pub mod replay;

pub use csv_loader::{load_recorded_samples, RecordedSample, RECORDED_READINGS};
pub use replay::ReplayDevice;
