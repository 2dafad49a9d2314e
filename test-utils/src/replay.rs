use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use telemetry_common::{Attitude, Location, LocationSource, MagneticField, SensorSource, XYZ};

use crate::csv_loader::{load_recorded_samples, RecordedSample};

/// Device replaying a recorded session in a loop.
///
/// All getters return the current row. Reading the location fix, the last
/// getter called in a polling cycle, moves on to the next row.
pub struct ReplayDevice {
    samples: Vec<RecordedSample>,
    cursor: AtomicUsize,
    running: AtomicBool,
}

impl ReplayDevice {
    pub fn new(samples: Vec<RecordedSample>) -> Result<Self, String> {
        if samples.is_empty() {
            return Err("Recorded session has no samples".to_string());
        }
        Ok(Self {
            samples,
            cursor: AtomicUsize::new(0),
            running: AtomicBool::new(false),
        })
    }

    pub fn from_csv(file_path: &str) -> Result<Self, Box<dyn Error>> {
        Ok(Self::new(load_recorded_samples(file_path)?)?)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn samples(&self) -> &[RecordedSample] {
        &self.samples
    }

    fn current(&self) -> &RecordedSample {
        &self.samples[self.cursor.load(Ordering::SeqCst) % self.samples.len()]
    }
}

impl SensorSource for ReplayDevice {
    fn start_updates(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop_updates(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn gravity(&self) -> XYZ {
        self.current().gravity
    }

    fn user_acceleration(&self) -> XYZ {
        self.current().user_acceleration
    }

    fn attitude(&self) -> Attitude {
        self.current().attitude
    }

    fn magnetic_field(&self) -> MagneticField {
        self.current().magnetic_field
    }
}

impl LocationSource for ReplayDevice {
    fn is_authorized(&self) -> bool {
        true
    }

    fn start_updates(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop_updates(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn location(&self) -> Option<Location> {
        let location = self.current().location;
        self.cursor.fetch_add(1, Ordering::SeqCst);
        Some(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_loader::RECORDED_READINGS;

    #[test]
    fn test_replay_advances_on_location() {
        let device = ReplayDevice::from_csv(RECORDED_READINGS).unwrap();
        let first_gravity = device.gravity();
        assert_eq!(device.gravity(), first_gravity);

        let first_fix = device.location().unwrap();
        let second_fix = device.location().unwrap();
        assert!(second_fix.timestamp > first_fix.timestamp);
        assert_eq!(device.gravity(), device.samples()[2].gravity);
    }

    #[test]
    fn test_replay_wraps_around() {
        let device = ReplayDevice::from_csv(RECORDED_READINGS).unwrap();
        let first = device.location().unwrap();
        for _ in 1..device.len() {
            device.location();
        }
        assert_eq!(device.location().unwrap(), first);
    }

    #[test]
    fn test_empty_session_is_rejected() {
        assert!(ReplayDevice::new(vec![]).is_err());
    }
}
