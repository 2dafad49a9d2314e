use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use telemetry_common::{
    Attitude, Location, LocationSource, MagneticField, SensorSource, XYZ,
};

/// Device returning constant samples, counting subscription calls.
#[derive(Debug, Default)]
pub struct DeviceMock {
    authorized: bool,
    has_fix: AtomicBool,
    motion_running: AtomicBool,
    location_running: AtomicBool,
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl DeviceMock {
    pub fn new(authorized: bool) -> Self {
        Self {
            authorized,
            has_fix: AtomicBool::new(true),
            ..Default::default()
        }
    }

    pub fn set_fix(&self, has_fix: bool) {
        self.has_fix.store(has_fix, Ordering::SeqCst);
    }

    /// Number of start_updates calls, motion and location combined.
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Number of stop_updates calls, motion and location combined.
    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.motion_running.load(Ordering::SeqCst) || self.location_running.load(Ordering::SeqCst)
    }

    pub fn sample_location() -> Location {
        Location {
            longitude: 13.405,
            latitude: 52.52,
            altitude: 34.0,
            timestamp: 1_700_000_000.0,
            horizontal_accuracy: 5.0,
            vertical_accuracy: 3.0,
            speed: 0.0,
            course: -1.0,
        }
    }
}

impl SensorSource for DeviceMock {
    fn start_updates(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.motion_running.store(true, Ordering::SeqCst);
    }

    fn stop_updates(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.motion_running.store(false, Ordering::SeqCst);
    }

    fn gravity(&self) -> XYZ {
        XYZ::new([0.0, 0.0, -1.0])
    }

    fn user_acceleration(&self) -> XYZ {
        XYZ::new([0.5, -0.25, 0.0])
    }

    fn attitude(&self) -> Attitude {
        Attitude::new(0.0, 0.0, 1.5)
    }

    fn magnetic_field(&self) -> MagneticField {
        MagneticField::new(XYZ::new([20.0, 0.0, -45.0]), 2.0)
    }
}

impl LocationSource for DeviceMock {
    fn is_authorized(&self) -> bool {
        self.authorized
    }

    fn start_updates(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.location_running.store(true, Ordering::SeqCst);
    }

    fn stop_updates(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.location_running.store(false, Ordering::SeqCst);
    }

    fn location(&self) -> Option<Location> {
        self.has_fix
            .load(Ordering::SeqCst)
            .then(DeviceMock::sample_location)
    }
}
