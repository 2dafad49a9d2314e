// Stand-in for the motion and positioning services of a phone, for hosts with
// no such hardware. Produces plausible, noisy samples of a person walking with
// the phone held roughly level.

mod gaussian;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use telemetry_common::{Attitude, Location, LocationSource, MagneticField, SensorSource, XYZ};

use self::gaussian::GaussianNoise;
use crate::models::errors::DeviceError;

const SAMPLE_PERIOD: Duration = Duration::from_millis(10);
const MAX_STEPS_PER_REFRESH: u32 = 1000;

const ATTITUDE_DRIFT_STDEV: f64 = 0.002;
const MAX_TILT: f64 = 0.35;
const GRAVITY_STDEV: f64 = 0.002;
const USER_ACCELERATION_STDEV: f64 = 0.02;
const MAGNETIC_STDEV: f64 = 0.4;
const COURSE_DRIFT_STDEV: f64 = 0.5;

/// Earth's field in the reference frame, microtesla.
const EARTH_MAGNETIC_FIELD: [f64; 3] = [19.8, 0.0, -44.6];
const GRAVITY_REFERENCE: [f64; 3] = [0.0, 0.0, -1.0];
const MAGNETIC_ACCURACY_HIGH: f64 = 2.0;

const START_LATITUDE: f64 = 52.5200;
const START_LONGITUDE: f64 = 13.4050;
const START_ALTITUDE: f64 = 34.0;
const WALKING_SPEED: f64 = 1.4;
const HORIZONTAL_ACCURACY: f64 = 5.0;
const VERTICAL_ACCURACY: f64 = 3.0;
const METERS_PER_DEGREE: f64 = 111_320.0;

struct SimulationState {
    rng: StdRng,
    last_refresh: Instant,
    attitude: Attitude,
    latitude: f64,
    longitude: f64,
    course: f64,
}

/// Simulated phone implementing both the sensor and the location source.
pub struct SimulatedDevice {
    authorized: bool,
    motion_running: AtomicBool,
    location_running: AtomicBool,
    state: Mutex<SimulationState>,
    attitude_drift: GaussianNoise,
    gravity_noise: GaussianNoise,
    acceleration_noise: GaussianNoise,
    magnetic_noise: GaussianNoise,
    course_drift: GaussianNoise,
}

impl SimulatedDevice {
    /// `authorized` decides whether location updates may be used. A `seed`
    /// makes the generated samples reproducible.
    pub fn new(authorized: bool, seed: Option<u64>) -> Result<Self, DeviceError> {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Ok(Self {
            authorized,
            motion_running: AtomicBool::new(false),
            location_running: AtomicBool::new(false),
            state: Mutex::new(SimulationState {
                rng,
                last_refresh: Instant::now(),
                attitude: Attitude::default(),
                latitude: START_LATITUDE,
                longitude: START_LONGITUDE,
                course: 0.0,
            }),
            attitude_drift: GaussianNoise::new(0.0, ATTITUDE_DRIFT_STDEV)?,
            gravity_noise: GaussianNoise::new(0.0, GRAVITY_STDEV)?,
            acceleration_noise: GaussianNoise::new(0.0, USER_ACCELERATION_STDEV)?,
            magnetic_noise: GaussianNoise::new(0.0, MAGNETIC_STDEV)?,
            course_drift: GaussianNoise::new(0.0, COURSE_DRIFT_STDEV)?,
        })
    }

    fn motion_running(&self) -> bool {
        self.motion_running.load(Ordering::SeqCst)
    }

    /// Runs the simulation forward by the sample periods elapsed since the last call.
    fn with_state<R>(&self, f: impl FnOnce(&mut SimulationState, &Self) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(state.last_refresh);
        let steps = (elapsed.as_nanos() / SAMPLE_PERIOD.as_nanos())
            .min(MAX_STEPS_PER_REFRESH as u128);
        for _ in 0..steps {
            self.step(&mut *state);
        }
        if steps > 0 {
            state.last_refresh = now;
        }
        f(&mut *state, self)
    }

    fn step(&self, state: &mut SimulationState) {
        let rng = &mut state.rng;
        let attitude = &mut state.attitude;
        attitude.roll = self
            .attitude_drift
            .add_noise(rng, attitude.roll)
            .clamp(-MAX_TILT, MAX_TILT);
        attitude.pitch = self
            .attitude_drift
            .add_noise(rng, attitude.pitch)
            .clamp(-MAX_TILT, MAX_TILT);
        attitude.yaw = wrap_angle(self.attitude_drift.add_noise(rng, attitude.yaw));

        if self.location_running.load(Ordering::SeqCst) {
            state.course = self
                .course_drift
                .add_noise(rng, state.course)
                .rem_euclid(360.0);
            let distance = WALKING_SPEED * SAMPLE_PERIOD.as_secs_f64();
            let course = state.course.to_radians();
            state.latitude += distance * course.cos() / METERS_PER_DEGREE;
            state.longitude +=
                distance * course.sin() / (METERS_PER_DEGREE * state.latitude.to_radians().cos());
        }
    }
}

fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::PI;
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

impl SensorSource for SimulatedDevice {
    fn start_updates(&self) {
        info!("Starting simulated motion updates");
        self.motion_running.store(true, Ordering::SeqCst);
    }

    fn stop_updates(&self) {
        info!("Stopping simulated motion updates");
        self.motion_running.store(false, Ordering::SeqCst);
    }

    fn gravity(&self) -> XYZ {
        if !self.motion_running() {
            return XYZ::default();
        }
        self.with_state(|state, device| {
            let gravity = state
                .attitude
                .to_device_frame(&XYZ::new(GRAVITY_REFERENCE));
            XYZ::new(device.gravity_noise.add_noise_xyz(&mut state.rng, gravity.inner()))
        })
    }

    fn user_acceleration(&self) -> XYZ {
        if !self.motion_running() {
            return XYZ::default();
        }
        self.with_state(|state, device| {
            XYZ::new(
                device
                    .acceleration_noise
                    .add_noise_xyz(&mut state.rng, [0.0; 3]),
            )
        })
    }

    fn attitude(&self) -> Attitude {
        if !self.motion_running() {
            return Attitude::default();
        }
        self.with_state(|state, _| state.attitude)
    }

    fn magnetic_field(&self) -> MagneticField {
        if !self.motion_running() {
            return MagneticField::default();
        }
        self.with_state(|state, device| {
            let field = state
                .attitude
                .to_device_frame(&XYZ::new(EARTH_MAGNETIC_FIELD));
            MagneticField::new(
                XYZ::new(device.magnetic_noise.add_noise_xyz(&mut state.rng, field.inner())),
                MAGNETIC_ACCURACY_HIGH,
            )
        })
    }
}

impl LocationSource for SimulatedDevice {
    fn is_authorized(&self) -> bool {
        self.authorized
    }

    fn start_updates(&self) {
        info!("Starting simulated location updates");
        self.location_running.store(true, Ordering::SeqCst);
    }

    fn stop_updates(&self) {
        info!("Stopping simulated location updates");
        self.location_running.store(false, Ordering::SeqCst);
    }

    fn location(&self) -> Option<Location> {
        if !self.authorized || !self.location_running.load(Ordering::SeqCst) {
            return None;
        }
        self.with_state(|state, _| {
            Some(Location {
                longitude: state.longitude,
                latitude: state.latitude,
                altitude: START_ALTITUDE,
                timestamp: unix_timestamp(),
                horizontal_accuracy: HORIZONTAL_ACCURACY,
                vertical_accuracy: VERTICAL_ACCURACY,
                speed: WALKING_SPEED,
                course: state.course,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_device() -> SimulatedDevice {
        let device = SimulatedDevice::new(true, Some(1)).unwrap();
        SensorSource::start_updates(&device);
        LocationSource::start_updates(&device);
        device
    }

    #[test]
    fn test_no_fix_before_start() {
        let device = SimulatedDevice::new(true, Some(1)).unwrap();
        assert!(device.location().is_none());
        assert_eq!(device.gravity(), XYZ::default());
    }

    #[test]
    fn test_unauthorized_device_has_no_fix() {
        let device = SimulatedDevice::new(false, Some(1)).unwrap();
        assert!(!device.is_authorized());
        LocationSource::start_updates(&device);
        assert!(device.location().is_none());
    }

    #[test]
    fn test_gravity_is_unit_vector() {
        let device = running_device();
        for _ in 0..20 {
            let gravity = device.gravity();
            assert!((gravity.norm() - 1.0).abs() < 0.05);
            assert!(gravity.z() < 0.0);
        }
    }

    #[test]
    fn test_magnetic_field_strength() {
        let device = running_device();
        let field = device.magnetic_field();
        let expected = XYZ::new(EARTH_MAGNETIC_FIELD).norm();
        assert!((field.field.norm() - expected).abs() < 5.0);
        assert_eq!(field.accuracy, MAGNETIC_ACCURACY_HIGH);
    }

    #[test]
    fn test_location_near_start() {
        let device = running_device();
        std::thread::sleep(Duration::from_millis(50));
        let location = device.location().unwrap();
        assert!((location.latitude - START_LATITUDE).abs() < 0.01);
        assert!((location.longitude - START_LONGITUDE).abs() < 0.01);
        assert!((0.0..360.0).contains(&location.course));
        assert!(location.timestamp > 0.0);
    }

    #[test]
    fn test_stop_updates() {
        let device = running_device();
        SensorSource::stop_updates(&device);
        LocationSource::stop_updates(&device);
        assert_eq!(device.attitude(), Attitude::default());
        assert!(device.location().is_none());
    }

    #[test]
    fn test_wrap_angle() {
        use std::f64::consts::PI;
        assert!((wrap_angle(PI + 0.5) - (-PI + 0.5)).abs() < 1e-12);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-12);
    }
}
