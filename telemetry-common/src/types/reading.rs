use serde::Serialize;

use crate::types::{Attitude, Location, MagneticField, XYZ};

const X: &str = "x";
const Y: &str = "y";
const Z: &str = "z";
const ROLL: &str = "roll";
const PITCH: &str = "pitch";
const YAW: &str = "yaw";
const ACCURACY: &str = "accuracy";

const LONGITUDE: &str = "longitude";
const LATITUDE: &str = "latitude";
const ALTITUDE: &str = "altitude";
const TIMESTAMP: &str = "timestamp";
const HORIZONTAL_ACCURACY: &str = "horizontal_accuracy";
const VERTICAL_ACCURACY: &str = "vertical_accuracy";
const SPEED: &str = "speed";
const COURSE: &str = "course";

const GRAVITY_PREFIX: &str = "gravity";
const ACCELERATION_PREFIX: &str = "acceleration";
const ATTITUDE_PREFIX: &str = "attitude";
const MAGNETIC_PREFIX: &str = "magnetic";
const LOCATION_PREFIX: &str = "location";

/// Flat, ordered mapping of field names to numeric values, submitted once as a form body.
///
/// Serializes as a sequence of `(name, value)` pairs so that form encoding keeps field order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TelemetryReading {
    fields: Vec<(String, f64)>,
}

impl TelemetryReading {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn push(&mut self, name: &str, value: f64) -> &mut Self {
        self.fields.push((name.to_string(), value));
        self
    }

    /// Appends every field of `other` as `<prefix>_<name>`.
    pub fn extend_prefixed(&mut self, prefix: &str, other: TelemetryReading) -> &mut Self {
        self.fields.extend(
            other
                .fields
                .into_iter()
                .map(|(name, value)| (format!("{}_{}", prefix, name), value)),
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| *value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merges one sample of every source into the single reading posted per cycle.
    pub fn combined(
        gravity: &XYZ,
        user_acceleration: &XYZ,
        attitude: &Attitude,
        magnetic_field: &MagneticField,
        location: &Location,
    ) -> Self {
        let mut reading = Self::new();
        reading
            .extend_prefixed(GRAVITY_PREFIX, gravity.into())
            .extend_prefixed(ACCELERATION_PREFIX, user_acceleration.into())
            .extend_prefixed(ATTITUDE_PREFIX, attitude.into())
            .extend_prefixed(MAGNETIC_PREFIX, magnetic_field.into())
            .extend_prefixed(LOCATION_PREFIX, location.into());
        reading
    }
}

impl From<&XYZ> for TelemetryReading {
    fn from(value: &XYZ) -> Self {
        let mut reading = Self::new();
        reading.push(X, value.x()).push(Y, value.y()).push(Z, value.z());
        reading
    }
}

impl From<&Attitude> for TelemetryReading {
    fn from(value: &Attitude) -> Self {
        let mut reading = Self::new();
        reading
            .push(ROLL, value.roll)
            .push(PITCH, value.pitch)
            .push(YAW, value.yaw);
        reading
    }
}

impl From<&MagneticField> for TelemetryReading {
    fn from(value: &MagneticField) -> Self {
        let mut reading = TelemetryReading::from(&value.field);
        reading.push(ACCURACY, value.accuracy);
        reading
    }
}

impl From<&Location> for TelemetryReading {
    fn from(value: &Location) -> Self {
        let mut reading = Self::new();
        reading
            .push(LONGITUDE, value.longitude)
            .push(LATITUDE, value.latitude)
            .push(ALTITUDE, value.altitude)
            .push(TIMESTAMP, value.timestamp)
            .push(HORIZONTAL_ACCURACY, value.horizontal_accuracy)
            .push(VERTICAL_ACCURACY, value.vertical_accuracy)
            .push(SPEED, value.speed)
            .push(COURSE, value.course);
        reading
    }
}
