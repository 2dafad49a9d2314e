use crate::types::{Attitude, Location, MagneticField, XYZ};

/// Motion sensors of the device.
///
/// Getters return the latest sample and are only meaningful between
/// `start_updates` and `stop_updates`.
pub trait SensorSource: Send + Sync {
    fn start_updates(&self);
    fn stop_updates(&self);
    /// Gravity vector in units of g.
    fn gravity(&self) -> XYZ;
    /// Acceleration applied by the user, gravity removed, in units of g.
    fn user_acceleration(&self) -> XYZ;
    fn attitude(&self) -> Attitude;
    fn magnetic_field(&self) -> MagneticField;
}

/// Positioning service of the device.
pub trait LocationSource: Send + Sync {
    /// Returns true if the application may subscribe to location updates.
    fn is_authorized(&self) -> bool;
    fn start_updates(&self);
    fn stop_updates(&self);
    /// Latest fix, or None if no fix is available yet.
    fn location(&self) -> Option<Location>;
}
