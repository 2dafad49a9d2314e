/// Location fix as reported by the positioning service.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Location {
    /// Degrees
    pub longitude: f64,
    /// Degrees
    pub latitude: f64,
    /// Meters above sea level
    pub altitude: f64,
    /// Seconds since the unix epoch
    pub timestamp: f64,
    /// Meters
    pub horizontal_accuracy: f64,
    /// Meters
    pub vertical_accuracy: f64,
    /// Meters per second
    pub speed: f64,
    /// Degrees clockwise from north
    pub course: f64,
}
