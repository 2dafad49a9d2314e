use crate::types::XYZ;

/// Calibrated magnetic field in microtesla, with the platform accuracy level.
///
/// Accuracy follows the platform convention: -1 uncalibrated, 0 low, 1 medium, 2 high.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MagneticField {
    pub field: XYZ,
    pub accuracy: f64,
}

impl MagneticField {
    pub fn new(field: XYZ, accuracy: f64) -> Self {
        Self { field, accuracy }
    }
}
