use nalgebra::{Rotation3, Vector3};

use crate::types::XYZ;

/// Device orientation expressed as Tait-Bryan angles in radians.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Attitude {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Attitude {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Rotation taking device coordinates to the reference frame.
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(self.roll, self.pitch, self.yaw)
    }

    /// Expresses a reference frame vector in device coordinates.
    pub fn to_device_frame(&self, reference: &XYZ) -> XYZ {
        let v: Vector3<f64> = self.rotation().inverse() * reference.0;
        XYZ::from_vector(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_level_device_keeps_vector() {
        let attitude = Attitude::default();
        let gravity = XYZ::new([0.0, 0.0, -1.0]);
        let rotated = attitude.to_device_frame(&gravity);
        assert!((rotated.0 - gravity.0).norm() < EPS);
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let attitude = Attitude::new(0.3, -0.2, 1.1);
        let gravity = XYZ::new([0.0, 0.0, -1.0]);
        let rotated = attitude.to_device_frame(&gravity);
        assert!((rotated.norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_roll_quarter_turn() {
        let attitude = Attitude::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0);
        let rotated = attitude.to_device_frame(&XYZ::new([0.0, 0.0, -1.0]));
        assert!((rotated.y() + 1.0).abs() < EPS);
        assert!(rotated.z().abs() < EPS);
    }
}
