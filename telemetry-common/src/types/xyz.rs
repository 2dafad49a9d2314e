use nalgebra::Vector3;

pub const N_XYZ_COORDINATES: usize = 3;

/// Three axis vector reading (gravity, user acceleration, magnetic field).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct XYZ(pub Vector3<f64>);

impl XYZ {
    pub fn new(data: [f64; N_XYZ_COORDINATES]) -> Self {
        Self(Vector3::from(data))
    }

    pub fn from_vector(data: Vector3<f64>) -> Self {
        Self(data)
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn inner(&self) -> [f64; N_XYZ_COORDINATES] {
        [self.0.x, self.0.y, self.0.z]
    }

    /// Euclidean norm of the vector
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let data = [1.0, 2.0, 3.0];
        let xyz = XYZ::new(data);
        assert_eq!(xyz.inner(), data);
        assert_eq!((xyz.x(), xyz.y(), xyz.z()), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_norm() {
        let xyz = XYZ::new([3.0, 4.0, 0.0]);
        assert!((xyz.norm() - 5.0).abs() < 1e-12);
    }
}
