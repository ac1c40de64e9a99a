//! Core geometric types for mesh picking.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A 3D point in model space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Point3 {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Check that every coordinate is finite (no NaN or infinity).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Coordinate along `axis` (0 = x, 1 = y, anything else = z).
    #[must_use]
    pub fn axis(&self, axis: usize) -> f32 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Computed in `f64`: squaring finite `f32` coordinates neither
    /// overflows nor flushes to zero there.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let d = self.to_vector3_f64() - other.to_vector3_f64();
        // Same summation order as the bounding-box distances
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    /// Euclidean distance to another point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn distance(&self, other: &Self) -> f32 {
        libm::sqrt(self.distance_squared(other)) as f32
    }

    /// Convert to nalgebra Vector3.
    #[must_use]
    pub fn to_vector3(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Convert to a double-precision nalgebra Vector3.
    #[must_use]
    pub fn to_vector3_f64(&self) -> Vector3<f64> {
        Vector3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Create from nalgebra Vector3.
    #[must_use]
    pub fn from_vector3(v: &Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Coordinates as an array.
    #[must_use]
    pub const fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(p: [f32; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl From<Point3> for [f32; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}
