//! Axis-aligned bounding boxes used by the spatial index.

use serde::{Deserialize, Serialize};

use crate::point::Point3;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox {
    /// Create a new bounding box, ordering the corners per axis.
    #[must_use]
    pub fn new(min: Point3, max: Point3) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Box around a single point.
    #[must_use]
    pub const fn from_point(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Point3>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |bounds, p| bounds.expand(&p)))
    }

    /// Get the center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Extent along `axis`.
    #[must_use]
    pub fn spread(&self, axis: usize) -> f32 {
        self.max.axis(axis) - self.min.axis(axis)
    }

    /// Axis with the largest extent (ties favour x, then y).
    #[must_use]
    pub fn widest_axis(&self) -> usize {
        let (x, y, z) = (self.spread(0), self.spread(1), self.spread(2));
        if x >= y && x >= z {
            0
        } else if y >= z {
            1
        } else {
            2
        }
    }

    /// Check if a point is inside the bounding box (inclusive).
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Expand the bounding box to include a point.
    #[must_use]
    pub fn expand(&self, point: &Point3) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(point.x),
                self.min.y.min(point.y),
                self.min.z.min(point.z),
            ),
            max: Point3::new(
                self.max.x.max(point.x),
                self.max.y.max(point.y),
                self.max.z.max(point.z),
            ),
        }
    }

    /// Squared distance from `point` to the nearest point of the box.
    ///
    /// Zero when the point is inside. Computed in `f64`, like
    /// [`Point3::distance_squared`], so the two agree for a degenerate box.
    #[must_use]
    pub fn distance_squared_to(&self, point: &Point3) -> f64 {
        let gap = |axis: usize| {
            let p = f64::from(point.axis(axis));
            let lo = f64::from(self.min.axis(axis));
            let hi = f64::from(self.max.axis(axis));
            if p < lo {
                lo - p
            } else if p > hi {
                p - hi
            } else {
                0.0
            }
        };
        let (dx, dy, dz) = (gap(0), gap(1), gap(2));
        dx * dx + dy * dy + dz * dz
    }

    /// Squared distance from `point` to the farthest corner of the box.
    #[must_use]
    pub fn max_distance_squared_to(&self, point: &Point3) -> f64 {
        let reach = |axis: usize| {
            let p = f64::from(point.axis(axis));
            (p - f64::from(self.min.axis(axis)))
                .abs()
                .max((f64::from(self.max.axis(axis)) - p).abs())
        };
        let (dx, dy, dz) = (reach(0), reach(1), reach(2));
        dx * dx + dy * dy + dz * dz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bounds = BoundingBox::from_points([
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(-2.0, 3.0, 0.5),
            Point3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Point3::new(-2.0, -1.0, -4.0));
        assert_eq!(bounds.max, Point3::new(1.0, 3.0, 0.5));
        assert_eq!(bounds.widest_axis(), 2);
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_distance_to_box() {
        let bounds = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        assert_eq!(bounds.distance_squared_to(&Point3::new(1.0, 1.0, 1.0)), 0.0);
        assert!((bounds.distance_squared_to(&Point3::new(5.0, 1.0, 1.0)) - 9.0).abs() < 1e-6);
        assert!((bounds.distance_squared_to(&Point3::new(3.0, 3.0, 1.0)) - 2.0).abs() < 1e-6);
        assert!((bounds.max_distance_squared_to(&Point3::new(0.0, 0.0, 0.0)) - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_to_box_spanning_f32_range() {
        let bounds = BoundingBox::new(Point3::new(-f32::MAX, 0.0, 0.0), Point3::new(f32::MAX, 0.0, 0.0));
        let far = bounds.max_distance_squared_to(&Point3::new(-f32::MAX, 0.0, 0.0));
        assert!(far.is_finite());
        assert!(far > f64::from(f32::MAX) * f64::from(f32::MAX));
        assert_eq!(bounds.distance_squared_to(&Point3::origin()), 0.0);
    }

    #[test]
    fn test_contains() {
        let bounds = BoundingBox::new(Point3::new(1.0, 1.0, 1.0), Point3::new(-1.0, -1.0, -1.0));
        assert!(bounds.contains(&Point3::origin()));
        assert!(bounds.contains(&Point3::new(1.0, 1.0, 1.0)));
        assert!(!bounds.contains(&Point3::new(1.1, 0.0, 0.0)));
    }
}
