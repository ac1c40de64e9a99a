//! Mesh vertex buffers.
//!
//! The renderer hands over a flat `[x0, y0, z0, x1, y1, z1, ...]` position
//! array when a model loads; the vertex id of a position is its triple index.

use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::error::{MeshError, MeshResult};
use crate::point::Point3;

/// Buffer of mesh vertex positions, indexed by vertex id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VertexBuffer {
    positions: Vec<Point3>,
}

impl VertexBuffer {
    /// Create a new empty vertex buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    /// Create with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
        }
    }

    /// Build from a flat position array.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidPositionBuffer`] if the length is not a multiple
    /// of 3, [`MeshError::TooManyVertices`] if ids would overflow `u32`.
    pub fn from_flat_positions(flat: &[f32]) -> MeshResult<Self> {
        if flat.len() % 3 != 0 {
            return Err(MeshError::InvalidPositionBuffer { len: flat.len() });
        }
        let count = flat.len() / 3;
        if u32::try_from(count).is_err() {
            return Err(MeshError::TooManyVertices { count });
        }

        let positions = flat
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self { positions })
    }

    /// Add a vertex, returning its id.
    pub fn push(&mut self, position: Point3) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Get the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get a vertex position by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<Point3> {
        self.positions.get(id as usize).copied()
    }

    /// All positions in id order.
    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Iterate over `(id, position)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Point3)> + '_ {
        self.positions.iter().enumerate().map(|(i, p)| (i as u32, *p))
    }

    /// Bounds of all finite positions.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.positions.iter().copied().filter(Point3::is_finite))
    }

    /// Create a regular `resolution³` lattice in the unit cube for testing.
    #[must_use]
    pub fn create_test_lattice(resolution: u32) -> Self {
        let n = resolution.max(1);
        let step = if n > 1 { 1.0 / (n - 1) as f32 } else { 0.0 };
        let mut buffer = Self::with_capacity((n * n * n) as usize);

        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    buffer.push(Point3::new(x as f32 * step, y as f32 * step, z as f32 * step));
                }
            }
        }

        buffer
    }
}

impl From<Vec<Point3>> for VertexBuffer {
    fn from(positions: Vec<Point3>) -> Self {
        Self { positions }
    }
}
