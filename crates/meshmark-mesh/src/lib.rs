//! Meshmark Mesh - vertex buffers and spatial lookup
//!
//! Builds a static spatial index over a model's vertices at load time and
//! answers the two questions the labelling UI asks on every click:
//!
//! ```text
//!   click ──▶ ray hit (Point3) ──▶ SpatialIndex::query_radius ──▶ brush vertices
//!                               └─▶ SpatialIndex::nearest       ──▶ picked vertex
//! ```
//!
//! The index knows nothing about labels; it maps positions to vertex ids.
//!
//! # Example
//!
//! ```rust
//! use meshmark_mesh::{Point3, SpatialIndex};
//!
//! let index = SpatialIndex::from_flat_positions(&[0.0, 0.0, 0.0, 10.0, 0.0, 0.0]).unwrap();
//! assert_eq!(index.query_radius(Point3::origin(), 5.0), vec![0]);
//! assert_eq!(index.nearest(Point3::new(9.0, 0.0, 0.0), 2.0), Some(1));
//! ```

#![warn(missing_docs)]

pub mod bounds;
pub mod error;
pub mod point;
pub mod spatial;
pub mod vertex;

pub use bounds::BoundingBox;
pub use error::{MeshError, MeshResult};
pub use point::Point3;
pub use spatial::SpatialIndex;
pub use vertex::VertexBuffer;
