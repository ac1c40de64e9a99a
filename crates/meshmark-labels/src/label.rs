//! Labels: a named, coloured region or point marker on a model.

use std::fmt;

use meshmark_core::{Colour, SortedVertexSet, VertexId};
use meshmark_mesh::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{LabelError, LabelResult};

/// Label identifier, unique within its label set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelId(pub u32);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spherical marker placed at a point on the model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    /// Marker center in model space.
    pub position: Point3,
    /// Hit radius.
    pub radius: f32,
}

impl PointMarker {
    /// Create a new marker.
    #[must_use]
    pub const fn new(position: Point3, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Check that the marker can be hit: finite center, finite positive radius.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }

    /// Check whether `point` falls within the marker (inclusive).
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        point.is_finite()
            && self.radius > 0.0
            && self.position.distance_squared(point) <= f64::from(self.radius) * f64::from(self.radius)
    }
}

/// What a label covers.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelShape {
    /// A painted set of mesh vertices
    Region(SortedVertexSet),
    /// A single marker
    Point(PointMarker),
}

/// A named annotation on a model.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    id: LabelId,
    /// Display name.
    pub name: String,
    /// Display colour.
    pub colour: Colour,
    /// Name of the model the label was drawn on.
    pub model_name: String,
    shape: LabelShape,
}

impl Label {
    pub(crate) fn new(id: LabelId, name: String, colour: Colour, model_name: String, shape: LabelShape) -> Self {
        Self {
            id,
            name,
            colour,
            model_name,
            shape,
        }
    }

    /// Label id.
    #[must_use]
    pub fn id(&self) -> LabelId {
        self.id
    }

    /// Region or point shape.
    #[must_use]
    pub fn shape(&self) -> &LabelShape {
        &self.shape
    }

    /// Check if this is a painted region.
    #[must_use]
    pub fn is_region(&self) -> bool {
        matches!(self.shape, LabelShape::Region(_))
    }

    /// Region vertices, `None` for point markers.
    #[must_use]
    pub fn vertices(&self) -> Option<&SortedVertexSet> {
        match &self.shape {
            LabelShape::Region(vertices) => Some(vertices),
            LabelShape::Point(_) => None,
        }
    }

    /// Point marker, `None` for regions.
    #[must_use]
    pub fn marker(&self) -> Option<&PointMarker> {
        match &self.shape {
            LabelShape::Point(marker) => Some(marker),
            LabelShape::Region(_) => None,
        }
    }

    /// Number of region vertices (zero for point markers).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices().map_or(0, SortedVertexSet::len)
    }

    /// Membership test against the region.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices().is_some_and(|v| v.contains(vertex))
    }

    /// Hit test against the point marker.
    #[must_use]
    pub fn contains_point(&self, point: &Point3) -> bool {
        self.marker().is_some_and(|m| m.contains(point))
    }

    /// Add a vertex to the region.
    ///
    /// Returns whether the vertex was newly added.
    ///
    /// # Errors
    ///
    /// [`LabelError::NotARegion`] for point markers.
    pub fn insert_vertex(&mut self, vertex: VertexId) -> LabelResult<bool> {
        Ok(self.region_mut()?.insert(vertex))
    }

    /// Remove a vertex from the region.
    ///
    /// # Errors
    ///
    /// [`LabelError::NotARegion`] for point markers.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> LabelResult<bool> {
        Ok(self.region_mut()?.remove(vertex))
    }

    fn region_mut(&mut self) -> LabelResult<&mut SortedVertexSet> {
        match &mut self.shape {
            LabelShape::Region(vertices) => Ok(vertices),
            LabelShape::Point(_) => Err(LabelError::NotARegion(self.id)),
        }
    }
}
