//! Static kd-tree over mesh vertices for click-to-label picking.
//!
//! Built once per loaded mesh by recursive median partitioning on the axis of
//! widest spread. Every node records the contiguous range of `order` covered
//! by its subtree, so a node whose box lies entirely inside the query sphere
//! is emitted wholesale without visiting its leaves.
//!
//! ```text
//!   nodes[0]  root      range 0..n
//!    ├─ left            range 0..n/2
//!    │   ├─ leaf        ≤ LEAF_SIZE ids
//!    │   └─ leaf
//!    └─ right           range n/2..n
//! ```
//!
//! Distances are compared squared in `f64`, where the square of any finite
//! `f32` difference neither overflows nor underflows. Queries driven by
//! pointer input never fail: a non-finite center or a non-positive radius
//! yields no vertices.

use crate::bounds::BoundingBox;
use crate::error::MeshResult;
use crate::point::Point3;
use crate::vertex::VertexBuffer;

/// Maximum vertices per leaf.
pub const LEAF_SIZE: usize = 16;

#[derive(Clone, Debug)]
struct Node {
    bounds: BoundingBox,
    start: u32,
    len: u32,
    children: Option<(u32, u32)>,
}

/// Immutable radius / nearest-vertex index over a mesh.
#[derive(Clone, Debug, Default)]
pub struct SpatialIndex {
    points: Vec<Point3>,
    order: Vec<u32>,
    nodes: Vec<Node>,
}

impl SpatialIndex {
    /// Build the index over a vertex buffer.
    ///
    /// Non-finite positions are left out of the tree; they can never lie
    /// within a finite radius of a finite center.
    #[must_use]
    pub fn build(vertices: &VertexBuffer) -> Self {
        let points = vertices.positions().to_vec();
        let mut order: Vec<u32> = vertices
            .iter()
            .filter(|(_, p)| p.is_finite())
            .map(|(id, _)| id)
            .collect();

        let mut nodes = Vec::with_capacity(2 * order.len() / LEAF_SIZE + 1);
        if !order.is_empty() {
            build_node(&mut nodes, &points, &mut order, 0);
        }

        Self {
            points,
            order,
            nodes,
        }
    }

    /// Build directly from a flat `[x, y, z, ...]` position array.
    ///
    /// # Errors
    ///
    /// See [`VertexBuffer::from_flat_positions`].
    pub fn from_flat_positions(flat: &[f32]) -> MeshResult<Self> {
        VertexBuffer::from_flat_positions(flat).map(|buffer| Self::build(&buffer))
    }

    /// Number of vertices held by the index (including non-finite ones).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Number of vertices reachable by queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no vertex is reachable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bounds of all indexed vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.nodes.first().map(|root| root.bounds)
    }

    /// Position of a vertex.
    #[must_use]
    pub fn position(&self, id: u32) -> Option<Point3> {
        self.points.get(id as usize).copied()
    }

    /// Every vertex id whose position lies within `radius` (inclusive) of
    /// `center`, in unspecified order.
    #[must_use]
    pub fn query_radius(&self, center: Point3, radius: f32) -> Vec<u32> {
        let mut out = Vec::new();
        if !center.is_finite() || !(radius > 0.0) || self.nodes.is_empty() {
            return out;
        }

        let limit = f64::from(radius) * f64::from(radius);
        let mut stack = vec![0u32];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];
            if node.bounds.distance_squared_to(&center) > limit {
                continue;
            }
            if node.bounds.max_distance_squared_to(&center) <= limit {
                out.extend_from_slice(self.range(node));
                continue;
            }
            match node.children {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => out.extend(
                    self.range(node)
                        .iter()
                        .copied()
                        .filter(|id| self.points[*id as usize].distance_squared(&center) <= limit),
                ),
            }
        }

        out
    }

    /// Closest vertex to `center` within `max_radius` (inclusive).
    ///
    /// Equidistant candidates resolve to the lowest vertex id. Pass
    /// `f32::INFINITY` for an unbounded search.
    #[must_use]
    pub fn nearest(&self, center: Point3, max_radius: f32) -> Option<u32> {
        if !center.is_finite() || !(max_radius > 0.0) || self.nodes.is_empty() {
            return None;
        }

        let mut best: Option<(f64, u32)> = None;
        let mut limit = f64::from(max_radius) * f64::from(max_radius);
        let mut stack = vec![0u32];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];
            if node.bounds.distance_squared_to(&center) > limit {
                continue;
            }
            match node.children {
                Some((left, right)) => {
                    let dl = self.nodes[left as usize].bounds.distance_squared_to(&center);
                    let dr = self.nodes[right as usize].bounds.distance_squared_to(&center);
                    // Visit the closer child first
                    if dl <= dr {
                        stack.push(right);
                        stack.push(left);
                    } else {
                        stack.push(left);
                        stack.push(right);
                    }
                }
                None => {
                    for &id in self.range(node) {
                        let d = self.points[id as usize].distance_squared(&center);
                        if d > limit {
                            continue;
                        }
                        let better = match best {
                            None => true,
                            Some((bd, bid)) => d < bd || (d == bd && id < bid),
                        };
                        if better {
                            best = Some((d, id));
                            limit = d;
                        }
                    }
                }
            }
        }

        best.map(|(_, id)| id)
    }

    fn range(&self, node: &Node) -> &[u32] {
        let start = node.start as usize;
        &self.order[start..start + node.len as usize]
    }
}

/// Recursively partition `order` and return the index of the created node.
///
/// `offset` is the position of `order[0]` within the full ordering.
fn build_node(nodes: &mut Vec<Node>, points: &[Point3], order: &mut [u32], offset: usize) -> u32 {
    let bounds = order
        .iter()
        .map(|id| points[*id as usize])
        .fold(BoundingBox::from_point(points[order[0] as usize]), |b, p| b.expand(&p));

    let index = nodes.len() as u32;
    nodes.push(Node {
        bounds,
        start: offset as u32,
        len: order.len() as u32,
        children: None,
    });

    if order.len() <= LEAF_SIZE {
        return index;
    }

    let axis = bounds.widest_axis();
    let mid = order.len() / 2;
    order.select_nth_unstable_by(mid, |a, b| {
        points[*a as usize]
            .axis(axis)
            .total_cmp(&points[*b as usize].axis(axis))
    });

    let (left_ids, right_ids) = order.split_at_mut(mid);
    let left = build_node(nodes, points, left_ids, offset);
    let right = build_node(nodes, points, right_ids, offset + mid);
    nodes[index as usize].children = Some((left, right));

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random cloud in `[-10, 10)³`.
    fn cloud(n: usize) -> VertexBuffer {
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = || {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            ((state >> 40) as f32 / (1u64 << 24) as f32) * 20.0 - 10.0
        };
        let mut buffer = VertexBuffer::with_capacity(n);
        for _ in 0..n {
            buffer.push(Point3::new(next(), next(), next()));
        }
        buffer
    }

    fn brute_force(buffer: &VertexBuffer, center: Point3, radius: f32) -> Vec<u32> {
        buffer
            .iter()
            .filter(|(_, p)| p.distance_squared(&center) <= f64::from(radius) * f64::from(radius))
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn test_two_point_mesh() {
        let index = SpatialIndex::from_flat_positions(&[0.0, 0.0, 0.0, 10.0, 0.0, 0.0]).unwrap();

        assert_eq!(index.query_radius(Point3::origin(), 5.0), vec![0]);

        let mut both = index.query_radius(Point3::origin(), 10.0);
        both.sort_unstable();
        assert_eq!(both, vec![0, 1]);
    }

    #[test]
    fn test_matches_brute_force() {
        let buffer = cloud(5000);
        let index = SpatialIndex::build(&buffer);
        assert_eq!(index.len(), 5000);

        for (center, radius) in [
            (Point3::origin(), 1.0),
            (Point3::new(3.0, -2.0, 7.5), 2.5),
            (Point3::new(-9.5, 9.5, -9.5), 4.0),
            (Point3::new(0.1, 0.2, 0.3), 0.05),
            (Point3::new(50.0, 50.0, 50.0), 5.0),
            (Point3::origin(), 100.0),
        ] {
            let mut got = index.query_radius(center, radius);
            got.sort_unstable();
            assert_eq!(got, brute_force(&buffer, center, radius), "center {center:?} r {radius}");
        }
    }

    #[test]
    fn test_malformed_queries_are_empty() {
        let index = SpatialIndex::build(&VertexBuffer::create_test_lattice(5));

        assert!(index.query_radius(Point3::origin(), 0.0).is_empty());
        assert!(index.query_radius(Point3::origin(), -1.0).is_empty());
        assert!(index.query_radius(Point3::origin(), f32::NAN).is_empty());
        assert!(index.query_radius(Point3::new(f32::NAN, 0.0, 0.0), 1.0).is_empty());
        assert!(index.query_radius(Point3::new(0.0, f32::INFINITY, 0.0), 1.0).is_empty());
        assert!(index.query_radius(Point3::new(0.0, 0.0, f32::NEG_INFINITY), 1.0).is_empty());
        assert_eq!(index.nearest(Point3::new(f32::NAN, 0.0, 0.0), 1.0), None);
    }

    #[test]
    fn test_infinite_radius_returns_everything() {
        let index = SpatialIndex::build(&VertexBuffer::create_test_lattice(4));
        assert_eq!(index.query_radius(Point3::origin(), f32::INFINITY).len(), 64);
    }

    #[test]
    fn test_empty_mesh() {
        let index = SpatialIndex::build(&VertexBuffer::new());
        assert!(index.is_empty());
        assert!(index.bounds().is_none());
        assert!(index.query_radius(Point3::origin(), 1.0).is_empty());
        assert_eq!(index.nearest(Point3::origin(), f32::INFINITY), None);
    }

    #[test]
    fn test_non_finite_vertices_are_never_returned() {
        let mut buffer = VertexBuffer::new();
        buffer.push(Point3::new(f32::NAN, 0.0, 0.0));
        buffer.push(Point3::new(0.5, 0.0, 0.0));
        buffer.push(Point3::new(f32::INFINITY, 0.0, 0.0));
        let index = SpatialIndex::build(&buffer);

        assert_eq!(index.vertex_count(), 3);
        assert_eq!(index.len(), 1);
        assert_eq!(index.query_radius(Point3::origin(), f32::INFINITY), vec![1]);
    }

    #[test]
    fn test_nearest() {
        let buffer = cloud(3000);
        let index = SpatialIndex::build(&buffer);

        for center in [Point3::origin(), Point3::new(4.0, -4.0, 1.0), Point3::new(20.0, 0.0, 0.0)] {
            let expected = buffer
                .iter()
                .map(|(id, p)| (p.distance_squared(&center), id))
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
                .map(|(_, id)| id);
            assert_eq!(index.nearest(center, f32::INFINITY), expected);
        }

        // Bounded search misses far vertices
        assert_eq!(index.nearest(Point3::new(100.0, 0.0, 0.0), 1.0), None);
    }

    #[test]
    fn test_nearest_tie_prefers_lowest_id() {
        let index =
            SpatialIndex::from_flat_positions(&[1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(index.nearest(Point3::origin(), 2.0), Some(0));
    }

    #[test]
    fn test_radius_at_large_magnitudes() {
        let index = SpatialIndex::from_flat_positions(&[3.0e19, 0.0, 0.0, 1.0e19, 0.0, 0.0]).unwrap();
        assert_eq!(index.query_radius(Point3::origin(), 2.0e19), vec![1]);

        let mut both = index.query_radius(Point3::origin(), 3.0e19);
        both.sort_unstable();
        assert_eq!(both, vec![0, 1]);

        assert_eq!(index.nearest(Point3::origin(), 2.0e19), Some(1));
        assert_eq!(index.nearest(Point3::new(2.5e19, 0.0, 0.0), 1.0e19), Some(0));

        let extremes = SpatialIndex::from_flat_positions(&[f32::MAX, 0.0, 0.0, -f32::MAX, 0.0, 0.0]).unwrap();
        assert_eq!(extremes.query_radius(Point3::new(f32::MAX, 0.0, 0.0), f32::MAX), vec![0]);
    }

    #[test]
    fn test_radius_at_tiny_magnitudes() {
        let index = SpatialIndex::from_flat_positions(&[1.0e-30, 0.0, 0.0, 1.0e-32, 0.0, 0.0]).unwrap();
        assert_eq!(index.query_radius(Point3::origin(), 1.0e-31), vec![1]);
        assert_eq!(index.nearest(Point3::new(1.0e-30, 0.0, 0.0), 1.0e-31), Some(0));
        assert!(index.query_radius(Point3::new(0.0, 1.0e-30, 0.0), 1.0e-31).is_empty());
    }

    #[test]
    fn test_duplicate_positions() {
        let buffer: VertexBuffer = vec![Point3::new(1.0, 1.0, 1.0); 100].into();
        let index = SpatialIndex::build(&buffer);
        assert_eq!(index.query_radius(Point3::new(1.0, 1.0, 1.0), 0.001).len(), 100);
    }
}
