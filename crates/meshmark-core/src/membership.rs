//! Sorted, duplicate-free vertex membership set.
//!
//! Backs the vertex list of a region label. The only way to mutate the set is
//! through [`SortedVertexSet::insert`] / [`SortedVertexSet::remove`], so the
//! ascending-without-duplicates invariant cannot be broken by callers.

use alloc::vec::Vec;
use core::fmt;

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Vertex index within a mesh.
pub type VertexId = u32;

/// Ascending, duplicate-free sequence of vertex indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SortedVertexSet {
    vertices: Vec<VertexId>,
}

impl SortedVertexSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Create an empty set with room for `capacity` vertices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Build a set from vertices in any order; duplicates are dropped.
    pub fn from_unsorted<I: IntoIterator<Item = VertexId>>(vertices: I) -> Self {
        let mut vertices: Vec<VertexId> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices }
    }

    /// Binary search over the half-open range `[lo, hi)`.
    ///
    /// `Ok(index)` when found, otherwise `Err(insertion_point)`.
    fn search(&self, vertex: VertexId) -> Result<usize, usize> {
        let mut lo = 0;
        let mut hi = self.vertices.len();
        while lo < hi {
            // Lower midpoint
            let mid = lo + (hi - lo) / 2;
            match self.vertices[mid].cmp(&vertex) {
                core::cmp::Ordering::Equal => return Ok(mid),
                core::cmp::Ordering::Less => lo = mid + 1,
                core::cmp::Ordering::Greater => hi = mid,
            }
        }
        Err(lo)
    }

    /// Exact position of `vertex`, if present.
    #[must_use]
    pub fn position(&self, vertex: VertexId) -> Option<usize> {
        self.search(vertex).ok()
    }

    /// Membership test in `O(log n)`.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.search(vertex).is_ok()
    }

    /// Insert `vertex` at its sorted position.
    ///
    /// Returns `false` (and leaves the set untouched) if it was already present.
    pub fn insert(&mut self, vertex: VertexId) -> bool {
        match self.search(vertex) {
            Ok(_) => false,
            Err(at) => {
                self.vertices.insert(at, vertex);
                true
            }
        }
    }

    /// Remove `vertex`. Returns `false` if it was not present.
    pub fn remove(&mut self, vertex: VertexId) -> bool {
        match self.search(vertex) {
            Ok(at) => {
                self.vertices.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Remove every vertex.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Vertices in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().copied()
    }

    /// Smallest vertex.
    #[must_use]
    pub fn first(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    /// Largest vertex.
    #[must_use]
    pub fn last(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    /// Check whether the two sets share at least one vertex.
    ///
    /// Linear merge walk over both sorted sequences.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self.vertices.iter(), other.vertices.iter());
        let (mut x, mut y) = (a.next(), b.next());
        while let (Some(l), Some(r)) = (x, y) {
            match l.cmp(r) {
                core::cmp::Ordering::Equal => return true,
                core::cmp::Ordering::Less => x = a.next(),
                core::cmp::Ordering::Greater => y = b.next(),
            }
        }
        false
    }

    /// Consume the set, returning the sorted vertices.
    #[must_use]
    pub fn into_vec(self) -> Vec<VertexId> {
        self.vertices
    }
}

impl Extend<VertexId> for SortedVertexSet {
    fn extend<I: IntoIterator<Item = VertexId>>(&mut self, iter: I) {
        let before = self.vertices.len();
        self.vertices.extend(iter);
        if self.vertices.len() != before {
            self.vertices.sort_unstable();
            self.vertices.dedup();
        }
    }
}

impl FromIterator<VertexId> for SortedVertexSet {
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        Self::from_unsorted(iter)
    }
}

impl<'a> IntoIterator for &'a SortedVertexSet {
    type Item = &'a VertexId;
    type IntoIter = core::slice::Iter<'a, VertexId>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

impl Serialize for SortedVertexSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.vertices.len()))?;
        for vertex in &self.vertices {
            seq.serialize_element(vertex)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for SortedVertexSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = SortedVertexSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of vertex indices")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut vertices = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(vertex) = seq.next_element::<VertexId>()? {
                    vertices.push(vertex);
                }
                Ok(SortedVertexSet::from_unsorted(vertices))
            }
        }

        deserializer.deserialize_seq(SetVisitor)
    }
}
