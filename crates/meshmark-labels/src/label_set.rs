//! Label sets: every label defined over one model.

use meshmark_core::{Colour, SortedVertexSet, VertexId};
use meshmark_mesh::Point3;
use uuid::Uuid;

use crate::error::{LabelError, LabelResult};
use crate::label::{Label, LabelId, LabelShape, PointMarker};

/// Named collection of labels over one model, in creation order.
///
/// A set with no `uuid` has never been persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSet {
    /// Server-side numeric id.
    pub id: Option<i64>,
    /// Server-side uuid.
    pub uuid: Option<Uuid>,
    /// Model this set annotates.
    pub model_id: i64,
    /// Display name.
    pub name: String,
    labels: Vec<Label>,
    next_label_id: u32,
}

impl LabelSet {
    /// Create an empty, unsaved label set.
    #[must_use]
    pub fn new(name: impl Into<String>, model_id: i64) -> Self {
        Self {
            id: None,
            uuid: None,
            model_id,
            name: name.into(),
            labels: Vec::new(),
            next_label_id: 0,
        }
    }

    /// Check whether the set has been saved at least once.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.uuid.is_some()
    }

    /// Labels in creation order.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the set has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Add an empty region label.
    pub fn add_region_label(
        &mut self,
        name: impl Into<String>,
        colour: Colour,
        model_name: impl Into<String>,
    ) -> LabelId {
        self.push(name.into(), colour, model_name.into(), LabelShape::Region(SortedVertexSet::new()))
    }

    /// Add a region label with existing vertices.
    pub fn add_region_label_with(
        &mut self,
        name: impl Into<String>,
        colour: Colour,
        model_name: impl Into<String>,
        vertices: SortedVertexSet,
    ) -> LabelId {
        self.push(name.into(), colour, model_name.into(), LabelShape::Region(vertices))
    }

    /// Add a point marker label.
    pub fn add_point_label(
        &mut self,
        name: impl Into<String>,
        colour: Colour,
        model_name: impl Into<String>,
        marker: PointMarker,
    ) -> LabelId {
        self.push(name.into(), colour, model_name.into(), LabelShape::Point(marker))
    }

    pub(crate) fn push(&mut self, name: String, colour: Colour, model_name: String, shape: LabelShape) -> LabelId {
        let id = LabelId(self.next_label_id);
        self.next_label_id += 1;
        self.labels.push(Label::new(id, name, colour, model_name, shape));
        id
    }

    /// Append a label under an id assigned earlier, e.g. by a saved copy.
    pub(crate) fn push_with_id(
        &mut self,
        id: LabelId,
        name: String,
        colour: Colour,
        model_name: String,
        shape: LabelShape,
    ) -> LabelResult<LabelId> {
        if self.label(id).is_some() {
            return Err(LabelError::InvalidData(format!("duplicate label id {id}")));
        }
        self.reserve_through(id)?;
        self.labels.push(Label::new(id, name, colour, model_name, shape));
        Ok(id)
    }

    /// Make sure labels created from now on get ids above `id`.
    pub(crate) fn reserve_through(&mut self, id: LabelId) -> LabelResult<()> {
        let next = id
            .0
            .checked_add(1)
            .ok_or_else(|| LabelError::InvalidData(format!("label id {id} out of range")))?;
        self.next_label_id = self.next_label_id.max(next);
        Ok(())
    }

    /// Id the next created label will receive.
    #[must_use]
    pub fn next_label_id(&self) -> LabelId {
        LabelId(self.next_label_id)
    }

    /// Remove a label, returning it.
    pub fn remove_label(&mut self, id: LabelId) -> Option<Label> {
        let at = self.labels.iter().position(|l| l.id() == id)?;
        Some(self.labels.remove(at))
    }

    /// Get a label by id.
    #[must_use]
    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| l.id() == id)
    }

    /// Get a mutable label by id.
    pub fn label_mut(&mut self, id: LabelId) -> Option<&mut Label> {
        self.labels.iter_mut().find(|l| l.id() == id)
    }

    /// Rename a label.
    ///
    /// # Errors
    ///
    /// [`LabelError::LabelNotFound`] for an unknown id.
    pub fn rename(&mut self, id: LabelId, name: impl Into<String>) -> LabelResult<()> {
        let label = self.label_mut(id).ok_or(LabelError::LabelNotFound(id))?;
        label.name = name.into();
        Ok(())
    }

    /// Every region label containing `vertex`, in creation order.
    pub fn labels_at_vertex(&self, vertex: VertexId) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(move |l| l.contains_vertex(vertex))
    }

    /// First region label (creation order) containing `vertex`.
    #[must_use]
    pub fn label_at_vertex(&self, vertex: VertexId) -> Option<&Label> {
        self.labels_at_vertex(vertex).next()
    }

    /// First point marker (creation order) hit by `point`.
    #[must_use]
    pub fn label_at_point(&self, point: &Point3) -> Option<&Label> {
        self.labels.iter().find(|l| l.contains_point(point))
    }

    /// Total number of painted vertices across all regions.
    #[must_use]
    pub fn painted_vertex_count(&self) -> usize {
        self.labels.iter().map(Label::vertex_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_set_is_unsaved() {
        let set = LabelSet::new("Skull", 7);
        assert!(!set.is_persisted());
        assert!(set.is_empty());
        assert_eq!(set.model_id, 7);
    }

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let mut set = LabelSet::new("Skull", 1);
        let a = set.add_region_label("Frontal", Colour::RED, "skull");
        let b = set.add_region_label("Parietal", Colour::RED, "skull");
        assert_ne!(a, b);

        set.remove_label(b).unwrap();
        let c = set.add_region_label("Occipital", Colour::RED, "skull");
        assert_ne!(b, c);
        assert_eq!(set.labels().iter().map(Label::id).collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_lookup_by_vertex_and_point() {
        let mut set = LabelSet::new("Skull", 1);
        let a = set.add_region_label_with("A", Colour::RED, "skull", SortedVertexSet::from_unsorted([1, 2, 3]));
        let b = set.add_region_label_with("B", Colour::RED, "skull", SortedVertexSet::from_unsorted([3, 4]));
        let m = set.add_point_label(
            "Marker",
            Colour::RED,
            "skull",
            PointMarker::new(Point3::new(0.0, 1.0, 0.0), 0.1),
        );

        assert_eq!(set.label_at_vertex(3).map(Label::id), Some(a));
        assert_eq!(set.labels_at_vertex(3).map(Label::id).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(set.label_at_vertex(4).map(Label::id), Some(b));
        assert!(set.label_at_vertex(9).is_none());

        assert_eq!(set.label_at_point(&Point3::new(0.0, 1.05, 0.0)).map(Label::id), Some(m));
        assert!(set.label_at_point(&Point3::origin()).is_none());
        assert_eq!(set.painted_vertex_count(), 5);
    }

    #[test]
    fn test_rename() {
        let mut set = LabelSet::new("Skull", 1);
        let a = set.add_region_label("A", Colour::RED, "skull");
        set.rename(a, "Mandible").unwrap();
        assert_eq!(set.label(a).unwrap().name, "Mandible");
        assert!(matches!(set.rename(LabelId(99), "x"), Err(LabelError::LabelNotFound(LabelId(99)))));
    }
}
