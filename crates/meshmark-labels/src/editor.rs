//! Interactive label editor.
//!
//! Ties the current [`LabelSet`] to the loaded mesh's [`SpatialIndex`]:
//!
//! ```text
//!   paint(hit)  ─▶ query_radius(hit, brush) ─▶ insert into active region
//!   erase(hit)  ─▶ query_radius(hit, brush) ─▶ remove from active region
//!   pick(hit)   ─▶ nearest(hit, pick)       ─▶ first region holding vertex
//!                                           └▶ else first marker hit
//! ```

use meshmark_core::{Colour, VertexCodec};
use meshmark_mesh::{Point3, SpatialIndex, VertexBuffer};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::{LabelError, LabelResult};
use crate::label::{Label, LabelId, PointMarker};
use crate::label_set::LabelSet;

/// Editing state for one model.
#[derive(Debug)]
pub struct LabelEditor {
    config: EditorConfig,
    model_name: String,
    label_set: LabelSet,
    index: Option<SpatialIndex>,
    active: Option<LabelId>,
    codec: VertexCodec,
}

impl LabelEditor {
    /// Create an editor over `label_set` for the named model.
    #[must_use]
    pub fn new(config: EditorConfig, model_name: impl Into<String>, label_set: LabelSet) -> Self {
        Self {
            config: config.sanitized(),
            model_name: model_name.into(),
            label_set,
            index: None,
            active: None,
            codec: VertexCodec::new(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config.sanitized();
    }

    /// Set the paint brush radius.
    pub fn set_brush_radius(&mut self, radius: f32) {
        self.config = self.config.with_brush_radius(radius);
    }

    /// Name of the model being labelled.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Build the spatial index from a flat `[x, y, z, ...]` array.
    ///
    /// Returns the number of indexed vertices.
    ///
    /// # Errors
    ///
    /// [`LabelError::Mesh`] for a malformed position buffer.
    pub fn load_mesh(&mut self, flat_positions: &[f32]) -> LabelResult<usize> {
        let buffer = VertexBuffer::from_flat_positions(flat_positions)?;
        Ok(self.set_mesh(&buffer))
    }

    /// Build the spatial index from a vertex buffer.
    pub fn set_mesh(&mut self, vertices: &VertexBuffer) -> usize {
        let index = SpatialIndex::build(vertices);
        let count = index.len();
        debug!(
            model = %self.model_name,
            vertices = vertices.len(),
            indexed = count,
            "Built spatial index"
        );
        self.index = Some(index);
        count
    }

    /// Check if a mesh has been loaded.
    #[must_use]
    pub fn has_mesh(&self) -> bool {
        self.index.is_some()
    }

    /// Current label set.
    #[must_use]
    pub fn label_set(&self) -> &LabelSet {
        &self.label_set
    }

    /// Mutable access to the current label set.
    pub fn label_set_mut(&mut self) -> &mut LabelSet {
        &mut self.label_set
    }

    /// Replace the label set wholesale, returning the previous one.
    ///
    /// The active label is cleared.
    pub fn replace_label_set(&mut self, label_set: LabelSet) -> LabelSet {
        info!(
            name = %label_set.name,
            labels = label_set.len(),
            persisted = label_set.is_persisted(),
            "Replacing label set"
        );
        self.active = None;
        std::mem::replace(&mut self.label_set, label_set)
    }

    /// Load wire JSON, replacing the current set.
    ///
    /// # Errors
    ///
    /// See [`LabelSet::from_wire`].
    pub fn load_json(&mut self, json: &str) -> LabelResult<()> {
        let wire = serde_json::from_str(json)?;
        let set = LabelSet::from_wire(wire, &self.model_name, &self.codec)?;
        self.replace_label_set(set);
        Ok(())
    }

    /// Serialize the current set to wire JSON.
    ///
    /// # Errors
    ///
    /// Propagates codec and serialization failures.
    pub fn to_json(&self) -> LabelResult<String> {
        Ok(serde_json::to_string(&self.label_set.to_wire(&self.codec)?)?)
    }

    /// Create an empty region label and make it active.
    pub fn create_region_label(&mut self, name: impl Into<String>, colour: Option<Colour>) -> LabelId {
        let colour = colour.unwrap_or(self.config.default_colour);
        let id = self.label_set.add_region_label(name, colour, self.model_name.clone());
        debug!(label = %id, "Created region label");
        self.active = Some(id);
        id
    }

    /// Create a point marker at `position` with the configured pick radius.
    ///
    /// # Errors
    ///
    /// [`LabelError::InvalidData`] for a non-finite position.
    pub fn create_point_label(
        &mut self,
        name: impl Into<String>,
        colour: Option<Colour>,
        position: Point3,
    ) -> LabelResult<LabelId> {
        if !position.is_finite() {
            return Err(LabelError::InvalidData(format!("marker position {position:?} is not finite")));
        }
        let colour = colour.unwrap_or(self.config.default_colour);
        let marker = PointMarker::new(position, self.config.pick_radius);
        let id = self.label_set.add_point_label(name, colour, self.model_name.clone(), marker);
        debug!(label = %id, "Created point label");
        Ok(id)
    }

    /// Remove a label; clears the selection if it was active.
    ///
    /// # Errors
    ///
    /// [`LabelError::LabelNotFound`] for an unknown id.
    pub fn remove_label(&mut self, id: LabelId) -> LabelResult<Label> {
        let label = self.label_set.remove_label(id).ok_or(LabelError::LabelNotFound(id))?;
        if self.active == Some(id) {
            self.active = None;
        }
        Ok(label)
    }

    /// Make a label the paint target.
    ///
    /// # Errors
    ///
    /// [`LabelError::LabelNotFound`] for an unknown id.
    pub fn select_label(&mut self, id: LabelId) -> LabelResult<()> {
        if self.label_set.label(id).is_none() {
            warn!(label = %id, "Selecting unknown label");
            return Err(LabelError::LabelNotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.active = None;
    }

    /// Currently selected label.
    #[must_use]
    pub fn active_label(&self) -> Option<&Label> {
        self.active.and_then(|id| self.label_set.label(id))
    }

    /// Add every vertex within the brush radius of `center` to the active
    /// region. Returns the newly added vertices in ascending order.
    ///
    /// A non-finite `center` paints nothing.
    ///
    /// # Errors
    ///
    /// [`LabelError::NoMesh`], [`LabelError::NoActiveLabel`], or
    /// [`LabelError::NotARegion`] if the active label is a point marker.
    pub fn paint(&mut self, center: Point3) -> LabelResult<Vec<u32>> {
        self.stroke(center, true)
    }

    /// Remove every vertex within the brush radius of `center` from the
    /// active region. Returns the removed vertices in ascending order.
    ///
    /// # Errors
    ///
    /// As for [`LabelEditor::paint`].
    pub fn erase(&mut self, center: Point3) -> LabelResult<Vec<u32>> {
        self.stroke(center, false)
    }

    fn stroke(&mut self, center: Point3, add: bool) -> LabelResult<Vec<u32>> {
        let index = self.index.as_ref().ok_or(LabelError::NoMesh)?;
        let id = self.active.ok_or(LabelError::NoActiveLabel)?;
        let label = self.label_set.label_mut(id).ok_or(LabelError::LabelNotFound(id))?;
        if !label.is_region() {
            return Err(LabelError::NotARegion(id));
        }

        let mut candidates = index.query_radius(center, self.config.brush_radius);
        candidates.sort_unstable();

        let mut changed = Vec::with_capacity(candidates.len());
        for vertex in candidates {
            let hit = if add {
                label.insert_vertex(vertex)?
            } else {
                label.remove_vertex(vertex)?
            };
            if hit {
                changed.push(vertex);
            }
        }

        debug!(
            label = %id,
            changed = changed.len(),
            total = label.vertex_count(),
            mode = if add { "paint" } else { "erase" },
            "Brush stroke"
        );
        Ok(changed)
    }

    /// Nearest vertex within the pick radius of `center`.
    #[must_use]
    pub fn pick_vertex(&self, center: Point3) -> Option<u32> {
        self.index.as_ref()?.nearest(center, self.config.pick_radius)
    }

    /// Label under `center`: the first region holding the picked vertex,
    /// otherwise the first point marker containing `center`.
    #[must_use]
    pub fn pick(&self, center: Point3) -> Option<LabelId> {
        if let Some(label) = self.pick_vertex(center).and_then(|v| self.label_set.label_at_vertex(v)) {
            return Some(label.id());
        }
        self.label_set.label_at_point(&center).map(Label::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two points ten units apart plus a 0.1-spaced row along x.
    fn editor() -> LabelEditor {
        let mut editor = LabelEditor::new(
            EditorConfig::default().with_brush_radius(0.15).with_pick_radius(0.05),
            "bar",
            LabelSet::new("Bar", 1),
        );
        let mut buffer = VertexBuffer::new();
        for i in 0..11 {
            buffer.push(Point3::new(i as f32 * 0.1, 0.0, 0.0));
        }
        buffer.push(Point3::new(10.0, 0.0, 0.0));
        editor.set_mesh(&buffer);
        editor
    }

    #[test]
    fn test_paint_adds_brush_vertices() {
        let mut editor = editor();
        let id = editor.create_region_label("Left", None);

        assert_eq!(editor.paint(Point3::new(0.0, 0.0, 0.0)).unwrap(), vec![0, 1]);
        // Overlapping stroke only reports new vertices
        assert_eq!(editor.paint(Point3::new(0.2, 0.0, 0.0)).unwrap(), vec![2, 3]);

        let label = editor.label_set().label(id).unwrap();
        assert_eq!(label.vertices().unwrap().as_slice(), &[0, 1, 2, 3]);
        assert_eq!(label.colour, Colour::RED);
    }

    #[test]
    fn test_erase() {
        let mut editor = editor();
        editor.create_region_label("Left", None);
        editor.paint(Point3::new(0.2, 0.0, 0.0)).unwrap();
        assert_eq!(editor.erase(Point3::new(0.3, 0.0, 0.0)).unwrap(), vec![2, 3]);
        assert_eq!(editor.active_label().unwrap().vertices().unwrap().as_slice(), &[1]);
    }

    #[test]
    fn test_paint_requires_mesh_and_selection() {
        let mut editor = LabelEditor::new(EditorConfig::default(), "bar", LabelSet::new("Bar", 1));
        assert!(matches!(editor.paint(Point3::origin()), Err(LabelError::NoMesh)));

        let mut editor = self::editor();
        assert!(matches!(editor.paint(Point3::origin()), Err(LabelError::NoActiveLabel)));

        let marker = editor.create_point_label("Tip", None, Point3::new(10.0, 0.0, 0.0)).unwrap();
        editor.select_label(marker).unwrap();
        assert!(matches!(editor.paint(Point3::origin()), Err(LabelError::NotARegion(_))));
    }

    #[test]
    fn test_malformed_click_paints_nothing() {
        let mut editor = editor();
        editor.create_region_label("Left", None);
        assert!(editor.paint(Point3::new(f32::NAN, 0.0, 0.0)).unwrap().is_empty());
        assert_eq!(editor.active_label().unwrap().vertex_count(), 0);
    }

    #[test]
    fn test_pick() {
        let mut editor = editor();
        let left = editor.create_region_label("Left", None);
        editor.paint(Point3::origin()).unwrap();
        let tip = editor.create_point_label("Tip", Some(Colour::rgb(0, 0, 255)), Point3::new(5.0, 0.0, 0.0)).unwrap();

        assert_eq!(editor.pick_vertex(Point3::new(0.11, 0.0, 0.0)), Some(1));
        assert_eq!(editor.pick(Point3::new(0.11, 0.0, 0.0)), Some(left));
        assert_eq!(editor.pick(Point3::new(0.5, 0.0, 0.0)), None);
        assert_eq!(editor.pick(Point3::new(5.01, 0.0, 0.0)), Some(tip));
        assert_eq!(editor.pick(Point3::new(f32::INFINITY, 0.0, 0.0)), None);
    }

    #[test]
    fn test_replace_and_round_trip_json() {
        let mut editor = editor();
        editor.create_region_label("Left", None);
        editor.paint(Point3::new(0.5, 0.0, 0.0)).unwrap();
        let json = editor.to_json().unwrap();

        let previous = editor.replace_label_set(LabelSet::new("Other", 2));
        assert_eq!(previous.len(), 1);
        assert!(editor.active_label().is_none());
        assert!(editor.label_set().is_empty());

        editor.load_json(&json).unwrap();
        assert_eq!(editor.label_set(), &previous);
    }

    #[test]
    fn test_remove_active_label_clears_selection() {
        let mut editor = editor();
        let id = editor.create_region_label("Left", None);
        editor.remove_label(id).unwrap();
        assert!(editor.active_label().is_none());
        assert!(matches!(editor.remove_label(id), Err(LabelError::LabelNotFound(_))));
        assert!(matches!(editor.select_label(id), Err(LabelError::LabelNotFound(_))));
    }

    #[test]
    fn test_load_mesh_rejects_partial_triples() {
        let mut editor = LabelEditor::new(EditorConfig::default(), "bar", LabelSet::new("Bar", 1));
        assert!(matches!(editor.load_mesh(&[0.0; 4]), Err(LabelError::Mesh(_))));
        assert_eq!(editor.load_mesh(&[0.0; 6]).unwrap(), 2);
        assert!(editor.has_mesh());
    }
}
