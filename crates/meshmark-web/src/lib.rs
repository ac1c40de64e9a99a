//! Meshmark Web - browser bindings for the label editor
//!
//! Exposes [`WebLabelEditor`] to JavaScript. The page owns rendering and
//! raycasting; it hands this module vertex positions once per model and a
//! hit point per click, and gets vertex ids back to recolour.

use meshmark_core::Colour;
use meshmark_labels::{EditorConfig, Label, LabelEditor, LabelError, LabelId, LabelSet, LabelShape};
use meshmark_mesh::Point3;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(error: LabelError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn parse_colour(colour: Option<String>) -> Result<Option<Colour>, JsValue> {
    colour
        .filter(|c| !c.is_empty())
        .map(|c| Colour::from_hex(&c))
        .transpose()
        .map_err(|e| JsValue::from_str(&format!("Invalid colour: {e}")))
}

/// Label row shown in the page's label list.
#[derive(Clone, Debug, PartialEq, Serialize)]
struct LabelSummary {
    id: u32,
    name: String,
    colour: String,
    kind: &'static str,
    vertex_count: usize,
}

impl From<&Label> for LabelSummary {
    fn from(label: &Label) -> Self {
        Self {
            id: label.id().0,
            name: label.name.clone(),
            colour: label.colour.to_hex(),
            kind: match label.shape() {
                LabelShape::Region(_) => "region",
                LabelShape::Point(_) => "point",
            },
            vertex_count: label.vertex_count(),
        }
    }
}

fn summaries(set: &LabelSet) -> Vec<LabelSummary> {
    set.labels().iter().map(LabelSummary::from).collect()
}

/// Label editor state for one model
#[wasm_bindgen]
pub struct WebLabelEditor {
    inner: LabelEditor,
}

#[wasm_bindgen]
impl WebLabelEditor {
    /// Create an editor for `model_name` with an empty label set.
    ///
    /// `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(model_name: &str, model_id: i64, config_json: &str) -> Result<WebLabelEditor, JsValue> {
        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json).map_err(js_error)?
        };
        Ok(Self {
            inner: LabelEditor::new(config, model_name, LabelSet::new(model_name, model_id)),
        })
    }

    /// Index a flat `[x, y, z, ...]` position array. Returns the indexed count.
    pub fn load_mesh(&mut self, positions: &[f32]) -> Result<u32, JsValue> {
        let count = self.inner.load_mesh(positions).map_err(js_error)?;
        web_sys::console::log_1(&format!("Indexed {} vertices", count).into());
        u32::try_from(count).map_err(|_| JsValue::from_str("Too many vertices"))
    }

    /// Replace the current label set with wire JSON from the server.
    pub fn load_label_set(&mut self, json: &str) -> Result<(), JsValue> {
        self.inner.load_json(json).map_err(js_error)?;
        web_sys::console::log_1(
            &format!("Loaded label set with {} labels", self.inner.label_set().len()).into(),
        );
        Ok(())
    }

    /// Wire JSON of the current label set.
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.inner.to_json().map_err(js_error)
    }

    /// Current labels as `[{ id, name, colour, kind, vertex_count }]`.
    pub fn labels(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&summaries(self.inner.label_set()))
            .map_err(|e| JsValue::from_str(&format!("Conversion error: {}", e)))
    }

    /// Create a region label and select it. `colour` is `#RRGGBB[AA]`.
    pub fn create_region_label(&mut self, name: &str, colour: Option<String>) -> Result<u32, JsValue> {
        let colour = parse_colour(colour)?;
        Ok(self.inner.create_region_label(name, colour).0)
    }

    /// Create a point marker at a hit point.
    pub fn create_point_label(
        &mut self,
        name: &str,
        colour: Option<String>,
        x: f32,
        y: f32,
        z: f32,
    ) -> Result<u32, JsValue> {
        let colour = parse_colour(colour)?;
        self.inner
            .create_point_label(name, colour, Point3::new(x, y, z))
            .map(|id| id.0)
            .map_err(js_error)
    }

    /// Remove a label.
    pub fn remove_label(&mut self, id: u32) -> Result<(), JsValue> {
        self.inner.remove_label(LabelId(id)).map(|_| ()).map_err(js_error)
    }

    /// Select the label to paint into.
    pub fn select_label(&mut self, id: u32) -> Result<(), JsValue> {
        self.inner.select_label(LabelId(id)).map_err(js_error)
    }

    /// Set the brush radius.
    pub fn set_brush_radius(&mut self, radius: f32) {
        self.inner.set_brush_radius(radius);
    }

    /// Paint around a hit point. Returns newly painted vertex ids.
    pub fn paint(&mut self, x: f32, y: f32, z: f32) -> Result<Vec<u32>, JsValue> {
        self.inner.paint(Point3::new(x, y, z)).map_err(js_error)
    }

    /// Erase around a hit point. Returns cleared vertex ids.
    pub fn erase(&mut self, x: f32, y: f32, z: f32) -> Result<Vec<u32>, JsValue> {
        self.inner.erase(Point3::new(x, y, z)).map_err(js_error)
    }

    /// Label under a hit point.
    pub fn pick(&self, x: f32, y: f32, z: f32) -> Option<u32> {
        self.inner.pick(Point3::new(x, y, z)).map(|id| id.0)
    }

    /// Vertex ids of a region label, ascending.
    pub fn label_vertices(&self, id: u32) -> Result<Vec<u32>, JsValue> {
        let id = LabelId(id);
        let label = self
            .inner
            .label_set()
            .label(id)
            .ok_or_else(|| js_error(LabelError::LabelNotFound(id)))?;
        label
            .vertices()
            .map(|v| v.as_slice().to_vec())
            .ok_or_else(|| js_error(LabelError::NotARegion(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshmark_core::SortedVertexSet;
    use meshmark_labels::PointMarker;

    #[test]
    fn test_label_summaries() {
        let mut set = LabelSet::new("Skull", 1);
        set.add_region_label_with("Frontal", Colour::RED, "skull", SortedVertexSet::from_unsorted([4, 2]));
        set.add_point_label(
            "Bregma",
            Colour::rgb(0, 255, 0),
            "skull",
            PointMarker::new(Point3::origin(), 0.1),
        );

        let rows = summaries(&set);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, "region");
        assert_eq!(rows[0].vertex_count, 2);
        assert_eq!(rows[0].colour, "#FF0000FF");
        assert_eq!(rows[1].kind, "point");
        assert_eq!(rows[1].id, 1);

        let json = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(json["name"], "Bregma");
        assert_eq!(json["vertex_count"], 0);
    }
}
