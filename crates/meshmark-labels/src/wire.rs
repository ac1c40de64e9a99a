//! JSON wire shape exchanged with the label server.
//!
//! ```json
//! {
//!   "id": 12, "name": "Skull", "uuid": "…36 chars…", "model": 3,
//!   "labels": [
//!     { "id": 0, "name": "Frontal", "colour": "#FF0000FF", "vertices": "30,33,2c,…" },
//!     { "id": 2, "name": "Bregma",  "colour": "#00FF00FF", "position": [0, 1, 0], "radius": 0.05 }
//!   ]
//! }
//! ```
//!
//! A label carrying `radius` is a point marker; anything else is a region
//! whose `vertices` field holds the vertex-set codec payload. Label ids are
//! kept across a save and reload; labels without one get fresh ids.

use meshmark_core::{Colour, VertexCodec};
use meshmark_mesh::Point3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LabelError, LabelResult};
use crate::label::{Label, LabelId, LabelShape, PointMarker};
use crate::label_set::LabelSet;

/// Length of a hyphenated uuid on the wire.
pub const UUID_LEN: usize = 36;

/// One label on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireLabel {
    /// Label id within its set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Label name
    pub name: String,
    /// `#RRGGBB` or `#RRGGBBAA`
    pub colour: String,
    /// Encoded region vertices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<String>,
    /// Marker center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    /// Marker radius; its presence marks a point label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

/// A label set on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireLabelSet {
    /// Server-side id
    pub id: Option<i64>,
    /// Set name
    pub name: String,
    /// Server-side uuid
    pub uuid: Option<String>,
    /// Model id
    pub model: i64,
    /// Labels in creation order
    #[serde(default)]
    pub labels: Vec<WireLabel>,
}

impl WireLabel {
    fn from_label(label: &Label, codec: &VertexCodec) -> LabelResult<Self> {
        let colour = label.colour.to_hex();
        Ok(match label.shape() {
            LabelShape::Region(vertices) => Self {
                id: Some(label.id().0),
                name: label.name.clone(),
                colour,
                vertices: Some(codec.encode_set(vertices)?),
                position: None,
                radius: None,
            },
            LabelShape::Point(marker) => Self {
                id: Some(label.id().0),
                name: label.name.clone(),
                colour,
                vertices: None,
                position: Some(marker.position.to_array()),
                radius: Some(marker.radius),
            },
        })
    }
}

fn label_shape(label: &WireLabel, codec: &VertexCodec) -> LabelResult<LabelShape> {
    let Some(radius) = label.radius else {
        let vertices = codec.decode_set(label.vertices.as_deref().unwrap_or_default())?;
        return Ok(LabelShape::Region(vertices));
    };

    let position = label
        .position
        .ok_or_else(|| LabelError::InvalidData(format!("point label {:?} has no position", label.name)))?;
    let marker = PointMarker::new(Point3::from(position), radius);
    if !marker.is_valid() {
        return Err(LabelError::InvalidData(format!(
            "point label {:?} has position {position:?} and radius {radius}",
            label.name
        )));
    }
    Ok(LabelShape::Point(marker))
}

/// Parse a wire uuid, which must be the 36-character hyphenated form.
///
/// # Errors
///
/// [`LabelError::InvalidData`] for any other length or an unparsable uuid.
pub fn parse_uuid(text: &str) -> LabelResult<Uuid> {
    if text.len() != UUID_LEN {
        return Err(LabelError::InvalidData(format!(
            "uuid must be {UUID_LEN} characters, got {}",
            text.len()
        )));
    }
    Uuid::parse_str(text).map_err(|e| LabelError::InvalidData(format!("invalid uuid {text:?}: {e}")))
}

impl LabelSet {
    /// Convert to the wire shape, encoding every region.
    ///
    /// # Errors
    ///
    /// Propagates vertex codec failures.
    pub fn to_wire(&self, codec: &VertexCodec) -> LabelResult<WireLabelSet> {
        let labels = self
            .labels()
            .iter()
            .map(|label| WireLabel::from_label(label, codec))
            .collect::<LabelResult<Vec<_>>>()?;

        Ok(WireLabelSet {
            id: self.id,
            name: self.name.clone(),
            uuid: self.uuid.map(|u| u.hyphenated().to_string()),
            model: self.model_id,
            labels,
        })
    }

    /// Rebuild a set from the wire shape.
    ///
    /// Labels keep their wire ids; labels without one receive fresh ids
    /// above every wire id, in array order. All labels are attributed to
    /// `model_name`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed uuid, colour, marker or vertex payload, and on
    /// duplicate label ids.
    pub fn from_wire(wire: WireLabelSet, model_name: &str, codec: &VertexCodec) -> LabelResult<Self> {
        let mut set = LabelSet::new(wire.name, wire.model);
        set.id = wire.id;
        set.uuid = wire.uuid.as_deref().map(parse_uuid).transpose()?;

        if let Some(max) = wire.labels.iter().filter_map(|l| l.id).max() {
            set.reserve_through(LabelId(max))?;
        }

        for label in wire.labels {
            let colour = Colour::from_hex(&label.colour)?;
            let shape = label_shape(&label, codec)?;
            match label.id {
                Some(id) => {
                    set.push_with_id(LabelId(id), label.name, colour, model_name.to_owned(), shape)?;
                }
                None => {
                    set.push(label.name, colour, model_name.to_owned(), shape);
                }
            }
        }

        Ok(set)
    }

    /// Serialize to wire JSON.
    ///
    /// # Errors
    ///
    /// Propagates codec and serialization failures.
    pub fn to_json(&self) -> LabelResult<String> {
        Ok(serde_json::to_string(&self.to_wire(&VertexCodec::new())?)?)
    }

    /// Parse wire JSON.
    ///
    /// # Errors
    ///
    /// See [`LabelSet::from_wire`]; also fails on invalid JSON.
    pub fn from_json(json: &str, model_name: &str) -> LabelResult<Self> {
        let wire: WireLabelSet = serde_json::from_str(json)?;
        Self::from_wire(wire, model_name, &VertexCodec::new())
    }
}
