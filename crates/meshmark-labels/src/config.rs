//! Editor configuration.

use meshmark_core::Colour;
use serde::{Deserialize, Serialize};

use crate::error::LabelResult;

/// Smallest accepted brush / pick radius.
pub const MIN_RADIUS: f32 = 1e-4;

/// Largest accepted brush / pick radius.
pub const MAX_RADIUS: f32 = 1e3;

/// Default paint brush radius (model units).
pub const DEFAULT_BRUSH_RADIUS: f32 = 0.05;

/// Default pick radius (model units).
pub const DEFAULT_PICK_RADIUS: f32 = 0.02;

/// Tunables for interactive labelling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Radius painted or erased around each click.
    pub brush_radius: f32,
    /// Radius used to pick a vertex or point marker.
    pub pick_radius: f32,
    /// Colour given to new labels.
    pub default_colour: Colour,
}

impl EditorConfig {
    /// Parse from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON or an invalid colour string.
    pub fn from_json(json: &str) -> LabelResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace non-finite radii with defaults and clamp to the accepted range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            brush_radius: sanitize_radius(self.brush_radius, DEFAULT_BRUSH_RADIUS),
            pick_radius: sanitize_radius(self.pick_radius, DEFAULT_PICK_RADIUS),
            default_colour: self.default_colour,
        }
    }

    /// Set the brush radius.
    #[must_use]
    pub fn with_brush_radius(mut self, radius: f32) -> Self {
        self.brush_radius = sanitize_radius(radius, DEFAULT_BRUSH_RADIUS);
        self
    }

    /// Set the pick radius.
    #[must_use]
    pub fn with_pick_radius(mut self, radius: f32) -> Self {
        self.pick_radius = sanitize_radius(radius, DEFAULT_PICK_RADIUS);
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            brush_radius: DEFAULT_BRUSH_RADIUS,
            pick_radius: DEFAULT_PICK_RADIUS,
            default_colour: Colour::RED,
        }
    }
}

pub(crate) fn sanitize_radius(radius: f32, fallback: f32) -> f32 {
    if radius.is_finite() {
        radius.clamp(MIN_RADIUS, MAX_RADIUS)
    } else {
        fallback
    }
}
