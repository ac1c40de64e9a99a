//! Meshmark Labels - label sets, their wire format and the editing session
//!
//! A [`LabelSet`] groups the named, coloured [`Label`]s drawn on one model.
//! Region labels hold a [`meshmark_core::SortedVertexSet`] painted through a
//! [`LabelEditor`]; point labels hold a single [`PointMarker`].
//!
//! # Modules
//!
//! - [`label`] / [`label_set`]: the label model
//! - [`wire`]: JSON shape exchanged with the server
//! - [`editor`]: brush painting, erasing and picking
//! - [`transport`]: injected persistence and [`LabelSession`]
//! - [`quiz`]: questions over a label set
//! - [`config`]: editor tunables
//!
//! # Example
//!
//! ```rust
//! use meshmark_labels::{EditorConfig, LabelEditor, LabelSet};
//! use meshmark_mesh::Point3;
//!
//! let mut editor = LabelEditor::new(EditorConfig::default(), "cube", LabelSet::new("Cube", 1));
//! editor.load_mesh(&[0.0, 0.0, 0.0, 0.01, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
//!
//! let corner = editor.create_region_label("Corner", None);
//! assert_eq!(editor.paint(Point3::origin()).unwrap(), vec![0, 1]);
//! assert_eq!(editor.pick(Point3::new(0.01, 0.0, 0.0)), Some(corner));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod editor;
pub mod error;
pub mod label;
pub mod label_set;
pub mod quiz;
pub mod transport;
pub mod wire;

pub use config::EditorConfig;
pub use editor::LabelEditor;
pub use error::{LabelError, LabelResult, TransportError};
pub use label::{Label, LabelId, LabelShape, PointMarker};
pub use label_set::LabelSet;
pub use quiz::{Quiz, QuizQuestion};
pub use transport::{InMemoryTransport, LabelSession, LabelTransport, Receipt};
pub use wire::{WireLabel, WireLabelSet};
