//! Persistence collaborator and the editing session built on it.
//!
//! The editor never talks to a server directly; a [`LabelSession`] owns
//! whatever [`LabelTransport`] it was given and moves wire JSON through it.

use std::collections::HashMap;

use meshmark_core::VertexCodec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::editor::LabelEditor;
use crate::error::{LabelResult, TransportError};
use crate::label_set::LabelSet;
use crate::wire::{parse_uuid, WireLabelSet};

// ============================================================================
// Transport
// ============================================================================

/// Identity assigned to a label set when it is published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Server-side numeric id
    pub id: i64,
    /// Server-side uuid
    pub uuid: Uuid,
}

/// Fetch and publish label sets as wire JSON.
pub trait LabelTransport {
    /// Fetch the wire JSON of the set stored under `uuid`.
    fn fetch(&self, uuid: &Uuid) -> Result<String, TransportError>;

    /// Store wire JSON, creating the set or replacing the one it names.
    fn publish(&mut self, json: &str) -> Result<Receipt, TransportError>;
}

/// Transport that keeps published sets in memory.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    sets: HashMap<Uuid, String>,
    next_id: i64,
}

impl InMemoryTransport {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl LabelTransport for InMemoryTransport {
    fn fetch(&self, uuid: &Uuid) -> Result<String, TransportError> {
        self.sets
            .get(uuid)
            .cloned()
            .ok_or_else(|| TransportError::NotFound(uuid.to_string()))
    }

    fn publish(&mut self, json: &str) -> Result<Receipt, TransportError> {
        let mut wire: WireLabelSet =
            serde_json::from_str(json).map_err(|e| TransportError::Rejected(e.to_string()))?;

        let uuid = match wire.uuid.as_deref() {
            Some(text) => parse_uuid(text).map_err(|e| TransportError::Rejected(e.to_string()))?,
            None => Uuid::new_v4(),
        };
        let id = match wire.id {
            Some(id) => id,
            None => {
                self.next_id += 1;
                self.next_id
            }
        };

        wire.id = Some(id);
        wire.uuid = Some(uuid.hyphenated().to_string());
        let stored = serde_json::to_string(&wire).map_err(|e| TransportError::Rejected(e.to_string()))?;
        self.sets.insert(uuid, stored);

        Ok(Receipt { id, uuid })
    }
}

// ============================================================================
// Session
// ============================================================================

/// An editor paired with the transport it saves through.
#[derive(Debug)]
pub struct LabelSession<T> {
    editor: LabelEditor,
    transport: T,
    codec: VertexCodec,
}

impl<T: LabelTransport> LabelSession<T> {
    /// Create a session.
    #[must_use]
    pub fn new(editor: LabelEditor, transport: T) -> Self {
        Self {
            editor,
            transport,
            codec: VertexCodec::new(),
        }
    }

    /// The editor.
    #[must_use]
    pub fn editor(&self) -> &LabelEditor {
        &self.editor
    }

    /// Mutable editor access.
    pub fn editor_mut(&mut self) -> &mut LabelEditor {
        &mut self.editor
    }

    /// The transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch a set and make it the editor's current set.
    ///
    /// # Errors
    ///
    /// Transport failures, invalid JSON or invalid label data.
    pub fn open(&mut self, uuid: &Uuid) -> LabelResult<()> {
        let json = self.transport.fetch(uuid).map_err(|e| {
            warn!(%uuid, error = %e, "Fetch failed");
            e
        })?;
        let wire: WireLabelSet = serde_json::from_str(&json)?;
        let set = LabelSet::from_wire(wire, self.editor.model_name(), &self.codec)?;
        self.editor.replace_label_set(set);
        info!(%uuid, "Opened label set");
        Ok(())
    }

    /// Publish the current set and record the identity it was given.
    ///
    /// # Errors
    ///
    /// Codec, serialization or transport failures. The set is left
    /// unchanged on failure.
    pub fn save(&mut self) -> LabelResult<Receipt> {
        let json = serde_json::to_string(&self.editor.label_set().to_wire(&self.codec)?)?;
        debug!(bytes = json.len(), "Publishing label set");

        let receipt = self.transport.publish(&json).map_err(|e| {
            warn!(error = %e, "Publish failed");
            e
        })?;

        let set = self.editor.label_set_mut();
        set.id = Some(receipt.id);
        set.uuid = Some(receipt.uuid);
        info!(id = receipt.id, uuid = %receipt.uuid, "Saved label set");
        Ok(receipt)
    }
}
