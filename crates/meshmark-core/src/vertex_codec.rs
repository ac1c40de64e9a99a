//! Vertex-set codec: vertex indices <-> transport-safe string.
//!
//! ```text
//!  [3, 300, 65535]
//!      │ encode_word, join ","
//!      ▼
//!  "03,012c,ffff"            ASCII bytes are the LZW symbol stream
//!      │ Compressor::compress_bytes
//!      ▼
//!  [48, 51, 44, ...]         dictionary codes
//!      │ encode_word, join ","
//!      ▼
//!  "30,33,2c,..."            stored in the label's `vertices` field
//! ```
//!
//! The encoding is deterministic, so re-saving an unchanged label produces an
//! identical payload.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{CodecError, CodecResult};
use crate::hex;
use crate::lzw::Compressor;
use crate::membership::{SortedVertexSet, VertexId};

const SEPARATOR: u8 = b',';

/// Encoder/decoder for label vertex lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct VertexCodec {
    compressor: Compressor,
}

impl VertexCodec {
    /// Codec over the byte alphabet with an unbounded code space.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compressor: Compressor::new(),
        }
    }

    /// Codec using a specific compressor configuration.
    #[must_use]
    pub const fn with_compressor(compressor: Compressor) -> Self {
        Self { compressor }
    }

    /// Encode vertex indices into a comma-joined hex-token string.
    ///
    /// An empty list encodes to the empty string.
    ///
    /// # Errors
    ///
    /// Propagates compressor failures (only possible with a fixed code width).
    pub fn encode(&self, vertices: &[VertexId]) -> CodecResult<String> {
        if vertices.is_empty() {
            return Ok(String::new());
        }

        let mut text = String::with_capacity(vertices.len() * 5);
        for (i, vertex) in vertices.iter().enumerate() {
            if i > 0 {
                text.push(SEPARATOR as char);
            }
            hex::push_word(&mut text, *vertex);
        }

        let codes = self.compressor.compress_bytes(text.as_bytes())?;

        let mut out = String::with_capacity(codes.len() * 3);
        for (i, code) in codes.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR as char);
            }
            hex::push_word(&mut out, *code);
        }
        Ok(out)
    }

    /// Encode a membership set.
    ///
    /// # Errors
    ///
    /// See [`VertexCodec::encode`].
    pub fn encode_set(&self, set: &SortedVertexSet) -> CodecResult<String> {
        self.encode(set.as_slice())
    }

    /// Decode a payload back into the exact vertex sequence that was encoded.
    ///
    /// # Errors
    ///
    /// [`CodecError::EmptyToken`] / [`CodecError::MalformedToken`] for a
    /// payload or decompressed text that is not a comma-joined hex list, and
    /// [`CodecError::InvalidCode`] for codes the dictionary cannot resolve.
    pub fn decode(&self, payload: &str) -> CodecResult<Vec<VertexId>> {
        if payload.is_empty() {
            return Ok(Vec::new());
        }

        let codes = parse_tokens(payload.as_bytes())?;
        let text = self.compressor.decompress_bytes(&codes)?;
        parse_tokens(&text)
    }

    /// Decode into a membership set, normalising order and duplicates.
    ///
    /// # Errors
    ///
    /// See [`VertexCodec::decode`].
    pub fn decode_set(&self, payload: &str) -> CodecResult<SortedVertexSet> {
        self.decode(payload).map(SortedVertexSet::from_unsorted)
    }
}

/// Split on commas and decode every token as a hex word.
fn parse_tokens(bytes: &[u8]) -> CodecResult<Vec<u32>> {
    bytes
        .split(|b| *b == SEPARATOR)
        .enumerate()
        .map(|(index, token)| {
            if token.is_empty() {
                return Err(CodecError::EmptyToken { index });
            }
            hex::decode_word_bytes(token).map_err(|cause| CodecError::MalformedToken { index, cause })
        })
        .collect()
}

/// Encode with the default codec.
///
/// # Errors
///
/// See [`VertexCodec::encode`].
pub fn encode_vertices(vertices: &[VertexId]) -> CodecResult<String> {
    VertexCodec::new().encode(vertices)
}

/// Decode with the default codec.
///
/// # Errors
///
/// See [`VertexCodec::decode`].
pub fn decode_vertices(payload: &str) -> CodecResult<Vec<VertexId>> {
    VertexCodec::new().decode(payload)
}
