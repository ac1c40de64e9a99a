//! Meshmark Core - `no_std` codecs and collections for mesh labels
//!
//! This crate holds the encoding core behind mesh region labels: the
//! order-independent vertex membership set edited while painting, and the
//! compact string form a label's vertices take on the wire. It is designed
//! to work without the standard library (WASM front-ends) as well as with it.
//!
//! # Modules
//!
//! - [`hex`]: fixed-width byte / word hex rendering
//! - [`lzw`]: dictionary compressor over a finite alphabet
//! - [`vertex_codec`]: vertex list <-> comma-joined hex-token payload
//! - [`membership`]: sorted, duplicate-free vertex set
//! - [`colour`]: label colour and its `#RRGGBBAA` form
//! - [`error`]: codec error types
//!
//! # Features
//!
//! - `std`: implement `std::error::Error` for the error types
//!
//! # Example
//!
//! ```rust
//! use meshmark_core::{SortedVertexSet, VertexCodec};
//!
//! let mut region = SortedVertexSet::new();
//! for v in [301, 3, 65535, 300, 3] {
//!     region.insert(v);
//! }
//!
//! let codec = VertexCodec::new();
//! let payload = codec.encode_set(&region).unwrap();
//! assert_eq!(codec.decode(&payload).unwrap(), vec![3, 300, 301, 65535]);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod colour;
pub mod error;
pub mod hex;
pub mod lzw;
pub mod membership;
pub mod vertex_codec;

// Re-export commonly used types at crate root
pub use colour::Colour;
pub use error::{CodecError, CodecResult, HexError};
pub use lzw::{CodeWidth, Compressor};
pub use membership::{SortedVertexSet, VertexId};
pub use vertex_codec::{decode_vertices, encode_vertices, VertexCodec};
