//! Error types for the Meshmark codecs
//!
//! These errors work in `no_std` environments. They carry enough context
//! (offending token position, code value, dictionary size) to explain a
//! rejected payload without requiring heap allocation.

use core::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Hex Codec Errors
// ============================================================================

/// Errors from the hex codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HexError {
    /// Token length is not supported by the decoder
    InvalidLength {
        /// Length of the rejected token in bytes
        length: usize,
    },
    /// Token contains a character outside `[0-9a-fA-F]`
    InvalidDigit {
        /// The offending byte
        byte: u8,
        /// Position within the token
        position: usize,
    },
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { length } => {
                write!(f, "Invalid hex token length: {length}")
            }
            Self::InvalidDigit { byte, position } => {
                write!(f, "Invalid hex digit 0x{byte:02X} at position {position}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HexError {}

// ============================================================================
// Compressor / Vertex-Set Codec Errors
// ============================================================================

/// Errors from the dictionary compressor and the vertex-set codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecError {
    /// Input symbol does not fit the compressor alphabet
    SymbolOutOfRange {
        /// The offending symbol
        symbol: u32,
        /// Number of symbols in the alphabet
        alphabet_size: u32,
    },
    /// Dictionary outgrew the configured code width
    DictionaryOverflow {
        /// Code width in bits
        bits: u8,
    },
    /// Code references a dictionary entry that does not exist yet
    InvalidCode {
        /// The offending code
        code: u32,
        /// Dictionary size when the code was read
        dictionary_size: u32,
    },
    /// A comma-separated token failed hex decoding
    MalformedToken {
        /// Zero-based token index
        index: usize,
        /// Underlying hex failure
        cause: HexError,
    },
    /// A comma-separated list contained an empty token
    EmptyToken {
        /// Zero-based token index
        index: usize,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolOutOfRange { symbol, alphabet_size } => {
                write!(f, "Symbol {symbol} outside alphabet of {alphabet_size} symbols")
            }
            Self::DictionaryOverflow { bits } => {
                write!(f, "Dictionary exceeded {bits}-bit code space")
            }
            Self::InvalidCode { code, dictionary_size } => {
                write!(f, "Invalid code {code} (dictionary holds {dictionary_size} entries)")
            }
            Self::MalformedToken { index, cause } => {
                write!(f, "Malformed token #{index}: {cause}")
            }
            Self::EmptyToken { index } => write!(f, "Empty token #{index}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedToken { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
