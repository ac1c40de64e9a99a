//! Dictionary (LZW) compressor.
//!
//! The dictionary is seeded with one entry per alphabet symbol (codes
//! `0..alphabet_size`) and grows by one entry per emitted code. Encoder and
//! decoder rebuild it in lockstep, so no dictionary is ever transmitted.
//!
//! ```text
//!   input   a  a  a  a  a  a  a
//!   codes   97 256   257      97        256 = "aa", 257 = "aaa"
//! ```
//!
//! The decoder has to handle the one code the encoder may emit before the
//! decoder has materialised it (`code == dictionary size`, the "KwKwK" case).

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Alphabet size for byte-oriented input.
pub const BYTE_ALPHABET: u32 = 256;

/// Width of the code space available to the dictionary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeWidth {
    /// Codes may use the full `u32` range
    #[default]
    Unbounded,
    /// Codes must fit in the given number of bits (1-32)
    Bits(u8),
}

impl CodeWidth {
    /// Number of dictionary entries addressable with this width.
    #[must_use]
    pub const fn capacity(self) -> u64 {
        match self {
            Self::Unbounded => 1 << 32,
            Self::Bits(bits) if bits >= 32 => 1 << 32,
            Self::Bits(bits) => 1 << bits,
        }
    }

    /// Width in bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Unbounded => 32,
            Self::Bits(bits) if bits >= 32 => 32,
            Self::Bits(bits) => bits,
        }
    }
}

/// Decoder-side dictionary entry: `prefix` code followed by `symbol`.
#[derive(Clone, Copy, Debug)]
struct Entry {
    prefix: u32,
    symbol: u32,
    first: u32,
}

/// LZW compressor over a finite symbol alphabet.
///
/// Stateless between calls; every `compress` / `decompress` starts from the
/// same seeded dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compressor {
    alphabet_size: u32,
    width: CodeWidth,
}

impl Compressor {
    /// Byte-alphabet compressor with an unbounded code space.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            alphabet_size: BYTE_ALPHABET,
            width: CodeWidth::Unbounded,
        }
    }

    /// Compressor over symbols `0..alphabet_size`.
    #[must_use]
    pub const fn with_alphabet(alphabet_size: u32) -> Self {
        Self {
            alphabet_size,
            width: CodeWidth::Unbounded,
        }
    }

    /// Restrict the code space to a fixed width.
    #[must_use]
    pub const fn with_code_width(mut self, width: CodeWidth) -> Self {
        self.width = width;
        self
    }

    /// Number of seed symbols.
    #[must_use]
    pub const fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    /// Configured code width.
    #[must_use]
    pub const fn code_width(&self) -> CodeWidth {
        self.width
    }

    /// Compress a symbol sequence into dictionary codes.
    ///
    /// # Errors
    ///
    /// [`CodecError::SymbolOutOfRange`] if a symbol is outside the alphabet,
    /// [`CodecError::DictionaryOverflow`] if the dictionary outgrows the
    /// configured code width.
    pub fn compress(&self, input: &[u32]) -> CodecResult<Vec<u32>> {
        self.check_seed()?;

        let mut out = Vec::new();
        let Some((&head, tail)) = input.split_first() else {
            return Ok(out);
        };
        self.check_symbol(head)?;

        let mut table: BTreeMap<(u32, u32), u32> = BTreeMap::new();
        let mut next_code = u64::from(self.alphabet_size);
        let mut current = head;

        for &symbol in tail {
            self.check_symbol(symbol)?;

            if let Some(&code) = table.get(&(current, symbol)) {
                current = code;
                continue;
            }

            out.push(current);
            let code = self.allocate(&mut next_code)?;
            table.insert((current, symbol), code);
            current = symbol;
        }

        out.push(current);
        Ok(out)
    }

    /// Compress a byte string. Requires an alphabet of at least 256 symbols.
    ///
    /// # Errors
    ///
    /// See [`Compressor::compress`].
    pub fn compress_bytes(&self, input: &[u8]) -> CodecResult<Vec<u32>> {
        let symbols: Vec<u32> = input.iter().map(|b| u32::from(*b)).collect();
        self.compress(&symbols)
    }

    /// Rebuild the symbol sequence from dictionary codes.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidCode`] for a code beyond the current dictionary
    /// (the first code must be a seed symbol), and
    /// [`CodecError::DictionaryOverflow`] when the stream implies more
    /// entries than the code width allows.
    pub fn decompress(&self, codes: &[u32]) -> CodecResult<Vec<u32>> {
        self.check_seed()?;

        let mut out = Vec::new();
        let Some((&head, tail)) = codes.split_first() else {
            return Ok(out);
        };
        if head >= self.alphabet_size {
            return Err(CodecError::InvalidCode {
                code: head,
                dictionary_size: self.alphabet_size,
            });
        }
        out.push(head);

        let mut entries: Vec<Entry> = Vec::new();
        let mut scratch: Vec<u32> = Vec::new();
        let mut next_code = u64::from(self.alphabet_size);
        let mut previous = head;
        let mut previous_first = head;

        for &code in tail {
            let known = u64::from(code) < next_code;
            let first = if known {
                self.first_symbol(&entries, code)
            } else if u64::from(code) == next_code {
                previous_first
            } else {
                return Err(CodecError::InvalidCode {
                    code,
                    dictionary_size: dictionary_size(next_code),
                });
            };

            self.allocate(&mut next_code)?;
            entries.push(Entry {
                prefix: previous,
                symbol: first,
                first: previous_first,
            });

            self.expand(&entries, code, &mut scratch);
            out.extend(scratch.drain(..).rev());

            previous = code;
            previous_first = first;
        }

        Ok(out)
    }

    /// Decompress into bytes.
    ///
    /// # Errors
    ///
    /// See [`Compressor::decompress`]; additionally
    /// [`CodecError::SymbolOutOfRange`] if a decoded symbol does not fit a byte.
    pub fn decompress_bytes(&self, codes: &[u32]) -> CodecResult<Vec<u8>> {
        self.decompress(codes)?
            .into_iter()
            .map(|symbol| {
                u8::try_from(symbol).map_err(|_| CodecError::SymbolOutOfRange {
                    symbol,
                    alphabet_size: BYTE_ALPHABET,
                })
            })
            .collect()
    }

    fn check_seed(&self) -> CodecResult<()> {
        if u64::from(self.alphabet_size) > self.width.capacity() {
            return Err(CodecError::DictionaryOverflow {
                bits: self.width.bits(),
            });
        }
        Ok(())
    }

    fn check_symbol(&self, symbol: u32) -> CodecResult<()> {
        if symbol >= self.alphabet_size {
            return Err(CodecError::SymbolOutOfRange {
                symbol,
                alphabet_size: self.alphabet_size,
            });
        }
        Ok(())
    }

    fn allocate(&self, next_code: &mut u64) -> CodecResult<u32> {
        if *next_code >= self.width.capacity() {
            return Err(CodecError::DictionaryOverflow {
                bits: self.width.bits(),
            });
        }
        let code = u32::try_from(*next_code).map_err(|_| CodecError::DictionaryOverflow {
            bits: self.width.bits(),
        })?;
        *next_code += 1;
        Ok(code)
    }

    fn first_symbol(&self, entries: &[Entry], code: u32) -> u32 {
        if code < self.alphabet_size {
            code
        } else {
            entries[(code - self.alphabet_size) as usize].first
        }
    }

    /// Push the sequence for `code` into `scratch`, last symbol first.
    fn expand(&self, entries: &[Entry], mut code: u32, scratch: &mut Vec<u32>) {
        while code >= self.alphabet_size {
            let entry = entries[(code - self.alphabet_size) as usize];
            scratch.push(entry.symbol);
            code = entry.prefix;
        }
        scratch.push(code);
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

fn dictionary_size(next_code: u64) -> u32 {
    u32::try_from(next_code).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_empty_input() {
        let lzw = Compressor::new();
        assert_eq!(lzw.compress(&[]), Ok(vec![]));
        assert_eq!(lzw.decompress(&[]), Ok(vec![]));
    }

    #[test]
    fn test_single_symbol_is_its_seed_code() {
        let lzw = Compressor::new();
        assert_eq!(lzw.compress(&[42]), Ok(vec![42]));
        assert_eq!(lzw.decompress(&[42]), Ok(vec![42]));
    }

    #[test]
    fn test_classic_sequence() {
        let lzw = Compressor::new();
        let input = b"TOBEORNOTTOBEORTOBEORNOT";
        let codes = lzw.compress_bytes(input).unwrap();
        assert_eq!(
            codes,
            vec![84, 79, 66, 69, 79, 82, 78, 79, 84, 256, 258, 260, 265, 259, 261, 263]
        );
        assert_eq!(lzw.decompress_bytes(&codes).unwrap(), input.to_vec());
    }

    #[test]
    fn test_code_not_yet_in_decoder_dictionary() {
        let lzw = Compressor::new();
        let codes = lzw.compress_bytes(b"aaaaaaa").unwrap();
        // 256 is emitted before the decoder has built it
        assert_eq!(codes, vec![97, 256, 257, 97]);
        assert_eq!(lzw.decompress_bytes(&codes).unwrap(), b"aaaaaaa".to_vec());
    }

    #[test]
    fn test_repetitive_input_shrinks() {
        let lzw = Compressor::new();
        let input: Vec<u8> = b"0a,0b,0c,".iter().copied().cycle().take(900).collect();
        let codes = lzw.compress_bytes(&input).unwrap();
        assert!(codes.len() < input.len() / 4);
        assert_eq!(lzw.decompress_bytes(&codes).unwrap(), input);
    }

    #[test]
    fn test_invalid_codes_rejected() {
        let lzw = Compressor::new();
        assert_eq!(
            lzw.decompress(&[97, 300]),
            Err(CodecError::InvalidCode { code: 300, dictionary_size: 256 })
        );
        // The first code can never reference a learned entry
        assert_eq!(
            lzw.decompress(&[256]),
            Err(CodecError::InvalidCode { code: 256, dictionary_size: 256 })
        );
    }

    #[test]
    fn test_symbol_outside_alphabet() {
        let lzw = Compressor::with_alphabet(16);
        assert_eq!(
            lzw.compress(&[3, 16]),
            Err(CodecError::SymbolOutOfRange { symbol: 16, alphabet_size: 16 })
        );
        assert_eq!(lzw.compress(&[3, 15, 3, 15]), Ok(vec![3, 15, 16]));
    }

    #[test]
    fn test_fixed_width_overflow_is_an_error() {
        let lzw = Compressor::new().with_code_width(CodeWidth::Bits(8));
        assert_eq!(lzw.compress_bytes(b"a"), Ok(vec![97]));
        assert_eq!(
            lzw.compress_bytes(b"ab"),
            Err(CodecError::DictionaryOverflow { bits: 8 })
        );
        assert_eq!(
            lzw.decompress(&[97, 98]),
            Err(CodecError::DictionaryOverflow { bits: 8 })
        );
    }

    #[test]
    fn test_alphabet_larger_than_code_space() {
        let lzw = Compressor::with_alphabet(512).with_code_width(CodeWidth::Bits(8));
        assert_eq!(lzw.compress(&[1]), Err(CodecError::DictionaryOverflow { bits: 8 }));
    }

    #[test]
    fn test_decompress_bytes_rejects_wide_symbols() {
        let lzw = Compressor::with_alphabet(1024);
        assert_eq!(
            lzw.decompress_bytes(&[700]),
            Err(CodecError::SymbolOutOfRange { symbol: 700, alphabet_size: 256 })
        );
    }

    #[test]
    fn test_grows_past_two_byte_codes() {
        let lzw = Compressor::with_alphabet(70_000);
        let input: Vec<u32> = (0..70_000).chain(0..70_000).collect();
        let codes = lzw.compress(&input).unwrap();
        assert!(codes.iter().any(|c| *c > u32::from(u16::MAX)));
        assert_eq!(lzw.decompress(&codes).unwrap(), input);
    }
}
