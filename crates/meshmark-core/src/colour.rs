//! Label colours and their `#RRGGBB[AA]` wire form.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::HexError;
use crate::hex;

/// Four-channel 8-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Colour {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Colour {
    /// Opaque red, used for new labels.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Create a colour from all four channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Channels in R, G, B, A order.
    #[must_use]
    pub const fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Normalised `[0, 1]` channels for the renderer.
    #[must_use]
    pub fn to_f32(&self) -> [f32; 4] {
        self.channels().map(|c| f32::from(c) / 255.0)
    }

    /// Render as `#RRGGBBAA` with uppercase digits.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(9);
        out.push('#');
        for channel in self.channels() {
            hex::push_byte_upper(&mut out, channel);
        }
        out
    }

    /// Parse `#RRGGBB` (alpha 255) or `#RRGGBBAA`, digits in either case.
    ///
    /// # Errors
    ///
    /// [`HexError::InvalidLength`] for a missing `#` or wrong digit count,
    /// [`HexError::InvalidDigit`] for non-hex characters.
    pub fn from_hex(text: &str) -> Result<Self, HexError> {
        let digits = text
            .strip_prefix('#')
            .ok_or(HexError::InvalidLength { length: text.len() })?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(HexError::InvalidLength { length: text.len() });
        }
        if !digits.is_ascii() {
            return Err(HexError::InvalidLength { length: text.len() });
        }

        let channel = |i: usize| hex::decode_byte(&digits[i * 2..i * 2 + 2]);
        let alpha = if digits.len() == 8 { channel(3)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(1)?, channel(2)?, alpha))
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Colour {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColourVisitor;

        impl Visitor<'_> for ColourVisitor {
            type Value = Colour;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a #RRGGBB or #RRGGBBAA colour string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Colour, E> {
                Colour::from_hex(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ColourVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_uppercase_with_alpha() {
        assert_eq!(Colour::rgba(255, 0, 128, 255).to_hex(), "#FF0080FF");
        assert_eq!(Colour::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Colour::from_hex("#FF0080FF"), Ok(Colour::rgba(255, 0, 128, 255)));
        assert_eq!(Colour::from_hex("#ff0080ff"), Ok(Colour::rgba(255, 0, 128, 255)));
        assert_eq!(Colour::from_hex("#00ff00"), Ok(Colour::rgb(0, 255, 0)));
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Colour::from_hex("FF0080").is_err());
        assert!(Colour::from_hex("#FF00").is_err());
        assert!(Colour::from_hex("#FF0080F").is_err());
        assert!(Colour::from_hex("#GG0080").is_err());
        assert!(Colour::from_hex("#ÿÿÿ").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Colour::rgb(16, 32, 48)).unwrap();
        assert_eq!(json, "\"#102030FF\"");
        let back: Colour = serde_json::from_str("\"#102030\"").unwrap();
        assert_eq!(back, Colour::rgb(16, 32, 48));
        assert!(serde_json::from_str::<Colour>("\"red\"").is_err());
    }

    #[test]
    fn test_normalised_channels() {
        let c = Colour::rgba(255, 0, 255, 0).to_f32();
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert!(c[1].abs() < 1e-6);
        assert!(c[3].abs() < 1e-6);
    }
}
