//! Packed RGB colours.

use std::fmt;

use hbr_core::{ByteCursor, Result};
use serde::{Serialize, Serializer};

/// A colour stored on the wire as a big-endian `u32`.
///
/// Displays and serializes as unpadded lowercase hex (`ff0000`, `0`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Read a big-endian `u32` colour.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        c.read_u32_be().map(Self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_unpadded() {
        assert_eq!(Color(0xE56E56).to_string(), "e56e56");
        assert_eq!(Color(0x00FF).to_string(), "ff");
        assert_eq!(serde_json::to_string(&Color(0)).unwrap(), "\"0\"");
    }
}
