//! Stadium background.

use hbr_core::{ByteCursor, Result};
use serde::Serialize;

use crate::color::Color;

/// Pitch texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    /// Plain colour.
    #[default]
    None,
    /// Football pitch.
    Grass,
    /// Ice rink.
    Hockey,
}

impl BackgroundKind {
    /// Unknown values fall back to [`BackgroundKind::None`].
    pub fn from_byte(value: u8) -> Self {
        match value {
            1 => Self::Grass,
            2 => Self::Hockey,
            _ => Self::None,
        }
    }
}

/// Visual layout of the pitch.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    /// Texture.
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// Pitch width.
    pub width: f64,
    /// Pitch height.
    pub height: f64,
    /// Radius of the kickoff circle.
    pub kick_off_radius: f64,
    /// Radius of the corner arcs.
    pub corner_radius: f64,
    /// Distance of the goal line from the pitch edge.
    pub goal_line: f64,
    /// Fill colour.
    pub color: Color,
}

impl Background {
    /// Decode the background block.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            kind: BackgroundKind::from_byte(c.read_u8()?),
            width: c.read_f64_be()?,
            height: c.read_f64_be()?,
            kick_off_radius: c.read_f64_be()?,
            corner_radius: c.read_f64_be()?,
            goal_line: c.read_f64_be_nan_zero()?,
            color: Color::decode(c)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_none() {
        assert_eq!(BackgroundKind::from_byte(2), BackgroundKind::Hockey);
        assert_eq!(BackgroundKind::from_byte(9), BackgroundKind::None);
    }

    #[test]
    fn goal_line_nan_normalised() {
        let mut bytes = vec![1u8];
        for v in [420.0, 200.0, 75.0, 0.0, f64::NAN] {
            bytes.extend_from_slice(&f64::to_be_bytes(v));
        }
        bytes.extend_from_slice(&0x718c5au32.to_be_bytes());
        let bg = Background::decode(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(bg.kind, BackgroundKind::Grass);
        assert_eq!(bg.width, 420.0);
        assert_eq!(bg.goal_line, 0.0);
        assert_eq!(bg.color.to_string(), "718c5a");
    }
}
