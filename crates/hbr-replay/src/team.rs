//! Teams and team colours.

use hbr_core::{ByteCursor, Result};
use serde::Serialize;

use crate::color::Color;
use crate::schema::AngleWidth;

/// A team slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Team {
    /// Not playing.
    #[default]
    Spectators,
    /// Red side.
    Red,
    /// Blue side.
    Blue,
}

impl Team {
    /// Wire order of the team table.
    pub const TABLE: [Team; 3] = [Team::Spectators, Team::Red, Team::Blue];

    /// Resolve a wire index; anything out of range is [`Team::Spectators`].
    pub fn from_index(index: u8) -> Self {
        Self::TABLE
            .get(usize::from(index))
            .copied()
            .unwrap_or_default()
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Spectators => "Spectators",
            Self::Red => "Red",
            Self::Blue => "Blue",
        }
    }

    /// Read a one-byte team index.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        c.read_u8().map(Self::from_index)
    }
}

/// Kit colours for one team.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamColor {
    /// Stripe angle in degrees.
    pub angle: u32,
    /// Colour of the jersey number.
    pub text_color: Color,
    /// Stripe colours, in order.
    pub stripes: Vec<Color>,
}

impl TeamColor {
    /// Decode one entry, reading the angle at the given width.
    pub fn decode(c: &mut ByteCursor<'_>, angle: AngleWidth) -> Result<Self> {
        let angle = match angle {
            AngleWidth::U16 => u32::from(c.read_u16_be()?),
            AngleWidth::U32 => c.read_u32_be()?,
        };
        let text_color = Color::decode(c)?;
        let count = c.read_u8()?;
        let stripes = (0..count)
            .map(|_| Color::decode(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            angle,
            text_color,
            stripes,
        })
    }
}

/// Red and blue kit colours.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TeamColors {
    /// Red team.
    pub red: TeamColor,
    /// Blue team.
    pub blue: TeamColor,
}

impl TeamColors {
    /// Decode red then blue.
    pub fn decode(c: &mut ByteCursor<'_>, angle: AngleWidth) -> Result<Self> {
        Ok(Self {
            red: TeamColor::decode(c, angle)?,
            blue: TeamColor::decode(c, angle)?,
        })
    }
}
