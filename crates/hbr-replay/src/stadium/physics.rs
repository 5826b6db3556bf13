//! Player disc physics.

use hbr_core::{ByteCursor, Result};
use serde::Serialize;

/// Physics applied to every player disc in a stadium.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPhysics {
    /// Bounce coefficient. Default: 0.5.
    pub b_coef: f64,
    /// Inverse mass. Default: 0.5.
    pub inv_mass: f64,
    /// Velocity multiplier per frame. Default: 0.96.
    pub damping: f64,
    /// Acceleration while moving. Default: 0.1.
    pub acceleration: f64,
    /// Acceleration while holding kick. Default: 0.07.
    pub kicking_acceleration: f64,
    /// Damping while holding kick. Default: 0.96.
    pub kicking_damping: f64,
    /// Impulse given to the ball on kick. Default: 5.
    pub kick_strength: f64,
}

impl Default for PlayerPhysics {
    fn default() -> Self {
        Self {
            b_coef: 0.5,
            inv_mass: 0.5,
            damping: 0.96,
            acceleration: 0.1,
            kicking_acceleration: 0.07,
            kicking_damping: 0.96,
            kick_strength: 5.0,
        }
    }
}

impl PlayerPhysics {
    /// Decode the seven fields in wire order.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            b_coef: c.read_f64_be()?,
            inv_mass: c.read_f64_be()?,
            damping: c.read_f64_be()?,
            acceleration: c.read_f64_be()?,
            kicking_acceleration: c.read_f64_be()?,
            kicking_damping: c.read_f64_be()?,
            kick_strength: c.read_f64_be()?,
        })
    }

    /// Whether every field equals its default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_in_order() {
        let bytes: Vec<u8> = [0.5, 0.5, 0.96, 0.1, 0.07, 0.96, 5.0]
            .iter()
            .flat_map(|v: &f64| v.to_be_bytes())
            .collect();
        let mut c = ByteCursor::new(&bytes);
        let p = PlayerPhysics::decode(&mut c).unwrap();
        assert!(p.is_default());
        assert!(c.is_eof());
    }

    #[test]
    fn modified_field_is_not_default() {
        let p = PlayerPhysics {
            kick_strength: 6.5,
            ..PlayerPhysics::default()
        };
        assert!(!p.is_default());
    }
}
