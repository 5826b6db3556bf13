//! Player records from the replay snapshot.

use hbr_core::{ByteCursor, Result};
use serde::Serialize;

use crate::schema::HANDICAP_SINCE;
use crate::team::Team;

/// A player present when recording started.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Room-scoped player id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Whether the player holds admin rights.
    pub admin: bool,
    /// Current team.
    pub team: Team,
    /// Jersey number.
    pub number: u8,
    /// Avatar text.
    pub avatar: String,
    /// Input bitmask (direction and kick).
    pub input: u32,
    /// Whether kick is held.
    pub kicking: bool,
    /// Whether the player is flagged desynchronised.
    pub desynced: bool,
    /// Country code.
    pub country: String,
    /// Artificial latency in milliseconds, present from version 11.
    pub handicap: Option<u16>,
    /// Id of the disc controlled by this player.
    pub disc_id: i32,
}

impl Player {
    /// Decode one player for the given container version.
    pub fn decode(c: &mut ByteCursor<'_>, version: u32) -> Result<Self> {
        Ok(Self {
            id: c.read_i32_be()?,
            name: c.read_string()?,
            admin: c.read_bool()?,
            team: Team::decode(c)?,
            number: c.read_u8()?,
            avatar: c.read_string()?,
            input: c.read_u32_be()?,
            kicking: c.read_bool()?,
            desynced: c.read_bool()?,
            country: c.read_string()?,
            handicap: if version >= HANDICAP_SINCE {
                Some(c.read_u16_be()?)
            } else {
                None
            },
            disc_id: c.read_i32_be()?,
        })
    }

    /// Decode a one-byte count followed by that many players.
    pub fn decode_all(c: &mut ByteCursor<'_>, version: u32) -> Result<Vec<Self>> {
        let count = c.read_u8()?;
        (0..count).map(|_| Self::decode(c, version)).collect()
    }
}
