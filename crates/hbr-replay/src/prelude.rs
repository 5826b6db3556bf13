//! Sections between the payload start and the action log.
//!
//! ```text
//! [message table?] Room [standalone discs?] Player* [TeamColors?]
//! ```
//!
//! A payload that ends exactly at a section boundary after the room
//! leaves the remaining sections empty. The message table is optional
//! even when the profile expects one: it is trial-decoded together with
//! the room on a fork, and on failure the room is decoded from the
//! original position without it.
//!
//! A tableless payload whose room name is empty starts with `[0, 0]`,
//! which also reads as an empty table. When the table reading decodes a
//! room but the sections after it fail, the tableless reading is used
//! instead if every section decodes under it.

use hbr_core::{ByteCursor, DecodeError, Result};
use serde::Serialize;

use crate::messages::{decode_messages, Message};
use crate::player::Player;
use crate::room::{DiscState, Room};
use crate::schema::{DiscPlacement, MessageTableLayout, SchemaProfile};
use crate::stadium::elements::decode_list;
use crate::stadium::Disc;
use crate::team::TeamColors;

/// Disc states at recording start, in whichever form the file stores them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiscSet {
    /// Position and velocity from the room's game snapshot.
    Kinematic(Vec<DiscState>),
    /// Full physics records from the standalone list.
    Physics(Vec<Disc>),
}

impl Default for DiscSet {
    fn default() -> Self {
        Self::Kinematic(Vec::new())
    }
}

impl DiscSet {
    /// Number of discs.
    pub fn len(&self) -> usize {
        match self {
            Self::Kinematic(d) => d.len(),
            Self::Physics(d) => d.len(),
        }
    }

    /// Whether no discs were recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decoded sections preceding the action log.
#[derive(Clone, Debug, PartialEq)]
pub struct Prelude {
    /// Message table entries, empty when absent.
    pub messages: Vec<Message>,
    /// Room settings.
    pub room: Room,
    /// Disc states.
    pub discs: DiscSet,
    /// Players present at recording start.
    pub players: Vec<Player>,
    /// Kit colours, when the file stores them.
    pub team_colors: Option<TeamColors>,
}

impl Prelude {
    /// Decode every section up to the action log.
    ///
    /// Fails only when no room could be decoded. A later failure is
    /// returned next to the sections decoded before it, with the cursor
    /// left at the failing section.
    pub fn decode(
        c: &mut ByteCursor<'_>,
        profile: &SchemaProfile,
        version: u32,
    ) -> Result<(Self, Option<DecodeError>)> {
        if profile.message_table != MessageTableLayout::Absent {
            let mut trial = c.fork();
            match decode_table_and_room(&mut trial, profile) {
                Ok((messages, room)) => {
                    log::debug!(
                        "{:?} message table: {} entries, room ends at {}",
                        profile.message_table,
                        messages.len(),
                        trial.position()
                    );
                    let (prelude, err) =
                        Self::after_room(&mut trial, messages, room, profile, version);
                    if err.is_some() {
                        let mut direct = c.fork();
                        if let Ok(room) = direct.atomically(|c| Room::decode(c, profile)) {
                            let (alt, alt_err) =
                                Self::after_room(&mut direct, Vec::new(), room, profile, version);
                            if alt_err.is_none() {
                                log::debug!("sections only decode without a message table");
                                *c = direct;
                                return Ok((alt, None));
                            }
                        }
                    }
                    *c = trial;
                    return Ok((prelude, err));
                }
                Err(e) => log::debug!("no message table ({e}); decoding room directly"),
            }
        }
        let room = c.atomically(|c| Room::decode(c, profile))?;
        log::debug!("room ends at {}", c.position());
        Ok(Self::after_room(c, Vec::new(), room, profile, version))
    }

    fn after_room(
        c: &mut ByteCursor<'_>,
        messages: Vec<Message>,
        room: Room,
        profile: &SchemaProfile,
        version: u32,
    ) -> (Self, Option<DecodeError>) {
        let mut prelude = Self {
            discs: match &room.game {
                Some(game) => DiscSet::Kinematic(game.discs.clone()),
                None => DiscSet::default(),
            },
            messages,
            room,
            players: Vec::new(),
            team_colors: None,
        };
        let err = prelude.decode_tail(c, profile, version).err();
        (prelude, err)
    }

    fn decode_tail(
        &mut self,
        c: &mut ByteCursor<'_>,
        profile: &SchemaProfile,
        version: u32,
    ) -> Result<()> {
        if self.room.game_active && profile.discs == DiscPlacement::Standalone {
            if c.is_eof() {
                return Ok(());
            }
            self.discs = DiscSet::Physics(c.atomically(|c| decode_list(c, Disc::decode))?);
            log::debug!("standalone discs: {} at {}", self.discs.len(), c.position());
        }

        if c.is_eof() {
            return Ok(());
        }
        self.players = c.atomically(|c| Player::decode_all(c, version))?;
        log::debug!("players: {} at {}", self.players.len(), c.position());

        if profile.has_team_colors(version) {
            if c.is_eof() {
                return Ok(());
            }
            self.team_colors = Some(c.atomically(|c| TeamColors::decode(c, profile.angle))?);
        }
        Ok(())
    }
}

fn decode_table_and_room(
    c: &mut ByteCursor<'_>,
    profile: &SchemaProfile,
) -> Result<(Vec<Message>, Room)> {
    let messages = decode_messages(c, profile.message_table)?;
    let room = Room::decode(c, profile)?;
    Ok((messages, room))
}
