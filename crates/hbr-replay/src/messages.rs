//! The message table that precedes the room block.
//!
//! ```text
//! [count u16] ([delta varint] [tag u8] [payload?])*
//! ```
//!
//! Annotated tables carry a tag-specific payload after each tag; tagged
//! tables carry none.

use hbr_core::{ByteCursor, Result};
use serde::Serialize;

use crate::schema::MessageTableLayout;

/// Names of the known message tags, indexed by tag.
pub const MESSAGE_TAGS: [&str; 15] = [
    "Announcement",
    "Chat",
    "Goal",
    "TeamGoal",
    "GameStart",
    "GameStop",
    "PlayerJoin",
    "PlayerLeave",
    "PlayerTeamChange",
    "Pause",
    "Unpause",
    "AdminChange",
    "StadiumChange",
    "Kick",
    "PositionChange",
];

/// Tag-specific contents of an annotated message.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum MessageBody {
    /// System announcement.
    Announcement {
        /// Announcement text.
        text: String,
        /// Text colour.
        color: i32,
        /// Font style.
        style: u8,
        /// Notification sound.
        sound: u8,
    },
    /// Chat line.
    Chat {
        /// Author.
        player_id: i32,
        /// Text.
        text: String,
    },
    /// A goal credited to a player.
    Goal {
        /// Scorer.
        player_id: i32,
        /// Team index.
        team: u8,
    },
    /// A goal credited to a team.
    TeamGoal {
        /// Team index.
        team: u8,
    },
    /// Match started.
    GameStart {
        /// Admin who started it.
        admin_id: Option<i32>,
    },
    /// Match stopped.
    GameStop {
        /// Admin who stopped it.
        admin_id: Option<i32>,
    },
    /// A player joined.
    PlayerJoin {
        /// New player.
        player_id: i32,
        /// Name.
        name: String,
        /// Country code.
        country: String,
        /// Avatar.
        avatar: String,
    },
    /// A player left.
    PlayerLeave {
        /// Departing player.
        player_id: i32,
        /// Reason text.
        reason: String,
        /// Whether the player was banned.
        banned: bool,
        /// Admin responsible.
        admin_id: Option<i32>,
    },
    /// A player moved team.
    PlayerTeamChange {
        /// Moved player.
        player_id: i32,
        /// New team index.
        team: u8,
        /// Admin responsible.
        admin_id: Option<i32>,
    },
    /// Pause toggled.
    Pause {
        /// Admin responsible.
        admin_id: Option<i32>,
        /// New pause state.
        paused: bool,
        /// Paused by the game rather than a player.
        by_game: bool,
    },
    /// Match resumed.
    Unpause {
        /// Admin responsible.
        admin_id: Option<i32>,
    },
    /// Admin rights changed.
    AdminChange {
        /// Affected player.
        player_id: i32,
        /// New admin state.
        admin: bool,
        /// Player who made the change.
        by_player_id: Option<i32>,
    },
    /// Stadium replaced.
    StadiumChange {
        /// Raw stadium bytes.
        #[serde(skip)]
        stadium: Vec<u8>,
        /// Admin responsible.
        admin_id: Option<i32>,
    },
    /// A player was kicked.
    Kick {
        /// Kicked player.
        player_id: i32,
        /// Reason text.
        reason: Option<String>,
        /// Whether it was a ban.
        banned: bool,
        /// Admin responsible.
        admin_id: Option<i32>,
    },
    /// A player was moved in the list.
    PositionChange {
        /// Moved player.
        player_id: i32,
        /// New position.
        position: i32,
        /// Admin responsible.
        admin_id: Option<i32>,
    },
    /// A tag with no known payload.
    Unknown,
}

impl MessageBody {
    /// Decode the payload for `tag`. Unknown tags consume nothing.
    pub fn decode(c: &mut ByteCursor<'_>, tag: u8) -> Result<Self> {
        let admin = |c: &mut ByteCursor<'_>| c.read_nullable_i32_be();
        Ok(match tag {
            0 => Self::Announcement {
                text: c.read_string()?,
                color: c.read_i32_be()?,
                style: c.read_u8()?,
                sound: c.read_u8()?,
            },
            1 => Self::Chat {
                player_id: c.read_i32_be()?,
                text: c.read_string()?,
            },
            2 => Self::Goal {
                player_id: c.read_i32_be()?,
                team: c.read_u8()?,
            },
            3 => Self::TeamGoal { team: c.read_u8()? },
            4 => Self::GameStart { admin_id: admin(c)? },
            5 => Self::GameStop { admin_id: admin(c)? },
            6 => Self::PlayerJoin {
                player_id: c.read_i32_be()?,
                name: c.read_string()?,
                country: c.read_string()?,
                avatar: c.read_string()?,
            },
            7 => Self::PlayerLeave {
                player_id: c.read_i32_be()?,
                reason: c.read_string()?,
                banned: c.read_bool()?,
                admin_id: admin(c)?,
            },
            8 => Self::PlayerTeamChange {
                player_id: c.read_i32_be()?,
                team: c.read_u8()?,
                admin_id: admin(c)?,
            },
            9 => Self::Pause {
                admin_id: admin(c)?,
                paused: c.read_bool()?,
                by_game: c.read_bool()?,
            },
            10 => Self::Unpause { admin_id: admin(c)? },
            11 => Self::AdminChange {
                player_id: c.read_i32_be()?,
                admin: c.read_bool()?,
                by_player_id: admin(c)?,
            },
            12 => {
                let len = c.read_u32_be()? as usize;
                Self::StadiumChange {
                    stadium: c.read_bytes(len)?.to_vec(),
                    admin_id: admin(c)?,
                }
            }
            13 => Self::Kick {
                player_id: c.read_i32_be()?,
                reason: c.read_nullable_string()?,
                banned: c.read_bool()?,
                admin_id: admin(c)?,
            },
            14 => Self::PositionChange {
                player_id: c.read_i32_be()?,
                position: c.read_i32_be()?,
                admin_id: admin(c)?,
            },
            _ => Self::Unknown,
        })
    }
}

/// One message table entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Time since the previous message.
    pub delta_time: u64,
    /// Raw tag byte.
    pub tag: u8,
    /// Payload, for annotated tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<MessageBody>,
}

impl Message {
    /// Name of the tag, if known.
    pub fn tag_name(&self) -> Option<&'static str> {
        MESSAGE_TAGS.get(usize::from(self.tag)).copied()
    }
}

/// Decode a whole table in the given layout.
///
/// [`MessageTableLayout::Absent`] reads nothing and yields no messages.
pub fn decode_messages(c: &mut ByteCursor<'_>, layout: MessageTableLayout) -> Result<Vec<Message>> {
    if layout == MessageTableLayout::Absent {
        return Ok(Vec::new());
    }
    c.atomically(|c| {
        let count = c.read_u16_be()?;
        (0..count)
            .map(|_| {
                let delta_time = c.read_varint()?;
                let tag = c.read_u8()?;
                let body = match layout {
                    MessageTableLayout::Annotated => Some(MessageBody::decode(c, tag)?),
                    _ => None,
                };
                Ok(Message {
                    delta_time,
                    tag,
                    body,
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbr_test_utils::WireWriter;

    #[test]
    fn tagged_entries() {
        let mut w = WireWriter::new();
        w.u16(2).varint(0).u8(4).varint(300).u8(5);
        let bytes = w.into_bytes();
        let mut c = ByteCursor::new(&bytes);
        let msgs = decode_messages(&mut c, MessageTableLayout::Tagged).unwrap();
        assert!(c.is_eof());
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].delta_time, 300);
        assert_eq!(msgs[1].tag_name(), Some("GameStop"));
        assert!(msgs[1].body.is_none());
    }

    #[test]
    fn annotated_entries() {
        let mut w = WireWriter::new();
        w.u16(3);
        w.varint(1).u8(1).i32(5).string("hola");
        w.varint(2).u8(4).u8(1).i32(9);
        w.varint(3).u8(13).i32(5).u8(0).u8(1).u8(0);
        let bytes = w.into_bytes();
        let mut c = ByteCursor::new(&bytes);
        let msgs = decode_messages(&mut c, MessageTableLayout::Annotated).unwrap();
        assert!(c.is_eof());
        assert_eq!(
            msgs[0].body,
            Some(MessageBody::Chat {
                player_id: 5,
                text: "hola".into()
            })
        );
        assert_eq!(
            msgs[1].body,
            Some(MessageBody::GameStart { admin_id: Some(9) })
        );
        assert_eq!(
            msgs[2].body,
            Some(MessageBody::Kick {
                player_id: 5,
                reason: None,
                banned: true,
                admin_id: None
            })
        );
    }

    #[test]
    fn failed_table_does_not_advance() {
        let bytes = [0x00, 0x05, 0x01];
        let mut c = ByteCursor::new(&bytes);
        assert!(decode_messages(&mut c, MessageTableLayout::Tagged).is_err());
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn absent_reads_nothing() {
        let mut c = ByteCursor::new(&[1, 2, 3]);
        assert!(decode_messages(&mut c, MessageTableLayout::Absent)
            .unwrap()
            .is_empty());
        assert_eq!(c.position(), 0);
    }
}
