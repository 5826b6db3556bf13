//! Versioned layout rules.
//!
//! The wire layout has drifted across format revisions: the payload
//! codec, the presence and shape of the message table, where the game
//! discs live, the width of several integers, and the action table
//! itself. A [`SchemaProfile`] names one consistent set of those rules
//! and is selected once from the container header; decode routines
//! consult the profile instead of branching on the version.
//!
//! | | `LEGACY` | `ANNOTATED` | `MODERN` |
//! |---|---|---|---|
//! | container | `HBRP` ≥ 7 | `HBR2` < 9 | `HBR2` ≥ 9 |
//! | payload | zlib | raw deflate | raw deflate |
//! | message table | none | annotated | tagged |
//! | game discs | standalone list | in room | in room |
//! | team colours | from v12 | always | always |
//! | colour angle | u16 | u32 | u32 |
//! | frame delta | flag + u32 | varint | varint |
//! | sender | u32 | u16 | u16 |
//! | actions | 18 entries | 24 entries | 24 entries |

use std::fmt;

use hbr_core::{ByteCursor, Codec, ContainerHeader, DecodeError, HeaderFault, Magic, Result};

use crate::action::ActionTable;

/// Oldest `HBRP` version with a known layout.
pub const MIN_LEGACY_VERSION: u32 = 7;

/// First `HBR2` version whose message table carries tags only.
pub const TAGGED_MESSAGES_SINCE: u32 = 9;

/// First version whose player records carry a handicap.
pub const HANDICAP_SINCE: u32 = 11;

/// First `HBRP` version that stores team colours.
pub const LEGACY_TEAM_COLORS_SINCE: u32 = 12;

/// Shape of the optional message table at the start of the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageTableLayout {
    /// No table.
    Absent,
    /// Each entry carries a tag-specific payload.
    Annotated,
    /// Each entry is a delta and a tag only.
    Tagged,
}

/// How the frame advance before each action is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDelta {
    /// A flag byte; when set, a big-endian `u32` delta follows.
    FlaggedU32,
    /// An unsigned varint delta.
    Varint,
}

impl FrameDelta {
    /// Read one delta.
    pub fn read(self, c: &mut ByteCursor<'_>) -> Result<u64> {
        match self {
            Self::FlaggedU32 => {
                if c.read_bool()? {
                    c.read_u32_be().map(u64::from)
                } else {
                    Ok(0)
                }
            }
            Self::Varint => c.read_varint(),
        }
    }
}

/// Width of an integer field that changed size between revisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntWidth {
    /// Big-endian `u16`.
    U16,
    /// Big-endian `u32`.
    U32,
}

impl IntWidth {
    /// Read a big-endian integer of this width.
    pub fn read(self, c: &mut ByteCursor<'_>) -> Result<u32> {
        match self {
            Self::U16 => c.read_u16_be().map(u32::from),
            Self::U32 => c.read_u32_be(),
        }
    }
}

/// Width of the team colour angle.
pub type AngleWidth = IntWidth;

/// Width of the action sender id.
pub type SenderWidth = IntWidth;

/// Where the disc states of a running game are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscPlacement {
    /// Inside the room's game snapshot.
    InGame,
    /// As a standalone physics list after the room.
    Standalone,
}

/// One consistent set of layout rules.
#[derive(Clone, Copy)]
pub struct SchemaProfile {
    /// Short name used in logs.
    pub name: &'static str,
    /// Codec of the payload after the header.
    pub payload_codec: Codec,
    /// Message table shape.
    pub message_table: MessageTableLayout,
    /// Game disc placement.
    pub discs: DiscPlacement,
    /// First version that stores team colours.
    pub team_colors_since: u32,
    /// Team colour angle width.
    pub angle: AngleWidth,
    /// Action frame delta encoding.
    pub frame_delta: FrameDelta,
    /// Action sender id width.
    pub sender: SenderWidth,
    /// Action discriminant table.
    pub actions: &'static ActionTable,
}

impl SchemaProfile {
    /// `HBRP` files.
    pub const LEGACY: SchemaProfile = SchemaProfile {
        name: "legacy",
        payload_codec: Codec::Zlib,
        message_table: MessageTableLayout::Absent,
        discs: DiscPlacement::Standalone,
        team_colors_since: LEGACY_TEAM_COLORS_SINCE,
        angle: IntWidth::U16,
        frame_delta: FrameDelta::FlaggedU32,
        sender: IntWidth::U32,
        actions: &ActionTable::LEGACY,
    };

    /// `HBR2` files before the tagged message table.
    pub const ANNOTATED: SchemaProfile = SchemaProfile {
        name: "annotated",
        payload_codec: Codec::RawDeflate,
        message_table: MessageTableLayout::Annotated,
        discs: DiscPlacement::InGame,
        team_colors_since: 0,
        angle: IntWidth::U32,
        frame_delta: FrameDelta::Varint,
        sender: IntWidth::U16,
        actions: &ActionTable::MODERN,
    };

    /// Current `HBR2` files.
    pub const MODERN: SchemaProfile = SchemaProfile {
        name: "modern",
        message_table: MessageTableLayout::Tagged,
        ..Self::ANNOTATED
    };

    /// Pick the profile for a parsed header.
    pub fn select(header: &ContainerHeader) -> Result<Self> {
        match header.magic {
            Magic::Hbrp if header.version < MIN_LEGACY_VERSION => {
                Err(DecodeError::MalformedHeader {
                    offset: 0,
                    fault: HeaderFault::UnsupportedVersion {
                        version: header.version,
                    },
                })
            }
            Magic::Hbrp => Ok(Self::LEGACY),
            Magic::Hbr2 if header.version < TAGGED_MESSAGES_SINCE => Ok(Self::ANNOTATED),
            Magic::Hbr2 => Ok(Self::MODERN),
        }
    }

    /// Whether a file of `version` stores team colours.
    pub fn has_team_colors(&self, version: u32) -> bool {
        version >= self.team_colors_since
    }
}

impl PartialEq for SchemaProfile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.payload_codec == other.payload_codec
            && self.message_table == other.message_table
            && self.discs == other.discs
            && self.team_colors_since == other.team_colors_since
            && self.angle == other.angle
            && self.frame_delta == other.frame_delta
            && self.sender == other.sender
            && self.actions.name == other.actions.name
    }
}

impl fmt::Debug for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaProfile")
            .field("name", &self.name)
            .field("payload_codec", &self.payload_codec)
            .field("message_table", &self.message_table)
            .field("discs", &self.discs)
            .field("team_colors_since", &self.team_colors_since)
            .field("angle", &self.angle)
            .field("frame_delta", &self.frame_delta)
            .field("sender", &self.sender)
            .field("actions", &self.actions.name)
            .finish()
    }
}
