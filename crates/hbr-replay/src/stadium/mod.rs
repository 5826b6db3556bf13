//! Stadium decoding.
//!
//! A stadium is either one of the ten built-in maps, identified by a
//! single type byte, or a custom map (type byte `255`) followed by its
//! full geometry and physics description:
//!
//! ```text
//! name, Background, maxView w/h, spawnDistance, PlayerPhysics,
//! nullable viewWidth override, cameraFollow, canBeStored, fullReset,
//! Vertex*, Segment*, Plane*, Goal*, Disc*, Joint*, redSpawn*, blueSpawn*
//! ```
//!
//! Every `*` list is prefixed by a one-byte count.

pub mod background;
pub mod collision;
pub mod elements;
pub mod physics;

use hbr_core::{ByteCursor, Codec, DecodeError, DiscriminantKind, Result};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub use background::{Background, BackgroundKind};
pub use collision::{parse_mask, CollisionMask};
pub use elements::{Disc, Goal, Joint, Plane, Point, Segment, Vertex};
pub use physics::PlayerPhysics;

use crate::inflate::inflate;
use elements::decode_list;

/// Type byte marking a custom stadium.
pub const CUSTOM_STADIUM: u8 = 255;

/// The built-in maps, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltInStadium {
    /// Type 0.
    Classic,
    /// Type 1.
    Easy,
    /// Type 2.
    Small,
    /// Type 3.
    Big,
    /// Type 4.
    Rounded,
    /// Type 5.
    Hockey,
    /// Type 6.
    BigHockey,
    /// Type 7.
    BigEasy,
    /// Type 8.
    BigRounded,
    /// Type 9.
    Huge,
}

impl BuiltInStadium {
    /// All built-ins; the index is the wire type byte.
    pub const ALL: [BuiltInStadium; 10] = [
        Self::Classic,
        Self::Easy,
        Self::Small,
        Self::Big,
        Self::Rounded,
        Self::Hockey,
        Self::BigHockey,
        Self::BigEasy,
        Self::BigRounded,
        Self::Huge,
    ];

    /// Look up a type byte.
    pub fn from_byte(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Display name as shown in the game.
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Easy => "Easy",
            Self::Small => "Small",
            Self::Big => "Big",
            Self::Rounded => "Rounded",
            Self::Hockey => "Hockey",
            Self::BigHockey => "Big Hockey",
            Self::BigEasy => "Big Easy",
            Self::BigRounded => "Big Rounded",
            Self::Huge => "Huge",
        }
    }
}

/// A fully described custom stadium.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStadium {
    /// Stadium name.
    pub name: String,
    /// Pitch appearance.
    #[serde(rename = "bg")]
    pub background: Background,
    /// Maximum visible width.
    pub max_view_width: f64,
    /// Maximum visible height.
    pub max_view_height: f64,
    /// Distance of kickoff spawn points from the centre.
    pub spawn_distance: f64,
    /// Player disc physics.
    pub player_physics: PlayerPhysics,
    /// Fixed camera width, if the stadium locks it.
    pub view_width_override: Option<i32>,
    /// Camera follows the player instead of the ball.
    pub camera_follow: bool,
    /// Whether players may save the stadium.
    pub can_be_stored: bool,
    /// Reset every disc after a goal, not just the ball and players.
    pub full_reset_after_goal: bool,
    /// Segment endpoints.
    pub vertexes: Vec<Vertex>,
    /// Walls.
    pub segments: Vec<Segment>,
    /// Infinite planes.
    pub planes: Vec<Plane>,
    /// Goal lines.
    pub goals: Vec<Goal>,
    /// Discs, the ball first.
    pub discs: Vec<Disc>,
    /// Disc joints.
    pub joints: Vec<Joint>,
    /// Red team spawn points.
    pub red_spawn_points: Vec<Point>,
    /// Blue team spawn points.
    pub blue_spawn_points: Vec<Point>,
}

impl CustomStadium {
    /// Decode the body that follows the `255` type byte.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        let name = c.read_string()?;
        let background = Background::decode(c)?;
        let max_view_width = c.read_f64_be()?;
        let max_view_height = c.read_f64_be()?;
        let spawn_distance = c.read_f64_be()?;
        let player_physics = PlayerPhysics::decode(c)?;
        let view_width_override = c.read_nullable_i32_be()?;
        let camera_follow = c.read_bool()?;
        let can_be_stored = c.read_bool()?;
        let full_reset_after_goal = c.read_bool()?;
        Ok(Self {
            name,
            background,
            max_view_width,
            max_view_height,
            spawn_distance,
            player_physics,
            view_width_override,
            camera_follow,
            can_be_stored,
            full_reset_after_goal,
            vertexes: decode_list(c, Vertex::decode)?,
            segments: decode_list(c, Segment::decode)?,
            planes: decode_list(c, Plane::decode)?,
            goals: decode_list(c, Goal::decode)?,
            discs: decode_list(c, Disc::decode)?,
            joints: decode_list(c, Joint::decode)?,
            red_spawn_points: decode_list(c, Point::decode)?,
            blue_spawn_points: decode_list(c, Point::decode)?,
        })
    }
}

/// The stadium a room is playing on.
#[derive(Clone, Debug, PartialEq)]
pub enum Stadium {
    /// One of the ten built-in maps.
    BuiltIn(BuiltInStadium),
    /// A custom map.
    Custom(Box<CustomStadium>),
}

impl Stadium {
    /// Decode a type byte and, for custom stadiums, the full body.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        let offset = c.position();
        let kind = c.read_u8()?;
        if let Some(builtin) = BuiltInStadium::from_byte(kind) {
            return Ok(Self::BuiltIn(builtin));
        }
        if kind != CUSTOM_STADIUM {
            return Err(DecodeError::UnsupportedDiscriminant {
                offset,
                kind: DiscriminantKind::Stadium,
                value: kind,
                table_len: BuiltInStadium::ALL.len(),
            });
        }
        CustomStadium::decode(c).map(|s| Self::Custom(Box::new(s)))
    }

    /// Inflate and decode a raw-deflated stadium, as carried by
    /// stadium-change actions.
    pub fn from_compressed(bytes: &[u8], limit: usize) -> Result<Self> {
        let raw = inflate(Codec::RawDeflate, bytes, limit, 0)?;
        Self::decode(&mut ByteCursor::new(&raw))
    }

    /// Stadium name.
    pub fn name(&self) -> &str {
        match self {
            Self::BuiltIn(b) => b.name(),
            Self::Custom(s) => &s.name,
        }
    }

    /// Whether this is a custom stadium.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Serialize for Stadium {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::BuiltIn(b) => {
                let mut st = serializer.serialize_struct("Stadium", 2)?;
                st.serialize_field("name", b.name())?;
                st.serialize_field("custom", &false)?;
                st.end()
            }
            Self::Custom(s) => {
                #[derive(Serialize)]
                struct Tagged<'a> {
                    custom: bool,
                    #[serde(flatten)]
                    stadium: &'a CustomStadium,
                }
                Tagged {
                    custom: true,
                    stadium: s,
                }
                .serialize(serializer)
            }
        }
    }
}
