//! Frame-stamped actions.
//!
//! Every entry of the action log is a closed [`ActionKind`] variant
//! selected by a one-byte discriminant through a versioned
//! [`ActionTable`]. The log decoder attaches the accumulated frame and
//! the sender to produce an [`Action`].

mod decode;
pub mod registry;

use serde::{Serialize, Serializer};

use crate::stadium::{CollisionMask, Stadium};
use crate::team::{Team, TeamColor};

pub use registry::{ActionEntry, ActionTable};

/// Frames per second of game time.
pub const FRAMES_PER_SECOND: f64 = 60.0;

/// Longest accepted `Message` text.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Longest accepted chat line.
pub const MAX_CHAT_CHARS: usize = 140;

/// Longest accepted leave reason.
pub const MAX_LEAVE_REASON_CHARS: usize = 100;

/// Avatars longer than this are cut.
pub const MAX_AVATAR_CHARS: usize = 2;

/// Optional disc properties carried by a `DiscUpdate`.
///
/// Bits 0-9 of the presence mask gate the ten floats in field order,
/// bits 10-12 gate the three integers.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscUpdate {
    /// Target disc.
    pub disc_id: i32,
    /// Whether `disc_id` refers to a player disc.
    pub is_player_disc: bool,
    /// Horizontal position.
    pub x: Option<f32>,
    /// Vertical position.
    pub y: Option<f32>,
    /// Horizontal velocity.
    pub vx: Option<f32>,
    /// Vertical velocity.
    pub vy: Option<f32>,
    /// Horizontal gravity.
    pub ax: Option<f32>,
    /// Vertical gravity.
    pub ay: Option<f32>,
    /// Radius.
    pub radius: Option<f32>,
    /// Bounce coefficient.
    pub b_coef: Option<f32>,
    /// Inverse mass.
    pub inv_mass: Option<f32>,
    /// Damping.
    pub damping: Option<f32>,
    /// Colour.
    pub color: Option<i32>,
    /// Collision mask.
    pub c_mask: Option<CollisionMask>,
    /// Collision group.
    pub c_group: Option<CollisionMask>,
}

/// Kinematic state set by a legacy `DiscMove`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscMove {
    /// Target disc.
    pub disc_id: u8,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Horizontal velocity.
    pub x_speed: f32,
    /// Vertical velocity.
    pub y_speed: f32,
    /// Radius.
    pub radius: f32,
}

/// Decoded contents of one action.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(
    tag = "type",
    content = "info",
    rename_all_fields = "camelCase"
)]
pub enum ActionKind {
    /// Coloured room notice.
    Message {
        /// Text, at most 1000 characters.
        text: String,
        /// Text colour.
        color: i32,
        /// Font style.
        style: u8,
        /// Sound flag.
        flag: u8,
    },
    /// Typing indicator.
    ToggleChat {
        /// Indicator state.
        flag: u8,
    },
    /// Stadium replaced by the host.
    ChangeStadium {
        /// Raw-deflated stadium.
        #[serde(skip)]
        stadium: Vec<u8>,
    },
    /// Player input bitmask.
    PlayerInput {
        /// Direction and kick bits.
        input: u32,
    },
    /// Chat line.
    ChatMessage {
        /// Text, at most 140 characters.
        text: String,
    },
    /// A player joined.
    PlayerJoined {
        /// New player id.
        player_id: i32,
        /// Name.
        name: Option<String>,
        /// Country code.
        country: Option<String>,
        /// Avatar.
        avatar: Option<String>,
    },
    /// A player left or was kicked.
    PlayerLeft {
        /// Departing player.
        player_id: i32,
        /// Reason, at most 100 characters.
        reason: Option<String>,
        /// Whether the player was kicked.
        kicked: bool,
    },
    /// Match started.
    MatchStart,
    /// Match stopped.
    MatchStopped,
    /// Pause toggled.
    ChangePaused {
        /// New pause state.
        paused: bool,
    },
    /// Score or time limit changed.
    ChangeGameSetting {
        /// Which setting.
        setting: i32,
        /// New value.
        value: i32,
    },
    /// Stadium updated in place.
    StadiumUpdate {
        /// Raw-deflated stadium.
        #[serde(skip)]
        stadium: Vec<u8>,
    },
    /// Player moved team.
    PlayerTeamChange {
        /// Moved player.
        player_id: i32,
        /// New team.
        team: Team,
    },
    /// Team lock toggled.
    ChangeTeamsLock {
        /// New lock state.
        locked: bool,
    },
    /// Admin rights changed.
    PlayerAdminChange {
        /// Affected player.
        player_id: i32,
        /// New admin state.
        admin: bool,
    },
    /// Teams rebalanced.
    AutoTeamBalance,
    /// A player desynchronised.
    Desynced {
        /// Affected player.
        player_id: u32,
    },
    /// Latency broadcast.
    BroadcastPings {
        /// One ping per player, in room order.
        pings: Vec<u64>,
    },
    /// Sender changed their own avatar.
    AvatarChange {
        /// New avatar, at most two characters.
        avatar: Option<String>,
    },
    /// Kit colours changed.
    TeamColorsChange {
        /// Affected team.
        team: Team,
        /// New colours.
        colors: TeamColor,
    },
    /// Player list reordered.
    PlayerOrderChange {
        /// Whether the ids move to the end.
        append: bool,
        /// Reordered players.
        player_ids: Vec<i32>,
    },
    /// Kick rate limiter changed.
    KickRateLimit {
        /// Minimum frames between kicks.
        min: i32,
        /// Refill rate.
        rate: i32,
        /// Burst size.
        burst: i32,
    },
    /// Avatar set on another player.
    PlayerAvatarSet {
        /// New avatar, at most two characters.
        avatar: Option<String>,
        /// Affected player.
        player_id: i32,
    },
    /// Disc properties overwritten.
    DiscUpdate(DiscUpdate),
    /// Another player's avatar changed (legacy).
    PlayerAvatarChange {
        /// Affected player.
        player_id: u32,
        /// New avatar.
        avatar: String,
    },
    /// Handicap changed (legacy).
    PlayerHandicapChange {
        /// Affected player.
        player_id: u32,
        /// New handicap.
        handicap: u8,
    },
    /// Kit colours changed (legacy string form).
    ChangeColors {
        /// Team index.
        team: u8,
        /// Encoded colours.
        colors: String,
    },
    /// Disc teleported (legacy).
    DiscMove(DiscMove),
    /// Simulation checkpoint (legacy).
    LogicUpdate {
        /// Absolute frame.
        frame: u32,
    },
}

impl ActionKind {
    /// Decode the stadium carried by a stadium change, if any.
    pub fn stadium(&self, limit: usize) -> Option<hbr_core::Result<Stadium>> {
        match self {
            Self::ChangeStadium { stadium } | Self::StadiumUpdate { stadium } => {
                Some(Stadium::from_compressed(stadium, limit))
            }
            _ => None,
        }
    }
}

/// One entry of the action log.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    /// Absolute frame at which the action applies.
    pub frame: u64,
    /// Id of the player that sent it; `0` is the host.
    pub sender: u32,
    /// Decoded contents.
    pub kind: ActionKind,
}

impl Action {
    /// Seconds since recording start, rounded to two decimals.
    pub fn replay_time(&self) -> f64 {
        (self.frame as f64 / FRAMES_PER_SECOND * 100.0).round() / 100.0
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Projection<'a> {
            #[serde(flatten)]
            kind: &'a ActionKind,
            frame: u64,
            replay_time: f64,
            sender: u32,
        }
        Projection {
            kind: &self.kind,
            frame: self.frame,
            replay_time: self.replay_time(),
            sender: self.sender,
        }
        .serialize(serializer)
    }
}
