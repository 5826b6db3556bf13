//! Decoded replay documents.

use hbr_core::{ContainerHeader, DecodeError};
use serde::Serialize;

use crate::action::Action;
use crate::messages::Message;
use crate::player::Player;
use crate::prelude::{DiscSet, Prelude};
use crate::room::Room;
use crate::team::TeamColors;

/// A fully decoded replay.
///
/// Built once by [`ReplayDecoder`](crate::ReplayDecoder) and never
/// mutated. Serializes to the document layout:
///
/// ```text
/// { version, duration, room_info, messages, players,
///   team_colors, discs, actions }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Replay {
    /// Container format version.
    pub version: u32,
    /// Recording length in frames.
    pub duration: u32,
    /// Room settings at recording start.
    pub room_info: Room,
    /// Message table, empty when the file has none.
    pub messages: Vec<Message>,
    /// Players at recording start.
    pub players: Vec<Player>,
    /// Kit colours, when stored.
    pub team_colors: Option<TeamColors>,
    /// Disc states at recording start.
    pub discs: DiscSet,
    /// The action log, in file order.
    pub actions: Vec<Action>,
}

impl Replay {
    pub(crate) fn assemble(header: &ContainerHeader, prelude: Prelude, actions: Vec<Action>) -> Self {
        Self {
            version: header.version,
            duration: header.duration.unwrap_or_default(),
            room_info: prelude.room,
            messages: prelude.messages,
            players: prelude.players,
            team_colors: prelude.team_colors,
            discs: prelude.discs,
            actions,
        }
    }

    /// Recording length in seconds.
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.duration) / crate::action::FRAMES_PER_SECOND
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to an indented JSON string.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Everything a best-effort decode recovered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialReplay {
    /// The header, if it parsed.
    pub header: Option<ContainerHeader>,
    /// Sections before the action log, if the room decoded.
    pub prelude: Option<Prelude>,
    /// Actions decoded before the first failure.
    pub actions: Vec<Action>,
    /// The failure that stopped decoding, if any.
    pub error: Option<DecodeError>,
}

impl PartialReplay {
    /// Whether decoding reached the end without error.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}
