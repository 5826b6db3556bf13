//! Discriminant tables.
//!
//! The position of an entry in its table is the wire discriminant.
//! Tables are static and never reordered.

use std::fmt;

use hbr_core::{ByteCursor, Result};

use super::decode as d;
use super::ActionKind;

/// Body decoder for one action type.
pub type DecodeFn = fn(&mut ByteCursor<'_>) -> Result<ActionKind>;

/// One row of an [`ActionTable`].
#[derive(Clone, Copy)]
pub struct ActionEntry {
    /// Variant name, as it appears in the `type` field of the projection.
    pub name: &'static str,
    /// Reads the body that follows the discriminant.
    pub decode: DecodeFn,
}

impl fmt::Debug for ActionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionEntry").field(&self.name).finish()
    }
}

const fn entry(name: &'static str, decode: DecodeFn) -> ActionEntry {
    ActionEntry { name, decode }
}

/// An ordered discriminant table.
#[derive(Debug)]
pub struct ActionTable {
    /// Table name used in logs.
    pub name: &'static str,
    /// Entries in discriminant order.
    pub entries: &'static [ActionEntry],
}

impl ActionTable {
    /// Table used by `HBR2` files.
    pub const MODERN: ActionTable = ActionTable {
        name: "modern",
        entries: &[
            entry("Message", d::message),
            entry("ToggleChat", d::toggle_chat),
            entry("ChangeStadium", d::change_stadium),
            entry("PlayerInput", d::player_input),
            entry("ChatMessage", d::chat_message),
            entry("PlayerJoined", d::player_joined),
            entry("PlayerLeft", d::player_left),
            entry("MatchStart", d::match_start),
            entry("MatchStopped", d::match_stopped),
            entry("ChangePaused", d::change_paused),
            entry("ChangeGameSetting", d::change_game_setting),
            entry("StadiumUpdate", d::stadium_update),
            entry("PlayerTeamChange", d::player_team_change),
            entry("ChangeTeamsLock", d::change_teams_lock),
            entry("PlayerAdminChange", d::player_admin_change),
            entry("AutoTeamBalance", d::auto_team_balance),
            entry("Desynced", d::desynced),
            entry("BroadcastPings", d::broadcast_pings),
            entry("AvatarChange", d::avatar_change),
            entry("TeamColorsChange", d::team_colors_change),
            entry("PlayerOrderChange", d::player_order_change),
            entry("KickRateLimit", d::kick_rate_limit),
            entry("PlayerAvatarSet", d::player_avatar_set),
            entry("DiscUpdate", d::disc_update),
        ],
    };

    /// Table used by `HBRP` files.
    pub const LEGACY: ActionTable = ActionTable {
        name: "legacy",
        entries: &[
            entry("PlayerJoined", d::player_joined),
            entry("PlayerLeft", d::player_left),
            entry("PlayerAdminChange", d::player_admin_change),
            entry("PlayerAvatarChange", d::player_avatar_change),
            entry("PlayerTeamChange", d::player_team_change),
            entry("PlayerHandicapChange", d::player_handicap_change),
            entry("MatchStart", d::match_start),
            entry("MatchStopped", d::match_stopped),
            entry("ChangePaused", d::change_paused),
            entry("ChangeTeamsLock", d::change_teams_lock),
            entry("ChangeGameSetting", d::change_game_setting),
            entry("ChangeStadium", d::change_stadium),
            entry("ChangeColors", d::change_colors),
            entry("BroadcastPings", d::broadcast_pings),
            entry("DiscMove", d::disc_move),
            entry("LogicUpdate", d::logic_update),
            entry("ChatMessage", d::chat_message),
            entry("Desynced", d::desynced),
        ],
    };

    /// Entry for a discriminant, or `None` past the end of the table.
    pub fn get(&self, tag: u8) -> Option<&ActionEntry> {
        self.entries.get(usize::from(tag))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discriminant of the entry called `name`.
    pub fn position(&self, name: &str) -> Option<u8> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .and_then(|i| u8::try_from(i).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbr_test_utils::WireWriter;

    #[test]
    fn table_sizes() {
        assert_eq!(ActionTable::MODERN.len(), 24);
        assert_eq!(ActionTable::LEGACY.len(), 18);
        assert!(ActionTable::MODERN.get(24).is_none());
        assert!(ActionTable::LEGACY.get(18).is_none());
    }

    #[test]
    fn names_are_unique() {
        for table in [&ActionTable::MODERN, &ActionTable::LEGACY] {
            let mut names: Vec<_> = table.entries.iter().map(|e| e.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), table.len(), "{}", table.name);
        }
    }

    #[test]
    fn wire_positions() {
        assert_eq!(ActionTable::MODERN.position("Message"), Some(0));
        assert_eq!(ActionTable::MODERN.position("ChatMessage"), Some(4));
        assert_eq!(ActionTable::MODERN.position("DiscUpdate"), Some(23));
        assert_eq!(ActionTable::LEGACY.position("ChatMessage"), Some(16));
        assert_eq!(ActionTable::LEGACY.position("DiscUpdate"), None);
    }

    #[test]
    fn entry_names_match_projection() {
        // Every entry's name is the serde tag of what it decodes.
        let mut w = WireWriter::new();
        w.i32(1).u8(0);
        let bytes = w.into_bytes();
        let entry = ActionTable::MODERN.get(14).unwrap();
        let kind = (entry.decode)(&mut ByteCursor::new(&bytes)).unwrap();
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], entry.name);
    }
}
