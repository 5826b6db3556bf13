//! Room settings and the in-progress game snapshot.

use hbr_core::{ByteCursor, Result};
use serde::Serialize;

use crate::schema::{DiscPlacement, SchemaProfile};
use crate::stadium::{Point, Stadium};
use crate::team::Team;

/// Position and velocity of one disc at recording start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DiscState {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Horizontal velocity.
    pub vx: f64,
    /// Vertical velocity.
    pub vy: f64,
}

impl DiscState {
    /// Read `x, y, vx, vy`.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            x: c.read_f64_be()?,
            y: c.read_f64_be()?,
            vx: c.read_f64_be()?,
            vy: c.read_f64_be()?,
        })
    }
}

/// State of a match that was running when recording started.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Game frame counter.
    pub frame: u32,
    /// Red goals.
    pub red_score: u8,
    /// Blue goals.
    pub blue_score: u8,
    /// Elapsed match time in seconds.
    pub match_time: f64,
    /// Remaining pause countdown.
    pub pause_timer: Option<f64>,
    /// Team taking the next kickoff.
    pub kick_off_team: Option<Team>,
    /// Goal or game-over animation timer.
    pub rules_timer: Option<f64>,
    /// Ball position.
    pub ball: Point,
    /// Every disc, ball first.
    pub discs: Vec<DiscState>,
}

impl Game {
    /// Decode the embedded game snapshot.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        let frame = c.read_u32_be()?;
        let red_score = c.read_u8()?;
        let blue_score = c.read_u8()?;
        let match_time = c.read_f64_be()?;
        let pause_timer = c.read_nullable(ByteCursor::read_f64_be)?;
        let kick_off_team = c.read_nullable(Team::decode)?;
        let rules_timer = c.read_nullable(ByteCursor::read_f64_be)?;
        let ball = Point::decode(c)?;
        let count = c.read_u8()?;
        let discs = (0..count)
            .map(|_| DiscState::decode(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            frame,
            red_score,
            blue_score,
            match_time,
            pause_timer,
            kick_off_team,
            rules_timer,
            ball,
            discs,
        })
    }
}

/// Room configuration at recording start.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room name.
    pub name: String,
    /// Whether teams are locked.
    pub locked: bool,
    /// Goals needed to win; `0` for none.
    pub score_limit: u32,
    /// Match length in minutes; `0` for none.
    pub time_limit: u32,
    /// Kick rate limiter burst size.
    pub kick_rate_burst: u16,
    /// Kick rate limiter refill rate.
    pub kick_rate_limit: u8,
    /// Minimum frames between kicks.
    pub kick_timeout: u8,
    /// The stadium in use.
    pub stadium: Stadium,
    /// Whether a match was running.
    pub game_active: bool,
    /// The running match, for layouts that embed it in the room.
    pub game: Option<Game>,
}

impl Room {
    /// Decode the room block using the profile's game placement rule.
    pub fn decode(c: &mut ByteCursor<'_>, profile: &SchemaProfile) -> Result<Self> {
        let name = c.read_string()?;
        let locked = c.read_bool()?;
        let score_limit = c.read_u32_be()?;
        let time_limit = c.read_u32_be()?;
        let kick_rate_burst = c.read_u16_be()?;
        let kick_rate_limit = c.read_u8()?;
        let kick_timeout = c.read_u8()?;
        let stadium = Stadium::decode(c)?;
        let game_active = c.read_bool()?;
        let game = match (game_active, profile.discs) {
            (true, DiscPlacement::InGame) => Some(Game::decode(c)?),
            _ => None,
        };
        Ok(Self {
            name,
            locked,
            score_limit,
            time_limit,
            kick_rate_burst,
            kick_rate_limit,
            kick_timeout,
            stadium,
            game_active,
            game,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbr_test_utils::{GameFixture, RoomFixture, WireWriter};

    #[test]
    fn idle_room() {
        let mut w = WireWriter::new();
        RoomFixture::new("R").score_limit(3).write(&mut w);
        let bytes = w.into_bytes();
        let mut c = ByteCursor::new(&bytes);
        let room = Room::decode(&mut c, &SchemaProfile::MODERN).unwrap();
        assert!(c.is_eof());
        assert_eq!(room.name, "R");
        assert_eq!(room.score_limit, 3);
        assert_eq!(room.time_limit, 180);
        assert_eq!(room.stadium.name(), "Classic");
        assert!(room.game.is_none());
    }

    #[test]
    fn embedded_game() {
        let mut w = WireWriter::new();
        RoomFixture::new("R")
            .game(GameFixture::kickoff(2))
            .write(&mut w);
        let bytes = w.into_bytes();
        let mut c = ByteCursor::new(&bytes);
        let room = Room::decode(&mut c, &SchemaProfile::MODERN).unwrap();
        assert!(c.is_eof());
        let game = room.game.unwrap();
        assert_eq!(game.discs.len(), 2);
        assert_eq!(game.kick_off_team, Some(Team::Red));
        assert_eq!(game.pause_timer, None);
    }

    #[test]
    fn legacy_room_leaves_discs_to_caller() {
        let mut w = WireWriter::new();
        RoomFixture::new("R").active(true).write(&mut w);
        let bytes = w.into_bytes();
        let mut c = ByteCursor::new(&bytes);
        let room = Room::decode(&mut c, &SchemaProfile::LEGACY).unwrap();
        assert!(room.game_active);
        assert!(room.game.is_none());
        assert!(c.is_eof());
    }

    #[test]
    fn json_uses_camel_case() {
        let mut w = WireWriter::new();
        RoomFixture::new("R").score_limit(3).write(&mut w);
        let bytes = w.into_bytes();
        let room = Room::decode(&mut ByteCursor::new(&bytes), &SchemaProfile::MODERN).unwrap();
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["scoreLimit"], 3);
        assert_eq!(json["kickRateBurst"], 2);
    }
}
