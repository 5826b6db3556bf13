//! Record fixtures.
//!
//! Each fixture writes one record in the wire order the decoders read:
//!
//! - [`StadiumFixture`]: a small custom stadium with one of every element.
//! - [`PlayerFixture`]: one player record, version-aware.
//! - [`RoomFixture`] / [`GameFixture`]: the room block and its game snapshot.
//! - [`ReplayFixture`]: a whole file: header plus compressed payload.

use crate::{deflate_raw, deflate_zlib, WireWriter};

// ── Stadium ─────────────────────────────────────────────────────

pub struct StadiumFixture {
    pub name: String,
}

impl StadiumFixture {
    pub fn custom(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// One physics disc: ball-sized, centred, mask `all`.
    pub fn disc(w: &mut WireWriter) {
        w.f64(0.0).f64(0.0).f64(0.0).f64(0.0);
        w.f64(10.0).f64(0.5).f64(1.0).f64(0.99);
        w.u32(0xffffff).i32(-1).i32(1);
    }

    /// Type byte `255` and the full custom body.
    pub fn write(&self, w: &mut WireWriter) {
        w.u8(255).string(&self.name);
        // Background: grass, 420x200, kickoff 75, corner 0, goal line 30.
        w.u8(1).f64(420.0).f64(200.0).f64(75.0).f64(0.0).f64(30.0).u32(0x718c5a);
        w.f64(400.0).f64(300.0).f64(170.0);
        for v in [0.5, 0.5, 0.96, 0.1, 0.07, 0.96, 5.0] {
            w.f64(v);
        }
        w.u8(1).i32(600);
        w.bool(true).bool(true).bool(false);

        // Vertexes.
        w.u8(2);
        w.f64(-370.0).f64(170.0).f64(1.0).i32(-1).i32(32);
        w.f64(370.0).f64(170.0).f64(1.0).i32(63).i32(32);
        // Segment with a NaN curve.
        w.u8(1);
        w.u8(0).u8(1).f64(1.0).i32(63).i32(32).f64(f64::NAN).bool(true).u32(0);
        // Plane.
        w.u8(1);
        w.f64(0.0).f64(1.0).f64(-200.0).f64(1.0).i32(1).i32(32);
        // Goals.
        w.u8(2);
        w.f64(-370.0).f64(64.0).f64(-370.0).f64(-64.0).u8(1);
        w.f64(370.0).f64(64.0).f64(370.0).f64(-64.0).u8(0);
        // Discs.
        w.u8(1);
        Self::disc(w);
        // Joint.
        w.u8(1);
        w.u8(0).u8(0).f64(0.0).f64(10.0).f64(f64::INFINITY).u32(0);
        // Spawn points: one red, no blue.
        w.u8(1).f64(-100.0).f64(0.0);
        w.u8(0);
    }
}

// ── Player ──────────────────────────────────────────────────────

pub struct PlayerFixture {
    pub id: i32,
    pub name: String,
    pub team: u8,
    pub admin: bool,
    pub avatar: String,
    pub country: String,
}

impl PlayerFixture {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            team: 0,
            admin: false,
            avatar: String::new(),
            country: "ar".into(),
        }
    }

    pub fn team(mut self, team: u8) -> Self {
        self.team = team;
        self
    }

    pub fn admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Write the record; the handicap field is included from version 11.
    pub fn write(&self, w: &mut WireWriter, version: u32) {
        w.i32(self.id)
            .string(&self.name)
            .bool(self.admin)
            .u8(self.team)
            .u8(self.id as u8)
            .string(&self.avatar)
            .u32(0)
            .bool(false)
            .bool(false)
            .string(&self.country);
        if version >= 11 {
            w.u16(0);
        }
        w.i32(self.id);
    }
}

// ── Room and game ───────────────────────────────────────────────

pub struct GameFixture {
    pub discs: u8,
    pub kick_off_team: Option<u8>,
    pub red_score: u8,
    pub blue_score: u8,
}

impl GameFixture {
    /// A game waiting for kickoff by the red team.
    pub fn kickoff(discs: u8) -> Self {
        Self {
            discs,
            kick_off_team: Some(1),
            red_score: 0,
            blue_score: 0,
        }
    }

    pub fn write(&self, w: &mut WireWriter) {
        w.u32(0).u8(self.red_score).u8(self.blue_score).f64(0.0);
        w.u8(0);
        match self.kick_off_team {
            Some(t) => w.u8(1).u8(t),
            None => w.u8(0),
        };
        w.u8(0);
        w.f64(0.0).f64(0.0);
        w.u8(self.discs);
        for i in 0..self.discs {
            w.f64(f64::from(i) * 10.0).f64(0.0).f64(0.0).f64(0.0);
        }
    }
}

pub struct RoomFixture {
    pub name: String,
    pub locked: bool,
    pub score_limit: u32,
    pub time_limit: u32,
    pub stadium: Option<StadiumFixture>,
    pub active: bool,
    pub game: Option<GameFixture>,
}

impl RoomFixture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locked: false,
            score_limit: 0,
            time_limit: 180,
            stadium: None,
            active: false,
            game: None,
        }
    }

    pub fn score_limit(mut self, n: u32) -> Self {
        self.score_limit = n;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn stadium(mut self, stadium: StadiumFixture) -> Self {
        self.stadium = Some(stadium);
        self
    }

    /// Set the game-active flag without writing a snapshot.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Mark the game active and embed `game` after the flag.
    pub fn game(mut self, game: GameFixture) -> Self {
        self.active = true;
        self.game = Some(game);
        self
    }

    pub fn write(&self, w: &mut WireWriter) {
        w.string(&self.name)
            .bool(self.locked)
            .u32(self.score_limit)
            .u32(self.time_limit)
            .u16(2)
            .u8(2)
            .u8(0);
        match &self.stadium {
            Some(s) => s.write(w),
            None => {
                w.u8(0);
            }
        }
        w.bool(self.active);
        if let Some(game) = &self.game {
            game.write(w);
        }
    }
}

// ── Whole files ─────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum Container {
    Modern,
    Legacy,
}

/// Builds a complete replay file around a raw payload.
pub struct ReplayFixture {
    container: Container,
    version: u32,
    duration: u32,
    version_first: bool,
    little_endian: bool,
    stored: bool,
    payload: Vec<u8>,
}

impl ReplayFixture {
    /// `HBR2`, raw-deflated payload.
    pub fn modern(version: u32) -> Self {
        Self {
            container: Container::Modern,
            version,
            duration: 600,
            version_first: false,
            little_endian: false,
            stored: false,
            payload: Vec::new(),
        }
    }

    /// `HBRP`, zlib payload.
    pub fn legacy(version: u32) -> Self {
        Self {
            container: Container::Legacy,
            ..Self::modern(version)
        }
    }

    pub fn duration(mut self, frames: u32) -> Self {
        self.duration = frames;
        self
    }

    /// Write `version` before the magic.
    pub fn version_first(mut self) -> Self {
        self.version_first = true;
        self
    }

    pub fn little_endian(mut self) -> Self {
        self.little_endian = true;
        self
    }

    /// Write the payload as given instead of compressing it.
    pub fn stored(mut self) -> Self {
        self.stored = true;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let magic: &[u8; 4] = match self.container {
            Container::Modern => b"HBR2",
            Container::Legacy => b"HBRP",
        };
        let word = |v: u32| {
            if self.little_endian {
                v.to_le_bytes()
            } else {
                v.to_be_bytes()
            }
        };
        let mut w = WireWriter::new();
        if self.version_first {
            w.bytes(&word(self.version)).bytes(magic);
        } else {
            w.bytes(magic).bytes(&word(self.version));
        }
        w.bytes(&word(self.duration));
        let body = match (self.stored, self.container) {
            (true, _) => self.payload.clone(),
            (false, Container::Modern) => deflate_raw(&self.payload),
            (false, Container::Legacy) => deflate_zlib(&self.payload),
        };
        w.bytes(&body);
        w.into_bytes()
    }
}
