//! Benchmark profiles for the HaxBall replay decoders.
//!
//! Provides deterministic synthetic inputs for benchmarks:
//!
//! - [`reference_profile`]: 4 players, 10K actions, custom stadium
//! - [`stress_profile`]: 12 players, 200K actions
//! - [`loose_dump`]: a zlib-compressed NDJSON tick dump for the prober

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use hbr_test_utils::{
    deflate_zlib, GameFixture, PlayerFixture, ReplayFixture, RoomFixture, StadiumFixture,
    WireWriter,
};

/// Format version used by every synthetic file.
pub const VERSION: u32 = 12;

/// Shape of a synthetic replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayProfile {
    /// Players in the snapshot; action senders are drawn from them.
    pub players: u16,
    /// Number of actions in the log.
    pub actions: usize,
    /// Generator seed.
    pub seed: u64,
}

/// 4 players and 10K actions.
pub fn reference_profile(seed: u64) -> Vec<u8> {
    build(ReplayProfile {
        players: 4,
        actions: 10_000,
        seed,
    })
}

/// 12 players and 200K actions.
pub fn stress_profile(seed: u64) -> Vec<u8> {
    build(ReplayProfile {
        players: 12,
        actions: 200_000,
        seed,
    })
}

fn lcg(seed: u64, i: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(i.wrapping_mul(1442695040888963407))
}

/// Build a complete `HBR2` file for `profile`.
///
/// Roughly 90% of actions are player inputs; the rest are chat lines,
/// team changes and pause toggles. Frame deltas are 0..4.
pub fn build(profile: ReplayProfile) -> Vec<u8> {
    let mut w = WireWriter::new();
    w.u16(0);
    RoomFixture::new("bench")
        .stadium(StadiumFixture::custom("Bench Arena"))
        .game(GameFixture::kickoff(5))
        .write(&mut w);
    w.u8(profile.players.min(u16::from(u8::MAX)) as u8);
    for id in 1..=profile.players.min(u16::from(u8::MAX)) {
        PlayerFixture::new(i32::from(id), format!("p{id}"))
            .team((id % 2 + 1) as u8)
            .write(&mut w, VERSION);
    }
    for (angle, stripe) in [(0u32, 0xe56e56u32), (90, 0x5689e5)] {
        w.u32(angle).u32(0xffffff).u8(1).u32(stripe);
    }

    let mut frames = 0u32;
    for i in 0..profile.actions {
        let r = lcg(profile.seed, i as u64) >> 16;
        let delta = (r % 4) as u32;
        frames += delta;
        let sender = (r >> 8) % u64::from(profile.players.max(1)) + 1;
        w.varint(u64::from(delta)).u16(sender as u16);
        match (r >> 24) % 100 {
            0..=89 => w.u8(3).u32((r >> 32) as u32 & 0x1f),
            90..=95 => w.u8(4).string("gg wp"),
            96..=98 => w.u8(12).i32(sender as i32).u8(((r >> 40) % 3) as u8),
            _ => w.u8(9).bool(r & 1 == 1),
        };
    }

    ReplayFixture::modern(VERSION)
        .duration(frames)
        .payload(w.into_bytes())
        .build()
}

/// A zlib-compressed NDJSON dump of `ticks` records.
pub fn loose_dump(seed: u64, ticks: usize) -> Vec<u8> {
    let mut text = String::with_capacity(ticks * 48);
    for i in 0..ticks {
        let r = lcg(seed, i as u64);
        let x = (r >> 40) as f64 / 65_536.0;
        let y = ((r >> 16) & 0xffff) as f64 / 256.0;
        text.push_str(&format!("{{\"tick\":{i},\"ball\":[{x:.2},{y:.2}]}}\n"));
    }
    deflate_zlib(text.as_bytes())
}
