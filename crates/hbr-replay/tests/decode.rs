//! Whole-file decoding across container revisions.
//!
//! Each test builds a complete file with `ReplayFixture`, decodes it
//! through the public API and checks the sections and the action log.

use hbr_core::{DecodeError, DiscriminantKind, HeaderFault};
use hbr_replay::{
    ActionKind, DecodeOptions, DiscSet, MessageBody, ReplayDecoder, ReplayReader, SchemaProfile,
    Team,
};
use hbr_test_utils::{
    GameFixture, PlayerFixture, ReplayFixture, RoomFixture, StadiumFixture, WireWriter,
};

// ── Helpers ─────────────────────────────────────────────────────

fn decoder() -> ReplayDecoder {
    ReplayDecoder::new(DecodeOptions::default()).unwrap()
}

fn team_colors(w: &mut WireWriter, wide_angle: bool) {
    for (angle, stripe) in [(0u32, 0xe56e56u32), (90, 0x5689e5)] {
        if wide_angle {
            w.u32(angle);
        } else {
            w.u16(angle as u16);
        }
        w.u32(0xffffff).u8(1).u32(stripe);
    }
}

/// Room, two players and team colours in the modern layout.
fn modern_snapshot(w: &mut WireWriter) {
    RoomFixture::new("Futsal x4")
        .stadium(StadiumFixture::custom("Futsal"))
        .game(GameFixture::kickoff(5))
        .write(w);
    w.u8(2);
    PlayerFixture::new(1, "ana").team(1).admin(true).write(w, 12);
    PlayerFixture::new(2, "beto").team(2).write(w, 12);
    team_colors(w, true);
}

// ── Canonical path ──────────────────────────────────────────────

#[test]
fn room_only_file() {
    let mut w = WireWriter::new();
    RoomFixture::new("R").score_limit(3).write(&mut w);
    let file = ReplayFixture::modern(12)
        .duration(100)
        .payload(w.into_bytes())
        .build();

    let replay = decoder().decode(&file).unwrap();
    assert_eq!(replay.version, 12);
    assert_eq!(replay.duration, 100);
    assert_eq!(replay.room_info.name, "R");
    assert_eq!(replay.room_info.score_limit, 3);
    assert_eq!(replay.room_info.time_limit, 180);
    assert!(!replay.room_info.locked);
    assert!(replay.messages.is_empty());
    assert!(replay.players.is_empty());
    assert!(replay.actions.is_empty());
}

#[test]
fn modern_file_with_actions() {
    let mut w = WireWriter::new();
    w.u16(2).varint(0).u8(4).varint(12).u8(9);
    modern_snapshot(&mut w);
    w.varint(60).u16(1).u8(4).string("buenas");
    w.varint(0).u16(0).u8(7);
    w.varint(45).u16(2).u8(12).i32(2).u8(1);
    w.varint(15).u16(1).u8(3).u32(0b10001);
    let file = ReplayFixture::modern(12).payload(w.into_bytes()).build();

    let replay = decoder().decode(&file).unwrap();
    assert_eq!(replay.messages.len(), 2);
    assert_eq!(replay.messages[1].tag_name(), Some("Pause"));
    assert!(replay.room_info.stadium.is_custom());
    assert_eq!(replay.room_info.stadium.name(), "Futsal");
    assert_eq!(replay.players.len(), 2);
    assert!(replay.players[0].admin);
    assert_eq!(replay.players[1].team, Team::Blue);
    assert!(matches!(replay.discs, DiscSet::Kinematic(ref d) if d.len() == 5));
    let colors = replay.team_colors.as_ref().unwrap();
    assert_eq!(colors.blue.angle, 90);

    let frames: Vec<_> = replay.actions.iter().map(|a| a.frame).collect();
    assert_eq!(frames, [60, 60, 105, 120]);
    assert_eq!(
        replay.actions[2].kind,
        ActionKind::PlayerTeamChange {
            player_id: 2,
            team: Team::Red
        }
    );
    assert_eq!(replay.actions[3].kind, ActionKind::PlayerInput { input: 17 });
    assert_eq!(replay.actions[3].replay_time(), 2.0);
}

#[test]
fn annotated_message_table() {
    let mut w = WireWriter::new();
    w.u16(2);
    w.varint(5).u8(1).i32(1).string("hola");
    w.varint(9).u8(3).u8(1);
    RoomFixture::new("old but gold").write(&mut w);
    w.u8(0);
    team_colors(&mut w, true);
    let file = ReplayFixture::modern(8).payload(w.into_bytes()).build();

    let reader = ReplayReader::open(&file, &DecodeOptions::default()).unwrap();
    assert_eq!(*reader.profile(), SchemaProfile::ANNOTATED);
    let prelude = reader.prelude();
    assert_eq!(
        prelude.messages[0].body,
        Some(MessageBody::Chat {
            player_id: 1,
            text: "hola".into()
        })
    );
    assert_eq!(prelude.messages[1].body, Some(MessageBody::TeamGoal { team: 1 }));
    assert_eq!(prelude.room.name, "old but gold");
    assert!(prelude.team_colors.is_some());
    assert_eq!(reader.actions().count(), 0);
}

// ── Legacy containers ───────────────────────────────────────────

#[test]
fn legacy_file() {
    let mut w = WireWriter::new();
    RoomFixture::new("viejo").active(true).write(&mut w);
    w.u8(2);
    StadiumFixture::disc(&mut w);
    StadiumFixture::disc(&mut w);
    w.u8(1);
    PlayerFixture::new(3, "carla").team(1).write(&mut w, 7);
    // ChatMessage from player 3 after 30 frames, then MatchStart.
    w.u8(1).u32(30).u32(3).u8(16).string("hola");
    w.u8(0).u32(0).u8(6);
    // DiscMove.
    w.u8(1).u32(2).u32(0).u8(14).u8(0);
    for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
        w.f32_le(v);
    }
    let file = ReplayFixture::legacy(7).payload(w.into_bytes()).build();

    let replay = decoder().decode(&file).unwrap();
    assert_eq!(replay.version, 7);
    assert!(replay.room_info.game_active);
    assert!(replay.room_info.game.is_none());
    assert!(matches!(replay.discs, DiscSet::Physics(ref d) if d.len() == 2));
    assert_eq!(replay.players[0].name, "carla");
    assert_eq!(replay.players[0].handicap, None);
    assert!(replay.team_colors.is_none());

    assert_eq!(replay.actions.len(), 3);
    assert_eq!(replay.actions[0].sender, 3);
    assert_eq!(
        replay.actions[0].kind,
        ActionKind::ChatMessage {
            text: "hola".into()
        }
    );
    assert_eq!(replay.actions[1].frame, 30);
    assert_eq!(replay.actions[2].frame, 32);
    assert!(matches!(replay.actions[2].kind, ActionKind::DiscMove(_)));
}

#[test]
fn legacy_version_first_little_endian_with_colors() {
    let mut w = WireWriter::new();
    RoomFixture::new("lobby").write(&mut w);
    w.u8(0);
    team_colors(&mut w, false);
    let file = ReplayFixture::legacy(12)
        .version_first()
        .little_endian()
        .duration(3600)
        .payload(w.into_bytes())
        .build();

    let replay = decoder().decode(&file).unwrap();
    assert_eq!(replay.version, 12);
    assert_eq!(replay.duration, 3600);
    assert_eq!(replay.duration_secs(), 60.0);
    let colors = replay.team_colors.unwrap();
    assert_eq!(colors.red.angle, 0);
    assert_eq!(colors.blue.angle, 90);
    assert_eq!(colors.blue.stripes[0].to_string(), "5689e5");
}

#[test]
fn ancient_legacy_is_rejected() {
    let file = ReplayFixture::legacy(6).build();
    assert!(matches!(
        decoder().decode(&file),
        Err(DecodeError::MalformedHeader {
            fault: HeaderFault::UnsupportedVersion { version: 6 },
            ..
        })
    ));
}

// ── Failure policy ──────────────────────────────────────────────

fn file_with_bad_discriminant() -> Vec<u8> {
    let mut w = WireWriter::new();
    RoomFixture::new("R").write(&mut w);
    w.u8(0);
    team_colors(&mut w, true);
    w.varint(10).u16(0).u8(7);
    w.varint(10).u16(0).u8(8);
    w.varint(10).u16(0).u8(200).u8(1).u8(2).u8(3);
    ReplayFixture::modern(12).payload(w.into_bytes()).build()
}

#[test]
fn strict_mode_fails_on_unknown_action() {
    let err = decoder().decode(&file_with_bad_discriminant()).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err,
        DecodeError::UnsupportedDiscriminant {
            kind: DiscriminantKind::Action,
            value: 200,
            table_len: 24,
            ..
        }
    ));
}

#[test]
fn best_effort_keeps_prefix() {
    let partial = decoder().decode_partial(&file_with_bad_discriminant());
    assert!(!partial.is_complete());
    assert_eq!(partial.prelude.as_ref().unwrap().room.name, "R");
    let kinds: Vec<_> = partial.actions.iter().map(|a| a.kind.clone()).collect();
    assert_eq!(kinds, [ActionKind::MatchStart, ActionKind::MatchStopped]);
    assert_eq!(partial.actions[1].frame, 20);
    assert!(matches!(
        partial.error,
        Some(DecodeError::UnsupportedDiscriminant { value: 200, .. })
    ));
}

#[test]
fn profile_override() {
    // A v12 HBR2 body decoded with the annotated table layout forced off.
    let mut w = WireWriter::new();
    RoomFixture::new("R").write(&mut w);
    let file = ReplayFixture::modern(12).payload(w.into_bytes()).build();
    let decoder = ReplayDecoder::new(DecodeOptions {
        profile: Some(SchemaProfile::ANNOTATED),
        ..DecodeOptions::default()
    })
    .unwrap();
    assert_eq!(decoder.decode(&file).unwrap().room_info.name, "R");
}

// ── Output surface ──────────────────────────────────────────────

#[test]
fn json_projection() {
    let mut w = WireWriter::new();
    modern_snapshot(&mut w);
    w.varint(100).u16(1).u8(4).string("gg");
    let file = ReplayFixture::modern(12).payload(w.into_bytes()).build();
    let replay = decoder().decode(&file).unwrap();

    let json: serde_json::Value = serde_json::from_str(&replay.to_json().unwrap()).unwrap();
    for key in [
        "version",
        "duration",
        "room_info",
        "messages",
        "players",
        "team_colors",
        "discs",
        "actions",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["room_info"]["stadium"]["custom"], true);
    assert_eq!(json["players"][0]["discId"], 1);
    assert_eq!(json["team_colors"]["red"]["stripes"][0], "e56e56");
    let action = &json["actions"][0];
    assert_eq!(action["type"], "ChatMessage");
    assert_eq!(action["replayTime"], 1.67);
    assert_eq!(action["sender"], 1);
    assert_eq!(action["info"]["text"], "gg");
}
