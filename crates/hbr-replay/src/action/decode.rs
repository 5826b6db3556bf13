//! Per-type action body decoders.
//!
//! Each function reads exactly the body of one action variant. The
//! frame delta, sender and discriminant have already been consumed.

use hbr_core::{ByteCursor, Result};

use super::{
    ActionKind, DiscMove, DiscUpdate, MAX_AVATAR_CHARS, MAX_CHAT_CHARS, MAX_LEAVE_REASON_CHARS,
    MAX_MESSAGE_CHARS,
};
use crate::schema::IntWidth;
use crate::stadium::CollisionMask;
use crate::team::{Team, TeamColor};

fn raw_block(c: &mut ByteCursor<'_>) -> Result<Vec<u8>> {
    c.atomically(|c| {
        let len = c.read_varint_len()?;
        c.read_bytes(len).map(<[u8]>::to_vec)
    })
}

fn avatar(c: &mut ByteCursor<'_>) -> Result<Option<String>> {
    Ok(c
        .read_nullable_string()?
        .map(|a| a.chars().take(MAX_AVATAR_CHARS).collect()))
}

pub(super) fn message(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::Message {
        text: c.read_string_max("message", MAX_MESSAGE_CHARS)?,
        color: c.read_i32_be()?,
        style: c.read_u8()?,
        flag: c.read_u8()?,
    })
}

pub(super) fn toggle_chat(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::ToggleChat { flag: c.read_u8()? })
}

pub(super) fn change_stadium(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::ChangeStadium {
        stadium: raw_block(c)?,
    })
}

pub(super) fn player_input(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::PlayerInput {
        input: c.read_u32_be()?,
    })
}

pub(super) fn chat_message(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::ChatMessage {
        text: c.read_string_max("chat message", MAX_CHAT_CHARS)?,
    })
}

pub(super) fn player_joined(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::PlayerJoined {
        player_id: c.read_i32_be()?,
        name: c.read_nullable_string()?,
        country: c.read_nullable_string()?,
        avatar: c.read_nullable_string()?,
    })
}

pub(super) fn player_left(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::PlayerLeft {
        player_id: c.read_i32_be()?,
        reason: c.read_nullable_string_max("leave reason", MAX_LEAVE_REASON_CHARS)?,
        kicked: c.read_bool()?,
    })
}

pub(super) fn match_start(_: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::MatchStart)
}

pub(super) fn match_stopped(_: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::MatchStopped)
}

pub(super) fn change_paused(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::ChangePaused {
        paused: c.read_bool()?,
    })
}

pub(super) fn change_game_setting(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::ChangeGameSetting {
        setting: c.read_i32_be()?,
        value: c.read_i32_be()?,
    })
}

pub(super) fn stadium_update(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::StadiumUpdate {
        stadium: raw_block(c)?,
    })
}

pub(super) fn player_team_change(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::PlayerTeamChange {
        player_id: c.read_i32_be()?,
        team: Team::decode(c)?,
    })
}

pub(super) fn change_teams_lock(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::ChangeTeamsLock {
        locked: c.read_bool()?,
    })
}

pub(super) fn player_admin_change(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::PlayerAdminChange {
        player_id: c.read_i32_be()?,
        admin: c.read_bool()?,
    })
}

pub(super) fn auto_team_balance(_: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::AutoTeamBalance)
}

pub(super) fn desynced(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::Desynced {
        player_id: c.read_u32_be()?,
    })
}

pub(super) fn broadcast_pings(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    let count = c.read_varint()?;
    // Each ping is at least one byte.
    let capacity = usize::try_from(count).unwrap_or(0).min(c.remaining());
    let mut pings = Vec::with_capacity(capacity);
    for _ in 0..count {
        pings.push(c.read_varint()?);
    }
    Ok(ActionKind::BroadcastPings { pings })
}

pub(super) fn avatar_change(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::AvatarChange { avatar: avatar(c)? })
}

pub(super) fn team_colors_change(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::TeamColorsChange {
        team: Team::decode(c)?,
        colors: TeamColor::decode(c, IntWidth::U32)?,
    })
}

pub(super) fn player_order_change(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    let append = c.read_bool()?;
    let count = c.read_u8()?;
    let player_ids = (0..count)
        .map(|_| c.read_i32_be())
        .collect::<Result<Vec<_>>>()?;
    Ok(ActionKind::PlayerOrderChange { append, player_ids })
}

pub(super) fn kick_rate_limit(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::KickRateLimit {
        min: c.read_i32_be()?,
        rate: c.read_i32_be()?,
        burst: c.read_i32_be()?,
    })
}

pub(super) fn player_avatar_set(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::PlayerAvatarSet {
        avatar: avatar(c)?,
        player_id: c.read_i32_be()?,
    })
}

pub(super) fn disc_update(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    let disc_id = c.read_i32_be()?;
    let is_player_disc = c.read_bool()?;
    let mask = c.read_u16_be()?;
    let present = |bit: usize| mask & (1 << bit) != 0;

    let mut floats = [None; 10];
    for (bit, slot) in floats.iter_mut().enumerate() {
        if present(bit) {
            *slot = Some(c.read_f32_le()?);
        }
    }
    let mut ints = [None; 3];
    for (i, slot) in ints.iter_mut().enumerate() {
        if present(floats.len() + i) {
            *slot = Some(c.read_i32_be()?);
        }
    }

    let [x, y, vx, vy, ax, ay, radius, b_coef, inv_mass, damping] = floats;
    let [color, c_mask, c_group] = ints;
    Ok(ActionKind::DiscUpdate(DiscUpdate {
        disc_id,
        is_player_disc,
        x,
        y,
        vx,
        vy,
        ax,
        ay,
        radius,
        b_coef,
        inv_mass,
        damping,
        color,
        c_mask: c_mask.map(CollisionMask),
        c_group: c_group.map(CollisionMask),
    }))
}

// ── Legacy-only bodies ──────────────────────────────────────────

pub(super) fn player_avatar_change(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::PlayerAvatarChange {
        player_id: c.read_u32_be()?,
        avatar: c.read_string()?,
    })
}

pub(super) fn player_handicap_change(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::PlayerHandicapChange {
        player_id: c.read_u32_be()?,
        handicap: c.read_u8()?,
    })
}

pub(super) fn change_colors(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::ChangeColors {
        team: c.read_u8()?,
        colors: c.read_string()?,
    })
}

pub(super) fn disc_move(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::DiscMove(DiscMove {
        disc_id: c.read_u8()?,
        x: c.read_f32_le()?,
        y: c.read_f32_le()?,
        x_speed: c.read_f32_le()?,
        y_speed: c.read_f32_le()?,
        radius: c.read_f32_le()?,
    }))
}

pub(super) fn logic_update(c: &mut ByteCursor<'_>) -> Result<ActionKind> {
    Ok(ActionKind::LogicUpdate {
        frame: c.read_u32_be()?,
    })
}
