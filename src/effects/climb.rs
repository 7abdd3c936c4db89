//! Track advancement and worker insertion.
//!
//! ## Rules
//!
//! - The cap is 12, or 11 while another player holds the track's crown.
//! - Climbing from 7 or below to above 7 uses one city key
//!   (`tracks_over_7 < cities`); without a spare key the climb stops at 7.
//! - Crossing levels 3, 5, 7 and 12 grants 1, 2, 2 and 3 magic, once for
//!   each threshold crossed by a single advance.
//! - Reaching 12 crowns the track.

use tracing::debug;

use crate::core::{EngineError, EngineResult, GameState, PlayerId};
use crate::ledger::{Discipline, MAX_TRACK};

/// `(level, magic)` pairs.
pub const MAGIC_THRESHOLDS: [(u8, u32); 4] = [(3, 1), (5, 2), (7, 2), (12, 3)];

/// Level a track cannot pass without a city key.
pub const KEY_LEVEL: u8 = 7;

/// What one advance did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Climb {
    pub from: u8,
    pub to: u8,
    /// Magic units granted by thresholds.
    pub magic: u32,
}

/// Highest level `player` may reach on `track`.
#[must_use]
pub fn track_cap(state: &GameState, player: PlayerId, track: Discipline) -> u8 {
    if state.tracks.crowned_by_other(track, player) {
        MAX_TRACK - 1
    } else {
        MAX_TRACK
    }
}

/// Whether a track may be offered for advancement at all.
///
/// Never at the cap; at exactly 7 only with a spare key.
#[must_use]
pub fn can_advance(state: &GameState, player: PlayerId, track: Discipline) -> bool {
    let p = &state.players[player];
    let level = p.track(track);
    if level >= track_cap(state, player, track) {
        return false;
    }
    level != KEY_LEVEL || p.has_spare_key()
}

/// Advance `track` by `steps`, applying caps, keys, thresholds and crowns.
pub fn advance_track(
    state: &mut GameState,
    player: PlayerId,
    track: Discipline,
    steps: u32,
) -> Climb {
    let cap = track_cap(state, player, track);
    let p = &mut state.players[player];
    let from = p.track(track);
    let steps = u8::try_from(steps).unwrap_or(u8::MAX);
    let mut to = from.saturating_add(steps).min(cap);

    if from <= KEY_LEVEL && to > KEY_LEVEL {
        if p.has_spare_key() {
            p.tracks_over_7 += 1;
        } else {
            to = KEY_LEVEL;
        }
    }
    if to <= from {
        return Climb {
            from,
            to: from,
            magic: 0,
        };
    }

    let magic: u32 = MAGIC_THRESHOLDS
        .iter()
        .filter(|(level, _)| from < *level && to >= *level)
        .map(|(_, magic)| magic)
        .sum();
    p.tracks[track.index()] = to;
    p.magic.gain(magic);

    if to == MAX_TRACK {
        state.tracks.crown(track, player);
    }
    debug!(%player, ?track, from, to, magic, "track advanced");
    Climb { from, to, magic }
}

/// Move `track` down by `steps`. Dropping back to 7 or below frees a key.
pub fn downgrade_track(state: &mut GameState, player: PlayerId, track: Discipline, steps: u32) {
    let p = &mut state.players[player];
    let from = p.track(track);
    let to = from.saturating_sub(u8::try_from(steps).unwrap_or(u8::MAX));
    if from > KEY_LEVEL && to <= KEY_LEVEL {
        p.tracks_over_7 = p.tracks_over_7.saturating_sub(1);
    }
    p.tracks[track.index()] = to;
}

/// Spend a worker on `track`: first open slot's magnitude, else 1.
pub fn send_worker(state: &mut GameState, player: PlayerId, track: Discipline) -> EngineResult<Climb> {
    let p = &mut state.players[player];
    if p.workers == 0 {
        return Err(EngineError::insufficient("a worker", player));
    }
    p.workers -= 1;
    let magnitude = state.tracks.insert_worker(track, player);
    Ok(advance_track(state, player, track, u32::from(magnitude)))
}
