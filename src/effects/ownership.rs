//! Tile acquisition, activation and hook firing.
//!
//! Acquiring a tile records ownership and, except for palace tiles,
//! activates it: its stored hooks are registered by key and its extra
//! action becomes available. Palace tiles activate when the palace is
//! built. Immediate hook effects are returned for the caller to resolve.

use crate::core::{EngineError, EngineResult, GameState, PlayerId};
use crate::tiles::{HookKey, HookKind, TileId, TileKind};

use super::effect::Effect;

const STORED_HOOKS: [HookKind; 3] = [HookKind::Income, HookKind::Pass, HookKind::Setup];

/// Give `tile` to `player`. Returns the effects to resolve now.
pub fn grant_tile(state: &mut GameState, player: PlayerId, tile: TileId) -> EngineResult<Vec<Effect>> {
    state.tiles.acquire(tile, player)?;
    let def = state.tiles.definition(tile)?;
    let (kind, home_terrain) = (def.kind, def.home_terrain);

    let p = &mut state.players[player];
    match kind {
        TileKind::HomeCard => {
            p.home_card = Some(tile);
            p.home_terrain = home_terrain;
        }
        TileKind::Faction => p.faction = Some(tile),
        TileKind::PalaceTile => {
            p.palace_tile = Some(tile);
            return Ok(Vec::new());
        }
        TileKind::Booster => {
            p.booster = Some(tile);
            if let Some(coins) = state.booster_coins.get_mut(&tile) {
                p.coins += *coins;
                *coins = 0;
            }
        }
        TileKind::Competency => {}
    }
    activate_tile(state, player, tile)
}

/// Register a tile's hooks and extra action. Returns its immediate effects.
pub fn activate_tile(
    state: &mut GameState,
    player: PlayerId,
    tile: TileId,
) -> EngineResult<Vec<Effect>> {
    let def = state.tiles.definition(tile)?;
    let keys: Vec<HookKey> = STORED_HOOKS
        .into_iter()
        .filter(|&kind| def.hook(kind).is_some())
        .map(|kind| HookKey::new(tile, kind))
        .collect();
    let has_extra = def.extra_action.is_some();
    let immediate = def
        .immediate
        .as_ref()
        .map(|h| h.effects.clone())
        .unwrap_or_default();

    let p = &mut state.players[player];
    for key in keys {
        p.hooks.register(key);
    }
    if has_extra {
        p.extra_actions.insert(tile, false);
    }
    Ok(immediate)
}

/// Return a tile to the supply, dropping everything it contributed.
pub fn release_tile(state: &mut GameState, player: PlayerId, tile: TileId) {
    state.tiles.release(tile, player);
    let p = &mut state.players[player];
    p.hooks.unregister_tile(tile);
    p.extra_actions.remove(&tile);
    if p.booster == Some(tile) {
        p.booster = None;
    }
}

/// Effects of a registered hook. One-shot hooks are unregistered.
pub fn fire_hook(state: &mut GameState, player: PlayerId, key: HookKey) -> EngineResult<Vec<Effect>> {
    let hook = state
        .tiles
        .definition(key.tile)?
        .hook(key.kind)
        .ok_or_else(|| EngineError::InternalConsistency(format!("{key} has no hook")))?;
    let effects = hook.effects.clone();
    if hook.once {
        state.players[player].hooks.unregister(key);
    }
    Ok(effects)
}
