//! Building placement, upgrades, terraforming and city formation.
//!
//! These helpers mutate the board and building counts only. Costs are
//! paid by the caller through the resolver before calling in. Follow-up
//! effects (competency choice, palace tile activation) are returned.

use tracing::debug;

use crate::core::{EngineError, EngineResult, GameState, PlayerId};
use crate::ledger::{BuildingType, CellId, Resource, ScoreBucket, Terrain};
use crate::tiles::TileKind;

use super::effect::Effect;
use super::ownership::activate_tile;

/// Minimum power of an un-annexed group to form a city.
pub const CITY_POWER: u32 = 7;
/// Minimum buildings in that group.
pub const CITY_BUILDINGS: usize = 4;
/// Points for forming a city.
pub const CITY_POINTS: u32 = 5;

/// Base round income of one building.
#[must_use]
pub fn building_income(building: BuildingType) -> Vec<Effect> {
    match building {
        BuildingType::Workshop => vec![Effect::workers(1)],
        BuildingType::Guild => vec![Effect::coins(2)],
        BuildingType::School => vec![Effect::ore(1)],
        BuildingType::Palace => vec![Effect::GainMagic(4)],
        BuildingType::University => vec![Effect::ore(1), Effect::GainMagic(2)],
    }
}

fn home_terrain(state: &GameState, player: PlayerId) -> EngineResult<Terrain> {
    state.players[player]
        .home_terrain
        .ok_or_else(|| EngineError::InternalConsistency(format!("{player} has no home terrain")))
}

/// Terraforming steps needed to turn `cell` into the player's home terrain.
pub fn spades_needed(state: &GameState, player: PlayerId, cell: CellId) -> EngineResult<u32> {
    let home = home_terrain(state, player)?;
    state
        .board
        .cell(cell)
        .terrain
        .distance(home)
        .ok_or_else(|| EngineError::InternalConsistency(format!("{cell} cannot be terraformed")))
}

/// Apply up to `spades` terraforming steps toward the home terrain.
pub fn terraform(
    state: &mut GameState,
    player: PlayerId,
    cell: CellId,
    spades: u32,
) -> EngineResult<()> {
    let home = home_terrain(state, player)?;
    let target = state.board.cell_mut(cell);
    for _ in 0..spades {
        if target.terrain == home {
            break;
        }
        target.terrain = target.terrain.step_toward(home);
    }
    debug!(%player, %cell, terrain = ?target.terrain, "terraformed");
    Ok(())
}

/// Put a workshop on a free cell, terraforming it to home terrain.
pub fn place_workshop(state: &mut GameState, player: PlayerId, cell: CellId) -> EngineResult<()> {
    let home = home_terrain(state, player)?;
    let p = &state.players[player];
    if p.building_count(BuildingType::Workshop) >= BuildingType::Workshop.supply() {
        return Err(EngineError::InternalConsistency(format!(
            "{player} has no workshop left"
        )));
    }
    if !state.board.cell(cell).is_free_for(player) {
        return Err(EngineError::InternalConsistency(format!(
            "{cell} is not free for {player}"
        )));
    }

    let target = state.board.cell_mut(cell);
    target.terrain = home;
    target.owner = Some(player);
    target.building = Some(BuildingType::Workshop);
    target.reserved = None;
    state.players[player].buildings[BuildingType::Workshop.index()] += 1;
    debug!(%player, %cell, "workshop placed");

    score_build_bonus(state, player, BuildingType::Workshop);
    form_city(state, player, cell);
    Ok(())
}

/// Replace the building at `cell` with `to`. Returns follow-up effects.
pub fn upgrade_building(
    state: &mut GameState,
    player: PlayerId,
    cell: CellId,
    to: BuildingType,
) -> EngineResult<Vec<Effect>> {
    let target = state.board.cell(cell);
    let from = to.upgrades_from();
    if target.owner != Some(player) || from.is_none() || target.building != from {
        return Err(EngineError::InternalConsistency(format!(
            "{player} cannot upgrade {cell} to {to:?}"
        )));
    }
    let p = &mut state.players[player];
    if p.building_count(to) >= to.supply() {
        return Err(EngineError::InternalConsistency(format!(
            "{player} has no {to:?} left"
        )));
    }
    if let Some(from) = from {
        p.buildings[from.index()] -= 1;
    }
    p.buildings[to.index()] += 1;
    state.board.cell_mut(cell).building = Some(to);
    debug!(%player, %cell, ?to, "building upgraded");

    score_build_bonus(state, player, to);
    form_city(state, player, cell);

    match to {
        BuildingType::School | BuildingType::University => {
            Ok(vec![Effect::ChooseTile(TileKind::Competency)])
        }
        BuildingType::Palace => match state.players[player].palace_tile {
            Some(tile) => activate_tile(state, player, tile),
            None => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

fn score_build_bonus(state: &mut GameState, player: PlayerId, building: BuildingType) {
    let points = state
        .current_scoring()
        .map_or(0, |tile| tile.build_points(building));
    if points > 0 {
        state.players[player].add_score(ScoreBucket::Build, points);
    }
}

/// Form a city from the un-annexed part of the group containing `cell`.
///
/// Returns whether a city formed.
pub fn form_city(state: &mut GameState, player: PlayerId, cell: CellId) -> bool {
    let members: Vec<CellId> = state
        .board
        .group(cell, player)
        .into_iter()
        .filter(|&id| !state.board.cell(id).annexed)
        .collect();
    let power: u32 = members
        .iter()
        .filter_map(|&id| state.board.cell(id).building)
        .map(BuildingType::power)
        .sum();
    if power < CITY_POWER || members.len() < CITY_BUILDINGS {
        return false;
    }

    for &id in &members {
        state.board.cell_mut(id).annexed = true;
    }
    let p = &mut state.players[player];
    p.cities += 1;
    p.add_score(ScoreBucket::Cities, CITY_POINTS);
    debug!(%player, %cell, power, cities = p.cities, "city formed");
    true
}

/// Ore cost of terraforming `spades` steps.
#[must_use]
pub fn spade_ore(state: &GameState, player: PlayerId, spades: u32) -> Effect {
    Effect::Spend(Resource::Ore, spades * state.players[player].ore_per_spade)
}
