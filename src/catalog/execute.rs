//! Executors for normal decisions.
//!
//! Each executor mutates the state for one decoded catalog entry and
//! reports what the turn machine must do next. Costs are paid inside the
//! same resolver walk as the rewards, so an action whose cost itself needs
//! a decision (any-book payments) suspends like any other effect.

use tracing::debug;

use crate::core::{EngineError, EngineResult, GameState, PlayerId};
use crate::effects::build::{place_workshop, upgrade_building};
use crate::effects::climb::send_worker;
use crate::effects::ownership::{fire_hook, grant_tile, release_tile};
use crate::effects::{Choice, Effect, EffectResolver, Resolution};
use crate::tiles::HookKind;

use super::actions::{book_action, boom, conversion, magic_action, upgrade_cost, workshop_cost, ActionSpec};
use super::ids::CatalogEntry;
use super::legality::{PhaseView, SetupBuildStep};

/// How the turn continues after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnSignal {
    /// Same player keeps acting.
    Stay,
    EndTurn,
    Passed,
}

/// Result of executing one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub signal: TurnSignal,
    pub resolution: Resolution,
}

impl Outcome {
    fn stay(resolution: Resolution) -> Self {
        Self {
            signal: TurnSignal::Stay,
            resolution,
        }
    }
}

/// The choice an immediate entry stands for.
#[must_use]
pub fn choice_for(entry: CatalogEntry) -> Option<Choice> {
    match entry {
        CatalogEntry::BookSplit(split) => Some(Choice::Books(split)),
        CatalogEntry::TrackSplit(split) => Some(Choice::Tracks(split)),
        CatalogEntry::Position(cell) => Some(Choice::Cell(cell)),
        CatalogEntry::TileChoice(tile) => Some(Choice::Tile(tile)),
        CatalogEntry::Decline => Some(Choice::Decline),
        _ => None,
    }
}

fn misplaced(entry: CatalogEntry, view: PhaseView) -> EngineError {
    EngineError::InternalConsistency(format!("{entry:?} cannot be executed during {view:?}"))
}

/// Resolve a cost that must not suspend.
fn pay(state: &mut GameState, player: PlayerId, cost: &[Effect]) -> EngineResult<()> {
    match EffectResolver::adjust(state, player, cost)? {
        Resolution::Complete => Ok(()),
        Resolution::Suspended(interrupt) => Err(EngineError::InternalConsistency(format!(
            "payment suspended on {:?}",
            interrupt.request
        ))),
    }
}

/// Execute a normal entry for `player`.
pub fn execute(
    state: &mut GameState,
    player: PlayerId,
    view: PhaseView,
    entry: CatalogEntry,
) -> EngineResult<Outcome> {
    debug!(%player, ?view, ?entry, "executing");
    match (view, entry) {
        (PhaseView::Draft(_), CatalogEntry::Draft(tile)) => {
            let effects = grant_tile(state, player, tile)?;
            Ok(Outcome::stay(EffectResolver::adjust(state, player, &effects)?))
        }
        (PhaseView::SetupBuild(step), CatalogEntry::Build(cell)) => {
            match step {
                SetupBuildStep::Workshop | SetupBuildStep::BuildReserved => {
                    place_workshop(state, player, cell)?;
                }
                SetupBuildStep::Reserve => {
                    let target = state.board.cell_mut(cell);
                    if !target.is_free_for(player) {
                        return Err(EngineError::InternalConsistency(format!(
                            "{cell} cannot be reserved by {player}"
                        )));
                    }
                    target.reserved = Some(player);
                }
            }
            Ok(Outcome::stay(Resolution::Complete))
        }
        (PhaseView::Action, entry) => execute_turn_action(state, player, entry),
        (view, entry) => Err(misplaced(entry, view)),
    }
}

fn execute_turn_action(state: &mut GameState, player: PlayerId, entry: CatalogEntry) -> EngineResult<Outcome> {
    let resolution = match entry {
        CatalogEntry::Pass(booster) => return pass(state, player, Some(booster)),
        CatalogEntry::PassFinal => return pass(state, player, None),
        CatalogEntry::EndTurn => {
            return Ok(Outcome {
                signal: TurnSignal::EndTurn,
                resolution: Resolution::Complete,
            })
        }

        CatalogEntry::Build(cell) => {
            let cost = workshop_cost(state, player, cell).ok_or_else(|| {
                EngineError::InternalConsistency(format!("{cell} is out of reach for {player}"))
            })?;
            pay(state, player, &cost)?;
            place_workshop(state, player, cell)?;
            main_done(state, player);
            Resolution::Complete
        }
        CatalogEntry::Upgrade(cell, to) => {
            let cost = upgrade_cost(state, player, cell, to);
            pay(state, player, &cost)?;
            let follow_up = upgrade_building(state, player, cell, to)?;
            main_done(state, player);
            EffectResolver::adjust(state, player, &follow_up)?
        }
        CatalogEntry::SendWorker(track) => {
            send_worker(state, player, track)?;
            main_done(state, player);
            Resolution::Complete
        }
        CatalogEntry::MagicAction(spot) => {
            let spec = magic_action(spot).ok_or_else(|| misplaced(entry, PhaseView::Action))?;
            state.magic_spots[usize::from(spot)] = true;
            main_done(state, player);
            resolve(state, player, &spec)?
        }
        CatalogEntry::BookAction(spot) => {
            let spec = book_action(spot).ok_or_else(|| misplaced(entry, PhaseView::Action))?;
            state.book_spots[usize::from(spot)] = true;
            main_done(state, player);
            resolve(state, player, &spec)?
        }
        CatalogEntry::Convert(kind) => {
            let spec = conversion(kind).ok_or_else(|| misplaced(entry, PhaseView::Action))?;
            resolve(state, player, &spec)?
        }
        CatalogEntry::Boom(amount) => resolve(state, player, &boom(amount))?,
        CatalogEntry::ExtraAction(tile) => {
            let action = state
                .tiles
                .definition(tile)?
                .extra_action
                .clone()
                .ok_or_else(|| EngineError::InternalConsistency(format!("{tile} has no extra action")))?;
            let used = state.players[player]
                .extra_actions
                .get_mut(&tile)
                .ok_or_else(|| EngineError::InternalConsistency(format!("{player} lacks {tile}")))?;
            *used = true;
            if action.main {
                main_done(state, player);
            }
            let sequence: Vec<Effect> = action.cost.iter().chain(&action.effects).cloned().collect();
            EffectResolver::adjust(state, player, &sequence)?
        }
        other => return Err(misplaced(other, PhaseView::Action)),
    };
    Ok(Outcome::stay(resolution))
}

fn main_done(state: &mut GameState, player: PlayerId) {
    state.players[player].main_action_done = true;
}

fn resolve(state: &mut GameState, player: PlayerId, spec: &ActionSpec) -> EngineResult<Resolution> {
    EffectResolver::adjust(state, player, &spec.sequence())
}

/// Fire pass hooks, then swap boosters unless this is the final round.
fn pass(state: &mut GameState, player: PlayerId, booster: Option<crate::tiles::TileId>) -> EngineResult<Outcome> {
    let keys = state.players[player].hooks.keys(HookKind::Pass).to_vec();
    let mut effects = Vec::new();
    for key in keys {
        effects.extend(fire_hook(state, player, key)?);
    }

    if let Some(next) = booster {
        if let Some(old) = state.players[player].booster {
            release_tile(state, player, old);
        }
        effects.extend(grant_tile(state, player, next)?);
    }

    let p = &mut state.players[player];
    p.has_passed = true;
    p.main_action_done = true;
    debug!(%player, booster = ?p.booster, "passed");

    Ok(Outcome {
        signal: TurnSignal::Passed,
        resolution: EffectResolver::adjust(state, player, &effects)?,
    })
}
