//! Legal action enumeration.
//!
//! `legal_actions` is the only place that decides what a player may do.
//! The executors assume every id they receive came from here and treat a
//! failed payment as an internal fault.
//!
//! ## Modes
//!
//! - `Normal(view)`: a regular decision in the draft, setup build or
//!   action phase.
//! - `Immediate(interrupt)`: the answer to a suspended effect.
//!
//! Results are sorted ascending and free of duplicates.

use crate::core::{ActionId, GameState, PlayerId};
use crate::effects::climb::can_advance;
use crate::effects::{
    BookDirection, DecisionRequest, Effect, Interrupt, PositionFilter, PositionPurpose,
    PositionRequest,
};
use crate::ledger::{BuildingType, CellId, Discipline};
use crate::tiles::TileKind;

use super::actions::{book_action, boom, can_pay, conversion, magic_action, upgrade_cost, workshop_cost};
use super::ids::{encode, CatalogEntry, BOOK_ACTION_COUNT, CONVERT_COUNT, MAGIC_ACTION_COUNT, MAX_BOOM};
use super::split::splits;

/// One step of the setup build sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetupBuildStep {
    /// Place a free workshop on home terrain.
    Workshop,
    /// Claim a home terrain cell for later.
    Reserve,
    /// Build on the cell claimed earlier.
    BuildReserved,
}

/// What a normal decision is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseView {
    Draft(TileKind),
    SetupBuild(SetupBuildStep),
    Action,
}

/// Which kind of decision is being enumerated.
#[derive(Clone, Copy, Debug)]
pub enum LegalityMode<'a> {
    Normal(PhaseView),
    Immediate(&'a Interrupt),
}

/// Every legal id for `player`, sorted.
#[must_use]
pub fn legal_actions(state: &GameState, player: PlayerId, mode: LegalityMode<'_>) -> Vec<ActionId> {
    let mut entries = Vec::new();
    match mode {
        LegalityMode::Normal(PhaseView::Draft(kind)) => {
            entries.extend(
                state
                    .tiles
                    .available(kind, player)
                    .into_iter()
                    .map(CatalogEntry::Draft),
            );
        }
        LegalityMode::Normal(PhaseView::SetupBuild(step)) => setup_builds(state, player, step, &mut entries),
        LegalityMode::Normal(PhaseView::Action) => turn_actions(state, player, &mut entries),
        LegalityMode::Immediate(interrupt) => {
            immediate_answers(state, interrupt.player, interrupt.request, &mut entries);
        }
    }

    let mut ids: Vec<ActionId> = entries.into_iter().filter_map(|e| encode(e).ok()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn setup_builds(state: &GameState, player: PlayerId, step: SetupBuildStep, out: &mut Vec<CatalogEntry>) {
    let p = &state.players[player];
    if p.building_count(BuildingType::Workshop) >= BuildingType::Workshop.supply() {
        return;
    }
    let Some(home) = p.home_terrain else {
        return;
    };
    let cells = state.board.cells().filter(|(_, cell)| match step {
        SetupBuildStep::Workshop | SetupBuildStep::Reserve => {
            cell.terrain == home && cell.is_free_for(player)
        }
        SetupBuildStep::BuildReserved => cell.reserved == Some(player) && cell.building.is_none(),
    });
    out.extend(cells.map(|(id, _)| CatalogEntry::Build(id)));
}

/// Whether resolving `effects` can do anything for `player` right now.
fn worth_resolving(state: &GameState, player: PlayerId, effects: &[Effect]) -> bool {
    effects.iter().all(|effect| match effect {
        Effect::AdvanceAnyTracks(_) => Discipline::ALL.iter().any(|&d| can_advance(state, player, d)),
        Effect::GainAnyBooks(_) => state.pool.total() > 0,
        _ => true,
    })
}

fn turn_actions(state: &GameState, player: PlayerId, out: &mut Vec<CatalogEntry>) {
    let p = &state.players[player];
    if p.has_passed {
        return;
    }

    if p.main_action_done {
        out.push(CatalogEntry::EndTurn);
    } else {
        main_actions(state, player, out);
    }

    // Free actions.
    for kind in 0..CONVERT_COUNT as u8 {
        if let Some(spec) = conversion(kind) {
            if spec.affordable(state, player) && worth_resolving(state, player, &spec.effects) {
                out.push(CatalogEntry::Convert(kind));
            }
        }
    }
    for amount in 1..=MAX_BOOM as u8 {
        if boom(amount).affordable(state, player) {
            out.push(CatalogEntry::Boom(amount));
        }
    }
    extra_actions(state, player, false, out);
}

fn main_actions(state: &GameState, player: PlayerId, out: &mut Vec<CatalogEntry>) {
    let p = &state.players[player];

    if state.is_final_round() {
        out.push(CatalogEntry::PassFinal);
    } else {
        out.extend(
            state
                .tiles
                .unowned(TileKind::Booster)
                .into_iter()
                .map(CatalogEntry::Pass),
        );
    }

    if p.building_count(BuildingType::Workshop) < BuildingType::Workshop.supply() {
        for cell in CellId::all() {
            if workshop_cost(state, player, cell).is_some_and(|cost| can_pay(state, player, &cost)) {
                out.push(CatalogEntry::Build(cell));
            }
        }
    }

    for cell in state.board.owned_cells(player) {
        let Some(current) = state.board.cell(cell).building else {
            continue;
        };
        for to in BuildingType::UPGRADES {
            if to.upgrades_from() == Some(current)
                && p.building_count(to) < to.supply()
                && can_pay(state, player, &upgrade_cost(state, player, cell, to))
            {
                out.push(CatalogEntry::Upgrade(cell, to));
            }
        }
    }

    if p.workers > 0 {
        for track in Discipline::ALL {
            if can_advance(state, player, track) {
                out.push(CatalogEntry::SendWorker(track));
            }
        }
    }

    for spot in 0..MAGIC_ACTION_COUNT as u8 {
        if state.magic_spots[usize::from(spot)] {
            continue;
        }
        if let Some(spec) = magic_action(spot) {
            if spec.affordable(state, player) && worth_resolving(state, player, &spec.effects) {
                out.push(CatalogEntry::MagicAction(spot));
            }
        }
    }
    for spot in 0..BOOK_ACTION_COUNT as u8 {
        if state.book_spots[usize::from(spot)] {
            continue;
        }
        if let Some(spec) = book_action(spot) {
            if spec.affordable(state, player) && worth_resolving(state, player, &spec.effects) {
                out.push(CatalogEntry::BookAction(spot));
            }
        }
    }

    extra_actions(state, player, true, out);
}

fn extra_actions(state: &GameState, player: PlayerId, main: bool, out: &mut Vec<CatalogEntry>) {
    for (&tile, &used) in &state.players[player].extra_actions {
        if used {
            continue;
        }
        let Some(action) = state.tiles.get(tile).and_then(|t| t.extra_action.as_ref()) else {
            continue;
        };
        if action.main == main
            && crate::effects::check(state, player, &action.requires)
            && can_pay(state, player, &action.cost)
            && worth_resolving(state, player, &action.effects)
        {
            out.push(CatalogEntry::ExtraAction(tile));
        }
    }
}

fn immediate_answers(
    state: &GameState,
    player: PlayerId,
    request: DecisionRequest,
    out: &mut Vec<CatalogEntry>,
) {
    match request {
        DecisionRequest::BookSplit { total, direction } => {
            let limit = match direction {
                BookDirection::Gain => state.pool.counts(),
                BookDirection::Spend => state.players[player].books,
            };
            out.extend(
                splits(total)
                    .filter(|s| s.iter().zip(limit).all(|(&n, max)| n <= max))
                    .map(CatalogEntry::BookSplit),
            );
        }
        DecisionRequest::TrackSplit { total } => {
            out.extend(
                splits(total)
                    .filter(|s| {
                        Discipline::ALL
                            .iter()
                            .zip(s)
                            .all(|(&d, &n)| n == 0 || can_advance(state, player, d))
                    })
                    .map(CatalogEntry::TrackSplit),
            );
        }
        DecisionRequest::Position(req) => {
            out.extend(
                CellId::all()
                    .filter(|&cell| position_allowed(state, player, req, cell))
                    .map(CatalogEntry::Position),
            );
            if req.optional {
                out.push(CatalogEntry::Decline);
            }
        }
        DecisionRequest::Tile(kind) => {
            out.extend(
                state
                    .tiles
                    .available(kind, player)
                    .into_iter()
                    .map(CatalogEntry::TileChoice),
            );
        }
    }
}

/// Whether `cell` answers a position request.
#[must_use]
pub fn position_allowed(state: &GameState, player: PlayerId, req: PositionRequest, cell: CellId) -> bool {
    let target = state.board.cell(cell);
    let p = &state.players[player];

    let filter_ok = match req.filter {
        PositionFilter::Anywhere { terrain } => {
            target.is_free_for(player) && terrain.is_none_or(|t| target.terrain == t)
        }
        PositionFilter::Reachable => state.board.reach(cell, player, p.bridges > 0).is_some(),
        PositionFilter::Controlled {
            building,
            allow_isolated,
        } => {
            target.owner == Some(player)
                && target.building.is_some()
                && building.is_none_or(|b| target.building == Some(b))
                && (allow_isolated
                    || building != Some(BuildingType::Guild)
                    || state.board.has_opponent_neighbor(cell, player))
        }
    };
    if !filter_ok {
        return false;
    }

    match req.purpose {
        PositionPurpose::Terraform { .. } => {
            target.terrain.is_land() && p.home_terrain.is_some_and(|home| target.terrain != home)
        }
        PositionPurpose::BuildWorkshop => {
            p.home_terrain.is_some()
                && target.is_free_for(player)
                && p.building_count(BuildingType::Workshop) < BuildingType::Workshop.supply()
        }
        PositionPurpose::Upgrade { to } => {
            target.owner == Some(player)
                && to.upgrades_from().is_some()
                && target.building == to.upgrades_from()
                && p.building_count(to) < to.supply()
        }
        PositionPurpose::Reserve => target.is_free_for(player),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ids::decode;
    use crate::core::GameConfig;
    use crate::ledger::{MagicZones, Terrain, CELL_COUNT};
    use crate::tiles::TileId;

    fn entries(ids: &[ActionId]) -> Vec<CatalogEntry> {
        ids.iter().map(|&id| decode(id).unwrap()).collect()
    }

    fn plains_state() -> (GameState, PlayerId) {
        let config = GameConfig::builder()
            .player_count(3)
            .map(vec![Terrain::Plains; CELL_COUNT])
            .build()
            .unwrap();
        let mut state = GameState::new(&config).unwrap();
        let p = PlayerId::new(0);
        state.players[p].home_terrain = Some(Terrain::Plains);
        state.round = 1;
        (state, p)
    }

    fn interrupt(player: PlayerId, request: DecisionRequest) -> Interrupt {
        Interrupt {
            player,
            request,
            continuation: vec![],
        }
    }

    #[test]
    fn test_results_are_sorted() {
        let (state, p) = plains_state();
        let ids = legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action));
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_draft_offers_available_tiles() {
        let state = GameState::for_tests(3);
        let ids = legal_actions(&state, PlayerId::new(0), LegalityMode::Normal(PhaseView::Draft(TileKind::HomeCard)));
        assert_eq!(ids.len(), 7);
        assert!(entries(&ids).iter().all(|e| matches!(e, CatalogEntry::Draft(_))));
    }

    #[test]
    fn test_pass_final_is_a_single_sentinel() {
        let (mut state, p) = plains_state();
        let before = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(before.iter().filter(|e| matches!(e, CatalogEntry::Pass(_))).count() > 1);
        assert!(!before.contains(&CatalogEntry::PassFinal));

        state.round = 6;
        let after = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(after.contains(&CatalogEntry::PassFinal));
        assert!(!after.iter().any(|e| matches!(e, CatalogEntry::Pass(_))));
    }

    #[test]
    fn test_end_turn_only_after_main_action() {
        let (mut state, p) = plains_state();
        let ids = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(!ids.contains(&CatalogEntry::EndTurn));

        state.players[p].main_action_done = true;
        let ids = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(ids.contains(&CatalogEntry::EndTurn));
        assert!(!ids.iter().any(|e| matches!(e, CatalogEntry::Pass(_) | CatalogEntry::Build(_))));
    }

    #[test]
    fn test_track_offer_rules() {
        let (mut state, p) = plains_state();
        state.players[p].workers = 1;
        let law = Discipline::Law;

        state.players[p].tracks[law.index()] = 7;
        let ids = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(!ids.contains(&CatalogEntry::SendWorker(law)));

        state.players[p].cities = 1;
        let ids = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(ids.contains(&CatalogEntry::SendWorker(law)));

        state.players[p].tracks[law.index()] = 11;
        state.tracks.crown(law, PlayerId::new(1));
        let ids = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(!ids.contains(&CatalogEntry::SendWorker(law)));

        state.players[p].tracks[law.index()] = 12;
        let ids = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(!ids.contains(&CatalogEntry::SendWorker(law)));
    }

    #[test]
    fn test_taken_spots_are_not_offered() {
        let (mut state, p) = plains_state();
        state.players[p].magic = MagicZones::new([0, 0, 10]);
        let ids = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(ids.contains(&CatalogEntry::MagicAction(4)));

        state.magic_spots[4] = true;
        let ids = entries(&legal_actions(&state, p, LegalityMode::Normal(PhaseView::Action)));
        assert!(!ids.contains(&CatalogEntry::MagicAction(4)));
        assert!(ids.contains(&CatalogEntry::MagicAction(3)));
    }

    #[test]
    fn test_book_split_bounded_by_stock() {
        let (mut state, p) = plains_state();
        state.players[p].books = [1, 0, 0, 1];
        let request = DecisionRequest::BookSplit {
            total: 2,
            direction: BookDirection::Spend,
        };
        let i = interrupt(p, request);
        let ids = entries(&legal_actions(&state, p, LegalityMode::Immediate(&i)));
        assert_eq!(ids, vec![CatalogEntry::BookSplit([1, 0, 0, 1])]);
    }

    #[test]
    fn test_track_split_skips_blocked_tracks() {
        let (mut state, p) = plains_state();
        state.players[p].tracks = [12, 7, 0, 0];
        let i = interrupt(p, DecisionRequest::TrackSplit { total: 1 });
        let ids = entries(&legal_actions(&state, p, LegalityMode::Immediate(&i)));
        assert_eq!(
            ids,
            vec![CatalogEntry::TrackSplit([0, 0, 0, 1]), CatalogEntry::TrackSplit([0, 0, 1, 0])]
        );
    }

    #[test]
    fn test_optional_position_includes_decline() {
        let (mut state, p) = plains_state();
        crate::effects::build::place_workshop(&mut state, p, CellId::new(0)).unwrap();
        state.board.cell_mut(CellId::new(1)).terrain = Terrain::Swamp;

        let i = interrupt(p, DecisionRequest::Position(PositionRequest::spades(1)));
        let ids = entries(&legal_actions(&state, p, LegalityMode::Immediate(&i)));
        // Only the swamp neighbour differs from home terrain.
        assert_eq!(ids, vec![CatalogEntry::Position(CellId::new(1)), CatalogEntry::Decline]);
    }

    #[test]
    fn test_isolated_guild_filter() {
        let (mut state, p) = plains_state();
        let own = CellId::new(20);
        crate::effects::build::place_workshop(&mut state, p, own).unwrap();
        crate::effects::build::upgrade_building(&mut state, p, own, BuildingType::Guild).unwrap();

        let strict = PositionRequest::new(
            PositionFilter::Controlled {
                building: Some(BuildingType::Guild),
                allow_isolated: false,
            },
            PositionPurpose::Upgrade { to: BuildingType::Palace },
        );
        assert!(!position_allowed(&state, p, strict, own));

        let other = PlayerId::new(1);
        state.players[other].home_terrain = Some(Terrain::Plains);
        crate::effects::build::place_workshop(&mut state, other, CellId::new(21)).unwrap();
        assert!(position_allowed(&state, p, strict, own));
    }

    #[test]
    fn test_any_building_filter_accepts_isolated_guild() {
        let (mut state, p) = plains_state();
        let own = CellId::new(20);
        crate::effects::build::place_workshop(&mut state, p, own).unwrap();
        crate::effects::build::upgrade_building(&mut state, p, own, BuildingType::Guild).unwrap();
        assert!(!state.board.has_opponent_neighbor(own, p));

        let any = PositionRequest::new(
            PositionFilter::Controlled {
                building: None,
                allow_isolated: false,
            },
            PositionPurpose::Upgrade { to: BuildingType::School },
        );
        assert!(position_allowed(&state, p, any, own));
    }

    #[test]
    fn test_tile_choice_excludes_owned() {
        let config = GameConfig::builder()
            .player_count(3)
            .tiles(crate::tiles::builtin_tiles())
            .build()
            .unwrap();
        let mut state = GameState::new(&config).unwrap();
        let p = PlayerId::new(0);
        state.tiles.acquire(TileId::new(29), p).unwrap();

        let i = interrupt(p, DecisionRequest::Tile(TileKind::Competency));
        let ids = entries(&legal_actions(&state, p, LegalityMode::Immediate(&i)));
        assert_eq!(ids.len(), 7);
        assert!(!ids.contains(&CatalogEntry::TileChoice(TileId::new(29))));
    }

    #[test]
    fn test_setup_build_uses_home_terrain() {
        let (mut state, p) = plains_state();
        state.board.cell_mut(CellId::new(5)).reserved = Some(PlayerId::new(2));
        let ids = legal_actions(&state, p, LegalityMode::Normal(PhaseView::SetupBuild(SetupBuildStep::Workshop)));
        assert_eq!(ids.len(), CELL_COUNT - 1);

        state.board.cell_mut(CellId::new(9)).reserved = Some(p);
        let ids = entries(&legal_actions(
            &state,
            p,
            LegalityMode::Normal(PhaseView::SetupBuild(SetupBuildStep::BuildReserved)),
        ));
        assert_eq!(ids, vec![CatalogEntry::Build(CellId::new(9))]);
    }
}
