//! Effect resolution - applying effects to the ledger.
//!
//! `EffectResolver::adjust` walks a queue of effects in order. Effects that
//! need a player decision stop the walk and return the rest of the queue
//! inside an `Interrupt`; `EffectResolver::resume` applies the player's
//! `Choice` and continues with that remainder. Nothing is resolved
//! synchronously on a decision's behalf.
//!
//! Spending more than the player holds is an internal consistency fault:
//! costs are checked by the legality engine before any executor runs.

use std::collections::VecDeque;

use tracing::debug;

use crate::core::{EngineError, EngineResult, GameState, PlayerId};
use crate::ledger::{BuildingType, CellId, Discipline, Resource};

use super::build::{building_income, place_workshop, terraform, upgrade_building};
use super::climb::{advance_track, downgrade_track};
use super::effect::{Effect, PositionPurpose};
use super::interrupt::{BookDirection, Choice, DecisionRequest, Interrupt, Resolution};
use super::ownership::grant_tile;

/// Largest total a single split decision covers. Bigger requests are
/// chained.
pub const MAX_SPLIT_TOTAL: u32 = 8;

/// Applies effects to game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `effects` for `player` in order.
    pub fn adjust(
        state: &mut GameState,
        player: PlayerId,
        effects: &[Effect],
    ) -> EngineResult<Resolution> {
        Self::run(state, player, effects.iter().cloned().collect())
    }

    /// Apply a choice to a pending interrupt, then its continuation.
    pub fn resume(
        state: &mut GameState,
        interrupt: Interrupt,
        choice: Choice,
    ) -> EngineResult<Resolution> {
        let Interrupt {
            player,
            request,
            continuation,
        } = interrupt;
        debug!(%player, ?request, ?choice, "resuming interrupt");

        let follow_up = Self::apply_choice(state, player, request, choice)?;
        let queue = follow_up.into_iter().chain(continuation).collect();
        Self::run(state, player, queue)
    }

    fn run(
        state: &mut GameState,
        player: PlayerId,
        mut queue: VecDeque<Effect>,
    ) -> EngineResult<Resolution> {
        while let Some(effect) = queue.pop_front() {
            if let Some(request) = Self::apply(state, player, effect, &mut queue)? {
                debug!(%player, ?request, "interrupt raised");
                return Ok(Resolution::Suspended(Interrupt {
                    player,
                    request,
                    continuation: queue.into(),
                }));
            }
        }
        Ok(Resolution::Complete)
    }

    /// Apply one effect. Decisions are returned instead of applied; effects
    /// that expand into others push them to the front of `queue`.
    fn apply(
        state: &mut GameState,
        player: PlayerId,
        effect: Effect,
        queue: &mut VecDeque<Effect>,
    ) -> EngineResult<Option<DecisionRequest>> {
        match effect {
            Effect::Gain(resource, amount) => Self::gain(state, player, resource, amount),
            Effect::Spend(resource, amount) => Self::spend(state, player, resource, amount)?,

            Effect::GainAnyBooks(amount) => {
                let total = amount.min(state.pool.total()).min(MAX_SPLIT_TOTAL);
                if total == 0 {
                    return Ok(None);
                }
                if amount > total && state.pool.total() > total {
                    queue.push_front(Effect::GainAnyBooks(amount - total));
                }
                return Ok(Some(DecisionRequest::BookSplit {
                    total,
                    direction: BookDirection::Gain,
                }));
            }
            Effect::SpendAnyBooks(amount) => {
                if state.players[player].total_books() < amount {
                    return Err(EngineError::insufficient(format!("{amount} books"), player));
                }
                let total = amount.min(MAX_SPLIT_TOTAL);
                if total == 0 {
                    return Ok(None);
                }
                if amount > total {
                    queue.push_front(Effect::SpendAnyBooks(amount - total));
                }
                return Ok(Some(DecisionRequest::BookSplit {
                    total,
                    direction: BookDirection::Spend,
                }));
            }

            Effect::GainMagic(amount) => {
                state.players[player].magic.gain(amount);
            }
            Effect::UseMagic(amount) => {
                if !state.players[player].magic.spend(amount) {
                    return Err(EngineError::insufficient(format!("{amount} magic"), player));
                }
            }
            Effect::BoomMagic(amount) => {
                if !state.players[player].magic.boom(amount) {
                    return Err(EngineError::insufficient(
                        format!("{} magic to boom", amount * 2),
                        player,
                    ));
                }
            }
            Effect::AddMagicTokens(amount) => state.players[player].magic.add_tokens(amount),

            Effect::AdvanceTrack(track, steps) => {
                advance_track(state, player, track, u32::from(steps));
            }
            Effect::AdvanceAnyTracks(steps) => {
                let total = steps.min(MAX_SPLIT_TOTAL as u8);
                if total == 0 {
                    return Ok(None);
                }
                if steps > total {
                    queue.push_front(Effect::AdvanceAnyTracks(steps - total));
                }
                return Ok(Some(DecisionRequest::TrackSplit {
                    total: u32::from(total),
                }));
            }
            Effect::DowngradeTrack(track, steps) => {
                downgrade_track(state, player, track, u32::from(steps));
            }

            Effect::Score(bucket, points) => state.players[player].add_score(bucket, points),
            Effect::ScorePerBuilding {
                building,
                points,
                bucket,
            } => {
                let p = &mut state.players[player];
                let total = points * p.building_count(building);
                p.add_score(bucket, total);
            }

            Effect::GainPerBuilding {
                building,
                resource,
                amount,
            } => {
                let count = state.players[player].building_count(building);
                Self::gain(state, player, resource, amount * count);
            }
            Effect::BuildingIncome => {
                let p = &state.players[player];
                let mut income = Vec::new();
                for building in BuildingType::ALL {
                    for _ in 0..p.building_count(building) {
                        income.extend(building_income(building));
                    }
                }
                for effect in income.into_iter().rev() {
                    queue.push_front(effect);
                }
            }
            Effect::SetOrePerSpade(ore) => state.players[player].ore_per_spade = ore,

            Effect::PickPosition(request) => return Ok(Some(DecisionRequest::Position(request))),
            Effect::ChooseTile(kind) => return Ok(Some(DecisionRequest::Tile(kind))),
        }
        Ok(None)
    }

    fn gain(state: &mut GameState, player: PlayerId, resource: Resource, amount: u32) {
        let amount = match resource {
            Resource::Books(d) => state.pool.take(d, amount),
            _ => amount,
        };
        *state.players[player].amount_mut(resource) += amount;
    }

    fn spend(
        state: &mut GameState,
        player: PlayerId,
        resource: Resource,
        amount: u32,
    ) -> EngineResult<()> {
        let held = state.players[player].amount_mut(resource);
        if *held < amount {
            return Err(EngineError::insufficient(format!("{amount} {resource}"), player));
        }
        *held -= amount;
        if let Resource::Books(d) = resource {
            state.pool.give_back(d, amount);
        }
        Ok(())
    }

    /// Apply a choice. Returns effects to run before the continuation.
    fn apply_choice(
        state: &mut GameState,
        player: PlayerId,
        request: DecisionRequest,
        choice: Choice,
    ) -> EngineResult<Vec<Effect>> {
        let mismatch = || {
            EngineError::InternalConsistency(format!(
                "choice {choice:?} does not answer {request:?}"
            ))
        };

        match (request, choice) {
            (_, Choice::Decline) => Ok(Vec::new()),

            (DecisionRequest::BookSplit { total, direction }, Choice::Books(split)) => {
                if split.iter().sum::<u32>() != total {
                    return Err(mismatch());
                }
                for (discipline, &n) in Discipline::ALL.iter().zip(split.iter()) {
                    if n == 0 {
                        continue;
                    }
                    let resource = Resource::Books(*discipline);
                    match direction {
                        BookDirection::Gain => {
                            if state.pool.available(*discipline) < n {
                                return Err(EngineError::InternalConsistency(format!(
                                    "supply short of {n} {resource}"
                                )));
                            }
                            Self::gain(state, player, resource, n);
                        }
                        BookDirection::Spend => Self::spend(state, player, resource, n)?,
                    }
                }
                Ok(Vec::new())
            }

            (DecisionRequest::TrackSplit { total }, Choice::Tracks(split)) => {
                if split.iter().sum::<u32>() != total {
                    return Err(mismatch());
                }
                for (discipline, &n) in Discipline::ALL.iter().zip(split.iter()) {
                    if n > 0 {
                        advance_track(state, player, *discipline, n);
                    }
                }
                Ok(Vec::new())
            }

            (DecisionRequest::Position(req), Choice::Cell(cell)) => {
                Self::apply_position(state, player, req.purpose, cell)
            }

            (DecisionRequest::Tile(kind), Choice::Tile(tile)) => {
                let found = state.tiles.definition(tile)?.kind;
                if found != kind {
                    return Err(mismatch());
                }
                grant_tile(state, player, tile)
            }

            _ => Err(mismatch()),
        }
    }

    fn apply_position(
        state: &mut GameState,
        player: PlayerId,
        purpose: PositionPurpose,
        cell: CellId,
    ) -> EngineResult<Vec<Effect>> {
        match purpose {
            PositionPurpose::Terraform { spades } => {
                terraform(state, player, cell, u32::from(spades))?;
                Ok(Vec::new())
            }
            PositionPurpose::BuildWorkshop => {
                place_workshop(state, player, cell)?;
                Ok(Vec::new())
            }
            PositionPurpose::Upgrade { to } => upgrade_building(state, player, cell, to),
            PositionPurpose::Reserve => {
                let target = state.board.cell_mut(cell);
                if !target.is_free_for(player) {
                    return Err(EngineError::InternalConsistency(format!(
                        "{cell} cannot be reserved by {player}"
                    )));
                }
                target.reserved = Some(player);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{PositionFilter, PositionRequest};
    use crate::ledger::ScoreBucket;
    use crate::tiles::{TileId, TileKind};

    fn setup() -> (GameState, PlayerId) {
        (GameState::for_tests(3), PlayerId::new(0))
    }

    fn suspended(resolution: Resolution) -> Interrupt {
        resolution.into_interrupt().expect("expected an interrupt")
    }

    #[test]
    fn test_typed_gain_and_spend() {
        let (mut s, p) = setup();
        let r = EffectResolver::adjust(
            &mut s,
            p,
            &[Effect::coins(5), Effect::ore(2), Effect::pay_coins(3)],
        )
        .unwrap();
        assert!(r.is_complete());
        assert_eq!(s.players[p].coins, 2);
        assert_eq!(s.players[p].ore, 2);
    }

    #[test]
    fn test_overspend_is_fatal() {
        let (mut s, p) = setup();
        let err = EffectResolver::adjust(&mut s, p, &[Effect::pay_ore(1)]).unwrap_err();
        assert!(matches!(err, EngineError::InternalConsistency(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_typed_books_clamp_to_pool() {
        let (mut s, p) = setup();
        s.pool = crate::ledger::BookPool::new(2);
        EffectResolver::adjust(&mut s, p, &[Effect::books(Discipline::Law, 5)]).unwrap();
        assert_eq!(s.players[p].books, [0, 2, 0, 0]);
        assert_eq!(s.pool.available(Discipline::Law), 0);

        EffectResolver::adjust(&mut s, p, &[Effect::Spend(Resource::Books(Discipline::Law), 1)])
            .unwrap();
        assert_eq!(s.pool.available(Discipline::Law), 1);
    }

    #[test]
    fn test_five_any_books_scenario() {
        let (mut s, p) = setup();
        let interrupt = suspended(
            EffectResolver::adjust(&mut s, p, &[Effect::GainAnyBooks(5), Effect::coins(1)])
                .unwrap(),
        );
        assert_eq!(
            interrupt.request,
            DecisionRequest::BookSplit {
                total: 5,
                direction: BookDirection::Gain
            }
        );
        assert_eq!(interrupt.continuation, vec![Effect::coins(1)]);
        // Nothing applied yet.
        assert_eq!(s.players[p].total_books(), 0);

        let r = EffectResolver::resume(&mut s, interrupt, Choice::Books([2, 1, 1, 1])).unwrap();
        assert!(r.is_complete());
        assert_eq!(s.players[p].books, [2, 1, 1, 1]);
        assert_eq!(s.pool.counts(), [10, 11, 11, 11]);
        assert_eq!(s.players[p].coins, 1);
    }

    #[test]
    fn test_any_books_bounded_by_pool() {
        let (mut s, p) = setup();
        s.pool = crate::ledger::BookPool::new(0);
        s.pool.give_back(Discipline::Medicine, 2);
        let interrupt = suspended(EffectResolver::adjust(&mut s, p, &[Effect::GainAnyBooks(5)]).unwrap());
        assert_eq!(
            interrupt.request,
            DecisionRequest::BookSplit {
                total: 2,
                direction: BookDirection::Gain
            }
        );
        assert!(interrupt.continuation.is_empty());
    }

    #[test]
    fn test_large_requests_are_chained() {
        let (mut s, p) = setup();
        let interrupt = suspended(EffectResolver::adjust(&mut s, p, &[Effect::GainAnyBooks(10)]).unwrap());
        assert_eq!(
            interrupt.request,
            DecisionRequest::BookSplit {
                total: 8,
                direction: BookDirection::Gain
            }
        );
        assert_eq!(interrupt.continuation, vec![Effect::GainAnyBooks(2)]);
    }

    #[test]
    fn test_spend_any_books() {
        let (mut s, p) = setup();
        s.players[p].books = [1, 0, 2, 0];
        s.pool.take(Discipline::Banking, 1);
        s.pool.take(Discipline::Engineering, 2);

        let interrupt = suspended(EffectResolver::adjust(&mut s, p, &[Effect::SpendAnyBooks(2)]).unwrap());
        let r = EffectResolver::resume(&mut s, interrupt, Choice::Books([0, 0, 2, 0])).unwrap();
        assert!(r.is_complete());
        assert_eq!(s.players[p].books, [1, 0, 0, 0]);
        assert_eq!(s.book_total(Discipline::Engineering.index()), 12);

        assert!(EffectResolver::adjust(&mut s, p, &[Effect::SpendAnyBooks(2)]).is_err());
    }

    #[test]
    fn test_wrong_choice_shape_is_rejected() {
        let (mut s, p) = setup();
        let interrupt = suspended(EffectResolver::adjust(&mut s, p, &[Effect::GainAnyBooks(2)]).unwrap());
        let err = EffectResolver::resume(&mut s, interrupt.clone(), Choice::Books([1, 0, 0, 0]));
        assert!(err.is_err());
        let err = EffectResolver::resume(&mut s, interrupt, Choice::Tracks([2, 0, 0, 0]));
        assert!(err.is_err());
    }

    #[test]
    fn test_track_split() {
        let (mut s, p) = setup();
        let interrupt =
            suspended(EffectResolver::adjust(&mut s, p, &[Effect::AdvanceAnyTracks(3)]).unwrap());
        assert_eq!(interrupt.request, DecisionRequest::TrackSplit { total: 3 });
        EffectResolver::resume(&mut s, interrupt, Choice::Tracks([0, 3, 0, 0])).unwrap();
        assert_eq!(s.players[p].track(Discipline::Law), 3);
    }

    #[test]
    fn test_magic_effects() {
        let (mut s, p) = setup();
        EffectResolver::adjust(&mut s, p, &[Effect::BoomMagic(2)]).unwrap();
        assert_eq!(s.players[p].magic.zones(), [5, 3, 2]);
        EffectResolver::adjust(&mut s, p, &[Effect::UseMagic(2), Effect::AddMagicTokens(1)]).unwrap();
        assert_eq!(s.players[p].magic.zones(), [8, 3, 0]);
        assert!(EffectResolver::adjust(&mut s, p, &[Effect::UseMagic(1)]).is_err());
    }

    #[test]
    fn test_per_building_effects() {
        let (mut s, p) = setup();
        s.players[p].buildings[BuildingType::Workshop.index()] = 3;
        s.players[p].buildings[BuildingType::Guild.index()] = 2;
        EffectResolver::adjust(
            &mut s,
            p,
            &[
                Effect::ScorePerBuilding {
                    building: BuildingType::Guild,
                    points: 2,
                    bucket: ScoreBucket::Pass,
                },
                Effect::GainPerBuilding {
                    building: BuildingType::Workshop,
                    resource: Resource::Coins,
                    amount: 1,
                },
                Effect::BuildingIncome,
            ],
        )
        .unwrap();
        assert_eq!(s.players[p].score(ScoreBucket::Pass), 4);
        // 3 from GainPerBuilding, 2 × 2 from guild income.
        assert_eq!(s.players[p].coins, 7);
        assert_eq!(s.players[p].workers, 3);
    }

    #[test]
    fn test_position_decline_skips_to_continuation() {
        let (mut s, p) = setup();
        let interrupt = suspended(
            EffectResolver::adjust(
                &mut s,
                p,
                &[Effect::PickPosition(PositionRequest::spades(1)), Effect::coins(2)],
            )
            .unwrap(),
        );
        assert!(interrupt.request.is_optional());
        EffectResolver::resume(&mut s, interrupt, Choice::Decline).unwrap();
        assert_eq!(s.players[p].coins, 2);
    }

    #[test]
    fn test_reserve_position() {
        let (mut s, p) = setup();
        let cell = s
            .board
            .cells()
            .find(|(_, c)| c.terrain.is_land())
            .map(|(id, _)| id)
            .unwrap();
        let request = PositionRequest::new(
            PositionFilter::Anywhere { terrain: None },
            PositionPurpose::Reserve,
        );
        let interrupt =
            suspended(EffectResolver::adjust(&mut s, p, &[Effect::PickPosition(request)]).unwrap());
        EffectResolver::resume(&mut s, interrupt, Choice::Cell(cell)).unwrap();
        assert_eq!(s.board.cell(cell).reserved, Some(p));
        assert!(!s.board.cell(cell).is_free_for(PlayerId::new(1)));
    }

    #[test]
    fn test_tile_choice_fires_immediate_hook() {
        let (mut s, p) = setup();
        let interrupt = suspended(
            EffectResolver::adjust(&mut s, p, &[Effect::ChooseTile(TileKind::Competency)]).unwrap(),
        );
        // Bookkeeping: advance banking by one.
        EffectResolver::resume(&mut s, interrupt, Choice::Tile(TileId::new(29))).unwrap();
        assert_eq!(s.players[p].track(Discipline::Banking), 1);
        assert!(s.tiles.is_owned_by(TileId::new(29), p));
    }

    #[test]
    fn test_tile_choice_of_wrong_kind_is_rejected() {
        let (mut s, p) = setup();
        let interrupt = suspended(
            EffectResolver::adjust(&mut s, p, &[Effect::ChooseTile(TileKind::Competency)]).unwrap(),
        );
        let err = EffectResolver::resume(&mut s, interrupt, Choice::Tile(TileId::new(7)));
        assert!(err.is_err());
    }
}
