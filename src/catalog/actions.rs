//! Fixed action content: shared spots, conversions and building costs.
//!
//! Every action is described as `requires` predicates, a `cost` and
//! `effects`. Legality checks `requires` plus the predicates implied by the
//! cost; the executor resolves `cost` then `effects` in one walk.

use crate::core::{GameState, PlayerId};
use crate::effects::{check, Effect, PositionRequest, Predicate};
use crate::effects::build::spades_needed;
use crate::ledger::{BuildingType, CellId, Reach, Resource};

/// An action's requirements, cost and reward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: &'static str,
    pub requires: Vec<Predicate>,
    pub cost: Vec<Effect>,
    pub effects: Vec<Effect>,
}

impl ActionSpec {
    fn new(name: &'static str, cost: Vec<Effect>, effects: Vec<Effect>) -> Self {
        Self {
            name,
            requires: Vec::new(),
            cost,
            effects,
        }
    }

    /// Whether `player` meets the requirements and can pay the cost.
    #[must_use]
    pub fn affordable(&self, state: &GameState, player: PlayerId) -> bool {
        check(state, player, &self.requires) && can_pay(state, player, &self.cost)
    }

    /// Cost followed by effects.
    #[must_use]
    pub fn sequence(&self) -> Vec<Effect> {
        self.cost.iter().chain(&self.effects).cloned().collect()
    }
}

/// Predicates a cost implies, aggregated per resource.
#[must_use]
pub fn cost_predicates(cost: &[Effect]) -> Vec<Predicate> {
    let mut spends: Vec<(Resource, u32)> = Vec::new();
    let (mut books, mut magic, mut boom) = (0, 0, 0);
    for effect in cost {
        match *effect {
            Effect::Spend(resource, n) => match spends.iter_mut().find(|(r, _)| *r == resource) {
                Some((_, total)) => *total += n,
                None => spends.push((resource, n)),
            },
            Effect::SpendAnyBooks(n) => books += n,
            Effect::UseMagic(n) => magic += n,
            Effect::BoomMagic(n) => boom += n,
            _ => {}
        }
    }

    let mut predicates: Vec<Predicate> = spends
        .into_iter()
        .map(|(resource, n)| Predicate::Has(resource, n))
        .collect();
    if books > 0 {
        predicates.push(Predicate::HasAnyBooks(books));
    }
    if magic > 0 {
        predicates.push(Predicate::HasMagic(magic));
    }
    if boom > 0 {
        predicates.push(Predicate::CanBoom(boom));
    }
    predicates
}

/// Whether `player` can pay `cost` in full.
#[must_use]
pub fn can_pay(state: &GameState, player: PlayerId, cost: &[Effect]) -> bool {
    check(state, player, &cost_predicates(cost))
}

/// Magic action spot `0..6`: bridge, workers, any book, ore, coins, spade.
#[must_use]
pub fn magic_action(spot: u8) -> Option<ActionSpec> {
    let (name, magic, effect) = match spot {
        0 => ("bridge", 3, Effect::Gain(Resource::Bridges, 1)),
        1 => ("two workers", 3, Effect::workers(2)),
        2 => ("any book", 3, Effect::GainAnyBooks(1)),
        3 => ("two ore", 4, Effect::ore(2)),
        4 => ("seven coins", 4, Effect::coins(7)),
        5 => ("one spade", 4, Effect::PickPosition(PositionRequest::spades(1))),
        _ => return None,
    };
    Some(ActionSpec::new(name, vec![Effect::UseMagic(magic)], vec![effect]))
}

/// Book action spot `0..4`.
#[must_use]
pub fn book_action(spot: u8) -> Option<ActionSpec> {
    let (name, books, effect) = match spot {
        0 => ("study", 1, Effect::AdvanceAnyTracks(1)),
        1 => ("sell books", 2, Effect::coins(5)),
        2 => ("two spades", 2, Effect::PickPosition(PositionRequest::spades(2))),
        3 => ("seminar", 3, Effect::AdvanceAnyTracks(2)),
        _ => return None,
    };
    Some(ActionSpec::new(name, vec![Effect::SpendAnyBooks(books)], vec![effect]))
}

/// Free conversion `0..6`.
#[must_use]
pub fn conversion(kind: u8) -> Option<ActionSpec> {
    let spec = match kind {
        0 => ActionSpec::new("magic to coin", vec![Effect::UseMagic(1)], vec![Effect::coins(1)]),
        1 => ActionSpec::new("magic to ore", vec![Effect::UseMagic(3)], vec![Effect::ore(1)]),
        2 => ActionSpec::new("magic to worker", vec![Effect::UseMagic(5)], vec![Effect::workers(1)]),
        3 => ActionSpec::new("magic to book", vec![Effect::UseMagic(5)], vec![Effect::GainAnyBooks(1)]),
        4 => ActionSpec::new("ore to coin", vec![Effect::pay_ore(1)], vec![Effect::coins(1)]),
        5 => ActionSpec::new(
            "worker to ore",
            vec![Effect::Spend(Resource::Workers, 1)],
            vec![Effect::ore(1)],
        ),
        _ => return None,
    };
    Some(spec)
}

/// Boom `amount` tokens into zone 3.
#[must_use]
pub fn boom(amount: u8) -> ActionSpec {
    let amount = u32::from(amount);
    ActionSpec {
        name: "boom",
        requires: vec![Predicate::CanBoom(amount)],
        cost: Vec::new(),
        effects: vec![Effect::BoomMagic(amount)],
    }
}

/// Cost of building a workshop on `cell`, or `None` if it is out of reach.
///
/// One worker and two coins, ore for each spade needed to reach the home
/// terrain, and a bridge when the cell is only reachable across a river.
#[must_use]
pub fn workshop_cost(state: &GameState, player: PlayerId, cell: CellId) -> Option<Vec<Effect>> {
    let p = &state.players[player];
    let reach = state.board.reach(cell, player, p.bridges > 0)?;
    let spades = spades_needed(state, player, cell).ok()?;

    let mut cost = vec![Effect::Spend(Resource::Workers, 1), Effect::pay_coins(2)];
    if spades > 0 {
        cost.push(Effect::pay_ore(spades * p.ore_per_spade));
    }
    if reach == Reach::Bridge {
        cost.push(Effect::Spend(Resource::Bridges, 1));
    }
    Some(cost)
}

/// Cost of upgrading the building at `cell` to `to`.
///
/// Guilds cost twice the coins when no opponent building is adjacent.
#[must_use]
pub fn upgrade_cost(state: &GameState, player: PlayerId, cell: CellId, to: BuildingType) -> Vec<Effect> {
    let (ore, coins) = match to {
        BuildingType::Guild if state.board.has_opponent_neighbor(cell, player) => (2, 3),
        BuildingType::Guild => (2, 6),
        BuildingType::School => (2, 5),
        BuildingType::Palace => (4, 6),
        BuildingType::University => (5, 6),
        BuildingType::Workshop => (0, 2),
    };
    vec![Effect::pay_ore(ore), Effect::pay_coins(coins)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::ledger::{Discipline, Terrain, CELL_COUNT};

    #[test]
    fn test_cost_predicates_aggregate() {
        let cost = [
            Effect::pay_ore(2),
            Effect::pay_coins(3),
            Effect::pay_ore(1),
            Effect::SpendAnyBooks(2),
            Effect::UseMagic(4),
        ];
        let preds = cost_predicates(&cost);
        assert_eq!(
            preds,
            vec![
                Predicate::Has(Resource::Ore, 3),
                Predicate::Has(Resource::Coins, 3),
                Predicate::HasAnyBooks(2),
                Predicate::HasMagic(4),
            ]
        );
    }

    #[test]
    fn test_spot_tables() {
        assert!(magic_action(5).is_some());
        assert!(magic_action(6).is_none());
        assert!(book_action(3).is_some());
        assert!(book_action(4).is_none());
        assert!(conversion(5).is_some());
        assert!(conversion(6).is_none());
        assert_eq!(magic_action(4).unwrap().cost, vec![Effect::UseMagic(4)]);
    }

    #[test]
    fn test_affordable_uses_zone_three() {
        let mut state = GameState::for_tests(3);
        let p = PlayerId::new(0);
        let spec = magic_action(0).unwrap();
        assert!(!spec.affordable(&state, p));
        state.players[p].magic = crate::ledger::MagicZones::new([0, 0, 3]);
        assert!(spec.affordable(&state, p));
    }

    #[test]
    fn test_book_action_sequence() {
        let spec = book_action(0).unwrap();
        assert_eq!(
            spec.sequence(),
            vec![Effect::SpendAnyBooks(1), Effect::AdvanceAnyTracks(1)]
        );
        let mut state = GameState::for_tests(3);
        let p = PlayerId::new(1);
        assert!(!spec.affordable(&state, p));
        state.players[p].books[Discipline::Law.index()] = 1;
        assert!(spec.affordable(&state, p));
    }

    #[test]
    fn test_workshop_cost_counts_spades() {
        let mut layout = vec![Terrain::Plains; CELL_COUNT];
        layout[1] = Terrain::Lakes;
        let config = GameConfig::builder().player_count(3).map(layout).build().unwrap();
        let mut state = GameState::new(&config).unwrap();
        let p = PlayerId::new(0);
        state.players[p].home_terrain = Some(Terrain::Plains);
        crate::effects::build::place_workshop(&mut state, p, CellId::new(0)).unwrap();

        // Plains -> Lakes is two steps on the wheel.
        let cost = workshop_cost(&state, p, CellId::new(1)).unwrap();
        assert_eq!(
            cost,
            vec![
                Effect::Spend(Resource::Workers, 1),
                Effect::pay_coins(2),
                Effect::pay_ore(4),
            ]
        );
        // Not adjacent to anything the player owns.
        assert!(workshop_cost(&state, p, CellId::new(60)).is_none());
    }

    #[test]
    fn test_isolated_guild_costs_more() {
        let state = GameState::for_tests(3);
        let cost = upgrade_cost(&state, PlayerId::new(0), CellId::new(0), BuildingType::Guild);
        assert_eq!(cost, vec![Effect::pay_ore(2), Effect::pay_coins(6)]);
    }
}
