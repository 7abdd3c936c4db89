//! Predicates: side-effect free checks against a player's ledger.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};
use crate::ledger::{BuildingType, Discipline, Resource};

/// A single requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    Has(Resource, u32),
    HasAnyBooks(u32),
    /// Spendable magic (zone 3).
    HasMagic(u32),
    /// Enough zone-2 tokens to boom this many into zone 3.
    CanBoom(u32),
    TrackAtLeast(Discipline, u8),
    HasBuilding(BuildingType, u32),
    HasCities(u32),
}

impl Predicate {
    /// Evaluate against `player`.
    #[must_use]
    pub fn holds(&self, state: &GameState, player: PlayerId) -> bool {
        let p = &state.players[player];
        match *self {
            Predicate::Has(resource, n) => p.amount(resource) >= n,
            Predicate::HasAnyBooks(n) => p.total_books() >= n,
            Predicate::HasMagic(n) => p.magic.spendable() >= n,
            Predicate::CanBoom(n) => p.magic.can_boom(n),
            Predicate::TrackAtLeast(track, level) => p.track(track) >= level,
            Predicate::HasBuilding(building, n) => p.building_count(building) >= n,
            Predicate::HasCities(n) => p.cities >= n,
        }
    }
}

/// Conjunction of `predicates` for `player`.
#[must_use]
pub fn check(state: &GameState, player: PlayerId, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| p.holds(state, player))
}
