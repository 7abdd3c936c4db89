//! Game state: the full ledger of a game in progress.
//!
//! `GameState` is plain data: per-player ledgers, the map, the shared book
//! supply, the track race board, tile ownership and the round's shared
//! action spots. Turn structure (whose turn, pending interrupts) lives in
//! the turn state machine, not here.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::{GameConfig, ROUNDS};
use super::error::EngineResult;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::ledger::{Board, BookPool, PlayerLedger, TrackBoard};
use crate::tiles::{ScoringTile, TileId, TileKind, TileRegistry};

/// Number of shared magic action spots.
pub const MAGIC_SPOTS: usize = 6;
/// Number of shared book action spots.
pub const BOOK_SPOTS: usize = 4;

/// Complete game ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<PlayerLedger>,
    pub board: Board,
    pub pool: BookPool,
    pub tracks: TrackBoard,
    pub tiles: TileRegistry,
    /// Scoring tile per round, in round order.
    pub scoring: Vec<ScoringTile>,
    /// 0 during setup, then 1..=6.
    pub round: u8,

    // === Shared round spots (true = taken) ===
    pub magic_spots: [bool; MAGIC_SPOTS],
    pub book_spots: [bool; BOOK_SPOTS],

    /// Coins piled on boosters nobody took.
    pub booster_coins: FxHashMap<TileId, u32>,
}

impl GameState {
    /// Initial state for a validated configuration.
    pub fn new(config: &GameConfig) -> EngineResult<Self> {
        let tiles = TileRegistry::from_definitions(config.tiles.iter().cloned())?;
        let board = match &config.map {
            Some(layout) => Board::from_layout(layout)?,
            None => Board::generate(&mut GameRng::new(config.seed).for_context("map")),
        };
        let booster_coins = tiles
            .of_kind(TileKind::Booster)
            .map(|t| (t.id, 0))
            .collect();

        Ok(Self {
            players: PlayerMap::new(config.player_count, PlayerLedger::new),
            board,
            pool: BookPool::new(config.book_supply),
            tracks: TrackBoard::new(),
            tiles,
            scoring: config.scoring_tiles.clone(),
            round: 0,
            magic_spots: [false; MAGIC_SPOTS],
            book_spots: [false; BOOK_SPOTS],
            booster_coins,
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids()
    }

    /// Scoring tile of the current round; `None` during setup.
    #[must_use]
    pub fn current_scoring(&self) -> Option<&ScoringTile> {
        match self.round {
            0 => None,
            r => self.scoring.get(usize::from(r) - 1),
        }
    }

    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.round == ROUNDS
    }

    /// Free all shared spots and extra-action flags for a new round.
    pub fn reset_round_spots(&mut self) {
        self.magic_spots = [false; MAGIC_SPOTS];
        self.book_spots = [false; BOOK_SPOTS];
        for (_, ledger) in self.players.iter_mut() {
            for used in ledger.extra_actions.values_mut() {
                *used = false;
            }
        }
    }

    /// Each booster nobody holds gains a coin.
    pub fn accrue_booster_coins(&mut self) {
        for id in self.tiles.unowned(TileKind::Booster) {
            *self.booster_coins.entry(id).or_insert(0) += 1;
        }
    }

    /// Total books of a discipline across supply and players.
    #[must_use]
    pub fn book_total(&self, index: usize) -> u32 {
        self.pool.counts()[index] + self.players.values().map(|p| p.books[index]).sum::<u32>()
    }

    /// Small seeded state for unit tests.
    #[cfg(test)]
    pub(crate) fn for_tests(player_count: usize) -> Self {
        let config = GameConfig::builder()
            .player_count(player_count)
            .build()
            .expect("test config");
        Self::new(&config).expect("test state")
    }
}
