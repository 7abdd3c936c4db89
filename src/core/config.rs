//! Game configuration.
//!
//! A `GameConfig` is immutable once built and, together with the action
//! log, fully determines a game. Build one with `GameConfigBuilder`:
//!
//! ```
//! use innovation_rules::core::GameConfig;
//!
//! let config = GameConfig::builder().player_count(4).seed(9).build().unwrap();
//! assert_eq!(config.player_count, 4);
//! assert_eq!(config.scoring_tiles.len(), 6);
//! ```
//!
//! Without an explicit tile selection the builder draws one from the
//! built-in catalog using the seed, so the same seed selects the same tiles.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use super::player::PlayerId;
use super::rng::GameRng;
use crate::ledger::{Terrain, CELL_COUNT, DEFAULT_BOOK_SUPPLY};
use crate::tiles::{
    builtin_scoring_tiles, builtin_tiles, ScoringTile, TileDefinition, TileKind, TileRegistry,
};

/// Fewest seats a game supports.
pub const MIN_PLAYERS: usize = 3;
/// Most seats a game supports.
pub const MAX_PLAYERS: usize = 5;
/// Rounds per game, one scoring tile each.
pub const ROUNDS: u8 = 6;

/// Everything needed to start a game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub player_count: usize,
    pub seed: u64,
    /// Forward draft order; also the first round's turn order.
    pub seating: Vec<PlayerId>,
    pub tiles: Vec<TileDefinition>,
    /// One per round, in round order.
    pub scoring_tiles: Vec<ScoringTile>,
    /// Row-major terrain layout; `None` generates one from the seed.
    pub map: Option<Vec<Terrain>>,
    /// Books of each discipline in the shared supply.
    pub book_supply: u32,
}

impl GameConfig {
    #[must_use]
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::new()
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> EngineResult<()> {
        let n = self.player_count;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(EngineError::Configuration(format!(
                "player count {n} outside {MIN_PLAYERS}..={MAX_PLAYERS}"
            )));
        }

        let mut seats: Vec<usize> = self.seating.iter().map(|p| p.index()).collect();
        seats.sort_unstable();
        if seats != (0..n).collect::<Vec<_>>() {
            return Err(EngineError::Configuration(format!(
                "seating {:?} is not a permutation of {n} players",
                self.seating
            )));
        }

        if self.scoring_tiles.len() != usize::from(ROUNDS) {
            return Err(EngineError::Configuration(format!(
                "{} scoring tiles, expected {ROUNDS}",
                self.scoring_tiles.len()
            )));
        }

        if let Some(layout) = &self.map {
            if layout.len() != CELL_COUNT {
                return Err(EngineError::Configuration(format!(
                    "map layout has {} cells, expected {CELL_COUNT}",
                    layout.len()
                )));
            }
        }

        let registry = TileRegistry::from_definitions(self.tiles.iter().cloned())?;
        // Passing swaps boosters, so one more than the seats is needed.
        let needed = [
            (TileKind::HomeCard, n),
            (TileKind::Faction, n),
            (TileKind::PalaceTile, n),
            (TileKind::Booster, n + 1),
        ];
        for (kind, min) in needed {
            let have = registry.of_kind(kind).count();
            if have < min {
                return Err(EngineError::Configuration(format!(
                    "{have} {kind:?} tiles selected, need at least {min}"
                )));
            }
        }
        if registry
            .of_kind(TileKind::HomeCard)
            .any(|t| !t.home_terrain.is_some_and(Terrain::is_land))
        {
            return Err(EngineError::Configuration(
                "every home card needs a land home terrain".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for `GameConfig`.
#[derive(Clone, Debug)]
pub struct GameConfigBuilder {
    player_count: usize,
    seed: u64,
    seating: Option<Vec<PlayerId>>,
    tiles: Option<Vec<TileDefinition>>,
    scoring_tiles: Option<Vec<ScoringTile>>,
    map: Option<Vec<Terrain>>,
    book_supply: u32,
}

impl Default for GameConfigBuilder {
    fn default() -> Self {
        Self {
            player_count: 4,
            seed: 0,
            seating: None,
            tiles: None,
            scoring_tiles: None,
            map: None,
            book_supply: DEFAULT_BOOK_SUPPLY,
        }
    }
}

impl GameConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Explicit forward seating. Defaults to seat order.
    #[must_use]
    pub fn seating(mut self, seating: Vec<PlayerId>) -> Self {
        self.seating = Some(seating);
        self
    }

    /// Explicit tile selection instead of a seeded one.
    #[must_use]
    pub fn tiles(mut self, tiles: Vec<TileDefinition>) -> Self {
        self.tiles = Some(tiles);
        self
    }

    /// Explicit round scoring tiles, in round order.
    #[must_use]
    pub fn scoring_tiles(mut self, tiles: Vec<ScoringTile>) -> Self {
        self.scoring_tiles = Some(tiles);
        self
    }

    /// Fixed map layout.
    #[must_use]
    pub fn map(mut self, layout: Vec<Terrain>) -> Self {
        self.map = Some(layout);
        self
    }

    #[must_use]
    pub fn book_supply(mut self, per_type: u32) -> Self {
        self.book_supply = per_type;
        self
    }

    /// Fill in seeded defaults and validate.
    pub fn build(self) -> EngineResult<GameConfig> {
        let root = GameRng::new(self.seed);
        let n = self.player_count;

        let tiles = match self.tiles {
            Some(tiles) => tiles,
            None => select_tiles(&mut root.for_context("tiles"), n),
        };
        let scoring_tiles = match self.scoring_tiles {
            Some(tiles) => tiles,
            None => {
                let mut all = builtin_scoring_tiles();
                root.for_context("scoring").shuffle(&mut all);
                all.truncate(usize::from(ROUNDS));
                all
            }
        };

        let config = GameConfig {
            player_count: n,
            seed: self.seed,
            seating: self
                .seating
                .unwrap_or_else(|| PlayerId::all(n).collect()),
            tiles,
            scoring_tiles,
            map: self.map,
            book_supply: self.book_supply,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Built-in tiles with a seeded booster subset of `player_count + 3`.
fn select_tiles(rng: &mut GameRng, player_count: usize) -> Vec<TileDefinition> {
    let (mut boosters, mut rest): (Vec<_>, Vec<_>) = builtin_tiles()
        .into_iter()
        .partition(|t| t.kind == TileKind::Booster);
    rng.shuffle(&mut boosters);
    boosters.truncate(player_count + 3);
    rest.extend(boosters);
    rest.sort_by_key(|t| t.id);
    rest
}
