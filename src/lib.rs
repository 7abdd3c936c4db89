//! # innovation-rules
//!
//! Rules engine for a territory-building game: a hex map of terrains,
//! four research tracks, a shared book supply, magic tokens cycling
//! through three zones, and a deck of tiles (home cards, factions, palace
//! tiles, boosters, competencies) whose hooks fire at fixed moments.
//!
//! ## Design Principles
//!
//! 1. **One integer per decision**: every choice is an `ActionId` in a
//!    fixed catalog. Legality is "is this id in the sorted legal set".
//!
//! 2. **Replayable**: config + action log determine the game. Look-ahead
//!    and rollback are replays of an extended or truncated log.
//!
//! 3. **Effects as data**: tiles, spots and conversions are lists of
//!    `Effect`s resolved by one interpreter that can suspend for a choice
//!    and resume exactly where it stopped.
//!
//! ## Modules
//!
//! - `core`: players, RNG, action ids and the log, errors, config, state
//! - `ledger`: map, per-player resources, magic, book pool, track board
//! - `tiles`: tile definitions, hooks, the built-in deck, scoring tiles
//! - `effects`: the effect interpreter and its interrupts
//! - `catalog`: id encoding, legality and execution of actions
//! - `turn`: stage machine, turn order, decision sources, final scoring
//! - `rules`: the `RulesEngine` seam
//! - `search`: replay-based look-ahead

pub mod catalog;
pub mod core;
pub mod effects;
pub mod ledger;
pub mod rules;
pub mod search;
pub mod tiles;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    ActionId, ActionLog, EngineError, EngineResult, GameConfig, GameConfigBuilder, GameRng,
    GameState, LogEntry, PhaseTag, PlayerId, PlayerMap,
};

pub use crate::catalog::{decode, encode, legal_actions, CatalogEntry, LegalityMode, PhaseView, CATALOG_SIZE};

pub use crate::effects::{Choice, DecisionRequest, Effect, EffectResolver, Interrupt, Predicate, Resolution};

pub use crate::ledger::{Board, BuildingType, CellId, Discipline, PlayerLedger, Resource, Terrain};

pub use crate::tiles::{HookKind, ScoringTile, TileDefinition, TileId, TileKind};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::turn::{
    DecisionContext, DecisionPoint, DecisionSource, DefaultPolicy, ExecutionMode, Game,
    PresentationSink, RankingComparator, Standing, Style,
};

pub use crate::search::{LookAhead, LookAheadConfig, MAX_LOOKAHEAD_DEPTH};
