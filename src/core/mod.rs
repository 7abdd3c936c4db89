//! Core engine types: players, RNG, action ids and the log, errors,
//! configuration and the game ledger.
//!
//! Everything here is plain data. Rule logic lives in `effects`, `catalog`
//! and `turn`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionId, ActionLog, LogEntry, PhaseTag};
pub use config::{GameConfig, GameConfigBuilder, MAX_PLAYERS, MIN_PLAYERS, ROUNDS};
pub use error::{EngineError, EngineResult};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, BOOK_SPOTS, MAGIC_SPOTS};
