//! Resource ledger: per-player counters and the shared pools.
//!
//! - `resources`: resource kinds, buildings, score buckets, `PlayerLedger`
//! - `magic`: the three-zone magic energy cycle
//! - `pool`: shared book supply
//! - `tracks`: crowns and worker slots of the discipline race board
//! - `board`: the hex map
//!
//! The ledger is plain data. All rule-driven mutation goes through the
//! effect resolver.

pub mod board;
pub mod magic;
pub mod pool;
pub mod resources;
pub mod tracks;

pub use board::{Board, Cell, CellId, Reach, Terrain, CELL_COUNT, COLS, ROWS};
pub use magic::MagicZones;
pub use pool::{BookPool, DEFAULT_BOOK_SUPPLY};
pub use resources::{
    BuildingType, Discipline, PlayerLedger, Resource, ScoreBucket, MAX_TRACK, START_MAGIC,
    START_SCORE,
};
pub use tracks::{TrackBoard, OVERFLOW_MAGNITUDE, SLOT_MAGNITUDES};
