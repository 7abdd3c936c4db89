//! Tiles: home cards, factions, palace tiles, boosters, competency tiles
//! and round scoring tiles.
//!
//! ## Key Types
//!
//! - `TileDefinition`: immutable hooks and extra action of a tile
//! - `TileRegistry`: definitions plus who owns what
//! - `HookLists`: a player's registered hooks, by stable `HookKey`
//! - `ScoringTile`: per-round build bonus and round-end reward

pub mod builtin;
pub mod definition;
pub mod hooks;
pub mod registry;
pub mod scoring;

pub use builtin::{builtin_scoring_tiles, builtin_tiles};
pub use definition::{
    ExtraAction, Hook, SetupStyle, TileDefinition, TileId, TileKind, TILE_ID_LIMIT,
};
pub use hooks::{HookKey, HookKind, HookLists};
pub use registry::TileRegistry;
pub use scoring::ScoringTile;
