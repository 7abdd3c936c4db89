//! Tile registry: definitions plus current ownership.
//!
//! Definitions are immutable for the whole game. Ownership changes during
//! the draft, when boosters are swapped on pass, and when competency tiles
//! are chosen. Iteration is always in id order so legal action lists are
//! deterministic.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineError, EngineResult, PlayerId};

use super::definition::{TileDefinition, TileId, TileKind, TILE_ID_LIMIT};

/// Registry of tile definitions and their owners.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TileRegistry {
    tiles: FxHashMap<TileId, TileDefinition>,
    /// Registered ids, ascending.
    order: Vec<TileId>,
    owners: FxHashMap<TileId, SmallVec<[PlayerId; 2]>>,
}

impl TileRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = TileDefinition>,
    ) -> EngineResult<Self> {
        let mut registry = Self::new();
        for def in definitions {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Load a JSON array of definitions.
    ///
    /// Unknown tile kinds, effect kinds or predicate kinds are rejected
    /// here rather than during play.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let definitions: Vec<TileDefinition> = serde_json::from_str(json)
            .map_err(|e| EngineError::Configuration(format!("tile data: {e}")))?;
        Self::from_definitions(definitions)
    }

    /// Register a definition. Duplicate or out-of-range ids are rejected.
    pub fn register(&mut self, tile: TileDefinition) -> EngineResult<()> {
        if tile.id.raw() >= TILE_ID_LIMIT {
            return Err(EngineError::Configuration(format!(
                "{} exceeds the tile id limit {TILE_ID_LIMIT}",
                tile.id
            )));
        }
        if self.tiles.contains_key(&tile.id) {
            return Err(EngineError::Configuration(format!(
                "{} registered twice",
                tile.id
            )));
        }
        if tile.max_owners == 0 {
            return Err(EngineError::Configuration(format!(
                "{} has max_owners 0",
                tile.id
            )));
        }
        let pos = self.order.partition_point(|&id| id < tile.id);
        self.order.insert(pos, tile.id);
        self.tiles.insert(tile.id, tile);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&TileDefinition> {
        self.tiles.get(&id)
    }

    /// Lookup that treats a missing tile as a configuration fault.
    pub fn definition(&self, id: TileId) -> EngineResult<&TileDefinition> {
        self.get(id)
            .ok_or_else(|| EngineError::Configuration(format!("unknown {id}")))
    }

    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TileDefinition> {
        self.order.iter().filter_map(|id| self.tiles.get(id))
    }

    /// Definitions of one kind, in id order.
    pub fn of_kind(&self, kind: TileKind) -> impl Iterator<Item = &TileDefinition> {
        self.iter().filter(move |t| t.kind == kind)
    }

    /// Current owners of a tile.
    #[must_use]
    pub fn owners(&self, id: TileId) -> &[PlayerId] {
        self.owners.get(&id).map_or(&[], |o| o.as_slice())
    }

    #[must_use]
    pub fn is_owned_by(&self, id: TileId, player: PlayerId) -> bool {
        self.owners(id).contains(&player)
    }

    /// Whether `player` may take the tile now.
    #[must_use]
    pub fn can_acquire(&self, id: TileId, player: PlayerId) -> bool {
        self.get(id).is_some_and(|t| {
            let owners = self.owners(id);
            owners.len() < usize::from(t.max_owners) && !owners.contains(&player)
        })
    }

    /// Tiles of a kind `player` may take now, in id order.
    #[must_use]
    pub fn available(&self, kind: TileKind, player: PlayerId) -> Vec<TileId> {
        self.of_kind(kind)
            .filter(|t| self.can_acquire(t.id, player))
            .map(|t| t.id)
            .collect()
    }

    /// Tiles of a kind nobody owns, in id order.
    #[must_use]
    pub fn unowned(&self, kind: TileKind) -> Vec<TileId> {
        self.of_kind(kind)
            .filter(|t| self.owners(t.id).is_empty())
            .map(|t| t.id)
            .collect()
    }

    /// Record `player` as an owner.
    pub fn acquire(&mut self, id: TileId, player: PlayerId) -> EngineResult<()> {
        if !self.can_acquire(id, player) {
            return Err(EngineError::InternalConsistency(format!(
                "{player} cannot acquire {id}"
            )));
        }
        self.owners.entry(id).or_default().push(player);
        Ok(())
    }

    /// Drop `player` from the owners. Returns whether they owned it.
    pub fn release(&mut self, id: TileId, player: PlayerId) -> bool {
        let Some(owners) = self.owners.get_mut(&id) else {
            return false;
        };
        match owners.iter().position(|&p| p == player) {
            Some(idx) => {
                owners.remove(idx);
                true
            }
            None => false,
        }
    }
}
