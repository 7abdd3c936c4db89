//! Tile definitions - static tile data.
//!
//! A `TileDefinition` is everything a home card, faction, palace tile,
//! booster or competency tile contributes: up to four hooks, an optional
//! extra action, and a little kind-specific data. Ownership lives in the
//! `TileRegistry`; what a player has registered lives in their `HookLists`.

use serde::{Deserialize, Serialize};

use crate::effects::{Effect, Predicate};
use crate::ledger::Terrain;

use super::hooks::HookKind;

/// Exclusive upper bound on tile ids. The action catalog reserves this many
/// ids for each tile-indexed action kind.
pub const TILE_ID_LIMIT: u16 = 64;

/// Unique identifier for a tile definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Tile families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    HomeCard,
    Faction,
    PalaceTile,
    Booster,
    Competency,
}

/// How a faction places its setup workshops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetupStyle {
    /// One workshop forward, one in reverse.
    #[default]
    Standard,
    /// Reserves a cell going forward, builds on it after everyone else.
    Late,
    /// A third workshop after the reverse pass.
    Extra,
}

/// Effects fired at one hook point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hook {
    pub effects: Vec<Effect>,
    /// Remove the hook from the player's list after it fires.
    #[serde(default)]
    pub once: bool,
}

impl Hook {
    #[must_use]
    pub fn new(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            once: false,
        }
    }

    /// A hook that fires a single time.
    #[must_use]
    pub fn once(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            once: true,
        }
    }
}

/// A once-per-round action a tile grants its owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraAction {
    #[serde(default)]
    pub requires: Vec<Predicate>,
    #[serde(default)]
    pub cost: Vec<Effect>,
    pub effects: Vec<Effect>,
    /// Counts as the turn's main action.
    #[serde(default)]
    pub main: bool,
}

/// Static tile definition.
///
/// ## Example
///
/// ```
/// use innovation_rules::effects::Effect;
/// use innovation_rules::tiles::{Hook, HookKind, TileDefinition, TileId, TileKind};
///
/// let booster = TileDefinition::new(TileId::new(20), "Trade Winds", TileKind::Booster)
///     .with_hook(HookKind::Income, Hook::new(vec![Effect::coins(2)]));
///
/// assert!(booster.hook(HookKind::Income).is_some());
/// assert!(booster.hook(HookKind::Pass).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDefinition {
    pub id: TileId,
    pub name: String,
    pub kind: TileKind,
    /// How many players may own this tile at once.
    #[serde(default = "default_max_owners")]
    pub max_owners: u8,

    // === Kind-specific data ===
    #[serde(default)]
    pub home_terrain: Option<Terrain>,
    #[serde(default)]
    pub setup_style: SetupStyle,

    // === Hooks ===
    #[serde(default)]
    pub immediate: Option<Hook>,
    #[serde(default)]
    pub income: Option<Hook>,
    #[serde(default)]
    pub pass: Option<Hook>,
    #[serde(default)]
    pub setup: Option<Hook>,

    #[serde(default)]
    pub extra_action: Option<ExtraAction>,
}

fn default_max_owners() -> u8 {
    1
}

impl TileDefinition {
    #[must_use]
    pub fn new(id: TileId, name: impl Into<String>, kind: TileKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            max_owners: default_max_owners(),
            home_terrain: None,
            setup_style: SetupStyle::Standard,
            immediate: None,
            income: None,
            pass: None,
            setup: None,
            extra_action: None,
        }
    }

    #[must_use]
    pub fn with_max_owners(mut self, max_owners: u8) -> Self {
        self.max_owners = max_owners;
        self
    }

    #[must_use]
    pub fn with_home_terrain(mut self, terrain: Terrain) -> Self {
        self.home_terrain = Some(terrain);
        self
    }

    #[must_use]
    pub fn with_setup_style(mut self, style: SetupStyle) -> Self {
        self.setup_style = style;
        self
    }

    #[must_use]
    pub fn with_hook(mut self, kind: HookKind, hook: Hook) -> Self {
        *self.hook_slot(kind) = Some(hook);
        self
    }

    #[must_use]
    pub fn with_extra_action(mut self, action: ExtraAction) -> Self {
        self.extra_action = Some(action);
        self
    }

    fn hook_slot(&mut self, kind: HookKind) -> &mut Option<Hook> {
        match kind {
            HookKind::Immediate => &mut self.immediate,
            HookKind::Income => &mut self.income,
            HookKind::Pass => &mut self.pass,
            HookKind::Setup => &mut self.setup,
        }
    }

    /// The hook registered at `kind`, if any.
    #[must_use]
    pub fn hook(&self, kind: HookKind) -> Option<&Hook> {
        match kind {
            HookKind::Immediate => self.immediate.as_ref(),
            HookKind::Income => self.income.as_ref(),
            HookKind::Pass => self.pass.as_ref(),
            HookKind::Setup => self.setup.as_ref(),
        }
    }

    /// Every effect this tile can ever apply.
    pub fn all_effects(&self) -> impl Iterator<Item = &Effect> {
        [&self.immediate, &self.income, &self.pass, &self.setup]
            .into_iter()
            .flatten()
            .flat_map(|h| h.effects.iter())
            .chain(
                self.extra_action
                    .iter()
                    .flat_map(|a| a.cost.iter().chain(a.effects.iter())),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id() {
        let id = TileId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Tile(42)");
    }

    #[test]
    fn test_builder() {
        let tile = TileDefinition::new(TileId::new(3), "Marsh Folk", TileKind::HomeCard)
            .with_home_terrain(Terrain::Swamp)
            .with_hook(HookKind::Setup, Hook::once(vec![Effect::workers(1)]))
            .with_max_owners(2);

        assert_eq!(tile.home_terrain, Some(Terrain::Swamp));
        assert_eq!(tile.max_owners, 2);
        assert!(tile.hook(HookKind::Setup).is_some_and(|h| h.once));
        assert_eq!(tile.setup_style, SetupStyle::Standard);
    }

    #[test]
    fn test_all_effects_covers_extra_action() {
        let tile = TileDefinition::new(TileId::new(1), "x", TileKind::Competency)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::coins(1)]))
            .with_extra_action(ExtraAction {
                requires: vec![],
                cost: vec![Effect::pay_ore(1)],
                effects: vec![Effect::GainMagic(2)],
                main: false,
            });
        assert_eq!(tile.all_effects().count(), 3);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{"id": 7, "name": "Bare", "kind": "Booster"}"#;
        let tile: TileDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(tile.max_owners, 1);
        assert!(tile.income.is_none());
        assert!(tile.extra_action.is_none());
    }
}
