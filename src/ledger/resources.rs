//! Resource kinds, buildings, score buckets and the per-player ledger.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::tiles::{HookLists, TileId};

use super::board::Terrain;
use super::magic::MagicZones;

/// The four disciplines. Each names both a book type and a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Discipline {
    Banking,
    Law,
    Engineering,
    Medicine,
}

impl Discipline {
    pub const ALL: [Discipline; 4] = [
        Discipline::Banking,
        Discipline::Law,
        Discipline::Engineering,
        Discipline::Medicine,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Countable player resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Coins,
    Ore,
    Workers,
    Bridges,
    Books(Discipline),
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Coins => write!(f, "coins"),
            Resource::Ore => write!(f, "ore"),
            Resource::Workers => write!(f, "workers"),
            Resource::Bridges => write!(f, "bridges"),
            Resource::Books(d) => write!(f, "{d:?} books"),
        }
    }
}

/// Building types, in upgrade-tree order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    Workshop,
    Guild,
    School,
    Palace,
    University,
}

impl BuildingType {
    pub const ALL: [BuildingType; 5] = [
        BuildingType::Workshop,
        BuildingType::Guild,
        BuildingType::School,
        BuildingType::Palace,
        BuildingType::University,
    ];

    /// Upgrade targets, in catalog order.
    pub const UPGRADES: [BuildingType; 4] = [
        BuildingType::Guild,
        BuildingType::School,
        BuildingType::Palace,
        BuildingType::University,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// How many of this building each player owns at most.
    #[must_use]
    pub const fn supply(self) -> u32 {
        match self {
            BuildingType::Workshop => 8,
            BuildingType::Guild => 4,
            BuildingType::School => 3,
            BuildingType::Palace | BuildingType::University => 1,
        }
    }

    /// Contribution to city formation.
    #[must_use]
    pub const fn power(self) -> u32 {
        match self {
            BuildingType::Workshop => 1,
            BuildingType::Guild | BuildingType::School => 2,
            BuildingType::Palace | BuildingType::University => 3,
        }
    }

    /// The building an upgrade to `self` replaces.
    #[must_use]
    pub const fn upgrades_from(self) -> Option<BuildingType> {
        match self {
            BuildingType::Workshop => None,
            BuildingType::Guild => Some(BuildingType::Workshop),
            BuildingType::School | BuildingType::Palace => Some(BuildingType::Guild),
            BuildingType::University => Some(BuildingType::School),
        }
    }
}

/// Where victory points came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreBucket {
    Start,
    Build,
    Round,
    Tiles,
    Tracks,
    Cities,
    Pass,
    Area,
    Resources,
}

impl ScoreBucket {
    pub const COUNT: usize = 9;

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Starting victory points.
pub const START_SCORE: u32 = 20;
/// Starting magic distribution over zones 1..3.
pub const START_MAGIC: [u32; 3] = [5, 7, 0];
/// Highest track level.
pub const MAX_TRACK: u8 = 12;

/// Everything one player owns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerLedger {
    pub id: PlayerId,

    // === Drafted components ===
    pub home_card: Option<TileId>,
    pub faction: Option<TileId>,
    pub palace_tile: Option<TileId>,
    pub booster: Option<TileId>,
    pub home_terrain: Option<Terrain>,

    // === Counters ===
    pub coins: u32,
    pub ore: u32,
    pub workers: u32,
    pub bridges: u32,
    pub books: [u32; 4],
    pub buildings: [u32; 5],
    pub tracks: [u8; 4],
    pub magic: MagicZones,
    pub scores: [u32; ScoreBucket::COUNT],

    /// Ore paid per terraforming step.
    pub ore_per_spade: u32,
    pub cities: u32,
    pub tracks_over_7: u32,

    // === Turn flags ===
    pub main_action_done: bool,
    pub has_passed: bool,

    // === Tile contributions ===
    pub hooks: HookLists,
    /// Extra actions keyed by the contributing tile; value = used this round.
    pub extra_actions: FxHashMap<TileId, bool>,
}

impl PlayerLedger {
    /// A fresh player before any draft pick.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        let mut scores = [0; ScoreBucket::COUNT];
        scores[ScoreBucket::Start.index()] = START_SCORE;

        Self {
            id,
            home_card: None,
            faction: None,
            palace_tile: None,
            booster: None,
            home_terrain: None,
            coins: 0,
            ore: 0,
            workers: 0,
            bridges: 0,
            books: [0; 4],
            buildings: [0; 5],
            tracks: [0; 4],
            magic: MagicZones::new(START_MAGIC),
            scores,
            ore_per_spade: 2,
            cities: 0,
            tracks_over_7: 0,
            main_action_done: false,
            has_passed: false,
            hooks: HookLists::default(),
            extra_actions: FxHashMap::default(),
        }
    }

    /// Current count of a resource.
    #[must_use]
    pub fn amount(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Coins => self.coins,
            Resource::Ore => self.ore,
            Resource::Workers => self.workers,
            Resource::Bridges => self.bridges,
            Resource::Books(d) => self.books[d.index()],
        }
    }

    pub(crate) fn amount_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Coins => &mut self.coins,
            Resource::Ore => &mut self.ore,
            Resource::Workers => &mut self.workers,
            Resource::Bridges => &mut self.bridges,
            Resource::Books(d) => &mut self.books[d.index()],
        }
    }

    #[must_use]
    pub fn total_books(&self) -> u32 {
        self.books.iter().sum()
    }

    #[must_use]
    pub fn track(&self, discipline: Discipline) -> u8 {
        self.tracks[discipline.index()]
    }

    #[must_use]
    pub fn building_count(&self, building: BuildingType) -> u32 {
        self.buildings[building.index()]
    }

    #[must_use]
    pub fn score(&self, bucket: ScoreBucket) -> u32 {
        self.scores[bucket.index()]
    }

    pub fn add_score(&mut self, bucket: ScoreBucket, points: u32) {
        self.scores[bucket.index()] += points;
    }

    /// Sum of all buckets.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.scores.iter().sum()
    }

    /// Whether another track may climb above 7.
    #[must_use]
    pub fn has_spare_key(&self) -> bool {
        self.tracks_over_7 < self.cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let p = PlayerLedger::new(PlayerId::new(1));
        assert_eq!(p.total_score(), START_SCORE);
        assert_eq!(p.magic.zones(), START_MAGIC);
        assert!(!p.has_spare_key());
        assert_eq!(p.amount(Resource::Books(Discipline::Law)), 0);
    }

    #[test]
    fn test_amount_mut_targets_matching_counter() {
        let mut p = PlayerLedger::new(PlayerId::new(0));
        *p.amount_mut(Resource::Books(Discipline::Medicine)) += 3;
        *p.amount_mut(Resource::Ore) += 2;
        assert_eq!(p.books, [0, 0, 0, 3]);
        assert_eq!(p.ore, 2);
        assert_eq!(p.total_books(), 3);
    }

    #[test]
    fn test_upgrade_tree() {
        assert_eq!(BuildingType::Guild.upgrades_from(), Some(BuildingType::Workshop));
        assert_eq!(BuildingType::Palace.upgrades_from(), Some(BuildingType::Guild));
        assert_eq!(BuildingType::University.upgrades_from(), Some(BuildingType::School));
        assert_eq!(BuildingType::Workshop.upgrades_from(), None);
    }

    #[test]
    fn test_discipline_index_roundtrip() {
        for d in Discipline::ALL {
            assert_eq!(Discipline::from_index(d.index()), Some(d));
        }
        assert_eq!(Discipline::from_index(4), None);
    }
}
