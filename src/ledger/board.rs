//! The map: a fixed hex grid of terrain, ownership and buildings.
//!
//! Cells are laid out in 9 rows of 13 with odd rows shifted half a cell to
//! the right. Each land cell can hold one building; river cells only
//! connect land across bridges.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineError, EngineResult, GameRng, PlayerId};

use super::resources::BuildingType;

pub const ROWS: usize = 9;
pub const COLS: usize = 13;
pub const CELL_COUNT: usize = ROWS * COLS;

/// Cell identifier (row-major index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u8);

impl CellId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        (row < ROWS && col < COLS).then(|| Self((row * COLS + col) as u8))
    }

    #[must_use]
    pub const fn coords(self) -> (usize, usize) {
        (self.index() / COLS, self.index() % COLS)
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = CellId> {
        (0..CELL_COUNT as u8).map(CellId)
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (r, c) = self.coords();
        write!(f, "{}{}", (b'A' + r as u8) as char, c + 1)
    }
}

/// Terrain types. The seven land types form a cycle for terraforming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Plains,
    Swamp,
    Lakes,
    Forest,
    Mountains,
    Wasteland,
    Desert,
    River,
}

impl Terrain {
    pub const LAND: [Terrain; 7] = [
        Terrain::Plains,
        Terrain::Swamp,
        Terrain::Lakes,
        Terrain::Forest,
        Terrain::Mountains,
        Terrain::Wasteland,
        Terrain::Desert,
    ];

    #[must_use]
    pub const fn is_land(self) -> bool {
        !matches!(self, Terrain::River)
    }

    /// Terraforming steps between two land types; `None` involving river.
    #[must_use]
    pub fn distance(self, other: Terrain) -> Option<u32> {
        if !self.is_land() || !other.is_land() {
            return None;
        }
        let d = (self as i32 - other as i32).unsigned_abs();
        Some(d.min(7 - d))
    }

    /// One terraforming step from `self` toward `target`.
    #[must_use]
    pub fn step_toward(self, target: Terrain) -> Terrain {
        let (Some(d), true) = (self.distance(target), self != target) else {
            return self;
        };
        let forward = (self as usize + 1) % 7;
        let backward = (self as usize + 6) % 7;
        let via_forward = Terrain::LAND[forward].distance(target).unwrap_or(d);
        if via_forward < d {
            Terrain::LAND[forward]
        } else {
            Terrain::LAND[backward]
        }
    }
}

/// A single map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub owner: Option<PlayerId>,
    pub building: Option<BuildingType>,
    /// Part of a formed city.
    pub annexed: bool,
    /// Claimed by a player's setup position pick.
    pub reserved: Option<PlayerId>,
}

impl Cell {
    #[must_use]
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            owner: None,
            building: None,
            annexed: false,
            reserved: None,
        }
    }

    /// Empty land not claimed by anyone else.
    #[must_use]
    pub fn is_free_for(&self, player: PlayerId) -> bool {
        self.terrain.is_land()
            && self.building.is_none()
            && self.reserved.is_none_or(|p| p == player)
    }
}

/// How a cell is reached from a player's network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reach {
    /// Shares an edge with one of the player's buildings.
    Direct,
    /// Two steps away through a river cell; costs a bridge.
    Bridge,
}

/// The map grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Board from an explicit row-major terrain layout.
    pub fn from_layout(layout: &[Terrain]) -> EngineResult<Self> {
        if layout.len() != CELL_COUNT {
            return Err(EngineError::Configuration(format!(
                "map layout has {} cells, expected {CELL_COUNT}",
                layout.len()
            )));
        }
        Ok(Self {
            cells: layout.iter().copied().map(Cell::new).collect(),
        })
    }

    /// Balanced random layout: 13 cells of each land type, the rest river.
    #[must_use]
    pub fn generate(rng: &mut GameRng) -> Self {
        let mut layout: Vec<Terrain> = Terrain::LAND
            .iter()
            .flat_map(|&t| std::iter::repeat(t).take(13))
            .collect();
        layout.resize(CELL_COUNT, Terrain::River);
        rng.shuffle(&mut layout);

        Self {
            cells: layout.into_iter().map(Cell::new).collect(),
        }
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.index()]
    }

    /// `(id, cell)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (CellId(i as u8), c))
    }

    /// The up to six cells sharing an edge with `id`.
    #[must_use]
    pub fn neighbors(&self, id: CellId) -> SmallVec<[CellId; 6]> {
        let (r, c) = id.coords();
        let (r, c) = (r as isize, c as isize);
        let deltas: [(isize, isize); 6] = if r % 2 == 0 {
            [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)]
        } else {
            [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)]
        };

        deltas
            .iter()
            .filter_map(|(dr, dc)| {
                let (nr, nc) = (r + dr, c + dc);
                if nr < 0 || nc < 0 {
                    return None;
                }
                CellId::from_coords(nr as usize, nc as usize)
            })
            .collect()
    }

    fn owned_by(&self, id: CellId, player: PlayerId) -> bool {
        let cell = self.cell(id);
        cell.owner == Some(player) && cell.building.is_some()
    }

    /// Cells holding one of `player`'s buildings.
    pub fn owned_cells(&self, player: PlayerId) -> impl Iterator<Item = CellId> + '_ {
        CellId::all().filter(move |&id| self.owned_by(id, player))
    }

    #[must_use]
    pub fn has_own_neighbor(&self, id: CellId, player: PlayerId) -> bool {
        self.neighbors(id).iter().any(|&n| self.owned_by(n, player))
    }

    /// Whether a building of another player touches `id`.
    #[must_use]
    pub fn has_opponent_neighbor(&self, id: CellId, player: PlayerId) -> bool {
        self.neighbors(id).iter().any(|&n| {
            let cell = self.cell(n);
            cell.building.is_some() && cell.owner.is_some_and(|o| o != player)
        })
    }

    /// How `player` can reach an empty land cell, if at all.
    #[must_use]
    pub fn reach(&self, id: CellId, player: PlayerId, has_bridge: bool) -> Option<Reach> {
        if !self.cell(id).is_free_for(player) {
            return None;
        }
        if self.has_own_neighbor(id, player) {
            return Some(Reach::Direct);
        }
        let across_river = has_bridge
            && self.neighbors(id).iter().any(|&n| {
                self.cell(n).terrain == Terrain::River && self.has_own_neighbor(n, player)
            });
        across_river.then_some(Reach::Bridge)
    }

    /// Connected component of `player`'s buildings containing `start`.
    #[must_use]
    pub fn group(&self, start: CellId, player: PlayerId) -> Vec<CellId> {
        if !self.owned_by(start, player) {
            return Vec::new();
        }
        let mut seen = vec![false; CELL_COUNT];
        let mut stack = vec![start];
        let mut group = Vec::new();
        seen[start.index()] = true;

        while let Some(id) = stack.pop() {
            group.push(id);
            for n in self.neighbors(id) {
                if !seen[n.index()] && self.owned_by(n, player) {
                    seen[n.index()] = true;
                    stack.push(n);
                }
            }
        }
        group.sort_unstable();
        group
    }

    /// Size of `player`'s largest connected area.
    #[must_use]
    pub fn largest_area(&self, player: PlayerId) -> usize {
        let mut seen = vec![false; CELL_COUNT];
        let mut best = 0;
        for id in self.owned_cells(player).collect::<Vec<_>>() {
            if seen[id.index()] {
                continue;
            }
            let group = self.group(id, player);
            for g in &group {
                seen[g.index()] = true;
            }
            best = best.max(group.len());
        }
        best
    }
}
