//! Shared book supply.
//!
//! Books move between the supply and players, never appear or vanish:
//! for each discipline, `supply count + Σ player books` is constant.

use serde::{Deserialize, Serialize};

use super::resources::Discipline;

/// Default number of books of each discipline.
pub const DEFAULT_BOOK_SUPPLY: u32 = 12;

/// The four book counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPool {
    counts: [u32; 4],
}

impl BookPool {
    /// A full pool with `per_type` books of each discipline.
    #[must_use]
    pub fn new(per_type: u32) -> Self {
        Self {
            counts: [per_type; 4],
        }
    }

    #[must_use]
    pub fn available(&self, discipline: Discipline) -> u32 {
        self.counts[discipline.index()]
    }

    #[must_use]
    pub fn counts(&self) -> [u32; 4] {
        self.counts
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Take up to `amount`; returns what was actually taken.
    pub fn take(&mut self, discipline: Discipline, amount: u32) -> u32 {
        let slot = &mut self.counts[discipline.index()];
        let taken = amount.min(*slot);
        *slot -= taken;
        taken
    }

    /// Return spent books to the supply.
    pub fn give_back(&mut self, discipline: Discipline, amount: u32) {
        self.counts[discipline.index()] += amount;
    }
}

impl Default for BookPool {
    fn default() -> Self {
        Self::new(DEFAULT_BOOK_SUPPLY)
    }
}
