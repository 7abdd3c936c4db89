//! Magic energy in three ordered zones.
//!
//! Tokens only become spendable in zone 3. Gaining magic rotates tokens one
//! unit at a time: zone 1 drains into zone 2 first, then zone 2 into zone 3.
//! Spending returns tokens from zone 3 to zone 1. Booming burns zone-2
//! tokens at 2:1 to jump the rest straight into zone 3.

use serde::{Deserialize, Serialize};

/// Token counts of the three zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MagicZones {
    zones: [u32; 3],
}

impl MagicZones {
    #[must_use]
    pub fn new(zones: [u32; 3]) -> Self {
        Self { zones }
    }

    #[must_use]
    pub fn zones(&self) -> [u32; 3] {
        self.zones
    }

    /// Tokens ready to spend.
    #[must_use]
    pub fn spendable(&self) -> u32 {
        self.zones[2]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.zones.iter().sum()
    }

    /// Rotate up to `amount` units forward. Returns how many units moved.
    pub fn gain(&mut self, amount: u32) -> u32 {
        let mut moved = 0;
        while moved < amount {
            if self.zones[0] > 0 {
                self.zones[0] -= 1;
                self.zones[1] += 1;
            } else if self.zones[1] > 0 {
                self.zones[1] -= 1;
                self.zones[2] += 1;
            } else {
                break;
            }
            moved += 1;
        }
        moved
    }

    /// Move `amount` tokens from zone 3 back to zone 1.
    ///
    /// Returns `false` without touching anything when zone 3 is short.
    #[must_use]
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.zones[2] < amount {
            return false;
        }
        self.zones[2] -= amount;
        self.zones[0] += amount;
        true
    }

    /// Whether `amount` tokens can be boomed into zone 3.
    #[must_use]
    pub fn can_boom(&self, amount: u32) -> bool {
        self.zones[1] >= amount * 2
    }

    /// Burn `amount` zone-2 tokens to move another `amount` into zone 3.
    #[must_use]
    pub fn boom(&mut self, amount: u32) -> bool {
        if !self.can_boom(amount) {
            return false;
        }
        self.zones[1] -= amount * 2;
        self.zones[2] += amount;
        true
    }

    /// New tokens enter zone 1.
    pub fn add_tokens(&mut self, amount: u32) {
        self.zones[0] += amount;
    }
}
