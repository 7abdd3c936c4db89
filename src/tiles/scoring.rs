//! Round scoring tiles.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::ledger::{BuildingType, Discipline};

/// One round's scoring tile.
///
/// While the round runs, every building of type `build_bonus.0` scores
/// `build_bonus.1` points. At round end each player receives `reward`
/// once per full `per` levels on `track`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTile {
    pub name: String,
    #[serde(default)]
    pub build_bonus: Option<(BuildingType, u32)>,
    pub track: Discipline,
    pub per: u8,
    pub reward: Vec<Effect>,
}

impl ScoringTile {
    #[must_use]
    pub fn new(name: impl Into<String>, track: Discipline, per: u8, reward: Vec<Effect>) -> Self {
        Self {
            name: name.into(),
            build_bonus: None,
            track,
            per,
            reward,
        }
    }

    #[must_use]
    pub fn with_build_bonus(mut self, building: BuildingType, points: u32) -> Self {
        self.build_bonus = Some((building, points));
        self
    }

    /// Points for building `building` while this tile is active.
    #[must_use]
    pub fn build_points(&self, building: BuildingType) -> u32 {
        match self.build_bonus {
            Some((b, points)) if b == building => points,
            _ => 0,
        }
    }

    /// How many times the reward is paid at `level`.
    #[must_use]
    pub fn multiplier(&self, level: u8) -> u32 {
        if self.per == 0 {
            0
        } else {
            u32::from(level / self.per)
        }
    }

    /// Effects paid at round end for a track level.
    #[must_use]
    pub fn round_reward(&self, level: u8) -> Vec<Effect> {
        let times = self.multiplier(level) as usize;
        let mut out = Vec::with_capacity(self.reward.len() * times);
        for _ in 0..times {
            out.extend(self.reward.iter().cloned());
        }
        out
    }
}
