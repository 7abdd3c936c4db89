//! Effect definitions.
//!
//! Effects are the closed vocabulary every tile hook, action cost and
//! action reward is written in. Each variant is a resource kind, a
//! direction and an amount; the resolver matches them exhaustively.

use serde::{Deserialize, Serialize};

use crate::ledger::{BuildingType, Discipline, Resource, ScoreBucket, Terrain};
use crate::tiles::TileKind;

/// An atomic ledger mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    // === Counters ===
    /// Typed gain. Books are clamped to what the supply holds.
    Gain(Resource, u32),
    /// Typed spend. Spending more than held is a consistency fault.
    Spend(Resource, u32),
    /// Gain books of the player's choosing (immediate decision).
    GainAnyBooks(u32),
    /// Spend books of the player's choosing (immediate decision).
    SpendAnyBooks(u32),

    // === Magic ===
    /// Rotate tokens forward through the zones.
    GainMagic(u32),
    /// Spend tokens from zone 3.
    UseMagic(u32),
    /// Burn 2 zone-2 tokens per token moved to zone 3.
    BoomMagic(u32),
    /// Fresh tokens into zone 1.
    AddMagicTokens(u32),

    // === Tracks ===
    AdvanceTrack(Discipline, u8),
    /// Distribute steps over tracks (immediate decision).
    AdvanceAnyTracks(u8),
    DowngradeTrack(Discipline, u8),

    // === Score ===
    Score(ScoreBucket, u32),
    ScorePerBuilding {
        building: BuildingType,
        points: u32,
        bucket: ScoreBucket,
    },

    // === Income ===
    GainPerBuilding {
        building: BuildingType,
        resource: Resource,
        amount: u32,
    },
    /// Base income of every building the player owns.
    BuildingIncome,
    SetOrePerSpade(u32),

    // === Decisions ===
    /// Pick a map cell (immediate decision).
    PickPosition(PositionRequest),
    /// Pick an available tile of a kind (immediate decision).
    ChooseTile(TileKind),
}

impl Effect {
    pub fn coins(amount: u32) -> Self {
        Self::Gain(Resource::Coins, amount)
    }

    pub fn pay_coins(amount: u32) -> Self {
        Self::Spend(Resource::Coins, amount)
    }

    pub fn ore(amount: u32) -> Self {
        Self::Gain(Resource::Ore, amount)
    }

    pub fn pay_ore(amount: u32) -> Self {
        Self::Spend(Resource::Ore, amount)
    }

    pub fn workers(amount: u32) -> Self {
        Self::Gain(Resource::Workers, amount)
    }

    pub fn books(discipline: Discipline, amount: u32) -> Self {
        Self::Gain(Resource::Books(discipline), amount)
    }

    pub fn score(bucket: ScoreBucket, points: u32) -> Self {
        Self::Score(bucket, points)
    }

    /// Whether resolving this effect needs a player decision.
    #[must_use]
    pub fn needs_decision(&self) -> bool {
        matches!(
            self,
            Effect::GainAnyBooks(_)
                | Effect::SpendAnyBooks(_)
                | Effect::AdvanceAnyTracks(_)
                | Effect::PickPosition(_)
                | Effect::ChooseTile(_)
        )
    }
}

/// Which cells a position decision may target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionFilter {
    /// Any free land cell, optionally of one terrain.
    Anywhere { terrain: Option<Terrain> },
    /// Free land reachable from the player's buildings.
    Reachable,
    /// A cell the player controls, optionally holding a given building.
    ///
    /// For guilds (the shared building type) an opponent neighbor is
    /// required unless `allow_isolated`.
    Controlled {
        building: Option<BuildingType>,
        allow_isolated: bool,
    },
}

/// What happens at the chosen cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionPurpose {
    /// Terraform toward the home terrain.
    Terraform { spades: u8 },
    /// Place a workshop for free (terraforming for free as well).
    BuildWorkshop,
    /// Upgrade the building there for free.
    Upgrade { to: BuildingType },
    /// Claim the cell so only this player can build on it.
    Reserve,
}

/// A position decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionRequest {
    pub filter: PositionFilter,
    pub purpose: PositionPurpose,
    /// Whether the player may decline.
    pub optional: bool,
}

impl PositionRequest {
    #[must_use]
    pub fn new(filter: PositionFilter, purpose: PositionPurpose) -> Self {
        Self {
            filter,
            purpose,
            optional: false,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Terraform a reachable cell by `spades` steps.
    #[must_use]
    pub fn spades(spades: u8) -> Self {
        Self::new(PositionFilter::Reachable, PositionPurpose::Terraform { spades }).optional()
    }
}
