//! Immediate decisions raised while effects resolve.
//!
//! When the resolver meets an effect that needs the player's input, it
//! stops and hands back an `Interrupt`: who decides, what is being decided,
//! and the effects still waiting behind it. The turn driver solicits one
//! `Choice` and feeds it back through `EffectResolver::resume`.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::ledger::CellId;
use crate::tiles::{TileId, TileKind};

use super::effect::{Effect, PositionRequest};

/// Whether a book split adds to or removes from the player's books.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookDirection {
    Gain,
    Spend,
}

/// The sub-decision being asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionRequest {
    /// Split `total` books over the four disciplines.
    BookSplit { total: u32, direction: BookDirection },
    /// Split `total` track steps over the four tracks.
    TrackSplit { total: u32 },
    /// Pick a map cell.
    Position(PositionRequest),
    /// Pick a tile of a kind.
    Tile(TileKind),
}

impl DecisionRequest {
    /// Whether declining is a legal answer.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, DecisionRequest::Position(req) if req.optional)
    }
}

/// A suspended resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interrupt {
    pub player: PlayerId,
    pub request: DecisionRequest,
    /// Effects still to apply after the choice, in order.
    pub continuation: Vec<Effect>,
}

/// Outcome of applying a list of effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Complete,
    Suspended(Interrupt),
}

impl Resolution {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Resolution::Complete)
    }

    /// The pending interrupt, if resolution stopped.
    #[must_use]
    pub fn into_interrupt(self) -> Option<Interrupt> {
        match self {
            Resolution::Complete => None,
            Resolution::Suspended(interrupt) => Some(interrupt),
        }
    }
}

/// A player's answer to a `DecisionRequest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Books([u32; 4]),
    Tracks([u32; 4]),
    Cell(CellId),
    Tile(TileId),
    Decline,
}
