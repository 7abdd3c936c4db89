//! The `RulesEngine` seam.
//!
//! Front ends, bots and the look-ahead talk to a game through this trait:
//! what is legal now, apply one id, and whether the game is over. `Game`
//! is the implementation.

use crate::core::{ActionId, EngineResult, PlayerId};
use crate::turn::{DecisionPoint, Game, Standing};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several players tied on the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }

    /// Everyone sharing the top total in a ranking.
    #[must_use]
    pub fn from_standings(standings: &[Standing]) -> Option<Self> {
        let top = standings.iter().map(|s| s.total).max()?;
        let mut best: Vec<PlayerId> = standings
            .iter()
            .filter(|s| s.total == top)
            .map(|s| s.player)
            .collect();
        Some(match best.len() {
            1 => GameResult::Winner(best.remove(0)),
            _ => GameResult::Winners(best),
        })
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `decision_point`: `None` only when the game is over
/// - `apply`: must be deterministic; replay and look-ahead rely on it
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// The pending decision and its legal ids.
    fn decision_point(&self) -> Option<DecisionPoint>;

    /// Apply one legal id and advance to the next decision.
    fn apply(&mut self, id: ActionId) -> EngineResult<()>;

    /// Current standings, best first.
    fn ranking(&self) -> Vec<Standing>;

    /// Check if the game is over.
    fn is_terminal(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Legal ids of the pending decision; empty once the game is over.
    fn legal_actions(&self) -> Vec<ActionId> {
        self.decision_point().map(|p| p.legal).unwrap_or_default()
    }
}

impl RulesEngine for Game {
    fn decision_point(&self) -> Option<DecisionPoint> {
        Game::decision_point(self)
    }

    fn apply(&mut self, id: ActionId) -> EngineResult<()> {
        Game::apply(self, id)
    }

    fn ranking(&self) -> Vec<Standing> {
        Game::ranking(self)
    }

    fn is_terminal(&self) -> Option<GameResult> {
        if !self.is_finished() {
            return None;
        }
        GameResult::from_standings(&Game::ranking(self))
    }
}
