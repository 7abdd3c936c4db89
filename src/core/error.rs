//! Engine error taxonomy.
//!
//! Only `IllegalAction` is recoverable: the driver re-routes the decision to
//! the default policy. Every other variant aborts the game instance.

use thiserror::Error;

use super::action::{ActionId, PhaseTag};
use super::player::PlayerId;

/// Errors raised by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A decision outside the current legal set.
    #[error("illegal action {id} for {player}")]
    IllegalAction { player: PlayerId, id: ActionId },

    /// Catalog or tile data the engine cannot interpret.
    #[error("configuration fault: {0}")]
    Configuration(String),

    /// A legality-checked action failed while being applied.
    #[error("internal consistency fault: {0}")]
    InternalConsistency(String),

    /// A scripted log entry does not match the engine's expected decision.
    #[error(
        "replay diverged at entry {index}: expected {expected_player} {expected_tag:?}, \
         log has {found_player} {found_tag:?}"
    )]
    ReplayDivergence {
        index: usize,
        expected_player: PlayerId,
        expected_tag: PhaseTag,
        found_player: PlayerId,
        found_tag: PhaseTag,
    },

    /// A scripted log entry names the expected decision but an id outside
    /// its legal set.
    #[error("replay entry {index} plays illegal action {id} for {player}")]
    ReplayIllegalAction {
        index: usize,
        player: PlayerId,
        id: ActionId,
    },

    /// A second immediate decision was raised while one is unserviced.
    #[error("interrupt raised for {raised} while one for {pending} is pending")]
    InterruptOverflow { pending: PlayerId, raised: PlayerId },
}

impl EngineError {
    /// Whether the game instance must be abandoned.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, EngineError::IllegalAction { .. })
    }

    pub(crate) fn insufficient(what: impl std::fmt::Display, player: PlayerId) -> Self {
        EngineError::InternalConsistency(format!("{player} cannot pay {what}"))
    }
}

/// Result alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;
