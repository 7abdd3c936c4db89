//! Stages of the game state machine.
//!
//! ```text
//! Draft -> SetupHooks -> SetupBuild -> { Income -> Action -> RoundEnd } x 6 -> Finished
//! ```
//!
//! Automatic stages (setup hooks, income, round end) carry the queue of
//! work captured when they began, so an interrupt raised halfway through
//! resumes with exactly the remaining items.

use std::collections::VecDeque;

use crate::catalog::SetupBuildStep;
use crate::core::PlayerId;
use crate::tiles::{HookKey, TileKind};

/// One item of the income queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncomeSource {
    /// Base income of the player's buildings.
    Buildings,
    Hook(HookKey),
}

/// Where the game is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Draft {
        picks: Vec<(PlayerId, TileKind)>,
        cursor: usize,
    },
    SetupHooks {
        queue: VecDeque<(PlayerId, HookKey)>,
    },
    SetupBuild {
        steps: Vec<(PlayerId, SetupBuildStep)>,
        cursor: usize,
    },
    Income {
        queue: VecDeque<(PlayerId, IncomeSource)>,
    },
    Action,
    RoundEnd {
        queue: VecDeque<PlayerId>,
    },
    Finished,
}

impl Stage {
    /// Short label for presentation.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Draft { .. } => "draft",
            Stage::SetupHooks { .. } => "setup",
            Stage::SetupBuild { .. } => "setup build",
            Stage::Income { .. } => "income",
            Stage::Action => "action",
            Stage::RoundEnd { .. } => "round end",
            Stage::Finished => "final",
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Stage::Finished)
    }
}
