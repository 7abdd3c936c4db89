//! Turn structure: the stage machine, turn order, interrupts, decision
//! sources, presentation and final scoring.
//!
//! `Game` is the entry point. Everything else here is a piece it drives.

pub mod decision;
pub mod game;
pub mod interrupt;
pub mod order;
pub mod phase;
pub mod present;
pub mod scoring;

pub use decision::{DecisionContext, DecisionSource, DefaultPolicy, ExecutionMode};
pub use game::{DecisionPoint, Game};
pub use interrupt::InterruptSlot;
pub use order::{draft_picks, setup_build_steps, TurnOrder};
pub use phase::{IncomeSource, Stage};
pub use present::{NullSink, PresentationSink, RecordingSink, Style, TracingSink};
pub use scoring::{award_majority, final_scoring, rank, DefaultRanking, RankingComparator, Standing};
