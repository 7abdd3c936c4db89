//! Shallow look-ahead over the rules engine.
//!
//! Candidates are evaluated by rebuilding the game from its config and
//! log plus a short suffix, in scripted-replay mode, and rolling it out to
//! the end with the default policy on forked random streams. Nothing here
//! touches the live game.

pub mod config;
pub mod lookahead;

pub use config::{LookAheadConfig, MAX_LOOKAHEAD_DEPTH};
pub use lookahead::{CandidateScore, LookAhead, PeekOutcome};
