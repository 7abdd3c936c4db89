//! Rules engine trait and game results.
//!
//! Callers that only need "what can I do, do it, is it over" go through
//! `RulesEngine` instead of the concrete `Game` driver.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
