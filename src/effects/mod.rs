//! Effect resolution engine.
//!
//! - `Effect` / `Predicate`: the closed vocabulary tiles and actions use
//! - `check`: side-effect free predicate conjunction
//! - `EffectResolver`: applies effects, suspending on player decisions
//! - `Interrupt` / `Choice`: a suspended resolution and its answer
//! - `climb`, `build`, `ownership`: the rule helpers effects delegate to
//!
//! ## Suspension
//!
//! Resolving never blocks on input. An effect that needs a decision ends
//! the walk with `Resolution::Suspended`, carrying the remaining effects.
//! The caller services the interrupt and calls `EffectResolver::resume`.

pub mod build;
pub mod climb;
mod effect;
mod interrupt;
pub mod ownership;
mod predicate;
mod resolver;

pub use effect::{Effect, PositionFilter, PositionPurpose, PositionRequest};
pub use interrupt::{BookDirection, Choice, DecisionRequest, Interrupt, Resolution};
pub use predicate::{check, Predicate};
pub use resolver::{EffectResolver, MAX_SPLIT_TOTAL};
