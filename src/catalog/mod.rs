//! Action catalog and legality engine.
//!
//! Every decision a player can make is a single integer `ActionId`. The id
//! space is partitioned into fixed contiguous ranges, one per action kind,
//! so an id decodes to its kind and parameters in O(1) and the mapping is
//! a bijection.
//!
//! - `ids`: the partition, `encode` / `decode`
//! - `split`: closed-form ranking of the 4-way split sub-catalogs
//! - `actions`: spot, conversion and building cost tables
//! - `legality`: `legal_actions` for normal and immediate decisions
//! - `execute`: executors for normal decisions

pub mod actions;
pub mod execute;
pub mod ids;
pub mod legality;
pub mod split;

pub use execute::{choice_for, execute, Outcome, TurnSignal};
pub use ids::{decode, encode, CatalogEntry, CATALOG_SIZE};
pub use legality::{legal_actions, position_allowed, LegalityMode, PhaseView, SetupBuildStep};
