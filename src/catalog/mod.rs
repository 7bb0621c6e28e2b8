//! Catalog of rule packs and scenarios.
//!
//! The catalog is the leaf layer: it is built once, validated, and never
//! mutated afterwards. Lookups return [`CatalogError`](crate::CatalogError)
//! for unknown ids so callers decide whether a miss is fatal (selection
//! mutations reject it) or ignorable (the engine skips stale pack ids).

mod seed;
mod store;
mod types;

pub use store::CatalogStore;
pub use types::{Effect, Rule, RulePack, RuleStatus, Scenario};

pub(crate) use types::join_or_none;
