//! Error types for catalog lookups and selection mutations.

use thiserror::Error;

/// A catalog lookup or catalog construction failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("rule pack not found: {0}")]
    PackNotFound(String),

    #[error("duplicate rule pack id: {0}")]
    DuplicatePack(String),

    #[error("duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("duplicate scenario id: {0}")]
    DuplicateScenario(String),

    /// A rule listed inside a pack whose `pack_id` names a different pack.
    #[error("rule {rule} declares pack {declared} but is listed in pack {owner}")]
    ForeignRule {
        rule: String,
        declared: String,
        owner: String,
    },

    #[error("catalog must contain at least one scenario")]
    NoScenarios,
}

/// A rejected selection mutation. The selection is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("unknown rule pack: {0}")]
    UnknownPack(String),
}
