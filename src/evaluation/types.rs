//! Core trait for rule matching.

use crate::catalog::{Rule, Scenario};

/// Decides whether a rule applies to a scenario.
///
/// The engine calls the matcher once per considered rule, in priority
/// order, and records each decision in the trace.
///
/// # Examples
///
/// ```ignore
/// // Only environment membership, ignoring tags entirely.
/// struct EnvironmentOnly;
///
/// impl RuleMatcher for EnvironmentOnly {
///     fn name(&self) -> &str { "EnvironmentOnly" }
///     fn matches(&self, rule: &Rule, scenario: &Scenario) -> bool {
///         rule.environments.contains(&scenario.environment)
///     }
/// }
/// ```
pub trait RuleMatcher: Send + Sync {
    /// Returns the name of this matcher.
    fn name(&self) -> &str;

    /// Whether `rule` applies to `scenario`.
    fn matches(&self, rule: &Rule, scenario: &Scenario) -> bool;
}

/// Environment membership plus tag-subset matching.
///
/// A rule matches when the scenario environment is one of the rule's
/// environments and either:
///
/// - the rule has no tags (wildcard: any scenario tag set matches), or
/// - every rule tag is present on the scenario. Extra scenario tags are
///   irrelevant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeMatcher;

impl RuleMatcher for ScopeMatcher {
    fn name(&self) -> &str {
        "Scope"
    }

    fn matches(&self, rule: &Rule, scenario: &Scenario) -> bool {
        if !rule.environments.contains(&scenario.environment) {
            return false;
        }
        rule.tags.iter().all(|tag| scenario.tags.contains(tag))
    }
}
