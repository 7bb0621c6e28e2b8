//! Read-only catalog of rule packs and scenarios.

use super::seed;
use super::types::{Rule, RulePack, Scenario};
use crate::error::CatalogError;
use std::collections::HashSet;

/// Immutable set of rule packs and scenarios.
///
/// Construction validates the catalog invariants; afterwards the store
/// only hands out shared references.
///
/// # Examples
///
/// ```
/// use u_rulestack::catalog::CatalogStore;
///
/// let catalog = CatalogStore::seed();
/// assert_eq!(catalog.packs().len(), 4);
/// assert_eq!(catalog.first_scenario().id, "standard");
/// assert!(catalog.pack_by_id("baseline").is_ok());
/// assert!(catalog.scenario_by_id("missing").is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CatalogStore {
    packs: Vec<RulePack>,
    scenarios: Vec<Scenario>,
}

impl CatalogStore {
    /// Builds a catalog, checking that:
    ///
    /// - pack, rule and scenario ids are unique,
    /// - every rule's `pack_id` names the pack that lists it,
    /// - at least one scenario exists (the selection needs a default).
    pub fn new(packs: Vec<RulePack>, scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        let mut pack_ids = HashSet::new();
        let mut rule_ids = HashSet::new();
        for pack in &packs {
            if !pack_ids.insert(pack.id.as_str()) {
                return Err(CatalogError::DuplicatePack(pack.id.clone()));
            }
            for rule in &pack.rules {
                if !rule_ids.insert(rule.id.as_str()) {
                    return Err(CatalogError::DuplicateRule(rule.id.clone()));
                }
                if rule.pack_id != pack.id {
                    return Err(CatalogError::ForeignRule {
                        rule: rule.id.clone(),
                        declared: rule.pack_id.clone(),
                        owner: pack.id.clone(),
                    });
                }
            }
        }

        if scenarios.is_empty() {
            return Err(CatalogError::NoScenarios);
        }
        let mut scenario_ids = HashSet::new();
        for scenario in &scenarios {
            if !scenario_ids.insert(scenario.id.as_str()) {
                return Err(CatalogError::DuplicateScenario(scenario.id.clone()));
            }
        }

        Ok(Self { packs, scenarios })
    }

    /// The bundled seed catalog: 4 rule packs, 7 rules, 4 scenarios.
    pub fn seed() -> Self {
        Self {
            packs: seed::rule_packs(),
            scenarios: seed::scenarios(),
        }
    }

    /// All packs in catalog order.
    pub fn packs(&self) -> &[RulePack] {
        &self.packs
    }

    /// All scenarios in catalog order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// The scenario a fresh selection starts on.
    pub fn first_scenario(&self) -> &Scenario {
        // Non-empty by construction.
        &self.scenarios[0]
    }

    /// Ids of packs flagged `default_active`, in catalog order.
    pub fn default_pack_ids(&self) -> Vec<String> {
        self.packs
            .iter()
            .filter(|p| p.default_active)
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn scenario_by_id(&self, id: &str) -> Result<&Scenario, CatalogError> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CatalogError::ScenarioNotFound(id.to_string()))
    }

    pub fn pack_by_id(&self, id: &str) -> Result<&RulePack, CatalogError> {
        self.packs
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::PackNotFound(id.to_string()))
    }

    /// Position of a pack in catalog order.
    pub fn pack_position(&self, id: &str) -> Option<usize> {
        self.packs.iter().position(|p| p.id == id)
    }

    /// Finds a rule anywhere in the catalog.
    pub fn rule_by_id(&self, id: &str) -> Option<&Rule> {
        self.packs
            .iter()
            .flat_map(|p| p.rules.iter())
            .find(|r| r.id == id)
    }

    /// Total number of rules across all packs.
    pub fn rule_count(&self) -> usize {
        self.packs.iter().map(|p| p.rules.len()).sum()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Effect;

    fn pack(id: &str, rules: Vec<Rule>) -> RulePack {
        rules
            .into_iter()
            .fold(RulePack::new(id, id), |p, r| p.with_rule(r))
    }

    #[test]
    fn test_seed_passes_validation() {
        let seed = CatalogStore::seed();
        let rebuilt = CatalogStore::new(seed.packs().to_vec(), seed.scenarios().to_vec());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_seed_counts() {
        let catalog = CatalogStore::seed();
        assert_eq!(catalog.packs().len(), 4);
        assert_eq!(catalog.rule_count(), 7);
        assert_eq!(catalog.scenarios().len(), 4);
        assert_eq!(
            catalog.default_pack_ids(),
            vec!["baseline".to_string(), "sandboxOverride".to_string()]
        );
    }

    #[test]
    fn test_lookup_not_found() {
        let catalog = CatalogStore::seed();
        assert_eq!(
            catalog.pack_by_id("nope").unwrap_err(),
            CatalogError::PackNotFound("nope".into())
        );
        assert_eq!(
            catalog.scenario_by_id("nope").unwrap_err(),
            CatalogError::ScenarioNotFound("nope".into())
        );
    }

    #[test]
    fn test_rule_by_id() {
        let catalog = CatalogStore::seed();
        let rule = catalog.rule_by_id("expA-allow-beta").unwrap();
        assert_eq!(rule.pack_id, "experimentA");
        assert_eq!(rule.priority, 35);
        assert!(catalog.rule_by_id("missing").is_none());
    }

    #[test]
    fn test_rejects_duplicate_pack() {
        let err = CatalogStore::new(
            vec![pack("a", vec![]), pack("a", vec![])],
            vec![Scenario::new("s", "S", "prod")],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicatePack("a".into()));
    }

    #[test]
    fn test_rejects_duplicate_rule_across_packs() {
        let err = CatalogStore::new(
            vec![
                pack("a", vec![Rule::new("r", "R", "a", Effect::Allow, 1)]),
                pack("b", vec![Rule::new("r", "R", "b", Effect::Deny, 2)]),
            ],
            vec![Scenario::new("s", "S", "prod")],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateRule("r".into()));
    }

    #[test]
    fn test_rejects_foreign_rule() {
        let err = CatalogStore::new(
            vec![pack("a", vec![Rule::new("r", "R", "b", Effect::Allow, 1)])],
            vec![Scenario::new("s", "S", "prod")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::ForeignRule { .. }));
    }

    #[test]
    fn test_rejects_empty_or_duplicate_scenarios() {
        assert_eq!(
            CatalogStore::new(vec![], vec![]).unwrap_err(),
            CatalogError::NoScenarios
        );
        let err = CatalogStore::new(
            vec![],
            vec![Scenario::new("s", "S", "prod"), Scenario::new("s", "T", "dev")],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateScenario("s".into()));
    }

    #[test]
    fn test_pack_position() {
        let catalog = CatalogStore::seed();
        assert_eq!(catalog.pack_position("baseline"), Some(0));
        assert_eq!(catalog.pack_position("legacyMode"), Some(3));
        assert_eq!(catalog.pack_position("ghost"), None);
    }
}
