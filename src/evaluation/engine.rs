//! Policy evaluation engine.

use super::config::{EvaluationConfig, PackOrder, StatusFilter};
use super::result::{AnnotatedRule, EvaluationResult, Lanes};
use super::trace::TraceLog;
use super::types::{RuleMatcher, ScopeMatcher};
use crate::catalog::{CatalogStore, RuleStatus, Scenario};
use crate::error::CatalogError;
use crate::selection::SelectionState;
use log::{debug, trace, warn};
use std::collections::HashSet;

/// Gathers, matches and resolves rules for a scenario.
///
/// The engine holds no state between runs: every evaluation is a pure
/// function of its inputs, so one engine can be shared freely.
///
/// # Examples
///
/// ```
/// use u_rulestack::catalog::{CatalogStore, Effect};
/// use u_rulestack::evaluation::PolicyEngine;
/// use u_rulestack::selection::SelectionState;
///
/// let catalog = CatalogStore::seed();
/// let selection = SelectionState::initial(&catalog);
/// let engine = PolicyEngine::new();
///
/// let result = engine.evaluate_selection(&catalog, &selection).unwrap();
/// assert_eq!(result.winner.as_ref().unwrap().id, "baseline-allow-standard");
/// assert_eq!(result.effect(), Some(Effect::Allow));
/// ```
pub struct PolicyEngine {
    matcher: Box<dyn RuleMatcher>,
    config: EvaluationConfig,
}

impl PolicyEngine {
    /// Creates an engine with the default config and [`ScopeMatcher`].
    pub fn new() -> Self {
        Self {
            matcher: Box::new(ScopeMatcher),
            config: EvaluationConfig::default(),
        }
    }

    /// Sets the config. An invalid config is logged and repaired: a
    /// parallel request without the `parallel` feature runs sequentially.
    pub fn with_config(mut self, mut config: EvaluationConfig) -> Self {
        if let Err(err) = config.validate() {
            warn!("{err}; evaluating sequentially");
            config.parallel = false;
        }
        self.config = config;
        self
    }

    /// Replaces the matching predicate.
    pub fn with_matcher<M: RuleMatcher + 'static>(mut self, matcher: M) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    /// Considered rules for the selection's active packs.
    pub fn gather(&self, catalog: &CatalogStore, selection: &SelectionState) -> Vec<AnnotatedRule> {
        self.gather_packs(catalog, selection.active_pack_ids())
    }

    /// Flattens the given packs into a priority-sorted, annotated list.
    ///
    /// Unknown pack ids are skipped; repeated ids count once. Ties on
    /// priority are ordered by pack position (see [`PackOrder`]), then
    /// by declaration order inside the pack.
    pub fn gather_packs(&self, catalog: &CatalogStore, pack_ids: &[String]) -> Vec<AnnotatedRule> {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for (activation_index, pack_id) in pack_ids.iter().enumerate() {
            if !seen.insert(pack_id.as_str()) {
                continue;
            }
            let pack = match catalog.pack_by_id(pack_id) {
                Ok(pack) => pack,
                Err(err) => {
                    debug!("skipping active pack: {err}");
                    continue;
                }
            };
            let pack_position = match self.config.pack_order {
                PackOrder::Catalog => catalog.pack_position(pack_id).unwrap_or(activation_index),
                PackOrder::Activation => activation_index,
            };

            for (declaration_index, rule) in pack.rules.iter().enumerate() {
                if self.config.statuses == StatusFilter::ActiveOnly
                    && rule.status == RuleStatus::Draft
                {
                    continue;
                }
                rules.push(AnnotatedRule::new(
                    rule.clone(),
                    pack,
                    pack_position,
                    declaration_index,
                ));
            }
        }

        rules.sort_by_key(AnnotatedRule::sort_key);
        rules
    }

    /// Evaluates `considered` against `scenario`.
    ///
    /// The trace's pack line lists the packs the considered rules come
    /// from, in order of first appearance.
    pub fn evaluate(&self, scenario: &Scenario, considered: &[AnnotatedRule]) -> EvaluationResult {
        let mut pack_ids: Vec<String> = Vec::new();
        for rule in considered {
            if !pack_ids.contains(&rule.pack_id) {
                pack_ids.push(rule.pack_id.clone());
            }
        }
        self.evaluate_with_packs(scenario, &pack_ids, considered)
    }

    /// Evaluates `considered` against `scenario`, naming `pack_ids` as the
    /// active packs in the trace header.
    ///
    /// `considered` is re-sorted by priority (stable, with the same
    /// secondary key used when gathering) so the result is well-ordered
    /// whatever the caller passes in.
    pub fn evaluate_with_packs(
        &self,
        scenario: &Scenario,
        pack_ids: &[String],
        considered: &[AnnotatedRule],
    ) -> EvaluationResult {
        let mut considered_rules = considered.to_vec();
        considered_rules.sort_by_key(AnnotatedRule::sort_key);

        let mut log = TraceLog::header(scenario, pack_ids);
        let mut matched_rules = Vec::new();
        for rule in &considered_rules {
            let matched = self.matcher.matches(rule, scenario);
            trace!(
                "{} vs {}: {}",
                rule.id,
                scenario.id,
                if matched { "match" } else { "no match" }
            );
            log.decision(rule, matched);
            if matched {
                matched_rules.push(rule.clone());
            }
        }

        let lanes = Lanes::partition(&matched_rules);
        let winner = matched_rules.first().cloned();
        log.summary(matched_rules.len(), winner.as_ref());

        debug!(
            "evaluated scenario {}: {} considered, {} matched, winner {}",
            scenario.id,
            considered_rules.len(),
            matched_rules.len(),
            winner.as_ref().map_or("none", |w| w.id.as_str())
        );

        EvaluationResult {
            scenario_id: scenario.id.clone(),
            considered_rules,
            matched_rules,
            lanes,
            winner,
            trace: log.into_lines(),
        }
    }

    /// Gathers the selection's rules and evaluates its active scenario.
    ///
    /// Fails only when the active scenario does not resolve, which
    /// cannot happen for a selection built from the same catalog.
    pub fn evaluate_selection(
        &self,
        catalog: &CatalogStore,
        selection: &SelectionState,
    ) -> Result<EvaluationResult, CatalogError> {
        let scenario = catalog.scenario_by_id(selection.active_scenario_id())?;
        let considered = self.gather(catalog, selection);
        Ok(self.evaluate_with_packs(scenario, selection.active_pack_ids(), &considered))
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Effect, Rule, RulePack};
    use crate::evaluation::NO_MATCH_LINE;

    fn ids(rules: &[AnnotatedRule]) -> Vec<&str> {
        rules.iter().map(|r| r.id.as_str()).collect()
    }

    fn packs(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn run(scenario: &str, active: &[&str]) -> EvaluationResult {
        let catalog = CatalogStore::seed();
        let engine = PolicyEngine::new();
        let scenario = catalog.scenario_by_id(scenario).unwrap();
        let considered = engine.gather_packs(&catalog, &packs(active));
        engine.evaluate_with_packs(scenario, &packs(active), &considered)
    }

    // ---- Seed scenarios ----

    #[test]
    fn test_standard_with_baseline_and_sandbox() {
        let result = run("standard", &["baseline", "sandboxOverride"]);
        assert_eq!(ids(&result.matched_rules), vec!["baseline-allow-standard"]);
        let winner = result.winner.as_ref().unwrap();
        assert_eq!(winner.id, "baseline-allow-standard");
        assert_eq!(winner.effect, Effect::Allow);
        assert_eq!(winner.pack_name, "Baseline Policy");
    }

    #[test]
    fn test_overlapping_flags_with_experiment() {
        let result = run("overlappingFlags", &["baseline", "experimentA"]);
        assert_eq!(
            ids(&result.matched_rules),
            vec!["expA-allow-beta", "baseline-transform-beta", "baseline-allow-standard"]
        );
        assert_eq!(result.winner.as_ref().unwrap().id, "expA-allow-beta");
        assert_eq!(result.effect(), Some(Effect::Allow));
        assert_eq!(ids(&result.lanes.transform), vec!["baseline-transform-beta"]);
        assert_eq!(
            ids(&result.lanes.allow),
            vec!["expA-allow-beta", "baseline-allow-standard"]
        );
    }

    #[test]
    fn test_sandbox_emergency() {
        let result = run("sandboxEmergency", &["sandboxOverride"]);
        assert_eq!(
            ids(&result.matched_rules),
            vec!["sandbox-deny-emergency", "sandbox-allow-default"]
        );
        assert_eq!(result.winner.as_ref().unwrap().id, "sandbox-deny-emergency");
        assert_eq!(result.effect(), Some(Effect::Deny));
    }

    #[test]
    fn test_legacy_path_no_packs() {
        let result = run("legacyPath", &[]);
        assert!(result.considered_rules.is_empty());
        assert!(result.matched_rules.is_empty());
        assert!(result.winner.is_none());
        assert!(!result.is_decided());
        assert!(result.lanes.is_empty());
        assert!(result.trace.iter().any(|l| l == NO_MATCH_LINE));
        assert_eq!(result.trace[1], "Active rule packs: none");
    }

    // ---- Gathering ----

    #[test]
    fn test_gather_sorted_by_priority() {
        let catalog = CatalogStore::seed();
        let engine = PolicyEngine::new();
        let all = packs(&["legacyMode", "sandboxOverride", "experimentA", "baseline"]);
        let rules = engine.gather_packs(&catalog, &all);

        assert_eq!(rules.len(), 7);
        let priorities: Vec<i32> = rules.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![10, 35, 40, 45, 55, 70, 80]);
    }

    #[test]
    fn test_gather_skips_unknown_and_duplicate_packs() {
        let catalog = CatalogStore::seed();
        let engine = PolicyEngine::new();
        let rules = engine.gather_packs(
            &catalog,
            &packs(&["removedPack", "experimentA", "experimentA"]),
        );
        assert_eq!(ids(&rules), vec!["expA-allow-beta"]);
    }

    #[test]
    fn test_gather_annotates_pack() {
        let catalog = CatalogStore::seed();
        let engine = PolicyEngine::new();
        let rules = engine.gather_packs(&catalog, &packs(&["sandboxOverride"]));
        assert!(rules.iter().all(|r| r.pack_short_name == "Sandbox"));
        assert!(rules.iter().all(|r| r.pack_name == "Sandbox Override"));
    }

    // ---- Tie breaking ----

    fn tie_catalog() -> CatalogStore {
        let first = RulePack::new("first", "First")
            .with_rule(Rule::new("first-a", "A", "first", Effect::Deny, 5).with_environments(["prod"]))
            .with_rule(Rule::new("first-b", "B", "first", Effect::Allow, 5).with_environments(["prod"]));
        let second = RulePack::new("second", "Second").with_rule(
            Rule::new("second-a", "C", "second", Effect::Transform, 5).with_environments(["prod"]),
        );
        CatalogStore::new(vec![first, second], vec![Scenario::new("s", "S", "prod")]).unwrap()
    }

    #[test]
    fn test_ties_follow_catalog_then_declaration_order() {
        let catalog = tie_catalog();
        let engine = PolicyEngine::new()
            .with_config(EvaluationConfig::default().with_pack_order(PackOrder::Catalog));
        let scenario = catalog.first_scenario();
        let considered = engine.gather_packs(&catalog, &packs(&["second", "first"]));
        let result = engine.evaluate(scenario, &considered);

        assert_eq!(ids(&result.matched_rules), vec!["first-a", "first-b", "second-a"]);
        assert_eq!(result.winner.unwrap().id, "first-a");
    }

    #[test]
    fn test_ties_follow_activation_order() {
        let catalog = tie_catalog();
        let engine = PolicyEngine::new();
        let scenario = catalog.first_scenario();
        let considered = engine.gather_packs(&catalog, &packs(&["second", "first"]));
        let result = engine.evaluate(scenario, &considered);

        assert_eq!(ids(&result.matched_rules), vec!["second-a", "first-a", "first-b"]);
        assert_eq!(result.winner.unwrap().id, "second-a");
    }

    #[test]
    fn test_reactivated_pack_moves_behind_ties() {
        let first = RulePack::new("first", "First")
            .with_default_active(true)
            .with_rule(Rule::new("first-a", "A", "first", Effect::Deny, 5).with_environments(["prod"]));
        let second = RulePack::new("second", "Second")
            .with_default_active(true)
            .with_rule(Rule::new("second-a", "B", "second", Effect::Allow, 5).with_environments(["prod"]));
        let catalog =
            CatalogStore::new(vec![first, second], vec![Scenario::new("s", "S", "prod")]).unwrap();
        let mut selection = SelectionState::initial(&catalog);
        selection.toggle_pack(&catalog, "first").unwrap();
        selection.toggle_pack(&catalog, "first").unwrap();

        let result = PolicyEngine::new()
            .evaluate_selection(&catalog, &selection)
            .unwrap();
        assert_eq!(result.trace[1], "Active rule packs: second, first");
        assert_eq!(ids(&result.matched_rules), vec!["second-a", "first-a"]);
        assert_eq!(result.winner.unwrap().id, "second-a");
    }

    #[test]
    fn test_with_config_drops_unsupported_parallel() {
        let engine =
            PolicyEngine::new().with_config(EvaluationConfig::default().with_parallel(true));
        assert_eq!(engine.config().parallel, cfg!(feature = "parallel"));
        assert!(engine.config().validate().is_ok());
    }

    // ---- Status filter ----

    #[test]
    fn test_status_filter_drops_drafts() {
        let pack = RulePack::new("p", "P")
            .with_rule(
                Rule::new("draft", "Draft", "p", Effect::Deny, 1)
                    .with_environments(["prod"])
                    .with_status(RuleStatus::Draft),
            )
            .with_rule(Rule::new("live", "Live", "p", Effect::Allow, 2).with_environments(["prod"]));
        let catalog = CatalogStore::new(vec![pack], vec![Scenario::new("s", "S", "prod")]).unwrap();

        let any = PolicyEngine::new().gather_packs(&catalog, &packs(&["p"]));
        assert_eq!(ids(&any), vec!["draft", "live"]);

        let active_only = PolicyEngine::new()
            .with_config(EvaluationConfig::default().with_statuses(StatusFilter::ActiveOnly))
            .gather_packs(&catalog, &packs(&["p"]));
        assert_eq!(ids(&active_only), vec!["live"]);
    }

    // ---- Evaluate ----

    #[test]
    fn test_evaluate_resorts_input() {
        let catalog = CatalogStore::seed();
        let engine = PolicyEngine::new();
        let mut considered = engine.gather_packs(&catalog, &packs(&["sandboxOverride"]));
        considered.reverse();
        let scenario = catalog.scenario_by_id("sandboxEmergency").unwrap();
        let result = engine.evaluate(scenario, &considered);
        assert_eq!(
            ids(&result.considered_rules),
            vec!["sandbox-deny-emergency", "sandbox-allow-default"]
        );
    }

    #[test]
    fn test_evaluate_trace_lines() {
        let result = run("sandboxEmergency", &["sandboxOverride"]);
        assert_eq!(
            result.trace,
            vec![
                "Scenario: Sandbox emergency (env=sandbox, tags=[emergencyOverride])",
                "Active rule packs: sandboxOverride",
                "",
                "Rule sandbox-deny-emergency (Emergency block in sandbox) -> MATCH",
                "Rule sandbox-allow-default (Allow all non-emergency sandbox traffic) -> MATCH",
                "",
                "Total matching rules: 2",
                "Winner: sandbox-deny-emergency (Emergency block in sandbox), effect=deny, priority=10",
            ]
        );
        assert!(result.is_decided());
        let text = result.trace_text();
        assert!(text.starts_with(
            "Scenario: Sandbox emergency (env=sandbox, tags=[emergencyOverride])\n\
             Active rule packs: sandboxOverride\n\n"
        ));
        assert_eq!(text.lines().count(), result.trace.len());
    }

    #[test]
    fn test_evaluate_derives_pack_line() {
        let catalog = CatalogStore::seed();
        let engine = PolicyEngine::new();
        let considered = engine.gather_packs(&catalog, &packs(&["baseline", "experimentA"]));
        let scenario = catalog.scenario_by_id("standard").unwrap();
        let result = engine.evaluate(scenario, &considered);
        assert_eq!(result.trace[1], "Active rule packs: experimentA, baseline");
    }

    #[test]
    fn test_unknown_environment_is_not_an_error() {
        let catalog = CatalogStore::seed();
        let engine = PolicyEngine::new();
        let considered = engine.gather_packs(&catalog, &catalog.default_pack_ids());
        let result = engine.evaluate(&Scenario::new("x", "Nowhere", ""), &considered);
        assert!(result.matched_rules.is_empty());
        assert!(result.winner.is_none());
        assert_eq!(result.considered_rules.len(), 5);
    }

    #[test]
    fn test_evaluate_selection_uses_active_scenario() {
        let catalog = CatalogStore::seed();
        let mut selection = SelectionState::initial(&catalog);
        selection.select_scenario(&catalog, "sandboxEmergency").unwrap();
        let result = PolicyEngine::new()
            .evaluate_selection(&catalog, &selection)
            .unwrap();
        assert_eq!(result.scenario_id, "sandboxEmergency");
        assert_eq!(result.winner.unwrap().id, "sandbox-deny-emergency");
        assert_eq!(result.trace[1], "Active rule packs: baseline, sandboxOverride");
    }

    // ---- Custom matcher ----

    struct EnvironmentOnly;
    impl RuleMatcher for EnvironmentOnly {
        fn name(&self) -> &str {
            "EnvironmentOnly"
        }
        fn matches(&self, rule: &Rule, scenario: &Scenario) -> bool {
            rule.environments.contains(&scenario.environment)
        }
    }

    #[test]
    fn test_custom_matcher() {
        let catalog = CatalogStore::seed();
        let engine = PolicyEngine::new().with_matcher(EnvironmentOnly);
        assert_eq!(engine.matcher_name(), "EnvironmentOnly");

        let considered = engine.gather_packs(&catalog, &packs(&["baseline"]));
        let result = engine.evaluate(catalog.scenario_by_id("standard").unwrap(), &considered);
        // Tags ignored: the P40 anonymous-deny rule now wins.
        assert_eq!(result.winner.unwrap().id, "baseline-deny-anonymous");
    }
}
