//! Evaluation output types.

use crate::catalog::{Effect, Rule, RulePack};
use std::ops::Deref;

/// A considered rule annotated with its owning pack.
///
/// `pack_position` and `declaration_index` form the secondary sort key
/// used to break priority ties deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotatedRule {
    pub rule: Rule,
    pub pack_name: String,
    pub pack_short_name: String,
    /// Position of the owning pack in the gather order.
    pub pack_position: usize,
    /// Position of the rule inside its pack.
    pub declaration_index: usize,
}

impl AnnotatedRule {
    pub fn new(rule: Rule, pack: &RulePack, pack_position: usize, declaration_index: usize) -> Self {
        Self {
            rule,
            pack_name: pack.name.clone(),
            pack_short_name: pack.short_name.clone(),
            pack_position,
            declaration_index,
        }
    }

    /// Total order used by the engine: priority, then pack, then declaration.
    pub fn sort_key(&self) -> (i32, usize, usize) {
        (self.rule.priority, self.pack_position, self.declaration_index)
    }

    /// Short pack label, falling back to the full pack name.
    pub fn pack_label(&self) -> &str {
        if self.pack_short_name.is_empty() {
            &self.pack_name
        } else {
            &self.pack_short_name
        }
    }
}

impl Deref for AnnotatedRule {
    type Target = Rule;

    fn deref(&self) -> &Rule {
        &self.rule
    }
}

/// Matched rules grouped by effect, each lane in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lanes {
    pub allow: Vec<AnnotatedRule>,
    pub deny: Vec<AnnotatedRule>,
    pub transform: Vec<AnnotatedRule>,
}

impl Lanes {
    /// Partitions already-sorted matches by effect.
    pub fn partition(matched: &[AnnotatedRule]) -> Self {
        let mut lanes = Self::default();
        for rule in matched {
            lanes.lane_mut(rule.effect).push(rule.clone());
        }
        lanes
    }

    pub fn lane(&self, effect: Effect) -> &[AnnotatedRule] {
        match effect {
            Effect::Allow => &self.allow,
            Effect::Deny => &self.deny,
            Effect::Transform => &self.transform,
        }
    }

    fn lane_mut(&mut self, effect: Effect) -> &mut Vec<AnnotatedRule> {
        match effect {
            Effect::Allow => &mut self.allow,
            Effect::Deny => &mut self.deny,
            Effect::Transform => &mut self.transform,
        }
    }

    /// `(effect, lane)` pairs in allow, deny, transform order.
    pub fn iter(&self) -> impl Iterator<Item = (Effect, &[AnnotatedRule])> {
        Effect::ALL.into_iter().map(move |e| (e, self.lane(e)))
    }

    pub fn len(&self) -> usize {
        self.allow.len() + self.deny.len() + self.transform.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of one evaluation run. Recomputed on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationResult {
    /// Scenario the rules were matched against.
    pub scenario_id: String,
    /// Every gathered rule, ascending by priority.
    pub considered_rules: Vec<AnnotatedRule>,
    /// Matching subset of `considered_rules`, same relative order.
    pub matched_rules: Vec<AnnotatedRule>,
    pub lanes: Lanes,
    /// First matched rule, or `None` when nothing matched.
    pub winner: Option<AnnotatedRule>,
    /// Human-readable log of every decision made during the run.
    pub trace: Vec<String>,
}

impl EvaluationResult {
    /// The winning effect, if any rule matched.
    pub fn effect(&self) -> Option<Effect> {
        self.winner.as_ref().map(|w| w.effect)
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Matched rules that lost to the winner.
    pub fn shadowed(&self) -> Vec<&AnnotatedRule> {
        match &self.winner {
            Some(winner) => self
                .matched_rules
                .iter()
                .filter(|r| r.id != winner.id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether `rule_id` is the winner of this run.
    pub fn is_winner(&self, rule_id: &str) -> bool {
        self.winner.as_ref().is_some_and(|w| w.id == rule_id)
    }

    /// Trace lines joined with newlines.
    pub fn trace_text(&self) -> String {
        self.trace.join("\n")
    }
}
