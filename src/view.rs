//! Framework-neutral render model.
//!
//! Turns catalog, selection and evaluation output into plain data that a
//! front-end maps one-to-one onto widgets. A single [`Layout`] flag picks
//! between a flat result table and effect-grouped lanes.

use crate::catalog::{join_or_none, CatalogStore, Effect, Scenario};
use crate::evaluation::{AnnotatedRule, EvaluationResult};
use crate::explain::Decision;
use crate::selection::SelectionState;

pub const EMPTY_STACK_MESSAGE: &str =
    "No active rule packs. Toggle a pack above to populate the stack.";
pub const PENDING_RESULT_MESSAGE: &str = "Run evaluation to see which rules matched this scenario.";
pub const NO_MATCH_RESULT_MESSAGE: &str =
    "No rules matched this scenario. In a real system, this would fall back to a default policy.";
pub const IDLE_DECISION_LABEL: &str = "Waiting for evaluation";
pub const IDLE_DECISION_DETAIL: &str = "Select a scenario and rule packs, then run evaluation.";

/// How matched rules are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// One flat table in priority order.
    #[default]
    Table,
    /// One section per effect, each in priority order.
    Lanes,
}

/// A selectable scenario or pack.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chip {
    pub id: String,
    pub label: String,
    pub sub_label: String,
    pub active: bool,
}

pub fn scenario_chips(catalog: &CatalogStore, selection: &SelectionState) -> Vec<Chip> {
    catalog
        .scenarios()
        .iter()
        .map(|s| Chip {
            id: s.id.clone(),
            label: s.name.clone(),
            sub_label: s.description.clone(),
            active: s.id == selection.active_scenario_id(),
        })
        .collect()
}

pub fn pack_chips(catalog: &CatalogStore, selection: &SelectionState) -> Vec<Chip> {
    catalog
        .packs()
        .iter()
        .map(|p| Chip {
            id: p.id.clone(),
            label: p.short_name.clone(),
            sub_label: p.description.clone(),
            active: selection.is_pack_active(&p.id),
        })
        .collect()
}

/// Summary badges for the active scenario.
pub fn scenario_badges(scenario: &Scenario, active_pack_count: usize) -> Vec<String> {
    vec![
        format!("Scenario: {}", scenario.name),
        format!("Env: {}", scenario.environment),
        format!("Tags: {}", scenario.tags_label()),
        format!("Active packs: {active_pack_count}"),
    ]
}

/// One considered rule in the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleCard {
    pub rule_id: String,
    pub name: String,
    pub pack_badge: String,
    pub meta: Vec<String>,
}

/// The considered-rule stack shown before evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackView {
    pub summary: String,
    pub cards: Vec<RuleCard>,
    /// Set when there is nothing to show.
    pub empty_message: Option<String>,
}

pub fn stack_view(
    scenario: &Scenario,
    active_pack_count: usize,
    considered: &[AnnotatedRule],
) -> StackView {
    let summary = format!(
        "Scenario: {} \u{b7} Environment: {} \u{b7} Tags: {} \u{b7} Active rule packs: {active_pack_count}",
        scenario.name,
        scenario.environment,
        scenario.tags_label()
    );
    let cards = considered
        .iter()
        .map(|r| RuleCard {
            rule_id: r.id.clone(),
            name: r.name.clone(),
            pack_badge: r.pack_short_name.clone(),
            meta: vec![
                format!("Scope: {}", r.scope),
                format!("Env: {}", r.environments.join(", ")),
                format!("Tags: {}", join_or_none(&r.tags)),
                format!("Priority: {}", r.priority),
            ],
        })
        .collect::<Vec<_>>();
    let empty_message = cards.is_empty().then(|| EMPTY_STACK_MESSAGE.to_string());

    StackView {
        summary,
        cards,
        empty_message,
    }
}

/// One matched rule in the result table or a lane.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultRow {
    pub rule_id: String,
    pub name: String,
    pub scope_label: String,
    pub pack_label: String,
    pub effect: Effect,
    pub effect_label: String,
    pub priority_label: String,
    pub is_winner: bool,
}

/// A titled group of rows. Table layout has a single untitled section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultSection {
    pub effect: Option<Effect>,
    pub title: Option<String>,
    pub rows: Vec<ResultRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultView {
    pub layout: Layout,
    pub sections: Vec<ResultSection>,
    pub empty_message: Option<String>,
}

impl ResultView {
    /// Placeholder shown until the first evaluation.
    pub fn pending(layout: Layout) -> Self {
        Self {
            layout,
            sections: Vec::new(),
            empty_message: Some(PENDING_RESULT_MESSAGE.to_string()),
        }
    }

    pub fn build(result: &EvaluationResult, layout: Layout) -> Self {
        if result.matched_rules.is_empty() {
            return Self {
                layout,
                sections: Vec::new(),
                empty_message: Some(NO_MATCH_RESULT_MESSAGE.to_string()),
            };
        }

        let row = |r: &AnnotatedRule| ResultRow {
            rule_id: r.id.clone(),
            name: r.name.clone(),
            scope_label: format!("Scope: {}", r.scope),
            pack_label: r.pack_label().to_string(),
            effect: r.effect,
            effect_label: r.effect.label().to_string(),
            priority_label: format!("P{}", r.priority),
            is_winner: result.is_winner(&r.id),
        };

        let sections = match layout {
            Layout::Table => vec![ResultSection {
                effect: None,
                title: None,
                rows: result.matched_rules.iter().map(&row).collect(),
            }],
            Layout::Lanes => result
                .lanes
                .iter()
                .map(|(effect, lane)| ResultSection {
                    effect: Some(effect),
                    title: Some(effect.label().to_string()),
                    rows: lane.iter().map(&row).collect(),
                })
                .collect(),
        };

        Self {
            layout,
            sections,
            empty_message: None,
        }
    }

    /// All rows across sections.
    pub fn rows(&self) -> impl Iterator<Item = &ResultRow> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }
}

/// The decision pill, explanation text and trace log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionPanel {
    /// `None` until an evaluation has run.
    pub decision: Option<Decision>,
    pub label: String,
    pub detail: String,
    pub explanation: String,
    pub trace: Vec<String>,
}

impl DecisionPanel {
    pub fn idle() -> Self {
        Self {
            decision: None,
            label: IDLE_DECISION_LABEL.to_string(),
            detail: IDLE_DECISION_DETAIL.to_string(),
            explanation: String::new(),
            trace: Vec::new(),
        }
    }

    pub fn from_result(result: &EvaluationResult) -> Self {
        let explanation = result.explain();
        Self {
            decision: Some(explanation.decision),
            label: explanation.decision.label().to_string(),
            detail: explanation.detail,
            explanation: explanation.headline,
            trace: result.trace.clone(),
        }
    }
}
