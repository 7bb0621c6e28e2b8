//! An explainer session: catalog, selection, engine and the last result.

use crate::catalog::{CatalogStore, Scenario};
use crate::error::SelectionError;
use crate::evaluation::{EvaluationResult, PolicyEngine};
use crate::selection::{SelectionSnapshot, SelectionState};
use crate::view::{self, Chip, DecisionPanel, Layout, ResultView, StackView};
use log::debug;

/// An evaluation result together with the selection that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    pub snapshot: SelectionSnapshot,
    pub result: EvaluationResult,
}

/// Drives one interactive explainer.
///
/// Selection mutations go through the session so that a stale result is
/// never shown next to a changed selection: every successful mutation
/// clears the last evaluation. Evaluation only happens on an explicit
/// [`Explainer::evaluate`] call.
///
/// # Examples
///
/// ```
/// use u_rulestack::explain::Decision;
/// use u_rulestack::Explainer;
///
/// let mut explainer = Explainer::new();
/// explainer.select_scenario("sandboxEmergency").unwrap();
///
/// let evaluation = explainer.evaluate();
/// assert_eq!(evaluation.result.explain().decision, Decision::Blocked);
///
/// explainer.toggle_pack("experimentA").unwrap();
/// assert!(explainer.last_evaluation().is_none());
/// ```
pub struct Explainer {
    catalog: CatalogStore,
    selection: SelectionState,
    engine: PolicyEngine,
    last: Option<Evaluation>,
}

impl Explainer {
    /// A session over the seed catalog with the default engine.
    pub fn new() -> Self {
        Self::with_catalog(CatalogStore::seed())
    }

    pub fn with_catalog(catalog: CatalogStore) -> Self {
        let selection = SelectionState::initial(&catalog);
        Self {
            catalog,
            selection,
            engine: PolicyEngine::new(),
            last: None,
        }
    }

    pub fn with_engine(mut self, engine: PolicyEngine) -> Self {
        self.engine = engine;
        self.last = None;
        self
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    pub fn active_scenario(&self) -> &Scenario {
        self.catalog
            .scenario_by_id(self.selection.active_scenario_id())
            .unwrap_or_else(|_| self.catalog.first_scenario())
    }

    pub fn select_scenario(&mut self, id: &str) -> Result<(), SelectionError> {
        self.selection.select_scenario(&self.catalog, id)?;
        self.last = None;
        Ok(())
    }

    /// Returns whether the pack is now active.
    pub fn toggle_pack(&mut self, id: &str) -> Result<bool, SelectionError> {
        let active = self.selection.toggle_pack(&self.catalog, id)?;
        self.last = None;
        Ok(active)
    }

    pub fn reset(&mut self) {
        self.selection.reset(&self.catalog);
        self.last = None;
    }

    /// Evaluates the current selection and remembers the outcome.
    pub fn evaluate(&mut self) -> &Evaluation {
        let snapshot = self.selection.snapshot();
        let scenario = self.active_scenario();
        let considered = self.engine.gather(&self.catalog, &self.selection);
        let result = self
            .engine
            .evaluate_with_packs(scenario, &snapshot.pack_ids, &considered);
        debug!(
            "session evaluation for {}: {}",
            snapshot.scenario_id,
            result.explain().decision
        );
        self.last.insert(Evaluation { snapshot, result })
    }

    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last.as_ref()
    }

    pub fn scenario_chips(&self) -> Vec<Chip> {
        view::scenario_chips(&self.catalog, &self.selection)
    }

    pub fn pack_chips(&self) -> Vec<Chip> {
        view::pack_chips(&self.catalog, &self.selection)
    }

    pub fn scenario_badges(&self) -> Vec<String> {
        view::scenario_badges(
            self.active_scenario(),
            self.selection.active_pack_ids().len(),
        )
    }

    pub fn stack_view(&self) -> StackView {
        let considered = self.engine.gather(&self.catalog, &self.selection);
        view::stack_view(
            self.active_scenario(),
            self.selection.active_pack_ids().len(),
            &considered,
        )
    }

    pub fn result_view(&self, layout: Layout) -> ResultView {
        match &self.last {
            Some(evaluation) => ResultView::build(&evaluation.result, layout),
            None => ResultView::pending(layout),
        }
    }

    pub fn decision_panel(&self) -> DecisionPanel {
        match &self.last {
            Some(evaluation) => DecisionPanel::from_result(&evaluation.result),
            None => DecisionPanel::idle(),
        }
    }
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new()
    }
}
