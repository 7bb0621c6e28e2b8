//! Evaluation of every catalog scenario against one pack set.

use super::engine::PolicyEngine;
use super::result::EvaluationResult;
use crate::catalog::CatalogStore;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates each catalog scenario against the rules of `pack_ids`.
///
/// Results follow catalog scenario order. Rules are gathered once since
/// gathering does not depend on the scenario. When the engine config sets
/// `parallel` and the `parallel` feature is enabled, scenarios are
/// evaluated with rayon; the output is identical either way.
///
/// # Examples
///
/// ```
/// use u_rulestack::catalog::CatalogStore;
/// use u_rulestack::evaluation::{evaluate_matrix, PolicyEngine};
///
/// let catalog = CatalogStore::seed();
/// let results = evaluate_matrix(&PolicyEngine::new(), &catalog, &catalog.default_pack_ids());
/// assert_eq!(results.len(), catalog.scenarios().len());
/// ```
pub fn evaluate_matrix(
    engine: &PolicyEngine,
    catalog: &CatalogStore,
    pack_ids: &[String],
) -> Vec<EvaluationResult> {
    let considered = engine.gather_packs(catalog, pack_ids);

    #[cfg(feature = "parallel")]
    if engine.config().parallel {
        return catalog
            .scenarios()
            .par_iter()
            .map(|scenario| engine.evaluate_with_packs(scenario, pack_ids, &considered))
            .collect();
    }

    catalog
        .scenarios()
        .iter()
        .map(|scenario| engine.evaluate_with_packs(scenario, pack_ids, &considered))
        .collect()
}
