//! Active scenario and active pack set.

use crate::catalog::CatalogStore;
use crate::error::SelectionError;
use log::debug;

/// A point-in-time copy of a [`SelectionState`].
///
/// Stored next to an evaluation result so the result can be correlated
/// with the selection that produced it after the selection moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionSnapshot {
    pub scenario_id: String,
    /// Active pack ids in activation order.
    pub pack_ids: Vec<String>,
}

/// Which scenario is active and which rule packs are switched on.
///
/// `active_scenario_id` always names a scenario of the catalog the state
/// was created from. The pack set may be empty. Pack ids are kept in
/// activation order so the engine can optionally break priority ties by
/// the order in which packs were switched on.
///
/// Every mutation checks its id against the catalog first; an unknown id
/// is rejected and the state is left untouched.
///
/// # Examples
///
/// ```
/// use u_rulestack::catalog::CatalogStore;
/// use u_rulestack::selection::SelectionState;
///
/// let catalog = CatalogStore::seed();
/// let mut selection = SelectionState::initial(&catalog);
///
/// assert_eq!(selection.active_scenario_id(), "standard");
/// assert!(selection.toggle_pack(&catalog, "experimentA").unwrap());
/// assert!(selection.select_scenario(&catalog, "nope").is_err());
///
/// selection.reset(&catalog);
/// assert!(!selection.is_pack_active("experimentA"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    active_scenario_id: String,
    active_pack_ids: Vec<String>,
}

impl SelectionState {
    /// First catalog scenario plus every `default_active` pack.
    pub fn initial(catalog: &CatalogStore) -> Self {
        Self {
            active_scenario_id: catalog.first_scenario().id.clone(),
            active_pack_ids: catalog.default_pack_ids(),
        }
    }

    pub fn active_scenario_id(&self) -> &str {
        &self.active_scenario_id
    }

    /// Active pack ids in activation order.
    pub fn active_pack_ids(&self) -> &[String] {
        &self.active_pack_ids
    }

    pub fn is_pack_active(&self, id: &str) -> bool {
        self.active_pack_ids.iter().any(|p| p == id)
    }

    /// Makes `id` the active scenario.
    pub fn select_scenario(
        &mut self,
        catalog: &CatalogStore,
        id: &str,
    ) -> Result<(), SelectionError> {
        if catalog.scenario_by_id(id).is_err() {
            debug!("rejected scenario selection: unknown id {id}");
            return Err(SelectionError::UnknownScenario(id.to_string()));
        }
        self.active_scenario_id = id.to_string();
        Ok(())
    }

    /// Flips a pack on or off. Returns whether the pack is now active.
    pub fn toggle_pack(&mut self, catalog: &CatalogStore, id: &str) -> Result<bool, SelectionError> {
        if catalog.pack_by_id(id).is_err() {
            debug!("rejected pack toggle: unknown id {id}");
            return Err(SelectionError::UnknownPack(id.to_string()));
        }
        if let Some(pos) = self.active_pack_ids.iter().position(|p| p == id) {
            self.active_pack_ids.remove(pos);
            Ok(false)
        } else {
            self.active_pack_ids.push(id.to_string());
            Ok(true)
        }
    }

    /// Restores the state produced by [`SelectionState::initial`].
    pub fn reset(&mut self, catalog: &CatalogStore) {
        *self = Self::initial(catalog);
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            scenario_id: self.active_scenario_id.clone(),
            pack_ids: self.active_pack_ids.clone(),
        }
    }
}
