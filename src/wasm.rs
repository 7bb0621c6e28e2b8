//! Browser bindings for the explainer session.
//!
//! Getters return plain JS objects built with `serde-wasm-bindgen`, so the
//! front-end renders the same render model the Rust API exposes.

use crate::session::Explainer;
use crate::view::Layout;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// JS handle around an [`Explainer`] over the seed catalog.
#[wasm_bindgen]
pub struct WasmExplainer {
    inner: Explainer,
}

#[wasm_bindgen]
impl WasmExplainer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmExplainer {
        WasmExplainer {
            inner: Explainer::new(),
        }
    }

    #[wasm_bindgen(js_name = selectScenario)]
    pub fn select_scenario(&mut self, id: &str) -> Result<(), JsError> {
        self.inner.select_scenario(id)?;
        Ok(())
    }

    /// Returns whether the pack is now active.
    #[wasm_bindgen(js_name = togglePack)]
    pub fn toggle_pack(&mut self, id: &str) -> Result<bool, JsError> {
        Ok(self.inner.toggle_pack(id)?)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Runs an evaluation and returns `{ snapshot, result }`.
    pub fn evaluate(&mut self) -> Result<JsValue, JsError> {
        to_js(self.inner.evaluate())
    }

    #[wasm_bindgen(js_name = scenarioChips)]
    pub fn scenario_chips(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.scenario_chips())
    }

    #[wasm_bindgen(js_name = packChips)]
    pub fn pack_chips(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.pack_chips())
    }

    #[wasm_bindgen(js_name = scenarioBadges)]
    pub fn scenario_badges(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.scenario_badges())
    }

    #[wasm_bindgen(js_name = stackView)]
    pub fn stack_view(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.stack_view())
    }

    /// Result table, or effect lanes when `lanes` is true.
    #[wasm_bindgen(js_name = resultView)]
    pub fn result_view(&self, lanes: bool) -> Result<JsValue, JsError> {
        let layout = if lanes { Layout::Lanes } else { Layout::Table };
        to_js(&self.inner.result_view(layout))
    }

    #[wasm_bindgen(js_name = decisionPanel)]
    pub fn decision_panel(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.decision_panel())
    }
}

impl Default for WasmExplainer {
    fn default() -> Self {
        Self::new()
    }
}
