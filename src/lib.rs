//! Priority-based policy evaluation explainer.
//!
//! Combines a fixed catalog of rule packs and request scenarios at runtime
//! and shows which rule wins for a scenario:
//!
//! - **Catalog**: immutable rule packs (each holding rules) and scenarios.
//! - **Selection**: the active scenario and the toggled-on packs.
//! - **Evaluation**: gathers the active rules by ascending priority,
//!   matches them against the scenario (environment membership plus
//!   tag subset, untagged rules acting as wildcards), groups matches into
//!   effect lanes and picks the lowest-priority match as the winner.
//!   Every decision is written to a human-readable trace.
//! - **Explain**: plain-language decision text derived from a result.
//! - **View**: a framework-neutral render model with a table/lanes flag.
//! - **Session**: ties the above together for an interactive front-end.
//!
//! # Architecture
//!
//! The engine is a pure function of (scenario, considered rules); the
//! catalog is never mutated and the selection changes only through
//! explicit calls. Presentation lives outside this crate; with the `wasm`
//! feature a browser front-end drives an [`Explainer`] through
//! `wasm::WasmExplainer`.
//!
//! # Examples
//!
//! ```
//! use u_rulestack::catalog::Effect;
//! use u_rulestack::Explainer;
//!
//! let mut explainer = Explainer::new();
//! explainer.select_scenario("overlappingFlags").unwrap();
//! explainer.toggle_pack("experimentA").unwrap();
//!
//! let result = &explainer.evaluate().result;
//! assert_eq!(result.winner.as_ref().unwrap().id, "expA-allow-beta");
//! assert_eq!(result.effect(), Some(Effect::Allow));
//! ```

pub mod catalog;
pub mod error;
pub mod evaluation;
pub mod explain;
pub mod selection;
pub mod session;
pub mod view;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{CatalogError, SelectionError};
pub use session::{Evaluation, Explainer};
