//! Priority-based policy evaluation.
//!
//! One run goes through four steps:
//!
//! - **Gather**: flatten the active packs into annotated rules sorted by
//!   ascending priority. Equal priorities keep a deterministic order
//!   (pack position, then declaration order).
//! - **Match**: test each rule against the scenario in that order,
//!   recording every decision in the trace.
//! - **Partition**: group matches into allow, deny and transform lanes.
//! - **Resolve**: the first match is the winner. No match means no
//!   decision; no fallback policy is applied.
//!
//! The engine is stateless. Evaluating the same inputs twice yields equal
//! results, trace text included.

mod config;
mod engine;
mod matrix;
mod result;
mod trace;
mod types;

pub use config::{EvaluationConfig, PackOrder, StatusFilter};
pub use engine::PolicyEngine;
pub use matrix::evaluate_matrix;
pub use result::{AnnotatedRule, EvaluationResult, Lanes};
pub use trace::NO_MATCH_LINE;
pub use types::{RuleMatcher, ScopeMatcher};
