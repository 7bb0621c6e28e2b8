//! Selection state: the active scenario and the toggled rule packs.
//!
//! Mutations are explicit method calls that return success or failure;
//! none of them trigger evaluation.

mod state;

pub use state::{SelectionSnapshot, SelectionState};
