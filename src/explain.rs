//! Plain-language explanation of an evaluation result.
//!
//! Everything here is derived from an [`EvaluationResult`] alone.

use crate::catalog::Effect;
use crate::evaluation::EvaluationResult;
use std::fmt;

/// Final outcome of a run as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    Allowed,
    Blocked,
    Transformed,
    /// No rule matched. A real system would consult a fallback policy;
    /// this explainer reports the absence instead.
    NoDecision,
}

impl Decision {
    pub fn from_effect(effect: Option<Effect>) -> Self {
        match effect {
            Some(Effect::Allow) => Decision::Allowed,
            Some(Effect::Deny) => Decision::Blocked,
            Some(Effect::Transform) => Decision::Transformed,
            None => Decision::NoDecision,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::Allowed => "Allowed",
            Decision::Blocked => "Blocked",
            Decision::Transformed => "Transformed",
            Decision::NoDecision => "No decision",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Decision::Allowed => "allowed",
            Decision::Blocked => "blocked",
            Decision::Transformed => "transformed",
            Decision::NoDecision => "undecided",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const NO_DECISION_HEADLINE: &str = "With the current scenario and rule packs, no rule produced a decision. In a real system, a default or fallback policy would usually decide what happens next.";

pub const NO_DECISION_DETAIL: &str =
    "No rules matched this scenario. Check environments, tags, or which packs are active.";

/// Decision plus the two explanation sentences shown beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Explanation {
    pub decision: Decision,
    /// Who decided, e.g. `Request is blocked by "X" from Sandbox.`
    pub headline: String,
    /// Winner priority and the shadowed rules.
    pub detail: String,
}

impl Explanation {
    pub fn from_result(result: &EvaluationResult) -> Self {
        let Some(winner) = &result.winner else {
            return Self {
                decision: Decision::NoDecision,
                headline: NO_DECISION_HEADLINE.to_string(),
                detail: NO_DECISION_DETAIL.to_string(),
            };
        };

        let decision = Decision::from_effect(Some(winner.effect));
        let headline = format!(
            "Request is {} by \"{}\" from {}.",
            decision.verb(),
            winner.name,
            winner.pack_label()
        );

        let shadowed = result.shadowed();
        let detail = if shadowed.is_empty() {
            format!(
                "Only one rule matched: {} (P{}).",
                winner.name, winner.priority
            )
        } else {
            let losers = shadowed
                .iter()
                .map(|r| format!("{} (P{})", r.name, r.priority))
                .collect::<Vec<_>>()
                .join("; ");
            format!(
                "Winner: {} (P{}). Other matching rules were shadowed: {losers}.",
                winner.name, winner.priority
            )
        };

        Self {
            decision,
            headline,
            detail,
        }
    }
}

impl EvaluationResult {
    /// Builds the plain-language explanation for this result.
    pub fn explain(&self) -> Explanation {
        Explanation::from_result(self)
    }
}
