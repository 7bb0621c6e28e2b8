//! Trace line formatting.

use crate::catalog::{join_or_none, Scenario};
use crate::evaluation::AnnotatedRule;

/// Summary line when no considered rule matched.
pub const NO_MATCH_LINE: &str = "No rules matched this scenario.";

/// Accumulates trace lines in evaluation order.
#[derive(Debug, Default)]
pub(crate) struct TraceLog {
    lines: Vec<String>,
}

impl TraceLog {
    /// Scenario line, active pack line and a blank separator.
    pub fn header(scenario: &Scenario, pack_ids: &[String]) -> Self {
        let lines = vec![
            format!(
                "Scenario: {} (env={}, tags=[{}])",
                scenario.name,
                scenario.environment,
                scenario.tags.join(", ")
            ),
            format!("Active rule packs: {}", join_or_none(pack_ids)),
            String::new(),
        ];
        Self { lines }
    }

    pub fn decision(&mut self, rule: &AnnotatedRule, matched: bool) {
        let verdict = if matched { "MATCH" } else { "no match" };
        self.lines
            .push(format!("Rule {} ({}) -> {verdict}", rule.id, rule.name));
    }

    pub fn summary(&mut self, match_count: usize, winner: Option<&AnnotatedRule>) {
        self.lines.push(String::new());
        if match_count == 0 {
            self.lines.push(NO_MATCH_LINE.to_string());
        } else {
            self.lines
                .push(format!("Total matching rules: {match_count}"));
        }
        if let Some(w) = winner {
            self.lines.push(format!(
                "Winner: {} ({}), effect={}, priority={}",
                w.id, w.name, w.effect, w.priority
            ));
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
