//! The bundled seed catalog.

use super::types::{Effect, Rule, RulePack, Scenario};

pub(crate) fn rule_packs() -> Vec<RulePack> {
    vec![
        RulePack::new("baseline", "Baseline Policy")
            .with_short_name("Baseline")
            .with_description("Default program rules for prod & staging.")
            .with_default_active(true)
            .with_rule(
                Rule::new(
                    "baseline-allow-standard",
                    "Allow standard requests",
                    "baseline",
                    Effect::Allow,
                    70,
                )
                .with_scope("global")
                .with_environments(["prod", "staging"]),
            )
            .with_rule(
                Rule::new(
                    "baseline-deny-anonymous",
                    "Deny anonymous traffic",
                    "baseline",
                    Effect::Deny,
                    40,
                )
                .with_scope("global")
                .with_environments(["prod", "staging"])
                .with_tags(["anonymous"]),
            )
            .with_rule(
                Rule::new(
                    "baseline-transform-beta",
                    "Throttle beta-flagged traffic",
                    "baseline",
                    Effect::Transform,
                    55,
                )
                .with_scope("beta-flagged")
                .with_environments(["prod"])
                .with_tags(["betaFlag"]),
            ),
        RulePack::new("experimentA", "Experiment A")
            .with_short_name("Experiment A")
            .with_description("Overrides baseline for selected beta cohort.")
            .with_rule(
                Rule::new(
                    "expA-allow-beta",
                    "Allow beta traffic with relaxed limits",
                    "experimentA",
                    Effect::Allow,
                    35,
                )
                .with_scope("beta cohort")
                .with_environments(["prod"])
                .with_tags(["betaFlag", "experimentOverride"]),
            ),
        RulePack::new("sandboxOverride", "Sandbox Override")
            .with_short_name("Sandbox")
            .with_description("Force allow in sandbox unless emergency block.")
            .with_default_active(true)
            .with_rule(
                Rule::new(
                    "sandbox-allow-default",
                    "Allow all non-emergency sandbox traffic",
                    "sandboxOverride",
                    Effect::Allow,
                    80,
                )
                .with_scope("sandbox")
                .with_environments(["sandbox"]),
            )
            .with_rule(
                Rule::new(
                    "sandbox-deny-emergency",
                    "Emergency block in sandbox",
                    "sandboxOverride",
                    Effect::Deny,
                    10,
                )
                .with_scope("sandbox emergency")
                .with_environments(["sandbox"])
                .with_tags(["emergencyOverride"]),
            ),
        RulePack::new("legacyMode", "Legacy Mode")
            .with_short_name("Legacy")
            .with_description("Keeps behavior compatible with legacy systems.")
            .with_rule(
                Rule::new(
                    "legacy-transform-prod",
                    "Transform prod requests to legacy path",
                    "legacyMode",
                    Effect::Transform,
                    45,
                )
                .with_scope("prod legacy")
                .with_environments(["prod"])
                .with_tags(["legacyMode"]),
            ),
    ]
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("standard", "Standard request", "prod")
            .with_description("Typical authenticated request in production."),
        Scenario::new("overlappingFlags", "Overlapping flags", "prod")
            .with_tags(["betaFlag", "experimentOverride"])
            .with_description("Beta cohort with experiment override enabled."),
        Scenario::new("sandboxEmergency", "Sandbox emergency", "sandbox")
            .with_tags(["emergencyOverride"])
            .with_description("Sandbox request during an incident with emergency flag set."),
        Scenario::new("legacyPath", "Legacy path", "prod")
            .with_tags(["legacyMode"])
            .with_description("Production request routed via legacy compatibility mode."),
    ]
}
