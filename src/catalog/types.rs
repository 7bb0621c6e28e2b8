//! Catalog entities: rule packs, rules and scenarios.

use std::fmt;

/// The outcome category of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Effect {
    Allow,
    Deny,
    Transform,
}

impl Effect {
    /// All effects in lane order.
    pub const ALL: [Effect; 3] = [Effect::Allow, Effect::Deny, Effect::Transform];

    /// Lowercase identifier used in traces (`allow`, `deny`, `transform`).
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Allow => "allow",
            Effect::Deny => "deny",
            Effect::Transform => "transform",
        }
    }

    /// Capitalized label for tables and lane headers.
    pub fn label(self) -> &'static str {
        match self {
            Effect::Allow => "Allow",
            Effect::Deny => "Deny",
            Effect::Transform => "Transform",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RuleStatus {
    #[default]
    Active,
    Draft,
}

/// A single policy rule.
///
/// `environments` and `tags` are sets; they are kept as vectors so that
/// display order follows declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// Unique across all packs.
    pub id: String,
    pub name: String,
    /// Owning pack. Lookup only; the pack owns the rule.
    pub pack_id: String,
    /// Free-text scope label.
    pub scope: String,
    pub environments: Vec<String>,
    /// Required scenario tags. Empty means "any tags".
    pub tags: Vec<String>,
    pub effect: Effect,
    /// Lower value = higher precedence.
    pub priority: i32,
    pub status: RuleStatus,
}

impl Rule {
    /// Creates an active rule with no environments, no tags and an empty scope.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pack_id: impl Into<String>,
        effect: Effect,
        priority: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pack_id: pack_id.into(),
            scope: String::new(),
            environments: Vec::new(),
            tags: Vec::new(),
            effect,
            priority,
            status: RuleStatus::Active,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = environments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: RuleStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the rule carries no tag requirement.
    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }
}

/// A named, independently toggleable group of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulePack {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub default_active: bool,
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
}

impl RulePack {
    /// Creates an empty, inactive-by-default pack.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            short_name: name.clone(),
            name,
            description: String::new(),
            default_active: false,
            rules: Vec::new(),
        }
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default_active(mut self, active: bool) -> Self {
        self.default_active = active;
        self
    }

    /// Appends a rule. The rule's `pack_id` is not rewritten.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// A simulated request descriptor used as evaluation input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub environment: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl Scenario {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            environment: environment.into(),
            tags: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Tags joined by `", "`, or `"none"` when there are none.
    pub fn tags_label(&self) -> String {
        join_or_none(&self.tags)
    }
}

/// Joins labels with `", "`, falling back to `"none"`.
pub(crate) fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
