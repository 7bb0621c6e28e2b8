//! Engine configuration.

/// Order in which active packs are laid out before the priority sort.
///
/// Only affects rules with equal priority: ties are broken by pack
/// position, then by declaration order inside the pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackOrder {
    /// The order in which packs were switched on. A pack toggled off and
    /// back on moves behind the packs that stayed active.
    #[default]
    Activation,

    /// Catalog declaration order, independent of toggle history.
    Catalog,
}

/// Which rule statuses are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusFilter {
    /// Every rule of an active pack, drafts included.
    #[default]
    Any,

    /// Skip rules whose status is `Draft`.
    ActiveOnly,
}

/// Configuration for [`PolicyEngine`](super::PolicyEngine).
///
/// # Examples
///
/// ```
/// use u_rulestack::evaluation::{EvaluationConfig, PackOrder, StatusFilter};
///
/// let config = EvaluationConfig::default()
///     .with_pack_order(PackOrder::Catalog)
///     .with_statuses(StatusFilter::ActiveOnly)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationConfig {
    /// Tie-break layout of active packs.
    pub pack_order: PackOrder,

    /// Rule status filter applied while gathering.
    pub statuses: StatusFilter,

    /// Whether scenario matrices are evaluated in parallel using rayon.
    ///
    /// Requires the `parallel` feature.
    pub parallel: bool,
}

impl EvaluationConfig {
    pub fn with_pack_order(mut self, order: PackOrder) -> Self {
        self.pack_order = order;
        self
    }

    pub fn with_statuses(mut self, statuses: StatusFilter) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel && !cfg!(feature = "parallel") {
            return Err("parallel evaluation requires the `parallel` feature".into());
        }
        Ok(())
    }
}
