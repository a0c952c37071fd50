//! Module: config
//! Responsibility: evaluation policy attached to request nodes.
//! Does not own: consumer semantics or driver iteration.
//! Boundary: plain value consumed by the fan-out driver.

///
/// EvaluationConfig
///
/// EvaluationConfig defines hard limits and instrumentation policy for one
/// evaluation pass. Limits stay at the node boundary instead of inside
/// consumer state so every consumer sees the same policy.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EvaluationConfig {
    element_limit: u64,
    record_metrics: bool,
}

impl EvaluationConfig {
    /// Build one unbounded configuration with metrics enabled.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            element_limit: u64::MAX,
            record_metrics: true,
        }
    }

    /// Build one configuration that fails the pass once more than `limit`
    /// elements are pulled from the source.
    #[must_use]
    pub const fn with_element_limit(limit: u64) -> Self {
        Self {
            element_limit: limit,
            record_metrics: true,
        }
    }

    /// Disable observability events for passes run under this config.
    #[must_use]
    pub const fn without_metrics(mut self) -> Self {
        self.record_metrics = false;
        self
    }

    #[must_use]
    pub const fn element_limit(&self) -> u64 {
        self.element_limit
    }

    #[must_use]
    pub const fn record_metrics(&self) -> bool {
        self.record_metrics
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}
