//! Orchestrator configuration.

use super::strategy::SweepStrategy;
use crate::budget::DEFAULT_CEILING;
use crate::tabu::TabuConfig;
use std::time::Duration;

/// Configuration for a [`WaveRunner`](super::WaveRunner) run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_wave::orchestrator::{SweepStrategy, WaveConfig};
///
/// let config = WaveConfig::default()
///     .with_time_ceiling(Duration::from_secs(30))
///     .with_strategy(SweepStrategy::AscendingAisleCount)
///     .with_max_non_improving(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveConfig {
    /// Wall-clock ceiling when the runner creates its own budget.
    pub time_ceiling: Duration,

    /// Sweep strategy; `None` selects one from the instance.
    pub strategy: Option<SweepStrategy>,

    /// Mean distinct items per order above which `AisleCount` is chosen.
    pub multi_item_threshold: f64,

    /// Run the exactify phase when the instance has at most this many
    /// nonzero order/aisle entries.
    pub exact_size_threshold: usize,

    /// Time cap for the exactify solve.
    pub exactify_cap: Duration,

    /// Consecutive non-improving sweep steps before the sweep stops.
    pub max_non_improving: usize,

    /// Run tabu search after the sweep.
    pub local_search: bool,

    /// Aisles exchanged per tabu move.
    pub swap_size: usize,

    /// Tabu search parameters.
    pub tabu: TabuConfig,

    /// Let the oracle print its own log.
    pub verbose_oracle: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            time_ceiling: DEFAULT_CEILING,
            strategy: None,
            multi_item_threshold: 1.1,
            exact_size_threshold: 20_000,
            exactify_cap: Duration::from_secs(60),
            max_non_improving: 8,
            local_search: true,
            swap_size: 1,
            tabu: TabuConfig::default(),
            verbose_oracle: false,
        }
    }
}

impl WaveConfig {
    pub fn with_time_ceiling(mut self, ceiling: Duration) -> Self {
        self.time_ceiling = ceiling;
        self
    }

    /// Forces a sweep strategy.
    pub fn with_strategy(mut self, strategy: SweepStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_multi_item_threshold(mut self, threshold: f64) -> Self {
        self.multi_item_threshold = threshold;
        self
    }

    pub fn with_exact_size_threshold(mut self, nonzeros: usize) -> Self {
        self.exact_size_threshold = nonzeros;
        self
    }

    pub fn with_exactify_cap(mut self, cap: Duration) -> Self {
        self.exactify_cap = cap;
        self
    }

    pub fn with_max_non_improving(mut self, n: usize) -> Self {
        self.max_non_improving = n;
        self
    }

    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    pub fn with_swap_size(mut self, p: usize) -> Self {
        self.swap_size = p;
        self
    }

    pub fn with_tabu(mut self, tabu: TabuConfig) -> Self {
        self.tabu = tabu;
        self
    }

    pub fn with_verbose_oracle(mut self, verbose: bool) -> Self {
        self.verbose_oracle = verbose;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.multi_item_threshold.is_finite() && self.multi_item_threshold > 0.0) {
            return Err(format!(
                "multi_item_threshold must be positive, got {}",
                self.multi_item_threshold
            ));
        }
        if self.max_non_improving == 0 {
            return Err("max_non_improving must be at least 1".into());
        }
        if self.swap_size == 0 {
            return Err("swap_size must be at least 1".into());
        }
        self.tabu.validate().map_err(|e| format!("tabu: {e}"))
    }
}
