//! Tabu Search configuration.

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_wave::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_tenure(7)
///     .with_neighborhood_size(30);
/// assert_eq!(config.max_iterations, 1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// How many adopted states stay in the tabu list.
    pub tabu_tenure: usize,
    /// Evaluate tabu neighbors too, admitting them only if they beat the
    /// global best.
    pub aspiration: bool,
    /// Maximum iterations without improvement before stopping.
    pub max_no_improve: usize,
    /// Neighbors sampled per iteration.
    pub neighborhood_size: usize,
    /// Random seed (None uses a fixed default).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tabu_tenure: 7,
            aspiration: false,
            max_no_improve: 200,
            neighborhood_size: 20,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets maximum iterations without improvement.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Sets the number of neighbors sampled per iteration.
    pub fn with_neighborhood_size(mut self, n: usize) -> Self {
        self.neighborhood_size = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be positive".into());
        }
        if self.tabu_tenure == 0 {
            return Err("tabu_tenure must be at least 1".into());
        }
        if self.max_no_improve == 0 {
            return Err("max_no_improve must be positive".into());
        }
        if self.neighborhood_size == 0 {
            return Err("neighborhood_size must be at least 1".into());
        }
        Ok(())
    }
}
