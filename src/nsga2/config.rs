//! Driver configuration.
//!
//! [`Nsga2Config`] holds all parameters that control the evolutionary loop.

/// Configuration for the reference NSGA-II driver.
///
/// # Defaults
///
/// ```
/// use u_moea::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.offspring_count(), 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moea::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default()
///     .with_population_size(11)
///     .with_max_generations(100)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Number of individuals kept after each survival step.
    pub population_size: usize,

    /// Offspring produced per generation. `None` uses `population_size`.
    pub n_offsprings: Option<usize>,

    /// Number of generations after the initial population.
    pub max_generations: usize,

    /// Upper bound on mating rounds per generation.
    ///
    /// When duplicate elimination rejects offspring, the driver mates again
    /// until enough unique offspring exist or this many rounds have run.
    pub max_mating_attempts: usize,

    /// Whether to evaluate rows in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked at the start of
    /// each generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            n_offsprings: None,
            max_generations: 100,
            max_mating_attempts: 100,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl Nsga2Config {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_n_offsprings(mut self, n: usize) -> Self {
        self.n_offsprings = Some(n);
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_max_mating_attempts(mut self, n: usize) -> Self {
        self.max_mating_attempts = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Offspring per generation after applying the default.
    pub fn offspring_count(&self) -> usize {
        self.n_offsprings.unwrap_or(self.population_size)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.n_offsprings == Some(0) {
            return Err("n_offsprings must be positive or None".into());
        }
        if self.max_mating_attempts == 0 {
            return Err("max_mating_attempts must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
