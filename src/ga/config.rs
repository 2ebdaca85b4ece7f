//! Genetic algorithm configuration.

use serde::{Deserialize, Serialize};

/// Default population size.
pub const DEFAULT_POPULATION_SIZE: usize = 50;
/// Default number of generations.
pub const DEFAULT_MAX_GENERATIONS: usize = 100;
/// Default per-individual mutation probability.
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;

/// GA run parameters.
///
/// # Example
/// ```
/// use bus_schedule::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42);
/// assert_eq!(config.population_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Individuals kept after each generation (at least 2).
    pub population_size: usize,
    /// Number of generations to run.
    pub max_generations: usize,
    /// Probability that an offspring is mutated (0.0..=1.0).
    pub mutation_rate: f64,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            max_generations: DEFAULT_MAX_GENERATIONS,
            mutation_rate: DEFAULT_MUTATION_RATE,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size (clamped to at least 2).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(2);
        self
    }

    /// Sets the generation count.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the mutation probability (clamped to 0.0..=1.0).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parents kept by selection.
    pub fn parent_count(&self) -> usize {
        self.population_size.max(2) / 2
    }
}
