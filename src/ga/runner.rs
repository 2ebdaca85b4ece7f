//! Generational GA loop.
//!
//! Each generation runs named stages in order:
//!
//! 1. **evaluate**: score and sort the population, best first (stable).
//! 2. **select_parents**: keep the top half (truncation selection).
//! 3. **recombine**: pair parents (0,1), (2,3), …; each pair yields two
//!    children. An odd last parent passes through as its own offspring.
//! 4. **mutate**: mutate each child with probability `mutation_rate`.
//! 5. **advance**: merge parents and offspring, re-sort, truncate.
//!
//! Parents always survive into the next population, so the best fitness
//! never decreases between generations.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use super::GaConfig;

/// Problem definition plugged into [`GaRunner`].
///
/// Fitness is maximized.
pub trait GaProblem {
    /// Candidate solution type.
    type Individual: Clone;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Scores an individual (higher = better).
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Produces one child from two parents, `first` supplying the head.
    fn crossover<R: Rng>(
        &self,
        first: &Self::Individual,
        second: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);
}

/// An individual with its fitness.
#[derive(Debug, Clone)]
pub struct Scored<I> {
    /// The individual.
    pub individual: I,
    /// Its fitness.
    pub fitness: f64,
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Fittest individual of the final population.
    pub best: I,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Generations executed.
    pub generations: usize,
    /// Best fitness at the end of each generation.
    pub history: Vec<f64>,
}

/// Stage 0: builds the initial population.
pub fn initialize<P: GaProblem, R: Rng>(
    problem: &P,
    size: usize,
    rng: &mut R,
) -> Vec<P::Individual> {
    (0..size).map(|_| problem.create_individual(rng)).collect()
}

/// Stage 1: scores individuals and sorts them best first.
///
/// The sort is stable, so equal-fitness individuals keep their order.
pub fn evaluate<P: GaProblem>(
    problem: &P,
    population: Vec<P::Individual>,
) -> Vec<Scored<P::Individual>> {
    let mut ranked: Vec<_> = population
        .into_iter()
        .map(|individual| Scored {
            fitness: problem.evaluate(&individual),
            individual,
        })
        .collect();
    ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    ranked
}

/// Stage 2: keeps the `count` best of a ranked population.
pub fn select_parents<I>(mut ranked: Vec<Scored<I>>, count: usize) -> Vec<Scored<I>> {
    ranked.truncate(count);
    ranked
}

/// Stage 3: produces offspring from sequential parent pairs.
pub fn recombine<P: GaProblem, R: Rng>(
    problem: &P,
    parents: &[Scored<P::Individual>],
    rng: &mut R,
) -> Vec<P::Individual> {
    let mut offspring = Vec::with_capacity(parents.len());
    for pair in parents.chunks(2) {
        match pair {
            [a, b] => {
                offspring.push(problem.crossover(&a.individual, &b.individual, rng));
                offspring.push(problem.crossover(&b.individual, &a.individual, rng));
            }
            [single] => offspring.push(single.individual.clone()),
            _ => {}
        }
    }
    offspring
}

/// Stage 4: mutates each individual with probability `rate`.
///
/// Returns the number of individuals mutated.
pub fn mutate<P: GaProblem, R: Rng>(
    problem: &P,
    offspring: &mut [P::Individual],
    rate: f64,
    rng: &mut R,
) -> usize {
    let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
    let mut mutated = 0;
    for individual in offspring.iter_mut() {
        if rng.random_bool(rate) {
            problem.mutate(individual, rng);
            mutated += 1;
        }
    }
    mutated
}

/// Stage 5: merges parents and offspring into the next ranked population.
pub fn advance<P: GaProblem>(
    problem: &P,
    parents: Vec<Scored<P::Individual>>,
    offspring: Vec<P::Individual>,
    size: usize,
) -> Vec<Scored<P::Individual>> {
    let merged = parents
        .into_iter()
        .map(|p| p.individual)
        .chain(offspring)
        .collect();
    let mut ranked = evaluate(problem, merged);
    ranked.truncate(size);
    ranked
}

/// Runs the generational loop.
pub struct GaRunner;

impl GaRunner {
    /// Runs with an RNG seeded from `config.seed` (or the OS).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> GaResult<P::Individual> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs with a caller-supplied RNG.
    #[instrument(level = "debug", skip_all, fields(
        population = config.population_size,
        generations = config.max_generations,
    ))]
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> GaResult<P::Individual> {
        let size = config.population_size.max(2);
        let parent_count = config.parent_count();

        let initial = initialize(problem, size, rng);
        let mut ranked = evaluate(problem, initial);
        let mut history = Vec::with_capacity(config.max_generations);

        for generation in 0..config.max_generations {
            let parents = select_parents(ranked, parent_count);
            let mut offspring = recombine(problem, &parents, rng);
            let mutated = mutate(problem, &mut offspring, config.mutation_rate, rng);
            ranked = advance(problem, parents, offspring, size);

            let best = ranked[0].fitness;
            history.push(best);
            debug!(generation, best, mutated, "generation complete");
        }

        let best = ranked.swap_remove(0);
        info!(
            best_fitness = best.fitness,
            generations = config.max_generations,
            "genetic optimization finished"
        );
        GaResult {
            best: best.individual,
            best_fitness: best.fitness,
            generations: config.max_generations,
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Maximizes the sum of a fixed-length bit vector.
    struct OneMax {
        len: usize,
    }

    impl GaProblem for OneMax {
        type Individual = Vec<bool>;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
            (0..self.len).map(|_| rng.random_bool(0.5)).collect()
        }

        fn evaluate(&self, individual: &Vec<bool>) -> f64 {
            individual.iter().filter(|&&b| b).count() as f64
        }

        fn crossover<R: Rng>(
            &self,
            first: &Vec<bool>,
            second: &Vec<bool>,
            rng: &mut R,
        ) -> Vec<bool> {
            let point = rng.random_range(0..=self.len);
            first[..point].iter().chain(&second[point..]).copied().collect()
        }

        fn mutate<R: Rng>(&self, individual: &mut Vec<bool>, rng: &mut R) {
            let idx = rng.random_range(0..self.len);
            individual[idx] = !individual[idx];
        }
    }

    fn scored(fitness: &[f64]) -> Vec<Scored<usize>> {
        fitness
            .iter()
            .enumerate()
            .map(|(individual, &fitness)| Scored { individual, fitness })
            .collect()
    }

    #[test]
    fn test_evaluate_sorts_descending_and_stable() {
        let problem = OneMax { len: 4 };
        let population = vec![
            vec![true, false, false, false],
            vec![true, true, true, false],
            vec![false, true, false, false],
        ];
        let ranked = evaluate(&problem, population);
        let fitness: Vec<f64> = ranked.iter().map(|s| s.fitness).collect();
        assert_eq!(fitness, vec![3.0, 1.0, 1.0]);
        // Ties keep input order.
        assert!(ranked[1].individual[0]);
        assert!(ranked[2].individual[1]);
    }

    #[test]
    fn test_select_parents_keeps_top() {
        let parents = select_parents(scored(&[9.0, 7.0, 5.0, 1.0]), 2);
        assert_eq!(parents.len(), 2);
        assert_eq!(parents[0].individual, 0);
        assert_eq!(parents[1].individual, 1);
    }

    #[test]
    fn test_recombine_pairs_and_odd_passthrough() {
        let problem = OneMax { len: 6 };
        let mut rng = SmallRng::seed_from_u64(1);
        let parents: Vec<_> = (0..5)
            .map(|i| Scored {
                individual: vec![i % 2 == 0; 6],
                fitness: 0.0,
            })
            .collect();
        let offspring = recombine(&problem, &parents, &mut rng);
        assert_eq!(offspring.len(), 5);
        assert_eq!(offspring[4], parents[4].individual);
    }

    #[test]
    fn test_mutate_rate_bounds() {
        let problem = OneMax { len: 8 };
        let mut rng = SmallRng::seed_from_u64(2);
        let mut offspring = initialize(&problem, 10, &mut rng);
        let before = offspring.clone();

        assert_eq!(mutate(&problem, &mut offspring, 0.0, &mut rng), 0);
        assert_eq!(offspring, before);
        assert_eq!(mutate(&problem, &mut offspring, 1.0, &mut rng), 10);
        assert_ne!(offspring, before);
    }

    #[test]
    fn test_advance_truncates() {
        let problem = OneMax { len: 3 };
        let parents = vec![Scored {
            individual: vec![true, true, false],
            fitness: 2.0,
        }];
        let offspring = vec![vec![true, true, true], vec![false, false, false]];
        let ranked = advance(&problem, parents, offspring, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].fitness, 3.0);
        assert_eq!(ranked[1].fitness, 2.0);
    }

    #[test]
    fn test_best_fitness_never_decreases() {
        let problem = OneMax { len: 30 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(40)
            .with_mutation_rate(0.5)
            .with_seed(42);
        let result = GaRunner::run(&problem, &config);

        assert_eq!(result.generations, 40);
        assert_eq!(result.history.len(), 40);
        for pair in result.history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(result.best_fitness, *result.history.last().unwrap());
        assert_eq!(problem.evaluate(&result.best), result.best_fitness);
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let problem = OneMax { len: 10 };
        let config = GaConfig::default()
            .with_population_size(6)
            .with_max_generations(0)
            .with_seed(3);
        let result = GaRunner::run(&problem, &config);
        assert_eq!(result.generations, 0);
        assert!(result.history.is_empty());
        assert_eq!(problem.evaluate(&result.best), result.best_fitness);
    }
}
