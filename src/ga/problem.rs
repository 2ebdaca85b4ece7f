//! Bus rostering GA problem definition.
//!
//! Individuals are whole day schedules built by the random generator.
//!
//! # Fitness
//! `fitness = total_routes - driver_penalty × driver_count`, with a
//! default penalty of 0.1: coverage dominates, and among schedules with
//! equal coverage the one using fewer drivers wins.

use rand::Rng;

use super::operators::{mutate_driver_category, mutate_route_timing, single_point_crossover};
use super::runner::GaProblem;
use crate::models::{OperatingDay, Schedule};
use crate::scheduler::{compute_metrics, generate_random, ScheduleRequest};

/// Default per-driver fitness penalty.
pub const DEFAULT_DRIVER_PENALTY: f64 = 0.1;

/// GA problem over day schedules for one request.
///
/// # Example
/// ```
/// use bus_schedule::ga::{BusGaProblem, GaConfig, GaRunner};
/// use bus_schedule::scheduler::ScheduleRequest;
/// use jiff::civil::date;
///
/// let request = ScheduleRequest::new(4, 5, 2, date(2024, 5, 6));
/// let problem = BusGaProblem::new(request);
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_seed(42);
/// let result = GaRunner::run(&problem, &config);
/// assert!(result.best.route_count() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct BusGaProblem {
    /// Allocator input shared by every individual.
    pub request: ScheduleRequest,
    /// Operating day bounding route mutation.
    pub day: OperatingDay,
    /// Fitness penalty per driver entry.
    pub driver_penalty: f64,
}

impl BusGaProblem {
    /// Creates a problem for a request.
    pub fn new(request: ScheduleRequest) -> Self {
        Self {
            day: request.day(),
            request,
            driver_penalty: DEFAULT_DRIVER_PENALTY,
        }
    }

    /// Sets the per-driver penalty.
    pub fn with_driver_penalty(mut self, penalty: f64) -> Self {
        self.driver_penalty = penalty.max(0.0);
        self
    }

    /// Fitness of a schedule.
    pub fn fitness(&self, schedule: &Schedule) -> f64 {
        let metrics = compute_metrics(schedule);
        metrics.total_routes as f64 - self.driver_penalty * metrics.unique_drivers as f64
    }
}

impl GaProblem for BusGaProblem {
    type Individual = Schedule;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Schedule {
        generate_random(&self.request, rng)
    }

    fn evaluate(&self, individual: &Schedule) -> f64 {
        self.fitness(individual)
    }

    fn crossover<R: Rng>(&self, first: &Schedule, second: &Schedule, rng: &mut R) -> Schedule {
        single_point_crossover(first, second, rng)
    }

    /// Applies one route-timing and one driver-category mutation.
    fn mutate<R: Rng>(&self, individual: &mut Schedule, rng: &mut R) {
        mutate_route_timing(individual, &self.day, rng);
        mutate_driver_category(individual, rng);
    }
}
