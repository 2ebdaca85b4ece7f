//! Bus route and driver allocation for a single operating day.
//!
//! Builds a day's bus schedule two ways and compares them: a direct
//! greedy allocator, and a genetic optimizer seeded with randomized
//! schedules. Driver duty rules, peak-hour demand and weekend handling
//! live in the domain models.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Driver`, `Route`, `Schedule`,
//!   `OperatingDay`, plus the time policy in `models::calendar`
//! - **`scheduler`**: Direct allocator, random generator, metrics
//! - **`ga`**: Genetic optimizer over whole schedules
//! - **`report`**: CSV export and per-driver summaries
//! - **`validation`**: Parsing and checking raw request input
//!
//! # Example
//!
//! ```
//! use bus_schedule::ga::{optimize_schedule, GaConfig};
//! use bus_schedule::scheduler::{allocate_direct, Comparison, ScheduleRequest};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let request = ScheduleRequest::parse("4", "5", "2", "2024-05-06").unwrap();
//! let mut rng = SmallRng::seed_from_u64(42);
//!
//! let straight = allocate_direct(&request, &mut rng);
//! let config = GaConfig::default().with_population_size(6).with_max_generations(3);
//! let genetic = optimize_schedule(&request, &config, &mut rng).best;
//!
//! let comparison = Comparison::new(&straight, &genetic);
//! assert!(comparison.straight.total_routes > 0);
//! ```
//!
//! # References
//!
//! - Wren & Rousseau (1995), "Bus Driver Scheduling: An Overview"
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"

pub mod ga;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
