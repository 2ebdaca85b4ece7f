//! Schedule comparison metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Routes | Number of routes in the schedule |
//! | Peak Routes | Routes departing in 07:00–09:00 or 17:00–19:00 |
//! | Unique Drivers | Number of driver entries in the schedule |

use serde::{Deserialize, Serialize};

use crate::models::Schedule;

/// Summary metrics of one schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Number of routes.
    pub total_routes: usize,
    /// Routes departing in a peak window.
    pub peak_routes: usize,
    /// Driver entries referenced by the schedule.
    pub unique_drivers: usize,
}

impl ScheduleMetrics {
    /// Computes metrics from a schedule. O(routes).
    pub fn calculate(schedule: &Schedule) -> Self {
        Self {
            total_routes: schedule.route_count(),
            peak_routes: schedule.peak_route_count(),
            unique_drivers: schedule.driver_count(),
        }
    }

    /// Metrics as a `(total_routes, peak_routes, unique_drivers)` triple.
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.total_routes, self.peak_routes, self.unique_drivers)
    }
}

/// Computes the metrics triple of a schedule.
pub fn compute_metrics(schedule: &Schedule) -> ScheduleMetrics {
    ScheduleMetrics::calculate(schedule)
}

/// Side-by-side metrics of the direct and genetic schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Direct allocator metrics.
    pub straight: ScheduleMetrics,
    /// Genetic optimizer metrics.
    pub genetic: ScheduleMetrics,
}

impl Comparison {
    /// Compares two schedules.
    pub fn new(straight: &Schedule, genetic: &Schedule) -> Self {
        Self {
            straight: compute_metrics(straight),
            genetic: compute_metrics(genetic),
        }
    }

    /// Rows of `(metric name, straight value, genetic value)`.
    pub fn rows(&self) -> [(&'static str, usize, usize); 3] {
        [
            ("Total Routes", self.straight.total_routes, self.genetic.total_routes),
            ("Peak Routes", self.straight.peak_routes, self.genetic.peak_routes),
            ("Unique Drivers", self.straight.unique_drivers, self.genetic.unique_drivers),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, DriverCategory, Route};
    use crate::scheduler::{allocate_direct, ScheduleRequest};
    use jiff::civil::date;
    use jiff::SignedDuration;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_schedule() -> Schedule {
        let start = date(2024, 5, 6).at(6, 0, 0, 0);
        let mut s = Schedule::new();
        s.add_driver(Driver::numbered(DriverCategory::A, 1, start).into_shared());
        for (h, m) in [(6, 0), (7, 20), (8, 59), (9, 0), (17, 0), (19, 0)] {
            s.add_route(Route::new(
                date(2024, 5, 6).at(h, m, 0, 0),
                SignedDuration::from_mins(70),
                "A1",
            ));
        }
        s
    }

    #[test]
    fn test_metrics_basic() {
        let m = compute_metrics(&sample_schedule());
        assert_eq!(m.as_tuple(), (6, 3, 1));
    }

    #[test]
    fn test_metrics_consistency() {
        let request = ScheduleRequest::new(8, 10, 5, date(2024, 5, 6));
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = allocate_direct(&request, &mut rng);

        let m = compute_metrics(&schedule);
        assert_eq!(m.total_routes, schedule.routes.len());
        assert!(m.peak_routes <= m.total_routes);
        assert_eq!(m.unique_drivers, schedule.drivers.len());
    }

    #[test]
    fn test_metrics_idempotent() {
        let s = sample_schedule();
        assert_eq!(compute_metrics(&s), compute_metrics(&s));
    }

    #[test]
    fn test_metrics_empty() {
        assert_eq!(compute_metrics(&Schedule::new()), ScheduleMetrics::default());
    }

    #[test]
    fn test_comparison_rows() {
        let s = sample_schedule();
        let c = Comparison::new(&s, &Schedule::new());
        let rows = c.rows();
        assert_eq!(rows[0], ("Total Routes", 6, 0));
        assert_eq!(rows[1], ("Peak Routes", 3, 0));
        assert_eq!(rows[2], ("Unique Drivers", 1, 0));
    }
}
