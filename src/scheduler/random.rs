//! Random schedule generator.
//!
//! Uses the same slot loop and demand sizing as the direct allocator, but
//! draws each unit's driver uniformly from a single combined pool:
//!
//! - category A under the cap drives the route;
//! - category B takes a due break or drives the route;
//! - category A over the cap leaves the pool and the unit is retried.
//!
//! Serves as the individual generator of the genetic optimizer.

use rand::Rng;
use tracing::{debug, instrument};

use super::simulation::{self, UnitOutcome};
use super::ScheduleRequest;
use crate::models::{DriverCategory, Schedule, SharedDriver};

/// Builds one randomized schedule.
///
/// The returned schedule lists the drivers still in the pool when the day
/// ends; retired category A drivers are dropped from it while their routes
/// are kept.
#[instrument(level = "trace", skip(rng))]
pub fn generate_random<R: Rng>(request: &ScheduleRequest, rng: &mut R) -> Schedule {
    let day = request.day();
    let mut pool: Vec<SharedDriver> = request
        .create_drivers(DriverCategory::A)
        .into_iter()
        .chain(request.create_drivers(DriverCategory::B))
        .collect();
    let mut schedule = Schedule::new();

    let stats = simulation::run_day(request.bus_count, &day, rng, |slot, rng| loop {
        if pool.is_empty() {
            return UnitOutcome::Exhausted;
        }
        let idx = rng.random_range(0..pool.len());
        let driver = &pool[idx];
        let (category, fits) = {
            let d = driver.borrow();
            (d.category, d.fits_route(slot.duration))
        };

        match category {
            DriverCategory::A if fits => {
                simulation::assign_route(&mut schedule, driver, slot);
                return UnitOutcome::Route;
            }
            DriverCategory::B => {
                return simulation::serve_category_b(&mut schedule, driver, slot);
            }
            DriverCategory::A => {
                let retired = pool.remove(idx);
                debug!(driver = %retired.borrow().id, at = %slot.now, "retired from pool");
            }
        }
    });

    schedule.drivers = pool;
    debug!(
        routes = stats.routes,
        breaks = stats.breaks,
        retired = stats.retired,
        unfilled = stats.unfilled(),
        exhausted_slots = stats.exhausted_slots,
        "random schedule generated"
    );
    schedule
}
