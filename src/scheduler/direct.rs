//! Direct (greedy) allocator.
//!
//! # Algorithm
//!
//! For each demand unit of each departure slot:
//! 1. Take the front of the category A queue. If the route keeps it within
//!    the 8-hour cap, assign it. Otherwise retire the driver permanently;
//!    the unit is consumed without an assignment.
//! 2. With no A driver left, take the first category B driver. Grant a
//!    40-minute break if one is due, otherwise assign the route.
//! 3. With neither, stop filling the slot.
//!
//! Category B drivers are never retired, so the first B driver absorbs all
//! B demand.
//!
//! # Complexity
//! O(slots × buses); queue operations are O(1).

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, info, instrument};

use super::simulation::{self, UnitOutcome};
use super::ScheduleRequest;
use crate::models::{DriverCategory, Schedule, SharedDriver};

/// Builds a schedule by deterministic FIFO allocation.
///
/// Only route durations and slot gaps are random. Every created driver
/// is added to the schedule, used or not.
///
/// # Example
///
/// ```
/// use bus_schedule::scheduler::{allocate_direct, ScheduleRequest};
/// use jiff::civil::date;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let request = ScheduleRequest::new(4, 6, 2, date(2024, 5, 6));
/// let mut rng = SmallRng::seed_from_u64(42);
/// let schedule = allocate_direct(&request, &mut rng);
/// assert!(schedule.route_count() > 0);
/// assert_eq!(schedule.driver_count(), 8);
/// ```
#[instrument(level = "debug", skip(rng))]
pub fn allocate_direct<R: Rng>(request: &ScheduleRequest, rng: &mut R) -> Schedule {
    let day = request.day();
    let drivers_a = request.create_drivers(DriverCategory::A);
    let drivers_b = request.create_drivers(DriverCategory::B);

    let mut queue_a: VecDeque<SharedDriver> = drivers_a.iter().cloned().collect();
    let mut schedule = Schedule::new();

    let stats = simulation::run_day(request.bus_count, &day, rng, |slot, _| {
        if let Some(driver) = queue_a.front() {
            let fits = driver.borrow().fits_route(slot.duration);
            if fits {
                simulation::assign_route(&mut schedule, driver, slot);
                UnitOutcome::Route
            } else {
                if let Some(retired) = queue_a.pop_front() {
                    let id = retired.borrow().id.clone();
                    debug!(driver = %id, at = %slot.now, "category A driver retired");
                }
                UnitOutcome::Retired
            }
        } else if let Some(driver) = drivers_b.first() {
            simulation::serve_category_b(&mut schedule, driver, slot)
        } else {
            UnitOutcome::Exhausted
        }
    });

    for driver in drivers_a.into_iter().chain(drivers_b) {
        schedule.add_driver(driver);
    }

    info!(
        slots = stats.slots,
        routes = stats.routes,
        breaks = stats.breaks,
        retired = stats.retired,
        unfilled = stats.unfilled(),
        "direct allocation finished"
    );
    schedule
}
