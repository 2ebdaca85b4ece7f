//! Genetic operators for day schedules.
//!
//! # Crossover
//! Single-point splice, applied independently to the route list and to
//! the driver list: `child = a[..point] ++ b[point..]` with `point` drawn
//! from `0..=min(len(a), len(b))`. Children share route and driver
//! objects with their parents.
//!
//! # Mutation
//! - Route timing: shift one route by -30..=30 minutes and rebuild it with
//!   a fresh duration, if the new start stays inside the operating window.
//! - Driver category: set one driver's category to A or B at random. The
//!   driver may be shared, so the change shows in every schedule holding it.

use jiff::SignedDuration;
use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::models::calendar::draw_route_duration;
use crate::models::{DriverCategory, OperatingDay, Schedule};

/// Largest start-time shift applied by route mutation (minutes).
pub const MAX_START_SHIFT_MINUTES: i64 = 30;

/// `head[..point] ++ tail[point..]`, with `point` clamped to both lengths.
pub fn splice<T: Clone>(head: &[T], tail: &[T], point: usize) -> Vec<T> {
    let point = point.min(head.len()).min(tail.len());
    head[..point].iter().chain(&tail[point..]).cloned().collect()
}

/// Crossover at fixed split points.
pub fn crossover_at(
    a: &Schedule,
    b: &Schedule,
    route_point: usize,
    driver_point: usize,
) -> Schedule {
    Schedule {
        routes: splice(&a.routes, &b.routes, route_point),
        drivers: splice(&a.drivers, &b.drivers, driver_point),
    }
}

/// Single-point crossover with random split points.
pub fn single_point_crossover<R: Rng>(a: &Schedule, b: &Schedule, rng: &mut R) -> Schedule {
    let route_point = rng.random_range(0..=a.routes.len().min(b.routes.len()));
    let driver_point = rng.random_range(0..=a.drivers.len().min(b.drivers.len()));
    crossover_at(a, b, route_point, driver_point)
}

/// Shifts one random route's start and redraws its duration.
///
/// Returns `true` if a route was replaced.
pub fn mutate_route_timing<R: Rng>(
    schedule: &mut Schedule,
    day: &OperatingDay,
    rng: &mut R,
) -> bool {
    if schedule.routes.is_empty() {
        return false;
    }
    let idx = rng.random_range(0..schedule.routes.len());
    let shift = rng.random_range(-MAX_START_SHIFT_MINUTES..=MAX_START_SHIFT_MINUTES);
    let start = schedule.routes[idx].start() + SignedDuration::from_mins(shift);
    if !day.contains_start(start) {
        return false;
    }
    let replacement = schedule.routes[idx].rescheduled(start, draw_route_duration(rng));
    schedule.routes[idx] = replacement.into();
    true
}

/// Reassigns one random driver's category.
///
/// Only the label changes: accumulated work is kept, so a B driver past
/// the 8-hour cap can come out as category A.
///
/// Returns `true` if a driver was touched (even if the category is unchanged).
pub fn mutate_driver_category<R: Rng>(schedule: &mut Schedule, rng: &mut R) -> bool {
    let Some(driver) = schedule.drivers.choose(rng) else {
        return false;
    };
    let category = DriverCategory::ALL.choose(rng).copied().unwrap_or(DriverCategory::A);
    driver.borrow_mut().category = category;
    true
}
