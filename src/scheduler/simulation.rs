//! Departure-slot simulation shared by both allocators.
//!
//! # Algorithm
//!
//! 1. Start the clock at 06:00 on the target date.
//! 2. Draw a route duration for the slot and size its demand.
//! 3. Ask the allocator to fill each demand unit in turn.
//! 4. Advance the clock by duration + a random 10–15 minute gap.
//! 5. Stop once the clock reaches 23:59.
//!
//! A day without a following calendar day has no slots.
//!
//! A break granted inside a slot pushes the slot clock forward by
//! 40 minutes, so later units of the same slot depart later.

use jiff::civil::DateTime;
use jiff::SignedDuration;
use rand::Rng;
use tracing::debug;

use crate::models::calendar::{draw_route_duration, draw_route_gap};
use crate::models::{OperatingDay, Route, Schedule, SharedDriver};

/// Mutable state of the departure slot being filled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slot {
    /// Departure time for the next unit.
    pub now: DateTime,
    /// Route duration drawn for this slot.
    pub duration: SignedDuration,
}

/// Result of filling one demand unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitOutcome {
    /// A route was assigned.
    Route,
    /// A break was granted instead of a route.
    Break,
    /// A capped driver was retired; the unit is consumed.
    Retired,
    /// No eligible driver is left for this slot.
    Exhausted,
}

/// Counters collected over one simulated day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DayStats {
    pub slots: usize,
    pub demand: usize,
    pub routes: usize,
    pub breaks: usize,
    pub retired: usize,
    pub exhausted_slots: usize,
}

impl DayStats {
    /// Demand units left without a route or break.
    pub fn unfilled(&self) -> usize {
        self.demand.saturating_sub(self.routes + self.breaks)
    }
}

/// Runs the slot loop over the operating day.
pub(crate) fn run_day<R, F>(
    bus_count: usize,
    day: &OperatingDay,
    rng: &mut R,
    mut fill_unit: F,
) -> DayStats
where
    R: Rng,
    F: FnMut(&mut Slot, &mut R) -> UnitOutcome,
{
    let mut stats = DayStats::default();
    if !day.is_schedulable() {
        debug!(date = %day.date, "no operating window after the last calendar day");
        return stats;
    }
    let mut now = day.start;

    while now < day.simulation_end {
        let duration = draw_route_duration(rng);
        let demand = day.demand_at(bus_count, now);
        let mut slot = Slot { now, duration };
        stats.slots += 1;
        stats.demand += demand;

        for _ in 0..demand {
            match fill_unit(&mut slot, rng) {
                UnitOutcome::Route => stats.routes += 1,
                UnitOutcome::Break => stats.breaks += 1,
                UnitOutcome::Retired => stats.retired += 1,
                UnitOutcome::Exhausted => {
                    stats.exhausted_slots += 1;
                    break;
                }
            }
        }

        now = slot.now + duration + draw_route_gap(rng);
    }

    stats
}

/// Assigns the slot's route to `driver` and records it in the schedule.
pub(crate) fn assign_route(schedule: &mut Schedule, driver: &SharedDriver, slot: &Slot) {
    let mut driver = driver.borrow_mut();
    let route = Route::new(slot.now, slot.duration, driver.id.clone());
    driver.assign_route(&route);
    schedule.add_route(route);
}

/// Serves one demand unit with a category B driver.
///
/// Grants a break when one is due (advancing the slot clock), otherwise
/// assigns the route.
pub(crate) fn serve_category_b(
    schedule: &mut Schedule,
    driver: &SharedDriver,
    slot: &mut Slot,
) -> UnitOutcome {
    let due = driver.borrow().is_break_due(slot.now);
    if due {
        let entry = driver.borrow_mut().take_break(slot.now);
        debug!(driver = %driver.borrow().id, start = %entry.start(), "break granted");
        slot.now = entry.end();
        UnitOutcome::Break
    } else {
        assign_route(schedule, driver, slot);
        UnitOutcome::Route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{is_peak, Driver, DriverCategory};
    use jiff::civil::date;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_slots_cover_the_day() {
        // Saturday: every slot has full-fleet demand, so each one reaches the closure.
        let day = OperatingDay::new(date(2024, 5, 11));
        let mut rng = SmallRng::seed_from_u64(1);
        let mut starts = Vec::new();
        let stats = run_day(1, &day, &mut rng, |slot, _| {
            starts.push(slot.now);
            UnitOutcome::Exhausted
        });

        assert_eq!(starts.len(), stats.slots);
        assert_eq!(starts[0], day.start);
        assert!(starts.iter().all(|&s| s < day.simulation_end));
        // Slots are 75–90 minutes apart: 06:00–23:59 yields 12–15 slots.
        assert!((12..=15).contains(&stats.slots), "slots = {}", stats.slots);
        for pair in starts.windows(2) {
            let gap = pair[1].duration_since(pair[0]);
            assert!(gap >= SignedDuration::from_mins(75) && gap <= SignedDuration::from_mins(90));
        }
    }

    #[test]
    fn test_weekday_off_peak_slots_skip_single_bus() {
        let day = OperatingDay::new(date(2024, 5, 6));
        let mut rng = SmallRng::seed_from_u64(1);
        let mut starts = Vec::new();
        let stats = run_day(1, &day, &mut rng, |slot, _| {
            starts.push(slot.now);
            UnitOutcome::Exhausted
        });

        assert!(starts.len() < stats.slots);
        assert!(starts.iter().all(|s| is_peak(s.time())));
    }

    #[test]
    fn test_last_calendar_day_has_no_slots() {
        let day = OperatingDay::new(date(9999, 12, 31));
        let mut rng = SmallRng::seed_from_u64(1);
        let mut calls = 0;
        let stats = run_day(8, &day, &mut rng, |_, _| {
            calls += 1;
            UnitOutcome::Route
        });
        assert_eq!(calls, 0);
        assert_eq!(stats, DayStats::default());
    }

    #[test]
    fn test_zero_demand_never_calls_fill() {
        let day = OperatingDay::new(date(2024, 5, 6));
        let mut rng = SmallRng::seed_from_u64(1);
        let mut calls = 0;
        let stats = run_day(0, &day, &mut rng, |_, _| {
            calls += 1;
            UnitOutcome::Route
        });
        assert_eq!(calls, 0);
        assert_eq!(stats.demand, 0);
        assert!(stats.slots > 0);
    }

    #[test]
    fn test_serve_category_b_grants_break() {
        let start = date(2024, 5, 6).at(6, 0, 0, 0);
        let driver = Driver::numbered(DriverCategory::B, 1, start).into_shared();
        driver.borrow_mut().total_work = SignedDuration::from_mins(130);

        let mut schedule = Schedule::new();
        let mut slot = Slot {
            now: date(2024, 5, 6).at(8, 30, 0, 0),
            duration: SignedDuration::from_mins(70),
        };

        let outcome = serve_category_b(&mut schedule, &driver, &mut slot);
        assert_eq!(outcome, UnitOutcome::Break);
        assert_eq!(slot.now, date(2024, 5, 6).at(9, 10, 0, 0));
        assert!(schedule.is_empty());

        // Right after the break the driver is not due again.
        let outcome = serve_category_b(&mut schedule, &driver, &mut slot);
        assert_eq!(outcome, UnitOutcome::Route);
        assert_eq!(schedule.routes[0].start(), date(2024, 5, 6).at(9, 10, 0, 0));
    }
}
