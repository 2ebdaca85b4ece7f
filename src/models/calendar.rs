//! Operating-day calendar and time policy.
//!
//! Classifies clock times as peak/off-peak and dates as weekday/weekend,
//! and sizes the fleet demand of each departure slot.
//!
//! # Time Model
//! All instants are civil (zone-less) `DateTime`s on the target date.
//! Windows over the clock are half-open `[start, end)`.
//!
//! # Demand
//! | Day | Peak | Off-peak |
//! |-----|------|----------|
//! | Weekday | 100% of buses | 30% of buses (rounded down) |
//! | Weekend | 100% of buses | 100% of buses |

use std::ops::RangeInclusive;

use jiff::civil::{time, Date, DateTime, Time, Weekday};
use jiff::SignedDuration;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// First departure of the day.
pub const OPERATION_START: Time = time(6, 0, 0, 0);
/// Practical simulation boundary: no departure slot starts at or after this.
pub const SIMULATION_END: Time = time(23, 59, 0, 0);
/// End of the operating window, on the following day.
pub const OPERATION_END: Time = time(3, 0, 0, 0);

/// Morning and evening rush windows.
pub const PEAK_WINDOWS: [TimeWindow; 2] = [
    TimeWindow::new(time(7, 0, 0, 0), time(9, 0, 0, 0)),
    TimeWindow::new(time(17, 0, 0, 0), time(19, 0, 0, 0)),
];

/// Route duration range (minutes, inclusive).
pub const ROUTE_DURATION_MINUTES: RangeInclusive<i64> = 65..=75;
/// Turnaround gap between consecutive departure slots (minutes, inclusive).
pub const ROUTE_GAP_MINUTES: RangeInclusive<i64> = 10..=15;
/// Share of daily passengers travelling in peak hours (percent).
pub const PEAK_PASSENGER_PERCENT: usize = 70;

/// A clock-time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: Time,
    /// Interval end (exclusive).
    pub end: Time,
}

impl TimeWindow {
    /// Creates a new time window.
    pub const fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Whether a clock time falls within this window.
    #[inline]
    pub fn contains(&self, t: Time) -> bool {
        t >= self.start && t < self.end
    }
}

/// Whether a clock time falls in a peak window.
pub fn is_peak(t: Time) -> bool {
    PEAK_WINDOWS.iter().any(|w| w.contains(t))
}

/// Whether a date is a Saturday or Sunday.
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Number of buses to staff for a slot departing at `t` on `date`.
///
/// Weekends ignore the peak distinction and always use the full fleet.
pub fn slot_demand(bus_count: usize, t: Time, date: Date) -> usize {
    if is_weekend(date) || is_peak(t) {
        bus_count
    } else {
        bus_count * (100 - PEAK_PASSENGER_PERCENT) / 100
    }
}

/// Draws a route duration uniformly from [`ROUTE_DURATION_MINUTES`].
pub fn draw_route_duration<R: Rng>(rng: &mut R) -> SignedDuration {
    SignedDuration::from_mins(rng.random_range(ROUTE_DURATION_MINUTES))
}

/// Draws a turnaround gap uniformly from [`ROUTE_GAP_MINUTES`].
pub fn draw_route_gap<R: Rng>(rng: &mut R) -> SignedDuration {
    SignedDuration::from_mins(rng.random_range(ROUTE_GAP_MINUTES))
}

/// One operating day anchored on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingDay {
    /// Target date.
    pub date: Date,
    /// First departure (06:00 on `date`).
    pub start: DateTime,
    /// Simulation boundary (23:59 on `date`).
    pub simulation_end: DateTime,
    /// End of the operating window (03:00 the next day, or `DateTime::MAX`
    /// when the next day is past the end of the calendar).
    pub window_end: DateTime,
}

impl OperatingDay {
    /// Creates the operating day for `date`.
    pub fn new(date: Date) -> Self {
        Self {
            date,
            start: date.to_datetime(OPERATION_START),
            simulation_end: date.to_datetime(SIMULATION_END),
            window_end: date
                .to_datetime(OPERATION_END)
                .checked_add(SignedDuration::from_hours(24))
                .unwrap_or(DateTime::MAX),
        }
    }

    /// Whether routes can be laid out on this day.
    ///
    /// Late routes end on the next day, so the last representable date
    /// has no schedulable window.
    pub fn is_schedulable(&self) -> bool {
        self.date.tomorrow().is_ok()
    }

    /// Whether the day is a weekend.
    pub fn is_weekend(&self) -> bool {
        is_weekend(self.date)
    }

    /// Demand for a slot departing at `at`.
    pub fn demand_at(&self, bus_count: usize, at: DateTime) -> usize {
        slot_demand(bus_count, at.time(), self.date)
    }

    /// Whether a route may start at `at` (strictly inside the operating window).
    pub fn contains_start(&self, at: DateTime) -> bool {
        at > self.start && at < self.window_end
    }
}
