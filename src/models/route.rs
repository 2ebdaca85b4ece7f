//! Route (departure) model.
//!
//! A route is one bus departure driven by one driver. Routes are
//! immutable: rescheduling builds a new route instead of editing one.

use jiff::civil::DateTime;
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use super::calendar;

/// A single driven route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    start: DateTime,
    end: DateTime,
    driver_id: String,
}

impl Route {
    /// Creates a route of `duration` starting at `start`.
    pub fn new(start: DateTime, duration: SignedDuration, driver_id: impl Into<String>) -> Self {
        Self {
            start,
            end: start + duration,
            driver_id: driver_id.into(),
        }
    }

    /// Departure time.
    #[inline]
    pub fn start(&self) -> DateTime {
        self.start
    }

    /// Arrival time.
    #[inline]
    pub fn end(&self) -> DateTime {
        self.end
    }

    /// Assigned driver ID.
    pub fn driver_id(&self) -> &str {
        &self.driver_id
    }

    /// Route length.
    #[inline]
    pub fn duration(&self) -> SignedDuration {
        self.end.duration_since(self.start)
    }

    /// Whether the departure falls in a peak window.
    pub fn starts_in_peak(&self) -> bool {
        calendar::is_peak(self.start.time())
    }

    /// Builds a replacement route for the same driver.
    pub fn rescheduled(&self, start: DateTime, duration: SignedDuration) -> Self {
        Self::new(start, duration, self.driver_id.clone())
    }
}
