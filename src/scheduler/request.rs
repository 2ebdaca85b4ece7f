//! Allocator input.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{Driver, DriverCategory, OperatingDay, SharedDriver};

/// Input container for one allocator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Fleet size.
    pub bus_count: usize,
    /// Number of category A drivers.
    pub driver_a_count: usize,
    /// Number of category B drivers.
    pub driver_b_count: usize,
    /// Target date.
    pub date: Date,
}

impl ScheduleRequest {
    /// Creates a new request.
    pub fn new(bus_count: usize, driver_a_count: usize, driver_b_count: usize, date: Date) -> Self {
        Self {
            bus_count,
            driver_a_count,
            driver_b_count,
            date,
        }
    }

    /// Operating day of the target date.
    pub fn day(&self) -> OperatingDay {
        OperatingDay::new(self.date)
    }

    /// Number of drivers requested for a category.
    pub fn driver_count(&self, category: DriverCategory) -> usize {
        match category {
            DriverCategory::A => self.driver_a_count,
            DriverCategory::B => self.driver_b_count,
        }
    }

    /// Creates fresh drivers for a category, numbered from 1.
    pub fn create_drivers(&self, category: DriverCategory) -> Vec<SharedDriver> {
        let start = self.day().start;
        (1..=self.driver_count(category))
            .map(|n| Driver::numbered(category, n, start).into_shared())
            .collect()
    }
}
