//! Schedule (solution) model.
//!
//! A schedule is the set of routes produced by one allocator run together
//! with the drivers that run considered.
//!
//! # Sharing
//! Routes and drivers are held by `Rc`. Cloning a schedule is shallow:
//! the clone shares every route and driver with the original. The genetic
//! optimizer relies on this when splicing parents into children.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{Route, SharedDriver};

/// A complete day schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Routes in insertion order.
    pub routes: Vec<Rc<Route>>,
    /// Drivers in insertion order (may repeat after crossover).
    pub drivers: Vec<SharedDriver>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route and returns the shared handle.
    pub fn add_route(&mut self, route: Route) -> Rc<Route> {
        let route = Rc::new(route);
        self.routes.push(Rc::clone(&route));
        route
    }

    /// Adds a driver.
    pub fn add_driver(&mut self, driver: SharedDriver) {
        self.drivers.push(driver);
    }

    /// Number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes departing in a peak window.
    pub fn peak_route_count(&self) -> usize {
        self.routes.iter().filter(|r| r.starts_in_peak()).count()
    }

    /// Number of driver entries.
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Finds a driver by ID.
    pub fn driver(&self, id: &str) -> Option<&SharedDriver> {
        self.drivers.iter().find(|d| d.borrow().id == id)
    }

    /// Returns all routes driven by a given driver.
    pub fn routes_for_driver(&self, driver_id: &str) -> Vec<&Rc<Route>> {
        self.routes
            .iter()
            .filter(|r| r.driver_id() == driver_id)
            .collect()
    }

    /// Whether the schedule has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
