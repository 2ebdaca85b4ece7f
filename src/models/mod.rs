//! Rostering domain models.
//!
//! Provides the data types shared by both allocators and the genetic
//! optimizer.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Driver` | A driver of category A or B and their day's segments |
//! | `Route` | One departure driven by one driver |
//! | `Schedule` | All routes of a run plus the drivers it considered |
//! | `OperatingDay` | The target date with its 06:00–03:00 window |

pub mod calendar;
mod driver;
mod route;
mod schedule;

pub use calendar::{is_peak, is_weekend, slot_demand, OperatingDay, TimeWindow};
pub use driver::{
    Driver, DriverCategory, SharedDriver, ShiftEntry, DRIVER_A_LUNCH, DRIVER_A_MAX_WORK,
    DRIVER_B_BREAK_PERIOD, DRIVER_B_EXTENDED_BREAK, DRIVER_B_MAX_WORK,
};
pub use route::Route;
pub use schedule::Schedule;
