//! Driver model.
//!
//! Drivers come in two categories with different duty rules:
//!
//! | Category | Shift cap | Breaks |
//! |----------|-----------|--------|
//! | A | 8 h of route work | lunch allowance (not enforced) |
//! | B | 12 h (not enforced) | 40 min after 120 min on duty |
//!
//! A driver's day is an ordered list of [`ShiftEntry`] segments.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use jiff::civil::DateTime;
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use super::Route;

/// Route work cap for category A.
pub const DRIVER_A_MAX_WORK: SignedDuration = SignedDuration::from_hours(8);
/// Lunch allowance for category A.
pub const DRIVER_A_LUNCH: SignedDuration = SignedDuration::from_mins(60);
/// Shift cap for category B.
pub const DRIVER_B_MAX_WORK: SignedDuration = SignedDuration::from_hours(12);
/// On-duty time after which a category B driver is due a break.
pub const DRIVER_B_BREAK_PERIOD: SignedDuration = SignedDuration::from_mins(120);
/// Length of a category B break.
pub const DRIVER_B_EXTENDED_BREAK: SignedDuration = SignedDuration::from_mins(40);

/// A driver handle shared between schedules.
///
/// Crossover splices driver lists, so one driver may sit in several
/// schedules at once. Mutating it through one handle is visible in all.
pub type SharedDriver = Rc<RefCell<Driver>>;

/// Driver category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverCategory {
    /// Single 8-hour shift.
    A,
    /// 12-hour shift with mandatory breaks.
    B,
}

impl DriverCategory {
    /// All categories, in allocation preference order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Prefix used in driver IDs.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Nominal shift length: route cap plus lunch for A, the full shift for B.
    pub fn shift_length(self) -> SignedDuration {
        match self {
            Self::A => DRIVER_A_MAX_WORK + DRIVER_A_LUNCH,
            Self::B => DRIVER_B_MAX_WORK,
        }
    }
}

impl fmt::Display for DriverCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// One segment of a driver's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShiftEntry {
    /// Driving a route.
    Route { start: DateTime, end: DateTime },
    /// Resting.
    Break { start: DateTime, end: DateTime },
}

impl ShiftEntry {
    /// Segment start.
    pub fn start(&self) -> DateTime {
        match *self {
            Self::Route { start, .. } | Self::Break { start, .. } => start,
        }
    }

    /// Segment end.
    pub fn end(&self) -> DateTime {
        match *self {
            Self::Route { end, .. } | Self::Break { end, .. } => end,
        }
    }

    /// Segment length.
    pub fn duration(&self) -> SignedDuration {
        self.end().duration_since(self.start())
    }

    /// Whether this is a break segment.
    pub fn is_break(&self) -> bool {
        matches!(self, Self::Break { .. })
    }
}

/// A bus driver and their accumulated duty for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Identifier, unique within a run (e.g. "A3").
    pub id: String,
    /// Duty category.
    pub category: DriverCategory,
    /// Sum of route segment durations.
    pub total_work: SignedDuration,
    /// Sum of break segment durations.
    pub break_time: SignedDuration,
    /// End of the last break (operating-day start if none taken).
    pub last_break_end: DateTime,
    /// Route and break segments in insertion order.
    pub shifts: Vec<ShiftEntry>,
}

impl Driver {
    /// Creates an idle driver whose break clock starts at `day_start`.
    pub fn new(id: impl Into<String>, category: DriverCategory, day_start: DateTime) -> Self {
        Self {
            id: id.into(),
            category,
            total_work: SignedDuration::ZERO,
            break_time: SignedDuration::ZERO,
            last_break_end: day_start,
            shifts: Vec::new(),
        }
    }

    /// Creates the `n`-th (1-based) driver of a category, e.g. "B2".
    pub fn numbered(category: DriverCategory, n: usize, day_start: DateTime) -> Self {
        Self::new(format!("{}{n}", category.prefix()), category, day_start)
    }

    /// Wraps the driver in a shared handle.
    pub fn into_shared(self) -> SharedDriver {
        Rc::new(RefCell::new(self))
    }

    /// Route work plus breaks.
    pub fn on_duty(&self) -> SignedDuration {
        self.total_work + self.break_time
    }

    /// Whether a route of `duration` keeps a category A driver within the cap.
    ///
    /// Category B drivers are never capped during allocation.
    pub fn fits_route(&self, duration: SignedDuration) -> bool {
        match self.category {
            DriverCategory::A => self.total_work + duration <= DRIVER_A_MAX_WORK,
            DriverCategory::B => true,
        }
    }

    /// Whether a break is due at `now`.
    ///
    /// Requires both 120 minutes on duty and 120 minutes since the last break ended.
    pub fn is_break_due(&self, now: DateTime) -> bool {
        self.on_duty() >= DRIVER_B_BREAK_PERIOD
            && self.last_break_end <= now - DRIVER_B_BREAK_PERIOD
    }

    /// Records a driven route.
    pub fn assign_route(&mut self, route: &Route) {
        self.shifts.push(ShiftEntry::Route {
            start: route.start(),
            end: route.end(),
        });
        self.total_work += route.duration();
    }

    /// Records a 40-minute break starting at `start` and returns it.
    pub fn take_break(&mut self, start: DateTime) -> ShiftEntry {
        let end = start + DRIVER_B_EXTENDED_BREAK;
        let entry = ShiftEntry::Break { start, end };
        self.shifts.push(entry);
        self.break_time += DRIVER_B_EXTENDED_BREAK;
        self.last_break_end = end;
        entry
    }

    /// Number of route segments.
    pub fn route_count(&self) -> usize {
        self.shifts.iter().filter(|s| !s.is_break()).count()
    }

    /// Break segments in order.
    pub fn breaks(&self) -> impl Iterator<Item = &ShiftEntry> {
        self.shifts.iter().filter(|s| s.is_break())
    }

    /// Whether the driver has no segments.
    pub fn is_idle(&self) -> bool {
        self.shifts.is_empty()
    }
}
