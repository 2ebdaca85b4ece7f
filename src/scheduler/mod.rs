//! Schedule construction and comparison metrics.
//!
//! Provides the direct (greedy) allocator, the random schedule generator
//! and the metrics used to compare their output.
//!
//! # Algorithms
//!
//! Both allocators walk the operating day in departure slots starting at
//! 06:00 and fill each slot's demand one unit at a time. They differ only
//! in how a driver is picked:
//!
//! - `allocate_direct`: category A drivers in FIFO order, then the first
//!   category B driver.
//! - `generate_random`: a uniform draw from the combined pool.
//!
//! Neither allocator guarantees full coverage. Unfilled demand shows up as
//! a lower route count, not as an error.

mod direct;
mod metrics;
mod random;
mod request;
mod simulation;

pub use direct::allocate_direct;
pub use metrics::{compute_metrics, Comparison, ScheduleMetrics};
pub use random::generate_random;
pub use request::ScheduleRequest;
