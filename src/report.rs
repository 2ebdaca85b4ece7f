//! Schedule export and comparison reports.
//!
//! # Schedule CSV
//!
//! | Column | Content |
//! |--------|---------|
//! | `Algorithm` | `Straight` or `Genetic` |
//! | `BusDriver ID` | driver ID |
//! | `BusSchedule` | segments joined with `", "` |
//!
//! Each segment renders as `Route: 2024-05-06 06:00-2024-05-06 07:10`
//! (or `Break: ...`). One row per driver listed in the schedule, in order.
//!
//! # Comparison CSV
//!
//! Header `Metric,Straight Algorithm,Genetic Algorithm` followed by the
//! three rows of [`Comparison::rows`].

use std::fmt;
use std::io::{self, Write};

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::{Schedule, ShiftEntry};
use crate::scheduler::Comparison;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const TIME_FORMAT: &str = "%H:%M";

/// Algorithm that produced a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmLabel {
    /// Direct allocator.
    Straight,
    /// Genetic optimizer.
    Genetic,
}

impl fmt::Display for AlgorithmLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straight => f.write_str("Straight"),
            Self::Genetic => f.write_str("Genetic"),
        }
    }
}

/// One exported row: a driver's day under one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Producing algorithm.
    pub algorithm: AlgorithmLabel,
    /// Driver ID.
    pub driver_id: String,
    /// Segments in insertion order.
    pub segments: Vec<ShiftEntry>,
}

impl ExportRecord {
    /// Segments rendered with full date and time.
    pub fn schedule_text(&self) -> String {
        render_segments(&self.segments, DATE_TIME_FORMAT)
    }
}

/// Per-driver summary with times of day and minute totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSummary {
    /// Producing algorithm.
    pub algorithm: AlgorithmLabel,
    /// Driver ID.
    pub driver_id: String,
    /// Segments rendered as `HH:MM-HH:MM`.
    pub shifts: String,
    /// Minutes spent on routes.
    pub work_minutes: i64,
    /// Minutes spent on breaks.
    pub break_minutes: i64,
}

impl From<&ExportRecord> for DriverSummary {
    fn from(record: &ExportRecord) -> Self {
        let mut work_minutes = 0;
        let mut break_minutes = 0;
        for segment in &record.segments {
            let minutes = segment.duration().as_mins();
            if segment.is_break() {
                break_minutes += minutes;
            } else {
                work_minutes += minutes;
            }
        }
        Self {
            algorithm: record.algorithm,
            driver_id: record.driver_id.clone(),
            shifts: render_segments(&record.segments, TIME_FORMAT),
            work_minutes,
            break_minutes,
        }
    }
}

/// Builds one record per driver in `schedule`.
pub fn export_records(schedule: &Schedule, algorithm: AlgorithmLabel) -> Vec<ExportRecord> {
    schedule
        .drivers
        .iter()
        .map(|driver| {
            let driver = driver.borrow();
            ExportRecord {
                algorithm,
                driver_id: driver.id.clone(),
                segments: driver.shifts.clone(),
            }
        })
        .collect()
}

/// Records for both algorithms, straight first.
pub fn comparison_records(straight: &Schedule, genetic: &Schedule) -> Vec<ExportRecord> {
    let mut records = export_records(straight, AlgorithmLabel::Straight);
    records.extend(export_records(genetic, AlgorithmLabel::Genetic));
    records
}

/// Driver summaries for both algorithms, straight first.
pub fn driver_summaries(straight: &Schedule, genetic: &Schedule) -> Vec<DriverSummary> {
    comparison_records(straight, genetic)
        .iter()
        .map(DriverSummary::from)
        .collect()
}

/// Renders one segment, e.g. `Break: 08:00-08:40`.
pub fn render_segment(segment: &ShiftEntry, format: &str) -> String {
    let label = if segment.is_break() { "Break" } else { "Route" };
    format!(
        "{label}: {}-{}",
        strftime(segment.start(), format),
        strftime(segment.end(), format)
    )
}

fn render_segments(segments: &[ShiftEntry], format: &str) -> String {
    segments
        .iter()
        .map(|s| render_segment(s, format))
        .collect::<Vec<_>>()
        .join(", ")
}

fn strftime(at: DateTime, format: &str) -> String {
    at.strftime(format).to_string()
}

/// Quotes a CSV field if it contains a separator, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{line}")
}

/// Writes both schedules as CSV.
pub fn write_schedule_csv<W: Write>(
    writer: &mut W,
    straight: &Schedule,
    genetic: &Schedule,
) -> io::Result<()> {
    write_row(writer, &["Algorithm", "BusDriver ID", "BusSchedule"])?;
    for record in comparison_records(straight, genetic) {
        let algorithm = record.algorithm.to_string();
        let text = record.schedule_text();
        write_row(writer, &[algorithm.as_str(), record.driver_id.as_str(), text.as_str()])?;
    }
    Ok(())
}

/// Writes the metric comparison as CSV.
pub fn write_comparison_csv<W: Write>(writer: &mut W, comparison: &Comparison) -> io::Result<()> {
    write_row(writer, &["Metric", "Straight Algorithm", "Genetic Algorithm"])?;
    for (metric, straight, genetic) in comparison.rows() {
        let (straight, genetic) = (straight.to_string(), genetic.to_string());
        write_row(writer, &[metric, straight.as_str(), genetic.as_str()])?;
    }
    Ok(())
}
