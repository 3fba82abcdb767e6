//! `tti-output`: run output writers for the TTI intervention loop.
//!
//! | Backend | Files created                          |
//! |---------|----------------------------------------|
//! | CSV     | `day_reports.csv`, `run_summary.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`ReportObserver`], which implements `tti_sim::TtiObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tti_output::{CsvWriter, ReportObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use row::{DayReportRow, RunSummaryRow};
pub use writer::OutputWriter;
