//! The `OutputWriter` trait implemented by backend writers.

use crate::{DayReportRow, OutputResult, RunSummaryRow};

/// Sink for per-day rows and the end-of-run summary.
///
/// Errors surface through [`ReportObserver::take_error`][crate::ReportObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write one processed day.
    fn write_day(&mut self, row: &DayReportRow) -> OutputResult<()>;

    /// Write the run summary.  Called once, after the last day.
    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.  Safe to call twice.
    fn finish(&mut self) -> OutputResult<()>;
}
