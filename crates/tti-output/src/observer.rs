//! `ReportObserver<W>` bridges `TtiObserver` to an `OutputWriter`.

use tti_sim::{DayReport, InterventionInterval, TtiObserver};

use crate::row::{DayReportRow, RunSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`TtiObserver`] that writes one row per processed day and a summary
/// row at the end of the run to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: OutputWriter> {
    writer:     W,
    totals:     Totals,
    last_error: Option<OutputError>,
}

#[derive(Default)]
struct Totals {
    days:      u64,
    tested:    u64,
    positive:  u64,
    exposures: u64,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, totals: Totals::default(), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> TtiObserver for ReportObserver<W> {
    fn on_day_end(&mut self, report: &DayReport) {
        let tested = report.tested();
        self.totals.days += 1;
        self.totals.tested += tested.tested as u64;
        self.totals.positive += tested.positive as u64;
        self.totals.exposures += report.exposures_introduced;

        let result = self.writer.write_day(&DayReportRow::from(report));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, interval: &InterventionInterval) {
        let row = RunSummaryRow {
            days:            self.totals.days,
            total_tested:    self.totals.tested,
            total_positive:  self.totals.positive,
            total_exposures: self.totals.exposures,
            ..RunSummaryRow::new(interval)
        };
        let result = self.writer.write_summary(&row);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
