//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `day_reports.csv`
//! - `run_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DayReportRow, OutputResult, RunSummaryRow};

const DAY_HEADER: [&str; 16] = [
    "day",
    "time",
    "exposures",
    "infected",
    "infected_fraction",
    "intervention_active",
    "testing_day",
    "tested_symptomatic",
    "positive_symptomatic",
    "tested_traced",
    "positive_traced",
    "tested_random",
    "positive_random",
    "contacts_traced",
    "isolations_queued",
    "entered_isolation",
];

const SUMMARY_HEADER: [&str; 7] = [
    "intervention_start",
    "intervention_end",
    "intervention_duration",
    "days",
    "total_tested",
    "total_positive",
    "total_exposures",
];

/// Writes run output to two CSV files.
pub struct CsvWriter {
    days:     Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut days = Writer::from_path(dir.join("day_reports.csv"))?;
        days.write_record(DAY_HEADER)?;

        let mut summary = Writer::from_path(dir.join("run_summary.csv"))?;
        summary.write_record(SUMMARY_HEADER)?;

        Ok(Self { days, summary, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_day(&mut self, row: &DayReportRow) -> OutputResult<()> {
        self.days.write_record(&[
            row.day.to_string(),
            row.time.to_string(),
            row.exposures.to_string(),
            row.infected.to_string(),
            row.infected_fraction.to_string(),
            (row.intervention_active as u8).to_string(),
            (row.testing_day as u8).to_string(),
            row.tested_symptomatic.to_string(),
            row.positive_symptomatic.to_string(),
            row.tested_traced.to_string(),
            row.positive_traced.to_string(),
            row.tested_random.to_string(),
            row.positive_random.to_string(),
            row.contacts_traced.to_string(),
            row.isolations_queued.to_string(),
            row.entered_isolation.to_string(),
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        // Empty start cell: interventions never began.
        let start = row.intervention_start.map(|s| s.to_string()).unwrap_or_default();
        self.summary.write_record(&[
            start,
            row.intervention_end.to_string(),
            row.duration().to_string(),
            row.days.to_string(),
            row.total_tested.to_string(),
            row.total_positive.to_string(),
            row.total_exposures.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.days.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
