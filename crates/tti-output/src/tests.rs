//! Integration tests for tti-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{DayReportRow, RunSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn day_row(day: u64) -> DayReportRow {
        DayReportRow {
            day,
            time:                 day as f64,
            exposures:            1,
            infected:             10,
            infected_fraction:    0.1,
            intervention_active:  true,
            testing_day:          day % 7 == 0,
            tested_symptomatic:   3,
            positive_symptomatic: 2,
            tested_traced:        4,
            positive_traced:      1,
            tested_random:        5,
            positive_random:      0,
            contacts_traced:      6,
            isolations_queued:    7,
            entered_isolation:    8,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("day_reports.csv").exists());
        assert!(dir.path().join("run_summary.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("day_reports.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers.len(), 16);
        assert_eq!(headers[0], "day");
        assert_eq!(headers[15], "entered_isolation");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("run_summary.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2[..3], ["intervention_start", "intervention_end", "intervention_duration"]);
    }

    #[test]
    fn day_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        for day in [3, 4, 5] {
            w.write_day(&day_row(day)).unwrap();
        }
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("day_reports.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[2][0], "5");
        assert_eq!(&rows[0][5], "1"); // intervention_active
        assert_eq!(&rows[0][6], "0"); // testing_day
        assert_eq!(&rows[0][13], "6"); // contacts_traced
    }

    #[test]
    fn summary_without_start_leaves_cell_empty() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = RunSummaryRow {
            intervention_start: None,
            intervention_end:   42.0,
            days:               42,
            total_tested:       0,
            total_positive:     0,
            total_exposures:    3,
        };
        w.write_summary(&row).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("run_summary.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][0], "");
        assert_eq!(&rows[0][1], "42");
        assert_eq!(&rows[0][2], "0"); // duration
        assert_eq!(&rows[0][6], "3");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;
    use tti_core::{EpidemicModel, HealthState, NodeId};
    use tti_sim::{TtiConfig, TtiSimBuilder};

    use crate::row::{DayReportRow, RunSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputError, OutputResult, ReportObserver};

    /// Every node infectious and symptomatic from the start; time steps by
    /// one day.
    struct SickModel {
        t:        f64,
        tmax:     f64,
        tested:   Vec<bool>,
        positive: Vec<bool>,
    }

    impl SickModel {
        fn new(n: usize) -> Self {
            Self { t: 0.0, tmax: 0.0, tested: vec![false; n], positive: vec![false; n] }
        }
    }

    impl EpidemicModel for SickModel {
        fn time(&self) -> f64 { self.t }
        fn set_horizon(&mut self, tmax: f64) { self.tmax = tmax; }
        fn run_iteration(&mut self) -> bool {
            self.t += 1.0;
            self.t < self.tmax
        }
        fn node_count(&self) -> usize { self.tested.len() }
        fn state(&self, _node: NodeId) -> HealthState { HealthState::ISym }
        fn is_tested(&self, node: NodeId) -> bool { self.tested[node.index()] }
        fn tested_in_current_state(&self, node: NodeId) -> bool { self.tested[node.index()] }
        fn is_positive(&self, node: NodeId) -> bool { self.positive[node.index()] }
        fn time_in_state(&self, _node: NodeId) -> f64 { self.t }
        fn degree(&self, _node: NodeId) -> f64 { 1.0 }
        fn contacts(&self, _node: NodeId) -> Vec<NodeId> { Vec::new() }
        fn total_infected(&self) -> usize { self.tested.len() }
        fn set_tested(&mut self, node: NodeId, tested: bool) { self.tested[node.index()] = tested; }
        fn set_positive(&mut self, node: NodeId, positive: bool) {
            self.positive[node.index()] = positive;
        }
        fn set_isolation(&mut self, _node: NodeId, _isolate: bool) {}
        fn introduce_exposures(&mut self, _count: u64) {}
    }

    #[derive(Default)]
    struct MemoryWriter {
        days:     Vec<DayReportRow>,
        summary:  Option<RunSummaryRow>,
        finished: usize,
    }

    impl OutputWriter for MemoryWriter {
        fn write_day(&mut self, row: &DayReportRow) -> OutputResult<()> {
            self.days.push(*row);
            Ok(())
        }
        fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
            self.summary = Some(*row);
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Fails every day write with a distinct message.
    #[derive(Default)]
    struct FailingWriter {
        attempts: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_day(&mut self, _row: &DayReportRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.attempts))))
        }
        fn write_summary(&mut self, _row: &RunSummaryRow) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn config() -> TtiConfig {
        TtiConfig { horizon: 5.0, seed: 3, ..Default::default() }
    }

    #[test]
    fn one_row_per_day_and_a_summary() {
        let mut sim = TtiSimBuilder::new(config(), SickModel::new(4)).build().unwrap();
        let mut obs = ReportObserver::new(MemoryWriter::default());
        let interval = sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        let days: Vec<u64> = writer.days.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);
        assert_eq!(writer.finished, 1);

        let summary = writer.summary.unwrap();
        assert_eq!(summary.days, 5);
        assert_eq!(summary.intervention_start, interval.start);
        assert_eq!(summary.intervention_end, 5.0);
        assert_eq!(summary.total_tested, 0); // nobody complies with testing
    }

    #[test]
    fn first_error_kept() {
        let mut sim = TtiSimBuilder::new(config(), SickModel::new(4)).build().unwrap();
        let mut obs = ReportObserver::new(FailingWriter::default());
        sim.run(&mut obs);

        let err = obs.take_error().expect("writes failed");
        assert!(err.to_string().contains("write 1"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 5);
    }

    #[test]
    fn csv_end_to_end() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut sim = TtiSimBuilder::new(config(), SickModel::new(4)).build().unwrap();
        let mut obs = ReportObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("day_reports.csv")).unwrap();
        assert_eq!(rdr.records().count(), 5);
        let mut rdr = csv::Reader::from_path(dir.path().join("run_summary.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "1"); // gate opens on the first day
        assert_eq!(&rows[0][1], "5");
    }
}
