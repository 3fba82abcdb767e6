//! Plain data row types written by output backends.

use tti_sim::{DayReport, InterventionInterval};

/// One processed day, flattened for tabular output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayReportRow {
    pub day:                   u64,
    pub time:                  f64,
    pub exposures:             u64,
    pub infected:              u64,
    pub infected_fraction:     f64,
    pub intervention_active:   bool,
    pub testing_day:           bool,
    pub tested_symptomatic:    u64,
    pub positive_symptomatic:  u64,
    pub tested_traced:         u64,
    pub positive_traced:       u64,
    pub tested_random:         u64,
    pub positive_random:       u64,
    pub contacts_traced:       u64,
    /// Nodes queued for isolation today, all causes, groupmates included.
    pub isolations_queued:     u64,
    pub entered_isolation:     u64,
}

impl From<&DayReport> for DayReportRow {
    fn from(r: &DayReport) -> Self {
        let t = &r.testing;
        Self {
            day:                  r.day.0,
            time:                 r.time,
            exposures:            r.exposures_introduced,
            infected:             r.infected as u64,
            infected_fraction:    r.infected_fraction,
            intervention_active:  r.intervention_active,
            testing_day:          r.testing_day,
            tested_symptomatic:   t.symptomatic.tested as u64,
            positive_symptomatic: t.symptomatic.positive as u64,
            tested_traced:        t.traced.tested as u64,
            positive_traced:      t.traced.positive as u64,
            tested_random:        t.random.tested as u64,
            positive_random:      t.random.positive as u64,
            contacts_traced:      t.contacts_traced as u64,
            isolations_queued:    (r.isolation_symptomatic.total()
                + r.isolation_positive.total()
                + r.isolation_contact.total()) as u64,
            entered_isolation:    r.entered_isolation as u64,
        }
    }
}

/// Totals over the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummaryRow {
    /// Activation time; `None` when the gate never opened.
    pub intervention_start: Option<f64>,
    pub intervention_end:   f64,
    pub days:               u64,
    pub total_tested:       u64,
    pub total_positive:     u64,
    pub total_exposures:    u64,
}

impl RunSummaryRow {
    pub fn new(interval: &InterventionInterval) -> Self {
        Self {
            intervention_start: interval.start,
            intervention_end:   interval.end,
            days:               0,
            total_tested:       0,
            total_positive:     0,
            total_exposures:    0,
        }
    }

    pub fn duration(&self) -> f64 {
        InterventionInterval { start: self.intervention_start, end: self.intervention_end }
            .duration()
    }
}
