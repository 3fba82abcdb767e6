//! Per-day counters and the run's result interval.

use tti_core::SimDay;
use tti_policy::{RouteTally, TestingReport};

/// Nodes queued for isolation today, split into the triggering nodes and
/// their groupmates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IsolationTally {
    pub individuals: usize,
    pub groupmates:  usize,
}

impl IsolationTally {
    pub fn total(&self) -> usize {
        self.individuals + self.groupmates
    }
}

/// Everything that happened on one processed day.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayReport {
    pub day:                  SimDay,
    /// Model time at which the day was processed.
    pub time:                 f64,
    pub exposures_introduced: u64,
    pub infected:             usize,
    pub infected_fraction:    f64,
    pub intervention_active:  bool,
    /// Whether today was a scheduled (traced / random) testing day.
    pub testing_day:          bool,
    pub testing:              TestingReport,
    pub isolation_symptomatic: IsolationTally,
    pub isolation_positive:    IsolationTally,
    pub isolation_contact:     IsolationTally,
    /// Isolation calls released from the three queues today.
    pub entered_isolation:    usize,
}

impl DayReport {
    pub fn tested(&self) -> RouteTally {
        self.testing.total()
    }
}

/// `[activation, end]` of the enforced intervention.
///
/// `start` is `None` when the gate never opened.  `end` is the model time at
/// which the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterventionInterval {
    pub start: Option<f64>,
    pub end:   f64,
}

impl InterventionInterval {
    /// Length of the intervention, zero if it never started.
    pub fn duration(&self) -> f64 {
        self.start.map_or(0.0, |s| (self.end - s).max(0.0))
    }
}
