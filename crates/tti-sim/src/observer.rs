//! Simulation observer trait for progress reporting and data collection.

use tti_core::SimDay;

use crate::{DayReport, InterventionInterval};

/// Callbacks invoked by [`TtiSim::run`][crate::TtiSim::run] at each day
/// boundary.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: cancel after a budget of days
///
/// ```rust,ignore
/// struct Budget { last: SimDay }
///
/// impl TtiObserver for Budget {
///     fn should_stop(&mut self, report: &DayReport) -> bool {
///         report.day >= self.last
///     }
/// }
/// ```
pub trait TtiObserver {
    /// Called when the model enters a new day, before any processing.
    fn on_day_start(&mut self, _day: SimDay) {}

    /// Called once the day's processing is complete.
    fn on_day_end(&mut self, _report: &DayReport) {}

    /// Cooperative cancellation, checked between days.  Returning `true`
    /// ends the run with the interval reached so far.
    fn should_stop(&mut self, _report: &DayReport) -> bool {
        false
    }

    /// Called once after the loop exits, normally or by cancellation.
    fn on_sim_end(&mut self, _interval: &InterventionInterval) {}
}

/// A [`TtiObserver`] that does nothing.
pub struct NoopObserver;

impl TtiObserver for NoopObserver {}

/// Collects every [`DayReport`] in memory.
#[derive(Default)]
pub struct CollectingObserver {
    pub reports:  Vec<DayReport>,
    pub interval: Option<InterventionInterval>,
}

impl TtiObserver for CollectingObserver {
    fn on_day_end(&mut self, report: &DayReport) {
        self.reports.push(report.clone());
    }

    fn on_sim_end(&mut self, interval: &InterventionInterval) {
        self.interval = Some(*interval);
    }
}
