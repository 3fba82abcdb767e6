//! The `TtiSim` struct and its day loop.

use tracing::{debug, info};
use tti_core::{DayTracker, EpidemicModel, HealthState, NodeId, SimDay, SimRng};
use tti_policy::{
    ComplianceSet, DelayQueue, ExposureInjector, InterventionGate, IsolationCause,
    IsolationGroups, IsolationPropagator, TestExecutionEngine, TestSelectionPolicy,
    TestingSchedule, TracingPool,
};

use crate::{DayReport, InterventionInterval, IsolationTally, TtiConfig, TtiObserver};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Where the loop is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    /// `run` has not been called yet.
    NotStarted,
    /// Running; the infected fraction has not reached the threshold.
    InterventionInactive,
    /// Running with interventions enforced.  Never reverts.
    InterventionActive,
    /// The model stopped, or an observer cancelled the run.
    Finished,
}

// ── TtiSim ────────────────────────────────────────────────────────────────────

/// The intervention loop.
///
/// `TtiSim<M>` owns the external model for the duration of the run and
/// drives it one iteration at a time.  On each new simulated day it runs,
/// strictly in this order:
///
/// 1. **Exposures**: draw a Poisson count and introduce it into the model.
/// 2. **Gate**: compare the infected fraction with the threshold; the rest
///    only runs once the gate has opened.
/// 3. **Isolation without a test**: symptomatic nodes and the contacts due
///    from the tracing queue (with their groupmates) join today's
///    isolation slots.
/// 4. **Selection**: symptomatic, traced and random tests under capacity.
/// 5. **Execution**: false-negative draws, positives into the isolation and
///    tracing slots.
/// 6. **Delayed effects**: the symptomatic, contact and positive isolation
///    queues release their due slots to the model; today's traces enter the
///    tracing queue.
///
/// Create via [`TtiSimBuilder`][crate::TtiSimBuilder].
pub struct TtiSim<M: EpidemicModel> {
    pub config: TtiConfig,

    /// The external model.  Query it freely between runs.
    pub model: M,

    pub(crate) rng:      SimRng,
    pub(crate) days:     DayTracker,
    pub(crate) phase:    Phase,
    pub(crate) schedule: TestingSchedule,

    pub(crate) compliance: ComplianceSet,
    pub(crate) groups:     Option<IsolationGroups>,

    pub(crate) exposure:  ExposureInjector,
    pub(crate) gate:      InterventionGate,
    pub(crate) selection: TestSelectionPolicy,
    pub(crate) engine:    TestExecutionEngine,

    /// Contacts of positives, released after the tracing lag.
    pub(crate) tracing_queue: DelayQueue<NodeId>,
    /// Released contacts awaiting a testing day.
    pub(crate) tracing_pool:  TracingPool,

    pub(crate) isolation_symptomatic: DelayQueue<NodeId>,
    pub(crate) isolation_positive:    DelayQueue<NodeId>,
    pub(crate) isolation_contact:     DelayQueue<NodeId>,
}

impl<M: EpidemicModel> TtiSim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the model reports no more steps, or until the observer
    /// cancels.  Returns the interval during which interventions were
    /// enforced.
    pub fn run<O: TtiObserver>(&mut self, observer: &mut O) -> InterventionInterval {
        self.model.set_horizon(self.config.horizon);
        self.phase = Phase::InterventionInactive;

        loop {
            let more = self.model.run_iteration();

            if let Some(day) = self.days.enter(self.model.time()) {
                observer.on_day_start(day);
                let report = self.process_day(day);
                observer.on_day_end(&report);
                if observer.should_stop(&report) {
                    info!("run cancelled by observer at {day}");
                    break;
                }
            }

            if !more {
                break;
            }
        }

        self.phase = Phase::Finished;
        let interval = self.interval();
        observer.on_sim_end(&interval);
        interval
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The intervention interval as of now.
    pub fn interval(&self) -> InterventionInterval {
        InterventionInterval {
            start: self.gate.activation_time(),
            end:   self.model.time(),
        }
    }

    /// The tracing delay queue (read-only).
    pub fn tracing_queue(&self) -> &DelayQueue<NodeId> {
        &self.tracing_queue
    }

    /// The isolation queue for `cause` (read-only).
    pub fn isolation_queue(&self, cause: IsolationCause) -> &DelayQueue<NodeId> {
        match cause {
            IsolationCause::Symptomatic => &self.isolation_symptomatic,
            IsolationCause::Positive => &self.isolation_positive,
            IsolationCause::Contact => &self.isolation_contact,
        }
    }

    /// Traced nodes released but not yet consumed by a testing day.
    pub fn tracing_pool(&self) -> &TracingPool {
        &self.tracing_pool
    }

    // ── Core day processing ───────────────────────────────────────────────

    fn process_day(&mut self, day: SimDay) -> DayReport {
        let now = self.model.time();
        let mut report = DayReport { day, time: now, ..Default::default() };

        // ── Phase 1: exogenous exposures ──────────────────────────────────
        report.exposures_introduced = self.exposure.inject(&mut self.model, &mut self.rng);
        if report.exposures_introduced > 0 {
            info!("new exposure @ t = {now:.2} ({} exposed)", report.exposures_introduced);
        }

        // ── Phase 2: gate ─────────────────────────────────────────────────
        let node_count = self.model.node_count();
        report.infected = self.model.total_infected();
        report.infected_fraction = if node_count == 0 {
            0.0
        } else {
            report.infected as f64 / node_count as f64
        };
        let was_active = self.gate.is_active();
        report.intervention_active = self.gate.observe(now, report.infected_fraction);
        if !report.intervention_active {
            return report;
        }
        if !was_active {
            info!(
                "interventions start @ t = {now:.2} ({} ({:.2}%) infected)",
                report.infected,
                report.infected_fraction * 100.0,
            );
            self.phase = Phase::InterventionActive;
        }

        // ── Phase 3: isolation without a test ─────────────────────────────
        //
        // A zero-lag tracing queue is empty here; its traces were released
        // at the end of the day they were produced.
        let due_traces = self.tracing_queue.pop_front();
        let (symptomatic_slot, symptomatic_tally) = self.isolate_symptomatic();
        let (contact_slot, contact_tally) = self.isolate_contacts(&due_traces);
        report.isolation_symptomatic = symptomatic_tally;
        report.isolation_contact = contact_tally;
        self.tracing_pool.absorb(due_traces);

        // ── Phase 4: selection ────────────────────────────────────────────
        report.testing_day = self.schedule.is_testing_day(now);
        let selection = self.selection.select(
            &self.model,
            &self.compliance,
            &mut self.tracing_pool,
            report.testing_day,
            &mut self.rng,
        );

        // ── Phase 5: execution ────────────────────────────────────────────
        let execution = self.engine.execute(
            &mut self.model,
            &selection,
            &self.compliance,
            self.groups.as_ref(),
            &mut self.rng,
        );
        report.isolation_positive = IsolationTally {
            individuals: execution.report.positive_isolating,
            groupmates:  execution.report.positive_groupmates,
        };
        report.testing = execution.report;

        // ── Phase 6: delayed effects ──────────────────────────────────────
        //
        // Tracing first: with a zero lag today's traces are released now,
        // join today's contact isolation and wait in the pool for the next
        // testing day.  Then symptomatic, contact, positive: each queue takes
        // today's slot and releases the one due today.
        let mut contact_slot = contact_slot;
        if self.tracing_queue.lag() == 0 {
            let released = self.tracing_queue.advance(execution.new_traces);
            let (slot, tally) = self.isolate_contacts(&released);
            contact_slot.extend(slot);
            report.isolation_contact.individuals += tally.individuals;
            report.isolation_contact.groupmates += tally.groupmates;
            self.tracing_pool.absorb(released);
        } else {
            self.tracing_queue.push_back(execution.new_traces);
        }

        let released = self.isolation_symptomatic.advance(symptomatic_slot);
        for &node in &released {
            // Applied twice on this path; set_isolation is idempotent.
            self.model.set_isolation(node, true);
            self.model.set_isolation(node, true);
        }
        report.entered_isolation += released.len();
        debug!("{day}: {} released from symptomatic isolation queue", released.len());

        let released = self.isolation_contact.advance(contact_slot);
        for &node in &released {
            self.model.set_isolation(node, true);
        }
        report.entered_isolation += released.len();
        debug!("{day}: {} released from contact isolation queue", released.len());

        let released = self.isolation_positive.advance(execution.positive_isolation);
        for &node in &released {
            self.model.set_isolation(node, true);
        }
        report.entered_isolation += released.len();
        debug!("{day}: {} released from positive isolation queue", released.len());

        log_day(&report);
        report
    }

    /// Symptomatic nodes (and groupmates) self-isolating without a test.
    fn isolate_symptomatic(&self) -> (Vec<NodeId>, IsolationTally) {
        let propagator = IsolationPropagator::new(
            IsolationCause::Symptomatic,
            &self.compliance.isolation_symptomatic_individual,
            &self.compliance.isolation_symptomatic_groupmate,
            self.groups.as_ref(),
        );
        let mut slot = Vec::new();
        let mut tally = IsolationTally::default();
        if !self.compliance.isolation_symptomatic_individual.is_enabled() {
            return (slot, tally);
        }

        for node in NodeId::all(self.model.node_count()) {
            if self.model.state(node) != HealthState::ISym {
                continue;
            }
            let expansion = propagator.expand(node, true);
            tally.individuals += expansion.individual.is_some() as usize;
            tally.groupmates += expansion.groupmates.len();
            expansion.drain_into(&mut slot);
        }
        (slot, tally)
    }

    /// Contacts due from the tracing queue (and their groupmates)
    /// self-isolating without a test.
    fn isolate_contacts(&self, due: &[NodeId]) -> (Vec<NodeId>, IsolationTally) {
        let propagator = IsolationPropagator::new(
            IsolationCause::Contact,
            &self.compliance.isolation_contact_individual,
            &self.compliance.isolation_contact_groupmate,
            self.groups.as_ref(),
        );
        let mut slot = Vec::new();
        let mut tally = IsolationTally::default();
        if !propagator.is_active() {
            return (slot, tally);
        }

        for &node in due {
            let expansion = propagator.expand(node, true);
            tally.individuals += expansion.individual.is_some() as usize;
            tally.groupmates += expansion.groupmates.len();
            expansion.drain_into(&mut slot);
        }
        (slot, tally)
    }
}

/// One summary block per intervention day.
fn log_day(report: &DayReport) {
    let t = &report.testing;
    for (label, tally) in [
        ("tested due to symptoms", t.symptomatic),
        ("tested as traces",       t.traced),
        ("tested randomly",        t.random),
        ("tested TOTAL",           t.total()),
    ] {
        info!(
            "\t{}\t{label:<24}[+ {} positive ({:.2} %) +]",
            tally.tested,
            tally.positive,
            tally.positive_pct(),
        );
    }
    info!(
        "\t{} will isolate due to symptoms         ({} as groupmates of symptomatic)",
        report.isolation_symptomatic.individuals, report.isolation_symptomatic.groupmates,
    );
    info!(
        "\t{} will isolate due to positive test    ({} as groupmates of positive)",
        report.isolation_positive.individuals, report.isolation_positive.groupmates,
    );
    info!(
        "\t{} will isolate due to positive contact ({} as groupmates of contact)",
        report.isolation_contact.individuals, report.isolation_contact.groupmates,
    );
    info!("\t{} entered isolation", report.entered_isolation);
}
