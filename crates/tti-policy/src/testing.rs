//! Running the selected tests and feeding the tracing and isolation pipelines.

use tti_core::error::check_fraction;
use tti_core::{EpidemicModel, NodeId, SimRng, TtiResult};

use crate::{
    ComplianceSet, FalseNegativeModel, IsolationCause, IsolationGroups, IsolationPropagator,
    TestRoute, TestSelection,
};

// ── ContactTracing ────────────────────────────────────────────────────────────

/// How many of a positive node's contacts get traced.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactTracing {
    /// A fixed number of contacts (all of them if the node has fewer).
    Count(usize),
    /// `floor(fraction × contacts)` contacts.
    Fraction(f64),
}

impl ContactTracing {
    pub fn validate(self) -> TtiResult<Self> {
        if let Self::Fraction(f) = self {
            check_fraction("pct_contacts_to_trace", f)?;
        }
        Ok(self)
    }

    /// Number of contacts to trace out of `available`.
    pub fn contacts_to_trace(self, available: usize) -> usize {
        match self {
            Self::Count(n) => n.min(available),
            Self::Fraction(f) => ((f * available as f64) as usize).min(available),
        }
    }
}

impl Default for ContactTracing {
    fn default() -> Self {
        Self::Fraction(1.0)
    }
}

// ── Tallies ───────────────────────────────────────────────────────────────────

/// Tests run and positives found along one route.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct RouteTally {
    pub tested:   usize,
    pub positive: usize,
}

impl RouteTally {
    /// Share of tests that were positive, in percent.  Zero when nothing was
    /// tested.
    pub fn positive_pct(&self) -> f64 {
        if self.tested == 0 {
            0.0
        } else {
            self.positive as f64 / self.tested as f64 * 100.0
        }
    }
}

impl std::ops::Add for RouteTally {
    type Output = RouteTally;
    fn add(self, rhs: RouteTally) -> RouteTally {
        RouteTally {
            tested:   self.tested + rhs.tested,
            positive: self.positive + rhs.positive,
        }
    }
}

/// Per-day test counters.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TestingReport {
    pub symptomatic: RouteTally,
    pub traced:      RouteTally,
    pub random:      RouteTally,
    /// Positive nodes queued for their own isolation.
    pub positive_isolating:  usize,
    /// Groupmates of positive nodes queued for isolation.
    pub positive_groupmates: usize,
    /// Contacts added to the tracing pipeline.
    pub contacts_traced:     usize,
}

impl TestingReport {
    pub fn total(&self) -> RouteTally {
        self.symptomatic + self.traced + self.random
    }

    pub fn route(&self, route: TestRoute) -> RouteTally {
        match route {
            TestRoute::Symptomatic => self.symptomatic,
            TestRoute::Traced => self.traced,
            TestRoute::Random => self.random,
        }
    }

    fn route_mut(&mut self, route: TestRoute) -> &mut RouteTally {
        match route {
            TestRoute::Symptomatic => &mut self.symptomatic,
            TestRoute::Traced => &mut self.traced,
            TestRoute::Random => &mut self.random,
        }
    }
}

// ── TestExecution ─────────────────────────────────────────────────────────────

/// Result of one day of testing.
#[derive(Clone, Debug, Default)]
pub struct TestExecution {
    /// Today's slot for the positive-isolation queue.
    pub positive_isolation: Vec<NodeId>,
    /// Today's slot for the tracing queue.
    pub new_traces:         Vec<NodeId>,
    pub report:             TestingReport,
}

/// Outcome of a single test.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TestResult {
    Negative,
    Positive,
}

/// Applies false-negative draws to the day's selection and routes positives
/// into isolation and tracing.
#[derive(Clone, Debug)]
pub struct TestExecutionEngine {
    false_negative:  FalseNegativeModel,
    contact_tracing: ContactTracing,
}

impl TestExecutionEngine {
    pub fn new(false_negative: FalseNegativeModel, contact_tracing: ContactTracing) -> TtiResult<Self> {
        Ok(Self {
            false_negative,
            contact_tracing: contact_tracing.validate()?,
        })
    }

    pub fn false_negative_model(&self) -> &FalseNegativeModel {
        &self.false_negative
    }

    /// Test one node: mark it tested, then decide the outcome.
    ///
    /// Susceptible and latent nodes are negative without consuming
    /// randomness.  Detectable nodes are positive iff
    /// `u < 1 − p_false_negative`.  Positives are marked on the model.
    pub fn test_node<M: EpidemicModel + ?Sized>(
        &self,
        model: &mut M,
        node:  NodeId,
        rng:   &mut SimRng,
    ) -> TestResult {
        model.set_tested(node, true);

        let state = model.state(node);
        if !state.is_detectable() {
            return TestResult::Negative;
        }
        let p_fn = self
            .false_negative
            .false_negative_probability(state, model.time_in_state(node));
        if rng.unit() < 1.0 - p_fn {
            model.set_positive(node, true);
            TestResult::Positive
        } else {
            TestResult::Negative
        }
    }

    /// Run every test in `selection`, symptomatic first, then traced, then
    /// random.
    pub fn execute<M: EpidemicModel + ?Sized>(
        &self,
        model:      &mut M,
        selection:  &TestSelection,
        compliance: &ComplianceSet,
        groups:     Option<&IsolationGroups>,
        rng:        &mut SimRng,
    ) -> TestExecution {
        let propagator = IsolationPropagator::new(
            IsolationCause::Positive,
            &compliance.isolation_positive_individual,
            &compliance.isolation_positive_groupmate,
            groups,
        );
        let mut out = TestExecution::default();

        for (route, node) in selection.iter() {
            let result = self.test_node(model, node, rng);
            let tally = out.report.route_mut(route);
            tally.tested += 1;
            if result == TestResult::Negative {
                continue;
            }
            tally.positive += 1;

            let expansion = propagator.expand(node, true);
            out.report.positive_isolating += expansion.individual.is_some() as usize;
            out.report.positive_groupmates += expansion.groupmates.len();
            expansion.drain_into(&mut out.positive_isolation);

            if compliance.tracing.complies(node) {
                let traced = self.trace_contacts(&*model, node, rng);
                out.report.contacts_traced += traced.len();
                out.new_traces.extend(traced);
            }
        }
        out
    }

    /// A random subset of `node`'s contacts, sized by the tracing policy.
    fn trace_contacts<M: EpidemicModel + ?Sized>(
        &self,
        model: &M,
        node:  NodeId,
        rng:   &mut SimRng,
    ) -> Vec<NodeId> {
        let mut contacts = model.contacts(node);
        rng.shuffle(&mut contacts);
        let n = self.contact_tracing.contacts_to_trace(contacts.len());
        contacts.truncate(n);
        contacts
    }
}
