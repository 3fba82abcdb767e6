//! Fluent builder for constructing a [`TtiSim`].

use tti_core::error::check_fraction;
use tti_core::{DayTracker, EpidemicModel, NodeId, SimRng};
use tti_policy::{
    CadenceTable, ComplianceSet, DelayQueue, ExposureInjector, FalseNegativeModel,
    InterventionGate, IsolationGroups, TestCapacity, TestExecutionEngine, TestSelectionPolicy,
    TracingPool,
};

use crate::sim::Phase;
use crate::{SimError, SimResult, TtiConfig, TtiSim};

/// Fluent builder for [`TtiSim<M>`].
///
/// # Required inputs
///
/// - [`TtiConfig`]: rates, caps, lags, cadence name and seed
/// - `M: EpidemicModel`: the external model
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                 |
/// |--------------------------|-----------------------------------------|
/// | `.compliance(c)`         | Every category disabled                 |
/// | `.isolation_groups(g)`   | No groups (no groupmate propagation)    |
/// | `.cadence_table(t)`      | `CadenceTable::standard(cycle_length)`  |
/// | `.false_negative(m)`     | Standard temporal table                 |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = TtiSimBuilder::new(config, model)
///     .compliance(compliance)
///     .isolation_groups(households)
///     .build()?;
/// let interval = sim.run(&mut NoopObserver);
/// ```
pub struct TtiSimBuilder<M: EpidemicModel> {
    config:         TtiConfig,
    model:          M,
    compliance:     ComplianceSet,
    groups:         Option<Vec<Vec<NodeId>>>,
    cadence_table:  Option<CadenceTable>,
    false_negative: FalseNegativeModel,
}

impl<M: EpidemicModel> TtiSimBuilder<M> {
    pub fn new(config: TtiConfig, model: M) -> Self {
        Self {
            config,
            model,
            compliance:     ComplianceSet::default(),
            groups:         None,
            cadence_table:  None,
            false_negative: FalseNegativeModel::default(),
        }
    }

    /// Per-node compliance for every category.  Enabled vectors must have
    /// one entry per model node.
    pub fn compliance(mut self, compliance: ComplianceSet) -> Self {
        self.compliance = compliance;
        self
    }

    /// Disjoint isolation groups (households, bubbles, …).
    pub fn isolation_groups(mut self, groups: Vec<Vec<NodeId>>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Replace the standard cadence table.
    pub fn cadence_table(mut self, table: CadenceTable) -> Self {
        self.cadence_table = Some(table);
        self
    }

    pub fn false_negative(mut self, model: FalseNegativeModel) -> Self {
        self.false_negative = model;
        self
    }

    /// Validate inputs, build the policy components and delay queues, and
    /// return a ready-to-run [`TtiSim`].
    pub fn build(self) -> SimResult<TtiSim<M>> {
        let config = self.config;
        let node_count = self.model.node_count();

        // ── Validate scalar parameters ────────────────────────────────────
        if !(config.horizon.is_finite() && config.horizon >= 0.0) {
            return Err(SimError::Config(format!(
                "horizon must be finite and >= 0, got {}",
                config.horizon
            )));
        }
        if config.cadence_cycle_length == 0 {
            return Err(SimError::Config("cadence_cycle_length must be at least 1".into()));
        }
        check_fraction(
            "intervention_start_pct_infected",
            config.intervention_start_pct_infected,
        )?;

        // ── Validate per-node inputs ──────────────────────────────────────
        self.compliance.validate(node_count)?;
        let groups = self
            .groups
            .map(|g| IsolationGroups::new(g, node_count))
            .transpose()?;

        // ── Resolve tables ────────────────────────────────────────────────
        let table = match self.cadence_table {
            Some(t) => {
                if t.cycle_length() != config.cadence_cycle_length {
                    return Err(SimError::Config(format!(
                        "cadence table cycle length {} does not match configured {}",
                        t.cycle_length(),
                        config.cadence_cycle_length
                    )));
                }
                t
            }
            None => CadenceTable::standard(config.cadence_cycle_length),
        };
        let schedule = table.schedule(&config.testing_cadence)?;

        // ── Build policy components ───────────────────────────────────────
        let capacity = TestCapacity::from_fractions(
            node_count,
            config.pct_tested_per_day,
            config.max_pct_tests_for_symptomatics,
            config.max_pct_tests_for_traces,
        )?;
        let selection = TestSelectionPolicy::new(capacity, config.random_testing_degree_bias)?;
        let engine = TestExecutionEngine::new(self.false_negative, config.contacts_to_trace)?;
        let exposure = ExposureInjector::new(config.average_introductions_per_day)?;
        let gate = InterventionGate::new(config.intervention_start_pct_infected);

        let lags = config.lags;
        Ok(TtiSim {
            rng:                   SimRng::new(config.seed),
            days:                  DayTracker::new(),
            phase:                 Phase::NotStarted,
            tracing_queue:         DelayQueue::new(lags.tracing),
            tracing_pool:          TracingPool::new(),
            isolation_symptomatic: DelayQueue::new(lags.isolation_symptomatic),
            isolation_positive:    DelayQueue::new(lags.isolation_positive),
            isolation_contact:     DelayQueue::new(lags.isolation_contact),
            compliance:            self.compliance,
            model:                 self.model,
            config,
            schedule,
            groups,
            exposure,
            gate,
            selection,
            engine,
        })
    }
}
