//! Run configuration.

use tti_policy::{ContactTracing, DEFAULT_CYCLE_LENGTH};

/// Day lags between deciding an effect and applying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Lags {
    /// Positive test → contacts available for traced testing.  With 0 the
    /// contacts are released the same day (contact isolation applies at
    /// once) and are tested on the next testing day, since the day's
    /// selection has already run.
    pub tracing:               usize,
    pub isolation_symptomatic: usize,
    pub isolation_positive:    usize,
    pub isolation_contact:     usize,
}

impl Default for Lags {
    fn default() -> Self {
        Self {
            tracing:               1,
            isolation_symptomatic: 1,
            isolation_positive:    1,
            isolation_contact:     0,
        }
    }
}

/// Scalar parameters of the intervention policy.
///
/// Per-node inputs (compliance, isolation groups) and the cadence /
/// false-negative tables are supplied through
/// [`TtiSimBuilder`][crate::TtiSimBuilder].  Typically loaded from a JSON
/// file by the application crate (enable the `serde` feature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TtiConfig {
    /// Horizon handed to the model; the run ends when the model says so.
    pub horizon: f64,

    /// Master RNG seed.  The same seed (and a deterministic model) always
    /// produces identical results.
    pub seed: u64,

    /// Infected fraction at which interventions switch on for good.
    pub intervention_start_pct_infected: f64,

    /// Mean of the daily Poisson count of exogenous exposures.
    pub average_introductions_per_day: f64,

    /// Cadence name looked up in the cadence table.
    pub testing_cadence: String,

    /// Cycle length the cadence days repeat over.
    pub cadence_cycle_length: u32,

    /// Fraction of the population that can be tested per day.
    pub pct_tested_per_day: f64,

    pub max_pct_tests_for_symptomatics: f64,

    pub max_pct_tests_for_traces: f64,

    /// Exponent applied to degree when weighting random tests.  0 = uniform.
    pub random_testing_degree_bias: f64,

    pub contacts_to_trace: ContactTracing,

    pub lags: Lags,
}

impl Default for TtiConfig {
    fn default() -> Self {
        Self {
            horizon:                         300.0,
            seed:                            0,
            intervention_start_pct_infected: 0.0,
            average_introductions_per_day:   0.0,
            testing_cadence:                 "everyday".to_owned(),
            cadence_cycle_length:            DEFAULT_CYCLE_LENGTH,
            pct_tested_per_day:              1.0,
            max_pct_tests_for_symptomatics:  1.0,
            max_pct_tests_for_traces:        1.0,
            random_testing_degree_bias:      0.0,
            contacts_to_trace:               ContactTracing::default(),
            lags:                            Lags::default(),
        }
    }
}
