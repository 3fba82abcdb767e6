//! Probability that a test on an infected node comes back negative.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tti_core::error::check_fraction;
use tti_core::{HealthState, TtiResult};

/// False-negative curve of the symptomatic and asymptomatic states, indexed
/// by whole days spent in the state (0..=31).
const INFECTIOUS_CURVE: [f64; 32] = [
    0.22, 0.22, 0.22, 0.22, 0.22, 0.22, 0.26, 0.29, 0.34, 0.38, 0.43, 0.48, 0.52, 0.57, 0.62,
    0.66, 0.70, 0.76, 0.79, 0.82, 0.85, 0.88, 0.90, 0.92, 0.93, 0.95, 0.96, 0.97, 0.97, 0.98,
    0.98, 0.99,
];

/// Per-state false-negative probabilities keyed by whole days in state.
#[derive(Clone, Debug, Default)]
pub struct FalseNegativeTable {
    rates: FxHashMap<HealthState, BTreeMap<u32, f64>>,
}

impl FalseNegativeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default temporal table.
    pub fn standard() -> Self {
        let flat = |p: f64, days: u32| (0..=days).map(|d| (d, p)).collect::<BTreeMap<_, _>>();
        let infectious: BTreeMap<u32, f64> =
            INFECTIOUS_CURVE.iter().enumerate().map(|(d, &p)| (d as u32, p)).collect();

        let mut rates = FxHashMap::default();
        for (free, quarantined) in [
            (HealthState::E, HealthState::QE),
            (HealthState::IPre, HealthState::QPre),
            (HealthState::ISym, HealthState::QSym),
            (HealthState::IAsym, HealthState::QAsym),
        ] {
            let curve = match free {
                HealthState::E => flat(1.0, 3),
                HealthState::IPre => flat(0.22, 2),
                _ => infectious.clone(),
            };
            rates.insert(quarantined, curve.clone());
            rates.insert(free, curve);
        }
        Self { rates }
    }

    /// Set the curve for `state`.  Every probability must lie in `[0, 1]`.
    pub fn with_curve<I>(mut self, state: HealthState, curve: I) -> TtiResult<Self>
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let mut points = BTreeMap::new();
        for (day, p) in curve {
            points.insert(day, check_fraction("false_negative_rate", p)?);
        }
        self.rates.insert(state, points);
        Ok(self)
    }

    /// Probability of a false negative for a node in `state` for
    /// `time_in_state` days.
    ///
    /// Times past the last configured day saturate at that day's value.  A
    /// state missing from the table (or with an empty curve) always tests
    /// false negative.
    pub fn probability(&self, state: HealthState, time_in_state: f64) -> f64 {
        let Some(curve) = self.rates.get(&state) else {
            return 1.0;
        };
        let Some((&max_day, _)) = curve.last_key_value() else {
            return 1.0;
        };
        let day = (time_in_state.max(0.0) as u32).min(max_day);
        curve
            .range(..=day)
            .next_back()
            .map_or(1.0, |(_, &p)| p)
    }
}

/// How test sensitivity is modelled.
#[derive(Clone, Debug)]
pub enum FalseNegativeModel {
    /// The same false-negative rate for every detectable state.
    Constant(f64),
    /// Rate depends on the state and the time spent in it.
    Temporal(FalseNegativeTable),
}

impl FalseNegativeModel {
    /// A constant-rate model; `rate` must lie in `[0, 1]`.
    pub fn constant(rate: f64) -> TtiResult<Self> {
        Ok(Self::Constant(check_fraction("test_falseneg_rate", rate)?))
    }

    /// Probability that a test on a detectable node is negative.
    ///
    /// Callers only consult the model for [`HealthState::is_detectable`]
    /// states; susceptible and latent nodes test negative without a draw.
    pub fn false_negative_probability(&self, state: HealthState, time_in_state: f64) -> f64 {
        match self {
            Self::Constant(rate) => *rate,
            Self::Temporal(table) => table.probability(state, time_in_state),
        }
    }
}

impl Default for FalseNegativeModel {
    fn default() -> Self {
        Self::Temporal(FalseNegativeTable::standard())
    }
}
