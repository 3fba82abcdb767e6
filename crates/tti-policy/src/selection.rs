//! Choosing who gets tested today.
//!
//! # Priority order
//!
//! ```text
//! ① Symptomatic self-seekers   every active day, ≤ max_symptomatic
//! ② Traced contacts            testing days only, ≤ max_tracing and
//!                              ≤ tests_per_day − |①|
//! ③ Random surveillance        testing days only, whatever capacity is left,
//!                              weighted by degree^bias
//! ```
//!
//! The three lists are disjoint: a node picked by an earlier route is never
//! picked again by a later one the same day.

use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;
use tti_core::error::{check_fraction, check_non_negative};
use tti_core::{EpidemicModel, NodeId, SimRng, TtiResult};

use crate::{ComplianceSet, TracingPool};

// ── TestRoute ─────────────────────────────────────────────────────────────────

/// Why a node was selected for testing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TestRoute {
    Symptomatic,
    Traced,
    Random,
}

// ── TestCapacity ──────────────────────────────────────────────────────────────

/// Daily test budget and its per-route caps.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TestCapacity {
    pub tests_per_day:   usize,
    pub max_symptomatic: usize,
    pub max_tracing:     usize,
}

impl TestCapacity {
    /// `tests_per_day = floor(node_count × pct_tested_per_day)`; the caps are
    /// floored fractions of that budget.
    pub fn from_fractions(
        node_count:                usize,
        pct_tested_per_day:        f64,
        max_pct_for_symptomatics:  f64,
        max_pct_for_traces:        f64,
    ) -> TtiResult<Self> {
        let pct = check_non_negative("pct_tested_per_day", pct_tested_per_day)?;
        let sym = check_fraction("max_pct_tests_for_symptomatics", max_pct_for_symptomatics)?;
        let traces = check_fraction("max_pct_tests_for_traces", max_pct_for_traces)?;

        let tests_per_day = (node_count as f64 * pct) as usize;
        Ok(Self {
            tests_per_day,
            max_symptomatic: (tests_per_day as f64 * sym) as usize,
            max_tracing:     (tests_per_day as f64 * traces) as usize,
        })
    }
}

// ── TestSelection ─────────────────────────────────────────────────────────────

/// The day's selections, one list per route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestSelection {
    pub symptomatic: Vec<NodeId>,
    pub traced:      Vec<NodeId>,
    pub random:      Vec<NodeId>,
}

impl TestSelection {
    pub fn total(&self) -> usize {
        self.symptomatic.len() + self.traced.len() + self.random.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Every selected node with its route, in testing order.
    pub fn iter(&self) -> impl Iterator<Item = (TestRoute, NodeId)> + '_ {
        let tag = |route: TestRoute| move |&node: &NodeId| (route, node);
        self.symptomatic
            .iter()
            .map(tag(TestRoute::Symptomatic))
            .chain(self.traced.iter().map(tag(TestRoute::Traced)))
            .chain(self.random.iter().map(tag(TestRoute::Random)))
    }
}

// ── TestSelectionPolicy ───────────────────────────────────────────────────────

/// Produces the day's [`TestSelection`] under the [`TestCapacity`] caps.
#[derive(Clone, Debug)]
pub struct TestSelectionPolicy {
    capacity:    TestCapacity,
    degree_bias: f64,
}

impl TestSelectionPolicy {
    pub fn new(capacity: TestCapacity, degree_bias: f64) -> TtiResult<Self> {
        let degree_bias = check_non_negative("random_testing_degree_bias", degree_bias)?;
        Ok(Self { capacity, degree_bias })
    }

    pub fn capacity(&self) -> TestCapacity {
        self.capacity
    }

    /// Select today's tests.
    ///
    /// Traced and random tests only happen when `testing_day` is set.  On a
    /// testing day the tracing pool is drained: nodes beyond the traced
    /// capacity are dropped.
    pub fn select<M: EpidemicModel + ?Sized>(
        &self,
        model:       &M,
        compliance:  &ComplianceSet,
        pool:        &mut TracingPool,
        testing_day: bool,
        rng:         &mut SimRng,
    ) -> TestSelection {
        let symptomatic = self.select_symptomatic(model, compliance, rng);
        if !testing_day {
            return TestSelection { symptomatic, ..Default::default() };
        }

        let mut taken: FxHashSet<NodeId> = symptomatic.iter().copied().collect();
        let traced = self.select_traced(model, compliance, pool, symptomatic.len(), &mut taken);
        pool.clear();
        let random = self.select_random(
            model,
            compliance,
            symptomatic.len() + traced.len(),
            &taken,
            rng,
        );

        TestSelection { symptomatic, traced, random }
    }

    /// Symptomatic nodes seeking a test, drawn uniformly without
    /// replacement.
    pub fn select_symptomatic<M: EpidemicModel + ?Sized>(
        &self,
        model:      &M,
        compliance: &ComplianceSet,
        rng:        &mut SimRng,
    ) -> Vec<NodeId> {
        let seekers = &compliance.testing_symptomatic;
        if !seekers.is_enabled() {
            return Vec::new();
        }
        let candidates: Vec<NodeId> = NodeId::all(model.node_count())
            .filter(|&node| {
                seekers.complies(node)
                    && !model.tested_in_current_state(node)
                    && !model.is_positive(node)
                    && model.state(node).is_symptomatic()
            })
            .collect();

        let count = candidates.len().min(self.capacity.max_symptomatic);
        rng.sample_indices(candidates.len(), count)
            .into_iter()
            .map(|i| candidates[i])
            .collect()
    }

    /// Traced contacts, taken from the back of the pool.
    ///
    /// The number of pool entries examined is capped by capacity; entries
    /// that turn out ineligible still use up their place.
    fn select_traced<M: EpidemicModel + ?Sized>(
        &self,
        model:         &M,
        compliance:    &ComplianceSet,
        pool:          &mut TracingPool,
        already_taken: usize,
        taken:         &mut FxHashSet<NodeId>,
    ) -> Vec<NodeId> {
        let traced = &compliance.testing_traced;
        if !traced.is_enabled() {
            return Vec::new();
        }
        let count = pool
            .len()
            .min(self.capacity.tests_per_day.saturating_sub(already_taken))
            .min(self.capacity.max_tracing);

        let mut selected = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(node) = pool.take() else { break };
            let state = model.state(node);
            if !model.is_positive(node)
                && traced.complies(node)
                && !state.is_screening_excluded()
                && taken.insert(node)
            {
                selected.push(node);
            }
        }
        selected
    }

    /// Surveillance tests filling the remaining capacity.
    fn select_random<M: EpidemicModel + ?Sized>(
        &self,
        model:         &M,
        compliance:    &ComplianceSet,
        already_taken: usize,
        taken:         &FxHashSet<NodeId>,
        rng:           &mut SimRng,
    ) -> Vec<NodeId> {
        let surveilled = &compliance.testing_random;
        if !surveilled.is_enabled() {
            return Vec::new();
        }
        let candidates: Vec<(NodeId, f64)> = NodeId::all(model.node_count())
            .filter(|&node| {
                surveilled.complies(node)
                    && !model.is_positive(node)
                    && !model.state(node).is_screening_excluded()
                    && !taken.contains(&node)
            })
            .map(|node| (node, self.degree_weight(model.degree(node))))
            .collect();

        let count = self
            .capacity
            .tests_per_day
            .saturating_sub(already_taken)
            .min(candidates.len());
        if count == 0 {
            return Vec::new();
        }

        if self.degree_bias == 0.0 {
            return rng
                .sample_indices(candidates.len(), count)
                .into_iter()
                .map(|i| candidates[i].0)
                .collect();
        }

        match candidates.choose_multiple_weighted(rng.inner(), count, |&(_, w)| w) {
            Ok(chosen) => chosen.map(|&(node, _)| node).collect(),
            Err(e) => {
                tracing::warn!("random testing selection skipped: {e}");
                Vec::new()
            }
        }
    }

    /// `degree^bias`; non-finite results weigh nothing.
    fn degree_weight(&self, degree: f64) -> f64 {
        let w = degree.powf(self.degree_bias);
        if w.is_finite() && w > 0.0 { w } else { 0.0 }
    }
}
