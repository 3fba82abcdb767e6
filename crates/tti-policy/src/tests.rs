//! Unit tests for tti-policy components.

use tti_core::{EpidemicModel, HealthState, NodeId};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A frozen population: states never change on their own.
struct StubModel {
    states:          Vec<HealthState>,
    tested:          Vec<bool>,
    tested_in_state: Vec<bool>,
    positive:        Vec<bool>,
    isolated:        Vec<bool>,
    time_in_state:   Vec<f64>,
    degree:          Vec<f64>,
    contacts:        Vec<Vec<NodeId>>,
    exposures:       Vec<u64>,
}

impl StubModel {
    fn new(states: Vec<HealthState>) -> Self {
        let n = states.len();
        Self {
            states,
            tested:          vec![false; n],
            tested_in_state: vec![false; n],
            positive:        vec![false; n],
            isolated:        vec![false; n],
            time_in_state:   vec![0.0; n],
            degree:          vec![1.0; n],
            contacts:        vec![Vec::new(); n],
            exposures:       Vec::new(),
        }
    }

    fn uniform(n: usize, state: HealthState) -> Self {
        Self::new(vec![state; n])
    }
}

impl EpidemicModel for StubModel {
    fn time(&self) -> f64 { 0.0 }
    fn set_horizon(&mut self, _tmax: f64) {}
    fn run_iteration(&mut self) -> bool { false }
    fn node_count(&self) -> usize { self.states.len() }
    fn state(&self, node: NodeId) -> HealthState { self.states[node.index()] }
    fn is_tested(&self, node: NodeId) -> bool { self.tested[node.index()] }
    fn tested_in_current_state(&self, node: NodeId) -> bool { self.tested_in_state[node.index()] }
    fn is_positive(&self, node: NodeId) -> bool { self.positive[node.index()] }
    fn time_in_state(&self, node: NodeId) -> f64 { self.time_in_state[node.index()] }
    fn degree(&self, node: NodeId) -> f64 { self.degree[node.index()] }
    fn contacts(&self, node: NodeId) -> Vec<NodeId> { self.contacts[node.index()].clone() }
    fn total_infected(&self) -> usize {
        self.states.iter().filter(|s| s.is_infected()).count()
    }
    fn set_tested(&mut self, node: NodeId, tested: bool) {
        self.tested[node.index()] = tested;
        self.tested_in_state[node.index()] = tested;
    }
    fn set_positive(&mut self, node: NodeId, positive: bool) {
        self.positive[node.index()] = positive;
    }
    fn set_isolation(&mut self, node: NodeId, isolate: bool) {
        self.isolated[node.index()] = isolate;
    }
    fn introduce_exposures(&mut self, count: u64) {
        self.exposures.push(count);
    }
}

fn ids(raw: &[u32]) -> Vec<NodeId> {
    raw.iter().map(|&i| NodeId(i)).collect()
}

// ── CadenceTable ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cadence_tests {
    use crate::{CadenceTable, DEFAULT_CYCLE_LENGTH};
    use tti_core::TtiError;

    #[test]
    fn weekly_days_are_mondays_up_to_294() {
        let table = CadenceTable::standard(DEFAULT_CYCLE_LENGTH);
        let weekly = table.days_for("weekly").unwrap();
        let expected: Vec<u32> = (0..=42).map(|w| w * 7).collect();
        assert_eq!(*expected.last().unwrap(), 294);
        assert_eq!(weekly.len(), expected.len());
        for d in &expected {
            assert!(weekly.contains(d), "day {d} missing");
        }
        for d in [1, 6, 8, 293, 295, 301, 308] {
            assert!(!weekly.contains(&d), "day {d} unexpectedly present");
        }
    }

    #[test]
    fn schedule_wraps_on_cycle_length() {
        let schedule = CadenceTable::default().schedule("weekly").unwrap();
        assert!(schedule.is_testing_day(0.0));
        assert!(schedule.is_testing_day(7.4));
        assert!(!schedule.is_testing_day(8.0));
        // 317 mod 310 = 7
        assert_eq!(schedule.cycle_day(317.5), 7);
        assert!(schedule.is_testing_day(317.5));
    }

    #[test]
    fn none_never_triggers() {
        let schedule = CadenceTable::default().schedule("none").unwrap();
        assert!((0..1_000).all(|t| !schedule.is_testing_day(t as f64)));
    }

    #[test]
    fn workday_skips_weekends() {
        let table = CadenceTable::default();
        let workday = table.days_for("workday").unwrap();
        assert!(workday.contains(&4));
        assert!(!workday.contains(&5));
        assert!(!workday.contains(&6));
        assert!(workday.contains(&7));
        assert!(table.days_for("cycle_start").unwrap().contains(&0));
    }

    #[test]
    fn everyday_covers_whole_cycle() {
        let schedule = CadenceTable::standard(DEFAULT_CYCLE_LENGTH).schedule("everyday").unwrap();
        let missing: Vec<u32> = (0..DEFAULT_CYCLE_LENGTH)
            .filter(|&d| !schedule.is_testing_day(d as f64))
            .collect();
        assert!(missing.is_empty(), "everyday misses cycle days {missing:?}");

        let short = CadenceTable::standard(5);
        assert_eq!(short.days_for("everyday").unwrap().len(), 5);
    }

    #[test]
    fn unknown_cadence_is_an_error() {
        let err = CadenceTable::default().schedule("fortnightly").unwrap_err();
        assert!(matches!(err, TtiError::UnknownCadence(name) if name == "fortnightly"));
    }

    #[test]
    fn custom_table_replaces_defaults() {
        let table = CadenceTable::from_days(10, [("odd", vec![1, 3, 5, 7, 9])]).unwrap();
        assert!(table.days_for("weekly").is_err());
        let odd = table.schedule("odd").unwrap();
        assert!(odd.is_testing_day(11.0));
        assert!(!odd.is_testing_day(12.0));
        assert!(CadenceTable::from_days(0, [("x", vec![0])]).is_err());
    }
}

// ── FalseNegativeModel ────────────────────────────────────────────────────────

#[cfg(test)]
mod falseneg_tests {
    use crate::{FalseNegativeModel, FalseNegativeTable};
    use tti_core::HealthState;

    #[test]
    fn saturates_past_last_day() {
        let table = FalseNegativeTable::standard();
        for state in [HealthState::ISym, HealthState::IAsym, HealthState::QSym] {
            assert_eq!(table.probability(state, 50.0), table.probability(state, 31.0));
            assert_eq!(table.probability(state, 31.0), 0.99);
        }
        assert_eq!(table.probability(HealthState::IPre, 9.0), 0.22);
    }

    #[test]
    fn curve_follows_time_in_state() {
        let table = FalseNegativeTable::standard();
        assert_eq!(table.probability(HealthState::ISym, 0.0), 0.22);
        assert_eq!(table.probability(HealthState::ISym, 6.9), 0.26);
        assert_eq!(table.probability(HealthState::QAsym, 12.0), 0.52);
        assert_eq!(table.probability(HealthState::QE, 2.0), 1.0);
    }

    #[test]
    fn missing_state_always_false_negative() {
        let table = FalseNegativeTable::new()
            .with_curve(HealthState::ISym, [(0, 0.1)])
            .unwrap();
        assert_eq!(table.probability(HealthState::IAsym, 3.0), 1.0);
        assert_eq!(table.probability(HealthState::ISym, 3.0), 0.1);
    }

    #[test]
    fn sparse_curve_uses_floor_key() {
        let table = FalseNegativeTable::new()
            .with_curve(HealthState::IPre, [(0, 0.5), (4, 0.3), (10, 0.9)])
            .unwrap();
        assert_eq!(table.probability(HealthState::IPre, 3.0), 0.5);
        assert_eq!(table.probability(HealthState::IPre, 7.0), 0.3);
        assert_eq!(table.probability(HealthState::IPre, 12.0), 0.9);
    }

    #[test]
    fn constant_rate_ignores_state_and_time() {
        let model = FalseNegativeModel::constant(0.3).unwrap();
        assert_eq!(model.false_negative_probability(HealthState::IPre, 0.0), 0.3);
        assert_eq!(model.false_negative_probability(HealthState::QSym, 40.0), 0.3);
    }

    #[test]
    fn out_of_range_rates_rejected() {
        assert!(FalseNegativeModel::constant(1.5).is_err());
        assert!(FalseNegativeTable::new().with_curve(HealthState::E, [(0, -0.1)]).is_err());
    }
}

// ── DelayQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod delay_queue_tests {
    use crate::{DelayQueue, TracingPool};
    use tti_core::NodeId;

    #[test]
    fn holds_lag_slots_between_days() {
        for lag in 0..6 {
            let mut queue: DelayQueue<u32> = DelayQueue::new(lag);
            assert_eq!(queue.len(), lag);
            for day in 0..20 {
                queue.advance(vec![day]);
                assert_eq!(queue.len(), lag, "lag {lag}, day {day}");
            }
        }
    }

    #[test]
    fn pop_then_push_keeps_invariant() {
        for lag in 1..5 {
            let mut queue: DelayQueue<u32> = DelayQueue::new(lag);
            for day in 0..10 {
                let _due = queue.pop_front();
                queue.push_back(vec![day]);
                assert_eq!(queue.len(), lag);
            }
        }
    }

    #[test]
    fn advance_releases_after_lag_days() {
        let mut queue = DelayQueue::new(2);
        assert!(queue.advance(vec!['a']).is_empty());
        assert!(queue.advance(vec!['b']).is_empty());
        assert_eq!(queue.advance(vec![]), vec!['a']);
        assert_eq!(queue.advance(vec![]), vec!['b']);
        assert!(queue.advance(vec![]).is_empty());
    }

    #[test]
    fn zero_lag_returns_same_day() {
        let mut queue = DelayQueue::new(0);
        assert_eq!(queue.advance(vec![7]), vec![7]);
        assert!(queue.is_empty());
        assert!(queue.pop_front().is_empty());
    }

    #[test]
    fn front_and_pending() {
        let mut queue = DelayQueue::new(1);
        queue.push_back(vec![1, 2]);
        assert!(queue.front().is_empty());
        assert_eq!(queue.pending(), 2);
        queue.pop_front();
        assert_eq!(queue.front(), &[1, 2]);
    }

    #[test]
    fn tracing_pool_takes_from_back() {
        let mut pool = TracingPool::new();
        pool.absorb(vec![NodeId(1), NodeId(2)]);
        pool.absorb(vec![NodeId(3)]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.take(), Some(NodeId(3)));
        assert_eq!(pool.as_slice(), &[NodeId(1), NodeId(2)]);
        pool.clear();
        assert_eq!(pool.take(), None);
    }
}

// ── Compliance and groups ─────────────────────────────────────────────────────

#[cfg(test)]
mod compliance_tests {
    use super::ids;
    use crate::{Compliance, ComplianceSet, IsolationGroups};
    use tti_core::{GroupId, NodeId, TtiError};

    #[test]
    fn all_false_is_disabled() {
        assert_eq!(
            Compliance::from_flags("tracing", vec![false; 4], 4).unwrap(),
            Compliance::Disabled
        );
        assert!(Compliance::from_flags("tracing", vec![false, true], 2).unwrap().is_enabled());
        assert!(!Compliance::Disabled.complies(NodeId(0)));
    }

    #[test]
    fn all_false_of_wrong_length_still_rejected() {
        let err = Compliance::from_flags("testing_random", vec![false; 3], 4).unwrap_err();
        assert!(matches!(
            err,
            TtiError::ComplianceLength { what: "testing_random", expected: 4, got: 3 }
        ));
        assert!(Compliance::from_flags("testing_random", vec![true; 5], 4).is_err());
    }

    #[test]
    fn only_marks_listed_nodes() {
        let c = Compliance::only(5, ids(&[1, 3]));
        assert!(c.complies(NodeId(1)));
        assert!(!c.complies(NodeId(2)));
        assert!(!c.complies(NodeId(40)));
    }

    #[test]
    fn length_mismatch_rejected() {
        let set = ComplianceSet {
            tracing: Compliance::all(3),
            ..Default::default()
        };
        assert!(set.validate(3).is_ok());
        let err = set.validate(4).unwrap_err();
        assert!(matches!(
            err,
            TtiError::ComplianceLength { what: "tracing", expected: 4, got: 3 }
        ));
    }

    #[test]
    fn groupmates_exclude_self() {
        let groups = IsolationGroups::new(vec![ids(&[0, 1, 2]), ids(&[4, 5])], 6).unwrap();
        assert_eq!(groups.group_count(), 2);
        assert_eq!(groups.group_of(NodeId(5)), Some(GroupId(1)));
        let mates: Vec<NodeId> = groups.groupmates(NodeId(1)).collect();
        assert_eq!(mates, ids(&[0, 2]));
        assert!(groups.group_of(NodeId(3)).is_none());
        assert_eq!(groups.groupmates(NodeId(3)).count(), 0);
    }

    #[test]
    fn malformed_groups_rejected() {
        let out_of_range = IsolationGroups::new(vec![ids(&[0, 9])], 3).unwrap_err();
        assert!(matches!(out_of_range, TtiError::GroupNodeOutOfRange { group: 0, .. }));

        let overlap = IsolationGroups::new(vec![ids(&[0, 1]), ids(&[1, 2])], 3).unwrap_err();
        assert!(matches!(
            overlap,
            TtiError::NodeInMultipleGroups { first: 0, second: 1, .. }
        ));
    }
}

// ── ExposureInjector and InterventionGate ─────────────────────────────────────

#[cfg(test)]
mod exposure_gate_tests {
    use super::StubModel;
    use crate::{should_activate, ExposureInjector, InterventionGate};
    use tti_core::{HealthState, SimRng};

    #[test]
    fn zero_rate_draws_nothing() {
        let injector = ExposureInjector::new(0.0).unwrap();
        let mut rng = SimRng::new(3);
        let mut reference = SimRng::new(3);
        let mut model = StubModel::uniform(2, HealthState::S);
        assert_eq!(injector.inject(&mut model, &mut rng), 0);
        assert_eq!(model.exposures, vec![0]);
        // No randomness consumed.
        assert_eq!(rng.unit().to_bits(), reference.unit().to_bits());
    }

    #[test]
    fn poisson_mean_matches_rate() {
        let injector = ExposureInjector::new(3.0).unwrap();
        let mut rng = SimRng::new(11);
        let draws = 10_000;
        let total: u64 = (0..draws).map(|_| injector.draw(&mut rng)).sum();
        let mean = total as f64 / draws as f64;
        assert!((mean - 3.0).abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn negative_rate_rejected() {
        assert!(ExposureInjector::new(-1.0).is_err());
        assert!(ExposureInjector::new(f64::NAN).is_err());
    }

    #[test]
    fn gate_latches_on_first_crossing() {
        let mut gate = InterventionGate::new(0.1);
        let series = [0.0, 0.05, 0.09, 0.12, 0.2, 0.08, 0.03];
        let mut activations = 0;
        let mut was_active = false;
        for (day, &fraction) in series.iter().enumerate() {
            let active = gate.observe(day as f64, fraction);
            if active && !was_active {
                activations += 1;
            }
            was_active = active;
        }
        assert_eq!(activations, 1);
        assert_eq!(gate.activation_time(), Some(3.0));
        assert!(gate.is_active());
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(should_activate(0.0, 0.0));
        assert!(should_activate(0.25, 0.25));
        assert!(!should_activate(0.24, 0.25));
        assert!(!InterventionGate::new(1.0).observe(0.0, 0.5));
    }
}

// ── IsolationPropagator ───────────────────────────────────────────────────────

#[cfg(test)]
mod isolation_tests {
    use super::ids;
    use crate::{Compliance, IsolationCause, IsolationGroups, IsolationPropagator};
    use tti_core::NodeId;

    fn household() -> IsolationGroups {
        IsolationGroups::new(vec![ids(&[0, 1, 2, 3])], 6).unwrap()
    }

    #[test]
    fn symptomatic_groupmates_need_compliant_individual() {
        let groups = household();
        let individual = Compliance::only(6, ids(&[1]));
        let groupmate = Compliance::all(6);
        let p = IsolationPropagator::new(
            IsolationCause::Symptomatic, &individual, &groupmate, Some(&groups),
        );

        let e = p.expand(NodeId(1), true);
        assert_eq!(e.individual, Some(NodeId(1)));
        assert_eq!(e.groupmates, ids(&[0, 2, 3]));

        assert!(p.expand(NodeId(0), true).is_empty());
    }

    #[test]
    fn ineligible_node_still_reaches_groupmates() {
        let groups = household();
        let all = Compliance::all(6);
        let p = IsolationPropagator::new(IsolationCause::Symptomatic, &all, &all, Some(&groups));
        let e = p.expand(NodeId(2), false);
        assert_eq!(e.individual, None);
        assert_eq!(e.groupmates, ids(&[0, 1, 3]));
    }

    #[test]
    fn positive_groupmates_independent_of_individual() {
        let groups = household();
        let groupmate = Compliance::only(6, ids(&[3]));
        let p = IsolationPropagator::new(
            IsolationCause::Positive, &Compliance::Disabled, &groupmate, Some(&groups),
        );
        let e = p.expand(NodeId(0), true);
        assert_eq!(e.individual, None);
        assert_eq!(e.groupmates, ids(&[3]));
        assert!(p.is_active());
    }

    #[test]
    fn ungrouped_node_expands_to_itself_only() {
        let groups = household();
        let all = Compliance::all(6);
        let p = IsolationPropagator::new(IsolationCause::Contact, &all, &all, Some(&groups));
        let e = p.expand(NodeId(5), true);
        assert_eq!(e.len(), 1);

        let no_groups = IsolationPropagator::new(IsolationCause::Contact, &all, &all, None);
        let mut out = Vec::new();
        no_groups.expand(NodeId(1), true).drain_into(&mut out);
        assert_eq!(out, ids(&[1]));
    }
}

// ── TestSelectionPolicy ───────────────────────────────────────────────────────

#[cfg(test)]
mod selection_tests {
    use super::{ids, StubModel};
    use crate::{Compliance, ComplianceSet, TestCapacity, TestSelectionPolicy, TracingPool};
    use tti_core::{HealthState, NodeId, SimRng};

    fn policy(n: usize, pct: f64, sym: f64, traces: f64, bias: f64) -> TestSelectionPolicy {
        TestSelectionPolicy::new(TestCapacity::from_fractions(n, pct, sym, traces).unwrap(), bias)
            .unwrap()
    }

    #[test]
    fn capacity_floors_fractions() {
        let cap = TestCapacity::from_fractions(99, 0.1, 0.5, 0.35).unwrap();
        assert_eq!(cap.tests_per_day, 9);
        assert_eq!(cap.max_symptomatic, 4);
        assert_eq!(cap.max_tracing, 3);
        assert!(TestCapacity::from_fractions(10, 1.0, 1.5, 1.0).is_err());
    }

    #[test]
    fn symptomatic_pool_filters_and_caps() {
        let mut model = StubModel::uniform(10, HealthState::ISym);
        model.states[0] = HealthState::IAsym;
        model.states[1] = HealthState::QSym;
        model.positive[2] = true;
        model.tested_in_state[3] = true;

        let compliance = ComplianceSet {
            testing_symptomatic: Compliance::all(10),
            ..Default::default()
        };
        let mut rng = SimRng::new(5);

        let wide = policy(10, 1.0, 1.0, 1.0, 0.0);
        let mut picked = wide.select_symptomatic(&model, &compliance, &mut rng);
        picked.sort();
        assert_eq!(picked, ids(&[1, 4, 5, 6, 7, 8, 9]));

        let narrow = policy(10, 0.5, 0.4, 1.0, 0.0);
        assert_eq!(narrow.select_symptomatic(&model, &compliance, &mut rng).len(), 2);
    }

    #[test]
    fn non_testing_day_only_tests_symptomatics() {
        let model = StubModel::uniform(6, HealthState::ISym);
        let compliance = ComplianceSet {
            testing_symptomatic: Compliance::only(6, ids(&[0])),
            testing_traced:      Compliance::all(6),
            testing_random:      Compliance::all(6),
            ..Default::default()
        };
        let mut pool = TracingPool::new();
        pool.absorb(ids(&[2, 3]));
        let mut rng = SimRng::new(1);

        let sel = policy(6, 1.0, 1.0, 1.0, 0.0).select(&model, &compliance, &mut pool, false, &mut rng);
        assert_eq!(sel.symptomatic, ids(&[0]));
        assert!(sel.traced.is_empty());
        assert!(sel.random.is_empty());
        assert_eq!(pool.len(), 2, "pool kept for the next testing day");
    }

    #[test]
    fn traced_skips_positive_and_terminal_nodes() {
        let mut model = StubModel::uniform(6, HealthState::S);
        model.positive[1] = true;
        model.states[2] = HealthState::R;
        model.states[3] = HealthState::F;
        let compliance = ComplianceSet {
            testing_traced: Compliance::all(6),
            ..Default::default()
        };
        let mut pool = TracingPool::new();
        pool.absorb(ids(&[0, 1, 2, 3, 4]));
        let mut rng = SimRng::new(1);

        let sel = policy(6, 1.0, 1.0, 1.0, 0.0).select(&model, &compliance, &mut pool, true, &mut rng);
        assert_eq!(sel.traced, ids(&[4, 0]));
        assert!(pool.is_empty());
    }

    #[test]
    fn traced_capacity_drops_leftovers() {
        let model = StubModel::uniform(10, HealthState::S);
        let compliance = ComplianceSet {
            testing_traced: Compliance::all(10),
            ..Default::default()
        };
        let mut pool = TracingPool::new();
        pool.absorb(ids(&[0, 1, 2, 3, 4, 5]));
        let mut rng = SimRng::new(1);

        // 10 tests/day, traces capped at 20% → 2.
        let sel = policy(10, 1.0, 1.0, 0.2, 0.0).select(&model, &compliance, &mut pool, true, &mut rng);
        assert_eq!(sel.traced, ids(&[5, 4]));
        assert!(pool.is_empty());
    }

    #[test]
    fn routes_respect_total_capacity_and_are_disjoint() {
        let n = 40;
        let mut model = StubModel::uniform(n, HealthState::S);
        for i in 0..10 {
            model.states[i] = HealthState::ISym;
        }
        let compliance = ComplianceSet {
            testing_symptomatic: Compliance::all(n),
            testing_traced:      Compliance::all(n),
            testing_random:      Compliance::all(n),
            ..Default::default()
        };
        let p = policy(n, 0.5, 0.25, 0.25, 1.0);
        let cap = p.capacity();
        let mut rng = SimRng::new(9);

        for _ in 0..50 {
            let mut pool = TracingPool::new();
            pool.absorb(NodeId::all(n).collect());
            let sel = p.select(&model, &compliance, &mut pool, true, &mut rng);
            assert!(sel.total() <= cap.tests_per_day);
            assert!(sel.symptomatic.len() <= cap.max_symptomatic);
            assert!(sel.traced.len() <= cap.max_tracing);

            let mut all: Vec<NodeId> = sel.iter().map(|(_, node)| node).collect();
            let before = all.len();
            all.sort();
            all.dedup();
            assert_eq!(all.len(), before, "routes overlap");
        }
    }

    #[test]
    fn zero_bias_is_uniform_across_degrees() {
        let mut model = StubModel::uniform(4, HealthState::S);
        model.degree = vec![1.0, 2.0, 10.0, 50.0];
        let compliance = ComplianceSet {
            testing_random: Compliance::all(4),
            ..Default::default()
        };
        // 1 test per day.
        let p = policy(4, 0.25, 1.0, 1.0, 0.0);
        let mut rng = SimRng::new(17);
        let mut counts = [0usize; 4];
        let draws = 20_000;
        for _ in 0..draws {
            let sel = p.select(&model, &compliance, &mut TracingPool::new(), true, &mut rng);
            assert_eq!(sel.random.len(), 1);
            counts[sel.random[0].index()] += 1;
        }
        for c in counts {
            let freq = c as f64 / draws as f64;
            assert!((freq - 0.25).abs() < 0.02, "frequency {freq}");
        }
    }

    #[test]
    fn positive_bias_favours_high_degree() {
        let mut model = StubModel::uniform(2, HealthState::S);
        model.degree = vec![1.0, 9.0];
        let compliance = ComplianceSet {
            testing_random: Compliance::all(2),
            ..Default::default()
        };
        let p = policy(2, 0.5, 1.0, 1.0, 1.0);
        let mut rng = SimRng::new(23);
        let draws = 10_000;
        let high = (0..draws)
            .filter(|_| {
                let sel = p.select(&model, &compliance, &mut TracingPool::new(), true, &mut rng);
                sel.random == vec![NodeId(1)]
            })
            .count();
        let freq = high as f64 / draws as f64;
        assert!((freq - 0.9).abs() < 0.02, "frequency {freq}");
    }

    #[test]
    fn empty_random_pool_selects_nothing() {
        let model = StubModel::uniform(5, HealthState::R);
        let compliance = ComplianceSet {
            testing_random: Compliance::all(5),
            ..Default::default()
        };
        let mut rng = SimRng::new(2);
        let sel = policy(5, 1.0, 1.0, 1.0, 2.0).select(&model, &compliance, &mut TracingPool::new(), true, &mut rng);
        assert!(sel.is_empty());
    }
}

// ── TestExecutionEngine ───────────────────────────────────────────────────────

#[cfg(test)]
mod testing_tests {
    use super::{ids, StubModel};
    use crate::{
        Compliance, ComplianceSet, ContactTracing, FalseNegativeModel, IsolationGroups,
        RouteTally, TestExecutionEngine, TestResult, TestSelection,
    };
    use tti_core::{HealthState, NodeId, SimRng};

    fn perfect_test(tracing: ContactTracing) -> TestExecutionEngine {
        TestExecutionEngine::new(FalseNegativeModel::constant(0.0).unwrap(), tracing).unwrap()
    }

    #[test]
    fn susceptible_and_latent_always_negative() {
        let states = vec![HealthState::S, HealthState::QS, HealthState::E, HealthState::QE];
        let mut model = StubModel::new(states);
        let engine = perfect_test(ContactTracing::default());
        let mut rng = SimRng::new(4);
        let mut reference = SimRng::new(4);

        for seed_round in 0..20 {
            for node in NodeId::all(4) {
                assert_eq!(
                    engine.test_node(&mut model, node, &mut rng),
                    TestResult::Negative,
                    "round {seed_round}",
                );
            }
        }
        assert!(model.tested.iter().all(|&t| t));
        assert!(model.positive.iter().all(|&p| !p));
        assert_eq!(rng.unit().to_bits(), reference.unit().to_bits());
    }

    #[test]
    fn certain_false_negative_never_positive() {
        let mut model = StubModel::uniform(3, HealthState::ISym);
        let engine = TestExecutionEngine::new(
            FalseNegativeModel::constant(1.0).unwrap(),
            ContactTracing::default(),
        )
        .unwrap();
        let mut rng = SimRng::new(8);
        for node in NodeId::all(3) {
            assert_eq!(engine.test_node(&mut model, node, &mut rng), TestResult::Negative);
        }
    }

    #[test]
    fn positive_feeds_isolation_and_tracing() {
        let mut model = StubModel::uniform(6, HealthState::S);
        model.states[0] = HealthState::ISym;
        model.contacts[0] = ids(&[3, 4, 5]);
        let groups = IsolationGroups::new(vec![ids(&[0, 1, 2])], 6).unwrap();
        let compliance = ComplianceSet {
            tracing:                       Compliance::only(6, ids(&[0])),
            isolation_positive_individual: Compliance::all(6),
            isolation_positive_groupmate:  Compliance::only(6, ids(&[2])),
            ..Default::default()
        };
        let selection = TestSelection {
            symptomatic: ids(&[0]),
            traced:      ids(&[3]),
            random:      ids(&[1]),
        };
        let mut rng = SimRng::new(12);

        let out = perfect_test(ContactTracing::Count(2)).execute(
            &mut model, &selection, &compliance, Some(&groups), &mut rng,
        );

        assert!(model.positive[0]);
        assert_eq!(out.positive_isolation, ids(&[0, 2]));
        assert_eq!(out.new_traces.len(), 2);
        assert!(out.new_traces.iter().all(|n| [3, 4, 5].contains(&n.0)));
        assert_eq!(out.report.symptomatic, RouteTally { tested: 1, positive: 1 });
        assert_eq!(out.report.traced, RouteTally { tested: 1, positive: 0 });
        assert_eq!(out.report.random, RouteTally { tested: 1, positive: 0 });
        assert_eq!(out.report.total().tested, 3);
        assert_eq!(out.report.positive_isolating, 1);
        assert_eq!(out.report.positive_groupmates, 1);
        assert_eq!(out.report.contacts_traced, 2);
    }

    #[test]
    fn fraction_of_contacts_is_floored() {
        assert_eq!(ContactTracing::Fraction(0.5).contacts_to_trace(5), 2);
        assert_eq!(ContactTracing::Fraction(1.0).contacts_to_trace(5), 5);
        assert_eq!(ContactTracing::Count(10).contacts_to_trace(3), 3);
        assert!(ContactTracing::Fraction(1.2).validate().is_err());
    }

    #[test]
    fn percentage_of_nothing_is_zero() {
        assert_eq!(RouteTally::default().positive_pct(), 0.0);
        assert_eq!(RouteTally { tested: 4, positive: 1 }.positive_pct(), 25.0);
    }
}
