//! A small stochastic SEIR model on a contact network.
//!
//! Advances in fixed fractional-day steps so the intervention loop sees
//! several iterations per day.  Quarantined nodes neither infect nor get
//! infected.

use serde::Deserialize;
use tti_core::{EpidemicModel, HealthState, NodeId, SimRng};

use HealthState::*;

/// Rates are per day.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DiseaseParams {
    /// Transmission rate per infectious contact.
    pub beta:            f64,
    /// E → IPre.
    pub sigma:           f64,
    /// IPre → ISym / IAsym.
    pub lambda:          f64,
    /// ISym / IAsym → R.
    pub gamma:           f64,
    pub p_symptomatic:   f64,
    pub initial_exposed: usize,
    /// Iteration length in days.
    pub step:            f64,
}

impl Default for DiseaseParams {
    fn default() -> Self {
        Self {
            beta:            0.08,
            sigma:           1.0 / 3.0,
            lambda:          1.0 / 2.0,
            gamma:           1.0 / 6.0,
            p_symptomatic:   0.6,
            initial_exposed: 5,
            step:            0.5,
        }
    }
}

pub struct ToySeir {
    params:          DiseaseParams,
    t:               f64,
    tmax:            f64,
    rng:             SimRng,
    contacts:        Vec<Vec<NodeId>>,
    states:          Vec<HealthState>,
    time_in_state:   Vec<f64>,
    tested:          Vec<bool>,
    tested_in_state: Vec<bool>,
    positive:        Vec<bool>,
}

impl ToySeir {
    pub fn new(params: DiseaseParams, contacts: Vec<Vec<NodeId>>, rng: SimRng) -> Self {
        let n = contacts.len();
        let mut model = Self {
            params,
            t:               0.0,
            tmax:            0.0,
            rng,
            contacts,
            states:          vec![S; n],
            time_in_state:   vec![0.0; n],
            tested:          vec![false; n],
            tested_in_state: vec![false; n],
            positive:        vec![false; n],
        };
        let seeds = model.params.initial_exposed as u64;
        model.introduce_exposures(seeds);
        model
    }

    /// Node counts per state, in [`HealthState::ALL`] order.
    pub fn census(&self) -> Vec<(HealthState, usize)> {
        HealthState::ALL
            .iter()
            .map(|&s| (s, self.states.iter().filter(|&&x| x == s).count()))
            .collect()
    }

    fn transition(&mut self, node: usize, to: HealthState) {
        if self.states[node] != to {
            self.states[node] = to;
            self.time_in_state[node] = 0.0;
            self.tested_in_state[node] = false;
        }
    }

    fn hit(&mut self, rate: f64) -> bool {
        let p = 1.0 - (-rate * self.params.step).exp();
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    fn infectious_free(state: HealthState) -> bool {
        matches!(state, IPre | ISym | IAsym)
    }
}

impl EpidemicModel for ToySeir {
    fn time(&self) -> f64 {
        self.t
    }

    fn set_horizon(&mut self, tmax: f64) {
        self.tmax = tmax;
    }

    fn run_iteration(&mut self) -> bool {
        if self.t >= self.tmax {
            return false;
        }
        let snapshot = self.states.clone();
        let p = self.params.clone();

        for node in 0..snapshot.len() {
            let state = snapshot[node];
            let next = match state {
                S => {
                    let pressure = self.contacts[node]
                        .iter()
                        .filter(|c| Self::infectious_free(snapshot[c.index()]))
                        .count() as f64;
                    (pressure > 0.0 && self.hit(p.beta * pressure)).then_some(E)
                }
                E | QE => self.hit(p.sigma).then_some(IPre),
                IPre | QPre => self.hit(p.lambda).then(|| {
                    if self.rng.gen_bool(p.p_symptomatic) { ISym } else { IAsym }
                }),
                ISym | IAsym | QSym | QAsym => self.hit(p.gamma).then_some(R),
                _ => None,
            };
            if let Some(next) = next {
                let next = if state.is_quarantined() { next.quarantined() } else { next };
                self.transition(node, next);
            }
        }

        for t in &mut self.time_in_state {
            *t += p.step;
        }
        self.t += p.step;
        self.t < self.tmax
    }

    fn node_count(&self) -> usize {
        self.states.len()
    }

    fn state(&self, node: NodeId) -> HealthState {
        self.states[node.index()]
    }

    fn is_tested(&self, node: NodeId) -> bool {
        self.tested[node.index()]
    }

    fn tested_in_current_state(&self, node: NodeId) -> bool {
        self.tested_in_state[node.index()]
    }

    fn is_positive(&self, node: NodeId) -> bool {
        self.positive[node.index()]
    }

    fn time_in_state(&self, node: NodeId) -> f64 {
        self.time_in_state[node.index()]
    }

    fn degree(&self, node: NodeId) -> f64 {
        self.contacts[node.index()].len() as f64
    }

    fn contacts(&self, node: NodeId) -> Vec<NodeId> {
        self.contacts[node.index()].clone()
    }

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
        let i = node.index();
        if isolate {
            // Keeps the clock and test flags: isolation is not a disease transition.
            self.states[i] = self.states[i].quarantined();
        }
    }

    fn introduce_exposures(&mut self, count: u64) {
        let susceptible: Vec<usize> =
            (0..self.states.len()).filter(|&i| self.states[i] == S).collect();
        let picks = self.rng.sample_indices(susceptible.len(), count as usize);
        for k in picks {
            self.transition(susceptible[k], E);
        }
    }
}
